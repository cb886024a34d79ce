// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use ledgerlens::fx::CurrencyConverter;
use ledgerlens::models::{Currency, DisplayCurrency, Record};
use ledgerlens::service::LedgerService;
use ledgerlens::store::SqliteStore;
use ledgerlens::summary::{recent_average, MonthRecords};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn record(id: i64, date: &str, ccy: Currency, amount: Decimal) -> Record {
    Record {
        id,
        owner: "local".to_string(),
        title: format!("r{}", id),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        currency: ccy,
        amount,
        note: None,
        category_id: None,
    }
}

#[test]
fn overall_average_is_day_weighted() {
    let fx = CurrencyConverter::fixed();
    // Feb/Mar/Apr 2023: 28, 31, 30 days; unequal totals.
    let months = vec![
        MonthRecords {
            month: 4,
            year: 2023,
            records: vec![record(1, "2023-04-10", Currency::Khr, dec!(480000))], // 120 USD
        },
        MonthRecords {
            month: 3,
            year: 2023,
            records: vec![record(2, "2023-03-05", Currency::Usd, dec!(62))],
        },
        MonthRecords {
            month: 2,
            year: 2023,
            records: vec![
                record(3, "2023-02-01", Currency::Usd, dec!(20)),
                record(4, "2023-02-14", Currency::Khr, dec!(32000)), // 8 USD
            ],
        },
    ];
    let report = recent_average(&months, DisplayCurrency::Both, &fx).unwrap();

    // sum(totals) / sum(days) = 210 / 89 = 2.3595...
    assert_eq!(report.overall_average.usd, dec!(2.36));
    // NOT the mean of the monthly averages: (4 + 2 + 1) / 3 = 2.33
    let mean_of_averages: Decimal = report
        .recent_months
        .iter()
        .map(|m| m.average_per_day.usd)
        .sum::<Decimal>()
        / dec!(3);
    assert_ne!(
        report.overall_average.usd,
        mean_of_averages.round_dp(2),
        "overall average must be day-weighted"
    );

    let feb = &report.recent_months[2];
    assert_eq!(feb.month_name, "February");
    assert_eq!(feb.average_per_day.usd, dec!(1.00));
    assert_eq!(feb.record_count, 2);
    // Native sums, before any conversion
    assert_eq!(feb.raw_totals.usd, dec!(20.00));
    assert_eq!(feb.raw_totals.khr, dec!(32000.00));
}

#[test]
fn displayed_pair_derives_from_one_base_total() {
    let fx = CurrencyConverter::fixed();
    let months = vec![MonthRecords {
        month: 1,
        year: 2025,
        records: vec![
            record(1, "2025-01-10", Currency::Usd, dec!(10)),
            record(2, "2025-01-11", Currency::Khr, dec!(40000)), // 10 USD
        ],
    }];
    for display in [
        DisplayCurrency::Usd,
        DisplayCurrency::Khr,
        DisplayCurrency::Both,
    ] {
        let report = recent_average(&months, display, &fx).unwrap();
        let m = &report.recent_months[0];
        // 20 USD total; the KHR figure is reconstructed (20 * 4000), never
        // the native KHR sum (40000).
        assert_eq!(m.total_expenses.usd, dec!(20.00));
        assert_eq!(m.total_expenses.khr, dec!(80000.00));
        assert_eq!(m.raw_totals.khr, dec!(40000.00));
        assert_eq!(report.display_currency, display);
    }
}

#[test]
fn no_months_yields_zero_average() {
    let fx = CurrencyConverter::fixed();
    let report = recent_average(&[], DisplayCurrency::Both, &fx).unwrap();
    assert_eq!(report.overall_average.usd, dec!(0));
    assert!(report.recent_months.is_empty());
}

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    ledgerlens::db::init_schema(&mut conn).unwrap();
    conn
}

fn insert(conn: &Connection, date: &str, ccy: &str, amount: &str) {
    conn.execute(
        "INSERT INTO records(owner, title, date, currency, amount) VALUES ('local', 'x', ?1, ?2, ?3)",
        params![date, ccy, amount],
    )
    .unwrap();
}

#[test]
fn service_fetches_calendar_aligned_months_most_recent_first() {
    let conn = setup();
    // "Today" is mid-April; the window is Apr, Mar, Feb regardless of the
    // day-of-month. January must not leak in.
    insert(&conn, "2023-04-10", "USD", "120");
    insert(&conn, "2023-03-05", "USD", "62");
    insert(&conn, "2023-02-01", "USD", "28");
    insert(&conn, "2023-01-31", "USD", "9999");

    let store = SqliteStore::new(&conn);
    let service = LedgerService::new(&store);
    let today = NaiveDate::from_ymd_opt(2023, 4, 15).unwrap();
    let report = service
        .recent_average("local", DisplayCurrency::Usd, today)
        .unwrap();

    let labels: Vec<(u32, i32)> = report
        .recent_months
        .iter()
        .map(|m| (m.month, m.year))
        .collect();
    assert_eq!(labels, vec![(4, 2023), (3, 2023), (2, 2023)]);
    assert_eq!(report.recent_months[0].total_expenses.usd, dec!(120.00));
    // 210 / 89 days
    assert_eq!(report.overall_average.usd, dec!(2.36));
}
