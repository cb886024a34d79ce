// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use ledgerlens::filter::{end_of_day, FilterExpr, RecordFilter};
use ledgerlens::fx::CurrencyConverter;
use ledgerlens::models::{Currency, Record};
use ledgerlens::store::{RecordQuery, RecordStore, SqliteStore};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn record(id: i64, date: &str, ccy: Currency, amount: Decimal, cat: Option<i64>) -> Record {
    Record {
        id,
        owner: "local".to_string(),
        title: format!("r{}", id),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        currency: ccy,
        amount,
        note: None,
        category_id: cat,
    }
}

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    ledgerlens::db::init_schema(&mut conn).unwrap();
    conn
}

fn insert(conn: &Connection, r: &Record) {
    conn.execute(
        "INSERT INTO records(id, owner, title, date, currency, amount, category_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            r.id,
            r.owner,
            r.title,
            r.date.to_string(),
            r.currency.as_str(),
            r.amount.to_string(),
            r.category_id
        ],
    )
    .unwrap();
}

#[test]
fn min_bound_matches_equivalent_amounts_in_either_currency() {
    let fx = CurrencyConverter::fixed();
    let filter = RecordFilter {
        min_amount: Some(dec!(100)),
        amount_currency: Some(Currency::Usd),
        ..RecordFilter::default()
    };
    let expr = filter.build(&fx).unwrap();

    // 400000 KHR / 4000 = 100 USD, exactly at the threshold
    assert!(expr.matches(&record(1, "2025-08-01", Currency::Khr, dec!(400000), None)));
    assert!(!expr.matches(&record(2, "2025-08-01", Currency::Khr, dec!(399999.99), None)));
    assert!(expr.matches(&record(3, "2025-08-01", Currency::Usd, dec!(100), None)));
    assert!(!expr.matches(&record(4, "2025-08-01", Currency::Usd, dec!(99.99), None)));
}

#[test]
fn bounds_expressed_in_khr_convert_once_through_base() {
    let fx = CurrencyConverter::fixed();
    let filter = RecordFilter {
        min_amount: Some(dec!(400000)),
        max_amount: Some(dec!(800000)),
        amount_currency: Some(Currency::Khr),
        ..RecordFilter::default()
    };
    let expr = filter.build(&fx).unwrap();
    assert!(expr.matches(&record(1, "2025-08-01", Currency::Usd, dec!(150), None)));
    assert!(!expr.matches(&record(2, "2025-08-01", Currency::Usd, dec!(200.01), None)));
    assert!(expr.matches(&record(3, "2025-08-01", Currency::Khr, dec!(500000), None)));
}

#[test]
fn open_bounds_and_empty_filter() {
    let fx = CurrencyConverter::fixed();
    // only max: open lower bound
    let max_only = RecordFilter {
        max_amount: Some(dec!(50)),
        ..RecordFilter::default()
    }
    .build(&fx)
    .unwrap();
    assert!(max_only.matches(&record(1, "2025-08-01", Currency::Usd, dec!(0), None)));
    assert!(!max_only.matches(&record(2, "2025-08-01", Currency::Khr, dec!(200001), None)));

    // only min: open upper bound
    let min_only = RecordFilter {
        min_amount: Some(dec!(50)),
        ..RecordFilter::default()
    }
    .build(&fx)
    .unwrap();
    assert!(min_only.matches(&record(3, "2025-08-01", Currency::Khr, dec!(99999999), None)));

    // neither bound and no other constraint: no predicate at all, never an
    // always-false disjunction
    assert!(RecordFilter::default().build(&fx).is_none());
}

#[test]
fn end_date_is_inclusive_through_end_of_day() {
    let fx = CurrencyConverter::fixed();
    let filter = RecordFilter {
        end_date: Some(NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()),
        ..RecordFilter::default()
    };
    let expr = filter.build(&fx).unwrap();
    assert!(expr.matches(&record(1, "2025-03-05", Currency::Usd, dec!(10), None)));
    assert!(!expr.matches(&record(2, "2025-03-06", Currency::Usd, dec!(10), None)));

    let eod = end_of_day(NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
    assert_eq!(eod.format("%H:%M:%S%.3f").to_string(), "23:59:59.999");
}

#[test]
fn category_and_dates_combine_with_and_against_currency_branches() {
    let fx = CurrencyConverter::fixed();
    let filter = RecordFilter {
        min_amount: Some(dec!(10)),
        category_id: Some(7),
        start_date: Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
        end_date: Some(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()),
        ..RecordFilter::default()
    };
    let expr = filter.build(&fx).unwrap();
    assert!(expr.matches(&record(1, "2025-01-15", Currency::Khr, dec!(50000), Some(7))));
    // wrong category
    assert!(!expr.matches(&record(2, "2025-01-15", Currency::Khr, dec!(50000), Some(8))));
    // outside the date range
    assert!(!expr.matches(&record(3, "2025-02-01", Currency::Khr, dec!(50000), Some(7))));
    // below the converted bound
    assert!(!expr.matches(&record(4, "2025-01-15", Currency::Khr, dec!(39999), Some(7))));
}

#[test]
fn exact_currency_filter_restricts_native_currency() {
    let fx = CurrencyConverter::fixed();
    let expr = RecordFilter {
        currency: Some(Currency::Khr),
        ..RecordFilter::default()
    }
    .build(&fx)
    .unwrap();
    assert_eq!(expr, FilterExpr::CurrencyIs(Currency::Khr));
}

#[test]
fn sql_translation_agrees_with_in_memory_evaluation() {
    let conn = setup();
    conn.execute(
        "INSERT INTO categories(id, owner, name) VALUES (1, 'local', 'Food')",
        [],
    )
    .unwrap();
    let fx = CurrencyConverter::fixed();
    let records = vec![
        record(1, "2025-08-01", Currency::Usd, dec!(99.99), None),
        record(2, "2025-08-02", Currency::Usd, dec!(100), Some(1)),
        record(3, "2025-08-03", Currency::Khr, dec!(399999.99), None),
        record(4, "2025-08-04", Currency::Khr, dec!(400000), None),
        record(5, "2025-09-01", Currency::Usd, dec!(500), None),
    ];
    for r in &records {
        insert(&conn, r);
    }

    let filter = RecordFilter {
        min_amount: Some(dec!(100)),
        end_date: Some(NaiveDate::from_ymd_opt(2025, 8, 31).unwrap()),
        ..RecordFilter::default()
    };
    let expr = filter.build(&fx).unwrap();
    let expected: Vec<i64> = records
        .iter()
        .filter(|r| expr.matches(r))
        .map(|r| r.id)
        .collect();
    assert_eq!(expected, vec![2, 4]);

    let store = SqliteStore::new(&conn);
    let (fetched, total) = store
        .fetch_records("local", &RecordQuery::filtered(Some(expr)))
        .unwrap();
    let mut ids: Vec<i64> = fetched.iter().map(|r| r.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, expected);
    assert_eq!(total, 2);
}

#[test]
fn store_scopes_by_owner() {
    let conn = setup();
    let mut mine = record(1, "2025-08-01", Currency::Usd, dec!(10), None);
    mine.owner = "alice".to_string();
    let mut other = record(2, "2025-08-01", Currency::Usd, dec!(10), None);
    other.owner = "bob".to_string();
    insert(&conn, &mine);
    insert(&conn, &other);

    let store = SqliteStore::new(&conn);
    let (fetched, total) = store
        .fetch_records("alice", &RecordQuery::filtered(None))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(fetched[0].id, 1);
}
