// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Currency, DisplayCurrency};
use crate::service::LedgerService;
use crate::store::SqliteStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("recent", sub)) => recent(conn, sub)?,
        Some(("top", sub)) => top(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("owner").unwrap();
    let month = *sub.get_one::<u32>("month").unwrap();
    let year = *sub.get_one::<i32>("year").unwrap();
    let currency = sub
        .get_one::<String>("currency")
        .filter(|s| !s.eq_ignore_ascii_case("ALL"))
        .map(|s| Currency::parse(s))
        .transpose()?;

    let store = SqliteStore::new(conn);
    let report = LedgerService::new(&store).monthly_summary(owner, month, year, currency)?;

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        let s = &report.summary;
        println!(
            "{} {} ({}) — {} records{}",
            crate::summary::month_name(s.month),
            s.year,
            s.currency,
            s.record_count,
            if s.is_empty { ", empty" } else { "" }
        );
        println!(
            "Total: {} / {}   Avg per day: {} / {}",
            fmt_money(&s.total_expenses.usd, "USD"),
            fmt_money(&s.total_expenses.khr, "KHR"),
            fmt_money(&s.average_per_day.usd, "USD"),
            fmt_money(&s.average_per_day.khr, "KHR"),
        );
        let rows: Vec<Vec<String>> = report
            .category_breakdown
            .iter()
            .map(|b| {
                vec![
                    b.category_name.clone(),
                    format!("{:.2}", b.total_usd),
                    format!("{:.2}", b.total_khr),
                    b.record_count.to_string(),
                    format!("{:.2}%", b.percentage),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "USD", "KHR", "Count", "Share"], rows)
        );
    }
    Ok(())
}

fn recent(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("owner").unwrap();
    let display = DisplayCurrency::from_param(sub.get_one::<String>("currency").unwrap());
    let today = chrono::Utc::now().date_naive();

    let store = SqliteStore::new(conn);
    let report = LedgerService::new(&store).recent_average(owner, display, today)?;

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        let rows: Vec<Vec<String>> = report
            .recent_months
            .iter()
            .map(|m| {
                vec![
                    format!("{} {}", m.month_name, m.year),
                    format!("{:.2}", m.total_expenses.usd),
                    format!("{:.2}", m.total_expenses.khr),
                    format!("{:.2}", m.average_per_day.usd),
                    m.record_count.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Month", "Total USD", "Total KHR", "Avg/day USD", "Count"],
                rows
            )
        );
        println!(
            "Overall day-weighted average: {} / {}  ({})",
            fmt_money(&report.overall_average.usd, "USD"),
            fmt_money(&report.overall_average.khr, "KHR"),
            report.display_currency.as_str(),
        );
    }
    Ok(())
}

fn top(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("owner").unwrap();
    let display = Currency::from_param(sub.get_one::<String>("currency").unwrap());
    let today = chrono::Utc::now().date_naive();

    let store = SqliteStore::new(conn);
    let report = LedgerService::new(&store).top_records(owner, display, today)?;

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        let rows: Vec<Vec<String>> = report
            .top
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.title.clone(),
                    fmt_money(&t.amount, report.display_currency.as_str()),
                    format!("{} {}", t.original_amount, t.original_currency),
                    t.category_name.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Title", "Amount", "Original", "Category"], rows)
        );
        println!("{} records in window", report.total_records);
    }
    Ok(())
}
