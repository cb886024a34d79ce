// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::filter::RecordFilter;
use crate::models::Currency;
use crate::page::{PageRequest, SortDir, SortField};
use crate::service::LedgerService;
use crate::store::{RecordStore, SqliteStore};
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let title = sub.get_one::<String>("title").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let currency = Currency::parse(sub.get_one::<String>("currency").unwrap())?;
    let owner = sub.get_one::<String>("owner").unwrap();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => chrono::Utc::now().date_naive(),
    };
    let note = sub.get_one::<String>("note").map(|s| s.to_string());

    if amount.is_sign_negative() {
        anyhow::bail!("Amount must be non-negative, got {}", amount);
    }

    // A named category must pre-exist; the failure echoes the name.
    let store = SqliteStore::new(conn);
    let service = LedgerService::new(&store);
    let category_id = match sub.get_one::<String>("category") {
        Some(name) => Some(service.require_category(owner, name)?.id),
        None => None,
    };

    conn.execute(
        "INSERT INTO records(owner, title, date, currency, amount, note, category_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            owner,
            title,
            date.to_string(),
            currency.as_str(),
            amount.to_string(),
            note,
            category_id
        ],
    )?;
    println!("Recorded {} {} on {} '{}'", amount, currency, date, title);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = sub.get_one::<String>("owner").unwrap();
    let store = SqliteStore::new(conn);
    let service = LedgerService::new(&store);

    let category_id = match sub.get_one::<String>("category") {
        Some(name) => Some(service.require_category(owner, name)?.id),
        None => None,
    };
    let filter = RecordFilter {
        min_amount: sub
            .get_one::<String>("min")
            .map(|s| parse_decimal(s))
            .transpose()?,
        max_amount: sub
            .get_one::<String>("max")
            .map(|s| parse_decimal(s))
            .transpose()?,
        amount_currency: sub
            .get_one::<String>("amount-currency")
            .map(|s| Currency::parse(s))
            .transpose()?,
        currency: sub
            .get_one::<String>("currency")
            .map(|s| Currency::parse(s))
            .transpose()?,
        category_id,
        start_date: sub
            .get_one::<String>("from")
            .map(|s| parse_date(s))
            .transpose()?,
        end_date: sub
            .get_one::<String>("to")
            .map(|s| parse_date(s))
            .transpose()?,
    };

    let page = PageRequest::new(
        sub.get_one::<u64>("page").copied(),
        sub.get_one::<u64>("page-size").copied(),
    )?;
    let sort_by = sub
        .get_one::<String>("sort-by")
        .map_or(SortField::Id, |s| SortField::from_param(s));
    let sort_dir = sub
        .get_one::<String>("sort")
        .map_or(SortDir::Asc, |s| SortDir::from_param(s));

    let result = service.list_records(owner, filter, page, sort_by, sort_dir)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &result)? {
        let categories = store.categories(owner)?;
        let rows: Vec<Vec<String>> = result
            .data
            .iter()
            .map(|r| {
                let cat = r
                    .category_id
                    .and_then(|id| categories.iter().find(|c| c.id == id))
                    .map_or(String::new(), |c| c.name.clone());
                vec![
                    r.id.to_string(),
                    r.date.to_string(),
                    r.title.clone(),
                    format!("{:.2}", r.amount),
                    r.currency.to_string(),
                    cat,
                    r.note.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Title", "Amount", "CCY", "Category", "Note"],
                rows,
            )
        );
        println!(
            "Page {}/{} ({} records)",
            result.meta.page.page, result.meta.page.total_pages, result.meta.page.total_items
        );
    }
    Ok(())
}
