// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::page::{SortDir, SortField};
use crate::store::{RecordQuery, RecordStore, SqliteStore};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("records", sub)) => export_records(conn, sub),
        _ => Ok(()),
    }
}

fn export_records(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let owner = sub.get_one::<String>("owner").unwrap();

    let store = SqliteStore::new(conn);
    let query = RecordQuery {
        filter: None,
        sort_by: SortField::Date,
        sort_dir: SortDir::Asc,
        limit: None,
        offset: 0,
    };
    let (records, _) = store.fetch_records(owner, &query)?;
    let categories = store.categories(owner)?;
    let category_name = |id: Option<i64>| -> String {
        id.and_then(|id| categories.iter().find(|c| c.id == id))
            .map_or(String::new(), |c| c.name.clone())
    };

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "date", "title", "amount", "currency", "category", "note"])?;
            for r in &records {
                wtr.write_record([
                    r.id.to_string(),
                    r.date.to_string(),
                    r.title.clone(),
                    r.amount.to_string(),
                    r.currency.to_string(),
                    category_name(r.category_id),
                    r.note.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&records)?)?;
        }
        _ => anyhow::bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported {} records to {}", records.len(), out);
    Ok(())
}
