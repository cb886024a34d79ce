// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{RecordStore, SqliteStore};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let color = sub.get_one::<String>("color").unwrap();
            let owner = sub.get_one::<String>("owner").unwrap();
            conn.execute(
                "INSERT INTO categories(owner, name, color) VALUES (?1, ?2, ?3)",
                params![owner, name, color],
            )?;
            println!("Added category '{}' ({})", name, color);
        }
        Some(("list", sub)) => {
            let owner = sub.get_one::<String>("owner").unwrap();
            let cats = SqliteStore::new(conn).categories(owner)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
                let rows = cats
                    .into_iter()
                    .map(|c| vec![c.id.to_string(), c.name, c.color])
                    .collect();
                println!("{}", pretty_table(&["Id", "Category", "Color"], rows));
            }
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let owner = sub.get_one::<String>("owner").unwrap();
            conn.execute(
                "DELETE FROM categories WHERE owner=?1 AND name=?2",
                params![owner, name],
            )?;
            println!("Removed category '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
