// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::filter::FilterExpr;
use crate::models::{Category, Currency, Record};
use crate::page::{SortDir, SortField};
use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

/// Query descriptor executed by a store: filter tree plus allow-listed
/// ordering and paging already validated upstream.
#[derive(Debug, Clone)]
pub struct RecordQuery {
    pub filter: Option<FilterExpr>,
    pub sort_by: SortField,
    pub sort_dir: SortDir,
    pub limit: Option<u64>,
    pub offset: u64,
}

impl RecordQuery {
    pub fn filtered(filter: Option<FilterExpr>) -> RecordQuery {
        RecordQuery {
            filter,
            sort_by: SortField::Date,
            sort_dir: SortDir::Desc,
            limit: None,
            offset: 0,
        }
    }
}

/// Narrow boundary to the storage collaborator. Implementations must scope
/// every call by `owner`; the core trusts the returned set is pre-authorized.
pub trait RecordStore {
    fn fetch_records(&self, owner: &str, query: &RecordQuery) -> Result<(Vec<Record>, u64)>;
    fn categories(&self, owner: &str) -> Result<Vec<Category>>;
    fn category_by_name(&self, owner: &str, name: &str) -> Result<Option<Category>>;
}

/// SQLite-backed store. Translates the filter tree into a parameterized
/// WHERE clause; amounts are TEXT-encoded decimals so comparisons go
/// through CAST, dates through datetime().
pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        SqliteStore { conn }
    }
}

fn sql_for(expr: &FilterExpr, params: &mut Vec<String>) -> String {
    match expr {
        FilterExpr::And(children) => {
            let parts: Vec<String> = children.iter().map(|c| sql_for(c, params)).collect();
            format!("({})", parts.join(" AND "))
        }
        FilterExpr::Or(children) => {
            let parts: Vec<String> = children.iter().map(|c| sql_for(c, params)).collect();
            format!("({})", parts.join(" OR "))
        }
        FilterExpr::CurrencyIs(c) => {
            params.push(c.as_str().to_string());
            "currency=?".to_string()
        }
        FilterExpr::CategoryIs(id) => {
            params.push(id.to_string());
            "category_id=?".to_string()
        }
        FilterExpr::AmountAtLeast(min) => {
            params.push(min.to_string());
            "CAST(amount AS REAL) >= CAST(? AS REAL)".to_string()
        }
        FilterExpr::AmountAtMost(max) => {
            params.push(max.to_string());
            "CAST(amount AS REAL) <= CAST(? AS REAL)".to_string()
        }
        FilterExpr::DateAtLeast(t) => {
            params.push(t.format("%Y-%m-%d %H:%M:%S%.3f").to_string());
            "datetime(date) >= datetime(?)".to_string()
        }
        FilterExpr::DateAtMost(t) => {
            params.push(t.format("%Y-%m-%d %H:%M:%S%.3f").to_string());
            "datetime(date) <= datetime(?)".to_string()
        }
    }
}

fn order_clause(sort_by: SortField, sort_dir: SortDir) -> String {
    let column = match sort_by {
        SortField::Amount => "CAST(amount AS REAL)",
        other => other.column(),
    };
    let mut clause = format!(" ORDER BY {} {}", column, sort_dir.keyword());
    if sort_by != SortField::Id {
        // deterministic tiebreaker for equal keys
        clause.push_str(", id DESC");
    }
    clause
}

fn query_params(params: &[String]) -> Vec<&dyn rusqlite::ToSql> {
    params.iter().map(|s| s as &dyn rusqlite::ToSql).collect()
}

impl RecordStore for SqliteStore<'_> {
    fn fetch_records(&self, owner: &str, query: &RecordQuery) -> Result<(Vec<Record>, u64)> {
        let mut where_sql = String::from("owner=?");
        let mut params: Vec<String> = vec![owner.to_string()];
        if let Some(filter) = &query.filter {
            where_sql.push_str(" AND ");
            where_sql.push_str(&sql_for(filter, &mut params));
        }

        let count_sql = format!("SELECT COUNT(*) FROM records WHERE {}", where_sql);
        let total: u64 = self
            .conn
            .query_row(
                &count_sql,
                rusqlite::params_from_iter(query_params(&params)),
                |r| r.get(0),
            )
            .context("Count records")?;

        let mut sql = format!(
            "SELECT id, owner, title, date, currency, amount, note, category_id
             FROM records WHERE {}",
            where_sql
        );
        sql.push_str(&order_clause(query.sort_by, query.sort_dir));
        sql.push_str(" LIMIT ? OFFSET ?");
        params.push(query.limit.map_or("-1".to_string(), |l| l.to_string()));
        params.push(query.offset.to_string());

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(rusqlite::params_from_iter(query_params(&params)))?;
        let mut data = Vec::new();
        while let Some(r) = rows.next()? {
            let id: i64 = r.get(0)?;
            let owner: String = r.get(1)?;
            let title: String = r.get(2)?;
            let date: String = r.get(3)?;
            let currency: String = r.get(4)?;
            let amount: String = r.get(5)?;
            let note: Option<String> = r.get(6)?;
            let category_id: Option<i64> = r.get(7)?;
            data.push(Record {
                id,
                owner,
                title,
                date: chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                    .with_context(|| format!("Invalid date '{}' on record {}", date, id))?,
                currency: Currency::parse(&currency)
                    .with_context(|| format!("Record {} carries unsupported currency", id))?,
                amount: amount
                    .parse()
                    .with_context(|| format!("Invalid amount '{}' on record {}", amount, id))?,
                note,
                category_id,
            });
        }
        Ok((data, total))
    }

    fn categories(&self, owner: &str) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, owner, name, color FROM categories WHERE owner=?1 ORDER BY id")?;
        let rows = stmt.query_map([owner], |r| {
            Ok(Category {
                id: r.get(0)?,
                owner: r.get(1)?,
                name: r.get(2)?,
                color: r.get(3)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    fn category_by_name(&self, owner: &str, name: &str) -> Result<Option<Category>> {
        let cat = self
            .conn
            .query_row(
                "SELECT id, owner, name, color FROM categories WHERE owner=?1 AND name=?2",
                [owner, name],
                |r| {
                    Ok(Category {
                        id: r.get(0)?,
                        owner: r.get(1)?,
                        name: r.get(2)?,
                        color: r.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(cat)
    }
}
