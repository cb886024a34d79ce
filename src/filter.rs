// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::fx::CurrencyConverter;
use crate::models::{Currency, Record};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;

/// Query descriptor handed to the storage collaborator. A small tagged
/// tree keeps the core free of any concrete query-language dependency:
/// `SqliteStore` translates it into SQL, and `matches` evaluates the same
/// semantics in memory.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    And(Vec<FilterExpr>),
    Or(Vec<FilterExpr>),
    CurrencyIs(Currency),
    CategoryIs(i64),
    AmountAtLeast(Decimal),
    AmountAtMost(Decimal),
    DateAtLeast(NaiveDateTime),
    DateAtMost(NaiveDateTime),
}

impl FilterExpr {
    pub fn matches(&self, r: &Record) -> bool {
        match self {
            FilterExpr::And(children) => children.iter().all(|c| c.matches(r)),
            FilterExpr::Or(children) => children.iter().any(|c| c.matches(r)),
            FilterExpr::CurrencyIs(c) => r.currency == *c,
            FilterExpr::CategoryIs(id) => r.category_id == Some(*id),
            FilterExpr::AmountAtLeast(min) => r.amount >= *min,
            FilterExpr::AmountAtMost(max) => r.amount <= *max,
            FilterExpr::DateAtLeast(t) => r.date.and_time(NaiveTime::MIN) >= *t,
            FilterExpr::DateAtMost(t) => r.date.and_time(NaiveTime::MIN) <= *t,
        }
    }
}

/// Inclusive through the last millisecond of the day, so same-day records
/// are never silently excluded by an end-date bound.
pub fn end_of_day(d: NaiveDate) -> NaiveDateTime {
    d.and_time(NaiveTime::MIN) + Duration::days(1) - Duration::milliseconds(1)
}

/// Caller-facing filter parameters for the listing operation. `min_amount`
/// and `max_amount` are expressed in `amount_currency` (USD when absent)
/// and must match records stored natively in either currency.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordFilter {
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub amount_currency: Option<Currency>,
    pub currency: Option<Currency>,
    pub category_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl RecordFilter {
    /// Build the filter tree. Returns `None` when no constraint is set so
    /// the store can skip the WHERE clause entirely.
    pub fn build(&self, fx: &CurrencyConverter) -> Option<FilterExpr> {
        let mut clauses = Vec::new();

        if let Some(branch) = self.amount_branch(fx) {
            clauses.push(branch);
        }
        if let Some(c) = self.currency {
            clauses.push(FilterExpr::CurrencyIs(c));
        }
        if let Some(id) = self.category_id {
            clauses.push(FilterExpr::CategoryIs(id));
        }
        if let Some(start) = self.start_date {
            clauses.push(FilterExpr::DateAtLeast(start.and_time(NaiveTime::MIN)));
        }
        if let Some(end) = self.end_date {
            clauses.push(FilterExpr::DateAtMost(end_of_day(end)));
        }

        match clauses.len() {
            0 => None,
            1 => clauses.pop(),
            _ => Some(FilterExpr::And(clauses)),
        }
    }

    /// The currency-branch disjunction: the caller's bounds are converted
    /// to USD once, then each branch compares a record's native amount
    /// against the bound re-expressed in that branch's currency. A record
    /// stored in either currency is evaluated against an economically
    /// equivalent threshold, not a literal cross-unit comparison.
    fn amount_branch(&self, fx: &CurrencyConverter) -> Option<FilterExpr> {
        if self.min_amount.is_none() && self.max_amount.is_none() {
            return None;
        }
        let unit = self.amount_currency.unwrap_or(Currency::Usd);
        let min_usd = self.min_amount.map(|m| fx.to_base(m, unit));
        let max_usd = self.max_amount.map(|m| fx.to_base(m, unit));

        let branch = |native: Currency| {
            let mut nodes = vec![FilterExpr::CurrencyIs(native)];
            if let Some(min) = min_usd {
                nodes.push(FilterExpr::AmountAtLeast(fx.from_base(min, native)));
            }
            if let Some(max) = max_usd {
                nodes.push(FilterExpr::AmountAtMost(fx.from_base(max, native)));
            }
            FilterExpr::And(nodes)
        };

        Some(FilterExpr::Or(vec![
            branch(Currency::Usd),
            branch(Currency::Khr),
        ]))
    }
}
