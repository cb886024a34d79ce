// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, LedgerResult};
use crate::filter::RecordFilter;
use crate::fx::CurrencyConverter;
use crate::models::{Category, Currency, DisplayCurrency, Record};
use crate::page::{PageMeta, PageRequest, SortDir, SortField};
use crate::store::{RecordQuery, RecordStore};
use crate::summary::{
    self, MonthRecords, MonthlySummaryReport, RecentAverageReport, TopRecordsReport, TOP_K,
};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 2100;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    #[serde(flatten)]
    pub page: PageMeta,
    /// The caller's filters, echoed back verbatim.
    pub filters: RecordFilter,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPage {
    pub meta: ListMeta,
    pub data: Vec<Record>,
}

/// Orchestrates every operation: validate parameters, build the query
/// descriptor, hand it to the store, aggregate (or pass through) what comes
/// back. Holds no state between calls beyond the store handle and the rate
/// pair, so it is safe to share across callers.
pub struct LedgerService<'a, S: RecordStore> {
    store: &'a S,
    fx: CurrencyConverter,
}

impl<'a, S: RecordStore> LedgerService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        LedgerService {
            store,
            fx: CurrencyConverter::fixed(),
        }
    }

    pub fn with_converter(store: &'a S, fx: CurrencyConverter) -> Self {
        LedgerService { store, fx }
    }

    pub fn converter(&self) -> &CurrencyConverter {
        &self.fx
    }

    /// Paginated listing. The filter is translated once into the descriptor
    /// tree; the store executes it and reports the unpaged total.
    pub fn list_records(
        &self,
        owner: &str,
        filter: RecordFilter,
        page: PageRequest,
        sort_by: SortField,
        sort_dir: SortDir,
    ) -> LedgerResult<RecordPage> {
        let query = RecordQuery {
            filter: filter.build(&self.fx),
            sort_by,
            sort_dir,
            limit: Some(page.page_size),
            offset: page.offset(),
        };
        let (data, total) = self.store.fetch_records(owner, &query)?;
        Ok(RecordPage {
            meta: ListMeta {
                page: PageMeta::new(total, page),
                filters: filter,
            },
            data,
        })
    }

    /// Summary of one calendar month with per-category breakdown.
    pub fn monthly_summary(
        &self,
        owner: &str,
        month: u32,
        year: i32,
        currency: Option<Currency>,
    ) -> LedgerResult<MonthlySummaryReport> {
        validate_month_year(month, year)?;
        let (records, _) = self.fetch_month(owner, month, year, currency)?;
        let categories = self.store.categories(owner)?;
        summary::monthly_summary(&records, month, year, currency, &categories, &self.fx)
    }

    /// Trailing three calendar months (current plus the two preceding),
    /// most recent first. Calendar-aligned regardless of day-of-month.
    pub fn recent_average(
        &self,
        owner: &str,
        display: DisplayCurrency,
        today: NaiveDate,
    ) -> LedgerResult<RecentAverageReport> {
        let mut months = Vec::with_capacity(3);
        for back in 0..3u32 {
            let start = summary::month_start_back(today, back)?;
            let (records, _) = self.fetch_month(owner, start.month(), start.year(), None)?;
            months.push(MonthRecords {
                month: start.month(),
                year: start.year(),
                records,
            });
        }
        summary::recent_average(&months, display, &self.fx)
    }

    /// Top spending over the ranking window: first day of the month three
    /// months back through today. Deliberately wider than the strict
    /// three-calendar-month alignment of `recent_average`.
    pub fn top_records(
        &self,
        owner: &str,
        display: Currency,
        today: NaiveDate,
    ) -> LedgerResult<TopRecordsReport> {
        let filter = RecordFilter {
            start_date: Some(summary::month_start_back(today, 3)?),
            end_date: Some(today),
            ..RecordFilter::default()
        };
        // Fetch order is date-descending; rank ties keep it.
        let (records, _) = self
            .store
            .fetch_records(owner, &RecordQuery::filtered(filter.build(&self.fx)))?;
        let categories = self.store.categories(owner)?;
        Ok(summary::top_records(
            &records,
            display,
            TOP_K,
            &categories,
            &self.fx,
        ))
    }

    /// Resolve a category that must already exist, echoing the attempted
    /// name on failure.
    pub fn require_category(&self, owner: &str, name: &str) -> LedgerResult<Category> {
        self.store
            .category_by_name(owner, name)?
            .ok_or_else(|| LedgerError::CategoryNotFound(name.to_string()))
    }

    fn fetch_month(
        &self,
        owner: &str,
        month: u32,
        year: i32,
        currency: Option<Currency>,
    ) -> LedgerResult<(Vec<Record>, u64)> {
        let days = summary::days_in_month(year, month)?;
        let start = NaiveDate::from_ymd_opt(year, month, 1);
        let end = NaiveDate::from_ymd_opt(year, month, days);
        let (Some(start), Some(end)) = (start, end) else {
            return Err(LedgerError::Validation(format!(
                "Invalid month {}-{:02}",
                year, month
            )));
        };
        let filter = RecordFilter {
            start_date: Some(start),
            end_date: Some(end),
            currency,
            ..RecordFilter::default()
        };
        let query = RecordQuery::filtered(filter.build(&self.fx));
        Ok(self.store.fetch_records(owner, &query)?)
    }
}

pub fn validate_month_year(month: u32, year: i32) -> LedgerResult<()> {
    if !(1..=12).contains(&month) {
        return Err(LedgerError::Validation(format!(
            "Month must be between 1 and 12, got {}",
            month
        )));
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(LedgerError::Validation(format!(
            "Year must be between {} and {}, got {}",
            MIN_YEAR, MAX_YEAR, year
        )));
    }
    Ok(())
}
