// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, LedgerResult};
use crate::fx::{round_money, CurrencyConverter};
use crate::models::{Category, Currency, DisplayCurrency, Record, UNCATEGORIZED};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

/// How many entries the ranking returns.
pub const TOP_K: usize = 5;

/// A USD/KHR figure pair. Reports always carry both figures; the display
/// mode only tells a renderer which one is primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrencyPair {
    pub usd: Decimal,
    pub khr: Decimal,
}

impl CurrencyPair {
    pub const ZERO: CurrencyPair = CurrencyPair {
        usd: Decimal::ZERO,
        khr: Decimal::ZERO,
    };

    /// Reconstruct both figures from a single USD total. Never sum the two
    /// sides independently and then pair them, that double-counts.
    fn from_usd(usd_total: Decimal, fx: &CurrencyConverter) -> CurrencyPair {
        CurrencyPair {
            usd: round_money(usd_total),
            khr: round_money(fx.from_base(usd_total, Currency::Khr)),
        }
    }
}

pub fn days_in_month(year: i32, month: u32) -> LedgerResult<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| LedgerError::Validation(format!("Invalid month {}-{:02}", year, month)))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| LedgerError::Validation(format!("Invalid month {}-{:02}", year, month)))?;
    Ok((next - first).num_days() as u32)
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}

fn resolve_category<'a>(categories: &'a [Category], id: Option<i64>) -> &'a Category {
    id.and_then(|id| categories.iter().find(|c| c.id == id))
        .unwrap_or_else(|| &UNCATEGORIZED)
}

// ---------------------------------------------------------------------------
// Monthly summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub month: u32,
    pub year: i32,
    /// The requested currency filter, or "ALL".
    pub currency: String,
    pub total_expenses: CurrencyPair,
    pub record_count: usize,
    pub average_per_day: CurrencyPair,
    pub is_empty: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category_id: Option<i64>,
    pub category_name: String,
    pub category_color: String,
    pub total_usd: Decimal,
    pub total_khr: Decimal,
    pub record_count: usize,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummaryReport {
    pub summary: MonthlySummary,
    pub category_breakdown: Vec<CategoryBreakdown>,
}

struct GroupAcc {
    key: Option<i64>,
    usd: Decimal,
    khr: Decimal,
    count: usize,
}

/// Summarize one calendar month. `records` is the month's already-fetched
/// set (currency filter, if any, applied upstream); totals here are
/// per-native-currency, not reconstructed.
pub fn monthly_summary(
    records: &[Record],
    month: u32,
    year: i32,
    currency: Option<Currency>,
    categories: &[Category],
    fx: &CurrencyConverter,
) -> LedgerResult<MonthlySummaryReport> {
    let days = Decimal::from(days_in_month(year, month)?);

    let mut total_usd = Decimal::ZERO;
    let mut total_khr = Decimal::ZERO;
    let mut groups: Vec<GroupAcc> = Vec::new();

    for r in records {
        match r.currency {
            Currency::Usd => total_usd += r.amount,
            Currency::Khr => total_khr += r.amount,
        }
        let idx = match groups.iter().position(|g| g.key == r.category_id) {
            Some(i) => i,
            None => {
                groups.push(GroupAcc {
                    key: r.category_id,
                    usd: Decimal::ZERO,
                    khr: Decimal::ZERO,
                    count: 0,
                });
                groups.len() - 1
            }
        };
        let acc = &mut groups[idx];
        match r.currency {
            Currency::Usd => acc.usd += r.amount,
            Currency::Khr => acc.khr += r.amount,
        }
        acc.count += 1;
    }

    // Percentages come from USD-equivalent group totals against the
    // USD-equivalent grand total; full precision until the final rounding.
    let grand_usd_equiv: Decimal = total_usd + fx.to_base(total_khr, Currency::Khr);
    let mut keyed: Vec<(Decimal, CategoryBreakdown)> = groups
        .into_iter()
        .map(|g| {
            let usd_equiv = g.usd + fx.to_base(g.khr, Currency::Khr);
            let percentage = if grand_usd_equiv.is_zero() {
                Decimal::ZERO
            } else {
                Decimal::from(100) * usd_equiv / grand_usd_equiv
            };
            let cat = resolve_category(categories, g.key);
            (
                usd_equiv,
                CategoryBreakdown {
                    category_id: g.key,
                    category_name: cat.name.clone(),
                    category_color: cat.color.clone(),
                    total_usd: round_money(g.usd),
                    total_khr: round_money(g.khr),
                    record_count: g.count,
                    percentage: round_money(percentage),
                },
            )
        })
        .collect();
    // Stable sort: ties keep group-discovery order.
    keyed.sort_by(|a, b| b.0.cmp(&a.0));

    Ok(MonthlySummaryReport {
        summary: MonthlySummary {
            month,
            year,
            currency: currency.map_or_else(|| "ALL".to_string(), |c| c.as_str().to_string()),
            total_expenses: CurrencyPair {
                usd: round_money(total_usd),
                khr: round_money(total_khr),
            },
            record_count: records.len(),
            average_per_day: CurrencyPair {
                usd: round_money(total_usd / days),
                khr: round_money(total_khr / days),
            },
            is_empty: records.is_empty(),
        },
        category_breakdown: keyed.into_iter().map(|(_, b)| b).collect(),
    })
}

// ---------------------------------------------------------------------------
// Recent average (trailing three calendar months)
// ---------------------------------------------------------------------------

/// One calendar month's record set, as fetched by the service.
#[derive(Debug, Clone)]
pub struct MonthRecords {
    pub month: u32,
    pub year: i32,
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthAverage {
    pub month: u32,
    pub year: i32,
    pub month_name: String,
    pub total_expenses: CurrencyPair,
    pub average_per_day: CurrencyPair,
    pub record_count: usize,
    /// Native per-currency sums before any conversion.
    pub raw_totals: CurrencyPair,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentAverageReport {
    pub display_currency: DisplayCurrency,
    pub recent_months: Vec<MonthAverage>,
    pub overall_average: CurrencyPair,
}

/// Average expenses over calendar-aligned months. Each month is converted
/// to a single USD total first; both displayed figures derive from it. The
/// overall average is day-weighted, `sum(totals) / sum(day counts)`, not
/// the mean of the per-month averages, because months differ in length.
pub fn recent_average(
    months: &[MonthRecords],
    display: DisplayCurrency,
    fx: &CurrencyConverter,
) -> LedgerResult<RecentAverageReport> {
    let mut out = Vec::with_capacity(months.len());
    let mut overall_usd = Decimal::ZERO;
    let mut overall_days = Decimal::ZERO;

    for m in months {
        let days = Decimal::from(days_in_month(m.year, m.month)?);
        let mut usd_total = Decimal::ZERO;
        let mut raw_usd = Decimal::ZERO;
        let mut raw_khr = Decimal::ZERO;
        for r in &m.records {
            usd_total += fx.to_base(r.amount, r.currency);
            match r.currency {
                Currency::Usd => raw_usd += r.amount,
                Currency::Khr => raw_khr += r.amount,
            }
        }
        overall_usd += usd_total;
        overall_days += days;
        out.push(MonthAverage {
            month: m.month,
            year: m.year,
            month_name: month_name(m.month).to_string(),
            total_expenses: CurrencyPair::from_usd(usd_total, fx),
            average_per_day: CurrencyPair::from_usd(usd_total / days, fx),
            record_count: m.records.len(),
            raw_totals: CurrencyPair {
                usd: round_money(raw_usd),
                khr: round_money(raw_khr),
            },
        });
    }

    let overall_average = if overall_days.is_zero() {
        CurrencyPair::ZERO
    } else {
        CurrencyPair::from_usd(overall_usd / overall_days, fx)
    };

    Ok(RecentAverageReport {
        display_currency: display,
        recent_months: out,
        overall_average,
    })
}

// ---------------------------------------------------------------------------
// Top-K ranking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopRecord {
    pub id: i64,
    pub title: String,
    /// The record's value in the requested display currency.
    pub amount: Decimal,
    pub original_amount: Decimal,
    pub original_currency: Currency,
    pub date: NaiveDate,
    pub category_name: String,
    pub category_color: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopRecordsReport {
    pub display_currency: Currency,
    pub total_records: usize,
    pub top: Vec<TopRecord>,
}

/// Rank records by converted value, descending, and keep the first `k`.
/// Conversion is a no-op when the native currency already matches, else it
/// routes through USD. The sort is stable, so ties at the cut keep the
/// caller's fetch order (date-descending).
pub fn top_records(
    records: &[Record],
    display: Currency,
    k: usize,
    categories: &[Category],
    fx: &CurrencyConverter,
) -> TopRecordsReport {
    let mut keyed: Vec<(Decimal, &Record)> = records
        .iter()
        .map(|r| {
            let converted = if r.currency == display {
                r.amount
            } else {
                fx.from_base(fx.to_base(r.amount, r.currency), display)
            };
            (converted, r)
        })
        .collect();
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    keyed.truncate(k);

    let top = keyed
        .into_iter()
        .map(|(converted, r)| {
            let cat = resolve_category(categories, r.category_id);
            TopRecord {
                id: r.id,
                title: r.title.clone(),
                amount: round_money(converted),
                original_amount: r.amount,
                original_currency: r.currency,
                date: r.date,
                category_name: cat.name.clone(),
                category_color: cat.color.clone(),
            }
        })
        .collect();

    TopRecordsReport {
        display_currency: display,
        total_records: records.len(),
        top,
    }
}

/// First day of the month `n` months before `today`. Used both for the
/// recent-average month list and for the wider ranking window start.
pub fn month_start_back(today: NaiveDate, n: u32) -> LedgerResult<NaiveDate> {
    let total = today.year() * 12 + today.month0() as i32 - n as i32;
    let (year, month0) = (total.div_euclid(12), total.rem_euclid(12) as u32);
    NaiveDate::from_ymd_opt(year, month0 + 1, 1)
        .ok_or_else(|| LedgerError::Validation(format!("Cannot step {} months back", n)))
}
