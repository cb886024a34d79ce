// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerError;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The two supported record currencies. USD is the base currency every
/// aggregation routes through; KHR relates to it by a fixed rate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "KHR")]
    Khr,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Khr => "KHR",
        }
    }

    /// Lenient parse for display contexts; unknown values fall back to USD.
    pub fn from_param(s: &str) -> Currency {
        match s.to_uppercase().as_str() {
            "KHR" => Currency::Khr,
            _ => Currency::Usd,
        }
    }

    /// Strict parse for contexts where a record currency is required.
    pub fn parse(s: &str) -> Result<Currency, LedgerError> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "KHR" => Ok(Currency::Khr),
            other => Err(LedgerError::Validation(format!(
                "Unknown currency '{}', expected USD or KHR",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested display mode for the report operations. Unknown values fall
/// back to `Both` instead of erroring, like the sort parameters do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayCurrency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "KHR")]
    Khr,
    #[serde(rename = "BOTH")]
    Both,
}

impl DisplayCurrency {
    pub fn from_param(s: &str) -> DisplayCurrency {
        match s.to_uppercase().as_str() {
            "USD" => DisplayCurrency::Usd,
            "KHR" => DisplayCurrency::Khr,
            _ => DisplayCurrency::Both,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayCurrency::Usd => "USD",
            DisplayCurrency::Khr => "KHR",
            DisplayCurrency::Both => "BOTH",
        }
    }
}

/// A single expense record. `amount` is always in `currency`'s own unit;
/// conversion is computed at read time, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub owner: String,
    pub title: String,
    pub date: NaiveDate,
    pub currency: Currency,
    pub amount: Decimal,
    pub note: Option<String>,
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub owner: String,
    pub name: String,
    pub color: String,
}

/// Sentinel bucket for records with no category, so aggregation never
/// special-cases a null key.
pub static UNCATEGORIZED: Lazy<Category> = Lazy::new(|| Category {
    id: 0,
    owner: String::new(),
    name: "Uncategorized".to_string(),
    color: "#9CA3AF".to_string(),
});
