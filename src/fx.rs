// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Currency;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// 1 USD in KHR.
pub const USD_TO_KHR: Decimal = dec!(4000);
/// 1 KHR in USD. Held as its own literal, not derived from USD_TO_KHR,
/// so the two directions can be calibrated independently.
pub const KHR_TO_USD: Decimal = dec!(0.00025);

/// Pure conversion between the two supported currencies via a fixed rate
/// pair supplied at construction. All call sites go through one instance,
/// so a live-rate source could substitute without touching them.
#[derive(Debug, Clone, Copy)]
pub struct CurrencyConverter {
    usd_to_khr: Decimal,
    khr_to_usd: Decimal,
}

impl CurrencyConverter {
    pub fn new(usd_to_khr: Decimal, khr_to_usd: Decimal) -> Self {
        CurrencyConverter {
            usd_to_khr,
            khr_to_usd,
        }
    }

    /// The standard fixed pair (1 USD = 4000 KHR).
    pub fn fixed() -> Self {
        CurrencyConverter::new(USD_TO_KHR, KHR_TO_USD)
    }

    pub fn usd_to_khr_rate(&self) -> Decimal {
        self.usd_to_khr
    }

    /// Express an amount held in `currency` in USD.
    pub fn to_base(&self, amount: Decimal, currency: Currency) -> Decimal {
        match currency {
            Currency::Usd => amount,
            Currency::Khr => amount * self.khr_to_usd,
        }
    }

    /// Express a USD amount in `target`.
    pub fn from_base(&self, usd_amount: Decimal, target: Currency) -> Decimal {
        match target {
            Currency::Usd => usd_amount,
            Currency::Khr => usd_amount * self.usd_to_khr,
        }
    }
}

/// 2dp, half-up. Applied only at the presentation edge; aggregation keeps
/// full precision and rounds once at the end.
pub fn round_money(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
