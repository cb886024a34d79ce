// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use ledgerlens::fx::{round_money, CurrencyConverter, KHR_TO_USD, USD_TO_KHR};
use ledgerlens::models::Currency;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn round_trip_recovers_amount_within_tolerance() {
    let fx = CurrencyConverter::fixed();
    let tolerance = dec!(0.01);
    for (amount, ccy) in [
        (dec!(0), Currency::Usd),
        (dec!(1), Currency::Usd),
        (dec!(123.45), Currency::Usd),
        (dec!(0.01), Currency::Khr),
        (dec!(400000), Currency::Khr),
        (dec!(1234567.89), Currency::Khr),
    ] {
        let back = fx.from_base(fx.to_base(amount, ccy), ccy);
        assert!(
            (back - amount).abs() <= tolerance,
            "{} {} round-tripped to {}",
            amount,
            ccy,
            back
        );
    }
}

#[test]
fn base_conversion_uses_fixed_pair() {
    let fx = CurrencyConverter::fixed();
    assert_eq!(fx.to_base(dec!(400000), Currency::Khr), dec!(100));
    assert_eq!(fx.to_base(dec!(25), Currency::Usd), dec!(25));
    assert_eq!(fx.from_base(dec!(100), Currency::Khr), dec!(400000));
    assert_eq!(fx.usd_to_khr_rate(), USD_TO_KHR);
    assert_eq!(USD_TO_KHR * KHR_TO_USD, dec!(1));
}

#[test]
fn rates_may_be_calibrated_independently() {
    // Not enforced as exact reciprocals at construction.
    let fx = CurrencyConverter::new(dec!(4100), dec!(0.00025));
    assert_eq!(fx.to_base(dec!(4000), Currency::Khr), dec!(1));
    assert_eq!(fx.from_base(dec!(1), Currency::Khr), dec!(4100));
}

#[test]
fn money_rounds_half_up_at_two_decimals() {
    assert_eq!(round_money(dec!(1.005)), dec!(1.01));
    assert_eq!(round_money(dec!(1.004)), dec!(1.00));
    assert_eq!(round_money(dec!(2.675)), dec!(2.68));
    assert_eq!(round_money(Decimal::ZERO), dec!(0.00));
}
