// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::fx::{round_money, CurrencyConverter};
use crate::models::Currency;
use crate::utils::parse_decimal;
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("convert", sub)) => {
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let from = Currency::parse(sub.get_one::<String>("from").unwrap())?;
            let to = Currency::parse(sub.get_one::<String>("to").unwrap())?;
            let fx = CurrencyConverter::fixed();
            let res = round_money(fx.from_base(fx.to_base(amount, from), to));
            println!("{} {} -> {} {}", amount, from, res, to);
        }
        _ => {}
    }
    Ok(())
}
