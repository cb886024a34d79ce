// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, Arg, ArgAction, Command};

fn owner_arg() -> Arg {
    Arg::new("owner")
        .long("owner")
        .default_value("local")
        .help("Ledger owner the operation is scoped to")
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("ledgerlens")
        .version(crate_version!())
        .about("Currency-aware expense ledger queries and analytics (USD/KHR)")
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("category")
                .about("Manage expense categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("color").long("color").default_value("#9CA3AF"))
                        .arg(owner_arg()),
                )
                .subcommand(json_flags(Command::new("list").arg(owner_arg())))
                .subcommand(
                    Command::new("rm")
                        .arg(Arg::new("name").required(true))
                        .arg(owner_arg()),
                ),
        )
        .subcommand(
            Command::new("record")
                .about("Add and list expense records")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("title").required(true))
                        .arg(Arg::new("amount").required(true))
                        .arg(
                            Arg::new("currency")
                                .long("currency")
                                .default_value("USD")
                                .help("Native currency of the amount (USD or KHR)"),
                        )
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today"))
                        .arg(Arg::new("category").long("category").help("Existing category name"))
                        .arg(Arg::new("note").long("note"))
                        .arg(owner_arg()),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("min").long("min").help("Minimum amount"))
                        .arg(Arg::new("max").long("max").help("Maximum amount"))
                        .arg(
                            Arg::new("amount-currency")
                                .long("amount-currency")
                                .help("Currency the min/max bounds are expressed in (default USD)"),
                        )
                        .arg(
                            Arg::new("currency")
                                .long("currency")
                                .help("Only records stored natively in this currency"),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .help("Existing category name"),
                        )
                        .arg(Arg::new("from").long("from").help("Start date YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("End date YYYY-MM-DD, inclusive"))
                        .arg(
                            Arg::new("page")
                                .long("page")
                                .value_parser(clap::value_parser!(u64)),
                        )
                        .arg(
                            Arg::new("page-size")
                                .long("page-size")
                                .value_parser(clap::value_parser!(u64)),
                        )
                        .arg(
                            Arg::new("sort-by")
                                .long("sort-by")
                                .help("id|amount|date|title (unknown falls back to id)"),
                        )
                        .arg(
                            Arg::new("sort")
                                .long("sort")
                                .help("asc|desc (unknown falls back to asc)"),
                        )
                        .arg(owner_arg()),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Analytics over the ledger")
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("Monthly totals with per-category breakdown")
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .required(true)
                                .value_parser(clap::value_parser!(u32)),
                        )
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .required(true)
                                .value_parser(clap::value_parser!(i32)),
                        )
                        .arg(
                            Arg::new("currency")
                                .long("currency")
                                .help("Restrict to records stored in USD or KHR; default ALL"),
                        )
                        .arg(owner_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("recent")
                        .about("Trailing three calendar months, day-weighted average")
                        .arg(
                            Arg::new("currency")
                                .long("currency")
                                .default_value("BOTH")
                                .help("Display mode: USD, KHR or BOTH"),
                        )
                        .arg(owner_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("top")
                        .about("Top 5 expenses since the month start three months back")
                        .arg(
                            Arg::new("currency")
                                .long("currency")
                                .default_value("USD")
                                .help("Display currency for the ranking (USD or KHR)"),
                        )
                        .arg(owner_arg()),
                )),
        )
        .subcommand(
            Command::new("fx")
                .about("Fixed-rate currency conversion")
                .subcommand(
                    Command::new("convert")
                        .arg(Arg::new("amount").required(true))
                        .arg(Arg::new("from").required(true))
                        .arg(Arg::new("to").required(true)),
                ),
        )
        .subcommand(
            Command::new("export").about("Export ledger data").subcommand(
                Command::new("records")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv or json"),
                    )
                    .arg(Arg::new("out").long("out").required(true))
                    .arg(owner_arg()),
            ),
        )
}
