// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn rating_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("rate")
            .long("rate")
            .action(ArgAction::Append)
            .value_name("CATEGORY=SCORE")
            .help("Subjective self-rating, repeatable (e.g. loss-cut=15)"),
    )
    .arg(
        Arg::new("answer")
            .long("answer")
            .action(ArgAction::Append)
            .value_name("CATEGORY=TEXT")
            .help("Answer to a category's self-check question, repeatable"),
    )
    .arg(
        Arg::new("reflection")
            .long("reflection")
            .value_name("TEXT")
            .help("Free-form reflection note attached to each rating"),
    )
}

pub fn build_cli() -> Command {
    Command::new("hindsight")
        .about("Trading-discipline journal: log trades, rate your behavior, review the trend")
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Create or migrate the local database"))
        .subcommand(
            rating_args(
                Command::new("buy")
                    .about("Record a buy event, opening a new lot")
                    .arg(Arg::new("code").long("code").required(true).help("Instrument code"))
                    .arg(Arg::new("name").long("name").help("Display name (looked up when omitted)"))
                    .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD").help("Buy date, defaults to today"))
                    .arg(Arg::new("price").long("price").required(true).help("Buy price"))
                    .arg(
                        Arg::new("qty")
                            .long("qty")
                            .required(true)
                            .value_parser(value_parser!(i64))
                            .help("Units bought"),
                    )
                    .arg(
                        Arg::new("category")
                            .long("category")
                            .value_name("CATEGORY")
                            .help("Behavioral category; auto-classified from price history when omitted"),
                    )
                    .arg(Arg::new("notes").long("notes").help("Free-text notes")),
            ),
        )
        .subcommand(
            rating_args(
                Command::new("sell")
                    .about("Record a sell against an open lot")
                    .arg(
                        Arg::new("lot")
                            .long("lot")
                            .required(true)
                            .value_parser(value_parser!(i64))
                            .help("Lot id to sell from"),
                    )
                    .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD").help("Sell date, defaults to today"))
                    .arg(Arg::new("price").long("price").required(true).help("Sell price"))
                    .arg(
                        Arg::new("qty")
                            .long("qty")
                            .required(true)
                            .value_parser(value_parser!(i64))
                            .help("Units sold by this event"),
                    ),
            ),
        )
        .subcommand(
            Command::new("checkin")
                .about("Daily self-check; re-submitting a date replaces its entries")
                .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD").help("Check-in date, defaults to today"))
                .arg(
                    Arg::new("rate")
                        .long("rate")
                        .action(ArgAction::Append)
                        .value_name("CATEGORY=SCORE")
                        .help("Self-rating for one category, repeatable"),
                )
                .arg(
                    Arg::new("answer")
                        .long("answer")
                        .action(ArgAction::Append)
                        .value_name("CATEGORY=TEXT")
                        .help("Answer to a category's self-check question, repeatable"),
                )
                .arg(
                    Arg::new("hardest")
                        .long("hardest")
                        .value_name("CATEGORY")
                        .help("The category that was hardest to follow today"),
                )
                .arg(
                    Arg::new("questions")
                        .long("questions")
                        .action(ArgAction::SetTrue)
                        .help("Print the four self-check questions and exit"),
                ),
        )
        .subcommand(
            Command::new("trades")
                .about("Inspect and prune trade events")
                .subcommand(
                    json_flags(
                        Command::new("list")
                            .about("List trade events")
                            .arg(
                                Arg::new("open")
                                    .long("open")
                                    .action(ArgAction::SetTrue)
                                    .help("Only open lots"),
                            )
                            .arg(Arg::new("code").long("code").help("Filter by instrument code"))
                            .arg(
                                Arg::new("limit")
                                    .long("limit")
                                    .value_parser(value_parser!(usize))
                                    .help("Maximum rows"),
                            ),
                    ),
                )
                .subcommand(json_flags(
                    Command::new("lots").about("List lots with sold/remaining quantities and profit"),
                ))
                .subcommand(
                    Command::new("rm").about("Delete one trade event by id").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("scores")
                .about("Inspect and prune score entries")
                .subcommand(
                    json_flags(
                        Command::new("list")
                            .about("List recent score entries")
                            .arg(Arg::new("kind").long("kind").value_name("subjective|objective"))
                            .arg(
                                Arg::new("limit")
                                    .long("limit")
                                    .value_parser(value_parser!(usize))
                                    .help("Maximum rows (default 20)"),
                            ),
                    ),
                )
                .subcommand(
                    Command::new("rm").about("Delete one score entry by id").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregated views over score entries")
                .subcommand(
                    json_flags(
                        Command::new("trend")
                            .about("Scores over a date range, oldest first")
                            .arg(Arg::new("from").long("from").required(true).value_name("YYYY-MM-DD"))
                            .arg(Arg::new("to").long("to").required(true).value_name("YYYY-MM-DD"))
                            .arg(Arg::new("kind").long("kind").value_name("subjective|objective")),
                    ),
                )
                .subcommand(
                    json_flags(
                        Command::new("summary")
                            .about("Per-category count/mean/min/max")
                            .arg(Arg::new("kind").long("kind").value_name("subjective|objective")),
                    ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Dump tables to a file")
                .subcommand(
                    Command::new("trades")
                        .about("Export all trade events")
                        .arg(Arg::new("format").long("format").required(true).value_name("csv|json"))
                        .arg(Arg::new("out").long("out").required(true).value_name("PATH")),
                )
                .subcommand(
                    Command::new("scores")
                        .about("Export all score entries")
                        .arg(Arg::new("format").long("format").required(true).value_name("csv|json"))
                        .arg(Arg::new("out").long("out").required(true).value_name("PATH")),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Provider configuration")
                .subcommand(
                    Command::new("set-token")
                        .about("Store the price-provider access token")
                        .arg(Arg::new("token").required(true).value_name("TOKEN")),
                )
                .subcommand(Command::new("show").about("Show the stored configuration")),
        )
}
