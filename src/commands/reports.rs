// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::models::ScoreKind;
use crate::reports;
use crate::utils::{maybe_print_json, parse_date, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("trend", sub)) => trend(conn, sub)?,
        Some(("summary", sub)) => summary(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn kind_filter(sub: &clap::ArgMatches) -> Result<Option<ScoreKind>> {
    match sub.get_one::<String>("kind") {
        Some(s) => Ok(Some(ScoreKind::parse(s)?)),
        None => Ok(None),
    }
}

fn trend(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let from = parse_date(sub.get_one::<String>("from").unwrap())?;
    let to = parse_date(sub.get_one::<String>("to").unwrap())?;
    let kind = kind_filter(sub)?;

    let data = reports::scores_in_range(conn, from, to, kind)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|s| {
                vec![
                    s.date.to_string(),
                    s.category.clone(),
                    s.kind.clone(),
                    s.score.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Category", "Kind", "Score"], rows)
        );
    }
    Ok(())
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let kind = kind_filter(sub)?;

    let data = reports::scores_summary(conn, kind)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|s| {
                vec![
                    s.category.clone(),
                    s.count.to_string(),
                    format!("{:.2}", s.avg_score),
                    s.min_score.to_string(),
                    s.max_score.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Count", "Mean", "Min", "Max"], rows)
        );
    }
    Ok(())
}
