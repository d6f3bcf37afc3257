// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::ledger;
use crate::models::ScoreKind;
use crate::reports;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            ledger::delete_score(conn, id)?;
            println!("Deleted score {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(20);
    let kind = match sub.get_one::<String>("kind") {
        Some(s) => Some(ScoreKind::parse(s)?),
        None => None,
    };

    let data = reports::recent_scores(conn, limit, kind)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|s| {
                vec![
                    s.id.to_string(),
                    s.trade_id.map(|t| t.to_string()).unwrap_or_default(),
                    s.date.to_string(),
                    s.category.clone(),
                    s.kind.clone(),
                    s.score.to_string(),
                    s.answer.clone().unwrap_or_default(),
                    s.reflection.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Trade", "Date", "Category", "Kind", "Score", "Answer", "Reflection"],
                rows,
            )
        );
    }
    Ok(())
}
