// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use chrono::Utc;
use rusqlite::Connection;
use std::collections::HashMap;

use crate::ledger;
use crate::models::{Category, NewScore, ScoreKind};
use crate::utils::{parse_category_pair, parse_date, pretty_table};

pub fn handle(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    if sub.get_flag("questions") {
        let rows = Category::ALL
            .iter()
            .map(|c| {
                vec![
                    c.to_string(),
                    c.max_score().to_string(),
                    c.description().to_string(),
                    c.question().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Max", "Scenario", "Self-check question"], rows)
        );
        return Ok(());
    }

    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };

    let mut answers: HashMap<Category, String> = HashMap::new();
    if let Some(vals) = sub.get_many::<String>("answer") {
        for v in vals {
            let (category, text) = parse_category_pair(v)?;
            answers.insert(category, text.to_string());
        }
    }
    let reflection = match sub.get_one::<String>("hardest") {
        Some(s) => {
            let hardest = Category::parse(s)?;
            Some(format!("hardest action: {}", hardest))
        }
        None => None,
    };

    let mut entries = Vec::new();
    for v in sub.get_many::<String>("rate").into_iter().flatten() {
        let (category, raw) = parse_category_pair(v)?;
        let score: i64 = raw
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid score '{}' for {}", raw, category))?;
        if score == 0 {
            continue;
        }
        entries.push(NewScore {
            trade_id: None, // daily check-ins stand alone
            date,
            category,
            kind: ScoreKind::Subjective,
            score,
            answer: answers.remove(&category),
            reflection: reflection.clone(),
        });
    }
    if entries.is_empty() {
        bail!("Rate at least one category above zero");
    }

    let total: i64 = entries.iter().map(|e| e.score).sum();
    let saved = ledger::replace_daily_checkin(conn, date, &entries)?;
    println!("Check-in saved for {}: {} categories, total {}/100", date, saved, total);
    Ok(())
}
