// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod buy;
pub mod checkin;
pub mod config;
pub mod exporter;
pub mod reports;
pub mod scores;
pub mod sell;
pub mod trades;

use anyhow::Result;
use chrono::NaiveDate;
use std::collections::HashMap;

use crate::models::{Category, NewScore, ScoreKind};
use crate::utils::parse_category_pair;

/// Collect the `--rate`/`--answer`/`--reflection` flags into subjective score
/// entries. One structured payload per submission; zero ratings is fine for
/// buy/sell, where rating is optional.
pub(crate) fn subjective_entries(
    sub: &clap::ArgMatches,
    trade_id: Option<i64>,
    date: NaiveDate,
) -> Result<Vec<NewScore>> {
    let mut answers: HashMap<Category, String> = HashMap::new();
    if let Some(vals) = sub.get_many::<String>("answer") {
        for v in vals {
            let (category, text) = parse_category_pair(v)?;
            answers.insert(category, text.to_string());
        }
    }
    let reflection = sub.get_one::<String>("reflection").cloned();

    let mut entries = Vec::new();
    if let Some(vals) = sub.get_many::<String>("rate") {
        for v in vals {
            let (category, raw) = parse_category_pair(v)?;
            let score: i64 = raw
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid score '{}' for {}", raw, category))?;
            if score == 0 {
                continue;
            }
            entries.push(NewScore {
                trade_id,
                date,
                category,
                kind: ScoreKind::Subjective,
                score,
                answer: answers.remove(&category),
                reflection: reflection.clone(),
            });
        }
    }
    Ok(entries)
}
