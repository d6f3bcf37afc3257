// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;

use crate::classify::classify_sell;
use crate::error::JournalError;
use crate::ledger;
use crate::models::{LotStatus, NewScore, NewSell, ScoreKind};
use crate::scoring::score_objective;
use crate::utils::{parse_date, parse_decimal};

use super::subjective_entries;

pub fn handle(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let lot_id = *sub.get_one::<i64>("lot").unwrap();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let price = parse_decimal(sub.get_one::<String>("price").unwrap())?;
    let quantity = *sub.get_one::<i64>("qty").unwrap();

    let buy = ledger::buy_event(conn, lot_id)?
        .ok_or_else(|| JournalError::NotFound(format!("buy lot {}", lot_id)))?;

    let receipt = ledger::insert_sell(
        conn,
        lot_id,
        &NewSell {
            sell_date: date,
            sell_price: price,
            quantity,
        },
    )?;

    // the realized outcome classifies the sell and scores it
    let category = classify_sell(buy.buy_price, price)?;
    let objective = score_objective(category, buy.buy_price, price)?;
    ledger::insert_score(
        conn,
        &NewScore {
            trade_id: Some(receipt.trade_id),
            date,
            category,
            kind: ScoreKind::Objective,
            score: objective,
            answer: None,
            reflection: None,
        },
    )?;

    let ratings = subjective_entries(sub, Some(receipt.trade_id), date)?;
    for entry in &ratings {
        ledger::insert_score(conn, entry)?;
    }

    match receipt.status {
        LotStatus::Closed => println!(
            "Sold {} x {} at {}: lot {} fully closed ({} sold)",
            quantity, buy.code, price, lot_id, receipt.sold
        ),
        LotStatus::Open => println!(
            "Sold {} x {} at {}: lot {} still open ({} sold, {} remaining)",
            quantity, buy.code, price, lot_id, receipt.sold, receipt.remaining
        ),
    }
    println!("{}: objective score {}/{}", category, objective, category.max_score());
    if !ratings.is_empty() {
        let parts: Vec<String> = ratings
            .iter()
            .map(|r| format!("{}: {}", r.category, r.score))
            .collect();
        println!("Saved ratings: {}", parts.join(", "));
    }
    Ok(())
}
