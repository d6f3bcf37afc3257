// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use chrono::Utc;
use rusqlite::Connection;

use crate::classify::{detect_buy_category, DEFAULT_LOOKAHEAD_DAYS};
use crate::ledger;
use crate::models::{Category, NewBuy};
use crate::provider::{PriceProvider, TushareClient};
use crate::utils::{get_provider_token, parse_date, parse_decimal};

use super::subjective_entries;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let code = sub.get_one::<String>("code").unwrap().clone();
    let price = parse_decimal(sub.get_one::<String>("price").unwrap())?;
    let quantity = *sub.get_one::<i64>("qty").unwrap();
    let notes = sub.get_one::<String>("notes").cloned();

    let provider = match get_provider_token(conn)? {
        Some(token) => Some(TushareClient::new(&token)?),
        None => None,
    };

    let category = match sub.get_one::<String>("category") {
        Some(s) => Category::parse(s)?,
        None => {
            let detected = provider.as_ref().and_then(|p| {
                detect_buy_category(p, &code, date, price, DEFAULT_LOOKAHEAD_DAYS)
            });
            match detected {
                Some(c) => {
                    println!("Classified from price history: {}", c);
                    c
                }
                None => bail!(
                    "Could not classify this buy from price history; pass --category \
                     (dipped-then-bought or rallied-then-bought)"
                ),
            }
        }
    };

    // prefer an explicit name, then the provider's, then the bare code
    let name = match sub.get_one::<String>("name") {
        Some(n) => n.clone(),
        None => provider
            .as_ref()
            .and_then(|p| p.instrument_name(&code).ok().flatten())
            .unwrap_or_else(|| code.clone()),
    };

    let receipt = ledger::insert_buy(
        conn,
        &NewBuy {
            code: code.clone(),
            name: name.clone(),
            category,
            buy_date: date,
            buy_price: price,
            quantity,
            notes,
        },
    )?;

    let ratings = subjective_entries(sub, Some(receipt.trade_id), date)?;
    for entry in &ratings {
        ledger::insert_score(conn, entry)?;
    }

    println!(
        "Opened lot {} : bought {} x {} '{}' ({}) at {} [{}]",
        receipt.lot_id, quantity, code, name, category, price, date
    );
    if !ratings.is_empty() {
        let parts: Vec<String> = ratings
            .iter()
            .map(|r| format!("{}: {}", r.category, r.score))
            .collect();
        println!("Saved ratings: {}", parts.join(", "));
    }
    Ok(())
}
