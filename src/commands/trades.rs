// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

use crate::ledger;
use crate::models::TradeEvent;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        Some(("lots", sub)) => lots(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            ledger::delete_trade(conn, id)?;
            println!("Deleted trade {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let data: Vec<TradeEvent> = if sub.get_flag("open") {
        ledger::open_lots(conn)?
    } else if let Some(code) = sub.get_one::<String>("code") {
        ledger::events_by_instrument(conn, code)?
    } else {
        ledger::events(conn, sub.get_one::<usize>("limit").copied())?
    };

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.lot_id.to_string(),
                    t.code.clone(),
                    t.name.clone(),
                    t.category.clone().unwrap_or_default(),
                    t.direction.clone(),
                    t.buy_date.to_string(),
                    t.sell_date.map(|d| d.to_string()).unwrap_or_default(),
                    t.buy_price.to_string(),
                    t.sell_price.map(|p| p.to_string()).unwrap_or_default(),
                    t.quantity.to_string(),
                    t.status.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Id", "Lot", "Code", "Name", "Category", "Dir", "Buy Date", "Sell Date",
                    "Buy Px", "Sell Px", "Qty", "Status",
                ],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct LotRow {
    lot_id: i64,
    code: String,
    name: String,
    category: String,
    buy_date: String,
    buy_price: String,
    quantity: i64,
    sold: i64,
    remaining: i64,
    status: String,
    profit: Option<String>,
}

fn lots(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let data: Vec<LotRow> = ledger::lot_groups(conn)?
        .into_iter()
        .map(|l| LotRow {
            lot_id: l.event.lot_id,
            code: l.event.code.clone(),
            name: l.event.name.clone(),
            category: l.event.category.clone().unwrap_or_default(),
            buy_date: l.event.buy_date.to_string(),
            buy_price: l.event.buy_price.to_string(),
            quantity: l.event.quantity,
            sold: l.sold,
            remaining: l.remaining(),
            status: l.event.status.clone(),
            profit: l.profit().map(|p| format!("{:.2}", p)),
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|l| {
                vec![
                    l.lot_id.to_string(),
                    l.code.clone(),
                    l.name.clone(),
                    l.category.clone(),
                    l.buy_date.clone(),
                    l.buy_price.clone(),
                    l.quantity.to_string(),
                    l.sold.to_string(),
                    l.remaining.to_string(),
                    l.status.clone(),
                    l.profit.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Lot", "Code", "Name", "Category", "Buy Date", "Buy Px", "Qty", "Sold",
                    "Remaining", "Status", "Profit",
                ],
                rows,
            )
        );
    }
    Ok(())
}
