// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("trades", sub)) => export_trades(conn, sub),
        Some(("scores", sub)) => export_scores(conn, sub),
        _ => Ok(()),
    }
}

fn export_trades(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT lot_id, code, name, category, direction, buy_date, sell_date,
                buy_price, sell_price, quantity, status, notes
         FROM trades ORDER BY buy_date, id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, Option<String>>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, Option<String>>(6)?,
            r.get::<_, String>(7)?,
            r.get::<_, Option<String>>(8)?,
            r.get::<_, i64>(9)?,
            r.get::<_, String>(10)?,
            r.get::<_, Option<String>>(11)?,
        ))
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "lot_id", "code", "name", "category", "direction", "buy_date", "sell_date",
                "buy_price", "sell_price", "quantity", "status", "notes",
            ])?;
            for row in rows {
                let (lot, code, name, cat, dir, bd, sd, bp, sp, qty, status, notes) = row?;
                wtr.write_record([
                    lot.to_string(),
                    code,
                    name,
                    cat.unwrap_or_default(),
                    dir,
                    bd,
                    sd.unwrap_or_default(),
                    bp,
                    sp.unwrap_or_default(),
                    qty.to_string(),
                    status,
                    notes.unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let (lot, code, name, cat, dir, bd, sd, bp, sp, qty, status, notes) = row?;
                items.push(json!({
                    "lot_id": lot, "code": code, "name": name, "category": cat,
                    "direction": dir, "buy_date": bd, "sell_date": sd,
                    "buy_price": bp, "sell_price": sp, "quantity": qty,
                    "status": status, "notes": notes
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported trades to {}", out);
    Ok(())
}

fn export_scores(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT trade_id, date, category, kind, score, answer, reflection
         FROM scores ORDER BY date, id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, Option<i64>>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, i64>(4)?,
            r.get::<_, Option<String>>(5)?,
            r.get::<_, Option<String>>(6)?,
        ))
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "trade_id", "date", "category", "kind", "score", "answer", "reflection",
            ])?;
            for row in rows {
                let (tid, date, cat, kind, score, answer, refl) = row?;
                wtr.write_record([
                    tid.map(|t| t.to_string()).unwrap_or_default(),
                    date,
                    cat,
                    kind,
                    score.to_string(),
                    answer.unwrap_or_default(),
                    refl.unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let (tid, date, cat, kind, score, answer, refl) = row?;
                items.push(json!({
                    "trade_id": tid, "date": date, "category": cat, "kind": kind,
                    "score": score, "answer": answer, "reflection": refl
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported scores to {}", out);
    Ok(())
}
