// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::models::Category;

const UA: &str = concat!(
    "hindsight/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/hindsight)"
);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Parse a repeated `--rate`/`--answer` argument of the form `category=value`.
pub fn parse_category_pair(s: &str) -> Result<(Category, &str)> {
    let (cat, value) = s
        .split_once('=')
        .with_context(|| format!("Invalid '{}', expected CATEGORY=VALUE", s))?;
    let category = Category::parse(cat.trim())?;
    Ok((category, value.trim()))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

// Price-provider token, stored alongside the data it unlocks.
pub fn get_provider_token(conn: &Connection) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='provider_token'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_provider_token(conn: &Connection, token: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('provider_token', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![token],
    )?;
    Ok(())
}
