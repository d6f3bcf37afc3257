// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Hindsight", "hindsight"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("hindsight.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    migrate(&mut conn)?;
    Ok(conn)
}

/// Schema migrations, applied in order inside one transaction each.
/// `PRAGMA user_version` records the last applied step, so re-running at
/// every startup is idempotent.
const MIGRATIONS: &[&str] = &[
    // v1: trade-lot ledger and score entries
    r#"
    CREATE TABLE trades(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        lot_id INTEGER NOT NULL,
        code TEXT NOT NULL,
        name TEXT NOT NULL,
        category TEXT,
        direction TEXT NOT NULL CHECK(direction IN ('buy','sell')),
        buy_date TEXT NOT NULL,
        sell_date TEXT,
        buy_price TEXT NOT NULL,
        sell_price TEXT,
        quantity INTEGER NOT NULL,
        status TEXT NOT NULL DEFAULT 'open' CHECK(status IN ('open','closed')),
        notes TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX idx_trades_lot ON trades(lot_id);
    CREATE INDEX idx_trades_code ON trades(code);

    CREATE TABLE scores(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        trade_id INTEGER,
        date TEXT NOT NULL,
        category TEXT NOT NULL,
        kind TEXT NOT NULL CHECK(kind IN ('subjective','objective')),
        score INTEGER NOT NULL,
        answer TEXT,
        reflection TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY (trade_id) REFERENCES trades(id)
    );
    CREATE INDEX idx_scores_date ON scores(date);

    CREATE TABLE settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
    "#,
];

pub fn migrate(conn: &mut Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    let current: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    for (i, sql) in MIGRATIONS.iter().enumerate() {
        let version = (i + 1) as i64;
        if version <= current {
            continue;
        }
        let tx = conn.transaction()?;
        tx.execute_batch(sql)
            .with_context(|| format!("Apply schema migration v{}", version))?;
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;
        println!("Applied schema migration v{}", version);
    }
    Ok(())
}
