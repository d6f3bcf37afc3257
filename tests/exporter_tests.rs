// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use serde_json::json;
use tempfile::tempdir;

use hindsight::commands::exporter;
use hindsight::models::{Category, NewScore, ScoreKind};
use hindsight::{cli, db, ledger};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::migrate(&mut conn).unwrap();
    conn
}

#[test]
fn export_scores_streams_pretty_json() {
    let conn = setup();
    ledger::insert_score(
        &conn,
        &NewScore {
            trade_id: None,
            date: NaiveDate::from_ymd_opt(2025, 7, 2).unwrap(),
            category: Category::LossCut,
            kind: ScoreKind::Subjective,
            score: 16,
            answer: Some("Held the stop".to_string()),
            reflection: None,
        },
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("scores.json");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "hindsight", "export", "scores", "--format", "json", "--out", &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&conn, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "trade_id": null,
                "date": "2025-07-02",
                "category": "loss-cut",
                "kind": "subjective",
                "score": 16,
                "answer": "Held the stop",
                "reflection": null
            }
        ])
    );
}

#[test]
fn export_trades_writes_csv_header_and_rows() {
    let conn = setup();
    ledger::insert_buy(
        &conn,
        &hindsight::models::NewBuy {
            code: "600000".to_string(),
            name: "SPDB".to_string(),
            category: Category::DipBought,
            buy_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            buy_price: "10.50".parse().unwrap(),
            quantity: 100,
            notes: None,
        },
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("trades.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "hindsight", "export", "trades", "--format", "csv", "--out", &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&conn, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "lot_id,code,name,category,direction,buy_date,sell_date,buy_price,sell_price,quantity,status,notes"
    );
    let row = lines.next().unwrap();
    assert!(row.starts_with("1,600000,SPDB,dipped-then-bought,buy,2025-07-01"));
    assert!(row.contains("open"));
}

#[test]
fn export_rejects_unknown_format() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "hindsight", "export", "trades", "--format", "xml", "--out", &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        assert!(exporter::handle(&conn, export_m).is_err());
    } else {
        panic!("no export subcommand");
    }
    assert!(!out_path.exists());
}
