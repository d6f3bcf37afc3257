// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;

use hindsight::db;
use hindsight::error::JournalError;
use hindsight::ledger;
use hindsight::models::{Category, NewScore, ScoreKind};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::migrate(&mut conn).unwrap();
    conn
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn entry(d: &str, category: Category, score: i64) -> NewScore {
    NewScore {
        trade_id: None,
        date: date(d),
        category,
        kind: ScoreKind::Subjective,
        score,
        answer: None,
        reflection: None,
    }
}

fn subjective_rows_for(conn: &Connection, d: &str) -> Vec<(String, i64)> {
    let mut stmt = conn
        .prepare("SELECT category, score FROM scores WHERE date=?1 AND kind='subjective' ORDER BY category")
        .unwrap();
    let rows = stmt
        .query_map([d], |r| Ok((r.get::<_, String>(0)?, r.get::<_, i64>(1)?)))
        .unwrap();
    rows.map(|r| r.unwrap()).collect()
}

#[test]
fn resubmitting_a_day_replaces_instead_of_duplicating() {
    let mut conn = setup();
    let first = vec![
        entry("2025-05-02", Category::ProfitTaken, 24),
        entry("2025-05-02", Category::LossCut, 12),
    ];
    assert_eq!(
        ledger::replace_daily_checkin(&mut conn, date("2025-05-02"), &first).unwrap(),
        2
    );

    let second = vec![entry("2025-05-02", Category::DipBought, 18)];
    assert_eq!(
        ledger::replace_daily_checkin(&mut conn, date("2025-05-02"), &second).unwrap(),
        1
    );

    let rows = subjective_rows_for(&conn, "2025-05-02");
    assert_eq!(rows, vec![("dipped-then-bought".to_string(), 18)]);
}

#[test]
fn replacement_is_scoped_to_the_date_and_to_subjective_entries() {
    let mut conn = setup();
    // a check-in on another day
    ledger::replace_daily_checkin(
        &mut conn,
        date("2025-05-01"),
        &[entry("2025-05-01", Category::LossCut, 10)],
    )
    .unwrap();
    // an objective score on the day being replaced
    ledger::insert_score(
        &conn,
        &NewScore {
            trade_id: None,
            date: date("2025-05-02"),
            category: Category::ProfitTaken,
            kind: ScoreKind::Objective,
            score: 30,
            answer: None,
            reflection: None,
        },
    )
    .unwrap();

    ledger::replace_daily_checkin(
        &mut conn,
        date("2025-05-02"),
        &[entry("2025-05-02", Category::RallyBought, 8)],
    )
    .unwrap();

    assert_eq!(
        subjective_rows_for(&conn, "2025-05-01"),
        vec![("loss-cut".to_string(), 10)]
    );
    let objective: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM scores WHERE date='2025-05-02' AND kind='objective'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(objective, 1);
}

#[test]
fn checkin_rejects_scores_above_the_category_maximum() {
    let mut conn = setup();
    let err = ledger::replace_daily_checkin(
        &mut conn,
        date("2025-05-02"),
        &[entry("2025-05-02", Category::LossCut, 25)], // max is 20
    )
    .unwrap_err();
    assert!(matches!(err, JournalError::InvalidInput(_)));
    // the failed transaction left nothing behind
    assert!(subjective_rows_for(&conn, "2025-05-02").is_empty());
}
