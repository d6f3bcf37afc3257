// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;

use hindsight::db;
use hindsight::ledger;
use hindsight::models::{Category, NewScore, ScoreKind};
use hindsight::reports;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::migrate(&mut conn).unwrap();
    conn
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn add(conn: &Connection, d: &str, category: Category, kind: ScoreKind, score: i64) {
    ledger::insert_score(
        conn,
        &NewScore {
            trade_id: None,
            date: date(d),
            category,
            kind,
            score,
            answer: None,
            reflection: None,
        },
    )
    .unwrap();
}

#[test]
fn summary_groups_by_category_with_count_mean_min_max() {
    let conn = setup();
    add(&conn, "2025-06-01", Category::LossCut, ScoreKind::Subjective, 10);
    add(&conn, "2025-06-02", Category::LossCut, ScoreKind::Subjective, 20);
    add(&conn, "2025-06-03", Category::ProfitTaken, ScoreKind::Subjective, 30);

    let summary = reports::scores_summary(&conn, None).unwrap();
    assert_eq!(summary.len(), 2);

    let loss = summary.iter().find(|s| s.category == "loss-cut").unwrap();
    assert_eq!(loss.count, 2);
    assert_eq!(loss.avg_score, 15.0);
    assert_eq!(loss.min_score, 10);
    assert_eq!(loss.max_score, 20);

    let profit = summary.iter().find(|s| s.category == "profit-taken").unwrap();
    assert_eq!(profit.count, 1);
    assert_eq!(profit.avg_score, 30.0);
}

#[test]
fn summary_respects_kind_filter() {
    let conn = setup();
    add(&conn, "2025-06-01", Category::LossCut, ScoreKind::Subjective, 10);
    add(&conn, "2025-06-01", Category::LossCut, ScoreKind::Objective, 20);

    let subjective = reports::scores_summary(&conn, Some(ScoreKind::Subjective)).unwrap();
    assert_eq!(subjective.len(), 1);
    assert_eq!(subjective[0].count, 1);
    assert_eq!(subjective[0].max_score, 10);
}

#[test]
fn range_query_is_inclusive_and_ordered_oldest_first() {
    let conn = setup();
    add(&conn, "2025-06-01", Category::LossCut, ScoreKind::Subjective, 5);
    add(&conn, "2025-06-10", Category::DipBought, ScoreKind::Subjective, 15);
    add(&conn, "2025-06-20", Category::RallyBought, ScoreKind::Subjective, 12);
    add(&conn, "2025-07-01", Category::ProfitTaken, ScoreKind::Subjective, 25);

    let rows =
        reports::scores_in_range(&conn, date("2025-06-01"), date("2025-06-20"), None).unwrap();
    let dates: Vec<String> = rows.iter().map(|s| s.date.to_string()).collect();
    assert_eq!(dates, vec!["2025-06-01", "2025-06-10", "2025-06-20"]);
}

#[test]
fn recent_scores_limit_and_order() {
    let conn = setup();
    for (i, d) in ["2025-06-01", "2025-06-02", "2025-06-03"].iter().enumerate() {
        add(&conn, d, Category::LossCut, ScoreKind::Subjective, (i as i64) + 1);
    }
    let rows = reports::recent_scores(&conn, 2, None).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date.to_string(), "2025-06-03");
    assert_eq!(rows[1].date.to_string(), "2025-06-02");
}
