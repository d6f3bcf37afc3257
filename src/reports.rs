// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only aggregations over score entries. Recomputed on every call;
//! a single user's journal never grows past a few thousand rows.

use chrono::NaiveDate;
use rusqlite::{params_from_iter, Connection, Row};
use serde::Serialize;

use crate::error::JournalError;
use crate::models::{ScoreEntry, ScoreKind};

#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub count: i64,
    pub avg_score: f64,
    pub min_score: i64,
    pub max_score: i64,
}

fn score_from_row(r: &Row) -> rusqlite::Result<ScoreEntry> {
    Ok(ScoreEntry {
        id: r.get(0)?,
        trade_id: r.get(1)?,
        date: r.get(2)?,
        category: r.get(3)?,
        kind: r.get(4)?,
        score: r.get(5)?,
        answer: r.get(6)?,
        reflection: r.get(7)?,
    })
}

/// Score entries inside `[start, end]`, oldest first. Feeds the trend view.
pub fn scores_in_range(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
    kind: Option<ScoreKind>,
) -> Result<Vec<ScoreEntry>, JournalError> {
    let mut sql = String::from(
        "SELECT id, trade_id, date, category, kind, score, answer, reflection
         FROM scores WHERE date >= ? AND date <= ?",
    );
    let mut params: Vec<String> = vec![start.to_string(), end.to_string()];
    if let Some(k) = kind {
        sql.push_str(" AND kind = ?");
        params.push(k.as_str().to_string());
    }
    sql.push_str(" ORDER BY date ASC, id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(params.iter()), score_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Per-category count/mean/min/max. Feeds the radar/summary view.
pub fn scores_summary(
    conn: &Connection,
    kind: Option<ScoreKind>,
) -> Result<Vec<CategorySummary>, JournalError> {
    let mut sql = String::from(
        "SELECT category, COUNT(*), AVG(score), MIN(score), MAX(score)
         FROM scores WHERE 1=1",
    );
    let mut params: Vec<String> = Vec::new();
    if let Some(k) = kind {
        sql.push_str(" AND kind = ?");
        params.push(k.as_str().to_string());
    }
    sql.push_str(" GROUP BY category ORDER BY category");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(params.iter()), |r| {
        Ok(CategorySummary {
            category: r.get(0)?,
            count: r.get(1)?,
            avg_score: r.get(2)?,
            min_score: r.get(3)?,
            max_score: r.get(4)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Latest entries, newest first. Feeds the recent-scores listing.
pub fn recent_scores(
    conn: &Connection,
    limit: usize,
    kind: Option<ScoreKind>,
) -> Result<Vec<ScoreEntry>, JournalError> {
    let mut sql = String::from(
        "SELECT id, trade_id, date, category, kind, score, answer, reflection
         FROM scores WHERE 1=1",
    );
    let mut params: Vec<String> = Vec::new();
    if let Some(k) = kind {
        sql.push_str(" AND kind = ?");
        params.push(k.as_str().to_string());
    }
    sql.push_str(&format!(" ORDER BY date DESC, id DESC LIMIT {}", limit));

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(params.iter()), score_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}
