// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The trade-lot ledger: one buy event plus the sell events that reduce it.
//!
//! A lot is `open` from the buy insert until its sells sum to the buy
//! quantity, at which point it flips to `closed` and stays there. The ledger
//! rejects any sell that would push the cumulative sold quantity past the buy
//! quantity; the database itself does not enforce this.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use crate::error::JournalError;
use crate::models::{LotStatus, NewBuy, NewScore, NewSell, ScoreEntry, ScoreKind, TradeEvent};

#[derive(Debug)]
pub struct BuyReceipt {
    pub trade_id: i64,
    pub lot_id: i64,
}

#[derive(Debug)]
pub struct SellReceipt {
    pub trade_id: i64,
    pub lot_id: i64,
    pub sold: i64,
    pub remaining: i64,
    pub status: LotStatus,
}

/// A buy row together with the quantity its sells have consumed so far.
#[derive(Debug)]
pub struct LotSummary {
    pub event: TradeEvent,
    pub sold: i64,
}

impl LotSummary {
    pub fn remaining(&self) -> i64 {
        self.event.quantity - self.sold
    }

    /// Realized profit over the mirrored sell price, once one exists.
    pub fn profit(&self) -> Option<Decimal> {
        let sell = self.event.sell_price?;
        Some((sell - self.event.buy_price) * Decimal::from(self.sold))
    }
}

const TRADE_COLS: &str =
    "id, lot_id, code, name, category, direction, buy_date, sell_date, buy_price, sell_price, quantity, status, notes";

fn decimal_col(r: &Row, idx: usize) -> rusqlite::Result<Decimal> {
    let s: String = r.get(idx)?;
    s.parse::<Decimal>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn trade_from_row(r: &Row) -> rusqlite::Result<TradeEvent> {
    let sell_price: Option<String> = r.get(9)?;
    let sell_price = match sell_price {
        Some(s) => Some(s.parse::<Decimal>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(9, rusqlite::types::Type::Text, Box::new(e))
        })?),
        None => None,
    };
    Ok(TradeEvent {
        id: r.get(0)?,
        lot_id: r.get(1)?,
        code: r.get(2)?,
        name: r.get(3)?,
        category: r.get(4)?,
        direction: r.get(5)?,
        buy_date: r.get(6)?,
        sell_date: r.get(7)?,
        buy_price: decimal_col(r, 8)?,
        sell_price,
        quantity: r.get(10)?,
        status: r.get(11)?,
        notes: r.get(12)?,
    })
}

/// Insert a buy event under a freshly allocated lot id.
pub fn insert_buy(conn: &Connection, buy: &NewBuy) -> Result<BuyReceipt, JournalError> {
    if buy.buy_price <= Decimal::ZERO {
        return Err(JournalError::InvalidInput(format!(
            "buy price must be positive, got {}",
            buy.buy_price
        )));
    }
    if buy.quantity <= 0 {
        return Err(JournalError::InvalidInput(format!(
            "buy quantity must be positive, got {}",
            buy.quantity
        )));
    }

    let lot_id: i64 = conn.query_row(
        "SELECT COALESCE(MAX(lot_id), 0) + 1 FROM trades",
        [],
        |r| r.get(0),
    )?;
    conn.execute(
        "INSERT INTO trades(lot_id, code, name, category, direction, buy_date, buy_price, quantity, status, notes)
         VALUES (?1, ?2, ?3, ?4, 'buy', ?5, ?6, ?7, 'open', ?8)",
        params![
            lot_id,
            buy.code,
            buy.name,
            buy.category.as_str(),
            buy.buy_date,
            buy.buy_price.to_string(),
            buy.quantity,
            buy.notes
        ],
    )?;
    Ok(BuyReceipt {
        trade_id: conn.last_insert_rowid(),
        lot_id,
    })
}

/// Record a sell against an open lot.
///
/// Runs in a transaction: the capacity check, the sell insert, and the buy
/// row update land together or not at all. A rejected sell leaves no trace.
pub fn insert_sell(
    conn: &mut Connection,
    lot_id: i64,
    sell: &NewSell,
) -> Result<SellReceipt, JournalError> {
    if sell.sell_price <= Decimal::ZERO {
        return Err(JournalError::InvalidInput(format!(
            "sell price must be positive, got {}",
            sell.sell_price
        )));
    }
    if sell.quantity <= 0 {
        return Err(JournalError::InvalidInput(format!(
            "sell quantity must be positive, got {}",
            sell.quantity
        )));
    }

    let tx = conn.transaction()?;

    let buy = buy_event(&tx, lot_id)?
        .ok_or_else(|| JournalError::NotFound(format!("buy lot {}", lot_id)))?;
    let sold = sold_quantity(&tx, lot_id)?;
    let remaining = buy.quantity - sold;
    if sell.quantity > remaining {
        return Err(JournalError::CapacityExceeded {
            lot_id,
            requested: sell.quantity,
            remaining,
        });
    }

    tx.execute(
        "INSERT INTO trades(lot_id, code, name, category, direction, buy_date, sell_date, buy_price, sell_price, quantity, status)
         VALUES (?1, ?2, ?3, NULL, 'sell', ?4, ?5, ?6, ?7, ?8, 'closed')",
        params![
            lot_id,
            buy.code,
            buy.name,
            buy.buy_date,
            sell.sell_date,
            buy.buy_price.to_string(),
            sell.sell_price.to_string(),
            sell.quantity
        ],
    )?;
    let trade_id = tx.last_insert_rowid();

    let new_sold = sold + sell.quantity;
    let status = if new_sold >= buy.quantity {
        LotStatus::Closed
    } else {
        LotStatus::Open
    };
    // mirror the latest sell onto the buy row for display convenience
    tx.execute(
        "UPDATE trades SET status=?1, sell_date=?2, sell_price=?3
         WHERE lot_id=?4 AND direction='buy'",
        params![
            status.as_str(),
            sell.sell_date,
            sell.sell_price.to_string(),
            lot_id
        ],
    )?;

    tx.commit()?;
    Ok(SellReceipt {
        trade_id,
        lot_id,
        sold: new_sold,
        remaining: buy.quantity - new_sold,
        status,
    })
}

/// Total units sold off a lot so far; zero when it has no sells.
pub fn sold_quantity(conn: &Connection, lot_id: i64) -> Result<i64, JournalError> {
    let sold: i64 = conn.query_row(
        "SELECT COALESCE(SUM(quantity), 0) FROM trades WHERE lot_id=?1 AND direction='sell'",
        params![lot_id],
        |r| r.get(0),
    )?;
    Ok(sold)
}

/// The buy row anchoring a lot, if the lot exists.
pub fn buy_event(conn: &Connection, lot_id: i64) -> Result<Option<TradeEvent>, JournalError> {
    let sql = format!(
        "SELECT {} FROM trades WHERE lot_id=?1 AND direction='buy'",
        TRADE_COLS
    );
    let event = conn
        .query_row(&sql, params![lot_id], trade_from_row)
        .optional()?;
    Ok(event)
}

pub fn get_trade(conn: &Connection, id: i64) -> Result<TradeEvent, JournalError> {
    let sql = format!("SELECT {} FROM trades WHERE id=?1", TRADE_COLS);
    conn.query_row(&sql, params![id], trade_from_row)
        .optional()?
        .ok_or_else(|| JournalError::NotFound(format!("trade {}", id)))
}

/// Buy rows still holding unsold quantity, newest first.
pub fn open_lots(conn: &Connection) -> Result<Vec<TradeEvent>, JournalError> {
    let sql = format!(
        "SELECT {} FROM trades WHERE status='open' AND direction='buy' ORDER BY buy_date DESC, id DESC",
        TRADE_COLS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], trade_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// All buy rows grouped as lots, with their consumed quantity.
pub fn lot_groups(conn: &Connection) -> Result<Vec<LotSummary>, JournalError> {
    let sql = format!(
        "SELECT {}, COALESCE((SELECT SUM(s.quantity) FROM trades s
                              WHERE s.lot_id=trades.lot_id AND s.direction='sell'), 0) AS sold
         FROM trades WHERE direction='buy' ORDER BY buy_date DESC, id DESC",
        TRADE_COLS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |r| {
        let event = trade_from_row(r)?;
        let sold: i64 = r.get(13)?;
        Ok(LotSummary { event, sold })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Every buy and sell event, newest first.
pub fn events(conn: &Connection, limit: Option<usize>) -> Result<Vec<TradeEvent>, JournalError> {
    let mut sql = format!(
        "SELECT {} FROM trades ORDER BY buy_date DESC, id DESC",
        TRADE_COLS
    );
    if let Some(n) = limit {
        sql.push_str(&format!(" LIMIT {}", n));
    }
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], trade_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn events_by_instrument(
    conn: &Connection,
    code: &str,
) -> Result<Vec<TradeEvent>, JournalError> {
    let sql = format!(
        "SELECT {} FROM trades WHERE code=?1 ORDER BY buy_date DESC, id DESC",
        TRADE_COLS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![code], trade_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Insert one score entry, bounded by its category's maximum.
pub fn insert_score(conn: &Connection, score: &NewScore) -> Result<i64, JournalError> {
    let max = score.category.max_score();
    if score.score < 0 || score.score > max {
        return Err(JournalError::InvalidInput(format!(
            "score {} outside 0..={} for {}",
            score.score, max, score.category
        )));
    }
    conn.execute(
        "INSERT INTO scores(trade_id, date, category, kind, score, answer, reflection)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            score.trade_id,
            score.date,
            score.category.as_str(),
            score.kind.as_str(),
            score.score,
            score.answer,
            score.reflection
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Save a daily self-check, replacing whatever subjective entries already
/// exist for that date. Re-submitting the same day never duplicates.
pub fn replace_daily_checkin(
    conn: &mut Connection,
    date: NaiveDate,
    entries: &[NewScore],
) -> Result<usize, JournalError> {
    let tx = conn.transaction()?;
    tx.execute(
        "DELETE FROM scores WHERE date=?1 AND kind='subjective'",
        params![date],
    )?;
    let mut saved = 0;
    for entry in entries {
        debug_assert_eq!(entry.kind, ScoreKind::Subjective);
        insert_score(&tx, entry)?;
        saved += 1;
    }
    tx.commit()?;
    Ok(saved)
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

pub fn scores_by_trade(conn: &Connection, trade_id: i64) -> Result<Vec<ScoreEntry>, JournalError> {
    let mut stmt = conn.prepare(
        "SELECT id, trade_id, date, category, kind, score, answer, reflection
         FROM scores WHERE trade_id=?1 ORDER BY kind, date DESC",
    )?;
    let rows = stmt.query_map(params![trade_id], score_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn delete_trade(conn: &Connection, id: i64) -> Result<(), JournalError> {
    let n = conn.execute("DELETE FROM trades WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(JournalError::NotFound(format!("trade {}", id)));
    }
    Ok(())
}

pub fn delete_score(conn: &Connection, id: i64) -> Result<(), JournalError> {
    let n = conn.execute("DELETE FROM scores WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(JournalError::NotFound(format!("score {}", id)));
    }
    Ok(())
}
