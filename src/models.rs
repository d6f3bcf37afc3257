// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::JournalError;

/// The four behavioral categories a trade (or self-check) is rated against.
/// Their maximum scores sum to 100: 30 + 30 + 20 + 20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Sold into a gain instead of holding out of greed.
    ProfitTaken,
    /// Bought into a dip instead of freezing out of fear.
    DipBought,
    /// Bought a breakout instead of balking at the height.
    RallyBought,
    /// Cut a losing position instead of clinging to it.
    LossCut,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::ProfitTaken,
        Category::DipBought,
        Category::RallyBought,
        Category::LossCut,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ProfitTaken => "profit-taken",
            Category::DipBought => "dipped-then-bought",
            Category::RallyBought => "rallied-then-bought",
            Category::LossCut => "loss-cut",
        }
    }

    pub fn parse(s: &str) -> Result<Category, JournalError> {
        match s {
            "profit-taken" => Ok(Category::ProfitTaken),
            "dipped-then-bought" => Ok(Category::DipBought),
            "rallied-then-bought" => Ok(Category::RallyBought),
            "loss-cut" => Ok(Category::LossCut),
            other => Err(JournalError::InvalidInput(format!(
                "unknown category '{}'",
                other
            ))),
        }
    }

    pub fn max_score(&self) -> i64 {
        match self {
            Category::ProfitTaken | Category::DipBought => 30,
            Category::RallyBought | Category::LossCut => 20,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::ProfitTaken => "sitting on a gain; overcome greed",
            Category::DipBought => "sitting on a loss; overcome fear",
            Category::RallyBought => "breakout / trend continuation; overcome vertigo",
            Category::LossCut => "broken thesis; overcome loss aversion",
        }
    }

    /// Daily self-check prompt shown by the `checkin` command.
    pub fn question(&self) -> &'static str {
        match self {
            Category::ProfitTaken => "If today closes at my target gain, will I trim as planned?",
            Category::DipBought => {
                "If the price drops further, do I have the cash and nerve to add?"
            }
            Category::RallyBought => {
                "At a breakout of the prior high, will I chase with a small position?"
            }
            Category::LossCut => {
                "At my stop level, can I sell immediately without inventing excuses?"
            }
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Buy => "buy",
            Direction::Sell => "sell",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LotStatus {
    Open,
    Closed,
}

impl LotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LotStatus::Open => "open",
            LotStatus::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreKind {
    Subjective,
    Objective,
}

impl ScoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreKind::Subjective => "subjective",
            ScoreKind::Objective => "objective",
        }
    }

    pub fn parse(s: &str) -> Result<ScoreKind, JournalError> {
        match s {
            "subjective" => Ok(ScoreKind::Subjective),
            "objective" => Ok(ScoreKind::Objective),
            other => Err(JournalError::InvalidInput(format!(
                "unknown score kind '{}'",
                other
            ))),
        }
    }
}

/// One buy or sell event as stored in the `trades` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeEvent {
    pub id: i64,
    pub lot_id: i64,
    pub code: String,
    pub name: String,
    pub category: Option<String>,
    pub direction: String,
    pub buy_date: NaiveDate,
    pub sell_date: Option<NaiveDate>,
    pub buy_price: Decimal,
    pub sell_price: Option<Decimal>,
    pub quantity: i64,
    pub status: String,
    pub notes: Option<String>,
}

/// Input for a new buy event; the ledger assigns id and lot_id.
#[derive(Debug, Clone)]
pub struct NewBuy {
    pub code: String,
    pub name: String,
    pub category: Category,
    pub buy_date: NaiveDate,
    pub buy_price: Decimal,
    pub quantity: i64,
    pub notes: Option<String>,
}

/// Input for a sell event against an existing lot.
#[derive(Debug, Clone)]
pub struct NewSell {
    pub sell_date: NaiveDate,
    pub sell_price: Decimal,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub id: i64,
    pub trade_id: Option<i64>,
    pub date: NaiveDate,
    pub category: String,
    pub kind: String,
    pub score: i64,
    pub answer: Option<String>,
    pub reflection: Option<String>,
}

/// Input for a new score row; standalone daily check-ins carry no trade id.
#[derive(Debug, Clone)]
pub struct NewScore {
    pub trade_id: Option<i64>,
    pub date: NaiveDate,
    pub category: Category,
    pub kind: ScoreKind,
    pub score: i64,
    pub answer: Option<String>,
    pub reflection: Option<String>,
}
