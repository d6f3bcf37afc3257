// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Errors surfaced by the ledger and the pure scoring functions.
///
/// Provider failures during buy classification are deliberately absent:
/// classification is advisory and degrades to "no result" instead.
#[derive(Debug, Error)]
pub enum JournalError {
    /// Caller supplied a value that can never succeed (non-positive price,
    /// out-of-range score, unknown label). Fix the input before retrying.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A sell would push the lot's cumulative sold quantity past the buy
    /// quantity. User-correctable.
    #[error("sell of {requested} exceeds remaining {remaining} units on lot {lot_id}")]
    CapacityExceeded {
        lot_id: i64,
        requested: i64,
        remaining: i64,
    },

    /// The referenced trade, lot, or score row does not exist.
    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    Db(#[from] rusqlite::Error),
}
