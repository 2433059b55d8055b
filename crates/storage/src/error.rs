// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the persistence layer.

use thiserror::Error;

/// Errors returned by repositories and the connection helper.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying database error.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// The requested row does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity name, e.g. `"equip item"`.
        entity: &'static str,
        /// Identifier the caller asked for.
        id: String,
    },

    /// A uniqueness constraint was violated.
    #[error("{entity} with {field} = {value} already exists")]
    Duplicate {
        /// Entity name.
        entity: &'static str,
        /// Field carrying the constraint.
        field: &'static str,
        /// Conflicting value.
        value: String,
    },

    /// A profile write carried a stale version number.
    #[error("profile version conflict: expected {expected}, row has moved on")]
    VersionConflict {
        /// Version the caller based its write on.
        expected: i32,
    },

    /// Deletion refused because the item still has an NFT attached.
    #[error("equip item {item_id} has token {token_id} attached; burn it first")]
    TokenAttached {
        /// Equipment item ID.
        item_id: i64,
        /// Attached token ID.
        token_id: String,
    },

    /// A consumable decrement would drive the quantity below zero.
    #[error("insufficient quantity: have {available}, need {requested}")]
    InsufficientQuantity {
        /// Quantity currently held.
        available: i32,
        /// Quantity the caller tried to spend.
        requested: i32,
    },

    /// A sell order status change that the state machine forbids.
    #[error("sell order {order_id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// Order ID.
        order_id: i64,
        /// Current status.
        from: String,
        /// Requested status.
        to: String,
    },

    /// A stored string column failed to parse into its domain enum.
    #[error("corrupt {column} value in row {id}: {value:?}")]
    CorruptColumn {
        /// Column name.
        column: &'static str,
        /// Row ID.
        id: i64,
        /// The unparseable value.
        value: String,
    },
}

impl StorageError {
    /// Whether this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
