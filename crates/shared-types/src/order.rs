// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Market sell-order types
//!
//! Order status transitions are simple field updates triggered by external
//! settlement; there is no matching engine behind them. The status enum still
//! guards the legal transitions so a settled order cannot be reopened.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Lifecycle status of a sell order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Listed and available
    Open,
    /// Settled by an external buyer
    Filled,
    /// Withdrawn by the seller
    Cancelled,
    /// Deadline passed without settlement
    Expired,
}

/// Currency a sell order is priced in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Currency {
    /// In-game soft currency
    Gold,
    /// On-chain token settled by the blockchain server
    Token,
}

/// Error returned when parsing an unknown status or currency string
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {field}: {value}")]
pub struct ParseOrderFieldError {
    /// Which field failed to parse
    pub field: &'static str,
    /// The rejected input
    pub value: String,
}

impl OrderStatus {
    /// Whether the order can still change state
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Whether this status may transition to `next`
    ///
    /// Only open orders move; Filled/Cancelled/Expired are terminal.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.is_open() && !next.is_open()
    }

    /// Stable string form used for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Filled => "filled",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        }
    }
}

impl Currency {
    /// Stable string form used for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Token => "token",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseOrderFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "filled" => Ok(Self::Filled),
            "cancelled" => Ok(Self::Cancelled),
            "expired" => Ok(Self::Expired),
            other => Err(ParseOrderFieldError {
                field: "order status",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for Currency {
    type Err = ParseOrderFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gold" => Ok(Self::Gold),
            "token" => Ok(Self::Token),
            other => Err(ParseOrderFieldError {
                field: "currency",
                value: other.to_string(),
            }),
        }
    }
}
