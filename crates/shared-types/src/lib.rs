// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the game API service
//!
//! This crate provides common domain vocabulary that is shared across multiple
//! crates in the game API workspace, avoiding circular dependencies.

pub mod item;
pub mod order;

pub use item::{ItemKind, ParseItemKindError};
pub use order::{Currency, OrderStatus, ParseOrderFieldError};
