// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! External API integrations for the game backend's upstream services
//!
//! This crate provides the concrete clients behind the brokered operations:
//!
//! - [`ChainClient`]: blockchain server (NFT mint/burn/lock/transfer, wallet
//!   token listing)
//! - [`AiClient`]: AI server (NPC chat, material generation pass-through)
//! - [`ServiceRegistry`]: holds the configured clients and aggregates health

pub mod ai;
pub mod chain;
pub mod registry;

pub use ai::{AiClient, AiConfig, AiError};
pub use chain::{ChainClient, ChainConfig, ChainError, TxAck, WalletTokensResponse};
pub use registry::{RegistryError, ServiceRegistry};
