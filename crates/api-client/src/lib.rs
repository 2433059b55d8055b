// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Generic API client traits and utilities for external integrations
//!
//! This crate provides common abstractions for the upstream services the game
//! backend brokers requests to: the blockchain server (NFT mint/burn/lock/
//! transfer) and the AI server (NPC chat, material generation).
//!
//! # Core Abstractions
//!
//! - **`ApiClient` Trait**: Common interface for all external API clients with async support
//! - **Health Check System**: Standardized health status reporting across all clients
//! - **Error Handling**: Comprehensive `ApiError` types for different failure scenarios
//! - **Data Types**: Token metadata and mint receipt structures exchanged with the
//!   blockchain server

use thiserror::Error;

pub mod health;
pub mod types;

pub use health::*;
pub use types::*;

/// Generic trait for external API clients
///
/// Provides a common interface for all external integrations, enabling
/// consistent health checks and error handling. Service-specific operations
/// (minting, chat forwarding) live on the concrete client types.
pub trait ApiClient: Send + Sync {
    /// Check the health of this API client
    ///
    /// # Errors
    ///
    /// Returns an error if the health check fails
    fn health_check(&self) -> impl Future<Output = Result<HealthStatus, ApiError>> + Send;

    /// Get the name/identifier of this API client
    fn name(&self) -> &'static str;
}

/// Common errors that can occur when working with API clients
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {message}")]
    Http { message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_seconds} seconds")]
    RateLimitExceeded { retry_after_seconds: u64 },

    /// Authentication failed
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Invalid response format
    #[error("Invalid response format: {message}")]
    InvalidResponse { message: String },

    /// Service unavailable
    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Network timeout
    #[error("Request timeout after {timeout_seconds} seconds")]
    Timeout { timeout_seconds: u64 },

    /// Client independent error
    #[error(transparent)]
    Custom { error: anyhow::Error },
}
