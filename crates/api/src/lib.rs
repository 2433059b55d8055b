// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Game API Server Implementation
//!
//! This crate provides the main HTTP server for the game backend, built with
//! Axum and designed for production use with comprehensive configuration,
//! middleware, and graceful shutdown capabilities.
//!
//! # Module Structure
//!
//! - [`config`]: Server configuration and environment management with hierarchical loading
//! - [`error`]: Error types and HTTP response handling with proper status codes
//! - [`state`]: Shared application state management with cancellation token support
//! - [`server`]: Main server implementation, lifecycle, and coordinated shutdown
//! - [`routes`]: Route configuration and HTTP request handlers per API area
//! - [`middleware`]: Rate limiting, bearer-token authentication, and cross-cutting concerns
//! - [`extractors`]: JSON extraction with detailed error hints
//! - [`metrics`]: Prometheus metrics and the exposition handler
//! - [`openapi`]: `OpenAPI` specification and Swagger UI endpoints for API documentation
//! - [`docs`]: `OpenAPI` document assembly
//!
//! # Key Features
//!
//! - **Upstream Brokering**: Fronts the blockchain server and AI server via a registry pattern
//! - **Graceful Shutdown**: Coordinated termination using `CancellationToken` with timeouts
//! - **Rate Limiting**: IP-based request limiting with configurable requests per minute
//! - **Health Monitoring**: Aggregated health checks across the database and upstream services
//! - **Production Safety**: Validates credentials, enforces security policies
//! - **Comprehensive Middleware**: Request tracing, CORS, timeouts, and error handling

pub mod config;
pub mod docs;
pub mod error;
pub mod extractors;
pub mod metrics;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{Environment, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::{Server, ShutdownConfig};
pub use shared_types::{Currency, ItemKind, OrderStatus};
pub use state::{HealthCheck, ServerState};
