// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error handling module
//!
//! Provides the server-wide error type with HTTP response mapping. Errors
//! from the auth, storage, and upstream-client crates convert into
//! `ServerError` variants so handlers can use `?` throughout.

use std::net::SocketAddr;

use auth::AuthError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use external_apis::{AiError, ChainError, RegistryError};
use storage::StorageError;
use thiserror::Error;

/// Comprehensive error types for server operations
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration validation errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Network binding errors
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        /// Socket address that failed to bind
        address: SocketAddr,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server startup errors
    #[error("Server startup failed: {source}")]
    Startup {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server shutdown errors
    #[error("Server shutdown failed: {source}")]
    Shutdown {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Input validation errors
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// JSON parsing errors with detailed context
    #[error("Invalid JSON request: {message}")]
    JsonError {
        /// Detailed error message
        message: String,
    },

    /// Missing, malformed, or expired credentials
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Reason the request was rejected
        message: String,
    },

    /// The requested resource does not exist or is not visible to the caller
    #[error("{resource} not found")]
    NotFound {
        /// Resource description for the error body
        resource: String,
    },

    /// The request conflicts with current state (stale version, duplicate,
    /// minted item, terminal order status)
    #[error("Conflict: {message}")]
    Conflict {
        /// Conflict description
        message: String,
    },

    /// An upstream service failed or returned an error
    #[error("Upstream {service} error: {message}")]
    Upstream {
        /// Upstream service name
        service: &'static str,
        /// Upstream failure detail
        message: String,
    },

    /// A required upstream service is not configured
    #[error("Service unavailable: {message}")]
    ServiceUnavailable {
        /// Which dependency is missing
        message: String,
    },

    /// Database errors that are not domain conflicts
    #[error("Database error: {message}")]
    Database {
        /// Error message
        message: String,
    },

    /// Internal errors with no better classification
    #[error("Internal error: {message}")]
    Internal {
        /// Error message
        message: String,
    },
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::ValidationError(..) | ServerError::JsonError { .. } => {
                StatusCode::BAD_REQUEST
            }
            ServerError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ServerError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServerError::Conflict { .. } => StatusCode::CONFLICT,
            ServerError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ServerError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::Config { .. }
            | ServerError::Bind { .. }
            | ServerError::Startup { .. }
            | ServerError::Shutdown { .. }
            | ServerError::Database { .. }
            | ServerError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Internal detail stays in the logs, not in the response body.
        let message = match &self {
            ServerError::Database { .. } | ServerError::Internal { .. } => {
                tracing::error!(error = %self, "internal server error");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        }));
        (status, body).into_response()
    }
}

impl From<StorageError> for ServerError {
    fn from(source: StorageError) -> Self {
        match source {
            StorageError::NotFound { entity, id } => Self::NotFound {
                resource: format!("{entity} {id}"),
            },
            StorageError::Duplicate { .. }
            | StorageError::VersionConflict { .. }
            | StorageError::TokenAttached { .. }
            | StorageError::InvalidTransition { .. } => Self::Conflict {
                message: source.to_string(),
            },
            StorageError::InsufficientQuantity { .. } => {
                Self::ValidationError(source.to_string())
            }
            StorageError::Database(e) => Self::Database {
                message: e.to_string(),
            },
            StorageError::CorruptColumn { .. } => Self::Internal {
                message: source.to_string(),
            },
        }
    }
}

impl From<AuthError> for ServerError {
    fn from(source: AuthError) -> Self {
        match source {
            AuthError::TokenExpired => Self::Unauthorized {
                message: "token expired".to_string(),
            },
            AuthError::InvalidToken(_) => Self::Unauthorized {
                message: "invalid token".to_string(),
            },
            AuthError::Signing(e) | AuthError::Hashing(e) | AuthError::InvalidSecret(e) => {
                Self::Internal { message: e }
            }
        }
    }
}

impl From<ChainError> for ServerError {
    fn from(source: ChainError) -> Self {
        match source {
            ChainError::TokenNotFound { token_id } => Self::NotFound {
                resource: format!("token {token_id}"),
            },
            other => Self::Upstream {
                service: "chain",
                message: other.to_string(),
            },
        }
    }
}

impl From<AiError> for ServerError {
    fn from(source: AiError) -> Self {
        Self::Upstream {
            service: "ai",
            message: source.to_string(),
        }
    }
}

impl From<RegistryError> for ServerError {
    fn from(source: RegistryError) -> Self {
        Self::ServiceUnavailable {
            message: source.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_not_found_maps_to_404() {
        let err: ServerError = StorageError::NotFound {
            entity: "equip item",
            id: "9".to_string(),
        }
        .into();
        assert!(matches!(err, ServerError::NotFound { .. }));
    }

    #[test]
    fn version_conflict_maps_to_409() {
        let err: ServerError = StorageError::VersionConflict { expected: 3 }.into();
        assert!(matches!(err, ServerError::Conflict { .. }));
    }

    #[test]
    fn expired_token_maps_to_401() {
        let err: ServerError = AuthError::TokenExpired.into();
        assert!(matches!(err, ServerError::Unauthorized { .. }));
    }

    #[test]
    fn chain_failure_maps_to_502() {
        let err: ServerError = ChainError::RateLimited.into();
        assert!(matches!(err, ServerError::Upstream { service: "chain", .. }));
    }
}
