// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for credential and token operations

use thiserror::Error;

/// Errors that can occur during hashing, signing, or verification
#[derive(Debug, Error)]
pub enum AuthError {
    /// The bearer token has passed its expiry claim
    #[error("token expired")]
    TokenExpired,

    /// The bearer token failed signature or structural validation
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Token signing failed
    #[error("failed to sign token: {0}")]
    Signing(String),

    /// Password hashing or verification infrastructure failed
    ///
    /// Distinct from a wrong password, which is reported as `Ok(false)` by
    /// the verifier so callers can keep failures indistinguishable.
    #[error("password hashing error: {0}")]
    Hashing(String),

    /// The configured signing secret is unusable
    #[error("invalid token secret: {0}")]
    InvalidSecret(String),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(source: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match source.kind() {
            ErrorKind::ExpiredSignature => Self::TokenExpired,
            _ => Self::InvalidToken(source.to_string()),
        }
    }
}
