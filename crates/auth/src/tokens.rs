// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Bearer token signing and verification
//!
//! HS256 JWTs with a configurable time-to-live. The codec is constructed once
//! at startup from the configured secret and shared through server state.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::{AuthError, Claims};

const MIN_SECRET_BYTES: usize = 16;

/// A freshly issued bearer token with its expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Encoded JWT
    pub token: String,
    /// When the token stops validating
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies the bearer tokens used by the authentication gate
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Keys are secret material, only the TTL is shown
        f.debug_struct("TokenCodec").field("ttl", &self.ttl).finish()
    }
}

impl TokenCodec {
    /// Create a codec from a shared secret and token lifetime in seconds
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidSecret` for secrets shorter than 16 bytes
    /// or a non-positive lifetime.
    pub fn new(secret: &str, ttl_seconds: i64) -> Result<Self, AuthError> {
        if secret.len() < MIN_SECRET_BYTES {
            return Err(AuthError::InvalidSecret(format!(
                "secret must be at least {MIN_SECRET_BYTES} bytes"
            )));
        }
        if ttl_seconds <= 0 {
            return Err(AuthError::InvalidSecret(
                "token lifetime must be positive".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            ttl: Duration::seconds(ttl_seconds),
        })
    }

    /// Issue a token for the given user
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Signing` if encoding fails
    pub fn issue(&self, user_id: i64, username: &str) -> Result<IssuedToken, AuthError> {
        let now = Utc::now();
        let expires_at = now + self.ttl;

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify a token and return its claims
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenExpired` for expired tokens and
    /// `AuthError::InvalidToken` for anything else that fails validation.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}
