// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Credential hashing and bearer token issuance
//!
//! This crate provides the two security primitives the game API needs:
//! Argon2id password hashing for the credential store and HS256 JWT
//! issuance/validation for the request authentication gate.
//!
//! # Module Structure
//!
//! - [`claims`]: JWT payload structure carried by every bearer token
//! - [`tokens`]: `TokenCodec` for signing and verifying tokens
//! - [`password`]: Argon2 hashing and verification
//! - [`error`]: `AuthError` covering both primitives

pub mod claims;
pub mod error;
pub mod password;
pub mod tokens;

pub use claims::Claims;
pub use error::AuthError;
pub use tokens::{IssuedToken, TokenCodec};
