// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Argon2 password hashing and verification
//!
//! Hashes are stored in PHC string format, so parameters and salts travel with
//! the hash and can be upgraded without a schema change.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::AuthError;

/// Hash a plaintext password with a freshly generated salt
///
/// # Errors
///
/// Returns `AuthError::Hashing` if the hasher fails
pub fn hash(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hashed = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hashing(e.to_string()))?;
    Ok(hashed.to_string())
}

/// Verify a plaintext password against a stored PHC hash string
///
/// A wrong password is `Ok(false)`, not an error; only infrastructure
/// failures (malformed stored hash) surface as `Err`.
///
/// # Errors
///
/// Returns `AuthError::Hashing` if the stored hash cannot be parsed
pub fn verify(password: &str, stored_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| AuthError::Hashing(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
