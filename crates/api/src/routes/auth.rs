// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Account registration and login handlers.

use alloy_primitives::Address;
use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storage::{ProfileRepository, UserRepository};
use tracing::info;
use utoipa::ToSchema;

use crate::{error::ServerError, extractors::JsonExtractor, metrics, state::ServerState};

const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 32;
const MIN_PASSWORD_LENGTH: usize = 8;

/// Account registration request
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Login name, 3 to 32 characters
    #[schema(example = "player_one")]
    username: String,
    /// Password, at least 8 characters
    password: String,
    /// Wallet the account's NFTs are minted to
    #[schema(value_type = String, example = "0x1234567890abcdef1234567890abcdef12345678")]
    wallet_address: Address,
}

/// Response for a successful registration
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    /// Newly assigned user ID
    pub id: i64,
    /// Registered login name
    pub username: String,
}

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Login name
    username: String,
    /// Password
    password: String,
}

/// Response carrying a freshly issued session token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Signed bearer token for subsequent requests
    pub token: String,
    /// When the token stops being accepted
    pub expires_at: DateTime<Utc>,
}

impl RegisterRequest {
    fn validate(&self) -> Result<(), ServerError> {
        let len = self.username.chars().count();
        if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) {
            return Err(ServerError::ValidationError(format!(
                "username must be between {MIN_USERNAME_LENGTH} and {MAX_USERNAME_LENGTH} characters"
            )));
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ServerError::ValidationError(format!(
                "password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }
        Ok(())
    }
}

/// Register a new account
///
/// Creates the user row together with a starting game profile so the game
/// client can load state immediately after login.
#[utoipa::path(
    post,
    path = "/v1/auth/register",
    tag = "auth",
    summary = "Register a new account",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Invalid username, password, or wallet address", body = String),
        (status = 409, description = "Username already taken", body = String)
    )
)]
pub async fn register_handler(
    State(state): State<ServerState>,
    JsonExtractor(request): JsonExtractor<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ServerError> {
    request.validate()?;

    let password_hash = auth::password::hash(&request.password)?;
    let wallet = request.wallet_address.to_checksum(None);

    let user = UserRepository::new(&state.db)
        .create(&request.username, &password_hash, &wallet)
        .await
        .inspect_err(|_| metrics::record_auth_outcome("register", "failure"))?;

    ProfileRepository::new(&state.db)
        .create_default(user.id)
        .await?;

    metrics::record_auth_outcome("register", "success");
    info!(user_id = user.id, username = %user.username, "account registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            username: user.username,
        }),
    ))
}

/// Log in and obtain a session token
///
/// A wrong username and a wrong password produce the same response, so the
/// endpoint cannot be used to enumerate accounts.
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    tag = "auth",
    summary = "Log in and obtain a session token",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Invalid username or password", body = String)
    )
)]
pub async fn login_handler(
    State(state): State<ServerState>,
    JsonExtractor(request): JsonExtractor<LoginRequest>,
) -> Result<Json<LoginResponse>, ServerError> {
    let invalid_credentials = || ServerError::Unauthorized {
        message: "invalid username or password".to_string(),
    };

    let user = UserRepository::new(&state.db)
        .find_by_username(&request.username)
        .await?
        .ok_or_else(|| {
            metrics::record_auth_outcome("login", "failure");
            invalid_credentials()
        })?;

    if !auth::password::verify(&request.password, &user.password_hash)? {
        metrics::record_auth_outcome("login", "failure");
        return Err(invalid_credentials());
    }

    let issued = state.tokens.issue(user.id, &user.username)?;
    metrics::record_auth_outcome("login", "success");

    Ok(Json(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at,
    }))
}
