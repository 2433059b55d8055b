// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Game profile handlers.
//!
//! The profile is written wholesale by the game client and guarded by an
//! optimistic-lock version counter, so two clients on the same account
//! cannot silently overwrite each other's saves.

use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};
use storage::{ProfileRepository, ProfileUpdate, entity::game_profile};
use utoipa::ToSchema;

use crate::{
    error::ServerError, extractors::JsonExtractor, metrics, middleware::CurrentUser,
    state::ServerState,
};

/// Profile state as stored and returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    /// Character level
    pub level: i32,
    /// Accumulated experience points
    pub experience: i64,
    /// Soft-currency balance
    pub gold: i64,
    /// Equipped item layout, a JSON object mapping slot to equip item ID
    #[schema(value_type = Object)]
    pub equipped: serde_json::Value,
    /// Unlocked skills, a JSON array
    #[schema(value_type = Vec<Object>)]
    pub skills: serde_json::Value,
    /// Optimistic-lock version; echo it back on the next write
    pub version: i32,
}

/// Profile replacement request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    /// Character level
    level: i32,
    /// Accumulated experience points
    experience: i64,
    /// Soft-currency balance
    gold: i64,
    /// Equipped item layout
    #[schema(value_type = Object)]
    equipped: serde_json::Value,
    /// Unlocked skills
    #[schema(value_type = Vec<Object>)]
    skills: serde_json::Value,
    /// Version the client last read; the write is rejected when stale
    version: i32,
}

impl From<game_profile::Model> for ProfileResponse {
    fn from(model: game_profile::Model) -> Self {
        Self {
            level: model.level,
            experience: model.experience,
            gold: model.gold,
            equipped: model.equipped,
            skills: model.skills,
            version: model.version,
        }
    }
}

impl UpdateProfileRequest {
    fn validate(&self) -> Result<(), ServerError> {
        if self.level < 1 {
            return Err(ServerError::ValidationError(
                "level must be at least 1".to_string(),
            ));
        }
        if self.experience < 0 || self.gold < 0 {
            return Err(ServerError::ValidationError(
                "experience and gold cannot be negative".to_string(),
            ));
        }
        if !self.equipped.is_object() {
            return Err(ServerError::ValidationError(
                "equipped must be a JSON object".to_string(),
            ));
        }
        if !self.skills.is_array() {
            return Err(ServerError::ValidationError(
                "skills must be a JSON array".to_string(),
            ));
        }
        Ok(())
    }
}

/// Fetch the caller's profile
#[utoipa::path(
    get,
    path = "/v1/profile",
    tag = "profile",
    summary = "Fetch the caller's game profile",
    responses(
        (status = 200, description = "Current profile state", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token", body = String)
    ),
    security(("bearer_token" = []))
)]
pub async fn get_profile_handler(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ProfileResponse>, ServerError> {
    metrics::inc_requests("profile");
    let profile = ProfileRepository::new(&state.db)
        .get_by_user(user.id)
        .await?;
    Ok(Json(profile.into()))
}

/// Replace the caller's profile
///
/// The write only lands when `version` matches the stored counter; a stale
/// version yields 409 so the client can re-fetch and retry.
#[utoipa::path(
    put,
    path = "/v1/profile",
    tag = "profile",
    summary = "Replace the caller's game profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile after the write", body = ProfileResponse),
        (status = 400, description = "Invalid profile state", body = String),
        (status = 401, description = "Missing or invalid token", body = String),
        (status = 409, description = "Version is stale", body = String)
    ),
    security(("bearer_token" = []))
)]
pub async fn update_profile_handler(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    JsonExtractor(request): JsonExtractor<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ServerError> {
    metrics::inc_requests("profile");
    request.validate()?;

    let profile = ProfileRepository::new(&state.db)
        .update(
            user.id,
            request.version,
            ProfileUpdate {
                level: request.level,
                experience: request.experience,
                gold: request.gold,
                equipped: request.equipped,
                skills: request.skills,
            },
        )
        .await?;

    Ok(Json(profile.into()))
}
