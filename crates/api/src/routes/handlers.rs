// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP request handlers module
//!
//! Cross-cutting handlers that do not belong to a single API area.

use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    error::ServerError,
    state::{HealthCheck, ServerState},
};

/// Health check endpoint handler
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Health check endpoint",
    description = "Returns the current health status of the API service including the database connection and every configured upstream service (blockchain server, AI server).",
    responses(
        (status = 200, description = "Service health report", body = HealthCheck)
    )
)]
pub async fn health_handler(
    State(state): State<ServerState>,
) -> Result<impl IntoResponse, ServerError> {
    let health = state.health_check().await;
    Ok(Json(health))
}
