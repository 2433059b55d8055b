// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! AI server pass-through handlers.
//!
//! The game client talks to the AI server through these endpoints so the AI
//! server's credentials never reach the client. Payloads are forwarded and
//! returned verbatim; the broker adds authentication and metrics only.

use std::time::Instant;

use axum::{Json, extract::State};

use crate::{error::ServerError, extractors::JsonExtractor, metrics, state::ServerState};

async fn forward<F>(operation: &str, call: F) -> Result<Json<serde_json::Value>, ServerError>
where
    F: Future<Output = Result<serde_json::Value, external_apis::AiError>>,
{
    let started = Instant::now();
    let result = call.await;
    let outcome = if result.is_ok() { "success" } else { "error" };
    metrics::observe_upstream_duration("ai", operation, outcome, started.elapsed().as_secs_f64());
    Ok(Json(result?))
}

/// Relay an NPC chat exchange to the AI server
#[utoipa::path(
    post,
    path = "/v1/ai/npc-chat",
    tag = "ai",
    summary = "Relay an NPC chat exchange to the AI server",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "AI server response, returned verbatim", body = serde_json::Value),
        (status = 401, description = "Missing or invalid token", body = String),
        (status = 502, description = "AI server failure", body = String),
        (status = 503, description = "AI server not configured", body = String)
    ),
    security(("bearer_token" = []))
)]
pub async fn npc_chat_handler(
    State(state): State<ServerState>,
    JsonExtractor(payload): JsonExtractor<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ServerError> {
    metrics::inc_requests("ai");
    let client = state.registry.ai()?;
    forward("npc_chat", client.npc_chat(&payload)).await
}

/// Relay a material generation request to the AI server
#[utoipa::path(
    post,
    path = "/v1/ai/material",
    tag = "ai",
    summary = "Relay a material generation request to the AI server",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "AI server response, returned verbatim", body = serde_json::Value),
        (status = 401, description = "Missing or invalid token", body = String),
        (status = 502, description = "AI server failure", body = String),
        (status = 503, description = "AI server not configured", body = String)
    ),
    security(("bearer_token" = []))
)]
pub async fn material_handler(
    State(state): State<ServerState>,
    JsonExtractor(payload): JsonExtractor<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ServerError> {
    metrics::inc_requests("ai");
    let client = state.registry.ai()?;
    forward("generate_material", client.generate_material(&payload)).await
}
