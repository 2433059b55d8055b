// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Item catalog handlers.
//!
//! The catalog holds the static definitions that equipment and consumable
//! instances are stamped from.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use shared_types::ItemKind;
use storage::{ItemDefRepository, NewItemDef, entity::item_def, item_kind};
use utoipa::ToSchema;

use crate::{error::ServerError, extractors::JsonExtractor, metrics, state::ServerState};

/// Request body for a new catalog entry
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateItemRequest {
    /// Display name
    #[schema(example = "Iron Sword")]
    name: String,
    /// Item category
    kind: ItemKind,
    /// Base attack stat
    attack: i32,
    /// Base defense stat
    defense: i32,
    /// Rarity tier, 1 and up
    rarity: i32,
}

/// One catalog entry as returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ItemDefResponse {
    /// Catalog entry ID
    pub id: i64,
    /// Display name
    pub name: String,
    /// Item category
    pub kind: ItemKind,
    /// Base attack stat
    pub attack: i32,
    /// Base defense stat
    pub defense: i32,
    /// Rarity tier
    pub rarity: i32,
}

impl ItemDefResponse {
    pub(crate) fn from_model(model: &item_def::Model) -> Result<Self, ServerError> {
        Ok(Self {
            id: model.id,
            name: model.name.clone(),
            kind: item_kind(model)?,
            attack: model.attack,
            defense: model.defense,
            rarity: model.rarity,
        })
    }
}

impl CreateItemRequest {
    fn validate(&self) -> Result<(), ServerError> {
        if self.name.trim().is_empty() {
            return Err(ServerError::ValidationError(
                "item name cannot be empty".to_string(),
            ));
        }
        if self.rarity < 1 {
            return Err(ServerError::ValidationError(
                "rarity must be at least 1".to_string(),
            ));
        }
        if self.attack < 0 || self.defense < 0 {
            return Err(ServerError::ValidationError(
                "stats cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// List the item catalog
#[utoipa::path(
    get,
    path = "/v1/items",
    tag = "items",
    summary = "List all item definitions",
    responses(
        (status = 200, description = "Catalog entries", body = Vec<ItemDefResponse>),
        (status = 401, description = "Missing or invalid token", body = String)
    ),
    security(("bearer_token" = []))
)]
pub async fn list_items_handler(
    State(state): State<ServerState>,
) -> Result<Json<Vec<ItemDefResponse>>, ServerError> {
    metrics::inc_requests("items");
    let defs = ItemDefRepository::new(&state.db).list().await?;
    let response = defs
        .iter()
        .map(ItemDefResponse::from_model)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(response))
}

/// Fetch one item definition
#[utoipa::path(
    get,
    path = "/v1/items/{id}",
    tag = "items",
    summary = "Fetch one item definition",
    params(("id" = i64, Path, description = "Catalog entry ID")),
    responses(
        (status = 200, description = "Catalog entry", body = ItemDefResponse),
        (status = 401, description = "Missing or invalid token", body = String),
        (status = 404, description = "No such item definition", body = String)
    ),
    security(("bearer_token" = []))
)]
pub async fn get_item_handler(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<ItemDefResponse>, ServerError> {
    metrics::inc_requests("items");
    let def = ItemDefRepository::new(&state.db).get(id).await?;
    Ok(Json(ItemDefResponse::from_model(&def)?))
}

/// Create a catalog entry
#[utoipa::path(
    post,
    path = "/v1/items",
    tag = "items",
    summary = "Create an item definition",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Catalog entry created", body = ItemDefResponse),
        (status = 400, description = "Invalid item definition", body = String),
        (status = 401, description = "Missing or invalid token", body = String)
    ),
    security(("bearer_token" = []))
)]
pub async fn create_item_handler(
    State(state): State<ServerState>,
    JsonExtractor(request): JsonExtractor<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemDefResponse>), ServerError> {
    metrics::inc_requests("items");
    request.validate()?;

    let def = ItemDefRepository::new(&state.db)
        .create(NewItemDef {
            name: request.name,
            kind: request.kind,
            attack: request.attack,
            defense: request.defense,
            rarity: request.rarity,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ItemDefResponse::from_model(&def)?)))
}
