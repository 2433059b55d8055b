// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Player inventory handlers.
//!
//! Equipment rows are unique instances stamped from a catalog entry;
//! consumables are fungible stacks keyed by catalog entry. Every query is
//! scoped to the authenticated caller.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use storage::{ConsumableRepository, EquipItemRepository, ItemDefRepository, entity::equip_item};
use utoipa::ToSchema;

use crate::{
    error::ServerError, extractors::JsonExtractor, metrics, middleware::CurrentUser,
    state::ServerState,
};

/// Request body for granting a new equipment instance
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEquipRequest {
    /// Catalog entry the item is stamped from
    item_def_id: i64,
    /// Starting enhancement level
    #[serde(default)]
    enhancement_level: i32,
    /// Additional enhancement attributes (sockets, rerolled stats)
    #[serde(default = "default_enhancement_data")]
    enhancement_data: serde_json::Value,
}

fn default_enhancement_data() -> serde_json::Value {
    serde_json::json!({})
}

/// One equipment instance as returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EquipItemResponse {
    /// Instance ID
    pub id: i64,
    /// Catalog entry the item is stamped from
    pub item_def_id: i64,
    /// Current enhancement level
    pub enhancement_level: i32,
    /// Enhancement attributes
    #[schema(value_type = Object)]
    pub enhancement_data: serde_json::Value,
    /// On-chain token ID when the item has been minted
    pub nft_token_id: Option<String>,
}

impl From<equip_item::Model> for EquipItemResponse {
    fn from(model: equip_item::Model) -> Self {
        Self {
            id: model.id,
            item_def_id: model.item_def_id,
            enhancement_level: model.enhancement_level,
            enhancement_data: model.enhancement_data,
            nft_token_id: model.nft_token_id,
        }
    }
}

/// Request body for updating an item's enhancement state
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEquipRequest {
    /// New enhancement level
    enhancement_level: i32,
    /// New enhancement attributes
    #[schema(value_type = Object)]
    enhancement_data: serde_json::Value,
}

/// Request body for adjusting a consumable stack
#[derive(Debug, Deserialize, ToSchema)]
pub struct AdjustConsumableRequest {
    /// Catalog entry of the consumable
    item_def_id: i64,
    /// Amount to add (positive) or spend (negative); must be non-zero
    delta: i32,
}

/// One consumable stack as returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConsumableResponse {
    /// Catalog entry of the consumable
    pub item_def_id: i64,
    /// Quantity currently held
    pub quantity: i32,
}

/// List the caller's equipment
#[utoipa::path(
    get,
    path = "/v1/inventory/equip",
    tag = "inventory",
    summary = "List the caller's equipment items",
    responses(
        (status = 200, description = "Equipment instances", body = Vec<EquipItemResponse>),
        (status = 401, description = "Missing or invalid token", body = String)
    ),
    security(("bearer_token" = []))
)]
pub async fn list_equip_handler(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<EquipItemResponse>>, ServerError> {
    metrics::inc_requests("inventory");
    let items = EquipItemRepository::new(&state.db)
        .list_for_user(user.id)
        .await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// Grant the caller a new equipment instance
#[utoipa::path(
    post,
    path = "/v1/inventory/equip",
    tag = "inventory",
    summary = "Grant the caller a new equipment item",
    request_body = CreateEquipRequest,
    responses(
        (status = 201, description = "Equipment instance created", body = EquipItemResponse),
        (status = 400, description = "Invalid request", body = String),
        (status = 401, description = "Missing or invalid token", body = String),
        (status = 404, description = "No such item definition", body = String)
    ),
    security(("bearer_token" = []))
)]
pub async fn create_equip_handler(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    JsonExtractor(request): JsonExtractor<CreateEquipRequest>,
) -> Result<(StatusCode, Json<EquipItemResponse>), ServerError> {
    metrics::inc_requests("inventory");

    if request.enhancement_level < 0 {
        return Err(ServerError::ValidationError(
            "enhancement level cannot be negative".to_string(),
        ));
    }
    if !request.enhancement_data.is_object() {
        return Err(ServerError::ValidationError(
            "enhancement data must be a JSON object".to_string(),
        ));
    }

    // Reject unknown catalog entries up front
    ItemDefRepository::new(&state.db)
        .get(request.item_def_id)
        .await?;

    let item = EquipItemRepository::new(&state.db)
        .create(
            user.id,
            request.item_def_id,
            request.enhancement_level,
            request.enhancement_data,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(item.into())))
}

/// Overwrite the enhancement state of one of the caller's equipment items
#[utoipa::path(
    put,
    path = "/v1/inventory/equip/{id}",
    tag = "inventory",
    summary = "Update an equipment item's enhancement state",
    params(("id" = i64, Path, description = "Equipment instance ID")),
    request_body = UpdateEquipRequest,
    responses(
        (status = 200, description = "Equipment instance after the update", body = EquipItemResponse),
        (status = 400, description = "Invalid request", body = String),
        (status = 401, description = "Missing or invalid token", body = String),
        (status = 404, description = "No such equipment item", body = String)
    ),
    security(("bearer_token" = []))
)]
pub async fn update_equip_handler(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    JsonExtractor(request): JsonExtractor<UpdateEquipRequest>,
) -> Result<Json<EquipItemResponse>, ServerError> {
    metrics::inc_requests("inventory");

    if request.enhancement_level < 0 {
        return Err(ServerError::ValidationError(
            "enhancement level cannot be negative".to_string(),
        ));
    }
    if !request.enhancement_data.is_object() {
        return Err(ServerError::ValidationError(
            "enhancement data must be a JSON object".to_string(),
        ));
    }

    let item = EquipItemRepository::new(&state.db)
        .update_enhancement(
            user.id,
            id,
            request.enhancement_level,
            request.enhancement_data,
        )
        .await?;
    Ok(Json(item.into()))
}

/// Delete one of the caller's equipment items
///
/// Items carrying an NFT token are refused; the token must be burned first
/// so the database never drops an item the chain still knows about.
#[utoipa::path(
    delete,
    path = "/v1/inventory/equip/{id}",
    tag = "inventory",
    summary = "Delete one of the caller's equipment items",
    params(("id" = i64, Path, description = "Equipment instance ID")),
    responses(
        (status = 204, description = "Equipment instance deleted"),
        (status = 401, description = "Missing or invalid token", body = String),
        (status = 404, description = "No such equipment item", body = String),
        (status = 409, description = "Item is minted as an NFT", body = String)
    ),
    security(("bearer_token" = []))
)]
pub async fn delete_equip_handler(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    metrics::inc_requests("inventory");
    EquipItemRepository::new(&state.db)
        .delete(user.id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the caller's consumable stacks
#[utoipa::path(
    get,
    path = "/v1/inventory/consumables",
    tag = "inventory",
    summary = "List the caller's consumable stacks",
    responses(
        (status = 200, description = "Consumable stacks", body = Vec<ConsumableResponse>),
        (status = 401, description = "Missing or invalid token", body = String)
    ),
    security(("bearer_token" = []))
)]
pub async fn list_consumables_handler(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<ConsumableResponse>>, ServerError> {
    metrics::inc_requests("inventory");
    let stacks = ConsumableRepository::new(&state.db)
        .list_for_user(user.id)
        .await?;
    Ok(Json(
        stacks
            .into_iter()
            .map(|stack| ConsumableResponse {
                item_def_id: stack.item_def_id,
                quantity: stack.quantity,
            })
            .collect(),
    ))
}

/// Adjust a consumable stack by a signed delta
///
/// A positive delta grants, a negative delta spends. Spending below zero is
/// rejected without changing the stack.
#[utoipa::path(
    post,
    path = "/v1/inventory/consumables",
    tag = "inventory",
    summary = "Grant or spend consumables",
    request_body = AdjustConsumableRequest,
    responses(
        (status = 200, description = "Stack after the adjustment", body = ConsumableResponse),
        (status = 400, description = "Zero delta or insufficient quantity", body = String),
        (status = 401, description = "Missing or invalid token", body = String),
        (status = 404, description = "No such item definition or stack", body = String)
    ),
    security(("bearer_token" = []))
)]
pub async fn adjust_consumable_handler(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    JsonExtractor(request): JsonExtractor<AdjustConsumableRequest>,
) -> Result<Json<ConsumableResponse>, ServerError> {
    metrics::inc_requests("inventory");

    if request.delta == 0 {
        return Err(ServerError::ValidationError(
            "delta must be non-zero".to_string(),
        ));
    }

    let repo = ConsumableRepository::new(&state.db);
    let stack = if request.delta > 0 {
        // Granting an unknown consumable would create an orphan stack
        ItemDefRepository::new(&state.db)
            .get(request.item_def_id)
            .await?;
        repo.grant(user.id, request.item_def_id, request.delta)
            .await?
    } else {
        // i32::MIN has no positive counterpart
        let amount = request.delta.checked_neg().ok_or_else(|| {
            ServerError::ValidationError("delta is out of range".to_string())
        })?;
        repo.consume(user.id, request.item_def_id, amount).await?
    };

    Ok(Json(ConsumableResponse {
        item_def_id: stack.item_def_id,
        quantity: stack.quantity,
    }))
}
