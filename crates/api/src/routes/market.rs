// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Market order handlers.
//!
//! Listings reference minted equipment only; settlement happens elsewhere,
//! so the signature, nonce, and deadline are stored verbatim and never
//! interpreted here. Overdue open orders are expired before every query.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use shared_types::{Currency, OrderStatus};
use storage::{
    EquipItemRepository, NewOrder, OrderFilter, OrderRepository, entity::sell_order,
    order_currency, order_status,
};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::ServerError, extractors::JsonExtractor, metrics, middleware::CurrentUser,
    state::ServerState,
};

const DEFAULT_PAGE_SIZE: u64 = 20;
const MAX_PAGE_SIZE: u64 = 100;

/// Query parameters for the order listing
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListOrdersQuery {
    /// Only orders in this status
    status: Option<OrderStatus>,
    /// Only orders in this currency
    currency: Option<Currency>,
    /// Only orders listed by this seller
    seller_id: Option<i64>,
    /// Only orders selling items stamped from this catalog entry
    item_def_id: Option<i64>,
    /// Zero-indexed page number
    page: Option<u64>,
    /// Page size, capped at 100
    per_page: Option<u64>,
}

/// Request body for a new listing
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    /// Minted equipment instance to list
    equip_item_id: i64,
    /// Asking price, must be positive
    price: i64,
    /// Listing currency
    currency: Currency,
    /// Settlement signature, stored verbatim
    signature: String,
    /// Settlement nonce, stored verbatim
    nonce: i64,
    /// Unix-seconds expiry deadline, must be in the future
    deadline: i64,
}

/// Request body for a status change
#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderStatusRequest {
    /// Target status
    status: OrderStatus,
}

/// One order as returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    /// Order ID
    pub id: i64,
    /// Player who listed the item
    pub seller_id: i64,
    /// Equipment instance being sold
    pub equip_item_id: i64,
    /// Asking price
    pub price: i64,
    /// Listing currency
    pub currency: Currency,
    /// Current status
    pub status: OrderStatus,
    /// Unix-seconds expiry deadline
    pub deadline: i64,
}

/// One page of orders
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrdersPageResponse {
    /// Orders for this page, newest first
    pub orders: Vec<OrderResponse>,
    /// Total matching orders across all pages
    pub total: u64,
    /// Zero-indexed page number
    pub page: u64,
    /// Page size the query ran with
    pub per_page: u64,
}

impl OrderResponse {
    fn from_model(model: &sell_order::Model) -> Result<Self, ServerError> {
        Ok(Self {
            id: model.id,
            seller_id: model.seller_id,
            equip_item_id: model.equip_item_id,
            price: model.price,
            currency: order_currency(model)?,
            status: order_status(model)?,
            deadline: model.deadline,
        })
    }
}

impl CreateOrderRequest {
    fn validate(&self) -> Result<(), ServerError> {
        if self.price <= 0 {
            return Err(ServerError::ValidationError(
                "price must be positive".to_string(),
            ));
        }
        if self.signature.trim().is_empty() {
            return Err(ServerError::ValidationError(
                "signature cannot be empty".to_string(),
            ));
        }
        if self.deadline <= Utc::now().timestamp() {
            return Err(ServerError::ValidationError(
                "deadline must be in the future".to_string(),
            ));
        }
        Ok(())
    }
}

/// List market orders
#[utoipa::path(
    get,
    path = "/v1/market/orders",
    tag = "market",
    summary = "List market orders",
    params(ListOrdersQuery),
    responses(
        (status = 200, description = "One page of orders", body = OrdersPageResponse),
        (status = 401, description = "Missing or invalid token", body = String)
    ),
    security(("bearer_token" = []))
)]
pub async fn list_orders_handler(
    State(state): State<ServerState>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<OrdersPageResponse>, ServerError> {
    metrics::inc_requests("market");

    let repo = OrderRepository::new(&state.db);
    repo.expire_due(Utc::now().timestamp()).await?;

    let page = query.page.unwrap_or(0);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .min(MAX_PAGE_SIZE);

    let result = repo
        .list(
            OrderFilter {
                status: query.status,
                seller_id: query.seller_id,
                currency: query.currency,
                item_def_id: query.item_def_id,
            },
            page,
            per_page,
        )
        .await?;

    let orders = result
        .orders
        .iter()
        .map(OrderResponse::from_model)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(OrdersPageResponse {
        orders,
        total: result.total,
        page: result.page,
        per_page: result.per_page,
    }))
}

/// List one of the caller's minted items for sale
#[utoipa::path(
    post,
    path = "/v1/market/orders",
    tag = "market",
    summary = "List a minted equipment item for sale",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created in open status", body = OrderResponse),
        (status = 400, description = "Invalid price, signature, or deadline", body = String),
        (status = 401, description = "Missing or invalid token", body = String),
        (status = 404, description = "No such equipment item", body = String),
        (status = 409, description = "Item is not minted", body = String)
    ),
    security(("bearer_token" = []))
)]
pub async fn create_order_handler(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    JsonExtractor(request): JsonExtractor<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ServerError> {
    metrics::inc_requests("market");
    request.validate()?;

    // Only the caller's own minted items can be listed
    let item = EquipItemRepository::new(&state.db)
        .get(user.id, request.equip_item_id)
        .await?;
    if item.nft_token_id.is_none() {
        return Err(ServerError::Conflict {
            message: format!("equip item {} is not minted", item.id),
        });
    }

    let order = OrderRepository::new(&state.db)
        .create(NewOrder {
            seller_id: user.id,
            equip_item_id: request.equip_item_id,
            price: request.price,
            currency: request.currency,
            signature: request.signature,
            nonce: request.nonce,
            deadline: request.deadline,
        })
        .await?;

    info!(order_id = order.id, seller_id = user.id, "order created");

    Ok((StatusCode::CREATED, Json(OrderResponse::from_model(&order)?)))
}

/// Change one of the caller's orders to a new status
///
/// Only open orders move, and only their seller can move them. Orders
/// belonging to other players are reported as missing.
#[utoipa::path(
    post,
    path = "/v1/market/orders/{id}/status",
    tag = "market",
    summary = "Change the status of one of the caller's orders",
    params(("id" = i64, Path, description = "Order ID")),
    request_body = OrderStatusRequest,
    responses(
        (status = 200, description = "Order after the transition", body = OrderResponse),
        (status = 401, description = "Missing or invalid token", body = String),
        (status = 404, description = "No such order", body = String),
        (status = 409, description = "Transition not allowed from the current status", body = String)
    ),
    security(("bearer_token" = []))
)]
pub async fn order_status_handler(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    JsonExtractor(request): JsonExtractor<OrderStatusRequest>,
) -> Result<Json<OrderResponse>, ServerError> {
    metrics::inc_requests("market");

    let repo = OrderRepository::new(&state.db);
    // An overdue order must expire before the seller can move it
    repo.expire_due(Utc::now().timestamp()).await?;
    let order = repo.get(id).await?;
    if order.seller_id != user.id {
        return Err(ServerError::NotFound {
            resource: format!("sell order {id}"),
        });
    }

    let order = repo.set_status(id, request.status).await?;
    Ok(Json(OrderResponse::from_model(&order)?))
}
