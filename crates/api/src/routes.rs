// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Routes module
//!
//! This module provides route configuration and handlers for the game API
//! server. Everything under `/v1` except the auth endpoints requires a
//! bearer token.

pub mod ai;
pub mod auth;
pub mod handlers;
pub mod inventory;
pub mod items;
pub mod market;
pub mod nft;
pub mod profile;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use handlers::health_handler;

use crate::{
    metrics::metrics_handler,
    middleware::{RateLimiter, auth_middleware, rate_limiting_middleware},
    openapi::{openapi_spec, swagger_ui},
    state::ServerState,
};

/// Create application routes with conditional rate limiting
#[allow(clippy::needless_pass_by_value)] // We need to clone the rate limiter for middleware
pub fn create_routes(rate_limiter: RateLimiter, state: ServerState) -> Router<ServerState> {
    // Health and metrics endpoints are not rate limited for monitoring purposes
    let health_routes = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler));

    // Documentation endpoints are not rate limited
    let docs_routes = Router::new()
        .route("/api-doc/openapi.json", get(openapi_spec))
        .route("/swagger-ui", get(swagger_ui));

    // Registration and login are the only unauthenticated API endpoints
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/login", post(auth::login_handler));

    let protected_routes = Router::new()
        .route("/items", get(items::list_items_handler))
        .route("/items", post(items::create_item_handler))
        .route("/items/{id}", get(items::get_item_handler))
        .route("/inventory/equip", get(inventory::list_equip_handler))
        .route("/inventory/equip", post(inventory::create_equip_handler))
        .route(
            "/inventory/equip/{id}",
            put(inventory::update_equip_handler).delete(inventory::delete_equip_handler),
        )
        .route(
            "/inventory/consumables",
            get(inventory::list_consumables_handler),
        )
        .route(
            "/inventory/consumables",
            post(inventory::adjust_consumable_handler),
        )
        .route("/profile", get(profile::get_profile_handler))
        .route("/profile", put(profile::update_profile_handler))
        .route("/nft/mint", post(nft::mint_handler))
        .route("/nft/burn", post(nft::burn_handler))
        .route("/nft/lock", post(nft::lock_handler))
        .route("/nft/transfer", post(nft::transfer_handler))
        .route("/nft/wallet", get(nft::wallet_handler))
        .route("/market/orders", get(market::list_orders_handler))
        .route("/market/orders", post(market::create_order_handler))
        .route(
            "/market/orders/{id}/status",
            post(market::order_status_handler),
        )
        .route("/ai/npc-chat", post(ai::npc_chat_handler))
        .route("/ai/material", post(ai::material_handler))
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    // API endpoints - conditionally apply rate limiting
    let mut api_routes = Router::new().merge(public_routes).merge(protected_routes);

    // Only apply rate limiting middleware if enabled
    if rate_limiter.is_enabled() {
        api_routes = api_routes.layer(middleware::from_fn_with_state(
            rate_limiter.clone(),
            rate_limiting_middleware,
        ));
    }

    let v1 = Router::new().nest("/v1", api_routes);

    Router::new()
        .merge(health_routes)
        .merge(docs_routes)
        .merge(v1)
}
