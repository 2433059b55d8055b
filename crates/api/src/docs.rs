// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! `OpenAPI` document assembly.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::{routes, state};

/// Registers the bearer-token security scheme referenced by the handlers.
struct BearerTokenScheme;

impl Modify for BearerTokenScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Top-level `OpenAPI` document for the game API server
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Game API Server",
        description = "REST backend brokering between the game client, the blockchain server, and the AI server."
    ),
    paths(
        routes::handlers::health_handler,
        routes::auth::register_handler,
        routes::auth::login_handler,
        routes::items::list_items_handler,
        routes::items::get_item_handler,
        routes::items::create_item_handler,
        routes::inventory::list_equip_handler,
        routes::inventory::create_equip_handler,
        routes::inventory::update_equip_handler,
        routes::inventory::delete_equip_handler,
        routes::inventory::list_consumables_handler,
        routes::inventory::adjust_consumable_handler,
        routes::profile::get_profile_handler,
        routes::profile::update_profile_handler,
        routes::nft::mint_handler,
        routes::nft::burn_handler,
        routes::nft::lock_handler,
        routes::nft::transfer_handler,
        routes::nft::wallet_handler,
        routes::market::list_orders_handler,
        routes::market::create_order_handler,
        routes::market::order_status_handler,
        routes::ai::npc_chat_handler,
        routes::ai::material_handler,
    ),
    components(schemas(
        state::HealthCheck,
        state::ServiceHealth,
        routes::auth::RegisterRequest,
        routes::auth::RegisterResponse,
        routes::auth::LoginRequest,
        routes::auth::LoginResponse,
        routes::items::CreateItemRequest,
        routes::items::ItemDefResponse,
        routes::inventory::CreateEquipRequest,
        routes::inventory::UpdateEquipRequest,
        routes::inventory::EquipItemResponse,
        routes::inventory::AdjustConsumableRequest,
        routes::inventory::ConsumableResponse,
        routes::profile::ProfileResponse,
        routes::profile::UpdateProfileRequest,
        routes::nft::MintRequest,
        routes::nft::BurnRequest,
        routes::nft::LockRequest,
        routes::nft::TransferRequest,
        routes::nft::MintResponse,
        routes::nft::TxResponse,
        routes::nft::WalletTokenResponse,
        routes::nft::WalletResponse,
        routes::market::CreateOrderRequest,
        routes::market::OrderStatusRequest,
        routes::market::OrderResponse,
        routes::market::OrdersPageResponse,
    )),
    modifiers(&BearerTokenScheme),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Registration and login"),
        (name = "items", description = "Item catalog"),
        (name = "inventory", description = "Player inventory"),
        (name = "profile", description = "Game profile"),
        (name = "nft", description = "NFT brokering"),
        (name = "market", description = "Market orders"),
        (name = "ai", description = "AI server pass-through"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_builds() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/health"));
        assert!(doc.paths.paths.contains_key("/v1/auth/login"));
        assert!(doc.paths.paths.contains_key("/v1/nft/mint"));
        assert!(doc.paths.paths.contains_key("/v1/market/orders"));
    }
}
