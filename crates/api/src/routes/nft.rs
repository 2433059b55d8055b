// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! NFT brokering handlers.
//!
//! These endpoints bridge equipment rows to the blockchain server. The
//! database is only mutated after the upstream call succeeds, so a failed
//! chain operation never leaves the local state claiming a token that was
//! not minted, or missing one that was not burned.

use std::{collections::HashMap, time::Instant};

use alloy_primitives::Address;
use api_client::TokenMetadata;
use axum::{Extension, Json, extract::State};
use external_apis::ChainClient;
use serde::{Deserialize, Serialize};
use storage::{EquipItemRepository, ItemDefRepository, UserRepository, entity::equip_item, item_kind};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::{
    error::ServerError,
    extractors::JsonExtractor,
    metrics,
    middleware::CurrentUser,
    routes::inventory::EquipItemResponse,
    state::ServerState,
};

/// Request naming one equipment instance
#[derive(Debug, Deserialize, ToSchema)]
pub struct MintRequest {
    /// Equipment instance to mint
    equip_item_id: i64,
}

/// Request naming one equipment instance
#[derive(Debug, Deserialize, ToSchema)]
pub struct BurnRequest {
    /// Equipment instance whose token is burned
    equip_item_id: i64,
}

/// Lock or unlock a minted item's token
#[derive(Debug, Deserialize, ToSchema)]
pub struct LockRequest {
    /// Equipment instance whose token is locked
    equip_item_id: i64,
    /// Desired lock state
    locked: bool,
}

/// Transfer a minted item's token to another wallet
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransferRequest {
    /// Equipment instance whose token is transferred
    equip_item_id: i64,
    /// Destination wallet
    #[schema(value_type = String, example = "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd")]
    to_wallet: Address,
}

/// Result of a mint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MintResponse {
    /// Token ID now attached to the item
    pub token_id: String,
    /// Transaction hash of the mint
    pub tx_hash: String,
    /// The item after the token was attached
    pub item: EquipItemResponse,
}

/// Acknowledgement for burn, lock, and transfer operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TxResponse {
    /// Transaction hash of the submitted operation
    pub tx_hash: String,
}

/// One wallet entry in the reconciliation report
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WalletTokenResponse {
    /// Token ID as reported by the chain
    pub token_id: String,
    /// Whether the token is locked against transfers
    pub locked: bool,
    /// Matching equipment item, absent when the token is unknown locally
    pub item: Option<EquipItemResponse>,
}

/// Response for the wallet listing endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WalletResponse {
    /// Wallet address that was queried
    pub wallet: String,
    /// Tokens the chain reports for the wallet
    pub tokens: Vec<WalletTokenResponse>,
    /// Local token IDs cleared because the chain no longer reports them
    pub stale_cleared: u64,
}

/// Fetches an item and insists it carries a token.
async fn minted_item(
    state: &ServerState,
    user_id: i64,
    equip_item_id: i64,
) -> Result<(equip_item::Model, String), ServerError> {
    let item = EquipItemRepository::new(&state.db)
        .get(user_id, equip_item_id)
        .await?;
    let Some(token_id) = item.nft_token_id.clone() else {
        return Err(ServerError::Conflict {
            message: format!("equip item {equip_item_id} is not minted"),
        });
    };
    Ok((item, token_id))
}

/// Parses the wallet address stored on the user row.
fn stored_wallet(wallet_address: &str) -> Result<Address, ServerError> {
    wallet_address
        .parse::<Address>()
        .map_err(|e| ServerError::Internal {
            message: format!("stored wallet address is malformed: {e}"),
        })
}

async fn timed_chain_call<T, F>(operation: &str, call: F) -> Result<T, ServerError>
where
    F: Future<Output = Result<T, external_apis::ChainError>>,
{
    let started = Instant::now();
    let result = call.await;
    let outcome = if result.is_ok() { "success" } else { "error" };
    metrics::observe_upstream_duration("chain", operation, outcome, started.elapsed().as_secs_f64());
    Ok(result?)
}

fn chain_client(state: &ServerState) -> Result<&ChainClient, ServerError> {
    Ok(state.registry.chain()?)
}

/// Mint an equipment item as an NFT
///
/// Builds the token metadata from the catalog entry plus the item's
/// enhancement state, asks the blockchain server to mint it to the caller's
/// wallet, and attaches the returned token ID to the item.
#[utoipa::path(
    post,
    path = "/v1/nft/mint",
    tag = "nft",
    summary = "Mint an equipment item as an NFT",
    request_body = MintRequest,
    responses(
        (status = 200, description = "Token minted and attached", body = MintResponse),
        (status = 401, description = "Missing or invalid token", body = String),
        (status = 404, description = "No such equipment item", body = String),
        (status = 409, description = "Item is already minted", body = String),
        (status = 502, description = "Blockchain server failure, nothing was changed", body = String),
        (status = 503, description = "Blockchain server not configured", body = String)
    ),
    security(("bearer_token" = []))
)]
pub async fn mint_handler(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    JsonExtractor(request): JsonExtractor<MintRequest>,
) -> Result<Json<MintResponse>, ServerError> {
    metrics::inc_requests("nft");

    let items = EquipItemRepository::new(&state.db);
    let item = items.get(user.id, request.equip_item_id).await?;

    if let Some(token_id) = &item.nft_token_id {
        return Err(ServerError::Conflict {
            message: format!(
                "equip item {} is already minted as token {token_id}",
                item.id
            ),
        });
    }

    let def = ItemDefRepository::new(&state.db).get(item.item_def_id).await?;
    let account = UserRepository::new(&state.db).get(user.id).await?;
    let wallet = stored_wallet(&account.wallet_address)?;

    let attributes: HashMap<String, serde_json::Value> = item
        .enhancement_data
        .as_object()
        .map(|map| map.clone().into_iter().collect())
        .unwrap_or_default();

    let metadata = TokenMetadata {
        name: def.name.clone(),
        kind: item_kind(&def)?,
        attack: def.attack,
        defense: def.defense,
        rarity: def.rarity,
        enhancement_level: item.enhancement_level,
        attributes,
    };

    let client = chain_client(&state)?;
    let receipt = timed_chain_call("mint", client.mint_token(wallet, &metadata)).await?;

    // The chain accepted the mint; only now does the row change
    let item = items.attach_token(user.id, item.id, &receipt.token_id).await?;

    info!(
        user_id = user.id,
        equip_item_id = item.id,
        token_id = %receipt.token_id,
        tx_hash = %receipt.tx_hash,
        "item minted"
    );

    Ok(Json(MintResponse {
        token_id: receipt.token_id,
        tx_hash: receipt.tx_hash,
        item: item.into(),
    }))
}

/// Burn an item's NFT token
///
/// The token is detached only after the blockchain server confirms the
/// burn, returning the item to plain database-only state.
#[utoipa::path(
    post,
    path = "/v1/nft/burn",
    tag = "nft",
    summary = "Burn an equipment item's NFT token",
    request_body = BurnRequest,
    responses(
        (status = 200, description = "Token burned and detached", body = TxResponse),
        (status = 401, description = "Missing or invalid token", body = String),
        (status = 404, description = "No such equipment item", body = String),
        (status = 409, description = "Item is not minted", body = String),
        (status = 502, description = "Blockchain server failure, nothing was changed", body = String),
        (status = 503, description = "Blockchain server not configured", body = String)
    ),
    security(("bearer_token" = []))
)]
pub async fn burn_handler(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    JsonExtractor(request): JsonExtractor<BurnRequest>,
) -> Result<Json<TxResponse>, ServerError> {
    metrics::inc_requests("nft");

    let (item, token_id) = minted_item(&state, user.id, request.equip_item_id).await?;

    let client = chain_client(&state)?;
    let ack = timed_chain_call("burn", client.burn_token(&token_id)).await?;

    EquipItemRepository::new(&state.db)
        .detach_token(user.id, item.id)
        .await?;

    info!(
        user_id = user.id,
        equip_item_id = item.id,
        token_id = %token_id,
        tx_hash = %ack.tx_hash,
        "token burned"
    );

    Ok(Json(TxResponse {
        tx_hash: ack.tx_hash,
    }))
}

/// Lock or unlock an item's NFT token
///
/// Locking is purely an on-chain state; no local row changes.
#[utoipa::path(
    post,
    path = "/v1/nft/lock",
    tag = "nft",
    summary = "Lock or unlock an equipment item's NFT token",
    request_body = LockRequest,
    responses(
        (status = 200, description = "Lock state submitted", body = TxResponse),
        (status = 401, description = "Missing or invalid token", body = String),
        (status = 404, description = "No such equipment item", body = String),
        (status = 409, description = "Item is not minted", body = String),
        (status = 502, description = "Blockchain server failure", body = String),
        (status = 503, description = "Blockchain server not configured", body = String)
    ),
    security(("bearer_token" = []))
)]
pub async fn lock_handler(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    JsonExtractor(request): JsonExtractor<LockRequest>,
) -> Result<Json<TxResponse>, ServerError> {
    metrics::inc_requests("nft");

    let (_, token_id) = minted_item(&state, user.id, request.equip_item_id).await?;

    let client = chain_client(&state)?;
    let ack = timed_chain_call("lock", client.lock_token(&token_id, request.locked)).await?;

    Ok(Json(TxResponse {
        tx_hash: ack.tx_hash,
    }))
}

/// Transfer an item's NFT token to another wallet
///
/// On success the local token ID is cleared: the item has left the
/// caller's custody, so the row no longer claims it.
#[utoipa::path(
    post,
    path = "/v1/nft/transfer",
    tag = "nft",
    summary = "Transfer an equipment item's NFT token to another wallet",
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Transfer submitted, local token cleared", body = TxResponse),
        (status = 400, description = "Invalid destination wallet", body = String),
        (status = 401, description = "Missing or invalid token", body = String),
        (status = 404, description = "No such equipment item", body = String),
        (status = 409, description = "Item is not minted", body = String),
        (status = 502, description = "Blockchain server failure, nothing was changed", body = String),
        (status = 503, description = "Blockchain server not configured", body = String)
    ),
    security(("bearer_token" = []))
)]
pub async fn transfer_handler(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    JsonExtractor(request): JsonExtractor<TransferRequest>,
) -> Result<Json<TxResponse>, ServerError> {
    metrics::inc_requests("nft");

    if request.to_wallet == Address::ZERO {
        return Err(ServerError::ValidationError(
            "cannot transfer to the zero address".to_string(),
        ));
    }

    let (item, token_id) = minted_item(&state, user.id, request.equip_item_id).await?;

    let client = chain_client(&state)?;
    let ack = timed_chain_call(
        "transfer",
        client.transfer_token(&token_id, request.to_wallet),
    )
    .await?;

    EquipItemRepository::new(&state.db)
        .detach_token(user.id, item.id)
        .await?;

    info!(
        user_id = user.id,
        equip_item_id = item.id,
        token_id = %token_id,
        to_wallet = %request.to_wallet,
        tx_hash = %ack.tx_hash,
        "token transferred out"
    );

    Ok(Json(TxResponse {
        tx_hash: ack.tx_hash,
    }))
}

/// List and reconcile the caller's wallet
///
/// The chain's view is authoritative: local rows claiming a token the chain
/// no longer reports are cleared, and tokens the chain reports without a
/// matching row are returned with no item data rather than invented.
#[utoipa::path(
    get,
    path = "/v1/nft/wallet",
    tag = "nft",
    summary = "List the caller's wallet tokens, reconciling local state",
    responses(
        (status = 200, description = "Wallet contents after reconciliation", body = WalletResponse),
        (status = 401, description = "Missing or invalid token", body = String),
        (status = 502, description = "Blockchain server failure, nothing was changed", body = String),
        (status = 503, description = "Blockchain server not configured", body = String)
    ),
    security(("bearer_token" = []))
)]
pub async fn wallet_handler(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<WalletResponse>, ServerError> {
    metrics::inc_requests("nft");

    let account = UserRepository::new(&state.db).get(user.id).await?;
    let wallet = stored_wallet(&account.wallet_address)?;

    let client = chain_client(&state)?;
    let upstream = timed_chain_call("wallet_tokens", client.wallet_tokens(wallet)).await?;

    let items = EquipItemRepository::new(&state.db);
    let token_ids: Vec<String> = upstream.iter().map(|t| t.token_id.clone()).collect();
    let stale_cleared = items.detach_tokens_not_in(user.id, &token_ids).await?;

    if stale_cleared > 0 {
        warn!(
            user_id = user.id,
            stale_cleared, "cleared token ids the chain no longer reports"
        );
    }

    let mut tokens = Vec::with_capacity(upstream.len());
    for token in upstream {
        let item = items
            .find_by_token(&token.token_id)
            .await?
            .filter(|item| item.user_id == user.id)
            .map(EquipItemResponse::from);
        tokens.push(WalletTokenResponse {
            token_id: token.token_id,
            locked: token.locked,
            item,
        });
    }

    Ok(Json(WalletResponse {
        wallet: account.wallet_address,
        tokens,
        stale_cleared,
    }))
}
