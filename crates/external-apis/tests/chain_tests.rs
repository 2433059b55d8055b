// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for `ChainClient`
//!
//! These tests use wiremock to mock the blockchain server and exercise the
//! client behavior across success, not-found, auth, and timeout scenarios.

use std::collections::HashMap;

use alloy_primitives::Address;
use api_client::{ApiClient, HealthStatus, TokenMetadata};
use external_apis::{ChainClient, ChainConfig, ChainError};
use serde_json::json;
use shared_types::ItemKind;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

const TEST_TIMEOUT_SECONDS: u64 = 10;
const TEST_HEALTH_CHECK_TIMEOUT_SECONDS: u64 = 2;
const TEST_MAX_RETRIES: u32 = 1;

/// Create a test `ChainConfig` with the mock server URL
fn create_test_config(base_url: String) -> ChainConfig {
    ChainConfig {
        base_url,
        api_key: "test-api-key".to_string(),
        timeout_seconds: TEST_TIMEOUT_SECONDS,
        health_check_timeout_seconds: TEST_HEALTH_CHECK_TIMEOUT_SECONDS,
        max_retries: TEST_MAX_RETRIES,
    }
}

fn sword_metadata() -> TokenMetadata {
    TokenMetadata {
        name: "Iron Sword".to_string(),
        kind: ItemKind::Weapon,
        attack: 12,
        defense: 0,
        rarity: 2,
        enhancement_level: 5,
        attributes: HashMap::new(),
    }
}

/// Test successful mint returning a token id
#[tokio::test]
async fn mint_token_success() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(mock_server.uri());
    let client = ChainClient::new(config).unwrap();

    let wallet = Address::from([0x12; 20]);

    Mock::given(method("POST"))
        .and(path("/nft/mint"))
        .and(header("X-API-Key", "test-api-key"))
        .and(body_partial_json(json!({
            "metadata": { "name": "Iron Sword", "enhancement_level": 5 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_id": "7001",
            "tx_hash": "0xabc123"
        })))
        .mount(&mock_server)
        .await;

    let receipt = client.mint_token(wallet, &sword_metadata()).await.unwrap();
    assert_eq!(receipt.token_id, "7001");
    assert_eq!(receipt.tx_hash, "0xabc123");
}

/// Test mint rejection surfaces the server error body
#[tokio::test]
async fn mint_token_server_rejection() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(mock_server.uri());
    let client = ChainClient::new(config).unwrap();

    Mock::given(method("POST"))
        .and(path("/nft/mint"))
        .respond_with(ResponseTemplate::new(422).set_body_string("metadata rejected"))
        .mount(&mock_server)
        .await;

    let result = client
        .mint_token(Address::from([0x34; 20]), &sword_metadata())
        .await;

    match result.unwrap_err() {
        ChainError::ApiError { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "metadata rejected");
        }
        other => panic!("expected ApiError, got: {other:?}"),
    }
}

/// Test burn success
#[tokio::test]
async fn burn_token_success() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(mock_server.uri());
    let client = ChainClient::new(config).unwrap();

    Mock::given(method("POST"))
        .and(path("/nft/burn"))
        .and(body_partial_json(json!({ "token_id": "7001" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tx_hash": "0xdead" })))
        .mount(&mock_server)
        .await;

    let ack = client.burn_token("7001").await.unwrap();
    assert_eq!(ack.tx_hash, "0xdead");
}

/// Test burn of an unknown token
#[tokio::test]
async fn burn_token_not_found() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(mock_server.uri());
    let client = ChainClient::new(config).unwrap();

    Mock::given(method("POST"))
        .and(path("/nft/burn"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let result = client.burn_token("9999").await;
    match result.unwrap_err() {
        ChainError::TokenNotFound { token_id } => assert_eq!(token_id, "9999"),
        other => panic!("expected TokenNotFound, got: {other:?}"),
    }
}

/// Test lock acknowledgement
#[tokio::test]
async fn lock_token_success() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(mock_server.uri());
    let client = ChainClient::new(config).unwrap();

    Mock::given(method("POST"))
        .and(path("/nft/lock"))
        .and(body_partial_json(json!({ "token_id": "7001", "locked": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tx_hash": "0x10c" })))
        .mount(&mock_server)
        .await;

    let ack = client.lock_token("7001", true).await.unwrap();
    assert_eq!(ack.tx_hash, "0x10c");
}

/// Test transfer acknowledgement
#[tokio::test]
async fn transfer_token_success() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(mock_server.uri());
    let client = ChainClient::new(config).unwrap();

    let to_wallet = Address::from([0x56; 20]);

    Mock::given(method("POST"))
        .and(path("/nft/transfer"))
        .and(body_partial_json(json!({ "token_id": "7001" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tx_hash": "0xfee" })))
        .mount(&mock_server)
        .await;

    let ack = client.transfer_token("7001", to_wallet).await.unwrap();
    assert_eq!(ack.tx_hash, "0xfee");
}

/// Test wallet token listing
#[tokio::test]
async fn wallet_tokens_success() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(mock_server.uri());
    let client = ChainClient::new(config).unwrap();

    let wallet = Address::from([0x78; 20]);

    Mock::given(method("GET"))
        .and(path(format!("/wallet/{wallet}/tokens")))
        .and(header("X-API-Key", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [
                { "token_id": "7001", "owner": wallet, "locked": false },
                { "token_id": "7002", "owner": wallet, "locked": true }
            ]
        })))
        .mount(&mock_server)
        .await;

    let tokens = client.wallet_tokens(wallet).await.unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].token_id, "7001");
    assert!(tokens[1].locked);
}

/// Test empty wallet maps a 404 to an empty list
#[tokio::test]
async fn wallet_tokens_empty_on_not_found() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(mock_server.uri());
    let client = ChainClient::new(config).unwrap();

    let wallet = Address::from([0x9a; 20]);

    Mock::given(method("GET"))
        .and(path(format!("/wallet/{wallet}/tokens")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let tokens = client.wallet_tokens(wallet).await.unwrap();
    assert!(tokens.is_empty());
}

/// Test wallet listing retries transient failures
#[tokio::test]
async fn wallet_tokens_retries_transient_error() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(mock_server.uri());
    let client = ChainClient::new(config).unwrap();

    let wallet = Address::from([0xbc; 20]);

    // First attempt fails, the retry succeeds
    Mock::given(method("GET"))
        .and(path(format!("/wallet/{wallet}/tokens")))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/wallet/{wallet}/tokens")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{ "token_id": "7001", "owner": wallet }]
        })))
        .mount(&mock_server)
        .await;

    let tokens = client.wallet_tokens(wallet).await.unwrap();
    assert_eq!(tokens.len(), 1);
}

/// Test API authentication failure
#[tokio::test]
async fn mint_token_unauthorized() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(mock_server.uri());
    let client = ChainClient::new(config).unwrap();

    Mock::given(method("POST"))
        .and(path("/nft/mint"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let result = client
        .mint_token(Address::from([0xde; 20]), &sword_metadata())
        .await;
    assert!(matches!(result.unwrap_err(), ChainError::Unauthorized));
}

/// Test health check statuses
#[tokio::test]
async fn health_check_up() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(mock_server.uri());
    let client = ChainClient::new(config).unwrap();

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let status = client.health_check().await.unwrap();
    assert_eq!(status, HealthStatus::Up);
}

#[tokio::test]
async fn health_check_degraded_on_server_error() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(mock_server.uri());
    let client = ChainClient::new(config).unwrap();

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let status = client.health_check().await.unwrap();
    assert!(matches!(status, HealthStatus::Degraded { .. }));
}

#[tokio::test]
async fn health_check_down_on_unauthorized() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(mock_server.uri());
    let client = ChainClient::new(config).unwrap();

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let status = client.health_check().await.unwrap();
    assert!(matches!(status, HealthStatus::Down { .. }));
}
