// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc};

use api::{Server, ServerConfig, ShutdownConfig};
use external_apis::{AiClient, AiConfig, ChainClient, ChainConfig, ServiceRegistry};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// All-ones address keeps its checksum form stable in URLs.
pub const TEST_WALLET: &str = "0x1111111111111111111111111111111111111111";

/// Boots a server on an ephemeral port with a fresh in-memory database.
pub async fn spawn_server(registry: ServiceRegistry) -> (SocketAddr, CancellationToken) {
    let config = ServerConfig::for_testing();
    let db = storage::connect(&config.database.url).await.unwrap();
    let server =
        Server::with_dependencies(config, ShutdownConfig::default(), db, Arc::new(registry))
            .unwrap();
    server.run_for_testing().await.unwrap()
}

/// Blockchain client pointed at a wiremock server.
pub fn chain_client(base_url: &str) -> ChainClient {
    ChainClient::new(ChainConfig {
        base_url: base_url.to_string(),
        api_key: "test-key".to_string(),
        timeout_seconds: 5,
        health_check_timeout_seconds: 2,
        max_retries: 0,
    })
    .unwrap()
}

/// AI client pointed at a wiremock server.
pub fn ai_client(base_url: &str) -> AiClient {
    AiClient::new(AiConfig {
        base_url: base_url.to_string(),
        api_key: "test-key".to_string(),
        timeout_seconds: 5,
        health_check_timeout_seconds: 2,
    })
    .unwrap()
}

/// Registers an account and logs in, returning the bearer token.
pub async fn register_and_login(client: &reqwest::Client, base: &str, username: &str) -> String {
    let response = client
        .post(format!("{base}/v1/auth/register"))
        .json(&json!({
            "username": username,
            "password": "correct horse battery",
            "wallet_address": TEST_WALLET,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201, "registration failed");

    let response = client
        .post(format!("{base}/v1/auth/login"))
        .json(&json!({
            "username": username,
            "password": "correct horse battery",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200, "login failed");

    let body: Value = response.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

/// Creates a catalog entry and returns its id.
pub async fn create_item_def(client: &reqwest::Client, base: &str, token: &str) -> i64 {
    let response = client
        .post(format!("{base}/v1/items"))
        .bearer_auth(token)
        .json(&json!({
            "name": "Iron Sword",
            "kind": "weapon",
            "attack": 12,
            "defense": 0,
            "rarity": 1,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201, "item definition creation failed");

    let body: Value = response.json().await.unwrap();
    body["id"].as_i64().unwrap()
}

/// Grants the caller one equipment instance and returns its id.
pub async fn create_equip_item(
    client: &reqwest::Client,
    base: &str,
    token: &str,
    item_def_id: i64,
) -> i64 {
    let response = client
        .post(format!("{base}/v1/inventory/equip"))
        .bearer_auth(token)
        .json(&json!({ "item_def_id": item_def_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201, "equip item creation failed");

    let body: Value = response.json().await.unwrap();
    body["id"].as_i64().unwrap()
}
