// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Market order lifecycle over the HTTP surface.

mod common;

use common::{chain_client, create_equip_item, create_item_def, register_and_login, spawn_server};
use external_apis::ServiceRegistry;
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

/// Boots a server whose chain mock mints every request, then registers a
/// seller holding one minted item. Returns (base URL, token, equip item id).
async fn seller_with_minted_item(username: &str) -> (String, String, i64) {
    let chain = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/nft/mint"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_id": format!("token-{username}"),
            "tx_hash": "0xmint",
        })))
        .mount(&chain)
        .await;

    let registry = ServiceRegistry::with_clients(Some(chain_client(&chain.uri())), None);
    let (addr, _token) = spawn_server(registry).await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base, username).await;
    let item_def_id = create_item_def(&client, &base, &token).await;
    let equip_id = create_equip_item(&client, &base, &token, item_def_id).await;

    let minted = client
        .post(format!("{base}/v1/nft/mint"))
        .bearer_auth(&token)
        .json(&json!({ "equip_item_id": equip_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(minted.status(), 200);

    (base, token, equip_id)
}

fn order_body(equip_id: i64) -> Value {
    json!({
        "equip_item_id": equip_id,
        "price": 1000,
        "currency": "gold",
        "signature": "0xsigned",
        "nonce": 7,
        "deadline": chrono::Utc::now().timestamp() + 3600,
    })
}

#[tokio::test]
async fn only_minted_items_can_be_listed() {
    let (addr, _token) = spawn_server(ServiceRegistry::with_clients(None, None)).await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base, "eager_seller").await;
    let item_def_id = create_item_def(&client, &base, &token).await;
    let equip_id = create_equip_item(&client, &base, &token, item_def_id).await;

    let response = client
        .post(format!("{base}/v1/market/orders"))
        .bearer_auth(&token)
        .json(&order_body(equip_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 409);
}

#[tokio::test]
async fn listing_and_filtering_orders() {
    let (base, token, equip_id) = seller_with_minted_item("market_seller").await;
    let client = reqwest::Client::new();

    let created = client
        .post(format!("{base}/v1/market/orders"))
        .bearer_auth(&token)
        .json(&order_body(equip_id))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), 201);
    let order: Value = created.json().await.unwrap();
    assert_eq!(order["status"], "open");
    assert_eq!(order["price"], 1000);

    let page: Value = client
        .get(format!("{base}/v1/market/orders?status=open&currency=gold"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page["total"], 1);
    assert_eq!(page["orders"][0]["id"], order["id"]);

    // A filter that matches nothing returns an empty page, not an error
    let empty: Value = client
        .get(format!("{base}/v1/market/orders?status=filled"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(empty["total"], 0);
}

#[tokio::test]
async fn orders_only_leave_open_once() {
    let (base, token, equip_id) = seller_with_minted_item("closing_seller").await;
    let client = reqwest::Client::new();

    let order: Value = client
        .post(format!("{base}/v1/market/orders"))
        .bearer_auth(&token)
        .json(&order_body(equip_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let order_id = order["id"].as_i64().unwrap();

    let cancelled = client
        .post(format!("{base}/v1/market/orders/{order_id}/status"))
        .bearer_auth(&token)
        .json(&json!({ "status": "cancelled" }))
        .send()
        .await
        .unwrap();
    assert_eq!(cancelled.status(), 200);
    let body: Value = cancelled.json().await.unwrap();
    assert_eq!(body["status"], "cancelled");

    // A cancelled order is terminal
    let filled = client
        .post(format!("{base}/v1/market/orders/{order_id}/status"))
        .bearer_auth(&token)
        .json(&json!({ "status": "filled" }))
        .send()
        .await
        .unwrap();
    assert_eq!(filled.status(), 409);
}

#[tokio::test]
async fn foreign_orders_cannot_be_closed() {
    let (base, token, equip_id) = seller_with_minted_item("honest_seller").await;
    let client = reqwest::Client::new();

    let order: Value = client
        .post(format!("{base}/v1/market/orders"))
        .bearer_auth(&token)
        .json(&order_body(equip_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let order_id = order["id"].as_i64().unwrap();

    let intruder = register_and_login(&client, &base, "intruder").await;
    let response = client
        .post(format!("{base}/v1/market/orders/{order_id}/status"))
        .bearer_auth(&intruder)
        .json(&json!({ "status": "cancelled" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn overdue_orders_expire_instead_of_filling() {
    let (base, token, equip_id) = seller_with_minted_item("late_seller").await;
    let client = reqwest::Client::new();

    let mut body = order_body(equip_id);
    body["deadline"] = json!(chrono::Utc::now().timestamp() + 1);
    let order: Value = client
        .post(format!("{base}/v1/market/orders"))
        .bearer_auth(&token)
        .json(&body)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let order_id = order["id"].as_i64().unwrap();

    tokio::time::sleep(std::time::Duration::from_secs(2)).await;

    // The deadline has passed, so the seller can no longer settle
    let filled = client
        .post(format!("{base}/v1/market/orders/{order_id}/status"))
        .bearer_auth(&token)
        .json(&json!({ "status": "filled" }))
        .send()
        .await
        .unwrap();
    assert_eq!(filled.status(), 409);

    let page: Value = client
        .get(format!("{base}/v1/market/orders?status=expired"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page["total"], 1);
    assert_eq!(page["orders"][0]["id"].as_i64().unwrap(), order_id);
}

#[tokio::test]
async fn invalid_listings_are_rejected() {
    let (base, token, equip_id) = seller_with_minted_item("sloppy_seller").await;
    let client = reqwest::Client::new();

    let mut body = order_body(equip_id);
    body["price"] = json!(0);
    let response = client
        .post(format!("{base}/v1/market/orders"))
        .bearer_auth(&token)
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let mut body = order_body(equip_id);
    body["deadline"] = json!(chrono::Utc::now().timestamp() - 10);
    let response = client
        .post(format!("{base}/v1/market/orders"))
        .bearer_auth(&token)
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}
