// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Inventory and profile behavior over the HTTP surface.

mod common;

use common::{create_equip_item, create_item_def, register_and_login, spawn_server};
use external_apis::ServiceRegistry;
use serde_json::{Value, json};

#[tokio::test]
async fn equip_item_lifecycle() {
    let (addr, _token) = spawn_server(ServiceRegistry::with_clients(None, None)).await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base, "smith").await;

    let item_def_id = create_item_def(&client, &base, &token).await;
    let equip_id = create_equip_item(&client, &base, &token, item_def_id).await;

    let listed: Value = client
        .get(format!("{base}/v1/inventory/equip"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"].as_i64().unwrap(), equip_id);
    assert!(listed[0]["nft_token_id"].is_null());

    let deleted = client
        .delete(format!("{base}/v1/inventory/equip/{equip_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), 204);

    let listed: Value = client
        .get(format!("{base}/v1/inventory/equip"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn enhancement_updates_overwrite_level_and_data() {
    let (addr, _token) = spawn_server(ServiceRegistry::with_clients(None, None)).await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base, "enchanter").await;

    let item_def_id = create_item_def(&client, &base, &token).await;
    let equip_id = create_equip_item(&client, &base, &token, item_def_id).await;

    let updated = client
        .put(format!("{base}/v1/inventory/equip/{equip_id}"))
        .bearer_auth(&token)
        .json(&json!({
            "enhancement_level": 7,
            "enhancement_data": { "sockets": 2 },
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(updated.status(), 200);
    let body: Value = updated.json().await.unwrap();
    assert_eq!(body["enhancement_level"], 7);
    assert_eq!(body["enhancement_data"]["sockets"], 2);

    let negative = client
        .put(format!("{base}/v1/inventory/equip/{equip_id}"))
        .bearer_auth(&token)
        .json(&json!({
            "enhancement_level": -1,
            "enhancement_data": {},
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(negative.status(), 400);
}

#[tokio::test]
async fn equip_items_are_scoped_to_their_owner() {
    let (addr, _token) = spawn_server(ServiceRegistry::with_clients(None, None)).await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();
    let owner = register_and_login(&client, &base, "owner_player").await;
    let other = register_and_login(&client, &base, "other_player").await;

    let item_def_id = create_item_def(&client, &base, &owner).await;
    let equip_id = create_equip_item(&client, &base, &owner, item_def_id).await;

    // A foreign item is indistinguishable from a missing one
    let response = client
        .delete(format!("{base}/v1/inventory/equip/{equip_id}"))
        .bearer_auth(&other)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn unknown_item_definition_is_rejected() {
    let (addr, _token) = spawn_server(ServiceRegistry::with_clients(None, None)).await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base, "collector").await;

    let response = client
        .post(format!("{base}/v1/inventory/equip"))
        .bearer_auth(&token)
        .json(&json!({ "item_def_id": 9999 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn consumables_never_go_negative() {
    let (addr, _token) = spawn_server(ServiceRegistry::with_clients(None, None)).await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base, "alchemist").await;
    let item_def_id = create_item_def(&client, &base, &token).await;

    let adjust = |delta: i64| {
        let client = client.clone();
        let base = base.clone();
        let token = token.clone();
        async move {
            client
                .post(format!("{base}/v1/inventory/consumables"))
                .bearer_auth(&token)
                .json(&json!({ "item_def_id": item_def_id, "delta": delta }))
                .send()
                .await
                .unwrap()
        }
    };

    let granted = adjust(5).await;
    assert_eq!(granted.status(), 200);
    let body: Value = granted.json().await.unwrap();
    assert_eq!(body["quantity"], 5);

    let spent = adjust(-3).await;
    let body: Value = spent.json().await.unwrap();
    assert_eq!(body["quantity"], 2);

    // Overspending is rejected without touching the stack
    let overdrawn = adjust(-3).await;
    assert_eq!(overdrawn.status(), 400);

    let drained = adjust(-2).await;
    let body: Value = drained.json().await.unwrap();
    assert_eq!(body["quantity"], 0);

    let zero = adjust(0).await;
    assert_eq!(zero.status(), 400);

    // The most negative delta cannot be negated; it must be rejected,
    // not wrapped into a giant spend
    let overflow = adjust(i64::from(i32::MIN)).await;
    assert_eq!(overflow.status(), 400);

    let stack: Value = client
        .get(format!("{base}/v1/inventory/consumables"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(stack.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn profile_updates_use_optimistic_locking() {
    let (addr, _token) = spawn_server(ServiceRegistry::with_clients(None, None)).await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base, "veteran").await;

    let update = json!({
        "level": 5,
        "experience": 1200,
        "gold": 300,
        "equipped": { "main_hand": 1 },
        "skills": ["fireball"],
        "version": 1,
    });

    let first = client
        .put(format!("{base}/v1/profile"))
        .bearer_auth(&token)
        .json(&update)
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), 200);
    let body: Value = first.json().await.unwrap();
    assert_eq!(body["version"], 2);
    assert_eq!(body["level"], 5);

    // Replaying the stale version loses the race
    let stale = client
        .put(format!("{base}/v1/profile"))
        .bearer_auth(&token)
        .json(&update)
        .send()
        .await
        .unwrap();
    assert_eq!(stale.status(), 409);

    // The winning write is untouched
    let profile: Value = client
        .get(format!("{base}/v1/profile"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(profile["gold"], 300);
    assert_eq!(profile["version"], 2);
}

#[tokio::test]
async fn malformed_profile_is_rejected() {
    let (addr, _token) = spawn_server(ServiceRegistry::with_clients(None, None)).await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base, "cheater").await;

    let response = client
        .put(format!("{base}/v1/profile"))
        .bearer_auth(&token)
        .json(&json!({
            "level": 0,
            "experience": -1,
            "gold": 0,
            "equipped": {},
            "skills": [],
            "version": 1,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}
