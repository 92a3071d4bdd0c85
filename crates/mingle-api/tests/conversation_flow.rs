//! End-to-end tests over the assembled router: ingest, conversation query,
//! and the live broadcast cycle, all against an in-memory store.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use mingle_api::{AppState, AppStateInner, router};
use mingle_db::Database;
use mingle_gateway::dispatcher::Dispatcher;
use mingle_types::events::GatewayEvent;

fn test_state() -> AppState {
    Arc::new(AppStateInner {
        db: Database::open_in_memory().unwrap(),
        dispatcher: Dispatcher::new(),
        upload_dir: std::env::temp_dir().join("mingle-test-uploads"),
    })
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn message_is_persisted_and_broadcast_in_one_cycle() {
    let state = test_state();
    let app = router(state.clone());

    // Subscribe before the send, like a connected client
    let mut events = state.dispatcher.subscribe();

    let (status, body) = send_json(
        &app,
        "POST",
        "/messages",
        json!({
            "sender_id": 1,
            "recipient_id": 2,
            "message_content": "hello",
            "timestamp": "2026-08-06T10:00:00Z",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);

    // The push happened inside the request cycle
    let GatewayEvent::MessageCreated {
        message_id,
        message_content,
        ..
    } = events.try_recv().expect("subscriber got no push");
    assert_eq!(message_id, 1);
    assert_eq!(message_content, "hello");

    let (status, listed) = get_json(&app, "/messages?sender_id=1&recipient_id=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["message_content"], "hello");
    assert_eq!(listed[0]["message_id"], 1);

    // Symmetric query returns the identical sequence
    let (_, reversed) = get_json(&app, "/messages?sender_id=2&recipient_id=1").await;
    assert_eq!(listed, reversed);

    // Idempotent with no intervening writes
    let (_, again) = get_json(&app, "/messages?sender_id=1&recipient_id=2").await;
    assert_eq!(listed, again);
}

#[tokio::test]
async fn missing_field_is_a_validation_error() {
    let app = router(test_state());

    let (status, body) = send_json(
        &app,
        "POST",
        "/messages",
        json!({
            "sender_id": 1,
            "recipient_id": 2,
            "message_content": "no timestamp",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing field `timestamp`");
}

#[tokio::test]
async fn empty_conversation_is_an_empty_array() {
    let app = router(test_state());

    let (status, body) = get_json(&app, "/messages?sender_id=7&recipient_id=8").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn signup_then_login_roundtrip() {
    let app = router(test_state());

    let (status, signed_up) = send_json(
        &app,
        "POST",
        "/signup",
        json!({
            "email": "ada@example.com",
            "password": "correct horse",
            "name": "Ada",
            "surname": "Lovelace",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(signed_up["uid"].as_str().unwrap().len(), 20);

    let (status, profile) = send_json(
        &app,
        "POST",
        "/login",
        json!({ "email": "ada@example.com", "password": "correct horse" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["name"], "Ada");
    assert_eq!(profile["img"], Value::Null);

    let (status, body) = send_json(
        &app,
        "POST",
        "/login",
        json!({ "email": "ada@example.com", "password": "wrong" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn friend_graph_checks_existence_and_duplicates() {
    let app = router(test_state());

    for (email, name) in [("a@example.com", "Ada"), ("b@example.com", "Bob")] {
        let (status, _) = send_json(
            &app,
            "POST",
            "/signup",
            json!({ "email": email, "password": "password", "name": name, "surname": "X" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    // Unknown friend
    let (status, _) =
        send_json(&app, "POST", "/addfriend/1", json!({ "friend_id": 99 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(&app, "POST", "/addfriend/1", json!({ "friend_id": 2 })).await;
    assert_eq!(status, StatusCode::OK);

    // Duplicate, in either direction
    let (status, body) =
        send_json(&app, "POST", "/addfriend/2", json!({ "friend_id": 1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Users are already friends");

    // Both participants see the friendship
    let (_, list) = get_json(&app, "/friendlist/2").await;
    assert_eq!(list["friend_list"][0]["name"], "Ada");
}

#[tokio::test]
async fn profile_lookup_hides_private_fields() {
    let app = router(test_state());

    let (status, _) = send_json(
        &app,
        "POST",
        "/signup",
        json!({ "email": "ada@example.com", "password": "password", "name": "Ada", "surname": "Lovelace" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, profile) = get_json(&app, "/user/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["name"], "Ada");
    assert_eq!(profile["surname"], "Lovelace");
    assert!(profile.get("email").is_none());
    assert!(profile.get("password").is_none());

    let (status, _) = get_json(&app, "/user/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
