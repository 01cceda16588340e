// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use contest_hub::config::Config;
use contest_hub::db::{DocumentId, DocumentStore};
use contest_hub::models::{NewUser, Role};
use contest_hub::routes::create_router;
use contest_hub::services::PaymentService;
use contest_hub::AppState;
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a Firestore-backed store (requires the emulator).
#[allow(dead_code)]
pub async fn test_db() -> DocumentStore {
    DocumentStore::connect_firestore("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

fn build_app(config: Config, db: DocumentStore) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config, db, PaymentService::new_mock()));
    (create_router(state.clone()), state)
}

/// Create a test app backed by the in-memory store and a mock payment provider.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    build_app(Config::default(), DocumentStore::new_in_memory())
}

/// Create a test app with a custom configuration.
#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    build_app(config, DocumentStore::new_in_memory())
}

/// Create a test app whose store fails every call.
#[allow(dead_code)]
pub fn create_offline_test_app() -> (axum::Router, Arc<AppState>) {
    build_app(Config::default(), DocumentStore::new_mock())
}

/// Sign a session token for `email` and return it as a `Cookie` header value.
#[allow(dead_code)]
pub fn session_cookie(state: &AppState, email: &str) -> String {
    let mut claims = Map::new();
    claims.insert("email".to_string(), json!(email));
    let token = state.token_service.issue(claims).unwrap();
    format!("token={token}")
}

/// Register a user and return their id.
#[allow(dead_code)]
pub async fn seed_user(state: &AppState, email: &str) -> DocumentId {
    state
        .db
        .users()
        .create(NewUser {
            email: email.to_string(),
            name: Some("Test User".to_string()),
            photo: None,
        })
        .await
        .unwrap();
    DocumentId::for_key(email)
}

/// Register a user and promote them to admin.
#[allow(dead_code)]
pub async fn seed_admin(state: &AppState, email: &str) -> DocumentId {
    let id = seed_user(state, email).await;
    state.db.users().set_role(&id, Role::Admin).await.unwrap();
    id
}

/// Build a request with an optional session cookie and JSON body.
#[allow(dead_code)]
pub fn request(method: &str, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A valid contest creation payload.
#[allow(dead_code)]
pub fn contest_payload(name: &str, category: &str) -> Value {
    json!({
        "name": name,
        "img": "https://img.example.com/contest.png",
        "category": category,
        "description": "Show us your best work",
        "instruction": "Submit one entry",
        "prize": "$500",
        "price": 10.0,
        "deadline": "2026-12-31T23:59:59Z"
    })
}
