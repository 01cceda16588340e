// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error response tests against a store that fails every call.

use axum::http::StatusCode;
use contest_hub::error::AppError;
use serde_json::json;
use tower::ServiceExt;

mod common;

use common::{body_json, request, session_cookie};

#[test]
fn test_error_status_mapping() {
    assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
    assert_eq!(
        AppError::PaymentProvider("declined".into()).status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_store_failure_is_opaque_500() {
    let (app, _) = common::create_offline_test_app();

    for uri in ["/contests", "/contests/popular", "/reviews", "/creators/best"] {
        let response = app
            .clone()
            .oneshot(request("GET", uri, None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");

        let body = body_json(response).await;
        assert_eq!(body["error"], "database_error", "{uri}");
        assert!(body.get("details").is_none(), "{uri}");
    }
}

#[tokio::test]
async fn test_admin_gate_store_failure_is_500() {
    let (app, state) = common::create_offline_test_app();
    let cookie = session_cookie(&state, "admin@example.com");

    let response = app
        .oneshot(request("GET", "/users", Some(&cookie), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_validation_runs_before_store() {
    // Offline store: a 400 proves the request never reached it.
    let (app, _) = common::create_offline_test_app();

    let response = app
        .oneshot(request(
            "POST",
            "/users",
            None,
            Some(json!({"email": "nope"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "bad_request");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_malformed_json_body_is_client_error() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method("POST")
                .uri("/create-payment-intent")
                .header("content-type", "application/json")
                .body(axum::body::Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
