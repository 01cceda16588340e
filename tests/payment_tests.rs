// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Payment intent and registration tests.
//!
//! The payment provider is mocked; its call counter shows whether a request
//! reached it.

use axum::http::StatusCode;
use contest_hub::db::collections;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

use common::{body_json, request, session_cookie};

fn payment_payload(email: &str, contest_id: u64) -> Value {
    json!({
        "email": email,
        "name": "Ada",
        "contest_id": contest_id,
        "contest_name": "Logo Design",
        "price": 10.0,
        "transaction_id": "pi_123_secret"
    })
}

#[tokio::test]
async fn test_payment_intent_returns_client_secret() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(request(
            "POST",
            "/create-payment-intent",
            None,
            Some(json!({"price": 12.5})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["clientSecret"].as_str().unwrap().starts_with("pi_mock_"));
    assert_eq!(state.payment_service.mock_calls(), 1);
}

#[tokio::test]
async fn test_payment_intent_accepts_numeric_string() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(request(
            "POST",
            "/create-payment-intent",
            None,
            Some(json!({"price": "25"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.payment_service.mock_calls(), 1);
}

#[tokio::test]
async fn test_invalid_price_never_reaches_provider() {
    let (app, state) = common::create_test_app();

    for body in [
        json!({"price": 0}),
        json!({"price": -5}),
        json!({"price": "abc"}),
        json!({"price": null}),
        json!({}),
    ] {
        let response = app
            .clone()
            .oneshot(request("POST", "/create-payment-intent", None, Some(body.clone())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
    }

    assert_eq!(state.payment_service.mock_calls(), 0);
}

#[tokio::test]
async fn test_record_payment_and_list_by_email() {
    let (app, state) = common::create_test_app();
    let cookie = session_cookie(&state, "ada@example.com");

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/payment",
            Some(&cookie),
            Some(payment_payload("ada@example.com", 7)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["insertedId"].is_string());

    let response = app
        .oneshot(request("GET", "/payment/ada@example.com", Some(&cookie), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let payments = body_json(response).await;
    let payments = payments.as_array().unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0]["contest_id"], 7);
    assert_eq!(payments[0]["transaction_id"], "pi_123_secret");
    assert!(payments[0]["paid_at"].is_string());
}

#[tokio::test]
async fn test_record_payment_for_someone_else_is_forbidden() {
    let (app, state) = common::create_test_app();
    let cookie = session_cookie(&state, "mallory@example.com");

    let response = app
        .oneshot(request(
            "POST",
            "/payment",
            Some(&cookie),
            Some(payment_payload("ada@example.com", 7)),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(state.db.memory_count(collections::PAYMENTS), Some(0));
}

async fn record_payments(
    app: &axum::Router,
    payments: &[(&str, &str, u64)],
) -> Vec<String> {
    let mut ids = Vec::new();
    for (cookie, email, contest_id) in payments {
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/payment",
                Some(*cookie),
                Some(payment_payload(email, *contest_id)),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        ids.push(
            body_json(response).await["insertedId"]
                .as_str()
                .unwrap()
                .to_string(),
        );
    }
    ids
}

#[tokio::test]
async fn test_payments_by_contest_and_winner() {
    let (app, state) = common::create_test_app();
    let ada = session_cookie(&state, "ada@example.com");
    let bob = session_cookie(&state, "bob@example.com");
    common::seed_admin(&state, "admin@example.com").await;
    let admin = session_cookie(&state, "admin@example.com");

    let ids = record_payments(
        &app,
        &[
            (ada.as_str(), "ada@example.com", 7),
            (bob.as_str(), "bob@example.com", 7),
            (bob.as_str(), "bob@example.com", 8),
        ],
    )
    .await;
    let ada_payment_id = &ids[0];

    let response = app
        .clone()
        .oneshot(request("GET", "/payments?contest_id=7", Some(&admin), None))
        .await
        .unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    let response = app
        .clone()
        .oneshot(request("GET", "/payments?contest_id=seven", Some(&admin), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(request(
            "PATCH",
            &format!("/payment/{ada_payment_id}/winner"),
            Some(&admin),
            Some(json!({"winner_name": "Ada"})),
        ))
        .await
        .unwrap();
    assert_eq!(
        body_json(response).await,
        json!({"matchedCount": 1, "modifiedCount": 1})
    );

    let id = ada_payment_id.parse().unwrap();
    let payment = state.db.payments().get(&id).await.unwrap().unwrap();
    assert_eq!(payment.winner_name.as_deref(), Some("Ada"));
}

#[tokio::test]
async fn test_non_admin_cannot_mark_payment_winner() {
    let (app, state) = common::create_test_app();
    let ada = session_cookie(&state, "ada@example.com");
    common::seed_user(&state, "mallory@example.com").await;
    let mallory = session_cookie(&state, "mallory@example.com");

    let ids = record_payments(&app, &[(ada.as_str(), "ada@example.com", 7)]).await;

    let response = app
        .oneshot(request(
            "PATCH",
            &format!("/payment/{}/winner", ids[0]),
            Some(&mallory),
            Some(json!({"winner_name": "Mallory"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let id = ids[0].parse().unwrap();
    let payment = state.db.payments().get(&id).await.unwrap().unwrap();
    assert_eq!(payment.winner_name, None);
}

#[tokio::test]
async fn test_non_admin_cannot_list_contest_registrants() {
    let (app, state) = common::create_test_app();
    let ada = session_cookie(&state, "ada@example.com");
    common::seed_user(&state, "bob@example.com").await;
    let bob = session_cookie(&state, "bob@example.com");

    record_payments(&app, &[(ada.as_str(), "ada@example.com", 7)]).await;

    let response = app
        .clone()
        .oneshot(request("GET", "/payments?contest_id=7", Some(&bob), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"], "forbidden");

    let response = app
        .oneshot(request("GET", "/payments?contest_id=7", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_payment_routes_require_session() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(request(
            "POST",
            "/payment",
            None,
            Some(payment_payload("ada@example.com", 7)),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(state.db.memory_count(collections::PAYMENTS), Some(0));
}
