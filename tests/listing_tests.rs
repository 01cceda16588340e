// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public showcase listing tests.

use axum::http::StatusCode;
use contest_hub::db::{collections, DocumentId};
use contest_hub::models::{Creator, Review};
use serde_json::json;
use tower::ServiceExt;

mod common;

use common::{body_json, request};

#[tokio::test]
async fn test_best_creators_top_three() {
    let (app, state) = common::create_test_app();
    for (name, participant) in [("Ann", 10), ("Ben", 50), ("Cat", 30), ("Dan", 40)] {
        let id = DocumentId::generate().unwrap();
        let creator = Creator {
            id: id.clone(),
            name: name.to_string(),
            email: None,
            img: None,
            participant,
        };
        state
            .db
            .insert(collections::CREATORS, &id, &creator)
            .await
            .unwrap();
    }

    let response = app
        .oneshot(request("GET", "/creators/best", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let names: Vec<String> = body_json(response)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Ben", "Dan", "Cat"]);
}

#[tokio::test]
async fn test_reviews_listing() {
    let (app, state) = common::create_test_app();
    let id = DocumentId::generate().unwrap();
    let review = Review {
        id: id.clone(),
        name: "Grace".to_string(),
        image: None,
        rating: Some(5.0),
        details: Some("Great contests".to_string()),
    };
    state
        .db
        .insert(collections::REVIEWS, &id, &review)
        .await
        .unwrap();

    let response = app
        .oneshot(request("GET", "/reviews", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let reviews = body_json(response).await;
    assert_eq!(reviews.as_array().unwrap().len(), 1);
    assert_eq!(reviews[0]["name"], "Grace");
}

#[tokio::test]
async fn test_empty_listings() {
    let (app, _) = common::create_test_app();

    for uri in ["/about-us", "/leaderboard", "/reviews", "/creators/best"] {
        let response = app
            .clone()
            .oneshot(request("GET", uri, None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert_eq!(body_json(response).await, json!([]), "{uri}");
    }
}
