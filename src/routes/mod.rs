// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.
//!
//! Routes are grouped by guard chain: public, authenticated, and admin
//! (authenticated, then role-checked).

pub mod auth;
pub mod contests;
pub mod listings;
pub mod payments;
pub mod users;

use crate::db::DocumentId;
use crate::error::Result;
use crate::middleware::{require_admin, require_auth};
use crate::AppState;
use axum::http::{header, HeaderValue, Method};
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Response for create operations.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct InsertResponse {
    #[serde(rename = "insertedId")]
    pub inserted_id: Option<DocumentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl InsertResponse {
    pub fn created(id: DocumentId) -> Self {
        Self {
            inserted_id: Some(id),
            message: None,
        }
    }
}

/// Liveness text at the root path.
async fn root() -> &'static str {
    "server is running"
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// Parse an id path segment, mapping malformed ids to 400.
pub(crate) fn parse_id(raw: &str) -> Result<DocumentId> {
    raw.parse()
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer - credentialed requests from the configured origins only
    let allowed_origins = state.config.allowed_origins.clone();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _request_parts: &axum::http::request::Parts| {
                let origin_str = origin.to_str().unwrap_or("");
                allowed_origins.iter().any(|allowed| allowed == origin_str)
            },
        ))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(auth::routes())
        .merge(contests::public_routes())
        .merge(listings::routes())
        .merge(users::public_routes())
        .merge(payments::public_routes());

    // Protected routes (valid session required)
    let protected_routes = Router::new()
        .merge(contests::protected_routes())
        .merge(users::protected_routes())
        .merge(payments::protected_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Admin routes (session, then stored admin role). The last layer added
    // runs first.
    let admin_routes = Router::new()
        .merge(contests::admin_routes())
        .merge(users::admin_routes())
        .merge(payments::admin_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
