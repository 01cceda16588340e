// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contest Hub API Server
//!
//! Serves the contest-hosting REST API backed by Firestore.

use contest_hub::{
    config::{Config, StoreBackend},
    db::DocumentStore,
    services::PaymentService,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        environment = ?config.environment,
        "Starting Contest Hub API"
    );

    // Initialize document store
    let db = match config.store_backend {
        StoreBackend::Firestore => DocumentStore::connect_firestore(&config.gcp_project_id).await?,
        StoreBackend::Memory => DocumentStore::new_in_memory(),
    };

    let payment_service = PaymentService::new(
        config.payment_api_url.clone(),
        config.payment_secret_key.clone(),
    );
    tracing::info!(api = %config.payment_api_url, "Payment service initialized");

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), db, payment_service));

    // Build router
    let app = contest_hub::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("contest_hub=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
