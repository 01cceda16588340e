// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Contest Hub: backend API for a contest-hosting platform
//!
//! This crate provides the REST API for users, contests, registrations and
//! showcase listings, with cookie-based sessions and an admin role gate.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::DocumentStore;
use services::{PaymentService, TokenService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: DocumentStore,
    pub token_service: TokenService,
    pub payment_service: PaymentService,
}

impl AppState {
    /// Build state from configuration and an already-connected store.
    pub fn new(config: Config, db: DocumentStore, payment_service: PaymentService) -> Self {
        let token_service = TokenService::new(&config.jwt_signing_key);
        Self {
            config,
            db,
            token_service,
            payment_service,
        }
    }
}
