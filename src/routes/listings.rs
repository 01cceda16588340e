// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public showcase listings.

use crate::error::Result;
use crate::models::{AboutEntry, Creator, LeaderboardEntry, Review};
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/creators/best", get(best_creators))
        .route("/reviews", get(reviews))
        .route("/about-us", get(about_us))
        .route("/leaderboard", get(leaderboard))
}

async fn best_creators(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Creator>>> {
    Ok(Json(state.db.listings().best_creators().await?))
}

async fn reviews(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Review>>> {
    Ok(Json(state.db.listings().reviews().await?))
}

async fn about_us(State(state): State<Arc<AppState>>) -> Result<Json<Vec<AboutEntry>>> {
    Ok(Json(state.db.listings().about_us().await?))
}

async fn leaderboard(State(state): State<Arc<AppState>>) -> Result<Json<Vec<LeaderboardEntry>>> {
    Ok(Json(state.db.listings().leaderboard().await?))
}
