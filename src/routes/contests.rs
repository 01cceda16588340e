// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contest routes.

use crate::db::{DeleteResult, UpdateResult};
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{Contest, ContestUpdate, ContestWinner, NewContest, WinnerUpdate};
use crate::routes::{parse_id, InsertResponse};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, patch, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// Maximum accepted search term length.
const MAX_SEARCH_LEN: usize = 100;

pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/contests", get(list_contests))
        .route("/contests/popular", get(popular_contests))
        .route("/contests/search", get(search_contests))
        .route("/contests/winners", get(contest_winners))
}

pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/contests", post(create_contest))
        .route("/contests/{id}", get(get_contest).put(edit_contest))
        .route("/contests/{id}/winner", patch(declare_winner))
        .route("/contests/creator/{email}", get(contests_by_creator))
}

pub fn admin_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/contest/{id}",
        patch(confirm_contest).delete(delete_contest),
    )
}

// ─── Public Listings ─────────────────────────────────────────

async fn list_contests(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Contest>>> {
    Ok(Json(state.db.contests().list().await?))
}

/// Top contests by participant count.
async fn popular_contests(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Contest>>> {
    Ok(Json(state.db.contests().popular().await?))
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: Option<String>,
}

/// Case-insensitive category search. An empty query matches nothing.
async fn search_contests(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Contest>>> {
    let term = params.q.as_deref().map(str::trim).unwrap_or("");
    if term.is_empty() {
        return Ok(Json(Vec::new()));
    }
    if term.len() > MAX_SEARCH_LEN {
        return Err(AppError::BadRequest("Search term too long".to_string()));
    }

    tracing::debug!(term, "Searching contests by category");
    Ok(Json(state.db.contests().search_by_category(term).await?))
}

async fn contest_winners(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ContestWinner>>> {
    Ok(Json(state.db.contests().winners().await?))
}

// ─── Authenticated ───────────────────────────────────────────

/// Contest details; `null` when the id is unknown.
async fn get_contest(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Option<Contest>>> {
    let id = parse_id(&id)?;
    Ok(Json(state.db.contests().get(&id).await?))
}

async fn create_contest(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(new_contest): Json<NewContest>,
) -> Result<Json<InsertResponse>> {
    new_contest.validate()?;
    let id = state.db.contests().create(new_contest, &user.email).await?;
    Ok(Json(InsertResponse::created(id)))
}

async fn contests_by_creator(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Contest>>> {
    user.ensure_email(&email)?;
    Ok(Json(state.db.contests().by_creator(&email).await?))
}

/// Load a contest and require the caller to be its creator.
///
/// Returns `None` when the contest does not exist.
async fn owned_contest(
    state: &AppState,
    user: &AuthUser,
    id: &crate::db::DocumentId,
) -> Result<Option<Contest>> {
    let Some(contest) = state.db.contests().get(id).await? else {
        return Ok(None);
    };
    if contest.creator_email != user.email {
        tracing::warn!(contest_id = %id, caller = %user.email, "Caller does not own contest");
        return Err(AppError::Forbidden);
    }
    Ok(Some(contest))
}

const NO_MATCH: UpdateResult = UpdateResult {
    matched_count: 0,
    modified_count: 0,
};

async fn edit_contest(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(update): Json<ContestUpdate>,
) -> Result<Json<UpdateResult>> {
    let id = parse_id(&id)?;
    update.validate()?;

    if owned_contest(&state, &user, &id).await?.is_none() {
        return Ok(Json(NO_MATCH));
    }
    Ok(Json(state.db.contests().edit(&id, &update).await?))
}

async fn declare_winner(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(winner): Json<WinnerUpdate>,
) -> Result<Json<UpdateResult>> {
    let id = parse_id(&id)?;
    winner.validate()?;

    if owned_contest(&state, &user, &id).await?.is_none() {
        return Ok(Json(NO_MATCH));
    }

    let result = state.db.contests().set_winner(&id, &winner).await?;
    tracing::info!(contest_id = %id, winner = %winner.winner_name, "Winner declared");
    Ok(Json(result))
}

// ─── Admin ───────────────────────────────────────────────────

async fn confirm_contest(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UpdateResult>> {
    let id = parse_id(&id)?;
    let result = state.db.contests().confirm(&id).await?;
    tracing::info!(contest_id = %id, modified = result.modified_count, "Contest confirmed");
    Ok(Json(result))
}

async fn delete_contest(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResult>> {
    let id = parse_id(&id)?;
    let result = state.db.contests().delete(&id).await?;
    tracing::info!(contest_id = %id, deleted = result.deleted_count, "Contest deleted");
    Ok(Json(result))
}
