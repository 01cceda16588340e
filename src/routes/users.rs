// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User routes.

use crate::db::users::CreateUserOutcome;
use crate::db::{DeleteResult, UpdateResult};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::models::{NewUser, ProfileUpdate, RoleUpdate, User};
use crate::routes::{parse_id, InsertResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, patch, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/users", post(create_user))
}

pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/admin/{email}", get(check_admin))
        .route(
            "/users/profile/{email}",
            get(get_profile).patch(update_profile),
        )
}

pub fn admin_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", patch(update_role).delete(delete_user))
}

/// Register a user. Repeating the call for a known email is not an error.
async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(new_user): Json<NewUser>,
) -> Result<Json<InsertResponse>> {
    new_user.validate()?;

    let response = match state.db.users().create(new_user).await? {
        CreateUserOutcome::Created(id) => InsertResponse::created(id),
        CreateUserOutcome::AlreadyExists => InsertResponse {
            inserted_id: None,
            message: Some("user exists".to_string()),
        },
    };
    Ok(Json(response))
}

#[derive(Serialize)]
pub struct AdminStatusResponse {
    pub admin: bool,
}

/// Whether the caller is an admin. Callers may only ask about themselves.
async fn check_admin(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(email): Path<String>,
) -> Result<Json<AdminStatusResponse>> {
    user.ensure_email(&email)?;

    let admin = state
        .db
        .users()
        .find_by_email(&email)
        .await?
        .map(|u| u.is_admin())
        .unwrap_or(false);

    Ok(Json(AdminStatusResponse { admin }))
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(email): Path<String>,
) -> Result<Json<Option<User>>> {
    user.ensure_email(&email)?;
    Ok(Json(state.db.users().find_by_email(&email).await?))
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(email): Path<String>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UpdateResult>> {
    user.ensure_email(&email)?;
    update.validate()?;
    Ok(Json(state.db.users().update_profile(&email, &update).await?))
}

// ─── Admin ───────────────────────────────────────────────────

async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>> {
    Ok(Json(state.db.users().list().await?))
}

async fn update_role(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(update): Json<RoleUpdate>,
) -> Result<Json<UpdateResult>> {
    let id = parse_id(&id)?;
    let result = state.db.users().set_role(&id, update.role).await?;
    tracing::info!(
        user_id = %id,
        role = ?update.role,
        by = %admin.email,
        "User role changed"
    );
    Ok(Json(result))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResult>> {
    let id = parse_id(&id)?;
    let result = state.db.users().delete(&id).await?;
    tracing::info!(
        user_id = %id,
        deleted = result.deleted_count,
        by = %admin.email,
        "User deleted"
    );
    Ok(Json(result))
}
