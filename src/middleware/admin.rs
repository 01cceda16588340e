// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin role gate.

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Middleware that requires the caller's stored role to be admin.
///
/// Must be layered inside [`require_auth`](super::require_auth). The role is
/// re-read from the store on every request.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(email) = request
        .extensions()
        .get::<AuthUser>()
        .map(|caller| caller.email.clone())
    else {
        tracing::error!("Admin gate reached without an authenticated caller");
        return Err(AppError::Unauthorized);
    };

    let is_admin = state
        .db
        .users()
        .find_by_email(&email)
        .await?
        .map(|user| user.is_admin())
        .unwrap_or(false);

    if !is_admin {
        tracing::warn!(email = %email, "Blocked non-admin request");
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}
