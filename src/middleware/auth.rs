// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT session cookie authentication middleware.

use crate::error::AppError;
use crate::models::normalize_email;
use crate::services::Claims;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// Authenticated caller extracted from a verified session token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
    pub claims: Claims,
}

impl AuthUser {
    /// Require that the caller is the owner of `email`. Case is ignored.
    pub fn ensure_email(&self, email: &str) -> Result<(), AppError> {
        if normalize_email(&self.email) == normalize_email(email) {
            Ok(())
        } else {
            tracing::warn!(caller = %self.email, requested = %email, "Email mismatch");
            Err(AppError::Forbidden)
        }
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.email.clone(),
            claims,
        }
    }
}

/// Middleware that requires a valid session cookie.
///
/// The downstream handler only runs after verification succeeds.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .ok_or(AppError::Unauthorized)?;

    let claims = state.token_service.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected session token");
        AppError::InvalidToken
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}
