// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session routes: issue and clear the session cookie.

use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::config::Environment;
use crate::error::{AppError, Result};
use crate::middleware::auth::SESSION_COOKIE;
use crate::services::TokenError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/jwt", post(issue_session))
        .route("/logout", post(logout))
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Build the session cookie with environment-dependent attributes.
///
/// Production frontends live on another site, so the cookie must be
/// `Secure; SameSite=None`. Locally it stays `SameSite=Strict` over HTTP.
fn session_cookie(value: String, environment: Environment) -> Cookie<'static> {
    let (secure, same_site) = if environment.is_production() {
        (true, SameSite::None)
    } else {
        (false, SameSite::Strict)
    };

    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(same_site)
        .build()
}

/// Sign the caller's claims and set them as the session cookie.
async fn issue_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(claims): Json<Map<String, Value>>,
) -> Result<(CookieJar, Json<SuccessResponse>)> {
    let token = state.token_service.issue(claims).map_err(|e| match e {
        TokenError::MissingEmail => {
            AppError::BadRequest("Session claims must include an email".to_string())
        }
        other => AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", other)),
    })?;

    tracing::debug!("Session issued");

    let jar = jar.add(session_cookie(token, state.config.environment));
    Ok((jar, Json(SuccessResponse { success: true })))
}

/// Expire the session cookie immediately.
async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessResponse>) {
    let mut cookie = session_cookie(String::new(), state.config.environment);
    cookie.set_max_age(time::Duration::ZERO);

    (jar.add(cookie), Json(SuccessResponse { success: true }))
}
