// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Checkout and registration routes.

use crate::db::UpdateResult;
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{NewPayment, Payment, PaymentWinner};
use crate::routes::{parse_id, InsertResponse};
use crate::services::payment::{price_to_cents, CURRENCY};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, patch, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/create-payment-intent", post(create_payment_intent))
}

pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/payment", post(record_payment))
        .route("/payment/{email}", get(payments_for_email))
}

/// Registrant listings and winner marking expose other users' records.
pub fn admin_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/payment/{id}/winner", patch(set_payment_winner))
        .route("/payments", get(payments_for_contest))
}

#[derive(Serialize)]
pub struct PaymentIntentResponse {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

/// Start checkout. The price is validated before the provider is contacted.
async fn create_payment_intent(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<PaymentIntentResponse>> {
    let amount_cents = price_to_cents(body.get("price"))?;

    let client_secret = state
        .payment_service
        .create_intent(amount_cents, CURRENCY)
        .await?;

    Ok(Json(PaymentIntentResponse { client_secret }))
}

/// Record a completed checkout for the caller.
async fn record_payment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payment): Json<NewPayment>,
) -> Result<Json<InsertResponse>> {
    payment.validate()?;
    user.ensure_email(&payment.email)?;

    let id = state.db.payments().create(payment).await?;
    Ok(Json(InsertResponse::created(id)))
}

async fn payments_for_email(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Payment>>> {
    user.ensure_email(&email)?;
    Ok(Json(state.db.payments().by_email(&email).await?))
}

#[derive(Deserialize)]
struct ContestFilter {
    contest_id: Option<String>,
}

/// Registrations for one contest.
async fn payments_for_contest(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ContestFilter>,
) -> Result<Json<Vec<Payment>>> {
    let contest_id: u64 = filter
        .contest_id
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Missing 'contest_id' parameter".to_string()))?
        .parse()
        .map_err(|_| AppError::BadRequest("'contest_id' must be numeric".to_string()))?;

    Ok(Json(state.db.payments().by_contest(contest_id).await?))
}

async fn set_payment_winner(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(winner): Json<PaymentWinner>,
) -> Result<Json<UpdateResult>> {
    let id = parse_id(&id)?;
    winner.validate()?;
    Ok(Json(
        state
            .db
            .payments()
            .set_winner(&id, &winner.winner_name)
            .await?,
    ))
}
