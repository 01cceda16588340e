// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Payment provider client.
//!
//! Creates payment intents and hands the client secret back to the
//! browser, which completes checkout directly with the provider.

use crate::error::AppError;
use serde::Deserialize;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Currency for all contest entry fees.
pub const CURRENCY: &str = "usd";

/// Payment provider client.
#[derive(Clone)]
pub struct PaymentService {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
    /// Set in mock mode; counts intents instead of calling the provider.
    mock_calls: Option<Arc<AtomicUsize>>,
}

/// Payment intent as returned by the provider.
#[derive(Debug, Clone, Deserialize)]
struct PaymentIntent {
    id: String,
    client_secret: String,
}

impl PaymentService {
    pub fn new(base_url: String, secret_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            secret_key,
            mock_calls: None,
        }
    }

    /// Create a mock payment service for testing (offline mode).
    pub fn new_mock() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "http://mock.invalid".to_string(),
            secret_key: "sk_mock".to_string(),
            mock_calls: Some(Arc::new(AtomicUsize::new(0))),
        }
    }

    /// Number of intents requested in mock mode.
    pub fn mock_calls(&self) -> usize {
        self.mock_calls
            .as_ref()
            .map(|calls| calls.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Create a payment intent and return its client secret.
    pub async fn create_intent(&self, amount_cents: u64, currency: &str) -> Result<String, AppError> {
        if let Some(calls) = &self.mock_calls {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            return Ok(format!("pi_mock_{n}_secret_{amount_cents}"));
        }

        let url = format!("{}/v1/payment_intents", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&[
                ("amount", amount_cents.to_string()),
                ("currency", currency.to_string()),
                ("payment_method_types[]", "card".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::PaymentProvider(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::PaymentProvider(format!("HTTP {}: {}", status, body)));
        }

        let intent: PaymentIntent = response
            .json()
            .await
            .map_err(|e| AppError::PaymentProvider(format!("JSON parse error: {}", e)))?;

        tracing::info!(intent_id = %intent.id, amount_cents, "Payment intent created");
        Ok(intent.client_secret)
    }
}

/// Convert a client-supplied price (number or numeric string) to cents.
///
/// Rejects missing, non-numeric, non-finite, zero and negative prices.
pub fn price_to_cents(price: Option<&Value>) -> Result<u64, AppError> {
    let invalid = || AppError::BadRequest("Price must be a number greater than 0".to_string());

    let price = match price {
        Some(Value::Number(n)) => n.as_f64().ok_or_else(invalid)?,
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };

    if !price.is_finite() || price <= 0.0 {
        return Err(invalid());
    }

    let cents = (price * 100.0).round();
    if cents < 1.0 || cents > u64::MAX as f64 {
        return Err(invalid());
    }
    Ok(cents as u64)
}
