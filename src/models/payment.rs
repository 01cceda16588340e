// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Payment/registration model for storage and API.

use crate::db::DocumentId;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Evidence that a user paid to enter a contest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Payment {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    /// Paying user
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Numeric contest identifier supplied at checkout
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub contest_id: u64,
    #[serde(default)]
    pub contest_name: Option<String>,
    pub price: f64,
    /// Payment provider transaction reference
    pub transaction_id: String,
    /// When the checkout completed (RFC 3339)
    pub paid_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner_name: Option<String>,
}

/// Checkout completion payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPayment {
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub contest_id: u64,
    #[serde(default)]
    pub contest_name: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(length(min = 1, max = 200))]
    pub transaction_id: String,
}

impl NewPayment {
    pub fn into_payment(self, id: DocumentId, paid_at: String) -> Payment {
        Payment {
            id,
            email: super::normalize_email(&self.email),
            name: self.name,
            contest_id: self.contest_id,
            contest_name: self.contest_name,
            price: self.price,
            transaction_id: self.transaction_id,
            paid_at,
            winner_name: None,
        }
    }
}

/// Attach a winner name to a registration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaymentWinner {
    #[validate(length(min = 1, max = 200))]
    pub winner_name: String,
}
