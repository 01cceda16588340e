// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Payment/registration repository.

use super::{collections, DocumentId, DocumentStore, Query, UpdateResult};
use crate::error::AppError;
use crate::models::{normalize_email, NewPayment, Payment};

pub struct Payments<'a> {
    store: &'a DocumentStore,
}

impl<'a> Payments<'a> {
    pub(super) fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    pub async fn create(&self, new_payment: NewPayment) -> Result<DocumentId, AppError> {
        let id = DocumentId::generate()?;
        let contest_id = new_payment.contest_id;
        let payment = new_payment.into_payment(id.clone(), chrono::Utc::now().to_rfc3339());
        self.store.insert(collections::PAYMENTS, &id, &payment).await?;
        tracing::info!(payment_id = %id, contest_id, "Registration recorded");
        Ok(id)
    }

    pub async fn get(&self, id: &DocumentId) -> Result<Option<Payment>, AppError> {
        self.store.get(collections::PAYMENTS, id).await
    }

    pub async fn by_email(&self, email: &str) -> Result<Vec<Payment>, AppError> {
        self.store
            .query(collections::PAYMENTS, Query::all().eq("email", normalize_email(email)))
            .await
    }

    pub async fn by_contest(&self, contest_id: u64) -> Result<Vec<Payment>, AppError> {
        self.store
            .query(collections::PAYMENTS, Query::all().eq("contest_id", contest_id))
            .await
    }

    pub async fn set_winner(&self, id: &DocumentId, winner_name: &str) -> Result<UpdateResult, AppError> {
        self.store
            .update(collections::PAYMENTS, id, |p: &mut Payment| {
                p.winner_name = Some(winner_name.to_string())
            })
            .await
    }
}
