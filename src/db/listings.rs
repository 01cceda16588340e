// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-only showcase collections.

use super::{collections, DocumentStore, Query};
use crate::error::AppError;
use crate::models::{AboutEntry, Creator, LeaderboardEntry, Review};

/// Size of the best-creators listing.
pub const BEST_CREATORS_LIMIT: u32 = 3;

pub struct Listings<'a> {
    store: &'a DocumentStore,
}

impl<'a> Listings<'a> {
    pub(super) fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    pub async fn best_creators(&self) -> Result<Vec<Creator>, AppError> {
        self.store
            .query(
                collections::CREATORS,
                Query::all().top_by("participant", BEST_CREATORS_LIMIT),
            )
            .await
    }

    pub async fn reviews(&self) -> Result<Vec<Review>, AppError> {
        self.store.query(collections::REVIEWS, Query::all()).await
    }

    pub async fn about_us(&self) -> Result<Vec<AboutEntry>, AppError> {
        self.store.query(collections::ABOUT_US, Query::all()).await
    }

    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, AppError> {
        self.store.query(collections::LEADERBOARD, Query::all()).await
    }
}
