// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contest repository.

use super::{collections, DeleteResult, DocumentId, DocumentStore, Query, UpdateResult};
use crate::error::AppError;
use crate::models::{
    normalize_email, Contest, ContestStatus, ContestUpdate, ContestWinner, NewContest, WinnerUpdate,
};

/// Size of the popular-contests listing.
pub const POPULAR_LIMIT: u32 = 6;

pub struct Contests<'a> {
    store: &'a DocumentStore,
}

impl<'a> Contests<'a> {
    pub(super) fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Contest>, AppError> {
        self.store.query(collections::CONTESTS, Query::all()).await
    }

    pub async fn get(&self, id: &DocumentId) -> Result<Option<Contest>, AppError> {
        self.store.get(collections::CONTESTS, id).await
    }

    /// Contests whose category contains `term`, ignoring case.
    ///
    /// Firestore has no substring operator, so matching happens here.
    pub async fn search_by_category(&self, term: &str) -> Result<Vec<Contest>, AppError> {
        let needle = term.to_lowercase();
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|c| c.category.to_lowercase().contains(&needle))
            .collect())
    }

    pub async fn popular(&self) -> Result<Vec<Contest>, AppError> {
        self.store
            .query(
                collections::CONTESTS,
                Query::all().top_by("participant", POPULAR_LIMIT),
            )
            .await
    }

    pub async fn winners(&self) -> Result<Vec<ContestWinner>, AppError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter_map(ContestWinner::from_contest)
            .collect())
    }

    pub async fn by_creator(&self, email: &str) -> Result<Vec<Contest>, AppError> {
        self.store
            .query(collections::CONTESTS, Query::all().eq("creator_email", normalize_email(email)))
            .await
    }

    pub async fn create(
        &self,
        new_contest: NewContest,
        creator_email: &str,
    ) -> Result<DocumentId, AppError> {
        let id = DocumentId::generate()?;
        let contest = new_contest.into_contest(
            id.clone(),
            normalize_email(creator_email),
            chrono::Utc::now().to_rfc3339(),
        );
        self.store.insert(collections::CONTESTS, &id, &contest).await?;
        tracing::info!(contest_id = %id, creator = creator_email, "Contest created");
        Ok(id)
    }

    pub async fn confirm(&self, id: &DocumentId) -> Result<UpdateResult, AppError> {
        self.store
            .update(collections::CONTESTS, id, |c: &mut Contest| {
                c.status = ContestStatus::Confirmed
            })
            .await
    }

    pub async fn edit(&self, id: &DocumentId, update: &ContestUpdate) -> Result<UpdateResult, AppError> {
        self.store
            .update(collections::CONTESTS, id, |c: &mut Contest| update.apply(c))
            .await
    }

    pub async fn set_winner(
        &self,
        id: &DocumentId,
        winner: &WinnerUpdate,
    ) -> Result<UpdateResult, AppError> {
        self.store
            .update(collections::CONTESTS, id, |c: &mut Contest| winner.apply(c))
            .await
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<DeleteResult, AppError> {
        self.store.delete(collections::CONTESTS, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contest(category: &str, price: f64) -> NewContest {
        NewContest {
            name: format!("{category} contest"),
            img: None,
            category: category.to_string(),
            description: None,
            instruction: None,
            prize: "$100".to_string(),
            price,
            deadline: "2026-12-31".to_string(),
        }
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let store = DocumentStore::new_in_memory();
        let contests = store.contests();
        contests.create(contest("Image Design", 5.0), "o@x.com").await.unwrap();
        contests.create(contest("Article Writing", 5.0), "o@x.com").await.unwrap();

        let found = contests.search_by_category("DESIGN").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, "Image Design");

        assert!(contests.search_by_category("gaming").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_confirm_then_confirm_again_is_noop() {
        let store = DocumentStore::new_in_memory();
        let contests = store.contests();
        let id = contests.create(contest("Design", 5.0), "o@x.com").await.unwrap();

        assert_eq!(contests.confirm(&id).await.unwrap().modified_count, 1);
        assert_eq!(contests.confirm(&id).await.unwrap().modified_count, 0);
        assert_eq!(
            contests.get(&id).await.unwrap().unwrap().status,
            ContestStatus::Confirmed
        );
    }

    #[tokio::test]
    async fn test_by_creator_filters_on_email() {
        let store = DocumentStore::new_in_memory();
        let contests = store.contests();
        contests.create(contest("Design", 5.0), "a@x.com").await.unwrap();
        contests.create(contest("Writing", 5.0), "b@x.com").await.unwrap();

        let mine = contests.by_creator("a@x.com").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].creator_email, "a@x.com");
    }
}
