// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User repository.

use super::{collections, DeleteResult, DocumentId, DocumentStore, Query, UpdateResult};
use crate::error::AppError;
use crate::models::{normalize_email, NewUser, ProfileUpdate, Role, User};

/// Result of a sign-up attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateUserOutcome {
    Created(DocumentId),
    AlreadyExists,
}

pub struct Users<'a> {
    store: &'a DocumentStore,
}

impl<'a> Users<'a> {
    pub(super) fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        self.store.query(collections::USERS, Query::all()).await
    }

    pub async fn get(&self, id: &DocumentId) -> Result<Option<User>, AppError> {
        self.store.get(collections::USERS, id).await
    }

    /// Look up a user by email, ignoring case and surrounding whitespace.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.store
            .find_one(
                collections::USERS,
                Query::all().eq("email", normalize_email(email)),
            )
            .await
    }

    /// Register a user unless one with the same email already exists.
    ///
    /// The document id is derived from the email, so two concurrent sign-ups
    /// for one address cannot both insert.
    pub async fn create(&self, new_user: NewUser) -> Result<CreateUserOutcome, AppError> {
        if self.find_by_email(&new_user.email).await?.is_some() {
            return Ok(CreateUserOutcome::AlreadyExists);
        }

        let id = DocumentId::for_key(&new_user.email);
        let user = new_user.into_user(id.clone(), chrono::Utc::now().to_rfc3339());

        match self.store.insert(collections::USERS, &id, &user).await {
            Ok(()) => {
                tracing::info!(user_id = %id, "User created");
                Ok(CreateUserOutcome::Created(id))
            }
            Err(err) => {
                // Lost a race with a concurrent sign-up for the same email.
                if self.get(&id).await?.is_some() {
                    Ok(CreateUserOutcome::AlreadyExists)
                } else {
                    Err(err)
                }
            }
        }
    }

    pub async fn set_role(&self, id: &DocumentId, role: Role) -> Result<UpdateResult, AppError> {
        self.store
            .update(collections::USERS, id, |user: &mut User| user.role = role)
            .await
    }

    pub async fn update_profile(
        &self,
        email: &str,
        update: &ProfileUpdate,
    ) -> Result<UpdateResult, AppError> {
        let Some(user) = self.find_by_email(email).await? else {
            return Ok(UpdateResult {
                matched_count: 0,
                modified_count: 0,
            });
        };

        self.store
            .update(collections::USERS, &user.id, |user: &mut User| {
                update.apply(user)
            })
            .await
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<DeleteResult, AppError> {
        self.store.delete(collections::USERS, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            name: Some("Ada".to_string()),
            photo: None,
        }
    }

    #[tokio::test]
    async fn test_create_is_idempotent() {
        let store = DocumentStore::new_in_memory();
        let users = store.users();

        let first = users.create(new_user("ada@example.com")).await.unwrap();
        assert!(matches!(first, CreateUserOutcome::Created(_)));

        let second = users.create(new_user("ada@example.com")).await.unwrap();
        assert_eq!(second, CreateUserOutcome::AlreadyExists);

        assert_eq!(users.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_set_role_and_lookup() {
        let store = DocumentStore::new_in_memory();
        let users = store.users();

        let CreateUserOutcome::Created(id) = users.create(new_user("ada@example.com")).await.unwrap()
        else {
            panic!("expected new user");
        };

        let result = users.set_role(&id, Role::Admin).await.unwrap();
        assert_eq!(result.modified_count, 1);

        let user = users.find_by_email("ada@example.com").await.unwrap().unwrap();
        assert!(user.is_admin());
    }

    #[tokio::test]
    async fn test_update_profile_unknown_email_matches_nothing() {
        let store = DocumentStore::new_in_memory();
        let result = store
            .users()
            .update_profile("ghost@example.com", &ProfileUpdate::default())
            .await
            .unwrap();
        assert_eq!(result.matched_count, 0);
    }

    #[tokio::test]
    async fn test_email_lookup_ignores_case() {
        let store = DocumentStore::new_in_memory();
        let users = store.users();

        let CreateUserOutcome::Created(id) = users.create(new_user("Ada@Example.com")).await.unwrap()
        else {
            panic!("expected new user");
        };

        let user = users.find_by_email("ada@example.com").await.unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.email, "ada@example.com");
        assert!(users.find_by_email(" ADA@example.com").await.unwrap().is_some());

        let again = users.create(new_user("ada@EXAMPLE.com")).await.unwrap();
        assert_eq!(again, CreateUserOutcome::AlreadyExists);
    }
}
