// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore backend with typed document operations.

use super::{FieldValue, Filter, Query};
use crate::error::AppError;
use firestore::errors::FirestoreError;
use firestore::FirestoreWritePrecondition;
use serde::{de::DeserializeOwned, Serialize};

const MAX_UPDATE_ATTEMPTS: u32 = 3;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreBackend {
    client: firestore::FirestoreDb,
}

impl FirestoreBackend {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self { client })
    }

    pub async fn get<T>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        self.client
            .fluent()
            .select()
            .by_id_in(collection)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn exists(&self, collection: &str, id: &str) -> Result<bool, AppError> {
        let doc = self
            .client
            .fluent()
            .select()
            .by_id_in(collection)
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(doc.is_some())
    }

    pub async fn query<T>(&self, collection: &str, query: &Query) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        let mut select = self.client.fluent().select().from(collection);

        if !query.filters.is_empty() {
            let filters = query.filters.clone();
            select = select.filter(move |q| {
                let conditions: Vec<_> = filters
                    .iter()
                    .map(|filter| match filter {
                        Filter::Eq(field, FieldValue::Text(value)) => {
                            q.field(*field).eq(value.clone())
                        }
                        Filter::Eq(field, FieldValue::Integer(value)) => {
                            q.field(*field).eq(*value)
                        }
                    })
                    .collect();
                q.for_all(conditions)
            });
        }

        if let Some(field) = query.order_desc {
            select = select.order_by([(field, firestore::FirestoreQueryDirection::Descending)]);
        }

        if let Some(limit) = query.limit {
            select = select.limit(limit);
        }

        select
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a document; Firestore rejects the write if the id already exists.
    pub async fn insert<T>(&self, collection: &str, id: &str, doc: &T) -> Result<(), AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        let _: T = self
            .client
            .fluent()
            .insert()
            .into(collection)
            .document_id(id)
            .object(doc)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Read-modify-write guarded by the document's update time.
    ///
    /// Returns `None` when the document does not exist, otherwise whether
    /// anything was written. A write that loses a race against another
    /// update is retried against the fresh document; a write that loses
    /// against a delete reports the document as missing.
    pub async fn update<T, F>(
        &self,
        collection: &str,
        id: &str,
        mut change: F,
    ) -> Result<Option<bool>, AppError>
    where
        T: Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync,
        F: FnMut(&mut T) + Send,
    {
        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            let Some(doc) = self
                .client
                .fluent()
                .select()
                .by_id_in(collection)
                .one(id)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?
            else {
                return Ok(None);
            };

            let current: T = firestore::FirestoreDb::deserialize_doc_to(&doc)
                .map_err(|e| AppError::Database(format!("Malformed document: {}", e)))?;
            let mut updated = current.clone();
            change(&mut updated);
            if updated == current {
                return Ok(Some(false));
            }

            let precondition = match doc.update_time {
                Some(ts) => FirestoreWritePrecondition::UpdateTime(
                    firestore::timestamp_utils::from_timestamp(ts)
                        .map_err(|e| AppError::Database(e.to_string()))?,
                ),
                None => FirestoreWritePrecondition::Exists(true),
            };

            let written: Result<T, _> = self
                .client
                .fluent()
                .update()
                .in_col(collection)
                .precondition(precondition)
                .document_id(id)
                .object(&updated)
                .execute()
                .await;

            match written {
                Ok(_) => return Ok(Some(true)),
                Err(e) => {
                    if !self.exists(collection, id).await? {
                        return Ok(None);
                    }
                    tracing::warn!(
                        collection,
                        id,
                        attempt,
                        error = %e,
                        "Conditional update rejected"
                    );
                }
            }
        }

        Err(AppError::Database(format!(
            "Document {}/{} kept changing during update",
            collection, id
        )))
    }

    /// Delete a document if it exists. Returns whether it was there.
    pub async fn delete(&self, collection: &str, id: &str) -> Result<bool, AppError> {
        let result = self
            .client
            .fluent()
            .delete()
            .from(collection)
            .document_id(id)
            .precondition(FirestoreWritePrecondition::Exists(true))
            .execute()
            .await;

        match result {
            Ok(()) => Ok(true),
            Err(FirestoreError::DataNotFoundError(_)) => Ok(false),
            Err(e) => {
                if self.exists(collection, id).await? {
                    Err(AppError::Database(e.to_string()))
                } else {
                    Ok(false)
                }
            }
        }
    }
}
