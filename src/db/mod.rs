// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer.
//!
//! [`DocumentStore`] is the single store handle created at startup. It
//! exposes per-entity repositories (`users()`, `contests()`, ...) on top of
//! a small set of document primitives implemented by each backend.

pub mod contests;
pub mod firestore;
pub mod id;
pub mod listings;
pub mod memory;
pub mod payments;
pub mod users;

pub use contests::Contests;
pub use firestore::FirestoreBackend;
pub use id::DocumentId;
pub use listings::Listings;
pub use memory::MemoryBackend;
pub use payments::Payments;
pub use users::Users;

use crate::error::AppError;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const CONTESTS: &str = "contests";
    pub const PAYMENTS: &str = "payments";
    pub const CREATORS: &str = "creators";
    pub const REVIEWS: &str = "reviews";
    pub const ABOUT_US: &str = "about_us";
    pub const LEADERBOARD: &str = "leaderboard";
}

/// Value compared by an equality filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(u64),
}

impl FieldValue {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Text(s) => serde_json::Value::from(s.as_str()),
            FieldValue::Integer(n) => serde_json::Value::from(*n),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Integer(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(&'static str, FieldValue),
}

/// Collection query: conjunctive filters, optional descending sort, limit.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order_desc: Option<&'static str>,
    pub limit: Option<u32>,
}

impl Query {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &'static str, value: impl Into<FieldValue>) -> Self {
        self.filters.push(Filter::Eq(field, value.into()));
        self
    }

    /// Highest `n` documents by a numeric field.
    pub fn top_by(mut self, field: &'static str, n: u32) -> Self {
        self.order_desc = Some(field);
        self.limit = Some(n);
        self
    }
}

/// Outcome of a single-document update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Outcome of a single-document delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub deleted_count: u64,
}

#[derive(Clone)]
enum Backend {
    Firestore(FirestoreBackend),
    Memory(Arc<MemoryBackend>),
    Offline,
}

/// Shared document store handle. Cheap to clone.
#[derive(Clone)]
pub struct DocumentStore {
    backend: Backend,
}

impl DocumentStore {
    /// Connect to Firestore (or the emulator if FIRESTORE_EMULATOR_HOST is set).
    pub async fn connect_firestore(project_id: &str) -> Result<Self, AppError> {
        Ok(Self {
            backend: Backend::Firestore(FirestoreBackend::new(project_id).await?),
        })
    }

    /// Create an empty in-process store.
    pub fn new_in_memory() -> Self {
        tracing::info!("Using in-memory document store");
        Self {
            backend: Backend::Memory(Arc::new(MemoryBackend::default())),
        }
    }

    /// Create a mock store for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            backend: Backend::Offline,
        }
    }

    /// Number of documents in a collection (in-memory backend only).
    pub fn memory_count(&self, collection: &str) -> Option<usize> {
        match &self.backend {
            Backend::Memory(mem) => Some(mem.count(collection)),
            _ => None,
        }
    }

    // ─── Repositories ────────────────────────────────────────────

    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    pub fn contests(&self) -> Contests<'_> {
        Contests::new(self)
    }

    pub fn payments(&self) -> Payments<'_> {
        Payments::new(self)
    }

    pub fn listings(&self) -> Listings<'_> {
        Listings::new(self)
    }

    // ─── Document Primitives ─────────────────────────────────────

    pub async fn get<T>(&self, collection: &str, id: &DocumentId) -> Result<Option<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        match &self.backend {
            Backend::Firestore(fs) => fs.get(collection, id.as_str()).await,
            Backend::Memory(mem) => mem
                .get(collection, id.as_str())
                .map(from_json)
                .transpose(),
            Backend::Offline => Err(offline()),
        }
    }

    pub async fn query<T>(&self, collection: &str, query: Query) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        match &self.backend {
            Backend::Firestore(fs) => fs.query(collection, &query).await,
            Backend::Memory(mem) => mem
                .query(collection, &query)
                .into_iter()
                .map(from_json)
                .collect(),
            Backend::Offline => Err(offline()),
        }
    }

    /// First document matching the query, if any.
    pub async fn find_one<T>(&self, collection: &str, mut query: Query) -> Result<Option<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        query.limit = Some(1);
        Ok(self.query(collection, query).await?.into_iter().next())
    }

    /// Create a document under `id`. Fails if the id is already taken.
    pub async fn insert<T>(&self, collection: &str, id: &DocumentId, doc: &T) -> Result<(), AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        match &self.backend {
            Backend::Firestore(fs) => fs.insert(collection, id.as_str(), doc).await,
            Backend::Memory(mem) => mem.insert(collection, id.as_str(), to_json(doc)?),
            Backend::Offline => Err(offline()),
        }
    }

    /// Apply `change` to a document and write it back if anything changed.
    ///
    /// The write only lands on the version that was read, so an update
    /// racing a delete reports no match instead of recreating the document.
    pub async fn update<T, F>(
        &self,
        collection: &str,
        id: &DocumentId,
        mut change: F,
    ) -> Result<UpdateResult, AppError>
    where
        T: Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync,
        F: FnMut(&mut T) + Send,
    {
        let outcome = match &self.backend {
            Backend::Firestore(fs) => fs.update(collection, id.as_str(), change).await?,
            Backend::Memory(mem) => mem.update(collection, id.as_str(), |doc| {
                let current: T = from_json(doc.clone())?;
                let mut updated = current.clone();
                change(&mut updated);
                if updated == current {
                    return Ok(false);
                }
                *doc = to_json(&updated)?;
                Ok(true)
            })?,
            Backend::Offline => return Err(offline()),
        };

        Ok(match outcome {
            None => UpdateResult {
                matched_count: 0,
                modified_count: 0,
            },
            Some(modified) => UpdateResult {
                matched_count: 1,
                modified_count: u64::from(modified),
            },
        })
    }

    pub async fn delete(&self, collection: &str, id: &DocumentId) -> Result<DeleteResult, AppError> {
        let deleted = match &self.backend {
            Backend::Firestore(fs) => fs.delete(collection, id.as_str()).await?,
            Backend::Memory(mem) => mem.delete(collection, id.as_str()),
            Backend::Offline => return Err(offline()),
        };

        Ok(DeleteResult {
            deleted_count: u64::from(deleted),
        })
    }
}

fn offline() -> AppError {
    AppError::Database("Database not connected (offline mode)".to_string())
}

fn to_json<T: Serialize>(doc: &T) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(doc)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode document: {}", e)))
}

fn from_json<T: DeserializeOwned>(doc: serde_json::Value) -> Result<T, AppError> {
    serde_json::from_value(doc)
        .map_err(|e| AppError::Database(format!("Malformed document: {}", e)))
}
