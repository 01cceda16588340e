// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process document store for tests and local development.
//!
//! Documents are kept as JSON values, one ordered map per collection.
//! Every operation touches a single collection shard, so single-document
//! writes are atomic with respect to each other.

use super::{Filter, Query};
use crate::error::AppError;
use dashmap::DashMap;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Default)]
pub struct MemoryBackend {
    collections: DashMap<String, BTreeMap<String, Value>>,
}

impl MemoryBackend {
    pub fn get(&self, collection: &str, id: &str) -> Option<Value> {
        self.collections
            .get(collection)
            .and_then(|docs| docs.get(id).cloned())
    }

    pub fn query(&self, collection: &str, query: &Query) -> Vec<Value> {
        let Some(docs) = self.collections.get(collection) else {
            return Vec::new();
        };

        let mut results: Vec<Value> = docs
            .values()
            .filter(|doc| query.filters.iter().all(|f| matches_filter(doc, f)))
            .cloned()
            .collect();
        drop(docs);

        if let Some(field) = query.order_desc {
            results.sort_by(|a, b| compare_numeric(b.get(field), a.get(field)));
        }
        if let Some(limit) = query.limit {
            results.truncate(limit as usize);
        }
        results
    }

    /// Insert a new document; fails if the id is taken.
    pub fn insert(&self, collection: &str, id: &str, doc: Value) -> Result<(), AppError> {
        let mut docs = self.collections.entry(collection.to_string()).or_default();
        if docs.contains_key(id) {
            return Err(AppError::Database(format!(
                "Document {}/{} already exists",
                collection, id
            )));
        }
        docs.insert(id.to_string(), doc);
        Ok(())
    }

    /// Apply `change` to an existing document while holding its shard lock.
    ///
    /// Returns `None` if the document is absent. A missing document is
    /// never created. `change` must not call back into this backend.
    pub fn update<F>(&self, collection: &str, id: &str, change: F) -> Result<Option<bool>, AppError>
    where
        F: FnOnce(&mut Value) -> Result<bool, AppError>,
    {
        let Some(mut docs) = self.collections.get_mut(collection) else {
            return Ok(None);
        };
        let Some(doc) = docs.get_mut(id) else {
            return Ok(None);
        };
        change(doc).map(Some)
    }

    pub fn delete(&self, collection: &str, id: &str) -> bool {
        self.collections
            .get_mut(collection)
            .map(|mut docs| docs.remove(id).is_some())
            .unwrap_or(false)
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .get(collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }
}

fn matches_filter(doc: &Value, filter: &Filter) -> bool {
    match filter {
        Filter::Eq(field, expected) => doc.get(*field) == Some(&expected.to_json()),
    }
}

/// Missing or non-numeric values sort last in descending order.
fn compare_numeric(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.and_then(Value::as_f64);
    let b = b.and_then(Value::as_f64);
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
