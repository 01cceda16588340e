// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use crate::db::DocumentId;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Access role stored on each user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    #[serde(alias = "user")]
    Normal,
}

/// User profile stored in Firestore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct User {
    /// Document ID
    #[serde(rename = "_id")]
    pub id: DocumentId,
    /// Email address in canonical form (unique across users)
    pub email: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Profile picture URL
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub role: Role,
    /// When the user first signed up (RFC 3339)
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Canonical form of an email address: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Sign-up payload. The role is never taken from the client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(url)]
    pub photo: Option<String>,
}

impl NewUser {
    pub fn into_user(self, id: DocumentId, created_at: String) -> User {
        User {
            id,
            email: normalize_email(&self.email),
            name: self.name,
            photo: self.photo,
            role: Role::Normal,
            created_at: Some(created_at),
        }
    }
}

/// Admin role change payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleUpdate {
    pub role: Role,
}

/// Self-service profile update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(url)]
    pub photo: Option<String>,
}

impl ProfileUpdate {
    pub fn apply(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = Some(name.clone());
        }
        if let Some(photo) = &self.photo {
            user.photo = Some(photo.clone());
        }
    }
}
