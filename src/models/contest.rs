// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Contest model for storage and API.

use crate::db::DocumentId;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Review state of a contest. New contests wait for admin confirmation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    #[default]
    Pending,
    Confirmed,
}

/// Stored contest record in Firestore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Contest {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub name: String,
    /// Banner image URL
    #[serde(default)]
    pub img: Option<String>,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Task instructions for participants
    #[serde(default)]
    pub instruction: Option<String>,
    /// Prize money or description
    pub prize: String,
    /// Entry fee
    pub price: f64,
    /// Submission deadline (ISO 8601)
    pub deadline: String,
    /// Number of registered participants
    #[serde(default)]
    pub participant: u64,
    /// Organizer who created the contest
    pub creator_email: String,
    #[serde(default)]
    pub status: ContestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner_img: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner_email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Contest creation payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewContest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(url)]
    pub img: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instruction: Option<String>,
    #[validate(length(min = 1))]
    pub prize: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(length(min = 1))]
    pub deadline: String,
}

impl NewContest {
    pub fn into_contest(self, id: DocumentId, creator_email: String, created_at: String) -> Contest {
        Contest {
            id,
            name: self.name,
            img: self.img,
            category: self.category,
            description: self.description,
            instruction: self.instruction,
            prize: self.prize,
            price: self.price,
            deadline: self.deadline,
            participant: 0,
            creator_email,
            status: ContestStatus::Pending,
            winner_name: None,
            winner_img: None,
            winner_email: None,
            created_at: Some(created_at),
        }
    }
}

/// Organizer edit payload. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ContestUpdate {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(url)]
    pub img: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
    #[validate(length(min = 1))]
    pub prize: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(length(min = 1))]
    pub deadline: Option<String>,
}

impl ContestUpdate {
    pub fn apply(&self, contest: &mut Contest) {
        if let Some(v) = &self.name {
            contest.name = v.clone();
        }
        if let Some(v) = &self.img {
            contest.img = Some(v.clone());
        }
        if let Some(v) = &self.category {
            contest.category = v.clone();
        }
        if let Some(v) = &self.description {
            contest.description = Some(v.clone());
        }
        if let Some(v) = &self.instruction {
            contest.instruction = Some(v.clone());
        }
        if let Some(v) = &self.prize {
            contest.prize = v.clone();
        }
        if let Some(v) = self.price {
            contest.price = v;
        }
        if let Some(v) = &self.deadline {
            contest.deadline = v.clone();
        }
    }
}

/// Winner declaration payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WinnerUpdate {
    #[validate(length(min = 1, max = 200))]
    pub winner_name: String,
    #[serde(default)]
    #[validate(url)]
    pub winner_img: Option<String>,
    #[serde(default)]
    #[validate(email)]
    pub winner_email: Option<String>,
}

impl WinnerUpdate {
    pub fn apply(&self, contest: &mut Contest) {
        contest.winner_name = Some(self.winner_name.clone());
        contest.winner_img = self.winner_img.clone();
        contest.winner_email = self.winner_email.clone();
    }
}

/// Public projection of a contest that has a declared winner.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ContestWinner {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub img: Option<String>,
    pub name: String,
    pub category: String,
    pub prize: String,
    pub winner_name: String,
    pub winner_img: Option<String>,
}

impl ContestWinner {
    /// Project a contest, or `None` if no winner has been declared.
    pub fn from_contest(contest: Contest) -> Option<Self> {
        let winner_name = contest.winner_name?;
        Some(Self {
            id: contest.id,
            img: contest.img,
            name: contest.name,
            category: contest.category,
            prize: contest.prize,
            winner_name,
            winner_img: contest.winner_img,
        })
    }
}
