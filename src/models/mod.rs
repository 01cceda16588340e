// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod contest;
pub mod listing;
pub mod payment;
pub mod user;

pub use contest::{Contest, ContestStatus, ContestUpdate, ContestWinner, NewContest, WinnerUpdate};
pub use listing::{AboutEntry, Creator, LeaderboardEntry, Review};
pub use payment::{NewPayment, Payment, PaymentWinner};
pub use user::{normalize_email, NewUser, ProfileUpdate, Role, RoleUpdate, User};
