// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request guards (session authentication, the admin role check) and
//! response hardening.

pub mod admin;
pub mod auth;
pub mod security;

pub use admin::require_admin;
pub use auth::{require_auth, AuthUser};
