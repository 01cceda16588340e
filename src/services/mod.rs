// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - session tokens and the payment provider.

pub mod payment;
pub mod token;

pub use payment::PaymentService;
pub use token::{Claims, TokenError, TokenService};
