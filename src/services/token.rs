// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying the caller's email, any extra claims
//! supplied at sign-in, and `iat`/`exp`. Lifetime is fixed at one hour.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::{SystemTime, UNIX_EPOCH};

/// Session lifetime in seconds.
pub const SESSION_LIFETIME_SECS: usize = 60 * 60;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Caller email (session subject)
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Any other claims supplied at sign-in
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Claims must include an email")]
    MissingEmail,

    #[error("System time error: {0}")]
    Clock(#[from] std::time::SystemTimeError),

    #[error("Token rejected: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Signs and verifies session tokens with the server secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(signing_key: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(signing_key),
            decoding_key: DecodingKey::from_secret(signing_key),
        }
    }

    /// Sign caller-supplied claims. Any `iat`/`exp` in the input is replaced.
    pub fn issue(&self, mut claims: Map<String, Value>) -> Result<String, TokenError> {
        let email = match claims.remove("email") {
            Some(Value::String(email)) if !email.trim().is_empty() => email,
            _ => return Err(TokenError::MissingEmail),
        };
        claims.remove("iat");
        claims.remove("exp");

        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;
        let claims = Claims {
            email,
            iat: now,
            exp: now + SESSION_LIFETIME_SECS,
            extra: claims,
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Check signature and expiry, returning the decoded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }
}
