// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Document identifiers.
//!
//! Ids are 12 bytes rendered as 24 lowercase hex characters: a 4-byte
//! big-endian creation timestamp followed by 8 random bytes, so ids sort
//! roughly by creation time.

use crate::error::AppError;
use ring::digest;
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const ID_BYTES: usize = 12;
const ID_HEX_LEN: usize = ID_BYTES * 2;

/// Store-native document identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(type = "string"))]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Generate a fresh id.
    pub fn generate() -> Result<Self, AppError> {
        let mut bytes = [0u8; ID_BYTES];
        let secs = chrono::Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        SystemRandom::new()
            .fill(&mut bytes[4..])
            .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG unavailable")))?;
        Ok(Self(hex::encode(bytes)))
    }

    /// Deterministic id for a natural key (used to make user emails unique).
    pub fn for_key(key: &str) -> Self {
        let hash = digest::digest(&digest::SHA256, key.trim().to_lowercase().as_bytes());
        Self(hex::encode(&hash.as_ref()[..ID_BYTES]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for DocumentId {
    type Err = AppError;

    /// Parse an externally supplied id. Anything but 24 hex characters is a
    /// client error.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.len() != ID_HEX_LEN || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AppError::BadRequest(format!("Invalid id '{}'", raw)));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
