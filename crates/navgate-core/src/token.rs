// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session token inspection.
//!
//! Tokens are compact `header.payload.signature` strings. The payload is read
//! without any signature check: this module only answers "what does the token
//! claim" and "has it expired". Every failure is fail-closed, an undecodable
//! token is treated as expired.

use std::time::Duration;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::NavgateResult;

/// Standard alphabet, padding optional, trailing bits tolerated.
const FORGIVING_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

// =============================================================================
// TokenError
// =============================================================================

/// The step at which token decoding failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token has no second `.`-separated segment.
    #[error("token has no payload segment")]
    MissingPayload,

    /// The payload is not valid base64.
    #[error("payload is not valid base64: {0}")]
    InvalidBase64(String),

    /// The decoded payload is not valid UTF-8.
    #[error("payload is not valid UTF-8")]
    InvalidUtf8,

    /// The payload text is not valid JSON.
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(String),

    /// The payload is JSON but not an object.
    #[error("payload is not a claim object")]
    NotAnObject,
}

// =============================================================================
// Claims
// =============================================================================

/// The decoded claim set of a session token.
///
/// Claims are kept as an open JSON object; only the registered claims the
/// access layer cares about get typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims {
    fields: Map<String, Value>,
}

impl Claims {
    /// Creates claims from a JSON object.
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Returns a raw claim value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns the underlying claim object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Expiration time in whole seconds since the epoch.
    ///
    /// Returns `None` when `exp` is missing, non-numeric or zero. Fractional
    /// values are floored.
    pub fn exp(&self) -> Option<i64> {
        let exp = self.numeric("exp")?;
        (exp != 0).then_some(exp)
    }

    /// Issued-at time in whole seconds since the epoch.
    pub fn iat(&self) -> Option<i64> {
        self.numeric("iat")
    }

    /// Subject, typically the user identifier.
    pub fn sub(&self) -> Option<&str> {
        self.fields.get("sub").and_then(Value::as_str)
    }

    /// Returns the expiration time as a `DateTime`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp()?, 0)
    }

    /// Returns the issued-at time as a `DateTime`.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat()?, 0)
    }

    /// Returns `true` if the claims are expired at `now` (seconds).
    ///
    /// A missing expiry counts as expired. `exp == now` is still valid.
    pub fn is_expired_at(&self, now: i64) -> bool {
        match self.exp() {
            Some(exp) => exp < now,
            None => true,
        }
    }

    /// Returns the time remaining until expiration, if any.
    pub fn time_until_expiration(&self) -> Option<Duration> {
        let remaining = self.exp()?.checked_sub(Utc::now().timestamp())?;
        u64::try_from(remaining)
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    fn numeric(&self, key: &str) -> Option<i64> {
        let value = self.fields.get(key)?;
        value
            .as_i64()
            .or_else(|| value.as_f64().map(|f| f.floor() as i64))
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Decodes a token's claims without verifying its signature.
///
/// Returns `None` on any failure.
pub fn decode(token: &str) -> Option<Claims> {
    match try_decode(token) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::debug!(error = %e, "Token decode failed");
            None
        }
    }
}

/// Decodes a token's claims, reporting which step failed.
pub fn try_decode(token: &str) -> NavgateResult<Claims> {
    let payload = token.split('.').nth(1).ok_or(TokenError::MissingPayload)?;

    // URL-safe alphabet back to the standard one.
    let standard: String = payload
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    let bytes = FORGIVING_STANDARD
        .decode(standard.as_bytes())
        .map_err(|e| TokenError::InvalidBase64(e.to_string()))?;

    let text = String::from_utf8(bytes).map_err(|_| TokenError::InvalidUtf8)?;

    let value: Value =
        serde_json::from_str(&text).map_err(|e| TokenError::InvalidJson(e.to_string()))?;

    match value {
        Value::Object(fields) => Ok(Claims::from_map(fields)),
        _ => Err(TokenError::NotAnObject.into()),
    }
}

/// Returns `true` if the token is expired or cannot be decoded.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, Utc::now().timestamp())
}

/// Returns `true` if the token is expired at `now` (seconds since the epoch)
/// or cannot be decoded.
pub fn is_expired_at(token: &str, now: i64) -> bool {
    match decode(token) {
        Some(claims) => claims.is_expired_at(now),
        None => true,
    }
}

// =============================================================================
// Tests
// =============================================================================
