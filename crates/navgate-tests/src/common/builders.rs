// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Builders
//!
//! Builders for tokens and user records with sensible defaults.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use serde_json::{Map, Value};

use navgate_core::UserRecord;

// =============================================================================
// Token Builder
// =============================================================================

/// Header segment used by every built token.
const HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

/// Builder for unsigned three-segment tokens.
///
/// The signature segment is a fixed placeholder; nothing in navgate checks it.
#[derive(Debug, Clone)]
pub struct TokenBuilder {
    claims: Map<String, Value>,
}

impl Default for TokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenBuilder {
    /// Create a builder with a `sub` claim and no expiry.
    pub fn new() -> Self {
        let mut claims = Map::new();
        claims.insert("sub".to_string(), Value::from("42"));
        Self { claims }
    }

    /// Set the subject.
    pub fn subject(mut self, sub: impl Into<String>) -> Self {
        self.claims.insert("sub".to_string(), Value::from(sub.into()));
        self
    }

    /// Set `exp` to an absolute timestamp.
    pub fn expires_at(mut self, exp: i64) -> Self {
        self.claims.insert("exp".to_string(), Value::from(exp));
        self
    }

    /// Set `exp` relative to now. Negative values produce an expired token.
    pub fn expires_in(self, seconds: i64) -> Self {
        let exp = Utc::now().timestamp() + seconds;
        self.expires_at(exp)
    }

    /// Set `iat` to now.
    pub fn issued_now(mut self) -> Self {
        self.claims
            .insert("iat".to_string(), Value::from(Utc::now().timestamp()));
        self
    }

    /// Set an arbitrary claim.
    pub fn claim(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.claims.insert(key.into(), value.into());
        self
    }

    /// Remove a claim.
    pub fn without(mut self, key: &str) -> Self {
        self.claims.remove(key);
        self
    }

    /// Encode the token.
    pub fn build(self) -> String {
        let payload = Value::Object(self.claims).to_string();
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(HEADER),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }
}

// =============================================================================
// User Builder
// =============================================================================

/// Builder for stored user records.
#[derive(Debug, Clone, Default)]
pub struct UserBuilder {
    role: Option<String>,
    authorities: Vec<String>,
}

impl UserBuilder {
    /// Create a builder without role or authorities.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the role name.
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Grant a permission.
    pub fn authority(mut self, permission: impl Into<String>) -> Self {
        self.authorities.push(permission.into());
        self
    }

    /// Grant several permissions.
    pub fn authorities<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authorities
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    /// Build the record.
    pub fn build(self) -> UserRecord {
        match self.role {
            Some(role) => UserRecord::new(role, self.authorities),
            None => UserRecord {
                role: None,
                authorities: Some(self.authorities),
            },
        }
    }

    /// Build the record as stored JSON.
    pub fn to_json(self) -> String {
        self.build().to_json()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_builder_round_trips_through_decoder() {
        let token = TokenBuilder::new().subject("7").expires_at(2_000_000_000).build();
        let claims = navgate_core::decode(&token).unwrap();

        assert_eq!(claims.sub(), Some("7"));
        assert_eq!(claims.exp(), Some(2_000_000_000));
    }

    #[test]
    fn test_user_builder_without_role() {
        let user = UserBuilder::new().authority("READ_ALL_USERS").build();
        assert_eq!(user.role_name(), None);
        assert!(user.has_authority("READ_ALL_USERS"));
    }
}
