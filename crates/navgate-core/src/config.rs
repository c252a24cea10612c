// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Guard configuration.

use serde::{Deserialize, Serialize};

use crate::error::{NavgateError, NavgateResult};

// =============================================================================
// GuardConfig
// =============================================================================

/// Settings shared by the route guard and the permission oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Name of the login route.
    pub login_route: String,
    /// Name of the default route for authenticated users.
    pub landing_route: String,
    /// Role name that is granted every permission.
    pub bypass_role: String,
    /// Message attached to the login redirect after a session expires.
    pub expired_message: String,
    /// Session store key holding the user record.
    pub user_key: String,
    /// Session store key holding the token.
    pub token_key: String,
}

impl GuardConfig {
    /// Default session store key for the user record.
    pub const DEFAULT_USER_KEY: &'static str = "user";
    /// Default session store key for the token.
    pub const DEFAULT_TOKEN_KEY: &'static str = "token";

    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the login route name.
    pub fn with_login_route(mut self, name: impl Into<String>) -> Self {
        self.login_route = name.into();
        self
    }

    /// Sets the landing route name.
    pub fn with_landing_route(mut self, name: impl Into<String>) -> Self {
        self.landing_route = name.into();
        self
    }

    /// Sets the bypass role.
    pub fn with_bypass_role(mut self, role: impl Into<String>) -> Self {
        self.bypass_role = role.into();
        self
    }

    /// Sets the session-expired message.
    pub fn with_expired_message(mut self, message: impl Into<String>) -> Self {
        self.expired_message = message.into();
        self
    }

    /// Sets the session store keys.
    pub fn with_keys(mut self, user_key: impl Into<String>, token_key: impl Into<String>) -> Self {
        self.user_key = user_key.into();
        self.token_key = token_key.into();
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> NavgateResult<()> {
        let required = [
            ("guard.login_route", &self.login_route),
            ("guard.landing_route", &self.landing_route),
            ("guard.bypass_role", &self.bypass_role),
            ("guard.user_key", &self.user_key),
            ("guard.token_key", &self.token_key),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(NavgateError::invalid_config(field, "cannot be empty"));
            }
        }

        if self.user_key == self.token_key {
            return Err(NavgateError::invalid_config(
                "guard.token_key",
                "must differ from guard.user_key",
            ));
        }
        if self.login_route == self.landing_route {
            tracing::warn!(
                route = %self.login_route,
                "Login and landing routes are the same; logged-in users will loop"
            );
        }
        Ok(())
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            login_route: "login".to_string(),
            landing_route: "dashboard".to_string(),
            bypass_role: "Administrator".to_string(),
            expired_message: "Your session has expired. Please sign in again.".to_string(),
            user_key: Self::DEFAULT_USER_KEY.to_string(),
            token_key: Self::DEFAULT_TOKEN_KEY.to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
