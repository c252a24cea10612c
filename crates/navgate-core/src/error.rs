// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for navgate-core.
//!
//! None of these errors escape the decision APIs (`decode`, `is_expired`,
//! `is_allowed`, guard evaluation). They are recovered into the more
//! restrictive outcome and exposed only through the `try_*` variants for
//! diagnostics.

use std::path::PathBuf;

use thiserror::Error;

use crate::token::TokenError;

/// Result type alias for navgate-core operations.
pub type NavgateResult<T> = Result<T, NavgateError>;

// =============================================================================
// NavgateError
// =============================================================================

/// Errors produced by the access-control core.
#[derive(Debug, Error)]
pub enum NavgateError {
    /// The session token could not be decoded.
    #[error("Token decode failed: {0}")]
    Token(#[from] TokenError),

    /// The stored user record is not valid JSON for a user.
    #[error("Malformed user record: {message}")]
    MalformedUser {
        /// Parser message.
        message: String,
    },

    /// The session store could not be read or written.
    #[error("Session store error at '{path}': {message}")]
    Store {
        /// Backing location of the store.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// A configuration value is invalid.
    #[error("Invalid configuration for '{field}': {message}")]
    InvalidConfig {
        /// Offending field.
        field: String,
        /// Error message.
        message: String,
    },

    /// A route name is not present in the route table.
    #[error("Unknown route: {name}")]
    UnknownRoute {
        /// Route name.
        name: String,
    },

    /// A location string could not be parsed.
    #[error("Invalid location '{location}': {message}")]
    InvalidLocation {
        /// The location as given.
        location: String,
        /// Error message.
        message: String,
    },
}

impl NavgateError {
    /// Creates a malformed user error.
    pub fn malformed_user(message: impl Into<String>) -> Self {
        Self::MalformedUser {
            message: message.into(),
        }
    }

    /// Creates a store error.
    pub fn store(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Store {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an unknown route error.
    pub fn unknown_route(name: impl Into<String>) -> Self {
        Self::UnknownRoute { name: name.into() }
    }

    /// Creates an invalid location error.
    pub fn invalid_location(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidLocation {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this error came from token decoding.
    pub fn is_token_error(&self) -> bool {
        matches!(self, Self::Token(_))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NavgateError::invalid_config("guard.login_route", "cannot be empty");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for 'guard.login_route': cannot be empty"
        );

        let err = NavgateError::unknown_route("reports");
        assert_eq!(err.to_string(), "Unknown route: reports");
    }

    #[test]
    fn test_token_error_conversion() {
        let err: NavgateError = TokenError::MissingPayload.into();
        assert!(err.is_token_error());
        assert!(!NavgateError::malformed_user("x").is_token_error());
    }
}
