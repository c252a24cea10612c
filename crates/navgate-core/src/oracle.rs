// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Permission oracle.
//!
//! Answers "may the current user perform this action" from the user record in
//! the shared session. The answer is fail-closed: no user, a malformed record
//! or a missing authority list all deny.

use std::collections::HashSet;

use crate::config::GuardConfig;
use crate::session::{Session, SessionProvider, UserRecord};

// =============================================================================
// PermissionCheck
// =============================================================================

/// Anything that can answer a permission question.
///
/// The navigation visibility engine is written against this trait so it can be
/// driven by the session-backed [`PermissionOracle`] or by a fixed set.
pub trait PermissionCheck {
    /// Returns `true` if `permission` is allowed.
    fn is_allowed(&self, permission: &str) -> bool;
}

impl<F> PermissionCheck for F
where
    F: Fn(&str) -> bool,
{
    fn is_allowed(&self, permission: &str) -> bool {
        self(permission)
    }
}

// =============================================================================
// PermissionOracle
// =============================================================================

/// Session-backed permission oracle.
///
/// Each call reads the session afresh; nothing is cached.
#[derive(Debug, Clone)]
pub struct PermissionOracle {
    provider: SessionProvider,
    bypass_role: String,
}

impl PermissionOracle {
    /// Creates an oracle reading from `provider`.
    pub fn new(provider: SessionProvider, bypass_role: impl Into<String>) -> Self {
        Self {
            provider,
            bypass_role: bypass_role.into(),
        }
    }

    /// Creates an oracle using the bypass role from `config`.
    pub fn from_config(provider: SessionProvider, config: &GuardConfig) -> Self {
        Self::new(provider, config.bypass_role.clone())
    }

    /// Returns the configured bypass role.
    pub fn bypass_role(&self) -> &str {
        &self.bypass_role
    }

    /// Answers for the current session.
    pub fn is_allowed(&self, permission: &str) -> bool {
        let user = self.provider.user();
        allowed_for_raw(user.as_deref(), permission, &self.bypass_role)
    }

    /// Answers for an explicit session snapshot.
    pub fn is_allowed_in(&self, session: &Session, permission: &str) -> bool {
        allowed_for_raw(session.user.as_deref(), permission, &self.bypass_role)
    }
}

impl PermissionCheck for PermissionOracle {
    fn is_allowed(&self, permission: &str) -> bool {
        PermissionOracle::is_allowed(self, permission)
    }
}

/// Decides a permission for a parsed user record.
pub fn allowed_for(user: &UserRecord, permission: &str, bypass_role: &str) -> bool {
    if user.role.is_none() {
        return false;
    }
    if user.role_name() == Some(bypass_role) {
        return true;
    }
    user.has_authority(permission)
}

fn allowed_for_raw(raw_user: Option<&str>, permission: &str, bypass_role: &str) -> bool {
    let raw = match raw_user {
        Some(raw) if !raw.is_empty() => raw,
        _ => return false,
    };

    match UserRecord::parse(raw) {
        Ok(Some(user)) => allowed_for(&user, permission, bypass_role),
        Ok(None) => false,
        Err(e) => {
            tracing::warn!(error = %e, permission, "Error checking permission");
            false
        }
    }
}

// =============================================================================
// StaticPermissions
// =============================================================================

/// A fixed set of granted permissions.
#[derive(Debug, Clone, Default)]
pub struct StaticPermissions {
    granted: HashSet<String>,
    allow_all: bool,
}

impl StaticPermissions {
    /// Creates an empty set that denies everything.
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates a set that allows everything.
    pub fn all() -> Self {
        Self {
            granted: HashSet::new(),
            allow_all: true,
        }
    }

    /// Creates a set from permission identifiers.
    pub fn from_permissions<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            granted: permissions.into_iter().map(Into::into).collect(),
            allow_all: false,
        }
    }

    /// Adds a permission.
    pub fn add(&mut self, permission: impl Into<String>) {
        self.granted.insert(permission.into());
    }

    /// Returns the number of explicit grants.
    pub fn len(&self) -> usize {
        self.granted.len()
    }

    /// Returns `true` if there are no explicit grants.
    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }
}

impl PermissionCheck for StaticPermissions {
    fn is_allowed(&self, permission: &str) -> bool {
        self.allow_all || self.granted.contains(permission)
    }
}

// =============================================================================
// Tests
// =============================================================================
