// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Pre-navigation route guard.
//!
//! The guard runs before every navigation and returns either
//! [`GuardDecision::Proceed`] or a [`Redirect`]. Rules are evaluated in order
//! and the first match wins:
//!
//! 1. public routes always proceed
//! 2. the session is logged in when both user and token are present
//! 3. a logged-in session with an expired token is cleared and sent to login
//!    with the intended path and the expiry message
//! 4. a logged-in user asking for the login route goes to the landing route
//! 5. a logged-out user asking for any other declared route goes to login,
//!    keeping the original query and the intended path
//! 6. `unauthenticatedOnly` routes send logged-in users to the landing route
//! 7. everything else proceeds
//!
//! Clearing the session in rule 3 is the only side effect. It completes
//! before the redirect is returned.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;

use crate::config::GuardConfig;
use crate::error::NavgateResult;
use crate::routes::{RouteLocation, RouteRedirect, RouteTable};
use crate::session::SessionProvider;
use crate::token;

/// Query key carrying the intended path.
pub const QUERY_TO: &str = "to";

/// Query key carrying a user-facing message.
pub const QUERY_MESSAGE: &str = "message";

// =============================================================================
// Redirect / GuardDecision
// =============================================================================

/// A redirect to a named route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Redirect {
    /// Target route name.
    pub route_name: String,
    /// Query parameters for the target.
    pub query: BTreeMap<String, String>,
}

impl Redirect {
    /// Creates a redirect with an empty query.
    pub fn new(route_name: impl Into<String>) -> Self {
        Self {
            route_name: route_name.into(),
            query: BTreeMap::new(),
        }
    }

    /// Replaces the query.
    pub fn with_query(mut self, query: BTreeMap<String, String>) -> Self {
        self.query = query;
        self
    }

    /// Adds a query parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Returns the intended path, if forwarded.
    pub fn to(&self) -> Option<&str> {
        self.query.get(QUERY_TO).map(String::as_str)
    }

    /// Returns the attached message, if any.
    pub fn message(&self) -> Option<&str> {
        self.query.get(QUERY_MESSAGE).map(String::as_str)
    }
}

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Navigation continues unchanged.
    Proceed,
    /// Navigation is replaced by a redirect.
    Redirect(Redirect),
}

impl GuardDecision {
    /// Returns `true` if navigation proceeds.
    pub fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed)
    }

    /// Returns the redirect, if any.
    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            Self::Proceed => None,
            Self::Redirect(r) => Some(r),
        }
    }
}

impl From<Redirect> for GuardDecision {
    fn from(redirect: Redirect) -> Self {
        Self::Redirect(redirect)
    }
}

// =============================================================================
// RouteGuard
// =============================================================================

/// The route guard state machine.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    provider: SessionProvider,
    config: GuardConfig,
}

impl RouteGuard {
    /// Creates a guard.
    pub fn new(provider: SessionProvider, config: GuardConfig) -> Self {
        Self { provider, config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Returns the session provider.
    pub fn provider(&self) -> &SessionProvider {
        &self.provider
    }

    /// Evaluates the guard against the current wall clock.
    pub fn before_each(&self, to: &RouteLocation) -> GuardDecision {
        self.before_each_at(to, Utc::now().timestamp())
    }

    /// Evaluates the guard at `now` (seconds since epoch).
    pub fn before_each_at(&self, to: &RouteLocation, now: i64) -> GuardDecision {
        if to.meta.public {
            tracing::debug!(path = %to.full_path, "Public route");
            return GuardDecision::Proceed;
        }

        let session = self.provider.snapshot();
        let logged_in = session.is_logged_in();

        if let Some(token) = session.token.as_deref().filter(|_| logged_in) {
            if token::is_expired_at(token, now) {
                return self.expire_session(to).into();
            }
        }

        let to_login = to.is_named(&self.config.login_route);

        if to_login && logged_in {
            tracing::debug!(route = %self.config.landing_route, "Already logged in");
            return Redirect::new(&self.config.landing_route).into();
        }

        if !logged_in && to.is_matched() && !to_login {
            let mut query = to.query.clone();
            match intended_path(to) {
                Some(path) => {
                    query.insert(QUERY_TO.to_string(), path);
                }
                None => {
                    query.remove(QUERY_TO);
                }
            }
            tracing::debug!(path = %to.full_path, "Not logged in, redirecting to login");
            return Redirect::new(&self.config.login_route)
                .with_query(query)
                .into();
        }

        if to.meta.unauthenticated_only && logged_in {
            tracing::debug!(path = %to.full_path, "Route is for logged-out users only");
            return Redirect::new(&self.config.landing_route).into();
        }

        GuardDecision::Proceed
    }

    /// Resolves the session-landing redirect of the index route.
    pub fn resolve_index(&self, query: &BTreeMap<String, String>) -> Redirect {
        if self.provider.snapshot().has_user() {
            Redirect::new(&self.config.landing_route)
        } else {
            Redirect::new(&self.config.login_route).with_query(query.clone())
        }
    }

    /// Resolves `location`, applies its record redirect, then runs the guard.
    ///
    /// When a record redirect applies and the guard lets its target through,
    /// the record redirect is the decision.
    pub fn navigate(&self, table: &RouteTable, location: &str) -> NavgateResult<GuardDecision> {
        self.navigate_at(table, location, Utc::now().timestamp())
    }

    /// [`navigate`](Self::navigate) at an explicit instant.
    pub fn navigate_at(
        &self,
        table: &RouteTable,
        location: &str,
        now: i64,
    ) -> NavgateResult<GuardDecision> {
        let to = table.resolve(location)?;

        match to.redirect {
            Some(RouteRedirect::SessionLanding) => {
                let redirect = self.resolve_index(&to.query);
                let target = table.resolve_named(&redirect.route_name, &redirect.query)?;
                Ok(match self.before_each_at(&target, now) {
                    GuardDecision::Proceed => redirect.into(),
                    decision => decision,
                })
            }
            None => Ok(self.before_each_at(&to, now)),
        }
    }

    fn expire_session(&self, to: &RouteLocation) -> Redirect {
        if let Err(e) = self.provider.clear() {
            tracing::warn!(error = %e, "Failed to clear expired session");
        } else {
            tracing::info!(path = %to.full_path, "Session expired, cleared");
        }

        let mut redirect = Redirect::new(&self.config.login_route);
        if let Some(path) = intended_path(to) {
            redirect = redirect.with_param(QUERY_TO, path);
        }
        redirect.with_param(QUERY_MESSAGE, &self.config.expired_message)
    }
}

/// The bare path to forward, or `None` when the full path is the root.
fn intended_path(to: &RouteLocation) -> Option<String> {
    (!to.is_root()).then(|| to.path.clone())
}

// =============================================================================
// Tests
// =============================================================================
