// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Route table and location resolution.
//!
//! Routes are declared by name and path pattern. Path patterns are made of
//! static segments and `:param` segments. Resolving a location yields a
//! [`RouteLocation`] carrying the route meta consumed by the guard. A location
//! that matches no record resolves with an empty `matched` list and default
//! meta.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{NavgateError, NavgateResult};

/// Base used to parse application-relative locations.
const LOCATION_BASE: &str = "http://navgate.local/";

// =============================================================================
// RouteMeta
// =============================================================================

/// Per-route metadata read by the guard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteMeta {
    /// Always enterable, regardless of session.
    pub public: bool,
    /// Informational; the guard enforces login through the matched check.
    pub requires_auth: bool,
    /// Permission identifier associated with the route.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_permission: Option<String>,
    /// Only for logged-out users.
    pub unauthenticated_only: bool,
}

impl RouteMeta {
    /// Meta for a public route.
    pub fn public() -> Self {
        Self {
            public: true,
            ..Self::default()
        }
    }

    /// Meta for a route that requires a login.
    pub fn authenticated() -> Self {
        Self {
            requires_auth: true,
            ..Self::default()
        }
    }

    /// Meta for a route reserved to logged-out users.
    pub fn unauthenticated_only() -> Self {
        Self {
            unauthenticated_only: true,
            ..Self::default()
        }
    }

    /// Sets the required permission.
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.requires_permission = Some(permission.into());
        self
    }
}

// =============================================================================
// RouteRecord
// =============================================================================

/// Redirect attached to a route record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteRedirect {
    /// Landing route when a user entry is present, login route otherwise.
    SessionLanding,
}

/// A declared route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    /// Unique route name.
    pub name: String,
    /// Path pattern, e.g. `/orders/:id/edit`.
    pub path: String,
    /// Route metadata.
    #[serde(default)]
    pub meta: RouteMeta,
    /// Redirect applied before guards run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<RouteRedirect>,
}

impl RouteRecord {
    /// Creates a record with default meta.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            meta: RouteMeta::default(),
            redirect: None,
        }
    }

    /// Sets the meta.
    pub fn with_meta(mut self, meta: RouteMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Sets the record redirect.
    pub fn with_redirect(mut self, redirect: RouteRedirect) -> Self {
        self.redirect = Some(redirect);
        self
    }

    /// Matches a normalized path against this record's pattern.
    ///
    /// Segments are compared as they appear in the URL, so captured params
    /// keep their percent-encoding. Returns the captured params and the number
    /// of static segments.
    fn match_path(&self, path: &str) -> Option<(BTreeMap<String, String>, usize)> {
        let pattern: Vec<&str> = segments(&self.path).collect();
        let actual: Vec<&str> = segments(path).collect();
        if pattern.len() != actual.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        let mut statics = 0;
        for (expected, value) in pattern.iter().zip(&actual) {
            match expected.strip_prefix(':') {
                Some(param) => {
                    params.insert(param.to_string(), (*value).to_string());
                }
                None if expected == value => statics += 1,
                None => return None,
            }
        }
        Some((params, statics))
    }

    /// Builds a concrete path by substituting `params`.
    fn build_path(&self, params: &BTreeMap<String, String>) -> NavgateResult<String> {
        let mut out = String::new();
        for segment in segments(&self.path) {
            out.push('/');
            match segment.strip_prefix(':') {
                Some(param) => {
                    let value = params.get(param).ok_or_else(|| {
                        NavgateError::invalid_location(
                            &self.path,
                            format!("missing route param '{param}'"),
                        )
                    })?;
                    out.push_str(value);
                }
                None => out.push_str(segment),
            }
        }
        if out.is_empty() {
            out.push('/');
        }
        Ok(out)
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

// =============================================================================
// RouteLocation
// =============================================================================

/// A resolved navigation target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLocation {
    /// Name of the matched route.
    pub name: Option<String>,
    /// Path without query or hash.
    pub path: String,
    /// Path plus query and hash, as requested.
    pub full_path: String,
    /// Query parameters; the last value wins for repeated keys.
    pub query: BTreeMap<String, String>,
    /// Captured path params, still percent-encoded.
    pub params: BTreeMap<String, String>,
    /// Path patterns of the matched records. Empty when nothing matched.
    pub matched: Vec<String>,
    /// Meta of the matched route, default when unmatched.
    pub meta: RouteMeta,
    /// Record redirect of the matched route.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<RouteRedirect>,
}

impl RouteLocation {
    /// Returns `true` if the location resolved to a declared route.
    pub fn is_matched(&self) -> bool {
        !self.matched.is_empty()
    }

    /// Returns `true` if this location is the named route.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    /// Returns `true` if the full path is the application root.
    pub fn is_root(&self) -> bool {
        self.full_path == "/"
    }
}

// =============================================================================
// RouteTable
// =============================================================================

/// The declared routes, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTable {
    records: Vec<RouteRecord>,
}

impl RouteTable {
    /// Creates a route table.
    pub fn new(records: Vec<RouteRecord>) -> Self {
        Self { records }
    }

    /// Returns the records.
    pub fn records(&self) -> &[RouteRecord] {
        &self.records
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a record by name.
    pub fn get(&self, name: &str) -> Option<&RouteRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Returns `true` if a route with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Resolves an application-relative location such as `/orders/7?tab=items`.
    ///
    /// The location must start with a single `/`. A second `/` or `\` would
    /// make it a network-path reference and is rejected.
    pub fn resolve(&self, location: &str) -> NavgateResult<RouteLocation> {
        let mut chars = location.chars();
        if chars.next() != Some('/') || matches!(chars.next(), Some('/' | '\\')) {
            return Err(NavgateError::invalid_location(
                location,
                "must be an absolute path starting with '/'",
            ));
        }

        let base = Url::parse(LOCATION_BASE)
            .map_err(|e| NavgateError::invalid_location(location, e.to_string()))?;
        let url = base
            .join(location)
            .map_err(|e| NavgateError::invalid_location(location, e.to_string()))?;
        if url.host_str() != base.host_str() {
            return Err(NavgateError::invalid_location(
                location,
                "must stay within the application",
            ));
        }

        let path = url.path().to_string();
        let query: BTreeMap<String, String> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let mut full_path = path.clone();
        if let Some(q) = url.query() {
            full_path.push('?');
            full_path.push_str(q);
        }
        if let Some(fragment) = url.fragment() {
            full_path.push('#');
            full_path.push_str(fragment);
        }

        let mut location = RouteLocation {
            path,
            full_path,
            query,
            ..RouteLocation::default()
        };

        match self.best_match(&location.path) {
            Some((record, params)) => {
                tracing::debug!(route = %record.name, path = %location.path, "Location matched");
                location.name = Some(record.name.clone());
                location.params = params;
                location.matched = vec![record.path.clone()];
                location.meta = record.meta.clone();
                location.redirect = record.redirect;
            }
            None => {
                tracing::debug!(path = %location.path, "Location matched no route");
            }
        }
        Ok(location)
    }

    /// Resolves a named route with query parameters.
    pub fn resolve_named(
        &self,
        name: &str,
        query: &BTreeMap<String, String>,
    ) -> NavgateResult<RouteLocation> {
        self.resolve_named_with_params(name, &BTreeMap::new(), query)
    }

    /// Resolves a named route with path params and query parameters.
    pub fn resolve_named_with_params(
        &self,
        name: &str,
        params: &BTreeMap<String, String>,
        query: &BTreeMap<String, String>,
    ) -> NavgateResult<RouteLocation> {
        let record = self
            .get(name)
            .ok_or_else(|| NavgateError::unknown_route(name))?;
        let path = record.build_path(params)?;

        let full_path = if query.is_empty() {
            path.clone()
        } else {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query.iter())
                .finish();
            format!("{path}?{encoded}")
        };

        Ok(RouteLocation {
            name: Some(record.name.clone()),
            path,
            full_path,
            query: query.clone(),
            params: params.clone(),
            matched: vec![record.path.clone()],
            meta: record.meta.clone(),
            redirect: record.redirect,
        })
    }

    /// Checks that names are unique and non-empty and that paths are absolute.
    pub fn validate(&self) -> NavgateResult<()> {
        let mut names = HashSet::new();
        for record in &self.records {
            if record.name.trim().is_empty() {
                return Err(NavgateError::invalid_config(
                    "routes",
                    format!("route with path '{}' has an empty name", record.path),
                ));
            }
            if !record.path.starts_with('/') {
                return Err(NavgateError::invalid_config(
                    format!("routes.{}", record.name),
                    format!("path '{}' must start with '/'", record.path),
                ));
            }
            if !names.insert(record.name.as_str()) {
                return Err(NavgateError::invalid_config(
                    format!("routes.{}", record.name),
                    "duplicate route name",
                ));
            }
        }
        Ok(())
    }

    /// Returns every `requiresPermission` identifier with its route name.
    pub fn required_permissions(&self) -> Vec<(&str, &str)> {
        self.records
            .iter()
            .filter_map(|r| {
                r.meta
                    .requires_permission
                    .as_deref()
                    .filter(|p| !p.is_empty())
                    .map(|p| (r.name.as_str(), p))
            })
            .collect()
    }

    /// Most specific match: more static segments win, then declaration order.
    fn best_match(&self, path: &str) -> Option<(&RouteRecord, BTreeMap<String, String>)> {
        let mut best: Option<(&RouteRecord, BTreeMap<String, String>, usize)> = None;
        for record in &self.records {
            if let Some((params, statics)) = record.match_path(path) {
                if best.as_ref().map_or(true, |(_, _, s)| statics > *s) {
                    best = Some((record, params, statics));
                }
            }
        }
        best.map(|(record, params, _)| (record, params))
    }
}

impl FromIterator<RouteRecord> for RouteTable {
    fn from_iter<I: IntoIterator<Item = RouteRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// =============================================================================
// Tests
// =============================================================================
