// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # navgate-core
//!
//! Client-side access control for single-page applications.
//!
//! This crate decides, from a locally held (unverified) session token and a
//! statically declared permission set:
//!
//! - **Token**: decoding the claims of a compact token without verifying it,
//!   and whether it has expired
//! - **Oracle**: whether the current user may perform an action
//! - **Navigation**: which menu links, groups and headings are visible
//! - **Guard**: whether a route may be entered, or where to redirect
//!
//! Every failure degrades to the more restrictive outcome: undecodable tokens
//! are expired, malformed user records deny, missing sessions redirect to
//! login. This is a UX-layer gate, not a security boundary.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use navgate_core::{GuardConfig, MemorySessionStore, RouteGuard, RouteTable, SessionProvider};
//!
//! let config = GuardConfig::default();
//! let store = Arc::new(MemorySessionStore::new());
//! let guard = RouteGuard::new(SessionProvider::from_config(store, &config), config);
//!
//! let decision = guard.navigate(&table, "/orders?page=2")?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Core Modules
// =============================================================================

pub mod config;
pub mod error;
pub mod session;
pub mod token;

// =============================================================================
// Decision Modules
// =============================================================================

pub mod guard;
pub mod navigation;
pub mod oracle;
pub mod routes;

// =============================================================================
// Reference Data
// =============================================================================

pub mod catalog;

// =============================================================================
// Re-exports for convenience
// =============================================================================

pub use config::GuardConfig;
pub use error::{NavgateError, NavgateResult};

pub use token::{decode, is_expired, is_expired_at, try_decode, Claims, TokenError};

pub use session::{
    FileSessionStore, MemorySessionStore, RoleRef, Session, SessionProvider, SessionStore,
    UserRecord,
};

pub use oracle::{allowed_for, PermissionCheck, PermissionOracle, StaticPermissions};

pub use navigation::{
    required_permissions, NavChild, NavGroup, NavHeading, NavIcon, NavItem, NavLink, NavMeta,
    NavTarget, VisibilityEngine,
};

pub use routes::{RouteLocation, RouteMeta, RouteRecord, RouteRedirect, RouteTable};

pub use guard::{GuardDecision, Redirect, RouteGuard};

pub use catalog::{PermissionCatalog, PermissionEntry, ResourceGroup};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
