// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures
//!
//! Pre-built sessions, route tables and menus for consistent testing.
//!
//! The route table and menu mirror the shape of `config/navgate.yaml` in a
//! reduced form so guard and navigation suites do not depend on file IO.

use std::path::PathBuf;
use std::sync::Arc;

use navgate_core::{
    GuardConfig, MemorySessionStore, NavChild, NavGroup, NavHeading, NavItem, NavLink,
    PermissionOracle, RouteGuard, RouteMeta, RouteRecord, RouteRedirect, RouteTable,
    SessionProvider, SessionStore,
};

use super::builders::{TokenBuilder, UserBuilder};

/// A fixed instant used by time-sensitive tests.
pub const NOW: i64 = 1_700_000_000;

// =============================================================================
// User Fixtures
// =============================================================================

/// Fixture providing stored user records.
pub struct UserFixtures;

impl UserFixtures {
    /// A user holding the bypass role and no explicit authorities.
    pub fn administrator() -> String {
        UserBuilder::new().role("Administrator").to_json()
    }

    /// A seller who can see orders and customers.
    pub fn seller() -> String {
        UserBuilder::new()
            .role("Seller")
            .authorities(["READ_ALL_ORDERS", "READ_ALL_CLIENTS", "UPDATE_ONE_ORDER"])
            .to_json()
    }

    /// A warehouse operator with a single material permission.
    pub fn warehouse() -> String {
        UserBuilder::new()
            .role("Warehouse")
            .authorities(["READ_ALL_SUPPLIERS"])
            .to_json()
    }

    /// A user with a role and an empty authority list.
    pub fn no_permissions() -> String {
        UserBuilder::new().role("Guest").to_json()
    }
}

// =============================================================================
// Session Fixtures
// =============================================================================

/// Fixture providing session store states.
pub struct SessionFixtures;

impl SessionFixtures {
    /// An empty store.
    pub fn anonymous() -> Arc<MemorySessionStore> {
        Arc::new(MemorySessionStore::new())
    }

    /// A store with both user and token.
    pub fn logged_in(user: &str, token: &str) -> Arc<MemorySessionStore> {
        Arc::new(MemorySessionStore::with_entries([
            (GuardConfig::DEFAULT_USER_KEY, user),
            (GuardConfig::DEFAULT_TOKEN_KEY, token),
        ]))
    }

    /// A seller whose token is valid at [`NOW`].
    pub fn active_seller() -> Arc<MemorySessionStore> {
        Self::logged_in(
            &UserFixtures::seller(),
            &TokenBuilder::new().expires_at(NOW + 3600).build(),
        )
    }

    /// A seller whose token expired before [`NOW`].
    pub fn expired_seller() -> Arc<MemorySessionStore> {
        Self::logged_in(
            &UserFixtures::seller(),
            &TokenBuilder::new().expires_at(NOW - 60).build(),
        )
    }

    /// A store holding a user entry but no token.
    pub fn user_only(user: &str) -> Arc<MemorySessionStore> {
        Arc::new(MemorySessionStore::with_entries([(
            GuardConfig::DEFAULT_USER_KEY,
            user,
        )]))
    }
}

// =============================================================================
// Route Fixtures
// =============================================================================

/// Fixture providing route tables and guards.
pub struct RouteFixtures;

impl RouteFixtures {
    /// A route table covering every guard rule.
    pub fn table() -> RouteTable {
        RouteTable::new(vec![
            RouteRecord::new("index", "/").with_redirect(RouteRedirect::SessionLanding),
            RouteRecord::new("login", "/login").with_meta(RouteMeta::unauthenticated_only()),
            RouteRecord::new("forgot-password", "/forgot-password")
                .with_meta(RouteMeta::public()),
            RouteRecord::new("register", "/register")
                .with_meta(RouteMeta::unauthenticated_only()),
            RouteRecord::new("dashboard", "/dashboard").with_meta(
                RouteMeta::authenticated().with_permission("SHOW_REPORT_GRAPHICS"),
            ),
            RouteRecord::new("orders", "/orders")
                .with_meta(RouteMeta::authenticated().with_permission("READ_ALL_ORDERS")),
            RouteRecord::new("order-preview", "/orders/preview")
                .with_meta(RouteMeta::authenticated().with_permission("READ_ALL_ORDERS")),
            RouteRecord::new("order-detail", "/orders/detail/:id")
                .with_meta(RouteMeta::authenticated().with_permission("READ_ALL_ORDERS")),
            RouteRecord::new("users", "/users")
                .with_meta(RouteMeta::authenticated().with_permission("READ_ALL_USERS")),
        ])
    }

    /// A guard with default settings over `store`.
    pub fn guard(store: Arc<dyn SessionStore>) -> RouteGuard {
        RouteGuard::new(SessionProvider::new(store), GuardConfig::default())
    }

    /// An oracle with default settings over `store`.
    pub fn oracle(store: Arc<dyn SessionStore>) -> PermissionOracle {
        PermissionOracle::from_config(SessionProvider::new(store), &GuardConfig::default())
    }
}

// =============================================================================
// Navigation Fixtures
// =============================================================================

/// Fixture providing menu trees.
pub struct NavFixtures;

impl NavFixtures {
    /// A menu with three sections, one group and one ungated link.
    pub fn menu() -> Vec<NavItem> {
        vec![
            NavLink::new("Dashboard", "dashboard")
                .requires("SHOW_REPORT_GRAPHICS")
                .into(),
            NavHeading::new("Access").into(),
            NavLink::new("Roles", "roles-and-permissions")
                .requires("READ_ALL_ROLES")
                .into(),
            NavLink::new("Users", "users").requires("READ_ALL_USERS").into(),
            NavHeading::new("Management").into(),
            NavLink::new("Customers", "customers")
                .requires("READ_ALL_CLIENTS")
                .into(),
            NavGroup::new(
                "Materials",
                vec![
                    NavChild::Link(
                        NavLink::new("Categories", "materials-categories")
                            .requires("READ_ALL_CATEGORIES"),
                    ),
                    NavChild::Link(
                        NavLink::new("Suppliers", "materials-suppliers")
                            .requires("READ_ALL_SUPPLIERS"),
                    ),
                ],
            )
            .requires("READ_ALL_MATERIALS")
            .into(),
            NavLink::new("Orders", "orders").requires("READ_ALL_ORDERS").into(),
            NavHeading::new("Help").into(),
            NavLink::new("Support", "support").into(),
        ]
    }
}

// =============================================================================
// Config Fixtures
// =============================================================================

/// Fixture locating shipped configuration files.
pub struct ConfigFixtures;

impl ConfigFixtures {
    /// Path of the reference configuration.
    pub fn reference_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("navgate.yaml")
    }
}
