// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Route Guard Integration Tests
//!
//! End-to-end guard behavior over the shared route table:
//!
//! - Login, landing and expiry redirects
//! - Rule precedence
//! - Index redirect
//! - File-backed session store
//!
//! ## Test Categories
//!
//! - `test_scenario_*`: Reference navigation scenarios
//! - `test_rule_*`: Individual guard rules and their ordering
//! - `test_index_*`: Session-landing redirect of the root route
//! - `test_file_store_*`: Guard over an on-disk session

use std::collections::BTreeMap;
use std::sync::Arc;

use navgate_core::{GuardConfig, GuardDecision, Redirect, SessionStore};
use navgate_core::{FileSessionStore, RouteGuard, SessionProvider};
use navgate_tests::prelude::*;

fn query(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn expired_message() -> String {
    GuardConfig::default().expired_message
}

// =============================================================================
// Reference Scenarios
// =============================================================================

#[test]
fn test_scenario_logged_out_user_is_sent_to_login() {
    init_test_logging();
    let table = RouteFixtures::table();
    let guard = RouteFixtures::guard(SessionFixtures::anonymous());

    let decision = guard.navigate_at(&table, "/orders?page=2", NOW).unwrap();

    assert_eq!(
        decision,
        GuardDecision::Redirect(
            Redirect::new("login").with_query(query(&[("page", "2"), ("to", "/orders")]))
        )
    );
}

#[test]
fn test_scenario_logged_in_user_skips_login() {
    init_test_logging();
    let table = RouteFixtures::table();
    let guard = RouteFixtures::guard(SessionFixtures::active_seller());

    let decision = guard.navigate_at(&table, "/login", NOW).unwrap();

    assert_eq!(decision, GuardDecision::Redirect(Redirect::new("dashboard")));
}

#[test]
fn test_scenario_expired_session_is_cleared() {
    init_test_logging();
    let table = RouteFixtures::table();
    let store = SessionFixtures::expired_seller();
    let guard = RouteFixtures::guard(store.clone());

    let decision = guard.navigate_at(&table, "/orders", NOW).unwrap();
    let redirect = decision.redirect().unwrap();

    assert_eq!(redirect.route_name, "login");
    assert_eq!(redirect.to(), Some("/orders"));
    assert_eq!(redirect.message(), Some(expired_message().as_str()));
    assert!(store.is_empty());

    // The cleared session now behaves as logged out.
    let decision = guard.navigate_at(&table, "/orders", NOW).unwrap();
    let redirect = decision.redirect().unwrap();
    assert_eq!(redirect.route_name, "login");
    assert_eq!(redirect.to(), Some("/orders"));
    assert_eq!(redirect.message(), None);
}

#[test]
fn test_scenario_public_route_never_redirects() {
    init_test_logging();
    let table = RouteFixtures::table();

    for store in [
        SessionFixtures::anonymous(),
        SessionFixtures::active_seller(),
        SessionFixtures::expired_seller(),
    ] {
        let before = store.len();
        let guard = RouteFixtures::guard(store.clone());

        let decision = guard.navigate_at(&table, "/forgot-password", NOW).unwrap();

        assert!(decision.is_proceed());
        assert_eq!(store.len(), before);
    }
}

// =============================================================================
// Rules
// =============================================================================

#[test]
fn test_rule_expiry_forwards_no_path_from_root() {
    let table = RouteFixtures::table();
    let guard = RouteFixtures::guard(SessionFixtures::expired_seller());

    let to = table.resolve("/").unwrap();
    let decision = guard.before_each_at(&to, NOW);
    let redirect = decision.redirect().unwrap();

    assert_eq!(redirect.route_name, "login");
    assert_eq!(redirect.to(), None);
    assert!(redirect.message().is_some());
}

#[test]
fn test_rule_expiry_wins_over_login_redirect() {
    let table = RouteFixtures::table();
    let store = SessionFixtures::expired_seller();
    let guard = RouteFixtures::guard(store.clone());

    let decision = guard.navigate_at(&table, "/login", NOW).unwrap();
    let redirect = decision.redirect().unwrap();

    assert_eq!(redirect.route_name, "login");
    assert_eq!(redirect.to(), Some("/login"));
    assert!(store.is_empty());
}

#[test]
fn test_rule_token_without_exp_counts_as_expired() {
    let token = TokenBuilder::new().without("exp").build();
    let store = SessionFixtures::logged_in(&UserFixtures::seller(), &token);
    let guard = RouteFixtures::guard(store.clone());

    let decision = guard
        .navigate_at(&RouteFixtures::table(), "/orders", NOW)
        .unwrap();

    assert!(decision.redirect().unwrap().message().is_some());
    assert!(store.is_empty());
}

#[test]
fn test_rule_undecodable_token_counts_as_expired() {
    let store = SessionFixtures::logged_in(&UserFixtures::seller(), "not-a-token");
    let guard = RouteFixtures::guard(store.clone());

    let decision = guard
        .navigate_at(&RouteFixtures::table(), "/users", NOW)
        .unwrap();

    assert_eq!(decision.redirect().unwrap().route_name, "login");
    assert!(store.is_empty());
}

#[test]
fn test_rule_user_without_token_is_logged_out() {
    let store = SessionFixtures::user_only(&UserFixtures::seller());
    let guard = RouteFixtures::guard(store.clone());

    let decision = guard
        .navigate_at(&RouteFixtures::table(), "/orders", NOW)
        .unwrap();

    assert_eq!(decision.redirect().unwrap().to(), Some("/orders"));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_rule_intended_path_replaces_incoming_to() {
    let guard = RouteFixtures::guard(SessionFixtures::anonymous());

    let decision = guard
        .navigate_at(&RouteFixtures::table(), "/orders?to=/users", NOW)
        .unwrap();

    assert_eq!(decision.redirect().unwrap().to(), Some("/orders"));
}

#[test]
fn test_rule_intended_path_keeps_params() {
    let guard = RouteFixtures::guard(SessionFixtures::anonymous());

    let decision = guard
        .navigate_at(&RouteFixtures::table(), "/orders/detail/15", NOW)
        .unwrap();

    assert_eq!(decision.redirect().unwrap().to(), Some("/orders/detail/15"));
}

#[test]
fn test_rule_anonymous_user_reaches_login() {
    let guard = RouteFixtures::guard(SessionFixtures::anonymous());

    let decision = guard
        .navigate_at(&RouteFixtures::table(), "/login?to=/orders", NOW)
        .unwrap();

    assert!(decision.is_proceed());
}

#[test]
fn test_rule_unauthenticated_only_sends_user_to_landing() {
    let guard = RouteFixtures::guard(SessionFixtures::active_seller());

    let decision = guard
        .navigate_at(&RouteFixtures::table(), "/register", NOW)
        .unwrap();

    assert_eq!(decision, GuardDecision::Redirect(Redirect::new("dashboard")));
}

#[test]
fn test_rule_unmatched_location_proceeds() {
    let table = RouteFixtures::table();

    for store in [SessionFixtures::anonymous(), SessionFixtures::active_seller()] {
        let guard = RouteFixtures::guard(store);
        let decision = guard.navigate_at(&table, "/no/such/page", NOW).unwrap();
        assert!(decision.is_proceed());
    }
}

#[test]
fn test_rule_off_site_location_is_rejected() {
    let guard = RouteFixtures::guard(SessionFixtures::active_seller());
    let table = RouteFixtures::table();

    for location in ["//evil.example/orders", "/\\evil.example/orders"] {
        assert!(guard.navigate_at(&table, location, NOW).is_err());
    }
}

#[test]
fn test_rule_permission_is_not_enforced_by_guard() {
    // Seller lacks READ_ALL_USERS; the guard only checks the login state.
    let guard = RouteFixtures::guard(SessionFixtures::active_seller());

    let decision = guard
        .navigate_at(&RouteFixtures::table(), "/users", NOW)
        .unwrap();

    assert!(decision.is_proceed());
}

#[test]
fn test_rule_custom_login_and_landing_routes() {
    let store: Arc<dyn SessionStore> = SessionFixtures::active_seller();
    let config = GuardConfig::default()
        .with_login_route("register")
        .with_landing_route("orders");
    let guard = RouteGuard::new(SessionProvider::from_config(store, &config), config);

    let decision = guard
        .navigate_at(&RouteFixtures::table(), "/register", NOW)
        .unwrap();

    assert_eq!(decision, GuardDecision::Redirect(Redirect::new("orders")));
}

// =============================================================================
// Index Redirect
// =============================================================================

#[test]
fn test_index_anonymous_goes_to_login_with_query() {
    let guard = RouteFixtures::guard(SessionFixtures::anonymous());

    let decision = guard
        .navigate_at(&RouteFixtures::table(), "/?lang=es", NOW)
        .unwrap();

    assert_eq!(
        decision,
        GuardDecision::Redirect(Redirect::new("login").with_query(query(&[("lang", "es")])))
    );
}

#[test]
fn test_index_logged_in_goes_to_landing() {
    let guard = RouteFixtures::guard(SessionFixtures::active_seller());

    let decision = guard.navigate_at(&RouteFixtures::table(), "/", NOW).unwrap();

    assert_eq!(decision, GuardDecision::Redirect(Redirect::new("dashboard")));
}

#[test]
fn test_index_user_without_token_ends_at_login() {
    let guard = RouteFixtures::guard(SessionFixtures::user_only(&UserFixtures::seller()));

    let decision = guard.navigate_at(&RouteFixtures::table(), "/", NOW).unwrap();
    let redirect = decision.redirect().unwrap();

    assert_eq!(redirect.route_name, "login");
    assert_eq!(redirect.to(), Some("/dashboard"));
}

#[test]
fn test_index_expired_session_is_cleared_on_landing() {
    let store = SessionFixtures::expired_seller();
    let guard = RouteFixtures::guard(store.clone());

    let decision = guard.navigate_at(&RouteFixtures::table(), "/", NOW).unwrap();
    let redirect = decision.redirect().unwrap();

    assert_eq!(redirect.route_name, "login");
    assert!(redirect.message().is_some());
    assert!(store.is_empty());
}

// =============================================================================
// File Store
// =============================================================================

#[test]
fn test_file_store_expired_session_is_removed_from_disk() {
    init_test_logging();
    let dir = temp_test_dir("navgate-guard");
    let path = dir.path().join("session.json");
    let token = TokenBuilder::new().expires_at(NOW - 1).build();
    std::fs::write(
        &path,
        serde_json::json!({
            "user": { "role": { "name": "Seller" }, "authorities": [] },
            "token": token,
            "theme": "dark",
        })
        .to_string(),
    )
    .unwrap();

    let store = Arc::new(FileSessionStore::new(&path));
    let guard = RouteFixtures::guard(store.clone());

    let decision = guard
        .navigate_at(&RouteFixtures::table(), "/orders", NOW)
        .unwrap();
    assert_eq!(decision.redirect().unwrap().route_name, "login");

    let entries = store.load().unwrap();
    assert!(!entries.contains_key("user"));
    assert!(!entries.contains_key("token"));
    assert_eq!(entries.get("theme").map(String::as_str), Some("dark"));
}

#[test]
fn test_file_store_valid_session_proceeds() {
    let dir = temp_test_dir("navgate-guard");
    let path = dir.path().join("session.json");
    let store = Arc::new(FileSessionStore::new(&path));
    store.set("user", &UserFixtures::seller()).unwrap();
    store
        .set("token", &TokenBuilder::new().expires_at(NOW + 60).build())
        .unwrap();

    let guard = RouteFixtures::guard(store.clone());
    let decision = guard
        .navigate_at(&RouteFixtures::table(), "/orders", NOW)
        .unwrap();

    assert!(decision.is_proceed());
    assert_eq!(store.load().unwrap().len(), 2);
}

#[test]
fn test_file_store_missing_file_is_logged_out() {
    let dir = temp_test_dir("navgate-guard");
    let store = Arc::new(FileSessionStore::new(dir.path().join("absent.json")));
    let guard = RouteFixtures::guard(store);

    let decision = guard
        .navigate_at(&RouteFixtures::table(), "/dashboard", NOW)
        .unwrap();

    assert_eq!(decision.redirect().unwrap().to(), Some("/dashboard"));
}
