// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Navigation Integration Tests
//!
//! Menu visibility driven by the session-backed permission oracle and by
//! fixed permission sets.
//!
//! ## Test Categories
//!
//! - `test_oracle_*`: Permission answers for stored users
//! - `test_menu_*`: Visibility of links, groups and headings
//! - `test_tree_*`: Pruned menu trees per role

use navgate_core::{NavChild, NavItem, SessionStore, StaticPermissions, VisibilityEngine};
use navgate_tests::prelude::*;

fn labels(items: &[NavItem]) -> Vec<&str> {
    items.iter().map(NavItem::label).collect()
}

// =============================================================================
// Permission Oracle
// =============================================================================

#[test]
fn test_oracle_administrator_bypasses_authorities() {
    let token = TokenBuilder::new().expires_at(NOW + 60).build();
    let oracle = RouteFixtures::oracle(SessionFixtures::logged_in(
        &UserFixtures::administrator(),
        &token,
    ));

    assert!(oracle.is_allowed("READ_ALL_USERS"));
    assert!(oracle.is_allowed("NOT_IN_ANY_CATALOG"));
}

#[test]
fn test_oracle_role_lookup_is_case_sensitive() {
    let user = UserBuilder::new().role("administrator").to_json();
    let oracle = RouteFixtures::oracle(SessionFixtures::user_only(&user));

    assert!(!oracle.is_allowed("READ_ALL_USERS"));
}

#[test]
fn test_oracle_reads_authorities() {
    let oracle = RouteFixtures::oracle(SessionFixtures::active_seller());

    assert!(oracle.is_allowed("READ_ALL_ORDERS"));
    assert!(!oracle.is_allowed("READ_ALL_USERS"));
}

#[test]
fn test_oracle_ignores_token_state() {
    // Permissions come from the user record alone, even with an expired token.
    let oracle = RouteFixtures::oracle(SessionFixtures::expired_seller());

    assert!(oracle.is_allowed("READ_ALL_ORDERS"));
}

#[test]
fn test_oracle_denies_without_role() {
    let user = UserBuilder::new().authority("READ_ALL_ORDERS").to_json();
    let oracle = RouteFixtures::oracle(SessionFixtures::user_only(&user));

    assert!(!oracle.is_allowed("READ_ALL_ORDERS"));
}

#[test]
fn test_oracle_denies_malformed_user() {
    init_test_logging();
    let oracle = RouteFixtures::oracle(SessionFixtures::user_only("{not json"));

    assert!(!oracle.is_allowed("READ_ALL_ORDERS"));
}

#[test]
fn test_oracle_follows_session_changes() {
    let store = SessionFixtures::anonymous();
    let oracle = RouteFixtures::oracle(store.clone());
    assert!(!oracle.is_allowed("READ_ALL_USERS"));

    store.set("user", &UserFixtures::administrator()).unwrap();
    assert!(oracle.is_allowed("READ_ALL_USERS"));

    store.remove("user").unwrap();
    assert!(!oracle.is_allowed("READ_ALL_USERS"));
}

// =============================================================================
// Menu Visibility
// =============================================================================

#[test]
fn test_menu_group_gate_is_not_bypassed_by_children() {
    let items = NavFixtures::menu();
    let warehouse = RouteFixtures::oracle(SessionFixtures::user_only(&UserFixtures::warehouse()));
    let engine = VisibilityEngine::new(&warehouse);

    let NavItem::Group(group) = &items[6] else {
        panic!("expected the materials group");
    };
    assert!(warehouse.is_allowed("READ_ALL_SUPPLIERS"));
    assert!(!engine.group_visible(group));
}

#[test]
fn test_menu_group_needs_a_visible_child() {
    let items = NavFixtures::menu();
    let NavItem::Group(group) = &items[6] else {
        panic!("expected the materials group");
    };

    let gate_only = StaticPermissions::from_permissions(["READ_ALL_MATERIALS"]);
    assert!(!VisibilityEngine::new(&gate_only).group_visible(group));

    let with_child =
        StaticPermissions::from_permissions(["READ_ALL_MATERIALS", "READ_ALL_SUPPLIERS"]);
    assert!(VisibilityEngine::new(&with_child).group_visible(group));
}

#[test]
fn test_menu_heading_visible_by_reference() {
    let items = NavFixtures::menu();
    let check = |permission: &str| permission == "READ_ALL_USERS";
    let engine = VisibilityEngine::new(&check);

    let NavItem::Heading(access) = &items[1] else {
        panic!("expected the access heading");
    };
    let NavItem::Heading(management) = &items[4] else {
        panic!("expected the management heading");
    };

    assert!(engine.heading_visible(access, &items));
    assert!(!engine.heading_visible(management, &items));

    // A detached copy is not part of the menu.
    let detached = access.clone();
    assert!(!engine.heading_visible(&detached, &items));
}

#[test]
fn test_menu_heading_section_stops_at_next_heading() {
    let items = NavFixtures::menu();
    // Orders is in the management section; dashboard precedes every heading.
    let check = |permission: &str| {
        permission == "READ_ALL_ORDERS" || permission == "SHOW_REPORT_GRAPHICS"
    };
    let engine = VisibilityEngine::new(&check);

    assert!(!engine.heading_visible_at(1, &items));
    assert!(engine.heading_visible_at(4, &items));
    assert!(!engine.heading_visible_at(0, &items));
}

#[test]
fn test_menu_ungated_link_is_always_visible() {
    let items = NavFixtures::menu();
    let none = StaticPermissions::none();
    let engine = VisibilityEngine::new(&none);

    assert!(engine.item_visible(9, &items));
    assert!(engine.item_visible(8, &items));
    assert!(!engine.item_visible(0, &items));
    assert!(!engine.item_visible(items.len(), &items));
}

// =============================================================================
// Visible Trees
// =============================================================================

#[test]
fn test_tree_seller() {
    let items = NavFixtures::menu();
    let oracle = RouteFixtures::oracle(SessionFixtures::active_seller());

    let visible = VisibilityEngine::new(&oracle).visible_tree(&items);

    assert_eq!(
        labels(&visible),
        vec!["Management", "Customers", "Orders", "Help", "Support"]
    );
}

#[test]
fn test_tree_administrator_sees_everything() {
    let items = NavFixtures::menu();
    let oracle = RouteFixtures::oracle(SessionFixtures::user_only(&UserFixtures::administrator()));

    let visible = VisibilityEngine::new(&oracle).visible_tree(&items);

    assert_eq!(visible, items);
}

#[test]
fn test_tree_anonymous() {
    let items = NavFixtures::menu();
    let oracle = RouteFixtures::oracle(SessionFixtures::anonymous());

    let visible = VisibilityEngine::new(&oracle).visible_tree(&items);

    assert_eq!(labels(&visible), vec!["Help", "Support"]);
}

#[test]
fn test_tree_prunes_group_children() {
    let items = NavFixtures::menu();
    let permissions =
        StaticPermissions::from_permissions(["READ_ALL_MATERIALS", "READ_ALL_CATEGORIES"]);

    let visible = VisibilityEngine::new(&permissions).visible_tree(&items);

    assert_eq!(labels(&visible), vec!["Management", "Materials", "Help", "Support"]);
    let NavItem::Group(group) = &visible[1] else {
        panic!("expected the materials group");
    };
    assert_eq!(group.children.len(), 1);
    assert!(matches!(&group.children[0], NavChild::Link(link) if link.title == "Categories"));
}

#[test]
fn test_tree_user_without_permissions() {
    let items = NavFixtures::menu();
    let oracle = RouteFixtures::oracle(SessionFixtures::user_only(&UserFixtures::no_permissions()));

    let visible = VisibilityEngine::new(&oracle).visible_tree(&items);

    assert_eq!(labels(&visible), vec!["Help", "Support"]);
}
