// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Navigation tree and permission-driven visibility.
//!
//! The menu is an ordered sequence of links, groups and section headings.
//! Visibility rules:
//!
//! - a link is visible if it requires no permission or the permission is allowed
//! - a group is visible if at least one descendant is visible and, when it
//!   declares its own permission, that permission is allowed as well
//! - a heading is visible if some item between it and the next heading (or the
//!   end of the menu) is visible
//!
//! The engine is stateless and recomputes on every call.

use serde::{Deserialize, Serialize};

use crate::oracle::PermissionCheck;

// =============================================================================
// Node Types
// =============================================================================

/// Metadata attached to links and groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavMeta {
    /// Permission identifier needed to see the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_permission: Option<String>,
}

/// Icon descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavIcon {
    /// Icon name in the icon set.
    pub icon: String,
}

/// Where a link navigates to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavTarget {
    /// A named route.
    Named {
        /// Route name.
        name: String,
    },
    /// A literal path.
    Path(String),
}

impl NavTarget {
    /// Creates a named-route target.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named { name: name.into() }
    }
}

/// A navigable menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Display title.
    pub title: String,
    /// Navigation target.
    pub to: NavTarget,
    /// Optional icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<NavIcon>,
    /// Optional metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<NavMeta>,
}

/// A collapsible group of links and nested groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavGroup {
    /// Display title.
    pub title: String,
    /// Optional icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<NavIcon>,
    /// Optional metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<NavMeta>,
    /// Child entries.
    pub children: Vec<NavChild>,
}

/// A non-navigable section marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavHeading {
    /// Section label.
    pub heading: String,
}

/// A top-level menu node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavItem {
    /// Section heading.
    Heading(NavHeading),
    /// Group with children.
    Group(NavGroup),
    /// Leaf link.
    Link(NavLink),
}

/// A node nested inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavChild {
    /// Nested group.
    Group(NavGroup),
    /// Leaf link.
    Link(NavLink),
}

fn permission_of(meta: Option<&NavMeta>) -> Option<&str> {
    meta?
        .requires_permission
        .as_deref()
        .filter(|p| !p.is_empty())
}

impl NavLink {
    /// Creates a link to a named route.
    pub fn new(title: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            to: NavTarget::named(route),
            icon: None,
            meta: None,
        }
    }

    /// Sets the required permission.
    pub fn requires(mut self, permission: impl Into<String>) -> Self {
        self.meta = Some(NavMeta {
            requires_permission: Some(permission.into()),
        });
        self
    }

    /// Sets the icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(NavIcon { icon: icon.into() });
        self
    }

    /// Returns the required permission, if any.
    pub fn required_permission(&self) -> Option<&str> {
        permission_of(self.meta.as_ref())
    }
}

impl NavGroup {
    /// Creates a group.
    pub fn new(title: impl Into<String>, children: Vec<NavChild>) -> Self {
        Self {
            title: title.into(),
            icon: None,
            meta: None,
            children,
        }
    }

    /// Sets the required permission.
    pub fn requires(mut self, permission: impl Into<String>) -> Self {
        self.meta = Some(NavMeta {
            requires_permission: Some(permission.into()),
        });
        self
    }

    /// Sets the icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(NavIcon { icon: icon.into() });
        self
    }

    /// Returns the required permission, if any.
    pub fn required_permission(&self) -> Option<&str> {
        permission_of(self.meta.as_ref())
    }
}

impl NavHeading {
    /// Creates a heading.
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
        }
    }
}

impl NavItem {
    /// Returns `true` for headings.
    pub fn is_heading(&self) -> bool {
        matches!(self, Self::Heading(_))
    }

    /// Returns the display label.
    pub fn label(&self) -> &str {
        match self {
            Self::Heading(h) => &h.heading,
            Self::Group(g) => &g.title,
            Self::Link(l) => &l.title,
        }
    }
}

impl From<NavLink> for NavItem {
    fn from(link: NavLink) -> Self {
        Self::Link(link)
    }
}

impl From<NavGroup> for NavItem {
    fn from(group: NavGroup) -> Self {
        Self::Group(group)
    }
}

impl From<NavHeading> for NavItem {
    fn from(heading: NavHeading) -> Self {
        Self::Heading(heading)
    }
}

impl From<NavLink> for NavChild {
    fn from(link: NavLink) -> Self {
        Self::Link(link)
    }
}

impl From<NavGroup> for NavChild {
    fn from(group: NavGroup) -> Self {
        Self::Group(group)
    }
}

/// Collects every permission identifier referenced by a menu, in tree order.
pub fn required_permissions(items: &[NavItem]) -> Vec<&str> {
    fn walk_group<'a>(group: &'a NavGroup, out: &mut Vec<&'a str>) {
        out.extend(group.required_permission());
        for child in &group.children {
            match child {
                NavChild::Group(g) => walk_group(g, out),
                NavChild::Link(l) => out.extend(l.required_permission()),
            }
        }
    }

    let mut out = Vec::new();
    for item in items {
        match item {
            NavItem::Heading(_) => {}
            NavItem::Group(g) => walk_group(g, &mut out),
            NavItem::Link(l) => out.extend(l.required_permission()),
        }
    }
    out
}

// =============================================================================
// VisibilityEngine
// =============================================================================

/// Computes which menu nodes render for the current permissions.
#[derive(Debug)]
pub struct VisibilityEngine<'a, P: ?Sized> {
    check: &'a P,
}

impl<'a, P> VisibilityEngine<'a, P>
where
    P: PermissionCheck + ?Sized,
{
    /// Creates an engine over a permission check.
    pub fn new(check: &'a P) -> Self {
        Self { check }
    }

    /// Link visibility.
    pub fn link_visible(&self, link: &NavLink) -> bool {
        match link.required_permission() {
            None => true,
            Some(permission) => self.check.is_allowed(permission),
        }
    }

    /// Group visibility.
    ///
    /// The group's own permission never substitutes for visible content.
    pub fn group_visible(&self, group: &NavGroup) -> bool {
        if let Some(permission) = group.required_permission() {
            if !self.check.is_allowed(permission) {
                return false;
            }
        }
        group.children.iter().any(|child| self.child_visible(child))
    }

    /// Visibility of a node nested inside a group.
    pub fn child_visible(&self, child: &NavChild) -> bool {
        match child {
            NavChild::Group(group) => self.group_visible(group),
            NavChild::Link(link) => self.link_visible(link),
        }
    }

    /// Visibility of the heading found by identity in `items`.
    ///
    /// A heading that is not an element of `items` is not visible.
    pub fn heading_visible(&self, heading: &NavHeading, items: &[NavItem]) -> bool {
        items
            .iter()
            .position(|item| matches!(item, NavItem::Heading(h) if std::ptr::eq(h, heading)))
            .is_some_and(|index| self.heading_visible_at(index, items))
    }

    /// Visibility of the heading at `index`.
    ///
    /// Scans forward to the next heading only.
    pub fn heading_visible_at(&self, index: usize, items: &[NavItem]) -> bool {
        if !matches!(items.get(index), Some(NavItem::Heading(_))) {
            return false;
        }
        items
            .iter()
            .skip(index + 1)
            .take_while(|item| !item.is_heading())
            .any(|item| self.section_item_visible(item))
    }

    /// Visibility of the item at `index`, whatever its kind.
    pub fn item_visible(&self, index: usize, items: &[NavItem]) -> bool {
        match items.get(index) {
            Some(NavItem::Heading(_)) => self.heading_visible_at(index, items),
            Some(item) => self.section_item_visible(item),
            None => false,
        }
    }

    /// Returns the menu with every invisible node removed.
    ///
    /// Visible groups keep only their visible children.
    pub fn visible_tree(&self, items: &[NavItem]) -> Vec<NavItem> {
        items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match item {
                NavItem::Heading(_) => self.heading_visible_at(index, items).then(|| item.clone()),
                NavItem::Link(link) => self.link_visible(link).then(|| item.clone()),
                NavItem::Group(group) => self.prune_group(group).map(NavItem::Group),
            })
            .collect()
    }

    fn section_item_visible(&self, item: &NavItem) -> bool {
        match item {
            NavItem::Heading(_) => false,
            NavItem::Group(group) => self.group_visible(group),
            NavItem::Link(link) => self.link_visible(link),
        }
    }

    fn prune_group(&self, group: &NavGroup) -> Option<NavGroup> {
        if !self.group_visible(group) {
            return None;
        }
        let children = group
            .children
            .iter()
            .filter_map(|child| match child {
                NavChild::Link(link) => self.link_visible(link).then(|| child.clone()),
                NavChild::Group(nested) => self.prune_group(nested).map(NavChild::Group),
            })
            .collect();

        Some(NavGroup {
            children,
            ..group.clone()
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
