// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Permission catalog definitions.
//!
//! The catalog is static reference data: the authoring source for the
//! `requiresPermission` identifiers used by routes and navigation entries. The
//! runtime decision logic never consults it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{NavgateError, NavgateResult};

// =============================================================================
// PermissionEntry
// =============================================================================

/// A single permission in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionEntry {
    /// Human-readable action name.
    pub name: String,
    /// Permission identifier as stored in user authority lists.
    pub identifier: String,
    /// Backend operation id.
    pub operation_id: i64,
}

impl PermissionEntry {
    /// Creates a permission entry.
    pub fn new(name: impl Into<String>, identifier: impl Into<String>, operation_id: i64) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
            operation_id,
        }
    }
}

// =============================================================================
// ResourceGroup
// =============================================================================

/// Permissions grouped by resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroup {
    /// Resource name.
    pub name: String,
    /// Permissions on this resource, in display order.
    #[serde(default)]
    pub permissions: Vec<PermissionEntry>,
}

impl ResourceGroup {
    /// Creates a resource group.
    pub fn new(name: impl Into<String>, permissions: Vec<PermissionEntry>) -> Self {
        Self {
            name: name.into(),
            permissions,
        }
    }
}

// =============================================================================
// PermissionCatalog
// =============================================================================

/// Ordered, immutable list of resource groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionCatalog {
    groups: Vec<ResourceGroup>,
}

impl PermissionCatalog {
    /// Creates a catalog from resource groups.
    pub fn new(groups: Vec<ResourceGroup>) -> Self {
        Self { groups }
    }

    /// Returns the resource groups in order.
    pub fn groups(&self) -> &[ResourceGroup] {
        &self.groups
    }

    /// Returns `true` if the catalog has no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterates over every permission with its resource group.
    pub fn entries(&self) -> impl Iterator<Item = (&ResourceGroup, &PermissionEntry)> {
        self.groups
            .iter()
            .flat_map(|g| g.permissions.iter().map(move |p| (g, p)))
    }

    /// Returns every identifier in catalog order.
    pub fn identifiers(&self) -> Vec<&str> {
        self.entries().map(|(_, p)| p.identifier.as_str()).collect()
    }

    /// Returns `true` if the identifier is declared.
    pub fn contains(&self, identifier: &str) -> bool {
        self.find(identifier).is_some()
    }

    /// Finds a permission by identifier.
    pub fn find(&self, identifier: &str) -> Option<&PermissionEntry> {
        self.entries()
            .map(|(_, p)| p)
            .find(|p| p.identifier == identifier)
    }

    /// Finds a permission by operation id.
    pub fn find_by_operation(&self, operation_id: i64) -> Option<&PermissionEntry> {
        self.entries()
            .map(|(_, p)| p)
            .find(|p| p.operation_id == operation_id)
    }

    /// Returns the resource group declaring `identifier`.
    pub fn group_of(&self, identifier: &str) -> Option<&ResourceGroup> {
        self.entries()
            .find(|(_, p)| p.identifier == identifier)
            .map(|(g, _)| g)
    }

    /// Checks that identifiers and operation ids are unique.
    pub fn validate(&self) -> NavgateResult<()> {
        let mut identifiers = HashSet::new();
        let mut operations = HashSet::new();

        for (group, entry) in self.entries() {
            if entry.identifier.trim().is_empty() {
                return Err(NavgateError::invalid_config(
                    format!("catalog.{}", group.name),
                    "permission identifier cannot be empty",
                ));
            }
            if !identifiers.insert(entry.identifier.as_str()) {
                return Err(NavgateError::invalid_config(
                    format!("catalog.{}", group.name),
                    format!("duplicate permission identifier '{}'", entry.identifier),
                ));
            }
            if !operations.insert(entry.operation_id) {
                return Err(NavgateError::invalid_config(
                    format!("catalog.{}", group.name),
                    format!("duplicate operation id {}", entry.operation_id),
                ));
            }
        }
        Ok(())
    }
}

impl FromIterator<ResourceGroup> for PermissionCatalog {
    fn from_iter<I: IntoIterator<Item = ResourceGroup>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PermissionCatalog {
        PermissionCatalog::new(vec![
            ResourceGroup::new(
                "Dashboard",
                vec![PermissionEntry::new("Charts", "SHOW_REPORT_GRAPHICS", 5)],
            ),
            ResourceGroup::new(
                "Users",
                vec![
                    PermissionEntry::new("Create", "CREATE_ONE_USER", 10),
                    PermissionEntry::new("List", "READ_ALL_USERS", 11),
                ],
            ),
        ])
    }

    #[test]
    fn test_lookup() {
        let catalog = sample();

        assert!(catalog.contains("READ_ALL_USERS"));
        assert!(!catalog.contains("READ_ALL_ROLES"));
        assert_eq!(catalog.find_by_operation(10).unwrap().identifier, "CREATE_ONE_USER");
        assert_eq!(catalog.group_of("SHOW_REPORT_GRAPHICS").unwrap().name, "Dashboard");
        assert_eq!(
            catalog.identifiers(),
            vec!["SHOW_REPORT_GRAPHICS", "CREATE_ONE_USER", "READ_ALL_USERS"]
        );
    }

    #[test]
    fn test_validate_duplicates() {
        assert!(sample().validate().is_ok());

        let dup_identifier = PermissionCatalog::new(vec![ResourceGroup::new(
            "Users",
            vec![
                PermissionEntry::new("A", "READ_ALL_USERS", 1),
                PermissionEntry::new("B", "READ_ALL_USERS", 2),
            ],
        )]);
        assert!(dup_identifier.validate().is_err());

        let dup_operation = PermissionCatalog::new(vec![ResourceGroup::new(
            "Users",
            vec![
                PermissionEntry::new("A", "READ_ALL_USERS", 1),
                PermissionEntry::new("B", "CREATE_ONE_USER", 1),
            ],
        )]);
        assert!(dup_operation.validate().is_err());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let catalog: PermissionCatalog = serde_json::from_str(
            r#"[{"name":"Profile","permissions":[
                {"name":"Change password","identifier":"CHANGE_OWN_PASSWORD","operationId":63}
            ]}]"#,
        )
        .unwrap();
        assert_eq!(catalog.find("CHANGE_OWN_PASSWORD").unwrap().operation_id, 63);
    }
}
