// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration schema definitions for navgate.
//!
//! # Schema Structure
//!
//! ```text
//! NavgateConfig
//! ├── guard: GuardConfig
//! ├── routes: RouteTable
//! ├── navigation: Vec<NavItem>
//! ├── catalog: PermissionCatalog
//! └── logging: LoggingConfig
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use navgate_core::{
    GuardConfig, NavChild, NavGroup, NavItem, NavLink, NavTarget, PermissionCatalog,
    PermissionOracle, RouteGuard, RouteTable, SessionProvider, SessionStore,
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Top-Level Configuration
// =============================================================================

/// The root configuration structure for navgate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavgateConfig {
    /// Guard and oracle settings.
    #[serde(default)]
    pub guard: GuardConfig,

    /// Declared routes.
    #[serde(default)]
    pub routes: RouteTable,

    /// Navigation menu.
    #[serde(default)]
    pub navigation: Vec<NavItem>,

    /// Permission catalog.
    #[serde(default)]
    pub catalog: PermissionCatalog,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl NavgateConfig {
    /// Validates the entire configuration.
    ///
    /// Checks guard settings, route names, that the login and landing routes
    /// are declared, and catalog uniqueness.
    pub fn validate(&self) -> ConfigResult<()> {
        self.guard.validate()?;
        self.routes.validate()?;

        for (field, name) in [
            ("guard.login_route", &self.guard.login_route),
            ("guard.landing_route", &self.guard.landing_route),
        ] {
            if !self.routes.contains(name) {
                return Err(ConfigError::validation(
                    field,
                    format!("route '{name}' is not declared in routes"),
                ));
            }
        }

        self.catalog.validate()?;
        Ok(())
    }

    /// Reports references that are legal but probably mistakes.
    pub fn lint(&self) -> Vec<LintWarning> {
        let mut warnings = Vec::new();

        if self.catalog.is_empty() {
            warnings.push(LintWarning::new(
                "catalog",
                "catalog is empty; permission identifiers are not checked",
            ));
        } else {
            for (route, permission) in self.routes.required_permissions() {
                if !self.catalog.contains(permission) {
                    warnings.push(LintWarning::new(
                        format!("routes.{route}"),
                        format!("requiresPermission '{permission}' is not in the catalog"),
                    ));
                }
            }

            let mut reported = HashSet::new();
            for permission in navgate_core::required_permissions(&self.navigation) {
                if !self.catalog.contains(permission) && reported.insert(permission) {
                    warnings.push(LintWarning::new(
                        "navigation",
                        format!("requiresPermission '{permission}' is not in the catalog"),
                    ));
                }
            }
        }

        for link in navigation_links(&self.navigation) {
            if let NavTarget::Named { name } = &link.to {
                if !self.routes.contains(name) {
                    warnings.push(LintWarning::new(
                        format!("navigation.{}", link.title),
                        format!("links to undeclared route '{name}'"),
                    ));
                }
            }
        }

        warnings
    }

    /// Creates a session provider over `store` using the configured keys.
    pub fn session_provider(&self, store: Arc<dyn SessionStore>) -> SessionProvider {
        SessionProvider::from_config(store, &self.guard)
    }

    /// Creates a route guard over `store`.
    pub fn route_guard(&self, store: Arc<dyn SessionStore>) -> RouteGuard {
        RouteGuard::new(self.session_provider(store), self.guard.clone())
    }

    /// Creates a permission oracle over `store`.
    pub fn permission_oracle(&self, store: Arc<dyn SessionStore>) -> PermissionOracle {
        PermissionOracle::from_config(self.session_provider(store), &self.guard)
    }
}

fn navigation_links(items: &[NavItem]) -> Vec<&NavLink> {
    fn walk<'a>(group: &'a NavGroup, out: &mut Vec<&'a NavLink>) {
        for child in &group.children {
            match child {
                NavChild::Link(link) => out.push(link),
                NavChild::Group(nested) => walk(nested, out),
            }
        }
    }

    let mut out = Vec::new();
    for item in items {
        match item {
            NavItem::Link(link) => out.push(link),
            NavItem::Group(group) => walk(group, &mut out),
            NavItem::Heading(_) => {}
        }
    }
    out
}

// =============================================================================
// Lint
// =============================================================================

/// A non-fatal configuration finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintWarning {
    /// Where the finding is.
    pub field: String,
    /// What is wrong.
    pub message: String,
}

impl LintWarning {
    /// Creates a warning.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

// =============================================================================
// Logging Configuration
// =============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Log format.
    #[serde(default)]
    pub format: LogFormat,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Returns the level as a filter directive.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Parses a level name, accepting `warning` for `warn`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Compact text.
    Compact,
    /// JSON lines.
    Json,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use navgate_core::{NavHeading, PermissionEntry, ResourceGroup, RouteMeta, RouteRecord};

    use super::*;

    fn sample() -> NavgateConfig {
        NavgateConfig {
            routes: RouteTable::new(vec![
                RouteRecord::new("login", "/login").with_meta(RouteMeta::unauthenticated_only()),
                RouteRecord::new("dashboard", "/dashboard")
                    .with_meta(RouteMeta::authenticated().with_permission("SHOW_REPORT_GRAPHICS")),
                RouteRecord::new("users", "/users")
                    .with_meta(RouteMeta::authenticated().with_permission("READ_ALL_USRS")),
            ]),
            navigation: vec![
                NavLink::new("Dashboard", "dashboard")
                    .requires("SHOW_REPORT_GRAPHICS")
                    .into(),
                NavHeading::new("Access").into(),
                NavLink::new("Roles", "roles").requires("READ_ALL_ROLES").into(),
            ],
            catalog: PermissionCatalog::new(vec![ResourceGroup::new(
                "Dashboard",
                vec![PermissionEntry::new("Charts", "SHOW_REPORT_GRAPHICS", 5)],
            )]),
            ..NavgateConfig::default()
        }
    }

    #[test]
    fn test_default_config_requires_routes() {
        let config = NavgateConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { field, .. }) if field == "guard.login_route"
        ));
    }

    #[test]
    fn test_validate_sample() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_missing_landing_route() {
        let mut config = sample();
        config.guard.landing_route = "home".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { field, .. }) if field == "guard.landing_route"
        ));
    }

    #[test]
    fn test_lint_reports_unknown_references() {
        let warnings = sample().lint();
        let fields: Vec<&str> = warnings.iter().map(|w| w.field.as_str()).collect();

        assert!(fields.contains(&"routes.users"));
        assert!(fields.contains(&"navigation"));
        assert!(fields.contains(&"navigation.Roles"));
        assert_eq!(warnings.len(), 3);
    }

    #[test]
    fn test_lint_empty_catalog() {
        let mut config = sample();
        config.catalog = PermissionCatalog::default();
        let warnings = config.lint();
        assert_eq!(warnings[0].field, "catalog");
    }

    #[test]
    fn test_logging_section_is_checked_by_serde() {
        let logging: LoggingConfig =
            serde_json::from_str(r#"{"level":"debug","format":"json"}"#).unwrap();
        assert_eq!(logging.level, LogLevel::Debug);
        assert_eq!(logging.format, LogFormat::Json);

        assert!(serde_json::from_str::<LoggingConfig>(r#"{"level":"loud"}"#).is_err());
        assert!(serde_json::from_str::<LoggingConfig>(r#"{"file":"nav.log"}"#).is_err());

        let config = NavgateConfig { logging, ..sample() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        assert_eq!(LogLevel::Info.as_str(), "info");
        assert_eq!(LogLevel::parse("WARNING"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("loud"), None);
    }
}
