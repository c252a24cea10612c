// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # navgate-config
//!
//! Configuration management for navgate.
//!
//! One file declares everything the access layer needs:
//!
//! - `guard` - login/landing routes, bypass role, expiry message, session keys
//! - `routes` - the route table with per-route meta
//! - `navigation` - the menu tree
//! - `catalog` - the permission catalog
//! - `logging` - log level and format
//!
//! ## Quick Start
//!
//! ```no_run
//! use navgate_config::loader::load_config;
//!
//! let config = load_config("config/navgate.yaml").unwrap();
//! for warning in config.lint() {
//!     println!("warning: {warning}");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! ```text
//! NAVGATE_LOGIN_ROUTE=login
//! NAVGATE_LANDING_ROUTE=dashboard
//! NAVGATE_BYPASS_ROLE=Administrator
//! NAVGATE_EXPIRED_MESSAGE="Your session has expired."
//! NAVGATE_LOG_LEVEL=debug
//! ```
//!
//! Values in config files can reference environment variables:
//!
//! ```yaml
//! guard:
//!   bypass_role: "${BYPASS_ROLE:Administrator}"
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod error;
pub mod loader;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_config, load_config_str, ConfigFormat, ConfigLoader, DEFAULT_ENV_PREFIX};
pub use schema::{LintWarning, LogFormat, LogLevel, LoggingConfig, NavgateConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// =============================================================================
// Tests
// =============================================================================
