// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # navgate-cli
//!
//! Command-line front end for navgate.
//!
//! The binary evaluates the access layer the way the browser would, against
//! a configuration file and a JSON session file standing in for local
//! storage:
//!
//! - CLI argument parsing with clap
//! - Logging initialization
//! - Command implementations (check, menu, can, inspect, validate, version)
//!
//! ## Usage
//!
//! ```bash
//! # Where does /orders lead for the stored session?
//! navgate check /orders
//!
//! # Same, without clearing an expired session
//! navgate check /orders --dry-run
//!
//! # Visible menu, or every node with its visibility
//! navgate menu
//! navgate menu --all
//!
//! # Permission checks (non-zero exit when denied)
//! navgate can READ_ALL_USERS READ_ALL_ROLES
//!
//! # Token claims and expiry
//! navgate inspect
//!
//! # Configuration checks
//! navgate validate --strict
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

// =============================================================================
// Re-exports
// =============================================================================

pub use cli::{Cli, Commands};
pub use error::{CliError, CliResult};
pub use logging::{init_from_cli, init_logging};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
