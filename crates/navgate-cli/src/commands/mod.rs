// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI command implementations.
//!
//! - `check`: Run the route guard for a location
//! - `menu`: Show the navigation menu for the current session
//! - `can`: Ask the permission oracle
//! - `inspect`: Decode a session token
//! - `validate`: Validate configuration file
//! - `version`: Show version information

mod can;
mod check;
mod inspect;
mod menu;
mod validate;
mod version;

pub use can::can;
pub use check::check;
pub use inspect::inspect;
pub use menu::menu;
pub use validate::validate;
pub use version::version;

use std::sync::Arc;

use navgate_config::{ConfigLoader, NavgateConfig};
use navgate_core::{FileSessionStore, MemorySessionStore, SessionStore};
use serde::Serialize;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, CliResult};

/// Executes the appropriate command based on CLI arguments.
pub fn execute(cli: &Cli) -> CliResult<()> {
    match cli.command.clone() {
        Commands::Check(args) => check::check(cli, args),
        Commands::Menu(args) => menu::menu(cli, args),
        Commands::Can(args) => can::can(cli, args),
        Commands::Inspect(args) => inspect::inspect(cli, args),
        Commands::Validate(args) => validate::validate(cli, args),
        Commands::Version => version::version(cli),
    }
}

// =============================================================================
// Shared Helpers
// =============================================================================

/// Loads and validates the configuration named on the command line.
pub(crate) fn load_config(cli: &Cli) -> CliResult<NavgateConfig> {
    if !cli.config.exists() {
        return Err(CliError::config(format!(
            "Configuration file not found: {}",
            cli.config.display()
        )));
    }
    ConfigLoader::new()
        .load(&cli.config)
        .map_err(|e| CliError::from(e).with_context("Failed to load configuration"))
}

/// Opens the session file.
///
/// With `detached`, the file is read once into memory and never written.
pub(crate) fn open_session(cli: &Cli, detached: bool) -> CliResult<Arc<dyn SessionStore>> {
    let file = FileSessionStore::new(&cli.session);
    if detached {
        let entries = file.load()?;
        return Ok(Arc::new(MemorySessionStore::with_entries(entries)));
    }
    Ok(Arc::new(file))
}

/// Prints a value as pretty JSON.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
