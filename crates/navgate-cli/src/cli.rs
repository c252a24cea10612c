// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI argument parsing and command definitions.
//!
//! - `check`: Run the route guard for a location
//! - `menu`: Show the navigation menu for the current session
//! - `can`: Ask the permission oracle
//! - `inspect`: Decode a session token
//! - `validate`: Validate the configuration file
//! - `version`: Show version information

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// =============================================================================
// Main CLI Structure
// =============================================================================

/// navgate - client-side route guard and menu visibility
///
/// Evaluates a single-page application's access rules against a session
/// stored in a JSON file, the way the browser would before each navigation.
#[derive(Parser, Debug)]
#[command(
    name = "navgate",
    author = "Sylvex <contact@sylvex.io>",
    version = navgate_core::VERSION,
    about = "Client-side route guard and permission-driven menu visibility",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        default_value = "config/navgate.yaml",
        env = "NAVGATE_CONFIG",
        global = true
    )]
    pub config: PathBuf,

    /// Session file path (JSON object holding the user and token keys)
    #[arg(
        short,
        long,
        default_value = "session.json",
        env = "NAVGATE_SESSION",
        global = true
    )]
    pub session: PathBuf,

    /// Log level (trace, debug, info, warn, error); defaults to the config file
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Log format (text, json, compact); defaults to the config file
    #[arg(long, env = "NAVGATE_LOG_FORMAT", global = true)]
    pub log_format: Option<LogFormat>,

    /// Output format for command results
    #[arg(short, long, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Enable quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

// =============================================================================
// Subcommands
// =============================================================================

/// Available subcommands for the navgate CLI.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the route guard for a location
    ///
    /// Resolves the location against the route table, applies the index
    /// redirect, then evaluates the guard. An expired session is cleared
    /// from the session file unless `--dry-run` is given.
    Check(CheckArgs),

    /// Show the navigation menu for the current session
    Menu(MenuArgs),

    /// Ask whether the current user holds permissions
    ///
    /// Exits with a non-zero code when any permission is denied.
    Can(CanArgs),

    /// Decode a session token and report its expiry
    Inspect(InspectArgs),

    /// Validate the configuration file
    ///
    /// Parses and validates the configuration and reports lint warnings.
    Validate(ValidateArgs),

    /// Show detailed version information
    Version,
}

// =============================================================================
// Command Arguments
// =============================================================================

/// Arguments for the `check` command.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Application location, e.g. `/orders?page=2`
    pub location: String,

    /// Evaluate against a copy of the session; never modify the session file
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `menu` command.
#[derive(Args, Debug, Default, Clone)]
pub struct MenuArgs {
    /// Show every node with its visibility instead of only visible nodes
    #[arg(short, long)]
    pub all: bool,
}

/// Arguments for the `can` command.
#[derive(Args, Debug, Clone)]
pub struct CanArgs {
    /// Permission identifiers to check
    #[arg(required = true, num_args = 1..)]
    pub permissions: Vec<String>,
}

/// Arguments for the `inspect` command.
#[derive(Args, Debug, Default, Clone)]
pub struct InspectArgs {
    /// Token to decode (default: the token stored in the session file)
    pub token: Option<String>,
}

/// Arguments for the `validate` command.
#[derive(Args, Debug, Default, Clone)]
pub struct ValidateArgs {
    /// Show parsed configuration after validation
    #[arg(long)]
    pub show_config: bool,

    /// Strict mode: treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

// =============================================================================
// Enums
// =============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for structured logging
    Json,
    /// Compact format for minimal output
    Compact,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for programmatic parsing
    Json,
}

// =============================================================================
// Helper Methods
// =============================================================================

impl Cli {
    /// Parse CLI arguments from the command line.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the log level forced by flags, if any.
    ///
    /// `--quiet` and `--verbose` win over `--log-level`.
    pub fn effective_log_level(&self) -> Option<&str> {
        if self.quiet {
            Some("error")
        } else if self.verbose {
            Some("debug")
        } else {
            self.log_level.as_deref()
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_command() {
        let cli = Cli::parse_from(["navgate", "check", "/orders?page=2", "--dry-run"]);
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.location, "/orders?page=2");
                assert!(args.dry_run);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_can_requires_permission() {
        assert!(Cli::try_parse_from(["navgate", "can"]).is_err());

        let cli = Cli::parse_from(["navgate", "can", "READ_ALL_USERS", "READ_ALL_ROLES"]);
        match cli.command {
            Commands::Can(args) => assert_eq!(args.permissions.len(), 2),
            _ => panic!("Expected Can command"),
        }
    }

    #[test]
    fn test_inspect_optional_token() {
        let cli = Cli::parse_from(["navgate", "inspect"]);
        assert!(matches!(cli.command, Commands::Inspect(InspectArgs { token: None })));
    }

    #[test]
    fn test_global_paths() {
        let cli = Cli::parse_from([
            "navgate",
            "menu",
            "-c",
            "/etc/navgate.yaml",
            "--session",
            "/tmp/session.json",
            "--format",
            "json",
        ]);
        assert_eq!(cli.config, PathBuf::from("/etc/navgate.yaml"));
        assert_eq!(cli.session, PathBuf::from("/tmp/session.json"));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_validate_command() {
        let cli = Cli::parse_from(["navgate", "validate", "--strict"]);
        match cli.command {
            Commands::Validate(args) => assert!(args.strict),
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_log_level_flags() {
        let cli = Cli::parse_from(["navgate", "version"]);
        assert_eq!(cli.effective_log_level(), None);

        let cli = Cli::parse_from(["navgate", "version", "-l", "info"]);
        assert_eq!(cli.effective_log_level(), Some("info"));

        let cli = Cli::parse_from(["navgate", "version", "-l", "info", "-q"]);
        assert_eq!(cli.effective_log_level(), Some("error"));

        let cli = Cli::parse_from(["navgate", "version", "-v"]);
        assert_eq!(cli.effective_log_level(), Some("debug"));
    }
}
