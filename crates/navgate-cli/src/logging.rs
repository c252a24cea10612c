// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Logging and tracing initialization.
//!
//! Logs go to stderr so that command output on stdout stays machine-readable.
//! Flags win over the `logging` section of the configuration file.

use std::path::Path;

use navgate_config::{ConfigLoader, LoggingConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, LogFormat};

// =============================================================================
// Logging Initialization
// =============================================================================

/// Initializes the logging subsystem.
///
/// `RUST_LOG` takes precedence over `level` when set.
///
/// # Example
///
/// ```ignore
/// use navgate_cli::logging::init_logging;
/// use navgate_cli::cli::LogFormat;
///
/// init_logging("info", LogFormat::Text);
/// ```
pub fn init_logging(level: &str, format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Text => init_text_logging(env_filter),
        LogFormat::Json => init_json_logging(env_filter),
        LogFormat::Compact => init_compact_logging(env_filter),
    }
}

fn init_text_logging(filter: EnvFilter) {
    let is_terminal = std::io::IsTerminal::is_terminal(&std::io::stderr());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(is_terminal),
        )
        .init();
}

fn init_json_logging(filter: EnvFilter) {
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_current_span(true)
                .with_span_list(true),
        )
        .init();
}

fn init_compact_logging(filter: EnvFilter) {
    let is_terminal = std::io::IsTerminal::is_terminal(&std::io::stderr());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(is_terminal),
        )
        .init();
}

// =============================================================================
// Settings Resolution
// =============================================================================

/// Level used when neither flags nor the config file name one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Resolves the level and format from flags, then the config file.
pub fn resolve_settings(cli: &Cli) -> (String, LogFormat) {
    let forced_level = cli.effective_log_level();
    let file = if forced_level.is_none() || cli.log_format.is_none() {
        logging_section(&cli.config)
    } else {
        None
    };
    settings_from(forced_level, cli.log_format, file.as_ref())
}

/// Initializes logging for a parsed command line.
pub fn init_from_cli(cli: &Cli) {
    let (level, format) = resolve_settings(cli);
    init_logging(&level, format);
}

fn settings_from(
    level: Option<&str>,
    format: Option<LogFormat>,
    file: Option<&LoggingConfig>,
) -> (String, LogFormat) {
    let level = level
        .map(str::to_string)
        .or_else(|| file.map(|f| f.level.as_str().to_string()))
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    let format = format
        .or_else(|| {
            file.map(|f| match f.format {
                navgate_config::LogFormat::Text => LogFormat::Text,
                navgate_config::LogFormat::Compact => LogFormat::Compact,
                navgate_config::LogFormat::Json => LogFormat::Json,
            })
        })
        .unwrap_or_default();

    (level, format)
}

/// Reads the `logging` section, ignoring any error; the command reports those.
fn logging_section(path: &Path) -> Option<LoggingConfig> {
    if !path.exists() {
        return None;
    }
    ConfigLoader::new().load(path).ok().map(|c| c.logging)
}

// =============================================================================
// Tests
// =============================================================================
