// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `validate` command.

use super::{load_config, print_json};
use crate::cli::{Cli, OutputFormat, ValidateArgs};
use crate::error::{CliError, CliResult};

/// Executes the `validate` command to validate configuration.
pub fn validate(cli: &Cli, args: ValidateArgs) -> CliResult<()> {
    let config_path = &cli.config;
    let config = load_config(cli)?;
    let warnings = config.lint();

    let permission_count = config.catalog.entries().count();
    let shown = args.show_config.then_some(&config);

    match cli.format {
        OutputFormat::Text => {
            println!("✓ Configuration is valid: {}", config_path.display());
            println!();
            println!("Summary:");
            println!("  Login route:   {}", config.guard.login_route);
            println!("  Landing route: {}", config.guard.landing_route);
            println!("  Bypass role:   {}", config.guard.bypass_role);
            println!("  Routes:        {}", config.routes.len());
            println!("  Menu entries:  {}", config.navigation.len());
            println!(
                "  Catalog:       {} groups, {} permissions",
                config.catalog.groups().len(),
                permission_count
            );

            if !warnings.is_empty() {
                println!();
                println!("Warnings:");
                for warning in &warnings {
                    println!("  ⚠ {}", warning);
                }
            }

            if args.show_config {
                println!();
                println!("Parsed configuration:");
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }
        OutputFormat::Json => {
            print_json(&serde_json::json!({
                "valid": true,
                "config_path": config_path.display().to_string(),
                "summary": {
                    "login_route": config.guard.login_route,
                    "landing_route": config.guard.landing_route,
                    "bypass_role": config.guard.bypass_role,
                    "route_count": config.routes.len(),
                    "menu_entry_count": config.navigation.len(),
                    "catalog_group_count": config.catalog.groups().len(),
                    "permission_count": permission_count,
                },
                "warnings": warnings,
                "config": shown,
            }))?;
        }
    }

    if args.strict && !warnings.is_empty() {
        return Err(CliError::Configuration(format!(
            "Strict mode: {} warning(s) found",
            warnings.len()
        )));
    }

    Ok(())
}
