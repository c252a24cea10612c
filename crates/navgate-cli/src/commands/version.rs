// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `version` command.

use super::print_json;
use crate::cli::{Cli, OutputFormat};
use crate::error::CliResult;

/// Executes the `version` command to display version information.
pub fn version(cli: &Cli) -> CliResult<()> {
    match cli.format {
        OutputFormat::Text => {
            println!("navgate - client-side route guard and menu visibility");
            println!();
            println!("Version Information:");
            println!("  navgate-cli:    {}", crate::VERSION);
            println!("  navgate-core:   {}", navgate_core::VERSION);
            println!("  navgate-config: {}", navgate_config::VERSION);
            println!();
            println!("Build Information:");
            println!("  Target:       {}", std::env::consts::ARCH);
            println!("  OS:           {}", std::env::consts::OS);
            println!();
            println!("License: PolyForm Noncommercial License 1.0.0");
            println!("Copyright (c) 2025 Sylvex. All rights reserved.");
        }
        OutputFormat::Json => {
            print_json(&serde_json::json!({
                "navgate-cli": crate::VERSION,
                "navgate-core": navgate_core::VERSION,
                "navgate-config": navgate_config::VERSION,
                "arch": std::env::consts::ARCH,
                "os": std::env::consts::OS,
            }))?;
        }
    }

    Ok(())
}
