// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `check` command.

use navgate_core::GuardDecision;

use super::{load_config, open_session, print_json};
use crate::cli::{CheckArgs, Cli, OutputFormat};
use crate::error::CliResult;

/// Executes the `check` command: runs the guard for one navigation.
pub fn check(cli: &Cli, args: CheckArgs) -> CliResult<()> {
    let config = load_config(cli)?;
    let store = open_session(cli, args.dry_run)?;
    let guard = config.route_guard(store);

    let target = config.routes.resolve(&args.location)?;
    let decision = guard.navigate(&config.routes, &args.location)?;

    tracing::info!(
        location = %args.location,
        proceed = decision.is_proceed(),
        dry_run = args.dry_run,
        "Guard evaluated"
    );

    match cli.format {
        OutputFormat::Text => {
            println!("Location: {}", target.full_path);
            match target.name.as_deref() {
                Some(name) => println!("Route:    {}", name),
                None => println!("Route:    (no match)"),
            }
            match &decision {
                GuardDecision::Proceed => println!("Decision: proceed"),
                GuardDecision::Redirect(redirect) => {
                    println!("Decision: redirect to '{}'", redirect.route_name);
                    for (key, value) in &redirect.query {
                        println!("  {}: {}", key, value);
                    }
                }
            }
        }
        OutputFormat::Json => {
            print_json(&serde_json::json!({
                "location": target,
                "decision": decision,
                "dry_run": args.dry_run,
            }))?;
        }
    }

    Ok(())
}
