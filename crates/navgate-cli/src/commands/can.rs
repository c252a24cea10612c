// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `can` command.

use std::collections::BTreeMap;

use super::{load_config, open_session, print_json};
use crate::cli::{CanArgs, Cli, OutputFormat};
use crate::error::{CliError, CliResult};

/// Executes the `can` command against the current session.
pub fn can(cli: &Cli, args: CanArgs) -> CliResult<()> {
    let config = load_config(cli)?;
    let provider = config.session_provider(open_session(cli, true)?);
    let session = provider.snapshot();
    let oracle = config.permission_oracle(provider.store().clone());

    let role = session
        .user_record()
        .ok()
        .flatten()
        .and_then(|u| u.role_name().map(str::to_string));

    let mut results = BTreeMap::new();
    for permission in &args.permissions {
        if !config.catalog.is_empty() && !config.catalog.contains(permission) {
            tracing::warn!(permission = %permission, "Permission is not declared in the catalog");
        }
        results.insert(permission.as_str(), oracle.is_allowed_in(&session, permission));
    }

    match cli.format {
        OutputFormat::Text => {
            match &role {
                Some(role) => println!("Role: {}", role),
                None => println!("Role: (none)"),
            }
            for (permission, allowed) in &results {
                println!(
                    "  {}: {}",
                    permission,
                    if *allowed { "allowed" } else { "denied" }
                );
            }
        }
        OutputFormat::Json => {
            print_json(&serde_json::json!({
                "role": role,
                "bypass_role": oracle.bypass_role(),
                "results": results,
            }))?;
        }
    }

    let denied: Vec<String> = results
        .iter()
        .filter(|(_, allowed)| !**allowed)
        .map(|(permission, _)| permission.to_string())
        .collect();
    if denied.is_empty() {
        Ok(())
    } else {
        Err(CliError::denied(denied))
    }
}
