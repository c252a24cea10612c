// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `inspect` command.

use chrono::Utc;
use navgate_core::{try_decode, GuardConfig, SessionProvider};

use super::{open_session, print_json};
use crate::cli::{Cli, InspectArgs, OutputFormat};
use crate::error::{CliError, CliResult};

/// Executes the `inspect` command: decodes a token and reports expiry.
///
/// Without an explicit token, the token stored in the session file is used.
/// The session keys come from the configuration file when it exists.
pub fn inspect(cli: &Cli, args: InspectArgs) -> CliResult<()> {
    let token = match args.token {
        Some(token) => token,
        None => session_token(cli)?,
    };

    let claims = try_decode(&token)?;
    let now = Utc::now().timestamp();
    let expired = claims.is_expired_at(now);

    match cli.format {
        OutputFormat::Text => {
            match claims.sub() {
                Some(sub) => println!("Subject:    {}", sub),
                None => println!("Subject:    (none)"),
            }
            if let Some(issued) = claims.issued_at() {
                println!("Issued at:  {}", issued.to_rfc3339());
            }
            match claims.expires_at() {
                Some(expires) => println!("Expires at: {}", expires.to_rfc3339()),
                None => println!("Expires at: (no expiry claim, treated as expired)"),
            }
            println!("Expired:    {}", if expired { "yes" } else { "no" });
            if let Some(remaining) = claims.time_until_expiration() {
                println!("Remaining:  {}s", remaining.as_secs());
            }
            println!();
            println!("Claims:");
            println!("{}", serde_json::to_string_pretty(&claims)?);
        }
        OutputFormat::Json => {
            print_json(&serde_json::json!({
                "claims": claims,
                "exp": claims.exp(),
                "expires_at": claims.expires_at().map(|t| t.to_rfc3339()),
                "expired": expired,
                "checked_at": now,
            }))?;
        }
    }

    Ok(())
}

fn session_token(cli: &Cli) -> CliResult<String> {
    let guard = if cli.config.exists() {
        super::load_config(cli)?.guard
    } else {
        GuardConfig::default()
    };

    let provider = SessionProvider::from_config(open_session(cli, true)?, &guard);
    provider
        .snapshot()
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            CliError::config(format!(
                "No '{}' entry in session file {}",
                guard.token_key,
                cli.session.display()
            ))
        })
}
