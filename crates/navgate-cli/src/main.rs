// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! navgate - client-side route guard and menu visibility
//!
//! Main binary entry point.

use navgate_cli::error::report_error_and_exit;
use navgate_cli::{commands, init_from_cli, Cli};

fn main() {
    let cli = Cli::parse_args();
    init_from_cli(&cli);

    if let Err(e) = commands::execute(&cli) {
        report_error_and_exit(e);
    }
}
