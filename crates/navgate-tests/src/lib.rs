// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # navgate Integration Tests
//!
//! Integration tests for the navgate access layer, with shared fixtures and
//! builders.
//!
//! ## Module Structure
//!
//! - [`common`]: Shared test utilities
//!   - `fixtures`: Session states, route tables and menus used across suites
//!   - `builders`: Builders for tokens and user records
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all integration tests
//! cargo test -p navgate-tests
//!
//! # Run specific test suite
//! cargo test -p navgate-tests --test integration_guard
//! cargo test -p navgate-tests --test integration_navigation
//! cargo test -p navgate-tests --test integration_config
//! ```
//!
//! ## Test Categories
//!
//! ### Guard Tests (`integration_guard.rs`)
//! - Login, landing and expiry redirects
//! - Rule precedence
//! - Index redirect
//! - File-backed session store
//!
//! ### Navigation Tests (`integration_navigation.rs`)
//! - Link, group and heading visibility per role
//! - Pruned menu trees
//!
//! ### Config Tests (`integration_config.rs`)
//! - Reference configuration loading and linting
//! - Environment overrides
//!
//! ## Writing New Tests
//!
//! ```rust,ignore
//! use navgate_tests::prelude::*;
//!
//! #[test]
//! fn test_something() {
//!     let token = TokenBuilder::new().expires_in(3600).build();
//!     let store = SessionFixtures::logged_in(&UserFixtures::seller(), &token);
//!     // ... test logic
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod common;

/// Re-export commonly used items for convenience.
pub mod prelude {
    pub use crate::common::builders::*;
    pub use crate::common::fixtures::*;
    pub use crate::common::{init_test_logging, temp_test_dir};
}
