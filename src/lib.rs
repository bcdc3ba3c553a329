//
//  jira-cli
//  lib.rs
//

//! # Jira CLI Library
//!
//! A command-line interface library for working with Jira issue trackers,
//! both Cloud and Server/Data Center deployments, authenticated with a
//! bearer token.
//!
//! ## Overview
//!
//! This library provides the core functionality for the `jira` CLI tool:
//! creating and searching issues, workflow transitions, assignment,
//! attachments, and opening issues in the browser.
//!
//! ## Module Structure
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`api`]: HTTP client and issue/user operations against the REST API
//! - [`auth`]: Credential resolution and keychain storage
//! - [`config`]: Configuration file management
//! - [`output`]: Output formatting (Table, CSV, JSON)
//! - [`interactive`]: Interactive prompts and editor integration
//! - [`util`]: Utility functions
//!
//! ## Credential Resolution
//!
//! | Piece | Precedence |
//! |-------|------------|
//! | Base URL | `--base-url`, `JIRA_BASE_URL`, saved config |
//! | Token | `--token`, system keychain, `JIRA_BEARER_TOKEN` |

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the
/// clap derive API.
pub mod cli;

/// REST API client and operations.
///
/// The client handles authentication, per-category timeouts, and error
/// normalization; sibling modules implement issue, user, document, and
/// browse-URL operations on top of it.
pub mod api;

/// Credential resolution and secure token storage.
///
/// Tokens live in the system keychain keyed by base URL; resolution
/// follows a fixed precedence chain per credential.
pub mod auth;

/// Configuration file management.
///
/// Manages the non-secret defaults stored in platform-specific locations:
/// - Linux: `~/.config/jira-cli/config.json`
/// - macOS: `~/Library/Application Support/jira-cli/config.json`
/// - Windows: `%APPDATA%\jira-cli\config.json`
pub mod config;

/// Output formatting for different modes.
///
/// Table format for interactive use, CSV for export, JSON for scripting.
pub mod output;

/// Interactive terminal UI components.
///
/// Text and masked input, and editor integration for multi-line comment
/// composition.
pub mod interactive;

/// Utility functions and helpers.
pub mod util;

/// Re-export of the main CLI struct for convenient access.
pub use cli::Cli;

/// Re-export of the configuration struct.
pub use config::Config;

/// Application name constant.
///
/// The name of the CLI binary, used for display and shell completions.
pub const APP_NAME: &str = "jira";

/// Application version constant, derived from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Every failure exits with `1`; scripts distinguish outcomes by parsing
/// stderr, not by code.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// Any failure: configuration, network, remote rejection, or usage.
    pub const ERROR: i32 = 1;
}
