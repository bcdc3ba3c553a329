//
//  jira-cli
//  cli/mod.rs
//

//! CLI command definitions using clap derive macros

mod auth;
mod completion;
mod issue;

pub use auth::AuthCommand;
pub use completion::CompletionCommand;
pub use issue::IssueCommand;

use clap::{Parser, Subcommand};

use crate::api::JiraClient;
use crate::auth::{keyring::default_store, resolve_base_url, resolve_token};

/// Jira CLI - Work with Jira issues from the command line
#[derive(Parser, Debug)]
#[command(
    name = "jira",
    version,
    about = "Work with Jira issues from the command line",
    long_about = "jira is a CLI for Jira Cloud and Server/Data Center.\n\n\
                  It brings issue creation, search, transitions, and more to your terminal.",
    propagate_version = true,
    after_help = "Use 'jira <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Jira base URL (e.g. https://jira.company.com)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Bearer token, overriding the stored credential
    #[arg(long, global = true)]
    pub token: Option<String>,
}

impl GlobalOptions {
    /// Builds an authenticated API client from the resolved credentials.
    ///
    /// Base URL precedence: `--base-url`, then `JIRA_BASE_URL`, then the
    /// saved config. Token precedence: `--token`, then the keychain entry
    /// for that base URL, then `JIRA_BEARER_TOKEN`.
    pub fn client(&self) -> anyhow::Result<JiraClient> {
        let base_url = resolve_base_url(self.base_url.as_deref())?;
        let store = default_store();
        let token = resolve_token(&base_url, self.token.as_deref(), store.as_ref())?;
        Ok(JiraClient::new(&base_url, &token)?)
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate with Jira
    #[command(visible_alias = "login")]
    Auth(AuthCommand),

    /// Manage issues
    #[command(visible_alias = "i")]
    Issue(IssueCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}
