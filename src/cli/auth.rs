//
//  jira-cli
//  cli/auth.rs
//

//! Authentication commands for the Jira CLI.
//!
//! Login stores the base URL in the config file and the bearer token in
//! the system keychain, keyed by base URL so several deployments can be
//! authenticated side by side.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::api::users::myself;
use crate::api::JiraClient;
use crate::auth::{
    clear_token, keyring::default_store, persist_base_url, persist_token, resolve_base_url,
};
use crate::interactive::{prompt_input, prompt_input_with_default, prompt_password};

use super::GlobalOptions;

/// Authenticate with Jira.
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in to a Jira deployment
    Login(LoginArgs),

    /// Show the authenticated identity
    Whoami,

    /// Remove the stored token for a deployment
    Logout(LogoutArgs),
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Jira base URL (prompted for when omitted)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Bearer token (prompted for, masked, when omitted)
    #[arg(long)]
    pub token: Option<String>,
}

#[derive(Args, Debug)]
pub struct LogoutArgs {
    /// Base URL to log out from (defaults to the configured one)
    #[arg(long)]
    pub base_url: Option<String>,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => login(args).await,
            AuthSubcommand::Whoami => whoami(global).await,
            AuthSubcommand::Logout(args) => logout(args),
        }
    }
}

/// Performs the login flow: gather, persist, validate.
async fn login(args: &LoginArgs) -> Result<()> {
    let saved = crate::config::Config::load();

    let base_url = match &args.base_url {
        Some(url) => url.clone(),
        None => match saved.base_url.as_deref() {
            Some(current) => prompt_input_with_default("Jira base URL", current)?,
            None => prompt_input("Jira base URL (e.g. https://jira.company.com)")?,
        },
    };
    let base_url = base_url.trim_end_matches('/').to_string();

    let token = match &args.token {
        Some(token) => token.clone(),
        None => prompt_password("Bearer token")?,
    };

    persist_base_url(&base_url)?;
    let store = default_store();
    persist_token(store.as_ref(), &base_url, &token);

    // Validate what we just stored; a failure is a warning, not a rollback,
    // so a token for a temporarily unreachable server still gets saved.
    println!("Validating token...");
    let client = JiraClient::new(&base_url, &token)?;
    match myself(&client).await {
        Ok(user) => {
            println!("Logged in to {} as {}", base_url, user.label());
        }
        Err(e) => {
            eprintln!(
                "{} {e}",
                style("Warning: credentials saved but validation failed.").yellow()
            );
        }
    }

    Ok(())
}

/// Shows the identity behind the resolved credentials.
async fn whoami(global: &GlobalOptions) -> Result<()> {
    let client = global.client()?;
    let user = myself(&client).await?;

    println!("Server:  {}", client.base_url());
    println!("User:    {}", user.label());
    if let Some(email) = &user.email_address {
        println!("Email:   {email}");
    }
    if let Some(account_id) = &user.account_id {
        println!("Account: {account_id}");
    }

    Ok(())
}

/// Removes the stored token for a deployment, best effort.
fn logout(args: &LogoutArgs) -> Result<()> {
    let base_url = resolve_base_url(args.base_url.as_deref())?;
    let store = default_store();

    clear_token(store.as_ref(), &base_url);
    println!("Logged out of {base_url}");

    Ok(())
}
