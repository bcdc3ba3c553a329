//
//  jira-cli
//  cli/issue.rs
//

//! Issue commands
//!
//! This module provides the issue surface of the CLI: create, comment,
//! list, show, assign, transition, attach, and browse. Command handlers
//! gather input, call into [`crate::api`], and render results; no request
//! logic lives here.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;

use crate::api::browse::resolve_issue_url;
use crate::api::document::description_text;
use crate::api::error::ApiError;
use crate::api::issues::{
    add_comment, assign_issue, attach_files, create_issue, get_issue, list_transitions,
    search_issues, transition_issue, unassign_issue, AssigneeFilter, CreateIssueParams, Issue,
    JqlQuery,
};
use crate::api::users::{find_user, resolve_assignee, AssigneeSelector, JiraUser};
use crate::interactive::{edit_comment, prompt_input};
use crate::output::{csv_row, OutputFormat, OutputWriter, TableOutput};
use crate::util::{format_timestamp, open_browser, truncate};

use super::GlobalOptions;

/// Manage issues
#[derive(Args, Debug)]
pub struct IssueCommand {
    #[command(subcommand)]
    pub command: IssueSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum IssueSubcommand {
    /// Create a new issue
    Create(CreateArgs),

    /// Comment on an issue
    Comment(CommentArgs),

    /// List issues in a project
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show one issue in full
    Show(ShowArgs),

    /// Assign an issue to a user
    Assign(AssignArgs),

    /// Remove the assignee from an issue
    Unassign(UnassignArgs),

    /// Look up users by name or email
    Whois(WhoisArgs),

    /// Open an issue in the browser
    Open(OpenArgs),

    /// Move an issue through its workflow
    Transition(TransitionArgs),

    /// Attach local files to an issue
    Attach(AttachArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Project key (e.g. APP); prompted for when omitted
    #[arg(long, short = 'p')]
    pub project: Option<String>,

    /// Issue summary; prompted for when omitted
    #[arg(long, short = 's')]
    pub summary: Option<String>,

    /// Issue type name
    #[arg(long, short = 't', default_value = "Task")]
    pub issue_type: String,

    /// Issue description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Labels to set (repeatable)
    #[arg(long, short = 'l')]
    pub label: Vec<String>,

    /// Priority name
    #[arg(long)]
    pub priority: Option<String>,

    /// Open the created issue in the browser
    #[arg(long, short = 'w')]
    pub web: bool,

    /// Output the creation response as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CommentArgs {
    /// Issue key (e.g. APP-123)
    pub key: String,

    /// Comment body; opens $EDITOR when omitted
    #[arg(long, short = 'b')]
    pub body: Option<String>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Project key
    #[arg(long, short = 'p')]
    pub project: String,

    /// Include Done/Closed issues
    #[arg(long)]
    pub all: bool,

    /// Only issues assigned to the authenticated user
    #[arg(long, short = 'm')]
    pub mine: bool,

    /// Only issues assigned to this username or email
    #[arg(long, short = 'a')]
    pub assignee: Option<String>,

    /// Extra JQL ANDed onto the query
    #[arg(long, short = 'q')]
    pub jql: Option<String>,

    /// Maximum number of issues to list
    #[arg(long, short = 'l', default_value = "50")]
    pub limit: usize,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Issue key
    pub key: String,

    /// Output the raw issue as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct AssignArgs {
    /// Issue key
    pub key: String,

    /// Assign to the authenticated user
    #[arg(long = "self")]
    pub myself: bool,

    /// Assign by account id (no lookup performed)
    #[arg(long)]
    pub account_id: Option<String>,

    /// Assign by exact username (no lookup performed)
    #[arg(long)]
    pub user: Option<String>,

    /// Assign by email or display-name search
    #[arg(long)]
    pub email: Option<String>,

    /// On an ambiguous search, take the first candidate
    #[arg(long)]
    pub first: bool,
}

#[derive(Args, Debug)]
pub struct UnassignArgs {
    /// Issue key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct WhoisArgs {
    /// Name, username, or email fragment to search for
    pub query: String,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Issue key
    pub key: String,

    /// Skip the existence check before opening
    #[arg(long)]
    pub no_validate: bool,

    /// Print the URL instead of launching the browser
    #[arg(long)]
    pub print_only: bool,
}

#[derive(Args, Debug)]
pub struct TransitionArgs {
    /// Issue key
    pub key: String,

    /// Target status name; lists available transitions when omitted
    pub status: Option<String>,
}

#[derive(Args, Debug)]
pub struct AttachArgs {
    /// Issue key
    pub key: String,

    /// Files to attach
    #[arg(required = true)]
    pub files: Vec<std::path::PathBuf>,
}

// Display types

/// Column widths for the issue listing, summary takes the rest.
const KEY_WIDTH: usize = 11;
const TYPE_WIDTH: usize = 8;
const STATUS_WIDTH: usize = 12;
const PRIORITY_WIDTH: usize = 8;
const ASSIGNEE_WIDTH: usize = 18;
const UPDATED_WIDTH: usize = 16;

#[derive(Debug, Serialize)]
struct IssueListItem {
    key: String,
    issue_type: String,
    status: String,
    priority: String,
    assignee: String,
    updated: String,
    summary: String,
}

impl IssueListItem {
    fn from_issue(issue: &Issue) -> Self {
        let fields = &issue.fields;
        let named = |field: &Option<crate::api::issues::NamedField>| {
            field.as_ref().map(|f| f.name.clone()).unwrap_or_default()
        };

        Self {
            key: issue.key.clone(),
            issue_type: named(&fields.issuetype),
            status: named(&fields.status),
            priority: named(&fields.priority),
            assignee: fields
                .assignee
                .as_ref()
                .map(|u| u.label().to_string())
                .unwrap_or_else(|| "-".to_string()),
            updated: fields
                .updated
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_default(),
            summary: fields.summary.clone().unwrap_or_default(),
        }
    }

    fn print_list_header(color: bool) {
        let header = format!(
            "{:<KEY_WIDTH$} {:<TYPE_WIDTH$} {:<STATUS_WIDTH$} {:<PRIORITY_WIDTH$} {:<ASSIGNEE_WIDTH$} {:<UPDATED_WIDTH$} SUMMARY",
            "KEY", "TYPE", "STATUS", "PRIORITY", "ASSIGNEE", "UPDATED"
        );
        if color {
            println!("{}", style(header).cyan());
        } else {
            println!("{header}");
        }
    }
}

impl TableOutput for IssueListItem {
    fn print_table(&self, color: bool) {
        let key = format!("{:<KEY_WIDTH$}", truncate(&self.key, KEY_WIDTH));
        let row = format!(
            "{} {:<TYPE_WIDTH$} {:<STATUS_WIDTH$} {:<PRIORITY_WIDTH$} {:<ASSIGNEE_WIDTH$} {:<UPDATED_WIDTH$} {}",
            if color {
                style(key).cyan().to_string()
            } else {
                key
            },
            truncate(&self.issue_type, TYPE_WIDTH),
            truncate(&self.status, STATUS_WIDTH),
            truncate(&self.priority, PRIORITY_WIDTH),
            truncate(&self.assignee, ASSIGNEE_WIDTH),
            truncate(&self.updated, UPDATED_WIDTH),
            self.summary
        );
        println!("{row}");
    }

    fn csv_header() -> String {
        "key,type,status,priority,assignee,updated,summary".to_string()
    }

    fn csv_row(&self) -> String {
        csv_row(&[
            &self.key,
            &self.issue_type,
            &self.status,
            &self.priority,
            &self.assignee,
            &self.updated,
            &self.summary,
        ])
    }
}

const ACCOUNT_WIDTH: usize = 26;
const USERNAME_WIDTH: usize = 18;
const DISPLAY_WIDTH: usize = 24;

#[derive(Debug, Serialize)]
struct UserListItem {
    account_id: String,
    username: String,
    display_name: String,
    email: String,
}

impl UserListItem {
    fn from_user(user: &JiraUser) -> Self {
        Self {
            account_id: user.account_id.clone().unwrap_or_default(),
            username: user.name.clone().unwrap_or_default(),
            display_name: user.display_name.clone().unwrap_or_default(),
            email: user.email_address.clone().unwrap_or_default(),
        }
    }

    fn print_list_header(color: bool) {
        let header = format!(
            "{:<ACCOUNT_WIDTH$} {:<USERNAME_WIDTH$} {:<DISPLAY_WIDTH$} EMAIL",
            "ACCOUNT ID", "USERNAME", "DISPLAY NAME"
        );
        if color {
            println!("{}", style(header).cyan());
        } else {
            println!("{header}");
        }
    }
}

impl TableOutput for UserListItem {
    fn print_table(&self, _color: bool) {
        println!(
            "{:<ACCOUNT_WIDTH$} {:<USERNAME_WIDTH$} {:<DISPLAY_WIDTH$} {}",
            truncate(&self.account_id, ACCOUNT_WIDTH),
            truncate(&self.username, USERNAME_WIDTH),
            truncate(&self.display_name, DISPLAY_WIDTH),
            self.email
        );
    }

    fn csv_header() -> String {
        "account_id,username,display_name,email".to_string()
    }

    fn csv_row(&self) -> String {
        csv_row(&[
            &self.account_id,
            &self.username,
            &self.display_name,
            &self.email,
        ])
    }
}

impl IssueCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            IssueSubcommand::Create(args) => create(global, args).await,
            IssueSubcommand::Comment(args) => comment(global, args).await,
            IssueSubcommand::List(args) => list(global, args).await,
            IssueSubcommand::Show(args) => show(global, args).await,
            IssueSubcommand::Assign(args) => assign(global, args).await,
            IssueSubcommand::Unassign(args) => unassign(global, args).await,
            IssueSubcommand::Whois(args) => whois(global, args).await,
            IssueSubcommand::Open(args) => open(global, args).await,
            IssueSubcommand::Transition(args) => transition(global, args).await,
            IssueSubcommand::Attach(args) => attach(global, args).await,
        }
    }
}

async fn create(global: &GlobalOptions, args: &CreateArgs) -> Result<()> {
    let client = global.client()?;

    let project = match &args.project {
        Some(project) => project.clone(),
        None => prompt_input("Project key")?,
    };
    let summary = match &args.summary {
        Some(summary) => summary.clone(),
        None => prompt_input("Summary")?,
    };

    let params = CreateIssueParams {
        project,
        summary,
        issue_type: args.issue_type.clone(),
        description: args.description.clone(),
        labels: args.label.clone(),
        priority: args.priority.clone(),
    };

    let created = create_issue(&client, &params).await?;
    let url = crate::api::browse::issue_url(client.base_url(), &created.key);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&created)?);
    } else {
        let writer = OutputWriter::table();
        writer.write_success(&format!("Created {}", created.key));
        writer.write_info(&url);
    }

    if args.web {
        open_browser(&url)?;
    }

    Ok(())
}

async fn comment(global: &GlobalOptions, args: &CommentArgs) -> Result<()> {
    let client = global.client()?;

    let body = match &args.body {
        Some(body) => body.clone(),
        None => match edit_comment()? {
            Some(body) => body,
            None => {
                println!("Aborted: empty comment.");
                return Ok(());
            }
        },
    };

    add_comment(&client, &args.key, &body).await?;
    OutputWriter::table().write_success(&format!("Commented on {}", args.key));

    Ok(())
}

async fn list(global: &GlobalOptions, args: &ListArgs) -> Result<()> {
    if args.mine && args.assignee.is_some() {
        bail!(ApiError::Usage(
            "--mine and --assignee are mutually exclusive.".to_string()
        ));
    }

    let client = global.client()?;

    let assignee = if args.mine {
        AssigneeFilter::Mine
    } else if let Some(who) = &args.assignee {
        AssigneeFilter::User(who.clone())
    } else {
        AssigneeFilter::Any
    };

    let query = JqlQuery {
        project: args.project.clone(),
        only_open: !args.all,
        assignee,
        extra: args.jql.clone(),
    };

    let result = search_issues(&client, &query, args.limit).await?;
    let items: Vec<IssueListItem> = result.issues.iter().map(IssueListItem::from_issue).collect();

    let writer = OutputWriter::new(args.output);
    match args.output {
        OutputFormat::Table => {
            if items.is_empty() {
                writer.write_info("No matching issues.");
                return Ok(());
            }
            IssueListItem::print_list_header(writer.color_enabled());
            writer.write_list(&items)?;
            writer.write_info(&format!(
                "Showing {} of ~{} matching issues.",
                items.len(),
                result.total
            ));
        }
        _ => writer.write_list(&items)?,
    }

    Ok(())
}

async fn show(global: &GlobalOptions, args: &ShowArgs) -> Result<()> {
    let client = global.client()?;
    let issue = get_issue(&client, &args.key).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&issue)?);
        return Ok(());
    }

    let color = console::colors_enabled();
    let fields = &issue.fields;
    let named = |field: &Option<crate::api::issues::NamedField>| {
        field.as_ref().map(|f| f.name.clone()).unwrap_or_default()
    };

    crate::output::print_header(&format!(
        "{}  {}",
        issue.key,
        fields.summary.as_deref().unwrap_or("")
    ));
    crate::output::print_field("Type", &named(&fields.issuetype), color);
    crate::output::print_field("Status", &named(&fields.status), color);
    crate::output::print_field("Priority", &named(&fields.priority), color);
    crate::output::print_field(
        "Assignee",
        &fields
            .assignee
            .as_ref()
            .map(|u| u.label().to_string())
            .unwrap_or_else(|| "Unassigned".to_string()),
        color,
    );
    if let Some(updated) = &fields.updated {
        crate::output::print_field("Updated", &format_timestamp(updated), color);
    }

    let description = description_text(fields.description.as_ref());
    if !description.trim().is_empty() {
        println!();
        println!("{}", description.trim_end());
    }

    println!();
    println!(
        "{}",
        crate::api::browse::issue_url(client.base_url(), &issue.key)
    );

    Ok(())
}

async fn assign(global: &GlobalOptions, args: &AssignArgs) -> Result<()> {
    let client = global.client()?;

    let selector = AssigneeSelector::from_flags(
        args.myself,
        args.account_id.clone(),
        args.user.clone(),
        args.email.clone(),
    )?;

    let resolved = match resolve_assignee(&client, &selector, args.first).await {
        Ok(resolved) => resolved,
        Err(ApiError::Ambiguous { query, candidates }) => {
            let writer = OutputWriter::table();
            writer.write_error(&format!("{} users matched '{query}':", candidates.len()));
            UserListItem::print_list_header(writer.color_enabled());
            for candidate in &candidates {
                UserListItem::from_user(candidate).print_table(writer.color_enabled());
            }
            bail!("Refine the query, pass --first, or use --account-id.");
        }
        Err(e) => return Err(e.into()),
    };

    assign_issue(&client, &args.key, &resolved).await?;
    OutputWriter::table().write_success(&format!("Assigned {} to {}", args.key, resolved.label()));

    Ok(())
}

async fn unassign(global: &GlobalOptions, args: &UnassignArgs) -> Result<()> {
    let client = global.client()?;
    unassign_issue(&client, &args.key).await?;
    OutputWriter::table().write_success(&format!("Unassigned {}", args.key));
    Ok(())
}

async fn whois(global: &GlobalOptions, args: &WhoisArgs) -> Result<()> {
    let client = global.client()?;
    let users = find_user(&client, &args.query).await?;

    if users.is_empty() {
        println!("No users matched '{}'.", args.query);
        return Ok(());
    }

    let items: Vec<UserListItem> = users.iter().map(UserListItem::from_user).collect();
    let writer = OutputWriter::new(args.output);
    if args.output == OutputFormat::Table {
        UserListItem::print_list_header(writer.color_enabled());
    }
    writer.write_list(&items)?;

    Ok(())
}

async fn open(global: &GlobalOptions, args: &OpenArgs) -> Result<()> {
    let client = global.client()?;
    let url = resolve_issue_url(&client, &args.key, !args.no_validate).await?;

    if args.print_only {
        println!("{url}");
    } else {
        println!("Opening {url}");
        open_browser(&url)?;
    }

    Ok(())
}

async fn transition(global: &GlobalOptions, args: &TransitionArgs) -> Result<()> {
    let client = global.client()?;

    let Some(status) = &args.status else {
        let transitions = list_transitions(&client, &args.key).await?;
        if transitions.is_empty() {
            println!("No transitions available for {}.", args.key);
            return Ok(());
        }
        println!("Available transitions for {}:", args.key);
        for t in &transitions {
            println!("  {}", t.name);
        }
        return Ok(());
    };

    let applied = transition_issue(&client, &args.key, status).await?;
    OutputWriter::table().write_success(&format!("Moved {} to {}", args.key, applied.name));

    Ok(())
}

async fn attach(global: &GlobalOptions, args: &AttachArgs) -> Result<()> {
    let client = global.client()?;
    let attachments = attach_files(&client, &args.key, &args.files).await?;

    let writer = OutputWriter::table();
    writer.write_success(&format!(
        "Attached {} file(s) to {}",
        attachments.len(),
        args.key
    ));
    for attachment in &attachments {
        writer.write_info(&format!("  {} ({} bytes)", attachment.filename, attachment.size));
    }

    Ok(())
}
