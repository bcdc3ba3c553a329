//
//  jira-cli
//  api/browse.rs
//

//! Browse URL construction for issues, with optional existence validation.

use crate::api::client::{JiraClient, TIMEOUT_VALIDATE};
use crate::api::error::ApiError;
use crate::api::issues::Issue;

/// Builds the web UI URL for an issue key.
///
/// Pure string construction; the key is not checked against the server.
pub fn issue_url(base_url: &str, issue_key: &str) -> String {
    format!("{}/browse/{}", base_url.trim_end_matches('/'), issue_key)
}

/// Resolves the browse URL for an issue, optionally confirming it exists.
///
/// With `validate` set, the issue is fetched first and any failure aborts
/// resolution; the URL is never returned for a confirmed-missing issue.
/// Without it, no network call is made at all.
pub async fn resolve_issue_url(
    client: &JiraClient,
    issue_key: &str,
    validate: bool,
) -> Result<String, ApiError> {
    if validate {
        let _: Issue = client
            .get(&format!("/issue/{issue_key}"), TIMEOUT_VALIDATE)
            .await?;
    }

    Ok(issue_url(client.base_url(), issue_key))
}
