//
//  jira-cli
//  api/issues.rs
//

//! # Issue Operations
//!
//! Request/response logic for every issue operation: create, comment,
//! search (JQL assembly plus pagination), fetch, assignment, workflow
//! transitions, and attachment upload.
//!
//! Transitions deserve a note: they are not freely settable. The provider
//! defines a workflow graph and only exposes the edges leaving an issue's
//! current state. This module never models that graph; it fetches the
//! currently legal transition set and executes one by name-to-id
//! resolution. There is no retry on rejection, because the legal set may
//! have changed between list and execute.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::client::{JiraClient, TIMEOUT_DEFAULT, TIMEOUT_UPLOAD};
use crate::api::error::ApiError;
use crate::api::users::{JiraUser, ResolvedAssignee};

/// Page size requested from the search endpoint.
///
/// The effective `maxResults` of each page is `min(50, remaining_limit)`.
pub const SEARCH_PAGE_SIZE: usize = 50;

/// Fields requested for every search hit.
const SEARCH_FIELDS: [&str; 7] = [
    "key",
    "summary",
    "issuetype",
    "status",
    "assignee",
    "priority",
    "updated",
];

/// A field that only carries a display name (issue type, status, priority).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedField {
    /// Display name of the field value.
    pub name: String,
}

/// An issue as returned by the search and fetch endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Issue key (`PROJECT-NUMBER`).
    pub key: String,
    /// Requested fields; anything the server omitted is `None`.
    #[serde(default)]
    pub fields: IssueFields,
}

/// The subset of issue fields this client reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub issuetype: Option<NamedField>,
    #[serde(default)]
    pub status: Option<NamedField>,
    #[serde(default)]
    pub priority: Option<NamedField>,
    #[serde(default)]
    pub assignee: Option<JiraUser>,
    #[serde(default)]
    pub updated: Option<String>,
    /// Either a plain string (API v2) or a structured ADF document.
    #[serde(default)]
    pub description: Option<serde_json::Value>,
}

/// Response to issue creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: Option<String>,
}

/// Response to comment creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedComment {
    pub id: String,
}

/// One edge leaving the issue's current workflow state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transition {
    /// Opaque transition id, only valid against the current state.
    pub id: String,
    /// Human-readable transition name.
    pub name: String,
}

/// Wire shape of the transitions listing.
#[derive(Debug, Deserialize)]
struct TransitionsResponse {
    #[serde(default)]
    transitions: Vec<Transition>,
}

/// Attachment metadata as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub filename: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub author: Option<JiraUser>,
}

/// One page of search results as returned by the server.
#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    issues: Vec<Issue>,
}

/// Accumulated search result.
///
/// `total` is the server-reported grand total, which may exceed
/// `issues.len()` when the caller's limit cut the result set short.
#[derive(Debug, Serialize)]
pub struct SearchResult {
    pub total: u64,
    pub issues: Vec<Issue>,
}

/// Parameters for issue creation.
#[derive(Debug, Clone, Default)]
pub struct CreateIssueParams {
    pub project: String,
    pub summary: String,
    pub issue_type: String,
    pub description: Option<String>,
    pub labels: Vec<String>,
    pub priority: Option<String>,
}

/// Assignee filter for issue listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AssigneeFilter {
    /// No assignee clause.
    #[default]
    Any,
    /// `assignee = currentUser()`.
    Mine,
    /// `assignee = "<username or email>"`.
    User(String),
}

/// A composable JQL query.
///
/// Clause order is fixed (project, status category, assignee, extra) so the
/// built string is stable for a given input; the sort clause is always
/// `ORDER BY updated DESC`.
#[derive(Debug, Clone)]
pub struct JqlQuery {
    pub project: String,
    /// Excludes Done/Closed issues via `statusCategory != Done`.
    pub only_open: bool,
    pub assignee: AssigneeFilter,
    /// Free-text JQL ANDed onto the base query, parenthesized.
    pub extra: Option<String>,
}

impl JqlQuery {
    /// Creates a query for a project, defaulting to open issues only.
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            only_open: true,
            assignee: AssigneeFilter::Any,
            extra: None,
        }
    }

    /// Builds the JQL string.
    pub fn build(&self) -> String {
        let mut clauses = vec![format!("project = \"{}\"", self.project)];

        if self.only_open {
            clauses.push("statusCategory != Done".to_string());
        }

        match &self.assignee {
            AssigneeFilter::Any => {}
            AssigneeFilter::Mine => clauses.push("assignee = currentUser()".to_string()),
            // Quotes allow spaces in usernames and full email addresses.
            AssigneeFilter::User(who) => clauses.push(format!("assignee = \"{who}\"")),
        }

        if let Some(extra) = &self.extra {
            clauses.push(format!("({extra})"));
        }

        format!("{} ORDER BY updated DESC", clauses.join(" AND "))
    }
}

/// Creates an issue and returns the new key.
pub async fn create_issue(
    client: &JiraClient,
    params: &CreateIssueParams,
) -> Result<CreatedIssue, ApiError> {
    let mut fields = json!({
        "project": {"key": params.project},
        "summary": params.summary,
        "issuetype": {"name": params.issue_type},
    });

    if let Some(description) = &params.description {
        fields["description"] = json!(description);
    }
    if !params.labels.is_empty() {
        fields["labels"] = json!(params.labels);
    }
    if let Some(priority) = &params.priority {
        fields["priority"] = json!({"name": priority});
    }

    client
        .post("/issue", &json!({"fields": fields}), TIMEOUT_DEFAULT)
        .await
}

/// Adds a comment to an existing issue.
pub async fn add_comment(
    client: &JiraClient,
    issue_key: &str,
    body: &str,
) -> Result<CreatedComment, ApiError> {
    client
        .post(
            &format!("/issue/{issue_key}/comment"),
            &json!({"body": body}),
            TIMEOUT_DEFAULT,
        )
        .await
}

/// Fetches a single issue by key.
pub async fn get_issue(client: &JiraClient, issue_key: &str) -> Result<Issue, ApiError> {
    client
        .get(&format!("/issue/{issue_key}"), TIMEOUT_DEFAULT)
        .await
}

/// Searches issues with pagination, up to `limit` results.
///
/// Each page requests `min(50, remaining)` issues. The loop stops when the
/// limit is reached, when a page comes back short or empty (end of the
/// result set), or when the server-reported total is exhausted, so it
/// terminates even if the server's total is inconsistent across pages.
///
/// The returned `total` is the server's grand total; `issues.len()` is
/// always `<= limit`.
pub async fn search_issues(
    client: &JiraClient,
    query: &JqlQuery,
    limit: usize,
) -> Result<SearchResult, ApiError> {
    let jql = query.build();
    let mut issues: Vec<Issue> = Vec::new();
    let mut total: u64 = 0;
    let mut start_at = 0usize;

    while issues.len() < limit {
        let max_results = SEARCH_PAGE_SIZE.min(limit - issues.len());
        let body = json!({
            "jql": jql,
            "startAt": start_at,
            "maxResults": max_results,
            "fields": SEARCH_FIELDS,
        });

        let page: SearchPage = client.post("/search", &body, TIMEOUT_DEFAULT).await?;
        total = page.total;

        let count = page.issues.len();
        issues.extend(page.issues);

        let exhausted = (start_at + count) as u64 >= page.total;
        if count == 0 || count < max_results || exhausted {
            break;
        }
        start_at += count;
    }

    Ok(SearchResult { total, issues })
}

/// Lists the transitions currently legal for an issue.
///
/// An empty list is a valid answer (terminal state or missing permissions),
/// not an error. Order is preserved as reported by the server.
pub async fn list_transitions(
    client: &JiraClient,
    issue_key: &str,
) -> Result<Vec<Transition>, ApiError> {
    let response: TransitionsResponse = client
        .get(&format!("/issue/{issue_key}/transitions"), TIMEOUT_DEFAULT)
        .await?;
    Ok(response.transitions)
}

/// Finds a transition by display name: case-insensitive exact match,
/// first match in list order wins.
pub fn match_transition<'a>(transitions: &'a [Transition], name: &str) -> Option<&'a Transition> {
    let wanted = name.to_lowercase();
    transitions.iter().find(|t| t.name.to_lowercase() == wanted)
}

/// Executes a transition by id.
///
/// Fails with the provider's rejection (invalid id, permissions, required
/// fields) and is never retried here: the legal set may have changed since
/// it was listed, so callers must re-fetch and re-match if they retry.
pub async fn execute_transition(
    client: &JiraClient,
    issue_key: &str,
    transition_id: &str,
) -> Result<(), ApiError> {
    client
        .post_no_content(
            &format!("/issue/{issue_key}/transitions"),
            &json!({"transition": {"id": transition_id}}),
            TIMEOUT_DEFAULT,
        )
        .await
}

/// Moves an issue to the named status: list, match by name, execute.
///
/// When no transition matches, the available names are surfaced in the
/// error; there is no fuzzy matching.
pub async fn transition_issue(
    client: &JiraClient,
    issue_key: &str,
    status_name: &str,
) -> Result<Transition, ApiError> {
    let transitions = list_transitions(client, issue_key).await?;

    let Some(transition) = match_transition(&transitions, status_name) else {
        let available = if transitions.is_empty() {
            "(none)".to_string()
        } else {
            transitions
                .iter()
                .map(|t| t.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        return Err(ApiError::NotFound(format!(
            "No transition named '{status_name}' for {issue_key}. Available: {available}"
        )));
    };

    let transition = transition.clone();
    execute_transition(client, issue_key, &transition.id).await?;
    Ok(transition)
}

/// Assigns an issue to a resolved user.
///
/// Sends the account id when known, otherwise the username. The endpoint
/// answers 204 on success.
pub async fn assign_issue(
    client: &JiraClient,
    issue_key: &str,
    assignee: &ResolvedAssignee,
) -> Result<(), ApiError> {
    let body = match (&assignee.account_id, &assignee.username) {
        (Some(account_id), _) => json!({"accountId": account_id}),
        (None, Some(username)) => json!({"name": username}),
        (None, None) => {
            return Err(ApiError::Usage(
                "Assignee resolved to neither an account id nor a username.".to_string(),
            ))
        }
    };

    client
        .put_no_content(&format!("/issue/{issue_key}/assignee"), &body, TIMEOUT_DEFAULT)
        .await
}

/// Removes the assignee from an issue.
///
/// Both identifier fields are sent as null so the request reads the same
/// on Cloud (`accountId`) and Server/DC (`name`) deployments. Unassigning
/// an already-unassigned issue still answers 204.
pub async fn unassign_issue(client: &JiraClient, issue_key: &str) -> Result<(), ApiError> {
    client
        .put_no_content(
            &format!("/issue/{issue_key}/assignee"),
            &json!({"accountId": null, "name": null}),
            TIMEOUT_DEFAULT,
        )
        .await
}

/// Uploads local files as attachments on an issue.
///
/// Every path is checked before any network call; a missing file fails the
/// whole batch with zero requests made. All files then travel in a single
/// multipart request, so the upload is atomic from the provider's side:
/// either every file attaches or the call fails. File contents stream from
/// disk during the request rather than being buffered up front, so large
/// attachments do not balloon memory.
///
/// Returns attachment metadata in the provider's order, never re-sorted.
pub async fn attach_files(
    client: &JiraClient,
    issue_key: &str,
    paths: &[impl AsRef<Path>],
) -> Result<Vec<Attachment>, ApiError> {
    if paths.is_empty() {
        return Err(ApiError::Usage("No files given to attach.".to_string()));
    }

    for path in paths {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ApiError::Usage(format!(
                "File not found: {}",
                path.display()
            )));
        }
    }

    let mut form = reqwest::multipart::Form::new();
    for path in paths {
        let path = path.as_ref();
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|e| ApiError::Usage(format!("Could not open {}: {e}", path.display())))?;
        let length = file
            .metadata()
            .await
            .map_err(|e| ApiError::Usage(format!("Could not read {}: {e}", path.display())))?
            .len();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("attachment")
            .to_string();
        form = form.part(
            "file",
            reqwest::multipart::Part::stream_with_length(file, length).file_name(filename),
        );
    }

    client
        .post_multipart(
            &format!("/issue/{issue_key}/attachments"),
            form,
            TIMEOUT_UPLOAD,
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn search_page(start: usize, count: usize, total: u64) -> String {
        let issues: Vec<String> = (0..count)
            .map(|i| {
                format!(
                    r#"{{"key":"APP-{}","fields":{{"summary":"issue {}"}}}}"#,
                    start + i + 1,
                    start + i + 1
                )
            })
            .collect();
        format!(r#"{{"startAt":{start},"total":{total},"issues":[{}]}}"#, issues.join(","))
    }

    #[test]
    fn jql_includes_every_requested_clause() {
        let mut query = JqlQuery::new("APP");
        query.assignee = AssigneeFilter::Mine;
        let jql = query.build();

        assert!(jql.contains(r#"project = "APP""#));
        assert!(jql.contains("statusCategory != Done"));
        assert!(jql.contains("assignee = currentUser()"));
        assert!(jql.ends_with("ORDER BY updated DESC"));
    }

    #[test]
    fn jql_omits_clauses_not_requested() {
        let mut query = JqlQuery::new("APP");
        query.only_open = false;
        let jql = query.build();

        assert!(!jql.contains("statusCategory"));
        assert!(!jql.contains("assignee"));
        assert_eq!(jql, r#"project = "APP" ORDER BY updated DESC"#);
    }

    #[test]
    fn jql_quotes_assignee_and_parenthesizes_extra() {
        let mut query = JqlQuery::new("APP");
        query.assignee = AssigneeFilter::User("jane doe".into());
        query.extra = Some("labels = infra OR labels = ops".into());
        let jql = query.build();

        assert!(jql.contains(r#"assignee = "jane doe""#));
        assert!(jql.contains("(labels = infra OR labels = ops)"));
    }

    #[tokio::test]
    async fn search_pagination_stops_after_short_page() {
        let mut server = mockito::Server::new_async().await;
        let page1 = server
            .mock("POST", "/rest/api/2/search")
            .match_body(Matcher::PartialJson(serde_json::json!({"startAt": 0, "maxResults": 50})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(search_page(0, 50, 107))
            .create_async()
            .await;
        let page2 = server
            .mock("POST", "/rest/api/2/search")
            .match_body(Matcher::PartialJson(serde_json::json!({"startAt": 50})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(search_page(50, 50, 107))
            .create_async()
            .await;
        let page3 = server
            .mock("POST", "/rest/api/2/search")
            .match_body(Matcher::PartialJson(serde_json::json!({"startAt": 100})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(search_page(100, 7, 107))
            .create_async()
            .await;

        let client = JiraClient::new(&server.url(), "token").unwrap();
        let result = search_issues(&client, &JqlQuery::new("APP"), 200)
            .await
            .unwrap();

        assert_eq!(result.issues.len(), 107);
        assert_eq!(result.total, 107);
        assert_eq!(result.issues[0].key, "APP-1");
        assert_eq!(result.issues[106].key, "APP-107");
        page1.assert_async().await;
        page2.assert_async().await;
        page3.assert_async().await;
    }

    #[tokio::test]
    async fn search_caps_results_at_limit_with_one_call() {
        let mut server = mockito::Server::new_async().await;
        let only = server
            .mock("POST", "/rest/api/2/search")
            .match_body(Matcher::PartialJson(serde_json::json!({"startAt": 0, "maxResults": 10})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(search_page(0, 10, 500))
            .expect(1)
            .create_async()
            .await;

        let client = JiraClient::new(&server.url(), "token").unwrap();
        let result = search_issues(&client, &JqlQuery::new("APP"), 10)
            .await
            .unwrap();

        assert_eq!(result.issues.len(), 10);
        // Server grand total is reported, not the returned count.
        assert_eq!(result.total, 500);
        only.assert_async().await;
    }

    #[tokio::test]
    async fn search_stops_on_empty_page() {
        let mut server = mockito::Server::new_async().await;
        let _empty = server
            .mock("POST", "/rest/api/2/search")
            .match_body(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(search_page(0, 0, 9999))
            .expect(1)
            .create_async()
            .await;

        let client = JiraClient::new(&server.url(), "token").unwrap();
        let result = search_issues(&client, &JqlQuery::new("APP"), 100)
            .await
            .unwrap();

        assert!(result.issues.is_empty());
    }

    #[test]
    fn transition_match_is_case_insensitive_first_wins() {
        let transitions = vec![
            Transition { id: "11".into(), name: "In Progress".into() },
            Transition { id: "21".into(), name: "Done".into() },
            Transition { id: "31".into(), name: "done".into() },
        ];

        assert_eq!(match_transition(&transitions, "in progress").unwrap().id, "11");
        // Duplicate display names keep list order.
        assert_eq!(match_transition(&transitions, "DONE").unwrap().id, "21");
        assert!(match_transition(&transitions, "Blocked").is_none());
    }

    #[tokio::test]
    async fn transition_by_name_lists_available_on_miss() {
        let mut server = mockito::Server::new_async().await;
        let _list = server
            .mock("GET", "/rest/api/2/issue/APP-1/transitions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"transitions":[{"id":"11","name":"In Progress"},{"id":"21","name":"Done"}]}"#)
            .create_async()
            .await;
        let execute = server
            .mock("POST", "/rest/api/2/issue/APP-1/transitions")
            .expect(0)
            .create_async()
            .await;

        let client = JiraClient::new(&server.url(), "token").unwrap();
        let err = transition_issue(&client, "APP-1", "Blocked").await.unwrap_err();

        match err {
            ApiError::NotFound(message) => {
                assert!(message.contains("In Progress"));
                assert!(message.contains("Done"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        execute.assert_async().await;
    }

    #[tokio::test]
    async fn transition_by_name_executes_matched_id() {
        let mut server = mockito::Server::new_async().await;
        let _list = server
            .mock("GET", "/rest/api/2/issue/APP-1/transitions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"transitions":[{"id":"11","name":"In Progress"}]}"#)
            .create_async()
            .await;
        let execute = server
            .mock("POST", "/rest/api/2/issue/APP-1/transitions")
            .match_body(Matcher::PartialJson(serde_json::json!({"transition": {"id": "11"}})))
            .with_status(204)
            .create_async()
            .await;

        let client = JiraClient::new(&server.url(), "token").unwrap();
        let transition = transition_issue(&client, "APP-1", "in progress").await.unwrap();

        assert_eq!(transition.id, "11");
        execute.assert_async().await;
    }

    #[tokio::test]
    async fn empty_transition_set_is_valid() {
        let mut server = mockito::Server::new_async().await;
        let _list = server
            .mock("GET", "/rest/api/2/issue/APP-2/transitions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"transitions":[]}"#)
            .create_async()
            .await;

        let client = JiraClient::new(&server.url(), "token").unwrap();
        let transitions = list_transitions(&client, "APP-2").await.unwrap();
        assert!(transitions.is_empty());
    }

    #[tokio::test]
    async fn unassign_is_idempotent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/rest/api/2/issue/APP-1/assignee")
            .match_body(Matcher::PartialJson(serde_json::json!({"accountId": null, "name": null})))
            .with_status(204)
            .expect(2)
            .create_async()
            .await;

        let client = JiraClient::new(&server.url(), "token").unwrap();
        unassign_issue(&client, "APP-1").await.unwrap();
        // Already unassigned: the provider still answers 204.
        unassign_issue(&client, "APP-1").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_attachment_file_fails_before_any_request() {
        let mut server = mockito::Server::new_async().await;
        let upload = server
            .mock("POST", "/rest/api/2/issue/APP-1/attachments")
            .expect(0)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("notes.txt");
        std::fs::write(&present, b"hello").unwrap();
        let missing = dir.path().join("does-not-exist.log");

        let client = JiraClient::new(&server.url(), "token").unwrap();
        let err = attach_files(&client, "APP-1", &[present, missing.clone()])
            .await
            .unwrap_err();

        match err {
            ApiError::Usage(message) => assert!(message.contains("does-not-exist.log")),
            other => panic!("expected Usage, got {other:?}"),
        }
        upload.assert_async().await;
    }

    #[tokio::test]
    async fn attachments_upload_in_one_request_and_keep_server_order() {
        let mut server = mockito::Server::new_async().await;
        let upload = server
            .mock("POST", "/rest/api/2/issue/APP-1/attachments")
            .match_header("x-atlassian-token", "no-check")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"id":"1001","filename":"a.txt","size":5},{"id":"1002","filename":"b.txt","size":3}]"#,
            )
            .expect(1)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, b"aaaaa").unwrap();
        std::fs::write(&b, b"bbb").unwrap();

        let client = JiraClient::new(&server.url(), "token").unwrap();
        let attachments = attach_files(&client, "APP-1", &[a, b]).await.unwrap();

        assert_eq!(attachments.len(), 2);
        assert_eq!(attachments[0].filename, "a.txt");
        assert_eq!(attachments[1].filename, "b.txt");
        upload.assert_async().await;
    }

    #[tokio::test]
    async fn attachment_bytes_and_filename_arrive_intact() {
        let mut server = mockito::Server::new_async().await;
        let upload = server
            .mock("POST", "/rest/api/2/issue/APP-1/attachments")
            .match_header("x-atlassian-token", "no-check")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex("streamed file payload".to_string()),
                Matcher::Regex(r#"filename="report\.log""#.to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":"7","filename":"report.log","size":21}]"#)
            .expect(1)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("report.log");
        std::fs::write(&report, b"streamed file payload").unwrap();

        let client = JiraClient::new(&server.url(), "token").unwrap();
        let attachments = attach_files(&client, "APP-1", &[report]).await.unwrap();

        assert_eq!(attachments[0].filename, "report.log");
        upload.assert_async().await;
    }

    #[tokio::test]
    async fn create_issue_sends_only_provided_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/api/2/issue")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "fields": {
                    "project": {"key": "APP"},
                    "summary": "Fix the flux capacitor",
                    "issuetype": {"name": "Bug"},
                    "priority": {"name": "High"},
                }
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"10001","key":"APP-42","self":"https://jira.example.com/rest/api/2/issue/10001"}"#)
            .create_async()
            .await;

        let client = JiraClient::new(&server.url(), "token").unwrap();
        let params = CreateIssueParams {
            project: "APP".into(),
            summary: "Fix the flux capacitor".into(),
            issue_type: "Bug".into(),
            description: None,
            labels: Vec::new(),
            priority: Some("High".into()),
        };
        let created = create_issue(&client, &params).await.unwrap();

        assert_eq!(created.key, "APP-42");
        mock.assert_async().await;
    }
}
