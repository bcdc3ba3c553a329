//
//  jira-cli
//  api/users.rs
//

//! # User Lookup and Assignment Resolution
//!
//! Jira deployments have grown two query conventions for the user search
//! endpoint: newer deployments take `query=`, older Server/DC installs take
//! `username=`. [`find_user`] tries the first convention and falls back to
//! the second exactly once, and only when the rejection actually references
//! the parameter name; any other failure surfaces immediately.
//!
//! [`resolve_assignee`] implements the caller-side policy for turning a
//! selector (self, account id, username, or email) into a concrete identity,
//! including the exact-email disambiguation rules.

use serde::{Deserialize, Serialize};

use crate::api::client::{JiraClient, TIMEOUT_LOOKUP};
use crate::api::error::ApiError;

/// A user record as returned by the user search and identity endpoints.
///
/// Cloud deployments populate `account_id`; Server/DC populates `name`
/// (the username). Either may be missing depending on deployment and
/// privacy settings, so every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraUser {
    /// Account id (Cloud and newer DC).
    #[serde(default, rename = "accountId")]
    pub account_id: Option<String>,

    /// Username (Server/DC).
    #[serde(default)]
    pub name: Option<String>,

    /// Human-readable display name.
    #[serde(default, rename = "displayName")]
    pub display_name: Option<String>,

    /// Email address, if visible to the caller.
    #[serde(default, rename = "emailAddress")]
    pub email_address: Option<String>,
}

impl JiraUser {
    /// Returns the best available label for messages: display name, then
    /// username, then account id.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.name.as_deref())
            .or(self.account_id.as_deref())
            .unwrap_or("(unknown)")
    }
}

/// Fetches the identity of the authenticated user via `/myself`.
pub async fn myself(client: &JiraClient) -> Result<JiraUser, ApiError> {
    client.get("/myself", TIMEOUT_LOOKUP).await
}

/// Searches users by email, display name, or username.
///
/// Tries the `query=` convention first. If that attempt fails with a client
/// error whose body references the parameter name, retries once with the
/// legacy `username=` convention. Results are returned in server order,
/// never re-sorted.
pub async fn find_user(client: &JiraClient, query: &str) -> Result<Vec<JiraUser>, ApiError> {
    match search_with(client, "query", query).await {
        Ok(users) => Ok(users),
        Err(ApiError::Remote { status, body })
            if status.is_client_error() && references_parameter(&body, "query") =>
        {
            search_with(client, "username", query).await
        }
        Err(e) => Err(e),
    }
}

/// Performs one user search attempt with the given query parameter name.
async fn search_with(
    client: &JiraClient,
    param: &str,
    query: &str,
) -> Result<Vec<JiraUser>, ApiError> {
    client
        .get_with_query(
            "/user/search",
            &[(param, query), ("maxResults", "50")],
            TIMEOUT_LOOKUP,
        )
        .await
}

/// Returns true when an error body mentions the attempted parameter name.
fn references_parameter(body: &str, param: &str) -> bool {
    body.to_lowercase().contains(param)
}

/// A single, already-validated assignment selector.
///
/// The CLI accepts several mutually exclusive ways to name an assignee;
/// they are resolved into one of these variants at the boundary so the
/// resolution logic never sees more than one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssigneeSelector {
    /// The authenticated user, resolved via `/myself`.
    Myself,
    /// An explicit account id (Cloud/DC); used directly, no lookup.
    AccountId(String),
    /// An explicit username (Server/DC); used directly, no lookup.
    Username(String),
    /// An email address, resolved through user search.
    Email(String),
}

impl AssigneeSelector {
    /// Builds a selector from the CLI flags.
    ///
    /// Exactly one selector must be supplied; zero or more than one is a
    /// usage error raised before any network call.
    pub fn from_flags(
        myself: bool,
        account_id: Option<String>,
        username: Option<String>,
        email: Option<String>,
    ) -> Result<Self, ApiError> {
        let mut selectors = Vec::new();
        if myself {
            selectors.push(Self::Myself);
        }
        if let Some(id) = account_id {
            selectors.push(Self::AccountId(id));
        }
        if let Some(user) = username {
            selectors.push(Self::Username(user));
        }
        if let Some(email) = email {
            selectors.push(Self::Email(email));
        }

        match selectors.len() {
            0 => Err(ApiError::Usage(
                "Provide one of: --self, --account-id, --user, or --email.".to_string(),
            )),
            1 => Ok(selectors.remove(0)),
            _ => Err(ApiError::Usage(
                "Use only one of --self / --account-id / --user / --email.".to_string(),
            )),
        }
    }
}

/// The concrete identity an assignment request will carry.
///
/// `account_id` is preferred when present; `username` covers Server/DC
/// deployments that predate account ids.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedAssignee {
    /// Account id, if known.
    pub account_id: Option<String>,
    /// Username, if known.
    pub username: Option<String>,
    /// Display name for confirmation messages.
    pub display_name: Option<String>,
}

impl ResolvedAssignee {
    fn from_user(user: &JiraUser) -> Self {
        Self {
            account_id: user.account_id.clone(),
            username: user.name.clone(),
            display_name: user.display_name.clone(),
        }
    }

    /// Returns the identifier to show in confirmation messages.
    pub fn label(&self) -> &str {
        self.account_id
            .as_deref()
            .or(self.username.as_deref())
            .or(self.display_name.as_deref())
            .unwrap_or("(unknown)")
    }
}

/// Resolves a selector into a concrete assignee identity.
///
/// Policy, in order:
///
/// 1. Explicit account id or username is used directly, no lookup.
/// 2. `Myself` is resolved via the identity endpoint, bypassing search.
/// 3. An email goes through [`find_user`]:
///    - zero candidates fails with [`ApiError::NotFound`];
///    - exactly one case-insensitive exact-email match is used;
///    - multiple exact matches use the first only when `pick_first` is set,
///      otherwise the operation fails with the full candidate set;
///    - with no exact match, a lone candidate (or `pick_first`) selects the
///      first in server order, anything else fails with the candidate set.
pub async fn resolve_assignee(
    client: &JiraClient,
    selector: &AssigneeSelector,
    pick_first: bool,
) -> Result<ResolvedAssignee, ApiError> {
    match selector {
        AssigneeSelector::AccountId(id) => Ok(ResolvedAssignee {
            account_id: Some(id.clone()),
            username: None,
            display_name: None,
        }),
        AssigneeSelector::Username(user) => Ok(ResolvedAssignee {
            account_id: None,
            username: Some(user.clone()),
            display_name: None,
        }),
        AssigneeSelector::Myself => {
            let me = myself(client).await?;
            Ok(ResolvedAssignee::from_user(&me))
        }
        AssigneeSelector::Email(email) => {
            let candidates = find_user(client, email).await?;
            if candidates.is_empty() {
                return Err(ApiError::NotFound(format!("No users found for '{email}'")));
            }

            let exact: Vec<&JiraUser> = candidates
                .iter()
                .filter(|u| {
                    u.email_address
                        .as_deref()
                        .is_some_and(|e| e.eq_ignore_ascii_case(email))
                })
                .collect();

            match exact.len() {
                1 => Ok(ResolvedAssignee::from_user(exact[0])),
                n if n > 1 => {
                    if pick_first {
                        Ok(ResolvedAssignee::from_user(exact[0]))
                    } else {
                        Err(ApiError::Ambiguous {
                            query: email.clone(),
                            candidates: exact.into_iter().cloned().collect(),
                        })
                    }
                }
                _ => {
                    if candidates.len() == 1 || pick_first {
                        Ok(ResolvedAssignee::from_user(&candidates[0]))
                    } else {
                        Err(ApiError::Ambiguous {
                            query: email.clone(),
                            candidates,
                        })
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(account_id: &str, name: &str, email: &str) -> String {
        format!(
            r#"{{"accountId":"{account_id}","name":"{name}","displayName":"{name}","emailAddress":"{email}"}}"#
        )
    }

    #[tokio::test]
    async fn find_user_prefers_query_convention() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/api/2/user/search")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("query".into(), "ann@example.com".into()),
                mockito::Matcher::UrlEncoded("maxResults".into(), "50".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!("[{}]", user("a1", "ann", "ann@example.com")))
            .create_async()
            .await;

        let client = JiraClient::new(&server.url(), "token").unwrap();
        let users = find_user(&client, "ann@example.com").await.unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].account_id.as_deref(), Some("a1"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn find_user_falls_back_to_username_convention() {
        let mut server = mockito::Server::new_async().await;
        let rejected = server
            .mock("GET", "/rest/api/2/user/search")
            .match_query(mockito::Matcher::UrlEncoded(
                "query".into(),
                "bob".into(),
            ))
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errorMessages":["The 'query' parameter is not supported."],"errors":{}}"#)
            .create_async()
            .await;
        let legacy = server
            .mock("GET", "/rest/api/2/user/search")
            .match_query(mockito::Matcher::UrlEncoded(
                "username".into(),
                "bob".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!("[{}]", user("b2", "bob", "bob@example.com")))
            .create_async()
            .await;

        let client = JiraClient::new(&server.url(), "token").unwrap();
        let users = find_user(&client, "bob").await.unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name.as_deref(), Some("bob"));
        rejected.assert_async().await;
        legacy.assert_async().await;
    }

    #[tokio::test]
    async fn find_user_surfaces_unrelated_errors_without_fallback() {
        let mut server = mockito::Server::new_async().await;
        let denied = server
            .mock("GET", "/rest/api/2/user/search")
            .match_query(mockito::Matcher::Any)
            .with_status(403)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errorMessages":["Forbidden"],"errors":{}}"#)
            .expect(1)
            .create_async()
            .await;

        let client = JiraClient::new(&server.url(), "token").unwrap();
        let result = find_user(&client, "carol").await;

        match result {
            Err(ApiError::Remote { status, .. }) => assert_eq!(status.as_u16(), 403),
            other => panic!("expected Remote error, got {other:?}"),
        }
        denied.assert_async().await;
    }

    #[test]
    fn selector_requires_exactly_one_flag() {
        let err = AssigneeSelector::from_flags(false, None, None, None).unwrap_err();
        assert!(matches!(err, ApiError::Usage(_)));

        let err = AssigneeSelector::from_flags(
            false,
            Some("a1".into()),
            None,
            Some("x@example.com".into()),
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Usage(_)));

        let selector =
            AssigneeSelector::from_flags(false, None, Some("bob".into()), None).unwrap();
        assert_eq!(selector, AssigneeSelector::Username("bob".into()));
    }

    #[tokio::test]
    async fn explicit_account_id_skips_lookup() {
        let mut server = mockito::Server::new_async().await;
        let none = server
            .mock("GET", "/rest/api/2/user/search")
            .match_query(mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = JiraClient::new(&server.url(), "token").unwrap();
        let resolved = resolve_assignee(
            &client,
            &AssigneeSelector::AccountId("a1".into()),
            false,
        )
        .await
        .unwrap();

        assert_eq!(resolved.account_id.as_deref(), Some("a1"));
        none.assert_async().await;
    }

    #[tokio::test]
    async fn duplicate_exact_email_matches_are_ambiguous_without_first() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rest/api/2/user/search")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(
                "[{},{}]",
                user("a1", "dana", "dana@example.com"),
                user("a2", "dana.b", "Dana@example.com")
            ))
            .create_async()
            .await;

        let client = JiraClient::new(&server.url(), "token").unwrap();
        let selector = AssigneeSelector::Email("dana@example.com".into());

        let err = resolve_assignee(&client, &selector, false).await.unwrap_err();
        match err {
            ApiError::Ambiguous { candidates, .. } => assert_eq!(candidates.len(), 2),
            other => panic!("expected Ambiguous, got {other:?}"),
        }

        // With --first, the first exact match in server order wins.
        let resolved = resolve_assignee(&client, &selector, true).await.unwrap();
        assert_eq!(resolved.account_id.as_deref(), Some("a1"));
    }

    #[tokio::test]
    async fn lone_fuzzy_candidate_is_selected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rest/api/2/user/search")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!("[{}]", user("e5", "erin", "erin.w@example.com")))
            .create_async()
            .await;

        let client = JiraClient::new(&server.url(), "token").unwrap();
        let resolved = resolve_assignee(
            &client,
            &AssigneeSelector::Email("erin@example.com".into()),
            false,
        )
        .await
        .unwrap();

        assert_eq!(resolved.account_id.as_deref(), Some("e5"));
    }

    #[tokio::test]
    async fn zero_candidates_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rest/api/2/user/search")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let client = JiraClient::new(&server.url(), "token").unwrap();
        let err = resolve_assignee(
            &client,
            &AssigneeSelector::Email("ghost@example.com".into()),
            false,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
