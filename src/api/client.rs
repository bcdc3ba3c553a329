//
//  jira-cli
//  api/client.rs
//

//! # HTTP Client Wrapper for the Jira REST API
//!
//! This module provides the core HTTP client used by every issue operation.
//! It owns the cross-cutting request concerns:
//!
//! - Bearer-token authentication on every request
//! - `Accept: application/json` on every request
//! - Fixed per-category timeouts (validation, lookup, default, upload)
//! - Normalizing non-2xx responses into [`ApiError::Remote`]
//! - Multipart uploads with the provider's CSRF bypass header
//!
//! Network-level failures (DNS, TLS, connection refused, timeout) become
//! [`ApiError::Transport`]; they are never swallowed.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::api::error::ApiError;

/// Timeout for cheap existence checks (issue fetch before opening a URL).
pub const TIMEOUT_VALIDATE: Duration = Duration::from_secs(15);

/// Timeout for identity and user lookups (`/myself`, `/user/search`).
pub const TIMEOUT_LOOKUP: Duration = Duration::from_secs(20);

/// Timeout for create, comment, search, fetch, and transition calls.
pub const TIMEOUT_DEFAULT: Duration = Duration::from_secs(30);

/// Timeout for multi-file attachment uploads.
pub const TIMEOUT_UPLOAD: Duration = Duration::from_secs(60);

/// CSRF bypass header required by Jira for multipart attachment uploads.
const ATLASSIAN_TOKEN_HEADER: &str = "X-Atlassian-Token";

/// Extracts a user-friendly message from a Jira error response body.
///
/// Jira reports errors in a couple of shapes:
///
/// ```json
/// {"errorMessages": ["Issue does not exist"], "errors": {}}
/// {"errorMessages": [], "errors": {"summary": "Summary is required"}}
/// {"message": "Human readable message"}
/// ```
///
/// This function tries each shape in turn and falls back to the raw body
/// when nothing parses.
pub fn extract_error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        // {"errorMessages": ["..."]}
        if let Some(messages) = json.get("errorMessages").and_then(|m| m.as_array()) {
            let joined: Vec<&str> = messages.iter().filter_map(|m| m.as_str()).collect();
            if !joined.is_empty() {
                return joined.join("; ");
            }
        }

        // {"errors": {"field": "message", ...}}
        if let Some(errors) = json.get("errors").and_then(|e| e.as_object()) {
            let joined: Vec<String> = errors
                .iter()
                .filter_map(|(field, msg)| msg.as_str().map(|m| format!("{field}: {m}")))
                .collect();
            if !joined.is_empty() {
                return joined.join("; ");
            }
        }

        // {"message": "..."}
        if let Some(message) = json.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }

    body.to_string()
}

/// The HTTP client for a single Jira deployment.
///
/// A `JiraClient` is constructed per invocation from the resolved base URL
/// and bearer token. All paths passed to its methods are relative to
/// `<base_url>/rest/api/2`.
///
/// # Example
///
/// ```rust,no_run
/// use jira_cli::api::client::{JiraClient, TIMEOUT_DEFAULT};
///
/// # async fn example() -> Result<(), jira_cli::api::ApiError> {
/// let client = JiraClient::new("https://jira.example.com", "my-token")?;
/// let issue: serde_json::Value = client.get("/issue/APP-1", TIMEOUT_DEFAULT).await?;
/// # Ok(())
/// # }
/// ```
pub struct JiraClient {
    /// The underlying HTTP client.
    http: Client,
    /// Normalized base URL (no trailing slash).
    base_url: String,
    /// The bearer token sent with every request.
    token: String,
}

impl JiraClient {
    /// Creates a client for the given deployment.
    ///
    /// The base URL is normalized by trimming trailing slashes so that path
    /// concatenation is unambiguous.
    pub fn new(base_url: &str, token: &str) -> Result<Self, ApiError> {
        Ok(Self {
            http: Client::builder()
                .user_agent(format!("jira/{}", crate::VERSION))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Returns the normalized base URL of the deployment.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the absolute URL for an API path.
    fn url(&self, path: &str) -> String {
        format!("{}/rest/api/2{}", self.base_url, path)
    }

    /// Checks the response status and deserializes the body.
    ///
    /// Success is a 2xx with a JSON body (200 for search and fetch, 201 for
    /// create and comment). Anything else is read as text and mapped to
    /// [`ApiError::Remote`] with the extracted message.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Remote {
                status,
                body: extract_error_message(&text),
            });
        }

        Ok(response.json().await?)
    }

    /// Checks the response status, discarding any body.
    ///
    /// Used for endpoints that answer 204 No Content on success (assignment,
    /// transition execution). Any 2xx counts as success.
    async fn check_no_content(response: reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::Remote {
                status,
                body: extract_error_message(&text),
            });
        }

        Ok(())
    }

    /// Makes a GET request to the specified path.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        timeout: Duration,
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(timeout)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Makes a GET request with URL-encoded query parameters.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .get(self.url(path))
            .query(query)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(timeout)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Makes a POST request with a JSON body, expecting a JSON response.
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(timeout)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Makes a POST request with a JSON body, expecting no response body.
    pub async fn post_no_content<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(timeout)
            .send()
            .await?;

        Self::check_no_content(response).await
    }

    /// Makes a PUT request with a JSON body, expecting no response body.
    ///
    /// The assignment endpoint answers 204 on success, including when the
    /// request is a no-op (unassigning an already-unassigned issue).
    pub async fn put_no_content<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<(), ApiError> {
        let response = self
            .http
            .put(self.url(path))
            .json(body)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(timeout)
            .send()
            .await?;

        Self::check_no_content(response).await
    }

    /// Makes a multipart POST request (attachment upload).
    ///
    /// Adds the `X-Atlassian-Token: no-check` bypass header the provider
    /// requires. `Content-Type` is left to reqwest, which computes the
    /// multipart boundary from the form; setting it manually would break
    /// the upload.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        timeout: Duration,
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .post(self.url(path))
            .multipart(form)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(ATLASSIAN_TOKEN_HEADER, "no-check")
            .timeout(timeout)
            .send()
            .await?;

        Self::parse_response(response).await
    }
}
