//
//  jira-cli
//  api/error.rs
//

//! # API Error Taxonomy
//!
//! Every failure an operation can hit maps onto one of the variants below.
//! The split matters for the CLI boundary: configuration problems tell the
//! user to re-authenticate, transport problems are surfaced verbatim, and
//! remote rejections carry the status plus whatever message the server gave.

use reqwest::StatusCode;
use thiserror::Error;

use crate::api::users::JiraUser;

/// Unified error type for all Jira API operations.
///
/// # Variants
///
/// | Variant | Meaning |
/// |---------|---------|
/// | `Configuration` | No base URL or token could be resolved |
/// | `Transport` | Network-level failure (DNS, TLS, refused, timeout) |
/// | `Remote` | Non-success HTTP response from the server |
/// | `NotFound` | A lookup expected to resolve an identity returned nothing |
/// | `Ambiguous` | Multiple equally valid candidates, no disambiguation flag |
/// | `Usage` | Bad local input, detected before any network call |
///
/// # Notes
///
/// - The `Transport` variant converts automatically from `reqwest::Error`.
/// - Errors are terminal to the current invocation; nothing here retries.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No base URL or token was resolvable from any source.
    ///
    /// Always user-recoverable; the message names the missing piece and the
    /// fix is `jira auth login`.
    #[error("{0}. Run: jira auth login")]
    Configuration(String),

    /// A network-level failure: DNS, TLS, connection refused, timeout.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    ///
    /// `body` is the message extracted from Jira's JSON error shape when the
    /// response parses, otherwise the raw response text.
    #[error("API error ({status}): {body}")]
    Remote {
        /// HTTP status code of the response.
        status: StatusCode,
        /// Parsed error message, or raw response text.
        body: String,
    },

    /// A lookup that was expected to resolve an identity found nothing.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Multiple equally valid candidates where exactly one was required.
    ///
    /// The full candidate set is retained so the caller can display it and
    /// let the user disambiguate manually.
    #[error("{} users matched '{query}'. Refine the query, pass --first, or use --account-id.", .candidates.len())]
    Ambiguous {
        /// The query that produced the ambiguity.
        query: String,
        /// Every candidate, in server-returned order.
        candidates: Vec<JiraUser>,
    },

    /// Mutually exclusive options supplied together, or a missing local file.
    ///
    /// Raised before any network call is made.
    #[error("{0}")]
    Usage(String),
}
