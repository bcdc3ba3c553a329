//
//  jira-cli
//  api/mod.rs
//

//! # Jira REST API Layer
//!
//! Everything that talks to the server lives here. The [`client`] module
//! owns the HTTP mechanics; the sibling modules implement the operations
//! on top of it and stay free of terminal concerns.

pub mod browse;
pub mod client;
pub mod document;
pub mod error;
pub mod issues;
pub mod users;

pub use client::JiraClient;
pub use error::ApiError;
