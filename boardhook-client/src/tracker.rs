//! Issue tracker client
//!
//! Minimal GitHub REST client for the one write the relay performs: adding
//! an assignee to an issue after its branch was pushed.

use serde::Serialize;

use crate::UpstreamResponse;
use crate::error::{ClientError, Result};

/// Request body for the add-assignees endpoint
#[derive(Debug, Serialize)]
struct AddAssigneesRequest<'a> {
    assignees: [&'a str; 1],
}

/// HTTP client for the issue tracker (GitHub)
#[derive(Debug, Clone)]
pub struct TrackerClient {
    /// Base URL of the tracker API (e.g. "https://api.github.com")
    base_url: String,
    /// API token, sent as `Authorization: token <...>`
    token: String,
    /// HTTP client instance
    client: reqwest::Client,
}

impl TrackerClient {
    /// Create a new tracker client with a default HTTP client
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(base_url, token, reqwest::Client::new())
    }

    /// Create a new tracker client with a custom HTTP client
    pub fn with_client(
        base_url: impl Into<String>,
        token: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        }
    }

    /// Get the base URL of the tracker service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Add `login` as an assignee on an issue.
    ///
    /// `full_name` is the "owner/repo" form from the webhook payload. The
    /// response is captured verbatim for pass-through; like the card move,
    /// a non-2xx answer is a value, not an error.
    pub async fn add_assignee(
        &self,
        full_name: &str,
        issue_number: u64,
        login: &str,
    ) -> Result<UpstreamResponse> {
        let (owner, repo) = full_name
            .split_once('/')
            .ok_or_else(|| ClientError::InvalidRepoName(full_name.to_string()))?;

        let url = format!(
            "{}/repos/{}/{}/issues/{}/assignees",
            self.base_url, owner, repo, issue_number
        );
        tracing::debug!(full_name, issue_number, login, "Assigning issue");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("token {}", self.token))
            .json(&AddAssigneesRequest { assignees: [login] })
            .send()
            .await?;

        UpstreamResponse::capture(response).await
    }
}
