//! Board service client
//!
//! REST client for the kanban board API: fetch the board's column list and
//! move an issue's card between columns. Authentication is a per-request
//! `X-Authentication-Token` header.

use serde::{Deserialize, Serialize};

use crate::UpstreamResponse;
use crate::error::{ClientError, Result};

const API_VERSION: &str = "p1";
const AUTH_HEADER: &str = "X-Authentication-Token";

/// Board document returned by `GET /{ver}/repositories/{repo_id}/board`
///
/// Only the column list is modelled; the board payload also carries the
/// cards per column, which the relay never reads.
#[derive(Debug, Clone, Deserialize)]
pub struct Board {
    pub pipelines: Vec<BoardColumn>,
}

/// One column of the board: service-assigned id plus display name
#[derive(Debug, Clone, Deserialize)]
pub struct BoardColumn {
    pub id: String,
    pub name: String,
}

/// Request body for the card-move endpoint
#[derive(Debug, Serialize)]
struct MoveCardRequest<'a> {
    pipeline_id: &'a str,
    position: &'static str,
}

/// HTTP client for the board service
#[derive(Debug, Clone)]
pub struct BoardClient {
    /// Base URL of the board API (e.g. "https://api.zenhub.io")
    base_url: String,
    /// API token sent with every request
    token: String,
    /// HTTP client instance
    client: reqwest::Client,
}

impl BoardClient {
    /// Create a new board client with a default HTTP client
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(base_url, token, reqwest::Client::new())
    }

    /// Create a new board client with a custom HTTP client
    ///
    /// This is how the relay applies its bounded request timeout: it builds
    /// one `reqwest::Client` with a timeout and shares it across clients.
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

    /// Get the base URL of the board service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the board for a repository.
    ///
    /// Used to learn the column name -> column id mapping; the result is
    /// cached per repository by the relay. Unlike [`move_card`], a non-2xx
    /// answer here is an error: there is no board to read and nothing
    /// meaningful to pass through.
    ///
    /// [`move_card`]: BoardClient::move_card
    pub async fn fetch_board(&self, repo_id: u64) -> Result<Board> {
        let url = format!(
            "{}/{}/repositories/{}/board",
            self.base_url, API_VERSION, repo_id
        );
        tracing::debug!(repo_id, "Fetching board columns");

        let response = self
            .client
            .get(&url)
            .header(AUTH_HEADER, &self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse board JSON: {}", e)))
    }

    /// Move an issue's card to the top of a column.
    ///
    /// The response is captured verbatim for pass-through, whatever its
    /// status. An empty `pipeline_id` (unknown column name) is still sent;
    /// the board service rejects it and that rejection is the caller's
    /// answer.
    pub async fn move_card(
        &self,
        repo_id: u64,
        issue_number: u64,
        pipeline_id: &str,
    ) -> Result<UpstreamResponse> {
        let url = format!(
            "{}/{}/repositories/{}/issues/{}/moves",
            self.base_url, API_VERSION, repo_id, issue_number
        );
        tracing::debug!(repo_id, issue_number, pipeline_id, "Moving card");

        let response = self
            .client
            .post(&url)
            .header(AUTH_HEADER, &self.token)
            .json(&MoveCardRequest {
                pipeline_id,
                position: "top",
            })
            .send()
            .await?;

        UpstreamResponse::capture(response).await
    }
}
