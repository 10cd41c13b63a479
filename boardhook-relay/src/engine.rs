//! Delivery processing engine
//!
//! One entry point, [`Relay::handle_delivery`], carries a delivery from raw
//! bytes to the response the webhook sender receives:
//!
//! 1. signature check (reject 406)
//! 2. JSON parse (reject 415)
//! 3. payloads without a `repository` are benign pings (200)
//! 4. classify; a delivery outside the transition table is a benign 200
//! 5. transition without a configured column is a no-op 204
//! 6. move the card; pass the board's response through verbatim
//! 7. new-branch only: on an exact 200 move, assign the branch pusher and
//!    pass the assignment response through instead
//!
//! The only state shared across deliveries is the column-id cache;
//! re-delivering a payload re-executes its outbound calls.

use boardhook_client::{BoardClient, ClientError, ColumnCache, TrackerClient, UpstreamResponse};
use boardhook_core::{CardMove, ColumnMapping, Repository, WebhookPayload, classify};
use boardhook_core::signature::verify_signature;

use crate::config::RelayConfig;

/// Response synthesized for the webhook sender
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RelayResponse {
    /// A bare status with no headers or body
    pub fn status_only(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Verbatim pass-through of an upstream response
    fn passthrough(upstream: UpstreamResponse) -> Self {
        Self {
            status: upstream.status,
            headers: upstream.headers,
            body: upstream.body,
        }
    }

    /// 502 for outbound calls that produced no response to pass through
    fn bad_gateway(error: &ClientError) -> Self {
        Self {
            status: 502,
            headers: Vec::new(),
            body: error.to_string().into_bytes(),
        }
    }
}

/// The relay engine
///
/// Owns the transition table, the shared secret, both outbound clients and
/// the column cache. One instance serves the whole process; it is `Send +
/// Sync` and deliveries borrow it immutably.
pub struct Relay {
    transitions: ColumnMapping,
    webhook_secret: String,
    board: BoardClient,
    tracker: TrackerClient,
    columns: ColumnCache,
}

impl Relay {
    /// Build a relay from resolved configuration.
    ///
    /// Constructs one HTTP client with the configured request timeout and
    /// shares it across both outbound clients.
    pub fn new(config: RelayConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            board: BoardClient::with_client(
                &config.board_base_url,
                &config.board_token,
                http.clone(),
            ),
            tracker: TrackerClient::with_client(
                &config.tracker_base_url,
                &config.tracker_token,
                http,
            ),
            transitions: config.transitions,
            webhook_secret: config.webhook_secret,
            columns: ColumnCache::new(),
        })
    }

    /// Process one webhook delivery.
    ///
    /// `body` must be the exact bytes received — the signature was computed
    /// over them. `signature_header` is the raw header value if the sender
    /// supplied one; absence fails verification like any mismatch.
    pub async fn handle_delivery(
        &self,
        event_name: &str,
        signature_header: Option<&str>,
        body: &[u8],
    ) -> RelayResponse {
        if !verify_signature(
            body,
            signature_header.unwrap_or_default(),
            self.webhook_secret.as_bytes(),
        ) {
            tracing::warn!(event_name, "Rejecting delivery with invalid signature");
            return RelayResponse::status_only(406);
        }

        let payload: WebhookPayload = match serde_json::from_slice(body) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(event_name, error = %e, "Rejecting non-JSON delivery");
                return RelayResponse::status_only(415);
            }
        };

        // The initial ping delivery passes the signature check but carries
        // no repository; answer it politely.
        let Some(repository) = payload.repository.clone() else {
            tracing::debug!(event_name, "Delivery without repository, answering 200");
            return RelayResponse::status_only(200);
        };

        let Some(card_move) = classify(event_name, &payload) else {
            tracing::debug!(event_name, "No transition for this delivery");
            return RelayResponse::status_only(200);
        };

        let Some(column) = self.transitions.column_for(card_move.transition) else {
            tracing::debug!(
                transition = %card_move.transition,
                "Transition has no configured column"
            );
            return RelayResponse::status_only(204);
        };

        tracing::info!(
            repo = %repository.full_name,
            issue = card_move.issue_number,
            transition = %card_move.transition,
            column,
            "Executing transition"
        );
        self.execute(&repository, card_move, column).await
    }

    /// Run the outbound side of a classified delivery.
    async fn execute(
        &self,
        repository: &Repository,
        card_move: CardMove,
        column: &str,
    ) -> RelayResponse {
        let pipeline_id = match self.column_id(repository.id, column).await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(repo_id = repository.id, error = %e, "Board lookup failed");
                return RelayResponse::bad_gateway(&e);
            }
        };

        let moved = match self
            .board
            .move_card(repository.id, card_move.issue_number, &pipeline_id)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(repo_id = repository.id, error = %e, "Card move failed");
                return RelayResponse::bad_gateway(&e);
            }
        };

        // Assignment happens only when the move came back exactly 200; its
        // response then replaces the move response as the pass-through.
        if let Some(assignee) = card_move.assignee {
            if !moved.is_exactly_ok() {
                tracing::debug!(status = moved.status, "Skipping assignment after non-200 move");
                return RelayResponse::passthrough(moved);
            }
            return match self
                .tracker
                .add_assignee(&repository.full_name, card_move.issue_number, &assignee)
                .await
            {
                Ok(assigned) => RelayResponse::passthrough(assigned),
                Err(e) => {
                    tracing::warn!(repo = %repository.full_name, error = %e, "Assignment failed");
                    RelayResponse::bad_gateway(&e)
                }
            };
        }

        RelayResponse::passthrough(moved)
    }

    /// Resolve a column display name to its board-assigned id, fetching the
    /// board once per repository to fill the cache.
    async fn column_id(&self, repo_id: u64, name: &str) -> Result<String, ClientError> {
        if !self.columns.has_repo(repo_id) {
            let board = self.board.fetch_board(repo_id).await?;
            self.columns.store(
                repo_id,
                board.pipelines.into_iter().map(|c| (c.name, c.id)),
            );
        }
        Ok(self.columns.resolve(repo_id, name))
    }
}
