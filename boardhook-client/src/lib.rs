//! Boardhook HTTP Clients
//!
//! Outbound REST clients for the two services the relay talks to: the kanban
//! board service (fetch columns, move cards) and the issue tracker (assign
//! users), plus the per-repository column-id cache.
//!
//! Non-2xx upstream responses are deliberately NOT errors here: the relay
//! passes them back to the webhook sender verbatim, so both clients capture
//! them as [`UpstreamResponse`] values. Only transport-level failures
//! (connection refused, timeout, malformed board JSON) become
//! [`ClientError`].
//!
//! # Example
//!
//! ```no_run
//! use boardhook_client::BoardClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = BoardClient::new("https://api.zenhub.io", "token");
//!     let board = client.fetch_board(12345).await?;
//!     for column in board.pipelines {
//!         println!("{} -> {}", column.name, column.id);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;

mod board;
mod cache;
mod tracker;

pub use board::{Board, BoardClient, BoardColumn};
pub use cache::ColumnCache;
pub use error::{ClientError, Result};
pub use tracker::TrackerClient;

/// Verbatim capture of an outbound call's response.
///
/// Held so the inbound handler can forward status, headers and body to the
/// original webhook sender without interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    /// True only for an exact 200; the new-branch assignment step keys on
    /// this, not on the whole 2xx class.
    pub fn is_exactly_ok(&self) -> bool {
        self.status == 200
    }

    /// Captures a reqwest response, including its body, for pass-through.
    ///
    /// Length-framing and hop-by-hop headers are dropped: the inbound server
    /// re-frames the body when it replies.
    pub(crate) async fn capture(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter(|(name, _)| !is_framing_header(name.as_str()))
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(Self {
            status,
            headers,
            body,
        })
    }
}

fn is_framing_header(name: &str) -> bool {
    matches!(
        name,
        "content-length" | "transfer-encoding" | "connection" | "keep-alive"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_exactly_ok() {
        let mut response = UpstreamResponse {
            status: 200,
            headers: Vec::new(),
            body: Vec::new(),
        };
        assert!(response.is_exactly_ok());

        // 2xx but not 200 does not count
        response.status = 201;
        assert!(!response.is_exactly_ok());

        response.status = 404;
        assert!(!response.is_exactly_ok());
    }

    #[test]
    fn test_framing_headers_are_recognised() {
        assert!(is_framing_header("content-length"));
        assert!(is_framing_header("transfer-encoding"));
        assert!(!is_framing_header("content-type"));
        assert!(!is_framing_header("x-ratelimit-remaining"));
    }
}
