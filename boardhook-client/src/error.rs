//! Error types for the boardhook clients

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when calling the board or tracker services.
///
/// Upstream non-2xx statuses are not represented here; those come back as
/// ordinary [`crate::UpstreamResponse`] values for pass-through. This enum
/// covers the cases where no upstream response exists to pass through.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed at the transport level (connect, timeout, TLS)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Board API answered but the body was not the expected shape
    #[error("failed to parse board response: {0}")]
    ParseError(String),

    /// Board API returned an error status where a board document was required
    #[error("board API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Repository full name was not "owner/repo"
    #[error("invalid repository full name: {0:?}")]
    InvalidRepoName(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }
}
