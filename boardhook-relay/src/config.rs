//! Relay configuration
//!
//! Loaded from a TOML file; each secret falls back to an environment
//! variable when the file leaves it out or empty. All three secrets are
//! required — a missing one aborts startup, which is the only process-fatal
//! failure in the system.
//!
//! ```toml
//! # boardhook.toml
//! board_token = ""        # falls back to BOARDHOOK_BOARD_TOKEN
//! tracker_token = ""      # falls back to BOARDHOOK_TRACKER_TOKEN
//! webhook_secret = ""     # falls back to BOARDHOOK_WEBHOOK_SECRET
//!
//! [transitions]
//! issue_reopened = "In Progress"
//! pr_merged = "Done"
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use boardhook_core::ColumnMapping;

/// Public board service endpoint, used when the file sets no override
pub const DEFAULT_BOARD_BASE_URL: &str = "https://api.zenhub.io";
/// Public tracker endpoint, used when the file sets no override
pub const DEFAULT_TRACKER_BASE_URL: &str = "https://api.github.com";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Resolved relay configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Token for the board service API
    pub board_token: String,
    /// Token for the tracker (GitHub) API
    pub tracker_token: String,
    /// Shared secret the webhook sender signs deliveries with
    pub webhook_secret: String,
    /// Configured transition -> column-name table
    pub transitions: ColumnMapping,
    /// Board service base URL
    pub board_base_url: String,
    /// Tracker base URL
    pub tracker_base_url: String,
    /// Bound on every outbound request
    pub request_timeout: Duration,
}

/// On-disk shape of the config file
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    board_token: Option<String>,
    tracker_token: Option<String>,
    webhook_secret: Option<String>,
    board_base_url: Option<String>,
    tracker_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    #[serde(default)]
    transitions: ColumnMapping,
}

impl RelayConfig {
    /// Load configuration from a TOML file.
    ///
    /// Secrets absent or empty in the file are read from
    /// `BOARDHOOK_BOARD_TOKEN`, `BOARDHOOK_TRACKER_TOKEN` and
    /// `BOARDHOOK_WEBHOOK_SECRET` respectively. An empty `[transitions]`
    /// table is legal: every delivery then resolves to a no-op.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let file: ConfigFile = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;

        let config = Self {
            board_token: resolve_secret(file.board_token, "BOARDHOOK_BOARD_TOKEN")?,
            tracker_token: resolve_secret(file.tracker_token, "BOARDHOOK_TRACKER_TOKEN")?,
            webhook_secret: resolve_secret(file.webhook_secret, "BOARDHOOK_WEBHOOK_SECRET")?,
            transitions: file.transitions,
            board_base_url: file
                .board_base_url
                .unwrap_or_else(|| DEFAULT_BOARD_BASE_URL.to_string()),
            tracker_base_url: file
                .tracker_base_url
                .unwrap_or_else(|| DEFAULT_TRACKER_BASE_URL.to_string()),
            request_timeout: Duration::from_secs(
                file.request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.board_token.is_empty() {
            anyhow::bail!("board_token cannot be empty");
        }
        if self.tracker_token.is_empty() {
            anyhow::bail!("tracker_token cannot be empty");
        }
        if self.webhook_secret.is_empty() {
            anyhow::bail!("webhook_secret cannot be empty");
        }
        for (label, url) in [
            ("board_base_url", &self.board_base_url),
            ("tracker_base_url", &self.tracker_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", label);
            }
        }
        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }
        Ok(())
    }
}

/// A secret from the file, or from the named environment variable, or an
/// error naming what is missing.
fn resolve_secret(file_value: Option<String>, env_var: &str) -> anyhow::Result<String> {
    if let Some(value) = file_value.filter(|v| !v.is_empty()) {
        return Ok(value);
    }
    match std::env::var(env_var) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => anyhow::bail!("{} is required but not set in the config file or environment", env_var),
    }
}
