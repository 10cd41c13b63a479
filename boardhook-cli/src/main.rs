//! Boardhook CLI
//!
//! On-demand entry-point adapter: processes exactly one webhook delivery
//! through the same relay engine the server uses, then exits. Useful for
//! replaying captured deliveries and for single-invocation deployments where
//! a front process hands each delivery to a short-lived worker.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;

use boardhook_relay::{Relay, RelayConfig};

#[derive(Parser)]
#[command(name = "boardhook")]
#[command(about = "Process a single GitHub webhook delivery", long_about = None)]
struct Cli {
    /// Path to the relay config file
    #[arg(long, env = "BOARDHOOK_CONFIG", default_value = "boardhook.toml")]
    config: PathBuf,

    /// GitHub event name (the X-GitHub-Event header value)
    #[arg(long)]
    event: String,

    /// Delivery signature (the X-Hub-Signature header value, "sha1=<hex>")
    #[arg(long)]
    signature: Option<String>,

    /// Payload file, or "-" to read the payload from stdin
    #[arg(long, default_value = "-")]
    payload: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let body = read_payload(&cli.payload)?;
    let config = RelayConfig::load(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    let relay = Relay::new(config).context("failed to build relay")?;

    let reply = relay
        .handle_delivery(&cli.event, cli.signature.as_deref(), &body)
        .await;

    let status = if reply.status < 400 {
        reply.status.to_string().green()
    } else {
        reply.status.to_string().red()
    };
    println!("{} {}", "status:".bold(), status);
    if !reply.body.is_empty() {
        println!("{}", String::from_utf8_lossy(&reply.body));
    }

    if reply.status >= 400 {
        std::process::exit(1);
    }
    Ok(())
}

/// Payload bytes from a file, or from stdin when the path is "-".
///
/// The bytes are passed to the engine untouched; the signature only matches
/// the exact bytes the sender signed.
fn read_payload(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut body = Vec::new();
        std::io::stdin()
            .read_to_end(&mut body)
            .context("failed to read payload from stdin")?;
        Ok(body)
    } else {
        std::fs::read(path)
            .with_context(|| format!("failed to read payload file {}", path.display()))
    }
}
