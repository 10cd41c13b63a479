//! Boardhook Relay Engine
//!
//! The single place where a webhook delivery becomes zero or one board
//! actions: authenticate the request, parse the payload, classify it against
//! the transition table, execute the resulting card move (and, for new
//! branches, the follow-up assignment), and synthesize the response for the
//! webhook sender.
//!
//! Both deployment shapes — the persistent axum server and the one-shot CLI
//! — are thin adapters over [`Relay::handle_delivery`]; neither carries any
//! routing logic of its own.

pub mod config;
pub mod engine;

pub use config::RelayConfig;
pub use engine::{Relay, RelayResponse};
