//! API Module
//!
//! HTTP layer for the webhook relay: the single inbound webhook route plus
//! a health probe.

pub mod health;
pub mod webhook;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use boardhook_relay::Relay;
use tower_http::trace::TraceLayer;

/// Create the router with all endpoints
pub fn create_router(relay: Arc<Relay>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/from_github", post(webhook::receive_webhook))
        .with_state(relay)
        .layer(TraceLayer::new_for_http())
}
