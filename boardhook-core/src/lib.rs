//! Boardhook Core
//!
//! Core types and logic for the boardhook webhook relay.
//!
//! This crate contains:
//! - Domain types: webhook payload model, transitions, column mapping
//! - The transition classifier (event name x action -> card move)
//! - Webhook signature verification (HMAC-SHA1)
//!
//! Everything here is pure: no I/O, no async. The outbound HTTP side lives in
//! `boardhook-client`, and the request flow that ties the two together lives
//! in `boardhook-relay`.

pub mod domain;
pub mod signature;

pub use domain::event::{Repository, WebhookPayload, issue_from_branch};
pub use domain::mapping::ColumnMapping;
pub use domain::transition::{CardMove, Transition, classify};
