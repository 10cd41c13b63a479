//! Boardhook Server
//!
//! Persistent entry-point adapter: an axum HTTP server that receives GitHub
//! webhook deliveries on `POST /from_github` and hands them to the relay
//! engine. All decision logic lives in `boardhook-relay`; this crate only
//! translates between HTTP and the engine's types.

pub mod api;
