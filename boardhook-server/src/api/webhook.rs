//! Webhook API Handler
//!
//! Accepts GitHub webhook deliveries and delegates to the relay engine. The
//! body is taken as raw bytes because the signature was computed over the
//! exact bytes on the wire.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use boardhook_relay::{Relay, RelayResponse};

/// Header naming the GitHub event type
const HEADER_EVENT: &str = "x-github-event";
/// Header carrying the HMAC-SHA1 delivery signature
const HEADER_SIGNATURE: &str = "x-hub-signature";

/// POST /from_github
///
/// One webhook delivery in, one synthesized response out. Status codes:
/// 406 bad signature, 415 non-JSON body, 200/204 benign no-ops, otherwise
/// the outbound call's response passed through.
pub async fn receive_webhook(
    State(relay): State<Arc<Relay>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(event_name) = headers.get(HEADER_EVENT).and_then(|v| v.to_str().ok()) else {
        tracing::debug!("Delivery without X-GitHub-Event header");
        return (StatusCode::BAD_REQUEST, "missing X-GitHub-Event header").into_response();
    };
    let signature = headers.get(HEADER_SIGNATURE).and_then(|v| v.to_str().ok());

    let reply = relay.handle_delivery(event_name, signature, &body).await;
    into_response(reply)
}

/// Convert an engine response into an axum response, re-applying any
/// pass-through headers that survive the hop.
fn into_response(reply: RelayResponse) -> Response {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut headers = HeaderMap::new();
    for (name, value) in &reply.headers {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            headers.append(name, value);
        }
    }

    if status == StatusCode::NO_CONTENT {
        return (status, headers).into_response();
    }
    (status, headers, reply.body).into_response()
}
