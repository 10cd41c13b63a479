//! Webhook signature verification using HMAC-SHA1.
//!
//! GitHub signs each delivery with HMAC-SHA1 over the raw body bytes, keyed
//! by the webhook's shared secret, and sends it as `sha1=<hex>` in the
//! `X-Hub-Signature` header. Verification is the first step of processing;
//! a delivery that fails it is rejected before the body is even parsed.
//!
//! The signature covers the exact bytes on the wire, so callers must verify
//! against the raw body, never a re-serialized form of it.

use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Parses a signature header (e.g. "sha1=abc123...") into raw bytes.
///
/// Returns `None` for malformed headers (missing prefix, wrong algorithm,
/// invalid hex). Never panics.
pub fn parse_signature_header(header: &str) -> Option<Vec<u8>> {
    let hex_sig = header.strip_prefix("sha1=")?;
    hex::decode(hex_sig).ok()
}

/// Computes the HMAC-SHA1 signature of a payload with the given secret.
///
/// Callers that need to produce valid signatures (fixtures, the CLI's test
/// mode) pair this with [`format_signature_header`].
pub fn compute_signature(payload: &[u8], secret: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha1::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Formats a raw signature as a header value ("sha1=<hex>").
pub fn format_signature_header(signature: &[u8]) -> String {
    format!("sha1={}", hex::encode(signature))
}

/// Verifies a webhook signature against the payload and shared secret.
///
/// Returns `true` only when the header carries a well-formed `sha1=<hex>`
/// value matching the HMAC-SHA1 of `payload` under `secret`. The comparison
/// is constant-time (via the HMAC library) to avoid leaking the expected
/// signature through timing.
pub fn verify_signature(payload: &[u8], signature_header: &str, secret: &[u8]) -> bool {
    let claimed = match parse_signature_header(signature_header) {
        Some(sig) => sig,
        None => return false,
    };

    let mut mac = match HmacSha1::new_from_slice(secret) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(payload);
    mac.verify_slice(&claimed).is_ok()
}
