//! Bearer-token payload decoding.
//!
//! The client only needs the identity claims; signature verification is
//! the server's job, so the middle segment is decoded without any
//! cryptographic check.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use asiste_common::models::session::TokenClaims;

/// Decodes the claims from a compact three-part token. Returns `None` on
/// any malformation (wrong part count, invalid base64, invalid UTF-8,
/// schema mismatch); this boundary never fails loudly.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        tracing::debug!("token does not have 3 segments");
        return None;
    }

    let payload = match URL_SAFE_NO_PAD.decode(parts[1]) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::debug!("token payload is not valid base64url: {}", err);
            return None;
        }
    };

    match serde_json::from_slice::<TokenClaims>(&payload) {
        Ok(claims) => Some(claims),
        Err(err) => {
            tracing::debug!("token payload did not match the claims schema: {}", err);
            None
        }
    }
}
