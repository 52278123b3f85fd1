//! Bearer token extraction
//!
//! Pulls the token out of `Authorization: Bearer <token>`.

use axum::http::{HeaderMap, header};

/// Scheme name sent back in `WWW-Authenticate` on 401 responses.
pub const BEARER_SCHEME: &str = "Bearer";

/// Extract the bearer token from the `Authorization` header.
///
/// The scheme is matched case-insensitively. Returns `None` when the header
/// is missing, not valid ASCII, uses another scheme, or carries an empty token.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
