//! Bearer token extraction.
//!
//! Sources, in priority order:
//! 1. `Authorization: Bearer <token>` (scheme match is case-sensitive)
//! 2. `?token=<token>` query parameter
//!
//! When the header names the `Bearer` scheme it owns the request: a missing second
//! segment means "no token", the query string is not consulted.

use axum::http::{HeaderMap, Uri, header};

const BEARER: &str = "Bearer";

pub fn extract(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    if let Some(auth) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        let mut segments = auth.split_whitespace();
        if segments.next() == Some(BEARER) {
            return segments.next().map(str::to_string);
        }
    }

    from_query(uri)
}

fn from_query(uri: &Uri) -> Option<String> {
    let query = uri.query()?;

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
