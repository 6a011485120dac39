//! Absolute short URL construction.

use crate::AppError;
use axum::http::{HeaderMap, header};
use serde_json::json;

/// Resolves the base address short URLs are composed from.
///
/// A configured `base_url` always wins. Otherwise the request's `Host` header
/// (port included) is used with the `http` scheme.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if no base URL is configured and the
/// `Host` header is missing, empty, or not valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "sho.rt:3000".parse().unwrap());
///
/// assert_eq!(resolve_base_url(None, &headers).unwrap(), "http://sho.rt:3000");
/// assert_eq!(
///     resolve_base_url(Some("https://s.example.com/"), &headers).unwrap(),
///     "https://s.example.com"
/// );
/// ```
pub fn resolve_base_url(base_url: Option<&str>, headers: &HeaderMap) -> Result<String, AppError> {
    if let Some(base) = base_url {
        return Ok(base.trim_end_matches('/').to_string());
    }

    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?
        .trim();

    if host.is_empty() {
        return Err(AppError::bad_request("Invalid Host header", json!({})));
    }

    Ok(format!("http://{}", host))
}

/// Joins a base address and a short code.
pub fn short_url(base: &str, code: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), code)
}
