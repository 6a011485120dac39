//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look up the record by code
/// 2. Queue an access event for the background worker (not awaited)
/// 3. Return 302 Found with `Location` set to the stored URL
///
/// A failure to count the access never turns into a failed redirect.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let record = state.shortener.resolve(&code).await?;

    let location = location_header(&record.original_url).ok_or_else(|| {
        tracing::error!(code, "Stored URL is not a valid Location header");
        AppError::internal("Stored URL cannot be redirected to", json!({}))
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Builds the `Location` value for a stored URL.
///
/// Printable ASCII is sent as stored. Anything else (non-ASCII hosts or
/// paths, inner spaces) is sent in its serialized form: punycode host and
/// percent-encoded path.
fn location_header(stored: &str) -> Option<HeaderValue> {
    if stored.bytes().all(|b| b.is_ascii_graphic()) {
        return HeaderValue::from_str(stored).ok();
    }

    let url = Url::parse(stored).ok()?;
    HeaderValue::from_str(url.as_str()).ok()
}
