//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};

use crate::api::dto::shorten::{ShortenResponse, UrlPayload};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::short_url::{resolve_base_url, short_url};

/// Creates a short link for one URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "id": 1,
///   "url": "https://example.com",
///   "shortCode": "aB3dE9",
///   "shortUrl": "http://localhost:3000/aB3dE9",
///   "createdAt": "2025-01-01T12:00:00Z",
///   "updatedAt": "2025-01-01T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not JSON or the URL is missing or invalid.
/// Returns 500 Internal Server Error on storage or code generation failure.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<UrlPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;

    // Resolved first so a bad Host header cannot leave an orphaned record.
    let base = resolve_base_url(state.base_url.as_deref(), &headers)?;

    let record = state.shortener.create(payload.url).await?;
    tracing::info!(code = %record.short_code, "Short link created");

    let short_url = short_url(&base, &record.short_code);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse::new(record, short_url)),
    ))
}
