//! Handlers for link maintenance endpoints (update, delete).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::shorten::{UpdateResponse, UrlPayload};
use crate::error::AppError;
use crate::state::AppState;

/// Points an existing short code at a new URL.
///
/// # Endpoint
///
/// `PUT /shorten/{code}`
///
/// # Request Body
///
/// ```json
/// { "url": "https://new-destination.com" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "shortCode": "aB3dE9",
///   "url": "https://new-destination.com",
///   "updatedAt": "2025-01-02T08:30:00Z"
/// }
/// ```
///
/// The short code and access count are left untouched.
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is missing or invalid (checked before lookup).
/// Returns 404 Not Found if the code doesn't exist.
pub async fn update_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    payload: Result<Json<UrlPayload>, JsonRejection>,
) -> Result<Json<UpdateResponse>, AppError> {
    let Json(payload) = payload?;

    let record = state.shortener.update(&code, payload.url).await?;
    tracing::info!(code = %record.short_code, "Short link updated");

    Ok(Json(record.into()))
}

/// Permanently deletes a short link.
///
/// # Endpoint
///
/// `DELETE /shorten/{code}`
///
/// The record is removed, not tombstoned: subsequent redirects, updates, and
/// stats requests for this code return 404.
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.shortener.delete(&code).await?;
    tracing::info!(code, "Short link deleted");

    Ok(StatusCode::NO_CONTENT)
}
