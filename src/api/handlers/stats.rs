//! Handler for short link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the stored record and access count for a short code.
///
/// # Endpoint
///
/// `GET /shorten/{code}/stats`
///
/// Reading statistics does not count as an access.
///
/// # Response
///
/// ```json
/// {
///   "id": 1,
///   "url": "https://example.com",
///   "shortCode": "aB3dE9",
///   "createdAt": "2025-01-01T12:00:00Z",
///   "updatedAt": "2025-01-01T12:00:00Z",
///   "accessCount": 10
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
pub async fn stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let record = state.shortener.stats(&code).await?;

    Ok(Json(record.into()))
}
