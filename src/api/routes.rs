//! Short link route configuration.

use crate::api::handlers::{
    delete_link_handler, shorten_handler, stats_handler, update_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Short link management routes.
///
/// # Endpoints
///
/// - `POST   /shorten`              - Create a short link
/// - `PUT    /shorten/{code}`       - Point a code at a new URL
/// - `DELETE /shorten/{code}`       - Delete a short link
/// - `GET    /shorten/{code}/stats` - Record details and access count
pub fn shorten_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route(
            "/shorten/{code}",
            put(update_link_handler).delete(delete_link_handler),
        )
        .route("/shorten/{code}/stats", get(stats_handler))
}
