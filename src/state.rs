//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::ShortenerService;
use crate::domain::access_event::AccessTracker;
use crate::infrastructure::persistence::PgUrlRepository;

/// State shared by all request handlers.
///
/// Built once at startup in [`crate::server::run`]. Cloning is cheap: the
/// service is behind an `Arc` and the tracker is a channel sender.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService<PgUrlRepository>>,
    pub access_tracker: AccessTracker,
    /// Public base for short URLs; `None` derives it from the `Host` header.
    pub base_url: Option<String>,
}

impl AppState {
    pub fn new(
        shortener: Arc<ShortenerService<PgUrlRepository>>,
        base_url: Option<String>,
    ) -> Self {
        let access_tracker = shortener.tracker().clone();
        Self {
            shortener,
            access_tracker,
            base_url,
        }
    }
}
