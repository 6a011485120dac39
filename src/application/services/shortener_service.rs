//! Short link creation, resolution, and maintenance service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::access_event::AccessTracker;
use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::{AppError, is_short_code_conflict};
use crate::utils::code_generator::generate_code;
use crate::utils::url_validator::is_valid_url;

/// Default number of generated codes tried before giving up on a collision streak.
pub const DEFAULT_MAX_CODE_ATTEMPTS: usize = 5;

/// Service implementing the five short link operations.
///
/// Holds no per-request state: the repository owns every record and the
/// tracker only forwards access events to the background worker.
pub struct ShortenerService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
    tracker: AccessTracker,
    max_code_attempts: usize,
}

impl<R: UrlRepository + ?Sized> ShortenerService<R> {
    /// Creates a new shortener service.
    pub fn new(repository: Arc<R>, tracker: AccessTracker) -> Self {
        Self {
            repository,
            tracker,
            max_code_attempts: DEFAULT_MAX_CODE_ATTEMPTS,
        }
    }

    /// Overrides how many codes are generated before a create fails.
    pub fn with_max_code_attempts(mut self, attempts: usize) -> Self {
        self.max_code_attempts = attempts.max(1);
        self
    }

    /// Returns the tracker used for access events.
    pub fn tracker(&self) -> &AccessTracker {
        &self.tracker
    }

    /// Creates a record for `url` under a freshly generated code.
    ///
    /// # Collisions
    ///
    /// A generated code that already exists makes the insert fail with a
    /// conflict on the short code constraint. The service then draws a new
    /// code, up to `max_code_attempts` times in total.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `url` is absent, empty, or not a
    /// valid absolute URL. Nothing is persisted in that case.
    ///
    /// Returns [`AppError::Internal`] if every attempt collided, if the
    /// random source failed, or on database errors.
    pub async fn create(&self, url: Option<String>) -> Result<UrlRecord, AppError> {
        let url = validate_input(url)?;

        for attempt in 1..=self.max_code_attempts {
            let code = generate_code()?;

            let new_record = NewUrlRecord {
                original_url: url.clone(),
                short_code: code,
            };

            match self.repository.insert(new_record).await {
                Ok(record) => return Ok(record),
                Err(e) if is_short_code_conflict(&e) => {
                    warn!(attempt, "Short code collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique short code",
            json!({ "attempts": self.max_code_attempts }),
        ))
    }

    /// Looks up a code for redirection and counts the access.
    ///
    /// The increment is queued, not awaited: the caller can redirect as soon
    /// as this returns, and a failed increment never fails the resolution.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve(&self, code: &str) -> Result<UrlRecord, AppError> {
        let record = self.find(code).await?;

        if !self.tracker.track(&record.short_code) {
            debug!(code, "Access for resolved code was not queued");
        }

        Ok(record)
    }

    /// Points an existing code at a new URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] under the same rules as [`Self::create`],
    /// checked before the store is touched.
    /// Returns [`AppError::NotFound`] if no record has this code.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update(&self, code: &str, url: Option<String>) -> Result<UrlRecord, AppError> {
        let url = validate_input(url)?;

        self.repository
            .update_url(code, &url)
            .await?
            .ok_or_else(|| not_found(code))
    }

    /// Permanently removes a code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if nothing was removed.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete(&self, code: &str) -> Result<(), AppError> {
        if self.repository.delete_by_code(code).await? {
            Ok(())
        } else {
            Err(not_found(code))
        }
    }

    /// Returns the record for a code without counting an access.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this code.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn stats(&self, code: &str) -> Result<UrlRecord, AppError> {
        self.find(code).await
    }

    /// Counts stored records.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Sums access counts across all records.
    pub async fn total_accesses(&self) -> Result<i64, AppError> {
        self.repository.total_accesses().await
    }

    async fn find(&self, code: &str) -> Result<UrlRecord, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| not_found(code))
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("Short URL not found", json!({ "code": code }))
}

/// Checks presence first, then well-formedness.
fn validate_input(url: Option<String>) -> Result<String, AppError> {
    let url = match url {
        Some(url) if !url.is_empty() => url,
        _ => return Err(AppError::bad_request("URL is required", json!({}))),
    };

    if !is_valid_url(&url) {
        return Err(AppError::bad_request(
            "Invalid URL format",
            json!({ "url": url }),
        ));
    }

    Ok(url)
}
