//! URL record entity representing one shortening.

use chrono::{DateTime, Utc};

/// A shortened URL with its access counter.
///
/// `short_code` is the lookup key and never changes after creation.
/// `access_count` only grows, one step per successful resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlRecord {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub access_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_code: String,
        access_count: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            access_count,
            created_at,
            updated_at,
        }
    }

    /// Returns true if the URL was changed after creation.
    pub fn was_updated(&self) -> bool {
        self.updated_at > self.created_at
    }
}

/// Input data for inserting a new record.
///
/// `id`, the counter and both timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUrlRecord {
    pub original_url: String,
    pub short_code: String,
}
