//! DTO for short link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::UrlRecord;

/// Statistics for one short link, reported verbatim from the store.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub id: i64,
    pub url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub access_count: i64,
}

impl From<UrlRecord> for StatsResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            id: record.id,
            url: record.original_url,
            short_code: record.short_code,
            created_at: record.created_at,
            updated_at: record.updated_at,
            access_count: record.access_count,
        }
    }
}
