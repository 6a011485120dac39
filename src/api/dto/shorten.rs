//! DTOs for creating and updating short links.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::UrlRecord;

/// Request body for `POST /shorten` and `PUT /shorten/{code}`.
///
/// `url` is optional at the JSON level so a missing field reaches the
/// service and is reported as "URL is required".
#[derive(Debug, Deserialize)]
pub struct UrlPayload {
    #[serde(default)]
    pub url: Option<String>,
}

/// Response for a newly created short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub id: i64,
    pub url: String,
    pub short_code: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShortenResponse {
    pub fn new(record: UrlRecord, short_url: String) -> Self {
        Self {
            id: record.id,
            url: record.original_url,
            short_code: record.short_code,
            short_url,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Response for an updated short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub short_code: String,
    pub url: String,
    pub updated_at: DateTime<Utc>,
}

impl From<UrlRecord> for UpdateResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            short_code: record.short_code,
            url: record.original_url,
            updated_at: record.updated_at,
        }
    }
}
