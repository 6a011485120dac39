//! Core domain entities.
//!
//! - [`UrlRecord`] - A persisted shortening with its access counter
//! - [`NewUrlRecord`] - Input for creating a record; store-assigned fields are absent

pub mod url_record;

pub use url_record::{NewUrlRecord, UrlRecord};
