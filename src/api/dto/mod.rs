//! Data Transfer Objects for API requests and responses.
//!
//! Response field names are camelCase; timestamps serialize as RFC 3339.

pub mod health;
pub mod shorten;
pub mod stats;
