//! Utility functions for code generation, URL validation, and request handling.
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_validator`] - Absolute URL validation
//! - [`short_url`] - Short URL construction from configuration or `Host` header

pub mod code_generator;
pub mod short_url;
pub mod url_validator;
