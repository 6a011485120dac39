//! Domain layer: entities, repository contracts, and access counting.
//!
//! # Modules
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//! - [`access_event`] - Access event model and its queue sender
//! - [`access_worker`] - Background worker applying counter increments
//!
//! # Access Counting Flow
//!
//! 1. A short code resolves in [`crate::application::services::ShortenerService::resolve`]
//! 2. An [`access_event::AccessEvent`] is queued without awaiting
//! 3. [`access_worker::run_access_worker`] applies the increment with retry
//! 4. The counter is updated atomically via [`repositories::UrlRepository`]

pub mod access_event;
pub mod access_worker;
pub mod entities;
pub mod repositories;
