//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] - URL record storage, lookup, and atomic access counting

pub mod pg_url_repository;

pub use pg_url_repository::PgUrlRepository;
