//! Short code generation.
//!
//! Codes are drawn uniformly from `[A-Za-z0-9]` using a generator seeded from
//! the operating system. Uniqueness is not guaranteed here; callers retry on
//! storage conflicts (see [`crate::application::services::ShortenerService`]).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of characters in a generated short code.
pub const CODE_LENGTH: usize = 6;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Codes that would shadow a fixed route.
const RESERVED_CODES: &[&str] = &["health"];

/// The operating system randomness source could not be used.
#[derive(Debug, thiserror::Error)]
#[error("Random source unavailable: {reason}")]
pub struct GenerationError {
    reason: String,
}

impl GenerationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Generates a random alphanumeric short code of [`CODE_LENGTH`] characters.
///
/// # Errors
///
/// Returns [`GenerationError`] if the OS random source cannot seed the generator.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code()?;
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> Result<String, GenerationError> {
    let mut rng = StdRng::try_from_os_rng().map_err(|e| GenerationError::new(e.to_string()))?;

    loop {
        let code: String = (0..CODE_LENGTH)
            .map(|_| {
                let idx = rng.random_range(0..CHARSET.len());
                CHARSET[idx] as char
            })
            .collect();

        if !is_reserved(&code) {
            return Ok(code);
        }
    }
}

/// Returns true if `code` collides with a fixed route.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}
