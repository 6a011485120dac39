//! Absolute URL validation for redirect targets.

use url::Url;

/// Schemes accepted as redirect targets.
const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Returns true if `candidate` is an absolute HTTP(S) URL with a host.
///
/// Only `http` and `https` are redirect targets; other schemes with an
/// authority, such as `ftp://host/`, are rejected too.
///
/// Never fails: empty strings, relative paths, surrounding whitespace,
/// control characters anywhere in the string (the parser would silently
/// strip tabs and newlines), unsupported schemes (`javascript:`, `mailto:`,
/// `ftp:`...) and malformed syntax all yield `false`.
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_url("https://example.com/path?q=1"));
/// assert!(!is_valid_url("/relative/path"));
/// assert!(!is_valid_url("not a url"));
/// ```
pub fn is_valid_url(candidate: &str) -> bool {
    if candidate.is_empty()
        || candidate.trim() != candidate
        || candidate.chars().any(|c| c.is_control())
    {
        return false;
    }

    match Url::parse(candidate) {
        Ok(url) => {
            ALLOWED_SCHEMES.contains(&url.scheme()) && url.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}
