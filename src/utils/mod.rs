//! Utility functions and helpers.

pub mod http;

/// Return `url` if it is non-empty after trimming.
pub fn require_url(url: &str) -> Option<&str> {
    if url.trim().is_empty() { None } else { Some(url) }
}
