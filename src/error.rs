// src/error.rs
// =============================================================================
// Error types shared across the crate.
//
// Two families:
// - FetchError: why a single HTTP request did not produce a usable page.
//   The crawler never lets these escape; they are logged and folded into
//   an "unreachable" verdict.
// - ScanError: failures that stop a scan before or after crawling
//   (bad seed URL, bad config file, report could not be written).
//
// Rust concepts:
// - thiserror: derive macro that implements std::error::Error and Display
// - #[from]: automatic conversion so `?` works on the wrapped error type
// =============================================================================

use thiserror::Error;

/// Why a request did not count as a successful fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("could not read response body: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Other(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout
        } else if error.is_connect() {
            FetchError::Connect(error.to_string())
        } else if error.is_body() || error.is_decode() {
            FetchError::Body(error.to_string())
        } else {
            FetchError::Other(error.to_string())
        }
    }
}

/// Errors that abort a scan
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}
