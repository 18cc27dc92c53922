//! Error types for the content API client

use thiserror::Error;

/// Errors that can occur while talking to the content API
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    /// No base URL in the config or environment
    #[error("content API base URL is not configured (set api.base_url or FOLIO_API_BASE_URL)")]
    NotConfigured,

    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    /// Body is not the expected `{"data": ...}` JSON
    #[error("invalid response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

/// Result type alias for content API operations
pub type Result<T> = std::result::Result<T, ApiError>;
