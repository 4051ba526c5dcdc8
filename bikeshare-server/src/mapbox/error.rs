//! Mapbox client error types.

use crate::domain::DomainError;

/// Errors from the Mapbox HTTP client and its mock.
#[derive(Debug, thiserror::Error)]
pub enum MapboxError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    ///
    /// `body` holds the start of the response for logging.
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by Mapbox API")]
    RateLimited,

    /// Missing or invalid access token
    #[error("unauthorized: check MAPBOX_ACCESS_TOKEN")]
    Unauthorized,

    /// Response contained a coordinate outside the valid range
    #[error("invalid coordinate in response: {0}")]
    InvalidCoordinate(#[from] DomainError),

    /// Base URL cannot have path segments appended
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Mock fixture could not be read or parsed
    #[error("mock fixture error: {0}")]
    Fixture(String),
}
