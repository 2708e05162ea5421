//! Error types for the memU API adapter.

use thiserror::Error;

/// Result type for memU API operations.
pub type MemuResult<T> = Result<T, MemuError>;

/// Errors raised while resolving credentials or calling the memU API.
#[derive(Debug, Error)]
pub enum MemuError {
    /// A required environment variable is missing or empty.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The API rejected the credential (HTTP 401).
    #[error("Authentication failed: check MEMU_API_KEY")]
    Authentication,

    /// The API rejected the request body (HTTP 422).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Too many requests (HTTP 429).
    #[error("Rate limit exceeded: wait before retrying")]
    RateLimited,

    /// Any other non-success status.
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The request could not be sent or the response could not be read.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The configured base URL could not be used to build an endpoint.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl MemuError {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Map a non-success HTTP status and its raw body to an error kind.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => Self::Authentication,
            422 => Self::Validation(body),
            429 => Self::RateLimited,
            _ => Self::Api { status, body },
        }
    }

    /// Whether this error happened before any request was attempted.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
