//! Error types for mail provider API operations.

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Mail provider API error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request error (connect failure, timeout, etc.).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    /// Non-success response from the API.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },
}

impl Error {
    /// HTTP status code of a rejected API call, if one was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
