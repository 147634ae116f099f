//! Client error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// The service answered with a non-success status. `message` is already
    /// normalized from the vendor's error body.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("rate limited; retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// The response body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// The service refused to answer the prompt.
    #[error("request blocked by the service: {0}")]
    Blocked(String),

    #[error("{service} API key is not configured")]
    MissingApiKey { service: &'static str },

    #[error("unsupported image type: {0}")]
    UnsupportedMedia(String),

    #[error("Request timed out. Please try again.")]
    Timeout,
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(e)
        }
    }
}
