//! Ridership API error types.

/// Errors from the origin/destination ridership client.
#[derive(Debug, thiserror::Error)]
pub enum RidershipError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// App token rejected
    #[error("unauthorized: check the ridership app token")]
    Unauthorized,

    /// Too many requests without (or despite) an app token
    #[error("rate limited by the ridership API")]
    RateLimited,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Query filter out of range
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}
