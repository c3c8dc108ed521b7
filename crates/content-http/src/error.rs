//! HTTP transport error types.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when making HTTP requests.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Could not reach the remote host.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl FetchError {
    /// Whether a retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Connection(_) | FetchError::Timeout(_) => true,
            FetchError::HttpError { status, .. } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            // reqwest does not report which deadline fired
            FetchError::Timeout(Duration::ZERO)
        } else if e.is_connect() {
            FetchError::Connection(e.to_string())
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else if e.is_decode() {
            FetchError::ParseError(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors() {
        assert!(FetchError::Connection("refused".into()).is_transient());
        assert!(FetchError::Timeout(Duration::from_millis(10)).is_transient());
        assert!(FetchError::HttpError { status: 503, message: String::new() }.is_transient());
        assert!(FetchError::HttpError { status: 429, message: String::new() }.is_transient());
    }

    #[test]
    fn test_permanent_errors() {
        assert!(!FetchError::HttpError { status: 400, message: String::new() }.is_transient());
        assert!(!FetchError::InvalidUrl("x".into()).is_transient());
        assert!(!FetchError::ParseError("x".into()).is_transient());
    }

    #[test]
    fn test_from_serde_json() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(FetchError::from(err), FetchError::JsonError(_)));
    }
}
