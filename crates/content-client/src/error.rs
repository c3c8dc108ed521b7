//! Content client error types.

use content_groq::GroqError;
use content_http::FetchError;
use thiserror::Error;

/// Errors raised while running a content query.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContentError {
    /// Network, timeout or transport-level failure.
    #[error(transparent)]
    Transport(#[from] FetchError),

    /// The content API answered with an error status.
    #[error("Content API error ({status}) {kind}: {description}")]
    Api {
        status: u16,
        kind: String,
        description: String,
    },

    /// The result did not match the requested record type.
    #[error("Failed to decode {target}: {message}")]
    Decode {
        target: &'static str,
        message: String,
    },

    /// The query was malformed or incomplete.
    #[error(transparent)]
    Query(#[from] GroqError),

    /// The client cannot run this kind of query.
    #[error("Unsupported query: {0}")]
    UnsupportedQuery(String),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ContentError {
    /// HTTP status, when the failure came from the server.
    pub fn status(&self) -> Option<u16> {
        match self {
            ContentError::Api { status, .. } => Some(*status),
            ContentError::Transport(FetchError::HttpError { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure is an authentication or authorization problem.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}
