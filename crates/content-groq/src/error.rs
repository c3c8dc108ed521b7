//! Query construction errors.

use thiserror::Error;

/// Errors raised while building or validating a query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroqError {
    /// A field path could not be parsed.
    #[error("Invalid field path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Parameter names must be GROQ identifiers.
    #[error("Invalid parameter name: {0}")]
    InvalidParamName(String),

    /// A `$param` is referenced but no value was bound.
    #[error("Missing value for parameter ${0}")]
    MissingParam(String),

    /// A slice whose end precedes its start.
    #[error("Invalid slice [{start}...{end}]")]
    InvalidSlice { start: usize, end: usize },
}
