//! Query error types.

use content_client::ContentError;
use thiserror::Error;

/// Errors returned by the query functions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// A requested count is negative or above the allowed maximum.
    #[error("Invalid quantity {requested}: must be between 0 and {max}")]
    InvalidQuantity { requested: i64, max: u32 },

    /// An argument is empty or malformed.
    #[error("Invalid {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// The content client failed; the original error is kept as is.
    #[error(transparent)]
    Client(#[from] ContentError),
}

impl QueryError {
    /// The underlying client error, if any.
    pub fn client_error(&self) -> Option<&ContentError> {
        match self {
            QueryError::Client(err) => Some(err),
            _ => None,
        }
    }
}

/// Check a signed count against `max` and convert it.
pub fn checked_quantity(requested: i64, max: u32) -> Result<u32, QueryError> {
    u32::try_from(requested)
        .ok()
        .filter(|n| *n <= max)
        .ok_or(QueryError::InvalidQuantity { requested, max })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_quantity() {
        assert_eq!(checked_quantity(0, 100), Ok(0));
        assert_eq!(checked_quantity(100, 100), Ok(100));
        assert_eq!(
            checked_quantity(-1, 100),
            Err(QueryError::InvalidQuantity { requested: -1, max: 100 })
        );
        assert_eq!(
            checked_quantity(101, 100),
            Err(QueryError::InvalidQuantity { requested: 101, max: 100 })
        );
    }

    #[test]
    fn test_client_error_passthrough() {
        let inner = ContentError::Config("missing project".into());
        let err = QueryError::from(inner.clone());
        assert_eq!(err.client_error(), Some(&inner));
        assert_eq!(err.to_string(), inner.to_string());
    }
}
