//! Schema error types.

use thiserror::Error;

/// Errors raised while assembling a schema set or looking up types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Two types share a name.
    #[error("Duplicate schema type: {0}")]
    DuplicateType(String),

    /// A field refers to a type that is not registered.
    #[error("Unknown type {name} referenced by {referenced_by}")]
    UnknownType { name: String, referenced_by: String },

    /// No type with this name is registered.
    #[error("No schema type named {0}")]
    NotFound(String),

    /// A document has no `_type` attribute.
    #[error("Document has no _type")]
    MissingDocumentType,

    /// A type definition is malformed.
    #[error("Invalid definition for {type_name}: {reason}")]
    InvalidDefinition { type_name: String, reason: String },
}
