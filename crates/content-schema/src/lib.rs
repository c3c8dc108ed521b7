//! Content schema definitions.
//!
//! This crate provides:
//!
//! - **Types**: `SchemaType`, `FieldDefinition`, `FieldType`, `Rule`
//! - **Sets**: `SchemaSet` registers types, checks cross-references and
//!   exports the studio's JSON shape
//! - **Validation**: documents are checked against their declared rules and
//!   every violation is reported
//! - **Storefront**: the order, order item, product, variant, blog, author
//!   and reel types used by the storefront
//!
//! # Example
//!
//! ```rust
//! use content_schema::storefront_schema;
//! use serde_json::json;
//!
//! let schema = storefront_schema().unwrap();
//! let issues = schema
//!     .validate_value("orderItem", &json!({ "quantity": 0, "price": 10 }))
//!     .unwrap();
//!
//! assert_eq!(issues.len(), 2); // missing product, quantity below 1
//! ```

pub mod error;
pub mod set;
pub mod storefront;
pub mod types;
pub mod validate;

pub use error::SchemaError;
pub use set::SchemaSet;
pub use storefront::storefront_schema;
pub use types::{FieldDefinition, FieldType, Preview, Rule, SchemaKind, SchemaType};
pub use validate::ValidationIssue;
