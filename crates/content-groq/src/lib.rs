//! Typed GROQ query builder.
//!
//! Queries are assembled from a small AST (filters, ordering, slice,
//! projection) and rendered to GROQ text only at the transport boundary.
//! Keeping the structure around lets in-memory stores evaluate the same
//! query the HTTP client would send.
//!
//! # Example
//!
//! ```rust
//! use content_groq::{Direction, FieldPath, GroqQuery, Projection, Slice};
//!
//! let query = GroqQuery::of_type("blog")
//!     .order_by(FieldPath::attr("publishedAt"), Direction::Desc)
//!     .slice(Slice::range(0, 3))
//!     .project(Projection::new().field("_id").field("title"));
//!
//! assert_eq!(
//!     query.to_groq(),
//!     r#"*[_type == "blog"] | order(publishedAt desc)[0...3]{ _id, title }"#
//! );
//! ```

mod error;
mod filter;
mod order;
mod params;
mod path;
mod projection;
mod query;

pub use error::GroqError;
pub use filter::{Filter, Operand};
pub use order::{Direction, Ordering};
pub use params::{is_identifier, QueryParams};
pub use path::{FieldPath, Segment};
pub use projection::{Projection, ProjectionField};
pub use query::{GroqQuery, Slice};
