//! Typed content queries for the storefront.
//!
//! Each query function builds a GROQ query, runs it through a
//! [`ContentClient`](content_client::ContentClient) passed in by the caller
//! and decodes the result into a record type:
//!
//! - **Variants**: `fetch_product_variants` for the category navigation
//! - **Blog**: `fetch_latest_blog_posts`, `fetch_blog_post_by_slug`
//! - **Deals**: `fetch_deal_products` (products marked `hot`)
//! - **Reels**: `fetch_product_reels`
//! - **Orders**: `fetch_order_items`
//!
//! # Example
//!
//! ```rust,ignore
//! use content_client::{ContentConfig, SanityClient};
//! use content_queries::prelude::*;
//!
//! let client = SanityClient::new(ContentConfig::new("abc123"))?;
//! let posts = fetch_latest_blog_posts(&client, 3).await?;
//! for post in &posts {
//!     println!("{}", post.title);
//! }
//! ```

pub mod error;
pub mod ids;
pub mod models;
pub mod queries;

pub use error::QueryError;
pub use ids::*;
pub use models::*;
pub use queries::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::QueryError;
    pub use crate::ids::*;
    pub use crate::models::*;
    pub use crate::queries::{
        fetch_blog_post_by_slug, fetch_deal_products, fetch_latest_blog_posts,
        fetch_order_items, fetch_product_reels, fetch_product_variants, MAX_BLOG_POSTS,
        MAX_REELS,
    };
}
