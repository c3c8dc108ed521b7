//! Query functions.
//!
//! Every function takes the client explicitly, performs at most one round
//! trip and returns client failures unchanged inside [`QueryError::Client`](crate::QueryError::Client).
//! The `*_query` builders are public so the rendered GROQ can be inspected.

mod blog;
mod deals;
mod orders;
mod reels;
mod variants;

pub use blog::{
    blog_post_by_slug_query, fetch_blog_post_by_slug, fetch_latest_blog_posts,
    latest_blog_posts_query, MAX_BLOG_POSTS,
};
pub use deals::{deal_products_query, fetch_deal_products, DEAL_STATUS};
pub use orders::{fetch_order_items, order_items_query};
pub use reels::{fetch_product_reels, product_reels_query, MAX_REELS};
pub use variants::{fetch_product_variants, product_variants_query};
