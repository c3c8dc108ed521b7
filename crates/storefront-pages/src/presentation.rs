//! The component boundary between pages and their output.

use content_queries::{BlogPostSummary, DealProduct, ProductVariant};

/// Builds page output from shared UI components.
pub trait Presentation {
    /// What a component renders to.
    type Output;

    /// Page-width wrapper around its children.
    fn container(&self, children: Vec<Self::Output>) -> Self::Output;

    /// Section heading.
    fn title(&self, text: &str) -> Self::Output;

    /// Grid of product cards.
    fn product_grid(&self, products: &[DealProduct]) -> Self::Output;

    /// Product family navigation.
    fn variant_list(&self, variants: &[ProductVariant]) -> Self::Output;

    /// Blog post cards.
    fn blog_list(&self, posts: &[BlogPostSummary]) -> Self::Output;
}
