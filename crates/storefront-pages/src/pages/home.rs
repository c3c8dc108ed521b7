use content_client::ContentClient;
use content_queries::{
    fetch_latest_blog_posts, fetch_product_variants, BlogPostSummary, ProductVariant, QueryError,
};

use crate::Presentation;

/// Posts shown in the home page's blog section.
pub const HOME_POST_COUNT: u32 = 4;

/// The home page: variant navigation and the latest posts.
#[derive(Debug, Clone, PartialEq)]
pub struct HomePage {
    pub variants: Vec<ProductVariant>,
    pub posts: Vec<BlogPostSummary>,
}

impl HomePage {
    /// Fetch variants and posts concurrently. The first failure wins.
    pub async fn load<C>(client: &C) -> Result<Self, QueryError>
    where
        C: ContentClient + ?Sized,
    {
        let (variants, posts) = futures::try_join!(
            fetch_product_variants(client),
            fetch_latest_blog_posts(client, HOME_POST_COUNT),
        )?;
        tracing::debug!(
            variants = variants.len(),
            posts = posts.len(),
            "home page loaded"
        );
        Ok(Self { variants, posts })
    }

    pub fn render<P: Presentation>(&self, presentation: &P) -> P::Output {
        presentation.container(vec![
            presentation.variant_list(&self.variants),
            presentation.title("Latest Blog"),
            presentation.blog_list(&self.posts),
        ])
    }
}
