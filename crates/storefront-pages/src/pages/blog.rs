use content_client::ContentClient;
use content_queries::{fetch_latest_blog_posts, BlogPostSummary, QueryError};

use crate::Presentation;

/// The blog index: the most recent posts.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogIndexPage {
    pub posts: Vec<BlogPostSummary>,
}

impl BlogIndexPage {
    pub const TITLE: &'static str = "Our Blog";

    pub async fn load<C>(client: &C, quantity: u32) -> Result<Self, QueryError>
    where
        C: ContentClient + ?Sized,
    {
        let posts = fetch_latest_blog_posts(client, quantity).await?;
        tracing::debug!(posts = posts.len(), "blog index loaded");
        Ok(Self { posts })
    }

    pub fn render<P: Presentation>(&self, presentation: &P) -> P::Output {
        presentation.container(vec![
            presentation.title(Self::TITLE),
            presentation.blog_list(&self.posts),
        ])
    }
}
