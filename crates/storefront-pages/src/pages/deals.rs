use content_client::ContentClient;
use content_queries::{fetch_deal_products, DealProduct, QueryError};

use crate::Presentation;

/// The deals page: a title over a grid of hot products.
#[derive(Debug, Clone, PartialEq)]
pub struct DealsPage {
    pub title: String,
    pub products: Vec<DealProduct>,
}

impl DealsPage {
    pub const TITLE: &'static str = "Hot Deals of the Week";

    /// Fetch the page's products.
    pub async fn load<C>(client: &C) -> Result<Self, QueryError>
    where
        C: ContentClient + ?Sized,
    {
        let products = fetch_deal_products(client).await?;
        tracing::debug!(products = products.len(), "deals page loaded");
        Ok(Self {
            title: Self::TITLE.to_string(),
            products,
        })
    }

    pub fn render<P: Presentation>(&self, presentation: &P) -> P::Output {
        presentation.container(vec![
            presentation.title(&self.title),
            presentation.product_grid(&self.products),
        ])
    }
}
