use content_client::{fetch, ContentClient};
use content_groq::{Direction, FieldPath, Filter, GroqQuery, Operand, Projection};

use crate::{DealProduct, QueryError};

/// Product status that marks a deal.
pub const DEAL_STATUS: &str = "hot";

/// Every field of `hot` products by name, with category references replaced by titles.
pub fn deal_products_query() -> GroqQuery {
    GroqQuery::of_type("product")
        .filter(Filter::eq(FieldPath::attr("status"), Operand::string(DEAL_STATUS)))
        .order_by(FieldPath::attr("name"), Direction::Asc)
        .project(
            Projection::new()
                .spread()
                .alias("categories", FieldPath::attr("categories").each().deref().then("title")),
        )
}

/// Products currently on deal, by name.
#[tracing::instrument(level = "debug", skip(client))]
pub async fn fetch_deal_products<C>(client: &C) -> Result<Vec<DealProduct>, QueryError>
where
    C: ContentClient + ?Sized,
{
    let products: Vec<DealProduct> = fetch(client, &deal_products_query()).await?;
    tracing::debug!(count = products.len(), "fetched deal products");
    Ok(products)
}
