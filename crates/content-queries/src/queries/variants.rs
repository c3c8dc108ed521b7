use content_client::{fetch, ContentClient};
use content_groq::{Direction, FieldPath, GroqQuery, Projection};

use crate::{ProductVariant, QueryError};

/// Variants ordered by `order`, with the icon resolved to its asset URL.
pub fn product_variants_query() -> GroqQuery {
    GroqQuery::of_type("productVariant")
        .order_by(FieldPath::attr("order"), Direction::Asc)
        .project(
            Projection::new()
                .fields(&["_id", "title", "value", "description", "order"])
                .alias("icon", FieldPath::attr("icon").then("asset").deref().then("url")),
        )
}

/// All product variants in display order.
#[tracing::instrument(level = "debug", skip(client))]
pub async fn fetch_product_variants<C>(client: &C) -> Result<Vec<ProductVariant>, QueryError>
where
    C: ContentClient + ?Sized,
{
    let variants: Vec<ProductVariant> = fetch(client, &product_variants_query()).await?;
    tracing::debug!(count = variants.len(), "fetched product variants");
    Ok(variants)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_text() {
        assert_eq!(
            product_variants_query().to_groq(),
            r#"*[_type == "productVariant"] | order(order asc){ _id, title, value, description, order, "icon": icon.asset->url }"#
        );
    }
}
