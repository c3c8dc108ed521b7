use content_client::{fetch, ContentClient};
use content_groq::{Direction, FieldPath, GroqQuery, Projection, Slice};

use crate::{ProductReel, QueryError};

/// Upper bound for a single reels request.
pub const MAX_REELS: u32 = 50;

pub fn product_reels_query(limit: u32) -> GroqQuery {
    let product = Projection::new()
        .fields(&["_id", "name", "slug", "price"])
        .alias(
            "image",
            FieldPath::attr("images").index(0).then("asset").deref().then("url"),
        );

    GroqQuery::of_type("productReel")
        .order_by(FieldPath::attr("_createdAt"), Direction::Desc)
        .slice(Slice::take(limit as usize))
        .project(
            Projection::new()
                .fields(&["_id", "title", "_createdAt"])
                .alias("videoUrl", FieldPath::attr("video").then("asset").deref().then("url"))
                .nested("product", FieldPath::attr("product").deref(), product)
                .fields(&["likes", "views", "shares", "comments", "tags"]),
        )
}

/// The newest product reels.
#[tracing::instrument(level = "debug", skip(client))]
pub async fn fetch_product_reels<C>(client: &C, limit: u32) -> Result<Vec<ProductReel>, QueryError>
where
    C: ContentClient + ?Sized,
{
    if limit > MAX_REELS {
        return Err(QueryError::InvalidQuantity {
            requested: i64::from(limit),
            max: MAX_REELS,
        });
    }
    if limit == 0 {
        return Ok(Vec::new());
    }

    let reels: Vec<ProductReel> = fetch(client, &product_reels_query(limit)).await?;
    tracing::debug!(count = reels.len(), "fetched product reels");
    Ok(reels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_text() {
        assert_eq!(
            product_reels_query(6).to_groq(),
            concat!(
                r#"*[_type == "productReel"] | order(_createdAt desc)[0...6]"#,
                r#"{ _id, title, _createdAt, "videoUrl": video.asset->url, "#,
                r#"product->{ _id, name, slug, price, "image": images[0].asset->url }, "#,
                r#"likes, views, shares, comments, tags }"#
            )
        );
    }
}
