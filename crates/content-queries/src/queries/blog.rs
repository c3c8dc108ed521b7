use content_client::{fetch, fetch_optional, ContentClient};
use content_groq::{Direction, FieldPath, Filter, GroqQuery, Operand, Projection, Slice};
use serde_json::Value;

use crate::{BlogPost, BlogPostSummary, QueryError};

/// Upper bound for a single latest-posts request.
pub const MAX_BLOG_POSTS: u32 = 100;

fn summary_projection() -> Projection {
    Projection::new()
        .fields(&["_id", "title", "slug", "mainImage", "publishedAt"])
        .nested(
            "blogcategories",
            FieldPath::attr("blogcategories").each().deref(),
            Projection::new().fields(&["_id", "title"]),
        )
}

/// Newest posts first, limited to `quantity`, with categories expanded to `_id` and `title`.
pub fn latest_blog_posts_query(quantity: u32) -> GroqQuery {
    GroqQuery::of_type("blog")
        .order_by(FieldPath::attr("publishedAt"), Direction::Desc)
        .slice(Slice::take(quantity as usize))
        .project(summary_projection())
}

/// The `quantity` most recently published posts, newest first.
///
/// A quantity of zero returns an empty list without querying.
#[tracing::instrument(level = "debug", skip(client))]
pub async fn fetch_latest_blog_posts<C>(
    client: &C,
    quantity: u32,
) -> Result<Vec<BlogPostSummary>, QueryError>
where
    C: ContentClient + ?Sized,
{
    if quantity > MAX_BLOG_POSTS {
        return Err(QueryError::InvalidQuantity {
            requested: i64::from(quantity),
            max: MAX_BLOG_POSTS,
        });
    }
    if quantity == 0 {
        return Ok(Vec::new());
    }

    let posts: Vec<BlogPostSummary> = fetch(client, &latest_blog_posts_query(quantity)).await?;
    tracing::debug!(count = posts.len(), "fetched latest blog posts");
    Ok(posts)
}

/// The post whose `slug.current` matches `$slug`, with author and body.
pub fn blog_post_by_slug_query(slug: &str) -> Result<GroqQuery, QueryError> {
    let query = GroqQuery::of_type("blog")
        .filter(Filter::eq(
            FieldPath::attr("slug").then("current"),
            Operand::param("slug"),
        ))
        .slice(Slice::first())
        .project(
            summary_projection()
                .nested(
                    "author",
                    FieldPath::attr("author").deref(),
                    Projection::new().fields(&["_id", "name", "image"]),
                )
                .field("body"),
        )
        .param("slug", Value::String(slug.to_string()))
        .map_err(content_client::ContentError::from)?;
    Ok(query)
}

/// A single post by slug, or `None` if no post has that slug.
#[tracing::instrument(level = "debug", skip(client))]
pub async fn fetch_blog_post_by_slug<C>(client: &C, slug: &str) -> Result<Option<BlogPost>, QueryError>
where
    C: ContentClient + ?Sized,
{
    if slug.trim().is_empty() {
        return Err(QueryError::InvalidArgument {
            name: "slug",
            reason: "must not be empty".to_string(),
        });
    }
    let post = fetch_optional(client, &blog_post_by_slug_query(slug)?).await?;
    Ok(post)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_query_text() {
        assert_eq!(
            latest_blog_posts_query(3).to_groq(),
            r#"*[_type == "blog"] | order(publishedAt desc)[0...3]{ _id, title, slug, mainImage, publishedAt, blogcategories[]->{ _id, title } }"#
        );
    }

    #[test]
    fn test_slug_query_text() {
        let query = blog_post_by_slug_query("hello").unwrap();
        assert_eq!(
            query.to_groq(),
            r#"*[_type == "blog" && slug.current == $slug][0]{ _id, title, slug, mainImage, publishedAt, blogcategories[]->{ _id, title }, author->{ _id, name, image }, body }"#
        );
        assert_eq!(query.params().get("slug"), Some(&Value::String("hello".into())));
    }
}
