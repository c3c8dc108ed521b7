//! Pages loaded from an in-memory content store.

use content_client::{ContentError, MemoryContentClient};
use content_http::FetchError;
use content_queries::{BlogPostSummary, DealProduct, ProductVariant, QueryError};
use serde_json::json;
use storefront_pages::{
    BlogIndexPage, DealsPage, HomePage, HtmlPresentation, Presentation, HOME_POST_COUNT,
};

/// Records the components a page asks for.
struct Outline;

impl Presentation for Outline {
    type Output = String;

    fn container(&self, children: Vec<String>) -> String {
        format!("container[{}]", children.join(", "))
    }

    fn title(&self, text: &str) -> String {
        format!("title({})", text)
    }

    fn product_grid(&self, products: &[DealProduct]) -> String {
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        format!("grid({})", names.join("|"))
    }

    fn variant_list(&self, variants: &[ProductVariant]) -> String {
        let titles: Vec<&str> = variants.iter().map(|v| v.title.as_str()).collect();
        format!("variants({})", titles.join("|"))
    }

    fn blog_list(&self, posts: &[BlogPostSummary]) -> String {
        let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        format!("posts({})", ids.join("|"))
    }
}

fn store() -> MemoryContentClient {
    let mut docs = vec![
        json!({ "_id": "v2", "_type": "productVariant", "title": "Appliances", "value": "appliances", "order": 2 }),
        json!({ "_id": "v1", "_type": "productVariant", "title": "Gadgets", "value": "gadgets", "order": 1 }),
        json!({ "_id": "p1", "_type": "product", "name": "Toaster <XL>", "price": 40, "status": "hot", "stock": 5 }),
        json!({ "_id": "p2", "_type": "product", "name": "Air Fryer", "price": 90, "discount": 10, "status": "hot" }),
        json!({ "_id": "p3", "_type": "product", "name": "Lamp", "price": 15, "status": "sale" }),
    ];
    for day in 1..=6 {
        docs.push(json!({
            "_id": format!("post-{}", day),
            "_type": "blog",
            "title": format!("Post {}", day),
            "slug": { "current": format!("post-{}", day) },
            "publishedAt": format!("2024-06-0{}T12:00:00Z", day)
        }));
    }
    MemoryContentClient::with_documents(docs)
}

#[tokio::test]
async fn deals_page_passes_products_through() {
    let client = store();
    let page = DealsPage::load(&client).await.unwrap();
    assert_eq!(page.title, DealsPage::TITLE);
    assert_eq!(
        page.render(&Outline),
        "container[title(Hot Deals of the Week), grid(Air Fryer|Toaster <XL>)]"
    );
    assert_eq!(client.query_count(), 1);
}

#[tokio::test]
async fn deals_page_renders_escaped_html() {
    let client = store();
    let html = DealsPage::load(&client)
        .await
        .unwrap()
        .render(&HtmlPresentation::new());
    assert!(html.starts_with(r#"<div class="container">"#));
    assert!(html.contains(r#"<h2 class="title">Hot Deals of the Week</h2>"#));
    assert!(html.contains("Toaster &lt;XL&gt;"));
    assert!(!html.contains("Lamp"));
}

#[tokio::test]
async fn home_page_loads_variants_and_posts() {
    let client = store();
    let page = HomePage::load(&client).await.unwrap();
    assert_eq!(page.posts.len(), HOME_POST_COUNT as usize);
    assert_eq!(
        page.render(&Outline),
        "container[variants(Gadgets|Appliances), title(Latest Blog), posts(post-6|post-5|post-4|post-3)]"
    );
    assert_eq!(client.query_count(), 2);
}

#[tokio::test]
async fn blog_index_respects_quantity() {
    let client = store();
    let page = BlogIndexPage::load(&client, 2).await.unwrap();
    assert_eq!(page.render(&Outline), "container[title(Our Blog), posts(post-6|post-5)]");

    let empty = BlogIndexPage::load(&client, 0).await.unwrap();
    assert!(empty.posts.is_empty());
}

#[tokio::test]
async fn fetch_errors_reach_the_caller_unchanged() {
    let client = store();
    let failure = ContentError::Transport(FetchError::Connection("connection reset".into()));
    client.fail_with(failure.clone());

    assert_eq!(
        DealsPage::load(&client).await.unwrap_err(),
        QueryError::Client(failure.clone())
    );
    assert_eq!(
        HomePage::load(&client).await.unwrap_err(),
        QueryError::Client(failure)
    );
}

#[tokio::test]
async fn blog_index_rejects_oversized_quantity() {
    let client = store();
    let err = BlogIndexPage::load(&client, 500).await.unwrap_err();
    assert!(matches!(err, QueryError::InvalidQuantity { requested: 500, .. }));
}
