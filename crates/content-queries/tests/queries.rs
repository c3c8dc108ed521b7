//! Query functions run against an in-memory content store.

use std::time::Duration;

use content_client::{ContentError, MemoryContentClient};
use content_http::FetchError;
use content_queries::prelude::*;
use serde_json::{json, Value};

fn variant(id: &str, title: &str, order: i64) -> Value {
    json!({
        "_id": id,
        "_type": "productVariant",
        "title": title,
        "value": title.to_lowercase(),
        "order": order
    })
}

fn post(id: &str, published_at: Option<&str>, categories: Option<Vec<&str>>) -> Value {
    let mut doc = json!({
        "_id": id,
        "_type": "blog",
        "title": format!("Post {}", id),
        "slug": { "_type": "slug", "current": id },
        "mainImage": { "_type": "image", "asset": { "_ref": "image-abc-800x600-jpg" } },
        "body": [{ "_type": "block", "children": [{ "_type": "span", "text": "hi" }] }],
        "author": { "_ref": "author-1", "_type": "reference" }
    });
    if let Some(at) = published_at {
        doc["publishedAt"] = json!(at);
    }
    if let Some(categories) = categories {
        doc["blogcategories"] = categories
            .iter()
            .map(|c| json!({ "_ref": c, "_type": "reference", "_key": c }))
            .collect();
    }
    doc
}

fn store() -> MemoryContentClient {
    let mut docs = vec![
        variant("v3", "Refrigerators", 3),
        variant("v1", "Gadgets", 1),
        variant("v2", "Appliances", 2),
        variant("v5", "Air Conditioners", 5),
        variant("v4", "Washing Machines", 4),
        json!({ "_id": "news", "_type": "blogcategory", "title": "News", "slug": { "current": "news" } }),
        json!({ "_id": "guides", "_type": "blogcategory", "title": "Guides" }),
        json!({ "_id": "kitchen", "_type": "category", "title": "Kitchen" }),
        json!({ "_id": "home", "_type": "category", "title": "Home" }),
        json!({ "_id": "author-1", "_type": "author", "name": "Robin", "bio": [] }),
        json!({
            "_id": "p-kettle", "_type": "product", "name": "Kettle", "price": 30, "status": "hot",
            "categories": [{ "_ref": "kitchen" }, { "_ref": "home" }]
        }),
        json!({ "_id": "p-blender", "_type": "product", "name": "Blender", "price": 55, "discount": 10, "status": "hot" }),
        json!({ "_id": "p-toaster", "_type": "product", "name": "Toaster", "price": 25, "status": "new" }),
        json!({
            "_id": "order-1", "_type": "order", "orderNumber": "A-1001",
            "items": [
                { "_key": "i1", "_type": "orderItem", "product": { "_ref": "p-kettle" }, "quantity": 2, "price": 28 },
                { "_key": "i2", "_type": "orderItem", "product": { "_ref": "p-gone" }, "quantity": 1, "size": "L", "price": 9.5 }
            ]
        }),
    ];
    docs.push(post("alpha", Some("2024-01-10T08:00:00Z"), Some(vec!["news", "guides"])));
    docs.push(post("bravo", Some("2024-03-02T08:00:00Z"), Some(vec![])));
    docs.push(post("charlie", Some("2024-02-20T08:00:00Z"), None));
    docs.push(post("delta", None, Some(vec!["news"])));
    docs.push(post("echo", Some("2024-04-15T08:00:00Z"), Some(vec!["news", "missing"])));
    MemoryContentClient::with_documents(docs)
}

// === Product Variant Tests ===

#[tokio::test]
async fn variants_come_back_in_ascending_order() {
    let client = store();
    let variants = fetch_product_variants(&client).await.unwrap();
    let orders: Vec<i64> = variants.iter().map(|v| v.order).collect();
    assert_eq!(orders, vec![1, 2, 3, 4, 5]);
    assert_eq!(variants[0].title, "Gadgets");
    assert_eq!(client.query_count(), 1);
}

#[tokio::test]
async fn variants_empty_store() {
    let client = MemoryContentClient::new();
    assert!(fetch_product_variants(&client).await.unwrap().is_empty());
}

// === Latest Blog Post Tests ===

#[tokio::test]
async fn latest_posts_newest_first_and_bounded() {
    let client = store();
    for quantity in 1..=6 {
        let posts = fetch_latest_blog_posts(&client, quantity).await.unwrap();
        assert!(posts.len() <= quantity as usize);
        let dated: Vec<_> = posts.iter().filter_map(|p| p.published_at).collect();
        assert!(dated.windows(2).all(|w| w[0] >= w[1]), "not descending: {:?}", dated);
    }

    let ids: Vec<String> = fetch_latest_blog_posts(&client, 3)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id.into_inner())
        .collect();
    assert_eq!(ids, vec!["echo", "bravo", "charlie"]);
}

#[tokio::test]
async fn latest_posts_undated_sort_last() {
    let client = store();
    let posts = fetch_latest_blog_posts(&client, 10).await.unwrap();
    assert_eq!(posts.len(), 5);
    assert_eq!(posts.last().unwrap().id.as_str(), "delta");
}

#[tokio::test]
async fn latest_posts_expand_categories_to_id_and_title() {
    let client = store();
    let posts = fetch_latest_blog_posts(&client, 10).await.unwrap();
    let alpha = posts.iter().find(|p| p.id.as_str() == "alpha").unwrap();
    let categories = alpha.blogcategories.as_ref().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0], CategoryRef { id: "news".into(), title: "News".into() });
    assert_eq!(categories[1].title, "Guides");
}

#[tokio::test]
async fn latest_posts_keep_absent_and_empty_categories_apart() {
    let client = store();
    let posts = fetch_latest_blog_posts(&client, 10).await.unwrap();
    let by_id = |id: &str| posts.iter().find(|p| p.id.as_str() == id).unwrap();

    assert_eq!(by_id("bravo").blogcategories, Some(vec![]));
    assert_eq!(by_id("charlie").blogcategories, None);
    // A reference to a deleted category is dropped.
    assert_eq!(by_id("echo").category_titles(), vec!["News"]);
}

#[tokio::test]
async fn latest_posts_zero_is_empty_without_round_trip() {
    let client = store();
    let posts = fetch_latest_blog_posts(&client, 0).await.unwrap();
    assert!(posts.is_empty());
    assert_eq!(client.query_count(), 0);
}

#[tokio::test]
async fn latest_posts_reject_large_quantity() {
    let client = store();
    let err = fetch_latest_blog_posts(&client, MAX_BLOG_POSTS + 1).await.unwrap_err();
    assert_eq!(
        err,
        QueryError::InvalidQuantity { requested: 101, max: MAX_BLOG_POSTS }
    );
    assert_eq!(client.query_count(), 0);
}

#[tokio::test]
async fn latest_posts_send_the_documented_query() {
    let client = store();
    fetch_latest_blog_posts(&client, 4).await.unwrap();
    assert_eq!(
        client.queries(),
        vec![r#"*[_type == "blog"] | order(publishedAt desc)[0...4]{ _id, title, slug, mainImage, publishedAt, blogcategories[]->{ _id, title } }"#.to_string()]
    );
}

// === Blog Post Detail Tests ===

#[tokio::test]
async fn post_by_slug_found() {
    let client = store();
    let post = fetch_blog_post_by_slug(&client, "alpha").await.unwrap().unwrap();
    assert_eq!(post.summary.title, "Post alpha");
    assert_eq!(post.author.as_ref().unwrap().name, "Robin");
    assert_eq!(post.body.len(), 1);
}

#[tokio::test]
async fn post_by_slug_missing() {
    let client = store();
    assert!(fetch_blog_post_by_slug(&client, "zulu").await.unwrap().is_none());
}

#[tokio::test]
async fn post_by_slug_rejects_empty() {
    let client = store();
    let err = fetch_blog_post_by_slug(&client, "  ").await.unwrap_err();
    assert!(matches!(err, QueryError::InvalidArgument { name: "slug", .. }));
    assert_eq!(client.query_count(), 0);
}

// === Deal Product Tests ===

#[tokio::test]
async fn deals_are_hot_products_by_name() {
    let client = store();
    let deals = fetch_deal_products(&client).await.unwrap();
    let names: Vec<&str> = deals.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Blender", "Kettle"]);
    assert!(deals.iter().all(|d| d.status == Some(ProductStatus::Hot)));
}

#[tokio::test]
async fn deals_replace_category_references_with_titles() {
    let client = store();
    let deals = fetch_deal_products(&client).await.unwrap();
    assert_eq!(deals[1].categories, vec!["Kitchen", "Home"]);
    assert!(deals[0].categories.is_empty());
}

// === Order Item Tests ===

#[tokio::test]
async fn order_items_expand_products() {
    let client = store();
    let items = fetch_order_items(&client, &DocumentId::new("order-1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].product.as_ref().unwrap().name, "Kettle");
    assert_eq!(items[0].line_total(), 56.0);
    assert!(items[1].product.is_none());
    assert_eq!(items[1].size.as_deref(), Some("L"));
}

#[tokio::test]
async fn order_items_unknown_order() {
    let client = store();
    let items = fetch_order_items(&client, &DocumentId::new("order-404")).await.unwrap();
    assert!(items.is_none());
}

// === Error Propagation Tests ===

#[tokio::test]
async fn client_failures_surface_unchanged() {
    let client = store();
    let failure = ContentError::Transport(FetchError::Timeout(Duration::from_secs(10)));
    client.fail_with(failure.clone());

    let err = fetch_product_variants(&client).await.unwrap_err();
    assert_eq!(err, QueryError::Client(failure.clone()));

    let err = fetch_latest_blog_posts(&client, 3).await.unwrap_err();
    assert_eq!(err.client_error(), Some(&failure));

    let err = fetch_deal_products(&client).await.unwrap_err();
    assert_eq!(err.to_string(), failure.to_string());
}

#[tokio::test]
async fn shape_mismatch_is_a_decode_error() {
    let client = MemoryContentClient::with_documents(vec![json!({
        "_id": "v1", "_type": "productVariant", "title": "No value", "order": "first"
    })]);
    let err = fetch_product_variants(&client).await.unwrap_err();
    assert!(matches!(
        err,
        QueryError::Client(ContentError::Decode { .. })
    ));
}

// === Reel Tests ===

#[tokio::test]
async fn reels_newest_first_with_product() {
    let client = MemoryContentClient::with_documents(vec![
        json!({ "_id": "img-1", "_type": "sanity.imageAsset", "url": "https://cdn/kettle.jpg" }),
        json!({ "_id": "file-1", "_type": "sanity.fileAsset", "url": "https://cdn/r1.mp4" }),
        json!({
            "_id": "p-kettle", "_type": "product", "name": "Kettle", "price": 30,
            "images": [{ "asset": { "_ref": "img-1" } }]
        }),
        json!({
            "_id": "r1", "_type": "productReel", "_createdAt": "2024-05-01T00:00:00Z",
            "video": { "asset": { "_ref": "file-1" } }, "product": { "_ref": "p-kettle" },
            "likes": 3, "tags": ["kitchen"],
            "comments": [{ "user": "a", "text": "nice", "replies": [{ "user": "b", "text": "yes" }] }]
        }),
        json!({ "_id": "r2", "_type": "productReel", "_createdAt": "2024-06-01T00:00:00Z" }),
    ]);

    let reels = fetch_product_reels(&client, 10).await.unwrap();
    assert_eq!(reels[0].id.as_str(), "r2");
    let r1 = &reels[1];
    assert_eq!(r1.video_url.as_deref(), Some("https://cdn/r1.mp4"));
    let product = r1.product.as_ref().unwrap();
    assert_eq!(product.image.as_deref(), Some("https://cdn/kettle.jpg"));
    assert_eq!(r1.comment_count(), 2);

    assert!(fetch_product_reels(&client, MAX_REELS + 1).await.is_err());
}
