//! Page rendering.

use anyhow::{Context as _, Result};
use content_client::ContentClient;
use content_queries::error::checked_quantity;
use content_queries::MAX_BLOG_POSTS;
use storefront_pages::{document, BlogIndexPage, DealsPage, HomePage, HtmlPresentation};

use super::{PageKind, RenderArgs};
use crate::context::Context;

/// Run the render command.
pub async fn run(args: RenderArgs, ctx: &Context) -> Result<()> {
    let quantity = checked_quantity(args.quantity, MAX_BLOG_POSTS)?;
    let client = ctx.client()?;
    let presentation =
        HtmlPresentation::new().with_currency_symbol(&ctx.config.storefront.currency_symbol);

    let spinner = ctx.output.spinner("Rendering page...");
    let rendered = render_page(&*client, args.page, quantity, &presentation).await;
    spinner.finish_and_clear();
    let (title, body) = rendered?;

    let html = if args.fragment {
        body
    } else {
        document(title, &body)
    };

    match args.output {
        Some(path) => {
            let path = ctx.resolve_path(&path);
            std::fs::write(&path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            ctx.output.success(&format!("Wrote {}", path.display()));
        }
        None => println!("{}", html),
    }
    Ok(())
}

/// Load a page and render its body. Returns the document title and the body.
pub async fn render_page<C>(
    client: &C,
    page: PageKind,
    quantity: u32,
    presentation: &HtmlPresentation,
) -> Result<(&'static str, String)>
where
    C: ContentClient + ?Sized,
{
    let rendered = match page {
        PageKind::Home => ("Home", HomePage::load(client).await?.render(presentation)),
        PageKind::Deals => (
            DealsPage::TITLE,
            DealsPage::load(client).await?.render(presentation),
        ),
        PageKind::Blog => (
            BlogIndexPage::TITLE,
            BlogIndexPage::load(client, quantity)
                .await?
                .render(presentation),
        ),
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_client::MemoryContentClient;
    use serde_json::json;

    fn store() -> MemoryContentClient {
        MemoryContentClient::with_documents(vec![
            json!({ "_id": "v1", "_type": "productVariant", "title": "Gadgets", "value": "gadgets", "order": 1 }),
            json!({ "_id": "p1", "_type": "product", "name": "Kettle", "price": 30, "status": "hot" }),
            json!({
                "_id": "b1", "_type": "blog", "title": "Hello",
                "slug": { "current": "hello" }, "publishedAt": "2024-01-01T00:00:00Z"
            }),
        ])
    }

    #[tokio::test]
    async fn test_render_deals() {
        let client = store();
        let presentation = HtmlPresentation::new().with_currency_symbol("£");
        let (title, body) = render_page(&client, PageKind::Deals, 0, &presentation)
            .await
            .unwrap();
        assert_eq!(title, "Hot Deals of the Week");
        assert!(body.contains("Kettle"));
        assert!(body.contains("£30.00"));
    }

    #[tokio::test]
    async fn test_render_home_and_blog() {
        let client = store();
        let presentation = HtmlPresentation::new();

        let (_, home) = render_page(&client, PageKind::Home, 0, &presentation)
            .await
            .unwrap();
        assert!(home.contains("Gadgets"));
        assert!(home.contains(r#"href="/blog/hello""#));

        let (title, blog) = render_page(&client, PageKind::Blog, 0, &presentation)
            .await
            .unwrap();
        assert_eq!(title, "Our Blog");
        assert!(!blog.contains("Hello"));
    }

    #[tokio::test]
    async fn test_render_surfaces_fetch_errors() {
        let client = store();
        client.fail_with(content_client::ContentError::Config("offline".into()));
        let result = render_page(&client, PageKind::Home, 0, &HtmlPresentation::new()).await;
        assert!(result.is_err());
    }
}
