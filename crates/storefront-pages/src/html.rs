//! HTML rendering of the storefront components.

use content_queries::{BlogPostSummary, DealProduct, ProductVariant};

use crate::Presentation;

/// Renders components as HTML strings. CMS text is escaped.
#[derive(Debug, Clone)]
pub struct HtmlPresentation {
    currency_symbol: String,
}

impl Default for HtmlPresentation {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlPresentation {
    pub fn new() -> Self {
        Self {
            currency_symbol: "$".to_string(),
        }
    }

    /// Use a different currency symbol for prices.
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    fn price(&self, amount: f64) -> String {
        format!("{}{:.2}", html_escape(&self.currency_symbol), amount)
    }

    fn product_card(&self, product: &DealProduct) -> String {
        let href = product.href().unwrap_or_else(|| "#".to_string());

        let original = product
            .original_price()
            .map(|p| format!(r#" <span class="price-original">{}</span>"#, self.price(p)))
            .unwrap_or_default();

        let badge = match (product.discount, product.status) {
            (Some(d), _) if d > 0.0 => format!(r#"<span class="badge badge-discount">-{:.0}%</span>"#, d),
            (_, Some(status)) => format!(r#"<span class="badge badge-{0}">{0}</span>"#, status.as_str()),
            _ => String::new(),
        };

        let categories = if product.categories.is_empty() {
            String::new()
        } else {
            let names: Vec<String> = product.categories.iter().map(|c| html_escape(c)).collect();
            format!(r#"<p class="product-categories">{}</p>"#, names.join(", "))
        };

        let stock = if product.in_stock() {
            format!(r#"<span class="stock in-stock">{} in stock</span>"#, product.stock)
        } else {
            r#"<span class="stock out-of-stock">Out of stock</span>"#.to_string()
        };

        format!(
            r#"<article class="product-card" data-product-id="{id}">
    {badge}
    <a href="{href}"><h3 class="product-name">{name}</h3></a>
    {categories}
    <p class="product-price"><span class="price">{price}</span>{original}</p>
    {stock}
</article>"#,
            id = html_escape(product.id.as_str()),
            href = html_escape(&href),
            name = html_escape(&product.name),
            price = self.price(product.price),
        )
    }
}

impl Presentation for HtmlPresentation {
    type Output = String;

    fn container(&self, children: Vec<String>) -> String {
        format!(
            r#"<div class="container">
{}
</div>"#,
            children.join("\n")
        )
    }

    fn title(&self, text: &str) -> String {
        format!(r#"<h2 class="title">{}</h2>"#, html_escape(text))
    }

    fn product_grid(&self, products: &[DealProduct]) -> String {
        if products.is_empty() {
            return r#"<section class="product-grid" data-section="products">
    <p class="empty">No products found.</p>
</section>"#
                .to_string();
        }

        let cards: Vec<String> = products.iter().map(|p| self.product_card(p)).collect();
        format!(
            r#"<section class="product-grid" data-section="products">
{}
</section>"#,
            cards.join("\n")
        )
    }

    fn variant_list(&self, variants: &[ProductVariant]) -> String {
        let items: String = variants
            .iter()
            .map(|v| {
                let icon = v
                    .icon
                    .as_ref()
                    .map(|url| format!(r#"<img src="{}" alt="" class="variant-icon">"#, html_escape(url)))
                    .unwrap_or_default();
                format!(
                    r#"<li class="variant" data-variant="{}">{}<span>{}</span></li>"#,
                    html_escape(&v.value),
                    icon,
                    html_escape(&v.title)
                )
            })
            .collect();

        format!(
            r#"<nav class="variant-list" data-section="variants">
    <ul>{}</ul>
</nav>"#,
            items
        )
    }

    fn blog_list(&self, posts: &[BlogPostSummary]) -> String {
        let cards: String = posts
            .iter()
            .map(|post| {
                let href = post.href().unwrap_or_else(|| "#".to_string());
                let date = post
                    .published_at
                    .map(|at| {
                        format!(
                            r#"<time datetime="{}">{}</time>"#,
                            at.to_rfc3339(),
                            at.format("%B %-d, %Y")
                        )
                    })
                    .unwrap_or_default();
                let categories: String = post
                    .category_titles()
                    .iter()
                    .map(|t| format!(r#"<span class="tag">{}</span>"#, html_escape(t)))
                    .collect();

                format!(
                    r#"<article class="blog-card">
    <div class="blog-meta">{categories}{date}</div>
    <a href="{href}"><h3>{title}</h3></a>
</article>"#,
                    href = html_escape(&href),
                    title = html_escape(&post.title),
                )
            })
            .collect();

        format!(
            r#"<section class="blog-list" data-section="blog">
{}
</section>"#,
            cards
        )
    }
}

/// Wrap a rendered body in a complete HTML document.
pub fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{}</title>
</head>
<body>
{}
</body>
</html>"#,
        html_escape(title),
        body
    )
}

/// Escape text for HTML content and attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
