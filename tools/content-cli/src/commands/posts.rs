//! Blog post commands.

use anyhow::{bail, Result};
use content_queries::error::checked_quantity;
use content_queries::{fetch_blog_post_by_slug, fetch_latest_blog_posts, MAX_BLOG_POSTS};

use super::{PostArgs, PostsArgs};
use crate::context::Context;

/// Run the posts command.
pub async fn run(args: PostsArgs, ctx: &Context) -> Result<()> {
    let quantity = checked_quantity(args.quantity, MAX_BLOG_POSTS)?;
    let client = ctx.client()?;

    let spinner = ctx.output.spinner("Fetching blog posts...");
    let posts = fetch_latest_blog_posts(&*client, quantity).await;
    spinner.finish_and_clear();
    let posts = posts?;

    if ctx.output.is_json() {
        ctx.output.json(&posts);
        return Ok(());
    }

    ctx.output.header("Latest blog posts");
    if posts.is_empty() {
        ctx.output.info("No blog posts found.");
        return Ok(());
    }

    let widths = [12, 40, 30];
    ctx.output.table_row(&["PUBLISHED", "TITLE", "CATEGORIES"], &widths);
    for post in &posts {
        let date = post
            .published_at
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        let categories = post.category_titles().join(", ");
        ctx.output
            .table_row(&[&date, &post.title, &categories], &widths);
    }

    Ok(())
}

/// Run the post command.
pub async fn show(args: PostArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let Some(post) = fetch_blog_post_by_slug(&*client, &args.slug).await? else {
        bail!("No blog post with slug '{}'", args.slug);
    };

    if ctx.output.is_json() {
        ctx.output.json(&post);
        return Ok(());
    }

    let summary = &post.summary;
    ctx.output.header(&summary.title);
    ctx.output.kv("id", summary.id.as_str());
    if let Some(author) = &post.author {
        ctx.output.kv("author", &author.name);
    }
    if let Some(at) = summary.published_at {
        ctx.output.kv("published", &at.to_rfc3339());
    }
    let categories = summary.category_titles();
    if !categories.is_empty() {
        ctx.output.kv("categories", &categories.join(", "));
    }
    if let Some(href) = summary.href() {
        ctx.output.kv("path", &href);
    }
    ctx.output.kv("blocks", &post.body.len().to_string());

    Ok(())
}
