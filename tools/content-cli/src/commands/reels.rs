//! Product reel listing.

use anyhow::Result;
use content_queries::error::checked_quantity;
use content_queries::{fetch_product_reels, MAX_REELS};

use super::ReelsArgs;
use crate::context::Context;

/// Run the reels command.
pub async fn run(args: ReelsArgs, ctx: &Context) -> Result<()> {
    let limit = checked_quantity(args.limit, MAX_REELS)?;
    let client = ctx.client()?;

    let spinner = ctx.output.spinner("Fetching reels...");
    let reels = fetch_product_reels(&*client, limit).await;
    spinner.finish_and_clear();
    let reels = reels?;

    if ctx.output.is_json() {
        ctx.output.json(&reels);
        return Ok(());
    }

    ctx.output.header("Product reels");
    if reels.is_empty() {
        ctx.output.info("No reels found.");
        return Ok(());
    }

    let widths = [24, 24, 7, 7, 9];
    ctx.output
        .table_row(&["REEL", "PRODUCT", "LIKES", "VIEWS", "COMMENTS"], &widths);
    for reel in &reels {
        let title = reel.title.as_deref().unwrap_or(reel.id.as_str());
        let product = reel.product.as_ref().map(|p| p.name.as_str()).unwrap_or("-");
        let likes = reel.likes.to_string();
        let views = reel.views.to_string();
        let comments = reel.comment_count().to_string();
        ctx.output
            .table_row(&[title, product, &likes, &views, &comments], &widths);
    }

    Ok(())
}
