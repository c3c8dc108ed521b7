//! Product variant listing.

use anyhow::Result;
use content_queries::fetch_product_variants;

use crate::context::Context;

/// Run the variants command.
pub async fn run(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let spinner = ctx.output.spinner("Fetching product variants...");
    let variants = fetch_product_variants(&*client).await;
    spinner.finish_and_clear();
    let variants = variants?;

    if ctx.output.is_json() {
        ctx.output.json(&variants);
        return Ok(());
    }

    ctx.output.header("Product variants");
    if variants.is_empty() {
        ctx.output.info("No product variants found.");
        return Ok(());
    }

    let widths = [6, 24, 20, 40];
    ctx.output.table_row(&["ORDER", "TITLE", "VALUE", "ICON"], &widths);
    for v in &variants {
        let order = v.order.to_string();
        ctx.output.table_row(
            &[&order, &v.title, &v.value, v.icon.as_deref().unwrap_or("-")],
            &widths,
        );
    }

    Ok(())
}
