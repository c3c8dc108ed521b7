//! Deal product listing.

use anyhow::Result;
use content_queries::fetch_deal_products;

use crate::context::Context;
use crate::output::format_price;

/// Run the deals command.
pub async fn run(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let spinner = ctx.output.spinner("Fetching deals...");
    let deals = fetch_deal_products(&*client).await;
    spinner.finish_and_clear();
    let deals = deals?;

    if ctx.output.is_json() {
        ctx.output.json(&deals);
        return Ok(());
    }

    ctx.output.header("Hot deals");
    if deals.is_empty() {
        ctx.output.info("No deal products found.");
        return Ok(());
    }

    let currency = &ctx.config.storefront.currency_symbol;
    let widths = [28, 10, 10, 6, 30];
    ctx.output
        .table_row(&["NAME", "PRICE", "WAS", "STOCK", "CATEGORIES"], &widths);
    for deal in &deals {
        let price = format!("{}{}", currency, format_price(deal.price));
        let was = deal
            .original_price()
            .map(|p| format!("{}{}", currency, format_price(p)))
            .unwrap_or_else(|| "-".to_string());
        let stock = deal.stock.to_string();
        let categories = deal.categories.join(", ");
        ctx.output
            .table_row(&[&deal.name, &price, &was, &stock, &categories], &widths);
    }

    ctx.output.info(&format!("Total: {} product(s)", deals.len()));
    Ok(())
}
