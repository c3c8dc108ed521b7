//! Order item listing.

use anyhow::{bail, Result};
use content_queries::{fetch_order_items, DocumentId};

use super::OrderArgs;
use crate::context::Context;
use crate::output::format_price;

/// Run the order command.
pub async fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let id = DocumentId::new(args.id);
    let items = fetch_order_items(&*client, &id).await?;

    let Some(items) = items else {
        bail!("Order '{}' not found", id);
    };

    if ctx.output.is_json() {
        ctx.output.json(&items);
        return Ok(());
    }

    ctx.output.header(&format!("Order {}", id));
    let currency = &ctx.config.storefront.currency_symbol;
    let widths = [28, 6, 4, 10, 10];
    ctx.output
        .table_row(&["PRODUCT", "QTY", "SIZE", "PRICE", "TOTAL"], &widths);

    let mut total = 0.0;
    for item in &items {
        let name = item
            .product
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("(deleted product)");
        let quantity = item.quantity.to_string();
        let price = format!("{}{}", currency, format_price(item.price));
        let line = format!("{}{}", currency, format_price(item.line_total()));
        ctx.output.table_row(
            &[name, &quantity, item.size.as_deref().unwrap_or("-"), &price, &line],
            &widths,
        );
        total += item.line_total();
    }

    ctx.output
        .kv("Total", &format!("{}{}", currency, format_price(total)));
    Ok(())
}
