use content_client::{fetch_optional, ContentClient};
use content_groq::{FieldPath, Filter, GroqQuery, Operand, Projection, Slice};
use serde::Deserialize;
use serde_json::Value;

use crate::{DocumentId, OrderItem, QueryError};

/// The `items` of one order, each with its product expanded to `_id` and `name`.
pub fn order_items_query(order_id: &DocumentId) -> Result<GroqQuery, QueryError> {
    let item = Projection::new().spread().nested(
        "product",
        FieldPath::attr("product").deref(),
        Projection::new().fields(&["_id", "name"]),
    );

    let query = GroqQuery::of_type("order")
        .filter(Filter::eq(FieldPath::attr("_id"), Operand::param("id")))
        .slice(Slice::first())
        .project(Projection::new().nested("items", FieldPath::attr("items").each(), item))
        .param("id", Value::String(order_id.to_string()))
        .map_err(content_client::ContentError::from)?;
    Ok(query)
}

#[derive(Deserialize)]
struct OrderItems {
    #[serde(default, deserialize_with = "crate::models::nulls_skipped_or_empty")]
    items: Vec<OrderItem>,
}

/// Line items of an order, or `None` if the order does not exist.
#[tracing::instrument(level = "debug", skip(client, order_id), fields(order = %order_id))]
pub async fn fetch_order_items<C>(
    client: &C,
    order_id: &DocumentId,
) -> Result<Option<Vec<OrderItem>>, QueryError>
where
    C: ContentClient + ?Sized,
{
    let order: Option<OrderItems> = fetch_optional(client, &order_items_query(order_id)?).await?;
    Ok(order.map(|o| o.items))
}
