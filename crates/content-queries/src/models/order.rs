use serde::{Deserialize, Serialize};

use crate::DocumentId;

/// The product an order line points at, as currently stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedProduct {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub name: String,
}

/// One line of an order. Quantity, size and price are a snapshot taken
/// when the order was placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    /// `None` when the product has since been deleted.
    #[serde(default)]
    pub product: Option<OrderedProduct>,
    pub quantity: u32,
    #[serde(default)]
    pub size: Option<String>,
    /// Unit price at the time of the order.
    pub price: f64,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}
