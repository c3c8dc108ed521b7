use serde::{Deserialize, Serialize};

use crate::DocumentId;

/// A product family shown in the storefront navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub title: String,
    pub value: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Display position, ascending.
    pub order: i64,
    /// Resolved icon image URL.
    #[serde(default)]
    pub icon: Option<String>,
}
