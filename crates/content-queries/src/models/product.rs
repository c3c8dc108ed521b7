use serde::{Deserialize, Serialize};

use super::{null_as_default, nulls_skipped_or_empty};
use crate::{DocumentId, ImageRef, Reference, Slug};

/// Merchandising status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    New,
    /// Shown on the deals page.
    Hot,
    Sale,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::New => "new",
            ProductStatus::Hot => "hot",
            ProductStatus::Sale => "sale",
        }
    }
}

/// A product on the deals page: every product field, with category
/// references replaced by their titles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealProduct {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub name: String,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default, deserialize_with = "nulls_skipped_or_empty")]
    pub images: Vec<ImageRef>,
    #[serde(default)]
    pub intro: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    /// Percentage shown as savings against the price.
    #[serde(default)]
    pub discount: Option<f64>,
    #[serde(default, deserialize_with = "nulls_skipped_or_empty")]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock: i64,
    #[serde(default)]
    pub status: Option<ProductStatus>,
    #[serde(default)]
    pub variant: Option<Reference>,
}

impl DealProduct {
    /// Price before the discount, rounded to cents.
    pub fn original_price(&self) -> Option<f64> {
        let discount = self.discount.filter(|d| *d > 0.0)?;
        Some(((self.price + self.price * discount / 100.0) * 100.0).round() / 100.0)
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Path of the product page.
    pub fn href(&self) -> Option<String> {
        self.slug.as_ref().map(|s| format!("/product/{}", s.current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn deal() -> DealProduct {
        serde_json::from_value(json!({
            "_id": "p1",
            "_type": "product",
            "_createdAt": "2024-01-01T00:00:00Z",
            "name": "Air Fryer",
            "slug": { "_type": "slug", "current": "air-fryer" },
            "price": 80,
            "discount": 25,
            "stock": null,
            "status": "hot",
            "categories": ["Kitchen", null, "Appliances"]
        }))
        .unwrap()
    }

    #[test]
    fn test_decode_spread_product() {
        let product = deal();
        assert_eq!(product.status, Some(ProductStatus::Hot));
        assert_eq!(product.categories, vec!["Kitchen", "Appliances"]);
        assert_eq!(product.stock, 0);
        assert!(!product.in_stock());
        assert_eq!(product.href().as_deref(), Some("/product/air-fryer"));
    }

    #[test]
    fn test_original_price() {
        assert_eq!(deal().original_price(), Some(100.0));

        let mut no_discount = deal();
        no_discount.discount = Some(0.0);
        assert_eq!(no_discount.original_price(), None);
    }
}
