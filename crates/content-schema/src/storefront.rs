//! Storefront schema types.

use crate::{FieldDefinition as Field, FieldType, SchemaError, SchemaSet, SchemaType};

/// Product status values; deals are products marked `hot`.
pub const PRODUCT_STATUSES: &[&str] = &["new", "hot", "sale"];

/// Order status values.
pub const ORDER_STATUSES: &[&str] = &["pending", "processing", "paid", "shipped", "delivered", "cancelled"];

/// A line of an order: a snapshot of what was bought, independent of the
/// product's current values.
pub fn order_item() -> SchemaType {
    SchemaType::object("orderItem")
        .field(Field::new("product", FieldType::reference("product")).required())
        .field(Field::new("quantity", FieldType::Number).required().integer().min(1.0))
        .field(Field::new("size", FieldType::String))
        .field(
            Field::new("price", FieldType::Number)
                .required()
                .min(0.0)
                .with_description("Unit price at the time of the order"),
        )
        .preview("product.name", Some("quantity"), Some("product.images.0"))
}

pub fn order() -> SchemaType {
    SchemaType::document("order")
        .field(Field::new("orderNumber", FieldType::String).required())
        .field(Field::new("customerName", FieldType::String).required())
        .field(Field::new("email", FieldType::String).required())
        .field(
            Field::new("items", FieldType::array_of(FieldType::Object("orderItem".into())))
                .required()
                .min(1.0),
        )
        .field(Field::new("totalPrice", FieldType::Number).required().min(0.0))
        .field(Field::new("currency", FieldType::String))
        .field(Field::new("amountDiscount", FieldType::Number).min(0.0))
        .field(Field::new("status", FieldType::String).one_of(ORDER_STATUSES))
        .field(Field::new("orderDate", FieldType::Datetime).required())
        .preview("customerName", Some("orderNumber"), None)
}

pub fn product() -> SchemaType {
    SchemaType::document("product")
        .field(Field::new("name", FieldType::String).required())
        .field(Field::new("slug", FieldType::slug_from("name")).required())
        .field(Field::new("images", FieldType::array_of(FieldType::Image)))
        .field(Field::new("intro", FieldType::String))
        .field(Field::new("description", FieldType::Text))
        .field(Field::new("price", FieldType::Number).required().min(0.0))
        .field(Field::new("discount", FieldType::Number).min(0.0).max(100.0))
        .field(Field::new(
            "categories",
            FieldType::array_of(FieldType::reference("category")),
        ))
        .field(Field::new("stock", FieldType::Number).integer().min(0.0))
        .field(Field::new("variant", FieldType::reference("productVariant")))
        .field(Field::new("status", FieldType::String).one_of(PRODUCT_STATUSES))
        .preview("name", Some("price"), Some("images.0"))
}

pub fn category() -> SchemaType {
    SchemaType::document("category")
        .field(Field::new("title", FieldType::String).required())
        .field(Field::new("slug", FieldType::slug_from("title")).required())
        .field(Field::new("description", FieldType::Text))
        .field(Field::new("image", FieldType::Image))
}

/// Storefront navigation entry for a product family (gadgets, appliances, ...).
pub fn product_variant() -> SchemaType {
    SchemaType::document("productVariant")
        .field(Field::new("title", FieldType::String).required())
        .field(Field::new("value", FieldType::String).required())
        .field(Field::new("description", FieldType::Text))
        .field(
            Field::new("order", FieldType::Number)
                .required()
                .integer()
                .with_description("Display position, ascending"),
        )
        .field(Field::new("icon", FieldType::Image))
        .preview("title", Some("value"), Some("icon"))
}

pub fn blog() -> SchemaType {
    SchemaType::document("blog")
        .with_title("Blog Post")
        .field(Field::new("title", FieldType::String).required())
        .field(Field::new("slug", FieldType::slug_from("title")).required())
        .field(Field::new("author", FieldType::reference("author")))
        .field(Field::new("mainImage", FieldType::Image))
        .field(Field::new(
            "blogcategories",
            FieldType::array_of(FieldType::reference("blogcategory")),
        ).with_title("Blog Categories"))
        .field(Field::new("publishedAt", FieldType::Datetime))
        .field(Field::new("isLatest", FieldType::Boolean))
        .field(Field::new("body", FieldType::BlockContent))
        .preview("title", Some("author.name"), Some("mainImage"))
}

pub fn blog_category() -> SchemaType {
    SchemaType::document("blogcategory")
        .with_title("Blog Category")
        .field(Field::new("title", FieldType::String).required())
        .field(Field::new("slug", FieldType::slug_from("title")))
        .field(Field::new("description", FieldType::Text))
}

pub fn author() -> SchemaType {
    SchemaType::document("author")
        .field(Field::new("name", FieldType::String).required())
        .field(Field::new("slug", FieldType::slug_from("name")))
        .field(Field::new("image", FieldType::Image))
        .field(Field::new("bio", FieldType::BlockContent))
        .preview("name", None, Some("image"))
}

/// A comment on a reel. Replies nest to any depth.
pub fn reel_comment() -> SchemaType {
    SchemaType::object("reelComment")
        .field(Field::new("user", FieldType::String).required())
        .field(Field::new("text", FieldType::String).required().max_length(500))
        .field(Field::new("createdAt", FieldType::Datetime))
        .field(Field::new("likes", FieldType::Number).integer().min(0.0))
        .field(Field::new(
            "replies",
            FieldType::array_of(FieldType::Object("reelComment".into())),
        ))
}

pub fn product_reel() -> SchemaType {
    SchemaType::document("productReel")
        .field(Field::new("title", FieldType::String))
        .field(Field::new("video", FieldType::File).required())
        .field(Field::new("product", FieldType::reference("product")).required())
        .field(Field::new("likes", FieldType::Number).integer().min(0.0))
        .field(Field::new("views", FieldType::Number).integer().min(0.0))
        .field(Field::new("shares", FieldType::Number).integer().min(0.0))
        .field(Field::new(
            "comments",
            FieldType::array_of(FieldType::Object("reelComment".into())),
        ))
        .field(Field::new("tags", FieldType::array_of(FieldType::String)))
        .preview("title", Some("product.name"), None)
}

/// Every storefront type, objects first.
pub fn storefront_types() -> Vec<SchemaType> {
    vec![
        order_item(),
        reel_comment(),
        order(),
        product(),
        category(),
        product_variant(),
        blog(),
        blog_category(),
        author(),
        product_reel(),
    ]
}

/// The storefront schema set as registered with the studio.
pub fn storefront_schema() -> Result<SchemaSet, SchemaError> {
    SchemaSet::from_types(storefront_types())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> SchemaSet {
        storefront_schema().unwrap()
    }

    fn valid_item() -> serde_json::Value {
        json!({
            "_type": "orderItem",
            "product": { "_type": "reference", "_ref": "product-1" },
            "quantity": 2,
            "size": "M",
            "price": 19.99
        })
    }

    // === Order Item Tests ===

    #[test]
    fn test_order_item_valid() {
        let issues = schema().validate_value("orderItem", &valid_item()).unwrap();
        assert!(issues.is_empty(), "{:?}", issues);
    }

    #[test]
    fn test_order_item_size_optional() {
        let mut item = valid_item();
        item.as_object_mut().unwrap().remove("size");
        assert!(schema().validate_value("orderItem", &item).unwrap().is_empty());
    }

    #[test]
    fn test_order_item_missing_product() {
        let mut item = valid_item();
        item.as_object_mut().unwrap().remove("product");
        let issues = schema().validate_value("orderItem", &item).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "product");
        assert_eq!(issues[0].message, "is required");
    }

    #[test]
    fn test_order_item_quantity_rules() {
        let mut item = valid_item();
        item["quantity"] = json!(0);
        let issues = schema().validate_value("orderItem", &item).unwrap();
        assert_eq!(issues[0].to_string(), "quantity: must be at least 1");

        item["quantity"] = json!(1.5);
        let issues = schema().validate_value("orderItem", &item).unwrap();
        assert_eq!(issues[0].to_string(), "quantity: must be a whole number");
    }

    #[test]
    fn test_order_item_negative_price() {
        let mut item = valid_item();
        item["price"] = json!(-1);
        let issues = schema().validate_value("orderItem", &item).unwrap();
        assert_eq!(issues[0].to_string(), "price: must be at least 0");
    }

    #[test]
    fn test_order_item_wrong_types() {
        let item = json!({ "product": "product-1", "quantity": "two", "price": 5 });
        let issues = schema().validate_value("orderItem", &item).unwrap();
        let paths: Vec<&str> = issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["product", "quantity"]);
    }

    // === Order Tests ===

    #[test]
    fn test_order_reports_item_issues_with_paths() {
        let mut bad = valid_item();
        bad["quantity"] = json!(0);
        let order = json!({
            "_type": "order",
            "_id": "order-1",
            "orderNumber": "A-1001",
            "customerName": "Sam",
            "email": "sam@example.com",
            "items": [valid_item(), bad],
            "totalPrice": 39.98,
            "status": "paid",
            "orderDate": "2024-05-01T10:00:00Z"
        });
        let issues = schema().validate_document(&order).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "items[1].quantity");
    }

    #[test]
    fn test_order_requires_items() {
        let order = json!({
            "_type": "order",
            "orderNumber": "A-1002",
            "customerName": "Sam",
            "email": "sam@example.com",
            "items": [],
            "totalPrice": 0,
            "status": "lost",
            "orderDate": "yesterday"
        });
        let issues = schema().validate_document(&order).unwrap();
        let text: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
        assert!(text.contains(&"items: must be at least 1".to_string()));
        assert!(text.iter().any(|t| t.starts_with("status: must be one of")));
        assert!(text.contains(&"orderDate: must be an ISO-8601 datetime".to_string()));
    }

    // === Set Tests ===

    #[test]
    fn test_storefront_set_registers_all_types() {
        let set = schema();
        for name in [
            "orderItem",
            "order",
            "product",
            "productVariant",
            "blog",
            "blogcategory",
            "author",
            "productReel",
        ] {
            assert!(set.get(name).is_some(), "missing {}", name);
        }
        assert_eq!(set.documents().count(), 8);
    }

    #[test]
    fn test_order_items_field_export() {
        let json = schema().get("order").unwrap().to_studio_json();
        let items = json["fields"]
            .as_array()
            .unwrap()
            .iter()
            .find(|f| f["name"] == "items")
            .unwrap()
            .clone();
        assert_eq!(items["of"], json!([{ "type": "orderItem" }]));
    }

    #[test]
    fn test_nested_reel_comment_replies() {
        let reel = json!({
            "_type": "productReel",
            "video": { "asset": { "_ref": "file-1" } },
            "product": { "_ref": "product-1" },
            "comments": [{
                "user": "a",
                "text": "nice",
                "replies": [{ "user": "b", "text": "" }]
            }]
        });
        let issues = schema().validate_document(&reel).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "comments[0].replies[0].text");
    }
}
