//! Result records returned by the query functions.

mod blog;
mod order;
mod product;
mod reel;
mod variant;

pub use blog::{AuthorRef, BlogPost, BlogPostSummary, CategoryRef};
pub use order::{OrderItem, OrderedProduct};
pub use product::{DealProduct, ProductStatus};
pub use reel::{ProductReel, ReelComment, ReelProduct};
pub use variant::ProductVariant;

use serde::{Deserialize, Deserializer};

/// Decode an optional array, dropping `null` items left by dangling references.
pub(crate) fn nulls_skipped<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(items.map(|items| items.into_iter().flatten().collect()))
}

/// Like [`nulls_skipped`], with a missing array read as empty.
pub(crate) fn nulls_skipped_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(nulls_skipped(deserializer)?.unwrap_or_default())
}

/// Read `null` as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
