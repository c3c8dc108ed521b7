use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{nulls_skipped, nulls_skipped_or_empty};
use crate::{DocumentId, ImageRef, Slug};

/// A category expanded inside a post summary: exactly `_id` and `title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryRef {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub title: String,
}

/// Listing projection of a blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostSummary {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub title: String,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default)]
    pub main_image: Option<ImageRef>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// `None` when the post has no categories field at all; `Some(vec![])`
    /// when the field is present but empty.
    #[serde(default, deserialize_with = "nulls_skipped")]
    pub blogcategories: Option<Vec<CategoryRef>>,
}

impl BlogPostSummary {
    /// Category titles in document order.
    pub fn category_titles(&self) -> Vec<&str> {
        self.blogcategories
            .iter()
            .flatten()
            .map(|c| c.title.as_str())
            .collect()
    }

    /// Path of the post page.
    pub fn href(&self) -> Option<String> {
        self.slug.as_ref().map(|s| format!("/blog/{}", s.current))
    }
}

/// Author expanded inside a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRef {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub name: String,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

/// A full blog post: the summary plus author and body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    #[serde(flatten)]
    pub summary: BlogPostSummary,
    #[serde(default)]
    pub author: Option<AuthorRef>,
    /// Rich-text blocks, passed through untouched.
    #[serde(default, deserialize_with = "nulls_skipped_or_empty")]
    pub body: Vec<Value>,
}
