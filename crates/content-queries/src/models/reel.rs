use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{null_as_default, nulls_skipped_or_empty};
use crate::{DocumentId, Slug};

/// Product summary shown with a reel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReelProduct {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub name: String,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default)]
    pub price: Option<f64>,
    /// URL of the first product image.
    #[serde(default)]
    pub image: Option<String>,
}

/// A comment on a reel, with nested replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReelComment {
    pub user: String,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: u64,
    #[serde(default, deserialize_with = "nulls_skipped_or_empty")]
    pub replies: Vec<ReelComment>,
}

impl ReelComment {
    /// Replies at every depth.
    pub fn reply_count(&self) -> usize {
        self.replies.iter().map(|r| 1 + r.reply_count()).sum()
    }
}

/// A short product video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReel {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "_createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Resolved video file URL.
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub product: Option<ReelProduct>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub views: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub shares: u64,
    #[serde(default, deserialize_with = "nulls_skipped_or_empty")]
    pub comments: Vec<ReelComment>,
    #[serde(default, deserialize_with = "nulls_skipped_or_empty")]
    pub tags: Vec<String>,
}

impl ProductReel {
    /// Top-level comments plus every reply.
    pub fn comment_count(&self) -> usize {
        self.comments.iter().map(|c| 1 + c.reply_count()).sum()
    }
}
