//! Identifier and reference types.
//!
//! Newtypes keep document ids and asset ids apart, and the reference,
//! slug and image shapes decode directly from content JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix the content store gives draft document ids.
pub const DRAFTS_PREFIX: &str = "drafts.";

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A content store identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(DocumentId);
define_id!(AssetId);

impl DocumentId {
    /// Whether this is the id of a draft.
    pub fn is_draft(&self) -> bool {
        self.0.starts_with(DRAFTS_PREFIX)
    }

    /// The id of the published version.
    pub fn published(&self) -> DocumentId {
        DocumentId::new(self.0.strip_prefix(DRAFTS_PREFIX).unwrap_or(&self.0))
    }

    /// The id of the draft version.
    pub fn draft(&self) -> DocumentId {
        if self.is_draft() {
            self.clone()
        } else {
            DocumentId::new(format!("{}{}", DRAFTS_PREFIX, self.0))
        }
    }
}

/// An unresolved reference (`{ "_ref": ..., "_type": "reference" }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "_ref")]
    pub id: DocumentId,
    /// Array item key, present when the reference sits in an array.
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "_weak", default, skip_serializing_if = "std::ops::Not::not")]
    pub weak: bool,
}

impl Reference {
    pub fn to(id: impl Into<DocumentId>) -> Self {
        Self {
            id: id.into(),
            key: None,
            weak: false,
        }
    }
}

/// A URL slug (`{ "current": "spring-sale" }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slug {
    pub current: String,
}

impl Slug {
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.current
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.current)
    }
}

/// Reference to an uploaded asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref")]
    pub id: AssetId,
}

/// An image field: an asset reference plus editorial metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<AssetRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl ImageRef {
    /// Image asset ids look like `image-<hash>-<w>x<h>-<format>`.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        let id = self.asset.as_ref()?.id.as_str();
        let mut parts = id.rsplit('-');
        let _format = parts.next()?;
        let (w, h) = parts.next()?.split_once('x')?;
        Some((w.parse().ok()?, h.parse().ok()?))
    }
}
