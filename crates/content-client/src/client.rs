//! The content client seam.

use async_trait::async_trait;
use content_groq::GroqQuery;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ContentError;

/// Runs queries against a content repository.
///
/// Implementations return the query's `result` as untyped JSON; callers decode
/// it into a record type with [`fetch`] so shape mismatches surface here.
#[async_trait]
pub trait ContentClient: Send + Sync {
    /// Run a query and return its result.
    async fn fetch_value(&self, query: &GroqQuery) -> Result<Value, ContentError>;
}

/// Decode a query result into `T`.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ContentError> {
    serde_json::from_value(value).map_err(|e| ContentError::Decode {
        target: std::any::type_name::<T>(),
        message: e.to_string(),
    })
}

/// Run a query and decode its result.
pub async fn fetch<T, C>(client: &C, query: &GroqQuery) -> Result<T, ContentError>
where
    T: DeserializeOwned,
    C: ContentClient + ?Sized,
{
    let value = client.fetch_value(query).await?;
    decode(value)
}

/// Run a single-document query; a null result becomes `None`.
pub async fn fetch_optional<T, C>(client: &C, query: &GroqQuery) -> Result<Option<T>, ContentError>
where
    T: DeserializeOwned,
    C: ContentClient + ?Sized,
{
    match client.fetch_value(query).await? {
        Value::Null => Ok(None),
        value => decode(value).map(Some),
    }
}
