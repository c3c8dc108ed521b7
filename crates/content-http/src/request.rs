//! HTTP request builder.

use crate::FetchError;
use serde::Serialize;
use std::collections::BTreeMap;

/// HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
        }
    }

    /// Whether repeating the request has no additional effect.
    pub fn is_idempotent(&self) -> bool {
        !matches!(self, Method::Post | Method::Patch)
    }
}

/// A builder for constructing HTTP requests.
///
/// The builder is a plain value so it can be cloned and resent on retry.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) headers: BTreeMap<String, String>,
    pub(crate) body: Option<Vec<u8>>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    /// Append a query string pair. Values are percent-encoded on send.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(json);
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }

    /// The HTTP method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The URL without the query string.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Query string pairs in insertion order.
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Look up a query string value by key.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a header value (case-insensitive).
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// The request body, if any.
    pub fn body_bytes(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Full URL with the percent-encoded query string.
    pub fn full_url(&self) -> Result<String, FetchError> {
        let url = reqwest::Url::parse_with_params(&self.url, &self.query)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.url, e)))?;
        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_parts() {
        let req = RequestBuilder::new(Method::Get, "https://example.com/data")
            .query("query", "*[_type == \"blog\"]")
            .accept("application/json")
            .bearer_auth("sk-test");

        assert_eq!(req.method(), Method::Get);
        assert_eq!(req.query_value("query"), Some("*[_type == \"blog\"]"));
        assert_eq!(req.header_value("authorization"), Some("Bearer sk-test"));
        assert_eq!(req.header_value("ACCEPT"), Some("application/json"));
        assert!(req.body_bytes().is_none());
    }

    #[test]
    fn test_full_url_encodes_query() {
        let req = RequestBuilder::new(Method::Get, "https://example.com/q")
            .query("query", "*[a == 1]")
            .query("$slug", "\"hello world\"");

        let url = req.full_url().unwrap();
        assert!(url.starts_with("https://example.com/q?query="));
        assert!(!url.contains(' '));
        assert!(url.contains("%24slug="));
    }

    #[test]
    fn test_full_url_invalid() {
        let req = RequestBuilder::new(Method::Get, "not a url");
        assert!(matches!(req.full_url(), Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let req = RequestBuilder::new(Method::Post, "https://example.com")
            .json(&serde_json::json!({ "a": 1 }))
            .unwrap();

        assert_eq!(req.header_value("content-type"), Some("application/json"));
        assert_eq!(req.body_bytes(), Some(br#"{"a":1}"#.as_slice()));
    }

    #[test]
    fn test_method_idempotence() {
        assert!(Method::Get.is_idempotent());
        assert!(Method::Delete.is_idempotent());
        assert!(!Method::Post.is_idempotent());
        assert_eq!(Method::Patch.as_str(), "PATCH");
    }
}
