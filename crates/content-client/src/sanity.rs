//! Client for the hosted HTTP query API.

use std::time::Instant;

use async_trait::async_trait;
use content_groq::GroqQuery;
use content_http::{
    execute, HttpTransport, Method, ReqwestTransport, RequestBuilder, Response, RetryPolicy,
    TimeoutConfig,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{ContentClient, ContentConfig, ContentError};

/// Successful query response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    /// Query text echoed back by the server.
    #[serde(default)]
    pub query: Option<String>,
    /// The query result.
    #[serde(default)]
    pub result: Value,
    /// Server-side execution time.
    #[serde(default)]
    pub ms: Option<u64>,
}

/// HTTP client for a content project's query endpoint.
pub struct SanityClient<T = ReqwestTransport> {
    config: ContentConfig,
    transport: T,
    retry: RetryPolicy,
    timeout: TimeoutConfig,
}

impl SanityClient<ReqwestTransport> {
    /// Create a client with a pooled `reqwest` transport.
    pub fn new(config: ContentConfig) -> Result<Self, ContentError> {
        let timeout = TimeoutConfig::from_millis(config.timeout_ms);
        let transport = ReqwestTransport::with_timeouts(&timeout)?;
        Self::with_transport(config, transport)
    }
}

impl<T: HttpTransport> SanityClient<T> {
    /// Create a client over any transport.
    pub fn with_transport(config: ContentConfig, transport: T) -> Result<Self, ContentError> {
        config.validate()?;
        Ok(Self {
            retry: RetryPolicy::new(config.max_retries),
            timeout: TimeoutConfig::from_millis(config.timeout_ms),
            config,
            transport,
        })
    }

    /// Override the retry policy derived from the configuration.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// The client configuration.
    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the HTTP request for a query.
    pub fn build_request(&self, query: &GroqQuery) -> RequestBuilder {
        let mut request = RequestBuilder::new(Method::Get, self.config.query_endpoint())
            .query("query", query.to_groq());

        for (name, value) in query.params().to_query_pairs() {
            request = request.query(name, value);
        }

        request = request
            .query("perspective", self.config.perspective.as_str())
            .accept("application/json");

        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }
        request
    }
}

/// Turn a non-2xx response into an API error, reading whichever error shape the server used.
fn api_error(response: &Response) -> ContentError {
    let body: Value = response.json().unwrap_or(Value::Null);

    let (kind, description) = match body.get("error") {
        // {"error": {"type": "queryParseError", "description": "..."}}
        Some(Value::Object(err)) => (
            err.get("type").and_then(Value::as_str).unwrap_or("error").to_string(),
            err.get("description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        ),
        // {"statusCode": 401, "error": "Unauthorized", "message": "..."}
        Some(Value::String(kind)) => (
            kind.clone(),
            body.get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        ),
        _ => (
            "http".to_string(),
            response.text().unwrap_or_default(),
        ),
    };

    ContentError::Api {
        status: response.status,
        kind,
        description,
    }
}

#[async_trait]
impl<T: HttpTransport> ContentClient for SanityClient<T> {
    async fn fetch_value(&self, query: &GroqQuery) -> Result<Value, ContentError> {
        query.validate()?;

        let request = self.build_request(query);
        let started = Instant::now();
        let response = execute(&self.transport, request, &self.retry, &self.timeout).await?;

        if !response.is_success() {
            let err = api_error(&response);
            tracing::debug!(status = response.status, error = %err, "content query failed");
            return Err(err);
        }

        let envelope: QueryResponse = response.json().map_err(|e| ContentError::Decode {
            target: "query response",
            message: e.to_string(),
        })?;

        tracing::debug!(
            query = %query,
            elapsed_ms = started.elapsed().as_millis() as u64,
            server_ms = envelope.ms,
            results = result_len(&envelope.result),
            "content query"
        );

        Ok(envelope.result)
    }
}

fn result_len(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.len(),
        Value::Null => 0,
        _ => 1,
    }
}
