//! Transport seam between the content client and the network.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::{FetchError, Method, RequestBuilder, Response, TimeoutConfig};

/// Sends a single HTTP request. Retry and timeout policy live in [`crate::execute`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send the request and return the raw response, whatever its status.
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// Production transport backed by a pooled [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with reqwest defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing client (shares its connection pool).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Create a transport whose connections honour the given connect timeout.
    pub fn with_timeouts(timeout: &TimeoutConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout.connect)
            .user_agent(concat!("content-http/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::RequestError(e.to_string()))?;
        Ok(Self { client })
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
        Method::Head => reqwest::Method::HEAD,
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let url = request.full_url()?;
        let mut builder = self.client.request(to_reqwest_method(request.method), url);

        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(Response::new(status, headers, body))
    }
}
