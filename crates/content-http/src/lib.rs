//! HTTP transport for the storefront content layer.
//!
//! This crate provides:
//! - `RequestBuilder` / `Response` - Plain request and response values
//! - `HttpTransport` - The seam between the content client and the network
//! - `ReqwestTransport` - Production transport backed by `reqwest`
//! - `RetryPolicy` / `TimeoutConfig` - Outbound call policies
//! - `execute` - Send a request under a retry and timeout policy
//!
//! # Example
//!
//! ```rust,ignore
//! use content_http::{execute, Method, ReqwestTransport, RequestBuilder, RetryPolicy, TimeoutConfig};
//!
//! let transport = ReqwestTransport::new();
//! let request = RequestBuilder::new(Method::Get, "https://abc123.api.sanity.io/v2024-01-01/data/query/production")
//!     .query("query", "*[_type == \"blog\"]")
//!     .accept("application/json");
//!
//! let response = execute(&transport, request, &RetryPolicy::default(), &TimeoutConfig::default()).await?;
//! let body: serde_json::Value = response.json()?;
//! ```

mod error;
mod request;
mod response;
mod retry;
mod timeout;
mod transport;

pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use retry::*;
pub use timeout::*;
pub use transport::{HttpTransport, ReqwestTransport};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        execute, FetchError, HttpTransport, Method, RequestBuilder, Response, RetryPolicy,
        TimeoutConfig,
    };
}
