//! Content repository client.
//!
//! This crate provides:
//! - `ContentClient` - "run query, get result" against a content repository
//! - `ContentConfig` - Project, dataset, API version, credentials
//! - `SanityClient` - Client for the hosted HTTP query API
//! - `MemoryContentClient` - In-process document store that evaluates built queries
//! - `fetch` / `fetch_optional` - Typed helpers that decode results at the boundary
//!
//! The client is passed explicitly to whatever runs queries; there is no
//! process-wide instance.

mod client;
mod config;
mod error;
mod eval;
mod memory;
mod sanity;

pub use client::{decode, fetch, fetch_optional, ContentClient};
pub use config::{ContentConfig, Perspective, ENV_PREFIX};
pub use error::ContentError;
pub use eval::evaluate;
pub use memory::MemoryContentClient;
pub use sanity::{QueryResponse, SanityClient};

pub use content_groq as groq;
