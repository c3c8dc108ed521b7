//! In-process document store.

use async_trait::async_trait;
use content_groq::GroqQuery;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;

use crate::eval::perspective_view;
use crate::{evaluate, ContentClient, ContentError, Perspective};

/// A content client backed by documents held in memory.
///
/// Built queries are evaluated locally, so the same query functions that talk
/// to the hosted API run unchanged against fixtures. Every query is recorded,
/// and a failure can be injected to exercise error paths.
///
/// Queries see documents through a [`Perspective`], published-only unless
/// set otherwise, matching what the hosted API serves.
#[derive(Debug, Default)]
pub struct MemoryContentClient {
    documents: RwLock<Vec<Value>>,
    perspective: Perspective,
    failure: RwLock<Option<ContentError>>,
    queries: Mutex<Vec<String>>,
}

impl MemoryContentClient {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `documents`.
    pub fn with_documents(documents: Vec<Value>) -> Self {
        let client = Self::new();
        for doc in documents {
            client.insert(doc);
        }
        client
    }

    /// Set which document versions queries see.
    pub fn with_perspective(mut self, perspective: Perspective) -> Self {
        self.perspective = perspective;
        self
    }

    /// The perspective queries run under.
    pub fn perspective(&self) -> Perspective {
        self.perspective
    }

    /// Load documents from a JSON array.
    pub fn from_json(text: &str) -> Result<Self, ContentError> {
        let documents: Vec<Value> = serde_json::from_str(text).map_err(|e| ContentError::Decode {
            target: "document fixture",
            message: e.to_string(),
        })?;
        Ok(Self::with_documents(documents))
    }

    /// Load documents from newline-delimited JSON, as produced by dataset exports.
    pub fn from_ndjson(text: &str) -> Result<Self, ContentError> {
        let client = Self::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let doc: Value = serde_json::from_str(line).map_err(|e| ContentError::Decode {
                target: "document fixture",
                message: format!("line {}: {}", line_no + 1, e),
            })?;
            client.insert(doc);
        }
        Ok(client)
    }

    /// Add a document, replacing any existing document with the same `_id`.
    pub fn insert(&self, document: Value) {
        let mut documents = self.documents.write();
        let id = document.get("_id").and_then(Value::as_str).map(str::to_string);
        if let Some(id) = id {
            if let Some(existing) = documents
                .iter_mut()
                .find(|d| d.get("_id").and_then(Value::as_str) == Some(id.as_str()))
            {
                *existing = document;
                return;
            }
        }
        documents.push(document);
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }

    /// Make every following query fail with `error`.
    pub fn fail_with(&self, error: ContentError) {
        *self.failure.write() = Some(error);
    }

    /// Stop injecting failures.
    pub fn clear_failure(&self) {
        *self.failure.write() = None;
    }

    /// Number of queries received.
    pub fn query_count(&self) -> usize {
        self.queries.lock().len()
    }

    /// Rendered text of every query received, oldest first.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl ContentClient for MemoryContentClient {
    async fn fetch_value(&self, query: &GroqQuery) -> Result<Value, ContentError> {
        self.queries.lock().push(query.to_groq());

        if let Some(err) = self.failure.read().clone() {
            tracing::debug!(query = %query, error = %err, "injected failure");
            return Err(err);
        }

        let documents = self.documents.read();
        let visible = perspective_view(&documents, self.perspective);
        let result = evaluate(query, &visible)?;
        tracing::debug!(query = %query, perspective = self.perspective.as_str(), "memory query");
        Ok(result)
    }
}
