//! Query assembly and rendering.

use std::fmt;

use serde_json::Value;

use crate::{Direction, FieldPath, Filter, GroqError, Ordering, Projection, QueryParams};

/// Restricts the result to one element or a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    /// `[n]`: a single document (or null).
    Index(usize),
    /// `[start...end]`: end-exclusive range.
    Range { start: usize, end: usize },
}

impl Slice {
    /// The first document.
    pub fn first() -> Self {
        Slice::Index(0)
    }

    /// End-exclusive range.
    pub fn range(start: usize, end: usize) -> Self {
        Slice::Range { start, end }
    }

    /// The first `n` documents.
    pub fn take(n: usize) -> Self {
        Slice::Range { start: 0, end: n }
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slice::Index(i) => write!(f, "[{}]", i),
            Slice::Range { start, end } => write!(f, "[{}...{}]", start, end),
        }
    }
}

/// A GROQ query over the document set, plus its parameter bindings.
///
/// Built queries keep their structure; raw queries carry text only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroqQuery {
    filters: Vec<Filter>,
    ordering: Vec<Ordering>,
    slice: Option<Slice>,
    projection: Option<Projection>,
    params: QueryParams,
    raw: Option<String>,
}

impl GroqQuery {
    /// All documents (`*`).
    pub fn documents() -> Self {
        Self::default()
    }

    /// All documents of one type.
    pub fn of_type(name: impl Into<String>) -> Self {
        Self::documents().filter(Filter::type_is(name))
    }

    /// A hand-written query. It can be sent over HTTP but not evaluated locally.
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            raw: Some(text.into()),
            ..Self::default()
        }
    }

    /// Add a filter; filters are combined with `&&`.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add a sort key.
    pub fn order_by(mut self, field: FieldPath, direction: Direction) -> Self {
        self.ordering.push(Ordering::new(field, direction));
        self
    }

    /// Restrict the result.
    pub fn slice(mut self, slice: Slice) -> Self {
        self.slice = Some(slice);
        self
    }

    /// Shape each result document.
    pub fn project(mut self, projection: Projection) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Bind a `$param` value.
    pub fn param(mut self, name: impl Into<String>, value: Value) -> Result<Self, GroqError> {
        self.params.insert(name, value)?;
        Ok(self)
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn ordering(&self) -> &[Ordering] {
        &self.ordering
    }

    pub fn slice_spec(&self) -> Option<Slice> {
        self.slice
    }

    pub fn projection(&self) -> Option<&Projection> {
        self.projection.as_ref()
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// The text of a raw query.
    pub fn raw_text(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Whether the query returns a single value instead of an array.
    pub fn is_single(&self) -> bool {
        matches!(self.slice, Some(Slice::Index(_)))
    }

    /// Check the query is complete: every referenced parameter is bound and slices are ordered.
    pub fn validate(&self) -> Result<(), GroqError> {
        for filter in &self.filters {
            for name in filter.params() {
                if self.params.get(name).is_none() {
                    return Err(GroqError::MissingParam(name.to_string()));
                }
            }
        }
        if let Some(Slice::Range { start, end }) = self.slice {
            if end < start {
                return Err(GroqError::InvalidSlice { start, end });
            }
        }
        Ok(())
    }

    /// Render the query text.
    pub fn to_groq(&self) -> String {
        if let Some(raw) = &self.raw {
            return raw.clone();
        }

        let mut out = String::from("*");
        if !self.filters.is_empty() {
            let clauses: Vec<String> = self.filters.iter().map(|f| f.to_string()).collect();
            out.push_str(&format!("[{}]", clauses.join(" && ")));
        }
        if !self.ordering.is_empty() {
            let keys: Vec<String> = self.ordering.iter().map(|o| o.to_string()).collect();
            out.push_str(&format!(" | order({})", keys.join(", ")));
        }
        if let Some(slice) = &self.slice {
            out.push_str(&slice.to_string());
        }
        if let Some(projection) = &self.projection {
            out.push_str(&projection.to_string());
        }
        out
    }
}

impl fmt::Display for GroqQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_groq())
    }
}
