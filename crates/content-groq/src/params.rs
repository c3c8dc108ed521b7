//! Query parameters (`$name` bindings).

use std::collections::BTreeMap;

use serde_json::Value;

use crate::GroqError;

/// Check whether `s` is a valid GROQ identifier.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Named values bound to `$param` placeholders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams(BTreeMap<String, Value>);

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a value. The name is given without the leading `$`.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Result<(), GroqError> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(GroqError::InvalidParamName(name));
        }
        self.0.insert(name, value);
        Ok(())
    }

    /// Look up a bound value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Whether no parameters are bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of bound parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Encode as HTTP query pairs: `$name` => JSON-encoded value.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| (format!("${}", k), v.to_string()))
            .collect()
    }
}
