//! Document filter constraints.

use std::fmt;

use serde_json::Value;

use crate::FieldPath;

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A JSON literal, rendered inline.
    Literal(Value),
    /// A `$param` placeholder.
    Param(String),
}

impl Operand {
    /// A string literal.
    pub fn string(s: impl Into<String>) -> Self {
        Operand::Literal(Value::String(s.into()))
    }

    /// A parameter reference (name without `$`).
    pub fn param(name: impl Into<String>) -> Self {
        Operand::Param(name.into())
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // JSON literals are valid GROQ literals; serde_json handles escaping.
            Operand::Literal(value) => write!(f, "{}", value),
            Operand::Param(name) => write!(f, "${}", name),
        }
    }
}

/// A constraint inside `*[...]`. Multiple filters are joined with `&&`.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `_type == "name"`.
    Type(String),
    /// `path == operand`.
    Eq(FieldPath, Operand),
    /// `path != operand`.
    Neq(FieldPath, Operand),
    /// `defined(path)`.
    Defined(FieldPath),
    /// `_id in path(prefix)`; used to exclude drafts with `"drafts.**"`.
    NotInPath(String),
}

impl Filter {
    /// Match documents of a type.
    pub fn type_is(name: impl Into<String>) -> Self {
        Filter::Type(name.into())
    }

    /// Match a field against a value.
    pub fn eq(path: FieldPath, operand: Operand) -> Self {
        Filter::Eq(path, operand)
    }

    /// Match documents where a field is set.
    pub fn defined(path: FieldPath) -> Self {
        Filter::Defined(path)
    }

    /// Exclude draft documents.
    pub fn published_only() -> Self {
        Filter::NotInPath("drafts.**".to_string())
    }

    /// Parameter names referenced by this filter.
    pub fn params(&self) -> Vec<&str> {
        match self {
            Filter::Eq(_, Operand::Param(name)) | Filter::Neq(_, Operand::Param(name)) => {
                vec![name.as_str()]
            }
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Type(name) => write!(f, "_type == {}", Value::String(name.clone())),
            Filter::Eq(path, operand) => write!(f, "{} == {}", path, operand),
            Filter::Neq(path, operand) => write!(f, "{} != {}", path, operand),
            Filter::Defined(path) => write!(f, "defined({})", path),
            Filter::NotInPath(prefix) => {
                write!(f, "!(_id in path({}))", Value::String(prefix.clone()))
            }
        }
    }
}
