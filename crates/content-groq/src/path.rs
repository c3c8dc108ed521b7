//! Attribute paths such as `icon.asset->url` or `categories[]->title`.

use std::fmt;
use std::str::FromStr;

use crate::params::is_identifier;
use crate::GroqError;

/// One step in a field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Attribute access (`title`, `.asset`).
    Attr(String),
    /// Reference dereference (`->`).
    Deref,
    /// Array traversal (`[]`).
    Each,
    /// Array element access (`[0]`).
    Index(usize),
}

/// A path into a document, rendered in GROQ syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
    /// Path consisting of a single attribute.
    pub fn attr(name: impl Into<String>) -> Self {
        Self(vec![Segment::Attr(name.into())])
    }

    /// Access a nested attribute.
    pub fn then(mut self, name: impl Into<String>) -> Self {
        self.0.push(Segment::Attr(name.into()));
        self
    }

    /// Follow a reference.
    pub fn deref(mut self) -> Self {
        self.0.push(Segment::Deref);
        self
    }

    /// Traverse every element of an array.
    pub fn each(mut self) -> Self {
        self.0.push(Segment::Each);
        self
    }

    /// Take a single array element.
    pub fn index(mut self, index: usize) -> Self {
        self.0.push(Segment::Index(index));
        self
    }

    /// The path's segments.
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// The leading attribute name, if the path starts with one.
    pub fn root(&self) -> Option<&str> {
        match self.0.first() {
            Some(Segment::Attr(name)) => Some(name),
            _ => None,
        }
    }

    /// Whether the path is a bare attribute.
    pub fn is_simple(&self) -> bool {
        matches!(self.0.as_slice(), [Segment::Attr(_)])
    }

    /// Parse GROQ path syntax.
    pub fn parse(input: &str) -> Result<Self, GroqError> {
        let invalid = |reason: &str| GroqError::InvalidPath {
            path: input.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        let mut rest = input;
        let mut expect_attr = true;

        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix("->") {
                if expect_attr {
                    return Err(invalid("dereference without a target"));
                }
                segments.push(Segment::Deref);
                rest = after;
                // `->` may be followed directly by an attribute or end the path
                expect_attr = false;
                if let Some(len) = ident_len(rest) {
                    segments.push(Segment::Attr(rest[..len].to_string()));
                    rest = &rest[len..];
                }
            } else if let Some(after) = rest.strip_prefix('[') {
                if expect_attr {
                    return Err(invalid("array access without a target"));
                }
                let close = after.find(']').ok_or_else(|| invalid("unclosed '['"))?;
                let inner = &after[..close];
                if inner.is_empty() {
                    segments.push(Segment::Each);
                } else {
                    let index = inner.parse().map_err(|_| invalid("non-numeric index"))?;
                    segments.push(Segment::Index(index));
                }
                rest = &after[close + 1..];
            } else if let Some(after) = rest.strip_prefix('.') {
                if expect_attr {
                    return Err(invalid("unexpected '.'"));
                }
                let len = ident_len(after).ok_or_else(|| invalid("expected attribute after '.'"))?;
                segments.push(Segment::Attr(after[..len].to_string()));
                rest = &after[len..];
            } else if expect_attr {
                let len = ident_len(rest).ok_or_else(|| invalid("expected attribute"))?;
                segments.push(Segment::Attr(rest[..len].to_string()));
                rest = &rest[len..];
                expect_attr = false;
            } else {
                return Err(invalid("unexpected character"));
            }
        }

        if segments.is_empty() {
            return Err(invalid("empty path"));
        }
        Ok(Self(segments))
    }
}

/// Length of the identifier at the start of `s`, if any.
fn ident_len(s: &str) -> Option<usize> {
    let len = s
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_'))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    (len > 0 && is_identifier(&s[..len])).then_some(len)
}

impl FromStr for FieldPath {
    type Err = GroqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prev: Option<&Segment> = None;
        for segment in &self.0 {
            match segment {
                Segment::Attr(name) => match prev {
                    None | Some(Segment::Deref) => write!(f, "{}", name)?,
                    _ => write!(f, ".{}", name)?,
                },
                Segment::Deref => write!(f, "->")?,
                Segment::Each => write!(f, "[]")?,
                Segment::Index(i) => write!(f, "[{}]", i)?,
            }
            prev = Some(segment);
        }
        Ok(())
    }
}
