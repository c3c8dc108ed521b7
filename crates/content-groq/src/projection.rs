//! Projections (`{ _id, title, "icon": icon.asset->url }`).

use std::fmt;

use serde_json::Value;

use crate::{FieldPath, Segment};

/// One entry of a projection.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionField {
    /// `...` (all attributes of the current object).
    Spread,
    /// A bare attribute, kept under its own name.
    Attr(String),
    /// `"name": path`.
    Alias { name: String, path: FieldPath },
    /// A sub-projection applied to `path`, stored under `name`.
    Nested {
        name: String,
        path: FieldPath,
        projection: Projection,
    },
}

impl ProjectionField {
    /// Key this entry produces in the output object (`None` for spreads).
    pub fn output_name(&self) -> Option<&str> {
        match self {
            ProjectionField::Spread => None,
            ProjectionField::Attr(name) => Some(name),
            ProjectionField::Alias { name, .. } | ProjectionField::Nested { name, .. } => {
                Some(name)
            }
        }
    }
}

/// Whether GROQ would derive `name` from `path` on its own.
///
/// `blogcategories[]->{...}` keeps the key `blogcategories`; a path that ends
/// in a plain attribute access does not.
fn implicit_name(path: &FieldPath, name: &str) -> bool {
    path.root() == Some(name)
        && path.segments()[1..]
            .iter()
            .all(|s| matches!(s, Segment::Each | Segment::Deref))
}

impl fmt::Display for ProjectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionField::Spread => write!(f, "..."),
            ProjectionField::Attr(name) => write!(f, "{}", name),
            ProjectionField::Alias { name, path } => {
                write!(f, "{}: {}", Value::String(name.clone()), path)
            }
            ProjectionField::Nested {
                name,
                path,
                projection,
            } => {
                if implicit_name(path, name) {
                    write!(f, "{}{}", path, projection)
                } else {
                    write!(f, "{}: {}{}", Value::String(name.clone()), path, projection)
                }
            }
        }
    }
}

/// An object projection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    fields: Vec<ProjectionField>,
}

impl Projection {
    /// Create an empty projection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep every attribute (`...`).
    pub fn spread(mut self) -> Self {
        self.fields.push(ProjectionField::Spread);
        self
    }

    /// Keep an attribute under its own name.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(ProjectionField::Attr(name.into()));
        self
    }

    /// Keep several attributes under their own names.
    pub fn fields(mut self, names: &[&str]) -> Self {
        self.fields
            .extend(names.iter().map(|n| ProjectionField::Attr(n.to_string())));
        self
    }

    /// Store the value at `path` under `name`.
    pub fn alias(mut self, name: impl Into<String>, path: FieldPath) -> Self {
        self.fields.push(ProjectionField::Alias {
            name: name.into(),
            path,
        });
        self
    }

    /// Apply `projection` to the value(s) at `path`, stored under `name`.
    pub fn nested(mut self, name: impl Into<String>, path: FieldPath, projection: Projection) -> Self {
        self.fields.push(ProjectionField::Nested {
            name: name.into(),
            path,
            projection,
        });
        self
    }

    /// The projection's entries in order.
    pub fn entries(&self) -> &[ProjectionField] {
        &self.fields
    }

    /// Output keys produced by this projection, in order.
    pub fn output_names(&self) -> Vec<&str> {
        self.fields.iter().filter_map(|f| f.output_name()).collect()
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            return write!(f, "{{}}");
        }
        let parts: Vec<String> = self.fields.iter().map(|p| p.to_string()).collect();
        write!(f, "{{ {} }}", parts.join(", "))
    }
}
