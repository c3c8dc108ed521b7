//! Schema type and field definitions.

use serde_json::{json, Map, Value};

/// Whether a type is a top-level document or an embeddable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// Stored on its own with an `_id`.
    Document,
    /// Embedded inside documents.
    Object,
}

impl SchemaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::Document => "document",
            SchemaKind::Object => "object",
        }
    }
}

/// The value type of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// Single-line string.
    String,
    /// Multi-line string.
    Text,
    /// Any JSON number.
    Number,
    Boolean,
    /// ISO-8601 timestamp.
    Datetime,
    /// Absolute http(s) URL.
    Url,
    /// `{ current }` slug, optionally generated from another field.
    Slug { source: Option<String> },
    /// Image with an asset reference.
    Image,
    /// Uploaded file (e.g. video) with an asset reference.
    File,
    /// Reference to a document of one of the listed types.
    Reference { to: Vec<String> },
    /// Array whose items are one of the listed member types.
    Array { of: Vec<FieldType> },
    /// An embedded object of a registered object type.
    Object(String),
    /// Rich text (array of blocks).
    BlockContent,
}

impl FieldType {
    /// Reference to documents of a single type.
    pub fn reference(to: impl Into<String>) -> Self {
        FieldType::Reference { to: vec![to.into()] }
    }

    /// Array of a single member type.
    pub fn array_of(member: FieldType) -> Self {
        FieldType::Array { of: vec![member] }
    }

    /// Slug generated from `source`.
    pub fn slug_from(source: impl Into<String>) -> Self {
        FieldType::Slug {
            source: Some(source.into()),
        }
    }

    /// The studio type name.
    pub fn type_name(&self) -> &str {
        match self {
            FieldType::String => "string",
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Datetime => "datetime",
            FieldType::Url => "url",
            FieldType::Slug { .. } => "slug",
            FieldType::Image => "image",
            FieldType::File => "file",
            FieldType::Reference { .. } => "reference",
            FieldType::Array { .. } | FieldType::BlockContent => "array",
            FieldType::Object(name) => name,
        }
    }

    /// The `_type` an array member of this type carries.
    pub(crate) fn member_type_name(&self) -> &str {
        match self {
            FieldType::BlockContent => "block",
            other => other.type_name(),
        }
    }

    /// Studio JSON for this type (without name or title).
    pub(crate) fn to_studio_json(&self) -> Map<String, Value> {
        let mut out = Map::new();
        out.insert("type".into(), Value::String(self.type_name().to_string()));
        match self {
            FieldType::Slug { source } => {
                let mut options = Map::new();
                if let Some(source) = source {
                    options.insert("source".into(), Value::String(source.clone()));
                }
                options.insert("maxLength".into(), json!(96));
                out.insert("options".into(), Value::Object(options));
            }
            FieldType::Image => {
                out.insert("options".into(), json!({ "hotspot": true }));
            }
            FieldType::Reference { to } => {
                let targets: Vec<Value> = to.iter().map(|t| json!({ "type": t })).collect();
                out.insert("to".into(), Value::Array(targets));
            }
            FieldType::Array { of } => {
                let members: Vec<Value> = of.iter().map(|m| Value::Object(m.to_studio_json())).collect();
                out.insert("of".into(), Value::Array(members));
            }
            FieldType::BlockContent => {
                out.insert("of".into(), json!([{ "type": "block" }]));
            }
            _ => {}
        }
        out
    }
}

/// A declarative validation rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// The field must be present and non-empty.
    Required,
    /// Numbers must be whole.
    Integer,
    /// Lower bound for numbers, or minimum item count for arrays.
    Min(f64),
    /// Upper bound for numbers, or maximum item count for arrays.
    Max(f64),
    /// Maximum string length in characters.
    MaxLength(usize),
    /// The string must be one of the listed values.
    OneOf(Vec<String>),
}

impl Rule {
    /// Studio JSON (`{ "flag": ..., "constraint": ... }`).
    pub fn to_studio_json(&self) -> Value {
        match self {
            Rule::Required => json!({ "flag": "presence", "constraint": "required" }),
            Rule::Integer => json!({ "flag": "integer" }),
            Rule::Min(n) => json!({ "flag": "min", "constraint": n }),
            Rule::Max(n) => json!({ "flag": "max", "constraint": n }),
            Rule::MaxLength(n) => json!({ "flag": "max", "constraint": n }),
            Rule::OneOf(values) => json!({ "flag": "valid", "constraint": values }),
        }
    }
}

/// A named field of a schema type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    pub title: String,
    pub field_type: FieldType,
    pub rules: Vec<Rule>,
    pub description: Option<String>,
}

impl FieldDefinition {
    /// Create a field; the title is derived from the name.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        Self {
            title: title_case(&name),
            name,
            field_type,
            rules: Vec::new(),
            description: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a validation rule.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn required(self) -> Self {
        self.rule(Rule::Required)
    }

    pub fn integer(self) -> Self {
        self.rule(Rule::Integer)
    }

    pub fn min(self, n: f64) -> Self {
        self.rule(Rule::Min(n))
    }

    pub fn max(self, n: f64) -> Self {
        self.rule(Rule::Max(n))
    }

    pub fn max_length(self, n: usize) -> Self {
        self.rule(Rule::MaxLength(n))
    }

    /// Restrict a string field to a list of values.
    pub fn one_of(self, values: &[&str]) -> Self {
        self.rule(Rule::OneOf(values.iter().map(|v| v.to_string()).collect()))
    }

    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }

    pub(crate) fn to_studio_json(&self) -> Value {
        let mut out = Map::new();
        out.insert("name".into(), Value::String(self.name.clone()));
        out.insert("title".into(), Value::String(self.title.clone()));
        out.extend(self.field_type.to_studio_json());

        if let Some(description) = &self.description {
            out.insert("description".into(), Value::String(description.clone()));
        }

        let list = self.rules.iter().find_map(|r| match r {
            Rule::OneOf(values) => Some(values),
            _ => None,
        });
        if let Some(values) = list {
            out.insert("options".into(), json!({ "list": values }));
        }

        if !self.rules.is_empty() {
            let rules: Vec<Value> = self.rules.iter().map(Rule::to_studio_json).collect();
            out.insert("validation".into(), Value::Array(rules));
        }
        Value::Object(out)
    }
}

/// List preview configuration (`preview.select`).
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub title: String,
    pub subtitle: Option<String>,
    pub media: Option<String>,
}

/// A document or object type.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaType {
    pub name: String,
    pub title: String,
    pub kind: SchemaKind,
    pub fields: Vec<FieldDefinition>,
    pub preview: Option<Preview>,
}

impl SchemaType {
    fn new(name: impl Into<String>, kind: SchemaKind) -> Self {
        let name = name.into();
        Self {
            title: title_case(&name),
            name,
            kind,
            fields: Vec::new(),
            preview: None,
        }
    }

    /// A top-level document type.
    pub fn document(name: impl Into<String>) -> Self {
        Self::new(name, SchemaKind::Document)
    }

    /// An embeddable object type.
    pub fn object(name: impl Into<String>) -> Self {
        Self::new(name, SchemaKind::Object)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Append a field.
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Configure the list preview.
    pub fn preview(mut self, title: &str, subtitle: Option<&str>, media: Option<&str>) -> Self {
        self.preview = Some(Preview {
            title: title.to_string(),
            subtitle: subtitle.map(str::to_string),
            media: media.map(str::to_string),
        });
        self
    }

    /// Look up a field by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Studio JSON for the type.
    pub fn to_studio_json(&self) -> Value {
        let fields: Vec<Value> = self.fields.iter().map(FieldDefinition::to_studio_json).collect();
        let mut out = json!({
            "name": self.name,
            "title": self.title,
            "type": self.kind.as_str(),
            "fields": fields,
        });

        if let Some(preview) = &self.preview {
            let mut select = Map::new();
            select.insert("title".into(), Value::String(preview.title.clone()));
            if let Some(subtitle) = &preview.subtitle {
                select.insert("subtitle".into(), Value::String(subtitle.clone()));
            }
            if let Some(media) = &preview.media {
                select.insert("media".into(), Value::String(media.clone()));
            }
            out["preview"] = json!({ "select": select });
        }
        out
    }
}

/// `mainImage` -> `Main Image`, `order_item` -> `Order Item`.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    let mut start = true;

    for c in name.trim_start_matches('_').chars() {
        if c == '_' || c == '-' {
            start = true;
            prev_lower = false;
            continue;
        }
        if start {
            if !out.is_empty() {
                out.push(' ');
            }
            out.extend(c.to_uppercase());
            start = false;
        } else if c.is_uppercase() && prev_lower {
            out.push(' ');
            out.push(c);
        } else {
            out.push(c);
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
    }
    out
}
