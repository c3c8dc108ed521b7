//! Document validation against declared rules.

use std::fmt;

use serde_json::{Map, Value};

use crate::{FieldDefinition, FieldType, Rule, SchemaSet};

/// One rule violation, located by a path such as `items[0].quantity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

/// Validate an object's fields.
pub(crate) fn validate_fields(
    set: &SchemaSet,
    fields: &[FieldDefinition],
    object: &Map<String, Value>,
    prefix: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    for field in fields {
        let path = join(prefix, &field.name);
        match object.get(&field.name) {
            None | Some(Value::Null) => {
                if field.is_required() {
                    issues.push(ValidationIssue::new(&path, "is required"));
                }
            }
            Some(value) => validate_field(set, field, value, &path, issues),
        }
    }
}

fn validate_field(
    set: &SchemaSet,
    field: &FieldDefinition,
    value: &Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    if !validate_type(set, &field.field_type, value, path, issues) {
        return;
    }

    for rule in &field.rules {
        if let Some(message) = check_rule(rule, value) {
            issues.push(ValidationIssue::new(path, message));
        }
    }
}

/// Check a value's shape. Returns `false` when the type itself is wrong, so
/// rules are not checked against a value of the wrong kind.
fn validate_type(
    set: &SchemaSet,
    field_type: &FieldType,
    value: &Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> bool {
    let expected = match field_type {
        FieldType::String | FieldType::Text => value.is_string().then_some(()).ok_or("a string"),
        FieldType::Number => value.is_number().then_some(()).ok_or("a number"),
        FieldType::Boolean => value.is_boolean().then_some(()).ok_or("a boolean"),
        FieldType::Datetime => match value.as_str() {
            Some(s) if chrono::DateTime::parse_from_rfc3339(s).is_ok() => Ok(()),
            _ => Err("an ISO-8601 datetime"),
        },
        FieldType::Url => match value.as_str() {
            Some(s) if s.starts_with("http://") || s.starts_with("https://") => Ok(()),
            _ => Err("an http(s) URL"),
        },
        FieldType::Slug { .. } => match value.get("current").and_then(Value::as_str) {
            Some(s) if !s.is_empty() => Ok(()),
            _ => Err("a slug with a current value"),
        },
        FieldType::Image | FieldType::File => {
            match value.get("asset").and_then(|a| a.get("_ref")).and_then(Value::as_str) {
                Some(_) => Ok(()),
                None => Err("an asset with a reference"),
            }
        }
        FieldType::Reference { .. } => match value.get("_ref").and_then(Value::as_str) {
            Some(s) if !s.is_empty() => Ok(()),
            _ => Err("a reference"),
        },
        FieldType::Array { of } => match value.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    validate_member(set, of, item, &format!("{}[{}]", path, i), issues);
                }
                Ok(())
            }
            None => Err("an array"),
        },
        FieldType::BlockContent => value.is_array().then_some(()).ok_or("an array of blocks"),
        FieldType::Object(name) => match (value.as_object(), set.get(name)) {
            (Some(object), Some(ty)) => {
                validate_fields(set, &ty.fields, object, path, issues);
                Ok(())
            }
            (Some(_), None) => Err("a registered object type"),
            (None, _) => Err("an object"),
        },
    };

    match expected {
        Ok(()) => true,
        Err(what) => {
            issues.push(ValidationIssue::new(path, format!("must be {}", what)));
            false
        }
    }
}

fn validate_member(
    set: &SchemaSet,
    of: &[FieldType],
    item: &Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    let member = match of {
        [only] => Some(only),
        _ => item
            .get("_type")
            .and_then(Value::as_str)
            .and_then(|t| of.iter().find(|m| m.member_type_name() == t)),
    };

    match member {
        Some(member) => {
            validate_type(set, member, item, path, issues);
        }
        None => issues.push(ValidationIssue::new(path, "has an unexpected item type")),
    }
}

fn check_rule(rule: &Rule, value: &Value) -> Option<String> {
    match rule {
        Rule::Required => match value {
            Value::String(s) if s.trim().is_empty() => Some("is required".to_string()),
            _ => None,
        },
        Rule::Integer => match value.as_f64() {
            Some(n) if n.fract() != 0.0 => Some("must be a whole number".to_string()),
            _ => None,
        },
        Rule::Min(min) => match measure(value) {
            Some(n) if n < *min => Some(format!("must be at least {}", min)),
            _ => None,
        },
        Rule::Max(max) => match measure(value) {
            Some(n) if n > *max => Some(format!("must be at most {}", max)),
            _ => None,
        },
        Rule::MaxLength(max) => match value.as_str() {
            Some(s) if s.chars().count() > *max => {
                Some(format!("must be at most {} characters", max))
            }
            _ => None,
        },
        Rule::OneOf(values) => match value.as_str() {
            Some(s) if !values.iter().any(|v| v == s) => {
                Some(format!("must be one of: {}", values.join(", ")))
            }
            _ => None,
        },
    }
}

/// Numbers bound by value, arrays by item count.
fn measure(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Array(items) => Some(items.len() as f64),
        _ => None,
    }
}
