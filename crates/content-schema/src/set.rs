//! Registered schema types.

use serde_json::Value;

use crate::validate::{validate_fields, ValidationIssue};
use crate::{FieldType, SchemaError, SchemaKind, SchemaType};

/// Built-in type names that need no registration.
const BUILTIN_TYPES: &[&str] = &["sanity.imageAsset", "sanity.fileAsset", "block"];

/// The set of types registered with the studio.
#[derive(Debug, Clone, Default)]
pub struct SchemaSet {
    types: Vec<SchemaType>,
}

impl SchemaSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from types and check their cross-references.
    pub fn from_types(types: Vec<SchemaType>) -> Result<Self, SchemaError> {
        let mut set = Self::new();
        for ty in types {
            set.register(ty)?;
        }
        set.check()?;
        Ok(set)
    }

    /// Add a type. Names must be unique.
    pub fn register(&mut self, ty: SchemaType) -> Result<(), SchemaError> {
        if self.get(&ty.name).is_some() {
            return Err(SchemaError::DuplicateType(ty.name));
        }
        let mut seen = std::collections::HashSet::new();
        for field in &ty.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::InvalidDefinition {
                    type_name: ty.name.clone(),
                    reason: format!("duplicate field {}", field.name),
                });
            }
        }
        self.types.push(ty);
        Ok(())
    }

    /// Look up a type by name.
    pub fn get(&self, name: &str) -> Option<&SchemaType> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Registered types in registration order.
    pub fn types(&self) -> &[SchemaType] {
        &self.types
    }

    /// Registered type names.
    pub fn names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.name.as_str()).collect()
    }

    /// Document types only.
    pub fn documents(&self) -> impl Iterator<Item = &SchemaType> {
        self.types.iter().filter(|t| t.kind == SchemaKind::Document)
    }

    /// Check every referenced type is registered. References must point at
    /// documents; embedded objects must name object types.
    pub fn check(&self) -> Result<(), SchemaError> {
        for ty in &self.types {
            for field in &ty.fields {
                let owner = format!("{}.{}", ty.name, field.name);
                self.check_field_type(&field.field_type, &owner)?;
            }
        }
        Ok(())
    }

    fn check_field_type(&self, field_type: &FieldType, owner: &str) -> Result<(), SchemaError> {
        match field_type {
            FieldType::Reference { to } => {
                for target in to {
                    match self.get(target) {
                        Some(t) if t.kind == SchemaKind::Document => {}
                        _ if BUILTIN_TYPES.contains(&target.as_str()) => {}
                        _ => {
                            return Err(SchemaError::UnknownType {
                                name: target.clone(),
                                referenced_by: owner.to_string(),
                            })
                        }
                    }
                }
            }
            FieldType::Object(name) => match self.get(name) {
                Some(t) if t.kind == SchemaKind::Object => {}
                _ => {
                    return Err(SchemaError::UnknownType {
                        name: name.clone(),
                        referenced_by: owner.to_string(),
                    })
                }
            },
            FieldType::Array { of } => {
                if of.is_empty() {
                    return Err(SchemaError::InvalidDefinition {
                        type_name: owner.to_string(),
                        reason: "array has no member types".to_string(),
                    });
                }
                for member in of {
                    self.check_field_type(member, owner)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Studio JSON: an array of type definitions.
    pub fn to_studio_json(&self) -> Value {
        Value::Array(self.types.iter().map(SchemaType::to_studio_json).collect())
    }

    /// Validate a document against the type named by its `_type`.
    pub fn validate_document(&self, document: &Value) -> Result<Vec<ValidationIssue>, SchemaError> {
        let type_name = document
            .get("_type")
            .and_then(Value::as_str)
            .ok_or(SchemaError::MissingDocumentType)?;
        self.validate_value(type_name, document)
    }

    /// Validate a value against a named type and return every violation.
    pub fn validate_value(&self, type_name: &str, value: &Value) -> Result<Vec<ValidationIssue>, SchemaError> {
        let ty = self
            .get(type_name)
            .ok_or_else(|| SchemaError::NotFound(type_name.to_string()))?;

        let mut issues = Vec::new();
        match value.as_object() {
            Some(object) => validate_fields(self, &ty.fields, object, "", &mut issues),
            None => issues.push(ValidationIssue {
                path: String::new(),
                message: format!("{} must be an object", type_name),
            }),
        }
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldDefinition;
    use serde_json::json;

    fn small_set() -> SchemaSet {
        SchemaSet::from_types(vec![
            SchemaType::document("product")
                .field(FieldDefinition::new("name", FieldType::String).required()),
            SchemaType::object("line")
                .field(FieldDefinition::new("product", FieldType::reference("product")).required()),
            SchemaType::document("cart").field(FieldDefinition::new(
                "lines",
                FieldType::array_of(FieldType::Object("line".into())),
            )),
        ])
        .unwrap()
    }

    #[test]
    fn test_duplicate_type() {
        let mut set = small_set();
        let err = set.register(SchemaType::document("product")).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateType("product".into()));
    }

    #[test]
    fn test_duplicate_field() {
        let mut set = SchemaSet::new();
        let ty = SchemaType::document("x")
            .field(FieldDefinition::new("a", FieldType::String))
            .field(FieldDefinition::new("a", FieldType::Number));
        assert!(matches!(set.register(ty), Err(SchemaError::InvalidDefinition { .. })));
    }

    #[test]
    fn test_unknown_reference_target() {
        let err = SchemaSet::from_types(vec![SchemaType::object("line").field(
            FieldDefinition::new("product", FieldType::reference("product")),
        )])
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownType {
                name: "product".into(),
                referenced_by: "line.product".into(),
            }
        );
    }

    #[test]
    fn test_reference_to_object_type_rejected() {
        let err = SchemaSet::from_types(vec![
            SchemaType::object("line"),
            SchemaType::document("cart").field(FieldDefinition::new("l", FieldType::reference("line"))),
        ])
        .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownType { .. }));
    }

    #[test]
    fn test_nested_issue_paths() {
        let set = small_set();
        let issues = set
            .validate_document(&json!({
                "_type": "cart",
                "lines": [{ "product": { "_ref": "p1" } }, { "_type": "line" }]
            }))
            .unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "lines[1].product");
    }

    #[test]
    fn test_missing_type() {
        let set = small_set();
        assert_eq!(
            set.validate_document(&json!({ "name": "x" })).unwrap_err(),
            SchemaError::MissingDocumentType
        );
        assert!(matches!(
            set.validate_document(&json!({ "_type": "nope" })),
            Err(SchemaError::NotFound(_))
        ));
    }

    #[test]
    fn test_export_is_array_in_order() {
        let json = small_set().to_studio_json();
        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["product", "line", "cart"]);
    }
}
