//! Record schemas: the explicit field descriptors that stand in for
//! reflection when resolving a field name to a typed property.

use crate::value::{fields_to_json, overlay_json, FieldMap};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Declared type of a leaf field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldType {
    Text,
    Int,
    Float,
    Bool,
    Date,
    DateTime,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Text => "text",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
            FieldType::Date => "date",
            FieldType::DateTime => "datetime",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum FieldKind {
    Leaf(FieldType),
    Nested(RecordSchema),
}

/// Field layout of a record type, keyed by serialized field name.
///
/// Build one per type and keep it in a static:
///
/// ```
/// use sheetbind_core::{FieldType, RecordSchema};
/// use std::sync::OnceLock;
///
/// fn person_schema() -> &'static RecordSchema {
///     static SCHEMA: OnceLock<RecordSchema> = OnceLock::new();
///     SCHEMA.get_or_init(|| {
///         RecordSchema::new("Person")
///             .field("name", FieldType::Text)
///             .field("age", FieldType::Int)
///             .nested("address", RecordSchema::new("Address").field("city", FieldType::Text))
///     })
/// }
///
/// let path = person_schema().resolve("address.city").unwrap();
/// assert_eq!(path.field_type(), FieldType::Text);
/// assert!(person_schema().resolve("address").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    name: String,
    fields: IndexMap<String, FieldKind>,
}

impl RecordSchema {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        RecordSchema {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Add a leaf field
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.insert(name.into(), FieldKind::Leaf(field_type));
        self
    }

    /// Add a nested record field, addressed with dotted paths
    #[must_use]
    pub fn nested(mut self, name: impl Into<String>, schema: RecordSchema) -> Self {
        self.fields.insert(name.into(), FieldKind::Nested(schema));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if at least one leaf field can receive a cell value.
    #[must_use]
    pub fn is_mappable(&self) -> bool {
        self.fields.values().any(|kind| match kind {
            FieldKind::Leaf(_) => true,
            FieldKind::Nested(schema) => schema.is_mappable(),
        })
    }

    /// Resolve a dotted field path to a leaf property.
    ///
    /// Paths that stop on a nested record, or walk through a leaf, do not resolve.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<PropertyPath> {
        let mut schema = self;
        let mut segments = path.split('.').peekable();

        while let Some(segment) = segments.next() {
            match (schema.fields.get(segment)?, segments.peek()) {
                (FieldKind::Leaf(field_type), None) => {
                    return Some(PropertyPath {
                        path: path.to_string(),
                        field_type: *field_type,
                    });
                }
                (FieldKind::Nested(nested), Some(_)) => schema = nested,
                _ => return None,
            }
        }

        None
    }
}

/// A field path resolved against a schema, with its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    path: String,
    field_type: FieldType,
}

impl PropertyPath {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }
}

/// A record type that rows can be mapped onto.
///
/// The schema names fields the way serde sees them (after any `rename`).
/// Records are built on top of `Default::default()`, so fields that are not
/// mapped, or whose cell is blank, keep their default value.
pub trait Record: Serialize + DeserializeOwned + Default {
    /// Schema describing the record's fields, built once per type.
    fn schema() -> &'static RecordSchema;

    /// Build a record from a (possibly partial) field map.
    fn build_from(fields: &FieldMap) -> Result<Self, serde_json::Error> {
        let mut record = serde_json::to_value(Self::default())?;
        overlay_json(&mut record, fields_to_json(fields));
        serde_json::from_value(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldValue;
    use serde::Deserialize;
    use std::sync::OnceLock;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Contact {
        email: String,
        home: Place,
    }

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Place {
        zip: Option<i64>,
    }

    impl Record for Contact {
        fn schema() -> &'static RecordSchema {
            static SCHEMA: OnceLock<RecordSchema> = OnceLock::new();
            SCHEMA.get_or_init(|| {
                RecordSchema::new("Contact")
                    .field("email", FieldType::Text)
                    .nested("home", RecordSchema::new("Place").field("zip", FieldType::Int))
            })
        }
    }

    #[test]
    fn test_resolve_leaf_and_nested() {
        let schema = Contact::schema();
        assert_eq!(schema.resolve("email").unwrap().field_type(), FieldType::Text);
        assert_eq!(schema.resolve("home.zip").unwrap().path(), "home.zip");
        assert!(schema.resolve("home").is_none());
        assert!(schema.resolve("email.domain").is_none());
        assert!(schema.resolve("Email").is_none());
        assert!(schema.resolve("").is_none());
    }

    #[test]
    fn test_mappable() {
        assert!(Contact::schema().is_mappable());
        assert!(!RecordSchema::new("Empty").is_mappable());
        assert!(!RecordSchema::new("Shell")
            .nested("inner", RecordSchema::new("Inner"))
            .is_mappable());
    }

    #[test]
    fn test_build_from_partial_map() {
        let mut fields = FieldMap::new();
        fields.insert("home.zip".into(), FieldValue::Int(1234));

        let contact = Contact::build_from(&fields).unwrap();
        assert_eq!(
            contact,
            Contact {
                email: String::new(),
                home: Place { zip: Some(1234) },
            }
        );
    }
}
