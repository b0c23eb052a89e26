//! Converted field values and the field map a record is built from.

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::Serialize;

/// Field name (or dotted path) → converted value, in sheet column order.
pub type FieldMap = IndexMap<String, FieldValue>;

/// A cell value after conversion to its field's declared type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Absent value; the record keeps its default for this field.
    Null,

    /// Boolean value.
    Bool(bool),

    /// Integer value (64-bit).
    Int(i64),

    /// Finite float value (64-bit).
    Float(f64),

    /// Text value.
    Text(String),

    /// Calendar date.
    Date(NaiveDate),

    /// Date and time without zone.
    DateTime(NaiveDateTime),
}

impl FieldValue {
    /// Check if value is absent.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Convert to `serde_json::Value`.
    ///
    /// Dates use the ISO formats chrono's serde impls parse back.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(n) => serde_json::Value::Number((*n).into()),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Self::Text(s) => serde_json::Value::String(s.clone()),
            Self::Date(d) => serde_json::Value::String(d.format("%Y-%m-%d").to_string()),
            Self::DateTime(dt) => {
                serde_json::Value::String(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
            }
        }
    }
}

/// Expand a field map into a JSON object, nesting dotted paths.
///
/// `{"name": "A", "address.city": "B"}` becomes
/// `{"name": "A", "address": {"city": "B"}}`. Absent values are left out so
/// the record keeps its defaults for them.
#[must_use]
pub fn fields_to_json(fields: &FieldMap) -> serde_json::Value {
    let mut root = serde_json::Map::new();

    for (path, value) in fields {
        if value.is_null() {
            continue;
        }
        let segments: Vec<&str> = path.split('.').collect();
        insert_path(&mut root, &segments, value.to_json());
    }

    serde_json::Value::Object(root)
}

/// Merge `patch` into `base`: objects merge key by key, anything else replaces.
pub fn overlay_json(base: &mut serde_json::Value, patch: serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(target), serde_json::Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(slot) => overlay_json(slot, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

fn insert_path(
    node: &mut serde_json::Map<String, serde_json::Value>,
    segments: &[&str],
    value: serde_json::Value,
) {
    match segments {
        [] => {}
        [leaf] => {
            node.insert((*leaf).to_string(), value);
        }
        [head, rest @ ..] => {
            let entry = node
                .entry((*head).to_string())
                .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
            if !entry.is_object() {
                *entry = serde_json::Value::Object(serde_json::Map::new());
            }
            if let Some(child) = entry.as_object_mut() {
                insert_path(child, rest, value);
            }
        }
    }
}
