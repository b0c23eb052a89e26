//! Header label → record field name mapping.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping from header text (as written in the sheet, trimmed) to a
/// record field name or dotted path.
///
/// Serializes as a plain object: `{"First Name": "first_name"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "IndexMap<String, String>", into = "IndexMap<String, String>")]
pub struct ColumnMap {
    entries: IndexMap<String, String>,
}

impl ColumnMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity map: every non-blank header maps to a field of the same name.
    #[must_use]
    pub fn identity<S: AsRef<str>>(headers: &[S]) -> Self {
        headers
            .iter()
            .map(|h| h.as_ref().trim())
            .filter(|h| !h.is_empty())
            .map(|h| (h.to_string(), h.to_string()))
            .collect()
    }

    /// Add a mapping, replacing any existing entry for the same header.
    ///
    /// Returns the previous field name for that header.
    pub fn insert(&mut self, header: impl Into<String>, field: impl Into<String>) -> Option<String> {
        self.entries.insert(header.into().trim().to_string(), field.into())
    }

    /// Builder-style [`ColumnMap::insert`].
    #[must_use]
    pub fn with(mut self, header: impl Into<String>, field: impl Into<String>) -> Self {
        self.insert(header, field);
        self
    }

    /// Field name mapped to `header`, if any.
    #[must_use]
    pub fn field_for(&self, header: &str) -> Option<&str> {
        self.entries.get(header).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (header, field) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(h, f)| (h.as_str(), f.as_str()))
    }
}

impl From<IndexMap<String, String>> for ColumnMap {
    fn from(entries: IndexMap<String, String>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<ColumnMap> for IndexMap<String, String> {
    fn from(map: ColumnMap) -> Self {
        map.entries
    }
}

impl<H: Into<String>, F: Into<String>> FromIterator<(H, F)> for ColumnMap {
    fn from_iter<I: IntoIterator<Item = (H, F)>>(iter: I) -> Self {
        let mut map = ColumnMap::new();
        for (header, field) in iter {
            map.insert(header, field);
        }
        map
    }
}
