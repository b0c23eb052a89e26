//! Outcome of header validation.

use serde::Serialize;
use std::fmt;

/// A column-map entry whose field did not resolve on the record schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapPair {
    pub header: String,
    pub field: String,
}

/// The single shape a validation outcome takes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VerdictKind {
    /// The sheet can be read.
    Valid,
    /// No sheet at the requested source/index.
    SheetNotFound,
    /// The sheet has no rows at all.
    EmptySheet,
    /// The record type has no field a cell could be mapped onto.
    InvalidName,
    /// 0-based columns whose header text does not resolve to a field.
    InvalidHeaders { columns: Vec<usize> },
    /// Column-map entries whose field does not resolve.
    InvalidCustomMap { pairs: Vec<MapPair> },
}

/// Validation verdict for a sheet against a record type.
///
/// Constructed only through the associated functions, which keep the failure
/// shapes exclusive: an empty failure list yields a valid verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    #[serde(flatten)]
    kind: VerdictKind,
    ignore_first_row: bool,
}

impl Verdict {
    #[must_use]
    pub fn valid(ignore_first_row: bool) -> Self {
        Self {
            kind: VerdictKind::Valid,
            ignore_first_row,
        }
    }

    #[must_use]
    pub fn sheet_not_found() -> Self {
        Self {
            kind: VerdictKind::SheetNotFound,
            ignore_first_row: false,
        }
    }

    #[must_use]
    pub fn empty_sheet() -> Self {
        Self {
            kind: VerdictKind::EmptySheet,
            ignore_first_row: false,
        }
    }

    #[must_use]
    pub fn invalid_name() -> Self {
        Self {
            kind: VerdictKind::InvalidName,
            ignore_first_row: true,
        }
    }

    /// Verdict for unresolvable header columns; valid when `columns` is empty.
    #[must_use]
    pub fn from_invalid_headers(columns: Vec<usize>) -> Self {
        if columns.is_empty() {
            return Self::valid(true);
        }
        Self {
            kind: VerdictKind::InvalidHeaders { columns },
            ignore_first_row: true,
        }
    }

    /// Verdict for unresolvable column-map entries; valid when `pairs` is empty.
    #[must_use]
    pub fn from_invalid_custom_map(pairs: Vec<MapPair>) -> Self {
        if pairs.is_empty() {
            return Self::valid(true);
        }
        Self {
            kind: VerdictKind::InvalidCustomMap { pairs },
            ignore_first_row: true,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &VerdictKind {
        &self.kind
    }

    /// Whether row 1 is a header row and must not be surfaced as data.
    #[must_use]
    pub fn ignore_first_row(&self) -> bool {
        self.ignore_first_row
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.kind != VerdictKind::Valid
    }

    #[must_use]
    pub fn is_sheet_not_found(&self) -> bool {
        self.kind == VerdictKind::SheetNotFound
    }

    #[must_use]
    pub fn is_empty_sheet(&self) -> bool {
        self.kind == VerdictKind::EmptySheet
    }

    #[must_use]
    pub fn is_invalid_name(&self) -> bool {
        self.kind == VerdictKind::InvalidName
    }

    /// Columns with unresolvable header text; empty for other verdicts.
    #[must_use]
    pub fn invalid_headers(&self) -> &[usize] {
        match &self.kind {
            VerdictKind::InvalidHeaders { columns } => columns,
            _ => &[],
        }
    }

    /// Unresolvable column-map entries; empty for other verdicts.
    #[must_use]
    pub fn invalid_custom_map(&self) -> &[MapPair] {
        match &self.kind {
            VerdictKind::InvalidCustomMap { pairs } => pairs,
            _ => &[],
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            VerdictKind::Valid => write!(f, "valid"),
            VerdictKind::SheetNotFound => write!(f, "sheet not found"),
            VerdictKind::EmptySheet => write!(f, "sheet is empty"),
            VerdictKind::InvalidName => write!(f, "record type has no mappable fields"),
            VerdictKind::InvalidHeaders { columns } => {
                let list: Vec<String> = columns.iter().map(ToString::to_string).collect();
                write!(f, "unresolvable headers at columns {}", list.join(", "))
            }
            VerdictKind::InvalidCustomMap { pairs } => {
                let list: Vec<String> = pairs
                    .iter()
                    .map(|p| format!("'{}' -> '{}'", p.header, p.field))
                    .collect();
                write!(f, "unresolvable column mappings: {}", list.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_failure_lists_are_valid() {
        assert!(!Verdict::from_invalid_headers(Vec::new()).has_errors());
        assert!(!Verdict::from_invalid_custom_map(Vec::new()).has_errors());
    }

    #[test]
    fn test_failure_shapes_are_exclusive() {
        let verdict = Verdict::from_invalid_custom_map(vec![MapPair {
            header: "Age".into(),
            field: "years".into(),
        }]);

        assert!(verdict.has_errors());
        assert!(verdict.ignore_first_row());
        assert!(verdict.invalid_headers().is_empty());
        assert!(!verdict.is_empty_sheet());
        assert!(!verdict.is_invalid_name());
        assert!(!verdict.is_sheet_not_found());
        assert_eq!(verdict.invalid_custom_map().len(), 1);
    }

    #[test]
    fn test_accessors_read_back_constructor_input() {
        let verdict = Verdict::from_invalid_headers(vec![3, 5]);
        assert_eq!(verdict.invalid_headers(), &[3, 5]);
        assert!(verdict.invalid_custom_map().is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(Verdict::empty_sheet().to_string(), "sheet is empty");
        assert_eq!(
            Verdict::from_invalid_headers(vec![0, 2]).to_string(),
            "unresolvable headers at columns 0, 2"
        );
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_value(Verdict::from_invalid_headers(vec![1])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "invalid_headers", "columns": [1], "ignore_first_row": true})
        );
    }
}
