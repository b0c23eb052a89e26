//! Header validation: decides whether a sheet can be mapped onto a record
//! type before any data row is read.

use crate::column_map::ColumnMap;
use crate::naming::NamingStrategy;
use crate::schema::RecordSchema;
use crate::verdict::{MapPair, Verdict};
use sheetbind_sheet::Sheet;

/// Validate a sheet's shape against a record schema.
///
/// Checks run in order and the first failure wins:
/// 1. missing sheet,
/// 2. sheet without rows,
/// 3. custom map entries that do not resolve (when `column_map` is non-empty),
/// 4. otherwise the header row itself is the map: an unmappable schema, then
///    header labels that do not resolve.
///
/// Only row 0 is inspected.
pub fn validate_sheet(
    sheet: Option<&Sheet>,
    column_map: &ColumnMap,
    naming: NamingStrategy,
    schema: &RecordSchema,
) -> Verdict {
    let Some(sheet) = sheet else {
        tracing::debug!("validation: sheet not found");
        return Verdict::sheet_not_found();
    };

    if sheet.is_empty() {
        tracing::debug!(sheet = sheet.name(), "validation: sheet has no rows");
        return Verdict::empty_sheet();
    }

    if !column_map.is_empty() {
        return validate_custom_map(column_map, naming, schema);
    }

    validate_headers(&sheet.header(), naming, schema)
}

fn validate_custom_map(
    column_map: &ColumnMap,
    naming: NamingStrategy,
    schema: &RecordSchema,
) -> Verdict {
    let invalid: Vec<MapPair> = column_map
        .iter()
        .filter(|(_, field)| schema.resolve(&naming.transform(field)).is_none())
        .map(|(header, field)| MapPair {
            header: header.to_string(),
            field: field.to_string(),
        })
        .collect();

    if !invalid.is_empty() {
        tracing::debug!(
            schema = schema.name(),
            count = invalid.len(),
            "validation: column map has unresolvable fields"
        );
    }
    Verdict::from_invalid_custom_map(invalid)
}

fn validate_headers(headers: &[String], naming: NamingStrategy, schema: &RecordSchema) -> Verdict {
    if !schema.is_mappable() {
        tracing::debug!(schema = schema.name(), "validation: schema has no leaf fields");
        return Verdict::invalid_name();
    }

    let invalid: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, header)| !header.is_empty())
        .filter(|(_, header)| schema.resolve(&naming.transform(header)).is_none())
        .map(|(col, _)| col)
        .collect();

    if !invalid.is_empty() {
        tracing::debug!(
            schema = schema.name(),
            columns = ?invalid,
            "validation: headers do not resolve"
        );
    }
    Verdict::from_invalid_headers(invalid)
}
