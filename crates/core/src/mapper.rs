//! Row mapping: converts one row's cells into a field map and, when every
//! mapped cell converted, into a record.

use crate::column_map::ColumnMap;
use crate::convert::convert;
use crate::error::{ImportError, ImportResult};
use crate::naming::NamingStrategy;
use crate::schema::{Record, RecordSchema};
use crate::value::{FieldMap, FieldValue};
use sheetbind_sheet::{CellValue, Row};

/// Converted values of a row plus the cells that failed conversion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowMapping {
    /// 0-based column indexes of mapped cells that could not be converted.
    pub invalid_cells: Vec<usize>,
    /// Transformed field path → converted value.
    pub values: FieldMap,
    /// Column and field path of every mapped cell that converted.
    pub columns: Vec<(usize, String)>,
}

/// Map the cells of `row` through `column_map` onto `schema`.
///
/// Cells under headers that are not in the map are skipped. A cell that fails
/// to convert is recorded and scanning continues, so every bad cell of the row
/// is reported together.
pub fn map_row(
    row: &Row,
    column_map: &ColumnMap,
    naming: NamingStrategy,
    schema: &RecordSchema,
) -> RowMapping {
    let header = row.header();
    let mut mapping = RowMapping::default();

    for (col, cell) in row.cells().iter().enumerate() {
        let label = header.get(col).map_or("", String::as_str);
        let Some(field) = column_map.field_for(label) else {
            continue;
        };

        let path = naming.transform(field);
        let Some(property) = schema.resolve(&path) else {
            tracing::warn!(row = row.index(), col, field = %path, "mapped field does not resolve");
            mapping.invalid_cells.push(col);
            continue;
        };

        match convert(cell, property.field_type()) {
            Ok(FieldValue::Text(text)) if text.is_empty() => {
                mapping.columns.push((col, path.clone()));
                mapping.values.insert(path, FieldValue::Null);
            }
            Ok(value) => {
                mapping.columns.push((col, path.clone()));
                mapping.values.insert(path, value);
            }
            Err(err) => {
                tracing::debug!(row = row.index(), col, %err, "cell conversion failed");
                mapping.invalid_cells.push(col);
            }
        }
    }

    mapping
}

/// Outcome of reading one row.
///
/// `record` is present only when `invalid_cells` is empty.
#[derive(Debug, Clone)]
pub struct RowParseResult<T> {
    row: Row,
    invalid_cells: Vec<usize>,
    record: Option<T>,
}

impl<T> RowParseResult<T> {
    #[must_use]
    pub fn row(&self) -> &Row {
        &self.row
    }

    #[must_use]
    pub fn invalid_cells(&self) -> &[usize] {
        &self.invalid_cells
    }

    #[must_use]
    pub fn record(&self) -> Option<&T> {
        self.record.as_ref()
    }

    #[must_use]
    pub fn into_record(self) -> Option<T> {
        self.record
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.invalid_cells.is_empty()
    }

    /// A1 addresses of the invalid cells (e.g. `B3`).
    #[must_use]
    pub fn invalid_cell_addresses(&self) -> Vec<String> {
        self.invalid_cells.iter().map(|&col| self.row.address(col)).collect()
    }

    /// Header labels above the invalid cells.
    #[must_use]
    pub fn invalid_cell_headers(&self) -> Vec<String> {
        let header = self.row.header();
        self.invalid_cells
            .iter()
            .map(|&col| header.get(col).cloned().unwrap_or_default())
            .collect()
    }

    /// Raw values of the invalid cells, for echoing back in a correction UI.
    #[must_use]
    pub fn invalid_cell_values(&self) -> Vec<&CellValue> {
        self.invalid_cells
            .iter()
            .filter_map(|&col| self.row.cells().get(col))
            .collect()
    }
}

/// Map a row and build the record when every mapped cell converted.
///
/// A converted value the record type still refuses (an integer too large for
/// a `u8` field, say) marks its column invalid like a failed conversion.
/// `Err` is returned only when the record cannot be built from its defaults
/// alone, which no row can fix.
pub fn parse_row<T: Record>(
    row: Row,
    column_map: &ColumnMap,
    naming: NamingStrategy,
) -> ImportResult<RowParseResult<T>> {
    let RowMapping {
        mut invalid_cells,
        values,
        columns,
    } = map_row(&row, column_map, naming, T::schema());

    let mut record = None;
    if invalid_cells.is_empty() {
        match T::build_from(&values) {
            Ok(built) => record = Some(built),
            Err(source) => {
                invalid_cells = rejected_columns::<T>(&columns, &values);
                if invalid_cells.is_empty() {
                    return Err(ImportError::RecordBuild {
                        row: row.index(),
                        source,
                    });
                }
                tracing::debug!(
                    row = row.index(),
                    columns = ?invalid_cells,
                    %source,
                    "record rejected converted values"
                );
            }
        }
    }

    Ok(RowParseResult {
        row,
        invalid_cells,
        record,
    })
}

/// Columns whose value alone stops the record from building.
///
/// Empty when the defaults themselves do not build. When no single value is
/// to blame, every contributing column is.
fn rejected_columns<T: Record>(columns: &[(usize, String)], values: &FieldMap) -> Vec<usize> {
    if T::build_from(&FieldMap::new()).is_err() {
        return Vec::new();
    }

    let rejected: Vec<usize> = columns
        .iter()
        .filter(|(_, path)| {
            let single: FieldMap = values
                .get_key_value(path)
                .map(|(key, value)| (key.clone(), value.clone()))
                .into_iter()
                .collect();
            T::build_from(&single).is_err()
        })
        .map(|(col, _)| *col)
        .collect();

    if rejected.is_empty() {
        columns.iter().map(|(col, _)| *col).collect()
    } else {
        rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;
    use serde::{Deserialize, Serialize};
    use sheetbind_sheet::Sheet;
    use std::sync::{Arc, OnceLock};

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Person {
        name: Option<String>,
        age: i64,
    }

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Parcel {
        label: String,
        weight: u8,
    }

    impl Record for Parcel {
        fn schema() -> &'static RecordSchema {
            static SCHEMA: OnceLock<RecordSchema> = OnceLock::new();
            SCHEMA.get_or_init(|| {
                RecordSchema::new("Parcel")
                    .field("label", FieldType::Text)
                    .field("weight", FieldType::Int)
            })
        }
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Sealed {
        label: String,
        #[serde(skip_serializing)]
        token: String,
    }

    impl Record for Sealed {
        fn schema() -> &'static RecordSchema {
            static SCHEMA: OnceLock<RecordSchema> = OnceLock::new();
            SCHEMA.get_or_init(|| RecordSchema::new("Sealed").field("label", FieldType::Text))
        }
    }

    impl Record for Person {
        fn schema() -> &'static RecordSchema {
            static SCHEMA: OnceLock<RecordSchema> = OnceLock::new();
            SCHEMA.get_or_init(|| {
                RecordSchema::new("Person")
                    .field("name", FieldType::Text)
                    .field("age", FieldType::Int)
            })
        }
    }

    fn row_of(cells: Vec<CellValue>) -> Row {
        let sheet = Arc::new(Sheet::from_data(vec![
            vec![CellValue::from("Name"), CellValue::from("Age"), CellValue::from("X")],
            cells,
        ]));
        Row::from_sheet(&sheet, 1).unwrap()
    }

    fn map() -> ColumnMap {
        ColumnMap::new().with("Name", "Name").with("Age", "Age")
    }

    #[test]
    fn test_unmapped_column_is_skipped() {
        let row = row_of(vec!["Alice".into(), "30".into(), "junk".into()]);
        let mapping = map_row(&row, &map(), NamingStrategy::CamelCase, Person::schema());

        assert!(mapping.invalid_cells.is_empty());
        assert_eq!(mapping.values.len(), 2);
        assert_eq!(mapping.values["age"], FieldValue::Int(30));
    }

    #[test]
    fn test_empty_text_becomes_absent() {
        let row = row_of(vec!["".into(), "1".into()]);
        let result: RowParseResult<Person> =
            parse_row(row, &map(), NamingStrategy::CamelCase).unwrap();

        assert_eq!(result.record(), Some(&Person { name: None, age: 1 }));
    }

    #[test]
    fn test_all_invalid_cells_reported() {
        let sheet = Arc::new(Sheet::from_data(vec![
            vec!["A", "B", "C"],
            vec!["x", "1", "y"],
        ]));
        let row = Row::from_sheet(&sheet, 1).unwrap();
        let map = ColumnMap::new().with("A", "age").with("B", "age").with("C", "age");

        let result: RowParseResult<Person> = parse_row(row, &map, NamingStrategy::None).unwrap();
        assert_eq!(result.invalid_cells(), &[0, 2]);
        assert!(result.record().is_none());
        assert_eq!(result.invalid_cell_addresses(), vec!["A2".to_string(), "C2".to_string()]);
        assert_eq!(result.invalid_cell_headers(), vec!["A".to_string(), "C".to_string()]);
        assert_eq!(result.invalid_cell_values()[1].as_str(), "y");
    }

    #[test]
    fn test_unresolvable_field_marks_cell_invalid() {
        let row = row_of(vec!["Alice".into(), "30".into()]);
        let map = ColumnMap::new().with("Name", "nickname");

        let mapping = map_row(&row, &map, NamingStrategy::None, Person::schema());
        assert_eq!(mapping.invalid_cells, vec![0]);
    }

    #[test]
    fn test_mapped_columns_are_tracked() {
        let row = row_of(vec!["Alice".into(), "".into(), "junk".into()]);
        let mapping = map_row(&row, &map(), NamingStrategy::CamelCase, Person::schema());

        assert_eq!(
            mapping.columns,
            vec![(0, "name".to_string()), (1, "age".to_string())]
        );
        assert_eq!(mapping.values["age"], FieldValue::Null);
    }

    #[test]
    fn test_blank_required_field_keeps_default() {
        let sheet = Arc::new(Sheet::from_data(vec![vec!["label", "weight"], vec!["", "7"]]));
        let row = Row::from_sheet(&sheet, 1).unwrap();
        let map = ColumnMap::identity(&sheet.header());

        let result: RowParseResult<Parcel> = parse_row(row, &map, NamingStrategy::None).unwrap();
        assert_eq!(
            result.record(),
            Some(&Parcel {
                label: String::new(),
                weight: 7
            })
        );
    }

    #[test]
    fn test_value_refused_by_record_marks_cell_invalid() {
        let sheet = Arc::new(Sheet::from_data(vec![
            vec!["label", "weight"],
            vec!["heavy", "300"],
        ]));
        let row = Row::from_sheet(&sheet, 1).unwrap();
        let map = ColumnMap::identity(&sheet.header());

        let result: RowParseResult<Parcel> = parse_row(row, &map, NamingStrategy::None).unwrap();
        assert_eq!(result.invalid_cells(), &[1]);
        assert!(result.record().is_none());
        assert_eq!(result.invalid_cell_addresses(), vec!["B2".to_string()]);
    }

    #[test]
    fn test_unbuildable_record_type_is_an_error() {
        let sheet = Arc::new(Sheet::from_data(vec![vec!["label"], vec!["x"]]));
        let row = Row::from_sheet(&sheet, 1).unwrap();
        let map = ColumnMap::identity(&sheet.header());

        let err = parse_row::<Sealed>(row, &map, NamingStrategy::None).unwrap_err();
        assert!(matches!(err, ImportError::RecordBuild { row: 2, .. }));
    }
}
