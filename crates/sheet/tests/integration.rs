use sheetbind_sheet::{CellValue, CsvOptions, Result, Row, Sheet, SheetError};
use std::sync::Arc;
use tempfile::tempdir;

// ===== Sheet Creation Tests =====

#[test]
fn test_sheet_from_data() {
    let sheet = Sheet::from_data(vec![vec![1, 2, 3], vec![4, 5, 6]]);

    assert_eq!(sheet.row_count(), 2);
    assert_eq!(sheet.col_count(), 3);
    assert_eq!(sheet.get(0, 0).unwrap(), &CellValue::Int(1));
    assert_eq!(sheet.get(1, 2).unwrap(), &CellValue::Int(6));
}

#[test]
fn test_out_of_bounds() {
    let sheet = Sheet::from_data(vec![vec!["a"]]);

    let err = sheet.get(3, 0).unwrap_err();
    assert!(matches!(
        err,
        SheetError::IndexOutOfBounds { row: 3, rows: 1, .. }
    ));
}

// ===== Row Snapshot Tests =====

#[test]
fn test_rows_walk_the_sheet() -> Result<()> {
    let sheet = Arc::new(Sheet::from_csv_str("Name,Age\nAlice,30\n,\nBob,25\n")?);

    let rows: Vec<Row> = (0..sheet.row_count())
        .filter_map(|i| Row::from_sheet(&sheet, i))
        .collect();

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].index(), 1);
    assert!(rows[2].is_blank());
    assert!(!rows[3].is_blank());
    assert_eq!(rows[3].sheet().name(), "Sheet1");
    assert_eq!(rows[3].header()[1], "Age");

    Ok(())
}

// ===== File Loading Tests =====

#[test]
fn test_csv_file_roundtrip_through_disk() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("people.csv");
    std::fs::write(&path, "Name;Age\nAlice;30\n")?;

    let sheet = Sheet::from_csv_with_options(&path, CsvOptions::default().with_delimiter(b';'))?;

    assert_eq!(sheet.row_count(), 2);
    assert_eq!(sheet.get_a1("A2")?.as_str(), "Alice");

    Ok(())
}

#[test]
fn test_missing_csv_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = Sheet::from_csv(dir.path().join("missing.csv"));

    assert!(matches!(result, Err(SheetError::Io(_))));
}
