use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        // Excel stores dates as days since 1899-12-30
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

/// Copy a worksheet range into sheet rows anchored at A1.
///
/// calamine ranges start at the first used cell, so leading empty rows and
/// columns are padded back in to keep header positions stable.
fn range_to_sheet(name: &str, range: &Range<Data>) -> Sheet {
    let mut sheet = Sheet::with_name(name);
    let Some((start_row, start_col)) = range.start() else {
        return sheet;
    };

    let data = sheet.data_mut();
    for _ in 0..start_row {
        data.push(Vec::new());
    }
    for row in range.rows() {
        let mut cells = vec![CellValue::Null; start_col as usize];
        cells.extend(row.iter().map(data_to_cell_value));
        data.push(cells);
    }

    sheet
}

impl Sheet {
    /// Load the worksheet at 0-based `index` from a workbook (xlsx, xlsm, xls, ods).
    ///
    /// Returns `Ok(None)` when the workbook has no worksheet at that index.
    pub fn from_workbook<P: AsRef<Path>>(path: P, index: usize) -> Result<Option<Self>> {
        let mut workbook = open_workbook_auto(path.as_ref())?;

        let Some(name) = workbook.sheet_names().get(index).cloned() else {
            return Ok(None);
        };

        let range = workbook.worksheet_range(&name)?;
        Ok(Some(range_to_sheet(&name, &range)))
    }

    /// Load the first worksheet of an Excel file
    pub fn from_xlsx<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        Self::from_workbook(path, 0)?.ok_or_else(|| SheetError::WorksheetNotFound {
            name: format!("#0 in {}", path.display()),
        })
    }

    /// Load a specific worksheet of an Excel file by name
    pub fn from_xlsx_sheet<P: AsRef<Path>>(path: P, sheet_name: &str) -> Result<Self> {
        let mut workbook = open_workbook_auto(path.as_ref())?;

        if !workbook.sheet_names().iter().any(|n| n == sheet_name) {
            return Err(SheetError::WorksheetNotFound {
                name: sheet_name.to_string(),
            });
        }

        let range = workbook.worksheet_range(sheet_name)?;
        Ok(range_to_sheet(sheet_name, &range))
    }
}
