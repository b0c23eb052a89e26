use crate::a1_notation::to_a1;
use crate::cell::CellValue;
use crate::sheet::Sheet;
use std::sync::Arc;

/// A single row read from a sheet.
///
/// `index` is 1-based, so the header row of a sheet is row 1.
#[derive(Debug, Clone)]
pub struct Row {
    index: usize,
    cells: Vec<CellValue>,
    sheet: Arc<Sheet>,
}

impl Row {
    /// Take a snapshot of the row at 0-based `position`, or `None` past the end.
    #[must_use]
    pub fn from_sheet(sheet: &Arc<Sheet>, position: usize) -> Option<Self> {
        let cells = sheet.row_cells(position)?.to_vec();
        Some(Row {
            index: position + 1,
            cells,
            sheet: Arc::clone(sheet),
        })
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    #[must_use]
    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    /// Trimmed header labels of the owning sheet
    #[must_use]
    pub fn header(&self) -> Vec<String> {
        self.sheet.header()
    }

    /// True when every cell is null or renders as the empty string
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellValue::is_blank)
    }

    /// A1 address of the cell at 0-based column `col` in this row
    #[must_use]
    pub fn address(&self, col: usize) -> String {
        to_a1(self.index - 1, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> Arc<Sheet> {
        Arc::new(Sheet::from_data(vec![
            vec![CellValue::from("Name"), CellValue::from("Age")],
            vec![CellValue::Null, CellValue::from("")],
            vec![CellValue::from("Bob"), CellValue::Int(41)],
        ]))
    }

    #[test]
    fn test_index_is_one_based() {
        let sheet = sheet();
        assert_eq!(Row::from_sheet(&sheet, 0).unwrap().index(), 1);
        assert_eq!(Row::from_sheet(&sheet, 2).unwrap().index(), 3);
        assert!(Row::from_sheet(&sheet, 3).is_none());
    }

    #[test]
    fn test_blank_row() {
        let sheet = sheet();
        assert!(Row::from_sheet(&sheet, 1).unwrap().is_blank());
        assert!(!Row::from_sheet(&sheet, 2).unwrap().is_blank());
    }

    #[test]
    fn test_address() {
        let sheet = sheet();
        let row = Row::from_sheet(&sheet, 2).unwrap();
        assert_eq!(row.address(1), "B3");
        assert_eq!(row.header(), vec!["Name".to_string(), "Age".to_string()]);
    }
}
