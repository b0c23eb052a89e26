use crate::a1_notation::parse_a1;
use crate::cell::CellValue;
use crate::error::{Result, SheetError};

/// A sheet representing a 2D grid of cells (row-major storage).
///
/// Row 0 is the header row. Rows may be ragged: [`Sheet::get`] past the end
/// of a short row is [`SheetError::IndexOutOfBounds`](crate::SheetError::IndexOutOfBounds).
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    data: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create a new empty sheet
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Sheet1")
    }

    /// Create a new empty sheet with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Sheet {
            name: name.to_string(),
            data: Vec::new(),
        }
    }

    /// Create a sheet from a 2D vector of values
    #[must_use]
    pub fn from_data<T: Into<CellValue>>(data: Vec<Vec<T>>) -> Self {
        let converted: Vec<Vec<CellValue>> = data
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        Sheet {
            name: "Sheet1".to_string(),
            data: converted,
        }
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of rows, header row included
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Get the width of the widest row
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.data.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Check if the sheet has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the raw cells of a row by 0-based position
    #[must_use]
    pub fn row_cells(&self, position: usize) -> Option<&[CellValue]> {
        self.data.get(position).map(Vec::as_slice)
    }

    /// Header labels from row 0, trimmed. Empty when the sheet has no rows.
    #[must_use]
    pub fn header(&self) -> Vec<String> {
        self.data
            .first()
            .map(|row| row.iter().map(|c| c.as_str().trim().to_string()).collect())
            .unwrap_or_default()
    }

    /// Get a cell by 0-based row and column
    pub fn get(&self, row: usize, col: usize) -> Result<&CellValue> {
        self.data
            .get(row)
            .and_then(|r| r.get(col))
            .ok_or(SheetError::IndexOutOfBounds {
                row,
                col,
                rows: self.row_count(),
                cols: self.col_count(),
            })
    }

    /// Get a cell by A1 notation (e.g., "B2")
    pub fn get_a1(&self, notation: &str) -> Result<&CellValue> {
        let (row, col) = parse_a1(notation)?;
        self.get(row, col)
    }

    /// Get all rows
    #[must_use]
    pub fn data(&self) -> &[Vec<CellValue>] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut Vec<Vec<CellValue>> {
        &mut self.data
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}
