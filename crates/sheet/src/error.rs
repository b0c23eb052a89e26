use thiserror::Error;

/// Errors that can occur while loading or addressing sheet data
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Index out of bounds: row {row}, col {col} (sheet has {rows} rows, {cols} cols)")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Invalid cell notation: {0}")]
    InvalidCellNotation(String),

    #[error("Worksheet not found: {name}")]
    WorksheetNotFound { name: String },

    #[error("Unsupported file format: {path}")]
    UnsupportedFormat { path: String },

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<calamine::Error> for SheetError {
    fn from(err: calamine::Error) -> Self {
        match err {
            calamine::Error::Io(io) => SheetError::Io(io),
            other => SheetError::Workbook(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
