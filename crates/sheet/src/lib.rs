//! Sheet model for sheetbind
//!
//! Provides the raw tabular data that the import layer validates and maps:
//! cell values, 1-based rows that keep a handle on their sheet, and loaders
//! for CSV/TSV and workbook files.
//!
//! # Examples
//!
//! ```
//! use sheetbind_sheet::{Row, Sheet};
//! use std::sync::Arc;
//!
//! let sheet = Arc::new(Sheet::from_data(vec![
//!     vec!["Name", "Age"],
//!     vec!["Alice", "30"],
//! ]));
//!
//! assert_eq!(sheet.header(), vec!["Name".to_string(), "Age".to_string()]);
//!
//! let row = Row::from_sheet(&sheet, 1).unwrap();
//! assert_eq!(row.index(), 2);
//! assert_eq!(row.address(1), "B2");
//! ```

mod a1_notation;
mod cell;
mod csv;
mod error;
mod row;
mod sheet;
mod xlsx;

pub use a1_notation::{column_letters, parse_a1, to_a1};
pub use cell::CellValue;
pub use csv::CsvOptions;
pub use error::{Result, SheetError};
pub use row::Row;
pub use sheet::Sheet;
