//! # sheetbind-core
//!
//! Maps the rows of a spreadsheet onto typed records.
//!
//! This crate provides:
//! - Record schemas and the [`Record`] trait
//! - Header validation producing a [`Verdict`]
//! - Cell conversion and row mapping
//! - Spreadsheet readers and the [`SheetSession`] lifecycle
//! - Import configuration loaded from JSON or YAML
//!
//! A typical import validates the sheet once, then reads rows until the sheet
//! is exhausted:
//!
//! ```no_run
//! # use sheetbind_core::{FileReader, ImportConfig, Record, SheetSession, ImportResult};
//! # async fn import<T: Record>() -> ImportResult<()> {
//! let config = ImportConfig::from_path("import.yaml")?;
//! let mut session = SheetSession::<T, _>::new(FileReader::new());
//!
//! let verdict = session.validate_with("people.xlsx", &config).await?;
//! if verdict.has_errors() {
//!     eprintln!("{verdict}");
//!     return Ok(());
//! }
//!
//! while let Some(result) = session.read().await? {
//!     if !result.is_valid() {
//!         eprintln!("row {}: bad cells {:?}", result.row().index(), result.invalid_cell_addresses());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Header label to field path mapping.
pub mod column_map;
/// Import options and configuration files.
pub mod config;
/// Cell to field value conversion.
pub mod convert;
/// Error types and result aliases.
pub mod error;
/// Row mapping and per-row outcomes.
pub mod mapper;
/// Field name transforms.
pub mod naming;
/// Spreadsheet readers.
pub mod reader;
/// Record schemas.
pub mod schema;
/// Sheet session lifecycle.
pub mod session;
/// Header validation.
pub mod validator;
/// Converted field values.
pub mod value;
/// Validation outcomes.
pub mod verdict;

pub use column_map::ColumnMap;
pub use config::{ImportConfig, ImportOptions};
pub use convert::{convert, ConversionError};
pub use error::{ImportError, ImportResult};
pub use mapper::{map_row, parse_row, RowMapping, RowParseResult};
pub use naming::NamingStrategy;
pub use reader::{FileReader, MemoryReader, RowCursor, SpreadsheetReader};
pub use schema::{FieldType, PropertyPath, Record, RecordSchema};
pub use session::{SessionStatus, SheetSession};
pub use validator::validate_sheet;
pub use value::{fields_to_json, FieldMap, FieldValue};
pub use verdict::{MapPair, Verdict, VerdictKind};

/// Re-export the sheet model.
pub use sheetbind_sheet::{CellValue, CsvOptions, Row, Sheet, SheetError};
