//! Spreadsheet readers: where sheets come from and how rows are paged.

use crate::error::{ImportError, ImportResult};
use async_trait::async_trait;
use sheetbind_sheet::{CsvOptions, Row, Sheet, SheetError};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

/// Source of sheets and a positional row cursor over the loaded one.
///
/// The cursor is stateful, so one reader serves one caller at a time.
#[async_trait]
pub trait SpreadsheetReader: Send {
    /// Load the sheet at `sheet_index` of `source` and rewind the cursor.
    ///
    /// Returns `Ok(None)` when the source or the sheet does not exist.
    async fn load_sheet(
        &mut self,
        source: &str,
        sheet_index: usize,
    ) -> ImportResult<Option<Arc<Sheet>>>;

    /// Advance to the next row. Returns `false` once the sheet is exhausted.
    async fn read_row(&mut self) -> ImportResult<bool>;

    /// The row the cursor is on, if any.
    fn current(&self) -> Option<&Row>;

    /// Rewind the cursor to before the first row.
    fn reset(&mut self);
}

/// Positional cursor shared by the bundled readers.
#[derive(Debug, Default)]
pub struct RowCursor {
    sheet: Option<Arc<Sheet>>,
    next: usize,
    current: Option<Row>,
}

impl RowCursor {
    /// Point the cursor at a new sheet (or none) and rewind.
    pub fn attach(&mut self, sheet: Option<Arc<Sheet>>) {
        self.sheet = sheet;
        self.reset();
    }

    /// Move to the next row; `false` when there is none.
    pub fn advance(&mut self) -> bool {
        let row = self
            .sheet
            .as_ref()
            .and_then(|sheet| Row::from_sheet(sheet, self.next));

        match row {
            Some(row) => {
                self.next += 1;
                self.current = Some(row);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&Row> {
        self.current.as_ref()
    }

    pub fn reset(&mut self) {
        self.next = 0;
        self.current = None;
    }
}

/// Reader over sheets already held in memory, keyed by source name.
#[derive(Debug, Default)]
pub struct MemoryReader {
    sources: HashMap<String, Vec<Arc<Sheet>>>,
    cursor: RowCursor,
}

impl MemoryReader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `sheets` under `source`, replacing earlier ones.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>, sheets: Vec<Sheet>) -> Self {
        self.insert(source, sheets);
        self
    }

    pub fn insert(&mut self, source: impl Into<String>, sheets: Vec<Sheet>) {
        self.sources
            .insert(source.into(), sheets.into_iter().map(Arc::new).collect());
    }
}

#[async_trait]
impl SpreadsheetReader for MemoryReader {
    async fn load_sheet(
        &mut self,
        source: &str,
        sheet_index: usize,
    ) -> ImportResult<Option<Arc<Sheet>>> {
        let sheet = self
            .sources
            .get(source)
            .and_then(|sheets| sheets.get(sheet_index))
            .cloned();
        self.cursor.attach(sheet.clone());
        Ok(sheet)
    }

    async fn read_row(&mut self) -> ImportResult<bool> {
        Ok(self.cursor.advance())
    }

    fn current(&self) -> Option<&Row> {
        self.cursor.current()
    }

    fn reset(&mut self) {
        self.cursor.reset();
    }
}

/// Reader over files on disk, chosen by extension:
/// `.csv`/`.tsv` as delimited text, `.xlsx`/`.xlsm`/`.xlsb`/`.xls`/`.ods` as workbooks.
///
/// Delimited files hold a single sheet at index 0. Parsing runs on the
/// blocking thread pool.
#[derive(Debug, Default)]
pub struct FileReader {
    csv_options: Option<CsvOptions>,
    cursor: RowCursor,
}

impl FileReader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the CSV options; by default `.tsv` uses tabs and `.csv` commas.
    #[must_use]
    pub fn with_csv_options(mut self, options: CsvOptions) -> Self {
        self.csv_options = Some(options);
        self
    }
}

fn load_file(
    path: &Path,
    sheet_index: usize,
    csv_options: Option<CsvOptions>,
) -> ImportResult<Option<Sheet>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let is_delimited = matches!(extension.as_str(), "csv" | "tsv");
    let is_workbook = matches!(extension.as_str(), "xlsx" | "xlsm" | "xlsb" | "xls" | "ods");
    if !is_delimited && !is_workbook {
        return Err(SheetError::UnsupportedFormat {
            path: path.display().to_string(),
        }
        .into());
    }

    if !path.is_file() {
        return Ok(None);
    }

    let loaded = if is_delimited {
        if sheet_index > 0 {
            return Ok(None);
        }
        let options = csv_options.unwrap_or_else(|| {
            if extension == "tsv" {
                CsvOptions::tsv()
            } else {
                CsvOptions::default()
            }
        });
        Sheet::from_csv_with_options(path, options).map(Some)
    } else {
        Sheet::from_workbook(path, sheet_index)
    };

    match loaded {
        Ok(sheet) => Ok(sheet),
        // removed between the existence check and the open
        Err(SheetError::Io(err)) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[async_trait]
impl SpreadsheetReader for FileReader {
    async fn load_sheet(
        &mut self,
        source: &str,
        sheet_index: usize,
    ) -> ImportResult<Option<Arc<Sheet>>> {
        let path = Path::new(source).to_path_buf();
        let csv_options = self.csv_options.clone();

        let sheet = tokio::task::spawn_blocking(move || load_file(&path, sheet_index, csv_options))
            .await
            .map_err(|e| ImportError::Task(e.to_string()))??
            .map(Arc::new);

        match &sheet {
            Some(sheet) => tracing::info!(
                source,
                sheet = sheet.name(),
                rows = sheet.row_count(),
                "loaded sheet"
            ),
            None => tracing::warn!(source, sheet_index, "sheet not found"),
        }

        self.cursor.attach(sheet.clone());
        Ok(sheet)
    }

    async fn read_row(&mut self) -> ImportResult<bool> {
        Ok(self.cursor.advance())
    }

    fn current(&self) -> Option<&Row> {
        self.cursor.current()
    }

    fn reset(&mut self) {
        self.cursor.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_reader_pages_rows() {
        let mut reader = MemoryReader::new().with_source(
            "people",
            vec![Sheet::from_data(vec![vec!["Name"], vec!["Alice"]])],
        );

        assert!(reader.load_sheet("people", 0).await.unwrap().is_some());
        assert!(reader.current().is_none());
        assert!(reader.read_row().await.unwrap());
        assert_eq!(reader.current().unwrap().index(), 1);
        assert!(reader.read_row().await.unwrap());
        assert_eq!(reader.current().unwrap().index(), 2);
        assert!(!reader.read_row().await.unwrap());

        reader.reset();
        assert!(reader.read_row().await.unwrap());
        assert_eq!(reader.current().unwrap().index(), 1);
    }

    #[tokio::test]
    async fn test_memory_reader_missing_source_or_index() {
        let mut reader = MemoryReader::new().with_source("a", vec![Sheet::new()]);

        assert!(reader.load_sheet("b", 0).await.unwrap().is_none());
        assert!(reader.load_sheet("a", 1).await.unwrap().is_none());
        assert!(!reader.read_row().await.unwrap());
    }

    #[tokio::test]
    async fn test_file_reader_csv_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.csv");
        std::fs::write(&path, "Name,Age\nAlice,30\n").unwrap();
        let source = path.to_str().unwrap();

        let mut reader = FileReader::new();
        let sheet = reader.load_sheet(source, 0).await.unwrap().unwrap();
        assert_eq!(sheet.row_count(), 2);
        assert!(reader.load_sheet(source, 1).await.unwrap().is_none());

        let missing = dir.path().join("missing.xlsx");
        assert!(reader
            .load_sheet(missing.to_str().unwrap(), 0)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_file_reader_rejects_unknown_extension() {
        let mut reader = FileReader::new();
        let err = reader.load_sheet("data.json", 0).await.unwrap_err();
        assert!(matches!(err, ImportError::Sheet(SheetError::UnsupportedFormat { .. })));
    }
}
