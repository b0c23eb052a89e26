//! Sheet session: the load → validate → read lifecycle over one reader.

use crate::column_map::ColumnMap;
use crate::config::{ImportConfig, ImportOptions};
use crate::error::{ImportError, ImportResult};
use crate::mapper::{parse_row, RowParseResult};
use crate::naming::NamingStrategy;
use crate::reader::SpreadsheetReader;
use crate::schema::Record;
use crate::validator::validate_sheet;
use crate::verdict::Verdict;
use sheetbind_sheet::Row;
use std::marker::PhantomData;

/// Externally visible lifecycle state of a [`SheetSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Nothing validated yet; reads are rejected.
    Unloaded,
    /// Validated without errors; no row read since the last validate or reset.
    Ready,
    /// Rows are being read.
    Reading,
    /// The last validation found errors; reads are rejected.
    Rejected,
}

/// What a successful validation fixes for the reads that follow.
#[derive(Debug)]
struct ReadPlan {
    column_map: ColumnMap,
    naming: NamingStrategy,
    verdict: Verdict,
}

#[derive(Debug, Default)]
enum SessionState {
    #[default]
    Unloaded,
    Ready(ReadPlan),
    Reading(ReadPlan),
    Rejected(Verdict),
}

/// Reads the rows of one sheet as records of type `T`.
///
/// A session must be validated (or loaded) before any row is read, and every
/// call to [`SheetSession::validate`] starts over.
///
/// ```
/// # use sheetbind_core::{ColumnMap, FieldType, ImportOptions, MemoryReader, Record, RecordSchema, SheetSession};
/// # use sheetbind_sheet::Sheet;
/// # use serde::{Deserialize, Serialize};
/// # use std::sync::OnceLock;
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// struct Person {
///     name: String,
///     age: i64,
/// }
///
/// impl Record for Person {
///     fn schema() -> &'static RecordSchema {
///         static SCHEMA: OnceLock<RecordSchema> = OnceLock::new();
///         SCHEMA.get_or_init(|| {
///             RecordSchema::new("Person")
///                 .field("name", FieldType::Text)
///                 .field("age", FieldType::Int)
///         })
///     }
/// }
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let reader = MemoryReader::new().with_source(
///     "people",
///     vec![Sheet::from_data(vec![vec!["Name", "Age"], vec!["Alice", "30"]])],
/// );
/// let mut session = SheetSession::<Person, _>::new(reader);
///
/// let map = ColumnMap::new().with("Name", "name").with("Age", "age");
/// session.load("people", map, &ImportOptions::default()).await.unwrap();
///
/// let rows = session.read_all().await.unwrap();
/// assert_eq!(rows[0].record().unwrap().age, 30);
/// # });
/// ```
#[derive(Debug)]
pub struct SheetSession<T, R> {
    reader: R,
    state: SessionState,
    rows_count: usize,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record, R: SpreadsheetReader> SheetSession<T, R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            state: SessionState::Unloaded,
            rows_count: 0,
            _record: PhantomData,
        }
    }

    /// Load the sheet and check its header against `T`.
    ///
    /// Data problems come back in the verdict; `Err` is reserved for reader
    /// failures. An empty `column_map` maps each header to the field of the
    /// same name.
    pub async fn validate(
        &mut self,
        source: &str,
        column_map: ColumnMap,
        options: &ImportOptions,
    ) -> ImportResult<Verdict> {
        self.state = SessionState::Unloaded;
        self.rows_count = 0;

        let sheet = self.reader.load_sheet(source, options.sheet_index).await?;
        let naming = options.naming_strategy;
        let verdict = validate_sheet(sheet.as_deref(), &column_map, naming, T::schema());

        if let Some(sheet) = &sheet {
            self.rows_count = sheet.row_count();
        }

        if verdict.has_errors() {
            tracing::info!(source, %verdict, "sheet rejected");
            self.state = SessionState::Rejected(verdict.clone());
            return Ok(verdict);
        }

        let column_map = match &sheet {
            Some(sheet) if column_map.is_empty() => ColumnMap::identity(&sheet.header()),
            _ => column_map,
        };

        tracing::info!(
            source,
            rows = self.rows_count,
            columns = column_map.len(),
            "sheet validated"
        );
        self.state = SessionState::Ready(ReadPlan {
            column_map,
            naming,
            verdict: verdict.clone(),
        });
        Ok(verdict)
    }

    /// [`SheetSession::validate`], failing with [`ImportError::InvalidSheet`]
    /// when the verdict has errors.
    pub async fn load(
        &mut self,
        source: &str,
        column_map: ColumnMap,
        options: &ImportOptions,
    ) -> ImportResult<()> {
        let verdict = self.validate(source, column_map, options).await?;
        if verdict.has_errors() {
            return Err(ImportError::InvalidSheet { verdict });
        }
        Ok(())
    }

    /// [`SheetSession::validate`] driven by an [`ImportConfig`].
    pub async fn validate_with(
        &mut self,
        source: &str,
        config: &ImportConfig,
    ) -> ImportResult<Verdict> {
        self.validate(source, config.columns.clone(), &config.options)
            .await
    }

    /// [`SheetSession::load`] driven by an [`ImportConfig`].
    pub async fn load_with(&mut self, source: &str, config: &ImportConfig) -> ImportResult<()> {
        self.load(source, config.columns.clone(), &config.options).await
    }

    /// Read and map the next data row. `Ok(None)` once the sheet is exhausted.
    ///
    /// The header row is never returned.
    pub async fn read(&mut self) -> ImportResult<Option<RowParseResult<T>>> {
        self.start_reading()?;
        let SessionState::Reading(plan) = &self.state else {
            return Err(ImportError::NotValidated);
        };

        let mut found = self.reader.read_row().await?;
        let on_header = self.reader.current().map(Row::index) == Some(1);
        if found && on_header && plan.verdict.ignore_first_row() {
            found = self.reader.read_row().await?;
        }
        if !found {
            return Ok(None);
        }

        let Some(row) = self.reader.current().cloned() else {
            return Ok(None);
        };
        parse_row(row, &plan.column_map, plan.naming).map(Some)
    }

    /// Read every remaining row, dropping rows whose cells are all blank.
    pub async fn read_all(&mut self) -> ImportResult<Vec<RowParseResult<T>>> {
        let mut results = Vec::new();
        let mut blank = 0usize;

        while let Some(result) = self.read().await? {
            if result.row().is_blank() {
                blank += 1;
                continue;
            }
            results.push(result);
        }

        let invalid = results.iter().filter(|r| !r.is_valid()).count();
        tracing::debug!(rows = results.len(), invalid, blank, "read all rows");
        Ok(results)
    }

    /// Rewind to the first row, keeping the validated map and verdict.
    pub fn reset(&mut self) {
        self.reader.reset();
        self.state = match std::mem::take(&mut self.state) {
            SessionState::Reading(plan) => SessionState::Ready(plan),
            other => other,
        };
    }

    /// Row count of the loaded sheet, header row included.
    pub fn rows_count(&self) -> usize {
        self.rows_count
    }

    /// Verdict of the last validation, if any.
    pub fn verdict(&self) -> Option<&Verdict> {
        match &self.state {
            SessionState::Unloaded => None,
            SessionState::Ready(plan) | SessionState::Reading(plan) => Some(&plan.verdict),
            SessionState::Rejected(verdict) => Some(verdict),
        }
    }

    pub fn status(&self) -> SessionStatus {
        match self.state {
            SessionState::Unloaded => SessionStatus::Unloaded,
            SessionState::Ready(_) => SessionStatus::Ready,
            SessionState::Reading(_) => SessionStatus::Reading,
            SessionState::Rejected(_) => SessionStatus::Rejected,
        }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    fn start_reading(&mut self) -> ImportResult<()> {
        match &self.state {
            SessionState::Unloaded => return Err(ImportError::NotValidated),
            SessionState::Rejected(verdict) => {
                return Err(ImportError::InvalidSheet {
                    verdict: verdict.clone(),
                })
            }
            SessionState::Reading(_) => return Ok(()),
            SessionState::Ready(_) => {}
        }

        self.state = match std::mem::take(&mut self.state) {
            SessionState::Ready(plan) => SessionState::Reading(plan),
            other => other,
        };
        Ok(())
    }
}
