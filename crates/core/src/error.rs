//! Error types for sheetbind.

use crate::verdict::Verdict;
use sheetbind_sheet::SheetError;
use thiserror::Error;

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Errors that can occur while importing a sheet.
///
/// Bad headers and bad cell values are not errors: they come back as a
/// [`Verdict`] or as `invalid_cells` on a row result.
#[derive(Debug, Error)]
pub enum ImportError {
    /// A row was requested before `validate` or `load` was called.
    #[error("Sheet not loaded. Call load or validate first")]
    NotValidated,

    /// The last validation rejected the sheet.
    #[error("Sheet is invalid: {verdict}")]
    InvalidSheet { verdict: Verdict },

    /// The record type does not build even from its own defaults.
    #[error("Failed to build record from row {row}: {source}")]
    RecordBuild {
        row: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The background loader task failed.
    #[error("Loader task failed: {0}")]
    Task(String),

    /// Sheet loading error.
    #[error(transparent)]
    Sheet(#[from] SheetError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ImportError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// True for errors caused by calling session operations out of order.
    #[must_use]
    pub fn is_state_error(&self) -> bool {
        matches!(self, Self::NotValidated | Self::InvalidSheet { .. })
    }
}
