//! Import options and file-based import configuration.

use crate::column_map::ColumnMap;
use crate::error::{ImportError, ImportResult};
use crate::naming::NamingStrategy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options for validating and reading a sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// 0-based index of the worksheet to read
    pub sheet_index: usize,
    /// Transform applied to mapped field names
    pub naming_strategy: NamingStrategy,
}

impl ImportOptions {
    /// Set the worksheet index
    #[must_use]
    pub fn with_sheet_index(mut self, sheet_index: usize) -> Self {
        self.sheet_index = sheet_index;
        self
    }

    /// Set the naming strategy
    #[must_use]
    pub fn with_naming_strategy(mut self, naming_strategy: NamingStrategy) -> Self {
        self.naming_strategy = naming_strategy;
        self
    }
}

/// Import options plus the column map, as kept in a JSON or YAML file:
///
/// ```yaml
/// sheet_index: 0
/// naming_strategy: snake_case
/// columns:
///   First Name: FirstName
///   Age: Age
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    #[serde(flatten)]
    pub options: ImportOptions,
    pub columns: ColumnMap,
}

impl ImportConfig {
    pub fn from_json_str(content: &str) -> ImportResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> ImportResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Self::from_json_str(&content),
            "yaml" | "yml" => Self::from_yaml_str(&content),
            _ => Err(ImportError::config(format!(
                "unsupported config format: {}",
                path.display()
            ))),
        }
    }
}
