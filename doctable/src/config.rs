//! Table configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::column::{ColumnKey, ColumnList};
use crate::error::ConfigError;
use crate::header::SortSpec;
use crate::mapping::{DEFAULT_META_FIELDS, MetaFields};

/// Rows revealed initially and per `add_rows` call when nothing else is set.
pub const DEFAULT_MAX_LENGTH: usize = 50;

/// Initial bindings of a table.
///
/// # Example
///
/// ```
/// use doctable::config::TableConfig;
///
/// let config = TableConfig::default()
///     .with_max_length(100)
///     .with_timefield("@timestamp")
///     .with_columns(["bytes", "request"]);
/// assert_eq!(config.max_length, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Initial reveal count and reveal increment.
    ///
    /// Default: 50
    pub max_length: usize,

    /// Field shown in the pinned time column, if any.
    pub timefield: Option<ColumnKey>,

    /// Initial column list.
    pub columns: ColumnList,

    /// Initial sort.
    pub sorting: Option<SortSpec>,

    /// Fields left out of detail rows.
    ///
    /// Default: `_id`, `_type`, `_index`, `_score`
    pub meta_fields: Vec<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            timefield: None,
            columns: ColumnList::new(),
            sorting: None,
            meta_fields: DEFAULT_META_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_timefield(mut self, timefield: impl Into<ColumnKey>) -> Self {
        self.timefield = Some(timefield.into());
        self
    }

    pub fn with_columns(mut self, columns: impl IntoIterator<Item = impl Into<ColumnKey>>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sorting(mut self, sorting: SortSpec) -> Self {
        self.sorting = Some(sorting);
        self
    }

    pub fn with_meta_fields(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.meta_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn meta_policy(&self) -> MetaFields {
        MetaFields::new(self.meta_fields.iter().cloned())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_length == 0 {
            return Err(ConfigError::InvalidMaxLength);
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
