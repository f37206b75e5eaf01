//! CliError for the doctable binary

use std::path::PathBuf;

use doctable::error::{ConfigError, RowError, TableError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Rows(#[from] RowError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
