//! RowError for building rows from documents

/// Error type for turning JSON documents into rows.
#[derive(Debug, thiserror::Error)]
pub enum RowError {
    #[error("Failed to parse rows: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rows must be a JSON array of documents")]
    NotAnArray,

    #[error("Row {index} is not a JSON object")]
    NotAnObject { index: usize },
}
