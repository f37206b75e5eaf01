//! ConfigError for loading table configuration and mappings

/// Error type for configuration and mapping files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The reveal batch size must be at least one row.
    #[error("max_length must be greater than zero")]
    InvalidMaxLength,
}
