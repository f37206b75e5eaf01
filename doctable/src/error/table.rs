//! TableError for table assembler operations

use super::{ConfigError, ReconcileError};

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
