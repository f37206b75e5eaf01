//! ReconcileError for the row reconciliation engine

use crate::column::ColumnKey;

/// A reconciliation produced a cell sequence that does not mirror its column list.
///
/// Never expected for any input. Seeing one means the engine itself is broken,
/// so callers propagate it rather than render a partially correct row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    #[error("Reconciliation invariant violated: expected {expected} cells, produced {actual}")]
    InvariantViolation { expected: usize, actual: usize },

    #[error("Reconciliation invariant violated: cell {index} renders '{actual}', column list has '{expected}'")]
    ColumnMismatch {
        index: usize,
        expected: ColumnKey,
        actual: ColumnKey,
    },
}
