//! Write-backs from the table to its host.

use serde::Serialize;

use crate::column::ColumnList;
use crate::header::SortSpec;

/// Something the user did that the host may want to act on.
///
/// The table never changes host-owned state behind the host's back; it
/// queues one of these and the host drains the queue after each call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableEvent {
    /// The sort changed (the host usually re-queries and replaces rows).
    SortChanged { sorting: Option<SortSpec> },
    /// The column list was edited from the header.
    ColumnsChanged { columns: ColumnList },
    /// A row was expanded or collapsed.
    RowToggled { index: usize, expanded: bool },
    /// More rows were revealed.
    RowsRevealed { count: usize },
}
