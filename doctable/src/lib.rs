//! Keyed row reconciliation for a document table.
//!
//! A [`TableAssembler`](table::TableAssembler) owns the header state, the
//! revealed window of rows, and one [`RowView`](row_view::RowView) per
//! visible row. Every change to the columns, sort, time field or reveal count
//! re-reconciles each visible row so that a cell keeps its render handle for
//! as long as its column occurrence survives.

pub mod column;
pub mod config;
pub mod detail;
pub mod error;
pub mod event;
pub mod header;
pub mod mapping;
pub mod reconcile;
pub mod render;
pub mod row;
pub mod row_view;
pub mod table;

pub mod prelude {
    pub use crate::column::{ColumnKey, ColumnList};
    pub use crate::config::TableConfig;
    pub use crate::detail::{DetailEntry, DetailRow};
    pub use crate::error::{ConfigError, ReconcileError, RowError, TableError};
    pub use crate::event::TableEvent;
    pub use crate::header::{
        HeaderCell, HeaderCellKind, HeaderController, SortDirection, SortIndicator, SortSpec,
    };
    pub use crate::mapping::{
        DefaultFormatter, FieldMapping, FieldSpec, FieldType, FilterSink, Mapping, MetaFieldPolicy,
        MetaFields, SharedMapping, ValueFormatter,
    };
    pub use crate::reconcile::{Cell, ReconcileStats, Reconciliation, reconcile};
    pub use crate::render::{CellRenderer, ElementRenderer};
    pub use crate::row::{FieldValue, RowData, SOURCE_FIELD};
    pub use crate::row_view::RowView;
    pub use crate::table::TableAssembler;
}
