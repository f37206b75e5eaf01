//! Live binding between one row and its rendered cells.

use std::sync::Arc;

use crate::column::ColumnKey;
use crate::detail::DetailRow;
use crate::error::ReconcileError;
use crate::mapping::MetaFieldPolicy;
use crate::reconcile::{Cell, ReconcileStats, reconcile};
use crate::render::CellRenderer;
use crate::row::RowData;

/// Cells of one visible row.
///
/// Layout, left to right: the toggle cell (always present, never
/// reconciled), the time cell when a time field is set, then one cell per
/// column. The time cell and the column cells are reconciled independently,
/// so a `timestamp` column never steals the time cell's handle.
#[derive(Debug)]
pub struct RowView<H> {
    row: Arc<RowData>,
    toggle: H,
    time: Vec<Cell<H>>,
    cells: Vec<Cell<H>>,
    expanded: bool,
}

impl<H> RowView<H> {
    /// Create an unrendered view: only the toggle cell exists until the
    /// first [`RowView::reconcile`].
    pub fn new<R>(row: Arc<RowData>, renderer: &mut R) -> Self
    where
        R: CellRenderer<Handle = H>,
    {
        let toggle = renderer.create_toggle(&row);
        Self {
            row,
            toggle,
            time: Vec::new(),
            cells: Vec::new(),
            expanded: false,
        }
    }

    /// Bring the cells in line with `columns` and `timefield`.
    pub fn reconcile<R>(
        &mut self,
        columns: &[ColumnKey],
        timefield: Option<&ColumnKey>,
        renderer: &mut R,
    ) -> Result<ReconcileStats, ReconcileError>
    where
        R: CellRenderer<Handle = H>,
    {
        let time_columns: Vec<ColumnKey> = timefield.into_iter().cloned().collect();
        let time = reconcile(renderer, std::mem::take(&mut self.time), &time_columns, &self.row)?;
        self.time = time.cells;
        let mut stats = time.stats;

        let body = reconcile(renderer, std::mem::take(&mut self.cells), columns, &self.row)?;
        self.cells = body.cells;
        stats += body.stats;
        Ok(stats)
    }

    pub fn row(&self) -> &RowData {
        &self.row
    }

    pub fn row_arc(&self) -> &Arc<RowData> {
        &self.row
    }

    /// Column cells, in column-list order.
    pub fn cells(&self) -> &[Cell<H>] {
        &self.cells
    }

    pub fn time_cell(&self) -> Option<&Cell<H>> {
        self.time.first()
    }

    pub fn toggle_handle(&self) -> &H {
        &self.toggle
    }

    /// Every handle of the summary row in display order.
    pub fn handles(&self) -> impl Iterator<Item = &H> {
        std::iter::once(&self.toggle)
            .chain(self.time.iter().map(Cell::handle))
            .chain(self.cells.iter().map(Cell::handle))
    }

    pub fn expanded(&self) -> bool {
        self.expanded
    }

    /// Flip the expanded state. Returns the new state.
    pub fn toggle<R>(&mut self, renderer: &mut R) -> bool
    where
        R: CellRenderer<Handle = H>,
    {
        self.expanded = !self.expanded;
        renderer.update_toggle(&self.toggle, self.expanded);
        self.expanded
    }

    /// Fields listed under this row; empty while collapsed.
    pub fn detail(&self, meta: &dyn MetaFieldPolicy) -> DetailRow {
        if self.expanded {
            DetailRow::collect(&self.row, meta)
        } else {
            DetailRow::empty()
        }
    }

    /// Tear the view down, releasing every handle.
    pub fn release<R>(self, renderer: &mut R)
    where
        R: CellRenderer<Handle = H>,
    {
        for cell in self.time.into_iter().chain(self.cells) {
            renderer.release(cell.into_handle());
        }
        renderer.release(self.toggle);
    }
}
