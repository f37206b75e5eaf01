//! Keyed, duplicate-aware row reconciliation.
//!
//! Given the cells a row rendered last time and the column list it must
//! render now, [`reconcile`] decides which cells survive, which die, and which
//! are born. A cell's identity is "the j-th occurrence of key K": the j-th old
//! occurrence of K is paired with the j-th new occurrence of K, for j up to
//! the smaller of the two counts. Pairing never looks at rendered text, and
//! no ordering constraint exists between different keys, so any permutation
//! of a column list keeps every cell.
//!
//! ```text
//! old: [_source]              new: [timestamp, bytes, _source, request]
//!       └──────────── kept ─────────────────────────┘
//!       created: timestamp, bytes, request
//! ```

use std::collections::{HashMap, VecDeque};

use crate::column::ColumnKey;
use crate::error::ReconcileError;
use crate::render::CellRenderer;
use crate::row::RowData;

/// One rendered column occurrence of a row.
#[derive(Debug, Clone)]
pub struct Cell<H> {
    column: ColumnKey,
    handle: H,
}

impl<H> Cell<H> {
    pub fn new(column: ColumnKey, handle: H) -> Self {
        Self { column, handle }
    }

    pub fn column(&self) -> &ColumnKey {
        &self.column
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn into_handle(self) -> H {
        self.handle
    }
}

/// Structural edits performed by one reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// New cells created through the renderer.
    pub created: usize,
    /// Old cells carried over, moved or not.
    pub reused: usize,
    /// Reused cells whose ordinal position changed.
    pub moved: usize,
    /// Old cells handed back to the renderer.
    pub released: usize,
}

impl ReconcileStats {
    /// True when the pass changed nothing at all.
    pub fn is_noop(&self) -> bool {
        self.created == 0 && self.moved == 0 && self.released == 0
    }
}

impl std::ops::AddAssign for ReconcileStats {
    fn add_assign(&mut self, rhs: Self) {
        self.created += rhs.created;
        self.reused += rhs.reused;
        self.moved += rhs.moved;
        self.released += rhs.released;
    }
}

#[derive(Debug)]
pub struct Reconciliation<H> {
    pub cells: Vec<Cell<H>>,
    pub stats: ReconcileStats,
}

/// Reconcile `previous` against `columns` for `row`.
///
/// The returned cells mirror `columns` exactly: same length, and
/// `cells[i].column() == columns[i]`. Cells that did not survive are released
/// through `renderer` before returning.
pub fn reconcile<R: CellRenderer>(
    renderer: &mut R,
    previous: Vec<Cell<R::Handle>>,
    columns: &[ColumnKey],
    row: &RowData,
) -> Result<Reconciliation<R::Handle>, ReconcileError> {
    let mut stats = ReconcileStats::default();

    // Old positions per key, left to right.
    let mut by_key: HashMap<ColumnKey, VecDeque<usize>> = HashMap::with_capacity(previous.len());
    for (index, cell) in previous.iter().enumerate() {
        by_key.entry(cell.column.clone()).or_default().push_back(index);
    }
    let mut slots: Vec<Option<Cell<R::Handle>>> = previous.into_iter().map(Some).collect();

    let mut cells = Vec::with_capacity(columns.len());
    for (new_index, key) in columns.iter().enumerate() {
        let reused = by_key
            .get_mut(key)
            .and_then(VecDeque::pop_front)
            .and_then(|old_index| {
                let cell = slots.get_mut(old_index).and_then(Option::take)?;
                if old_index != new_index {
                    stats.moved += 1;
                }
                Some(cell)
            });

        match reused {
            Some(cell) => {
                stats.reused += 1;
                cells.push(cell);
            }
            None => {
                stats.created += 1;
                cells.push(Cell::new(key.clone(), renderer.create(row, key)));
            }
        }
    }

    for cell in slots.into_iter().flatten() {
        stats.released += 1;
        renderer.release(cell.into_handle());
    }

    let cells = checked(renderer, cells, columns)?;

    log::debug!(
        "[reconcile] row={:?} columns={} created={} reused={} moved={} released={}",
        row.id(),
        columns.len(),
        stats.created,
        stats.reused,
        stats.moved,
        stats.released
    );

    Ok(Reconciliation { cells, stats })
}

/// Verify `cells` against `columns`. On failure every cell is released
/// before the error is returned.
fn checked<R: CellRenderer>(
    renderer: &mut R,
    cells: Vec<Cell<R::Handle>>,
    columns: &[ColumnKey],
) -> Result<Vec<Cell<R::Handle>>, ReconcileError> {
    if let Err(err) = verify(&cells, columns) {
        for cell in cells {
            renderer.release(cell.into_handle());
        }
        return Err(err);
    }
    Ok(cells)
}

fn verify<H>(cells: &[Cell<H>], columns: &[ColumnKey]) -> Result<(), ReconcileError> {
    if cells.len() != columns.len() {
        log::error!(
            "[reconcile] produced {} cells for {} columns",
            cells.len(),
            columns.len()
        );
        return Err(ReconcileError::InvariantViolation {
            expected: columns.len(),
            actual: cells.len(),
        });
    }
    if let Some((index, (cell, expected))) = cells
        .iter()
        .zip(columns)
        .enumerate()
        .find(|(_, (cell, expected))| cell.column != **expected)
    {
        log::error!(
            "[reconcile] cell {} renders {} where column list has {}",
            index,
            cell.column,
            expected
        );
        return Err(ReconcileError::ColumnMismatch {
            index,
            expected: (*expected).clone(),
            actual: cell.column.clone(),
        });
    }
    Ok(())
}
