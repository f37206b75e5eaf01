//! Render handles for cells.
//!
//! The reconciliation engine never builds UI itself. It asks a
//! [`CellRenderer`] for a handle when a cell is born and hands the handle
//! back when the cell dies. Everything in between (moves, transient state)
//! happens to the handle without the renderer being consulted.

use tabledom::{Element, ElementRef};

use crate::column::ColumnKey;
use crate::row::RowData;

pub trait CellRenderer {
    type Handle;

    /// Create the handle for one column occurrence of `row`.
    fn create(&mut self, row: &RowData, column: &ColumnKey) -> Self::Handle;

    /// Create the handle of a row's leading expand/collapse cell.
    fn create_toggle(&mut self, row: &RowData) -> Self::Handle;

    /// Reflect a row's expanded state on its toggle handle.
    fn update_toggle(&mut self, _handle: &Self::Handle, _expanded: bool) {}

    /// Detach a handle whose cell did not survive reconciliation.
    fn release(&mut self, _handle: Self::Handle) {}
}

pub const TOGGLE_COLLAPSED_CLASS: &str = "fa-caret-right";
pub const TOGGLE_EXPANDED_CLASS: &str = "fa-caret-down";

/// Renders cells as shared [`tabledom`] elements.
///
/// Column cells carry their key under the `column` data entry. Toggle cells
/// carry `action = toggle` and no text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementRenderer;

impl CellRenderer for ElementRenderer {
    type Handle = ElementRef;

    fn create(&mut self, row: &RowData, column: &ColumnKey) -> ElementRef {
        let element = Element::cell(row.display(column.as_str()))
            .class("discover-table-datafield")
            .data("column", column.as_str());
        log::trace!("[render] create {} for column {}", element.id, column);
        ElementRef::new(element)
    }

    fn create_toggle(&mut self, _row: &RowData) -> ElementRef {
        ElementRef::new(
            Element::new(tabledom::Tag::Cell)
                .class("discover-table-open-icon")
                .class(TOGGLE_COLLAPSED_CLASS)
                .clickable(true)
                .data("action", "toggle"),
        )
    }

    fn update_toggle(&mut self, handle: &ElementRef, expanded: bool) {
        let (from, to) = if expanded {
            (TOGGLE_COLLAPSED_CLASS, TOGGLE_EXPANDED_CLASS)
        } else {
            (TOGGLE_EXPANDED_CLASS, TOGGLE_COLLAPSED_CLASS)
        };
        handle.update(|el| {
            el.classes.retain(|c| c != from && c != to);
            el.classes.push(to.to_string());
        });
    }

    fn release(&mut self, handle: ElementRef) {
        log::trace!("[render] release {}", handle.id());
    }
}
