//! Table assembler: header, revealed window, and one row view per visible row.

use std::sync::Arc;

use tabledom::element::find_element;
use tabledom::{Element, ElementRef, TextLayout, render_lines};

use crate::column::{ColumnKey, ColumnList};
use crate::config::TableConfig;
use crate::detail::DetailRow;
use crate::error::{ConfigError, TableError};
use crate::event::TableEvent;
use crate::header::{HeaderCell, HeaderController, SortSpec};
use crate::mapping::{FilterSink, MetaFieldPolicy, SharedMapping};
use crate::reconcile::ReconcileStats;
use crate::render::{CellRenderer, ElementRenderer};
use crate::row::RowData;
use crate::row_view::RowView;

/// A document table.
///
/// Only the first `reveal_count` rows are rendered. The count starts at
/// `max_length` and grows by `max_length` on each [`add_rows`](Self::add_rows),
/// never past the number of rows.
///
/// Every binding change (columns, sort, time field, rows, reveal count)
/// triggers one reconciliation pass over the visible rows. Changes made from
/// the header or the rows are queued as [`TableEvent`]s for the host.
pub struct TableAssembler<R: CellRenderer = ElementRenderer> {
    renderer: R,
    header: HeaderController,
    meta: Box<dyn MetaFieldPolicy + Send + Sync>,
    rows: Vec<Arc<RowData>>,
    views: Vec<RowView<R::Handle>>,
    timefield: Option<ColumnKey>,
    max_length: usize,
    reveal_count: usize,
    events: Vec<TableEvent>,
}

impl<R: CellRenderer> std::fmt::Debug for TableAssembler<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableAssembler")
            .field("header", &self.header)
            .field("rows", &self.rows.len())
            .field("visible", &self.views.len())
            .field("timefield", &self.timefield)
            .field("max_length", &self.max_length)
            .field("reveal_count", &self.reveal_count)
            .finish_non_exhaustive()
    }
}

impl TableAssembler<ElementRenderer> {
    pub fn new(config: TableConfig, mapping: SharedMapping) -> Result<Self, TableError> {
        Self::with_renderer(config, mapping, ElementRenderer)
    }
}

impl<R: CellRenderer> TableAssembler<R> {
    pub fn with_renderer(
        config: TableConfig,
        mapping: SharedMapping,
        renderer: R,
    ) -> Result<Self, TableError> {
        config.validate()?;
        let meta = Box::new(config.meta_policy());
        let header = HeaderController::new(mapping)
            .with_columns(config.columns)
            .with_sorting(config.sorting);

        Ok(Self {
            renderer,
            header,
            meta,
            rows: Vec::new(),
            views: Vec::new(),
            timefield: config.timefield,
            max_length: config.max_length,
            reveal_count: 0,
            events: Vec::new(),
        })
    }

    /// Replace the metadata-field policy used by detail rows.
    pub fn with_meta_policy(mut self, policy: impl MetaFieldPolicy + Send + Sync + 'static) -> Self {
        self.meta = Box::new(policy);
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn header(&self) -> &HeaderController {
        &self.header
    }

    // -------------------------------------------------------------------------
    // Bindings
    // -------------------------------------------------------------------------

    pub fn rows(&self) -> &[Arc<RowData>] {
        &self.rows
    }

    /// Replace every row. All views are rebuilt and the reveal count resets.
    pub fn set_rows(&mut self, rows: impl IntoIterator<Item = RowData>) -> Result<ReconcileStats, TableError> {
        for view in self.views.drain(..) {
            view.release(&mut self.renderer);
        }
        self.rows = rows.into_iter().map(Arc::new).collect();
        self.reveal_count = self.max_length.min(self.rows.len());
        log::debug!(
            "[table] {} rows bound, revealing {}",
            self.rows.len(),
            self.reveal_count
        );
        self.sync()
    }

    pub fn columns(&self) -> &ColumnList {
        self.header.columns()
    }

    pub fn set_columns(&mut self, columns: impl Into<ColumnList>) -> Result<ReconcileStats, TableError> {
        self.header.set_columns(columns);
        self.sync()
    }

    pub fn sorting(&self) -> Option<&SortSpec> {
        self.header.sorting()
    }

    pub fn set_sorting(&mut self, sorting: Option<SortSpec>) -> Result<ReconcileStats, TableError> {
        self.header.set_sorting(sorting);
        self.sync()
    }

    pub fn timefield(&self) -> Option<&ColumnKey> {
        self.timefield.as_ref()
    }

    pub fn set_timefield(&mut self, timefield: Option<ColumnKey>) -> Result<ReconcileStats, TableError> {
        self.timefield = timefield;
        self.sync()
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Change the reveal batch size. Rows already revealed stay revealed.
    pub fn set_max_length(&mut self, max_length: usize) -> Result<(), TableError> {
        if max_length == 0 {
            return Err(ConfigError::InvalidMaxLength.into());
        }
        self.max_length = max_length;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Revealed window
    // -------------------------------------------------------------------------

    pub fn reveal_count(&self) -> usize {
        self.reveal_count
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Views of the visible rows, in row order.
    pub fn visible(&self) -> &[RowView<R::Handle>] {
        &self.views
    }

    pub fn view(&self, index: usize) -> Option<&RowView<R::Handle>> {
        self.views.get(index)
    }

    /// Reveal the next batch of rows. Returns false once every row is shown.
    pub fn add_rows(&mut self) -> Result<bool, TableError> {
        if self.reveal_count >= self.rows.len() {
            return Ok(false);
        }
        self.reveal_count = (self.reveal_count + self.max_length).min(self.rows.len());
        self.events.push(TableEvent::RowsRevealed {
            count: self.reveal_count,
        });
        self.sync()?;
        Ok(true)
    }

    // -------------------------------------------------------------------------
    // Header actions
    // -------------------------------------------------------------------------

    pub fn header_cells(&self) -> Vec<HeaderCell> {
        self.header.header_cells(self.timefield.as_ref())
    }

    /// Advance the sort cycle for `field`. `None` when the field is not sortable.
    pub fn cycle_sort(&mut self, field: &str) -> Result<Option<SortSpec>, TableError> {
        let Some(sorting) = self.header.cycle_sort(field) else {
            return Ok(None);
        };
        self.events.push(TableEvent::SortChanged {
            sorting: Some(sorting.clone()),
        });
        self.sync()?;
        Ok(Some(sorting))
    }

    pub fn move_left(&mut self, field: &str) -> Result<bool, TableError> {
        let moved = self.header.move_left(field);
        self.after_column_edit(moved)
    }

    pub fn move_right(&mut self, field: &str) -> Result<bool, TableError> {
        let moved = self.header.move_right(field);
        self.after_column_edit(moved)
    }

    pub fn remove_column(&mut self, field: &str) -> Result<bool, TableError> {
        let removed = self.header.remove_column(field);
        self.after_column_edit(removed)
    }

    /// Move the column at `index` left. Addresses one occurrence of a
    /// duplicated column where [`move_left`](Self::move_left) takes the first.
    pub fn move_left_at(&mut self, index: usize) -> Result<bool, TableError> {
        let moved = self.header.move_left_at(index);
        self.after_column_edit(moved)
    }

    pub fn move_right_at(&mut self, index: usize) -> Result<bool, TableError> {
        let moved = self.header.move_right_at(index);
        self.after_column_edit(moved)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<bool, TableError> {
        let removed = self.header.remove_at(index);
        self.after_column_edit(removed)
    }

    fn after_column_edit(&mut self, changed: bool) -> Result<bool, TableError> {
        if changed {
            self.events.push(TableEvent::ColumnsChanged {
                columns: self.header.columns().clone(),
            });
            self.sync()?;
        }
        Ok(changed)
    }

    // -------------------------------------------------------------------------
    // Row actions
    // -------------------------------------------------------------------------

    /// Expand or collapse visible row `index`. False when the row is not visible.
    pub fn toggle_row(&mut self, index: usize) -> bool {
        let Some(view) = self.views.get_mut(index) else {
            return false;
        };
        let expanded = view.toggle(&mut self.renderer);
        log::debug!("[table] row {} expanded={}", index, expanded);
        self.events.push(TableEvent::RowToggled { index, expanded });
        true
    }

    /// Detail listing of visible row `index`; empty while collapsed.
    pub fn detail(&self, index: usize) -> Option<DetailRow> {
        self.views.get(index).map(|view| view.detail(self.meta.as_ref()))
    }

    /// Fire a detail-row filter affordance of visible row `index`.
    pub fn filter(&self, index: usize, field: &str, exclude: bool, sink: &mut dyn FilterSink) -> bool {
        self.detail(index)
            .is_some_and(|detail| detail.filter(field, exclude, sink))
    }

    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }

    // -------------------------------------------------------------------------
    // Reconciliation
    // -------------------------------------------------------------------------

    /// Match the views to the revealed window, then reconcile every one of them.
    fn sync(&mut self) -> Result<ReconcileStats, TableError> {
        let target = self.reveal_count.min(self.rows.len());
        while self.views.len() > target {
            if let Some(view) = self.views.pop() {
                view.release(&mut self.renderer);
            }
        }
        let start = self.views.len();
        for row in &self.rows[start..target] {
            self.views
                .push(RowView::new(Arc::clone(row), &mut self.renderer));
        }

        let columns = self.header.columns().as_slice();
        let timefield = self.timefield.as_ref();
        let mut stats = ReconcileStats::default();
        for view in &mut self.views {
            stats += view.reconcile(columns, timefield, &mut self.renderer)?;
        }

        log::debug!(
            "[table] sync rows={} columns={} created={} reused={} moved={} released={}",
            self.views.len(),
            columns.len(),
            stats.created,
            stats.reused,
            stats.moved,
            stats.released
        );
        Ok(stats)
    }
}

impl<R> TableAssembler<R>
where
    R: CellRenderer<Handle = ElementRef>,
{
    /// Element tree of the whole table: header row, then each visible row
    /// followed by its detail pseudo-row.
    pub fn to_element(&self) -> Element {
        let mut table = Element::table().child(self.header.to_element(self.timefield.as_ref()));
        for (index, view) in self.views.iter().enumerate() {
            let row = Element::row()
                .class("discover-table-row")
                .data("row", index.to_string())
                .children(view.handles().map(ElementRef::snapshot));
            table = table
                .child(row)
                .child(view.detail(self.meta.as_ref()).to_element(index));
        }
        table
    }

    pub fn render_text(&self, layout: &TextLayout) -> Vec<String> {
        render_lines(&self.to_element(), layout)
    }

    /// Dispatch a click on the element with id `target`.
    ///
    /// Toggle cells expand their row, header buttons sort / move / remove
    /// their column, detail buttons fire `sink`. Returns whether the click
    /// did anything.
    pub fn click(&mut self, target: &str, sink: &mut dyn FilterSink) -> Result<bool, TableError> {
        if let Some(index) = self
            .views
            .iter()
            .position(|view| view.toggle_handle().id() == target)
        {
            return Ok(self.toggle_row(index));
        }

        let tree = self.to_element();
        let Some(element) = find_element(&tree, target) else {
            return Ok(false);
        };
        let data = |key: &str| element.get_data(key).unwrap_or_default().to_string();
        let (action, field) = (data("action"), data("field"));
        log::debug!("[table] click {} action={:?} field={:?}", target, action, field);

        // Column edits address the clicked occurrence; a stale index that
        // no longer holds `field` falls back to the first occurrence.
        let index = data("index")
            .parse::<usize>()
            .ok()
            .filter(|i| self.columns().get(*i).is_some_and(|key| *key == field.as_str()));

        match (action.as_str(), index) {
            ("sort", _) => Ok(self.cycle_sort(&field)?.is_some()),
            ("move_left", Some(index)) => self.move_left_at(index),
            ("move_right", Some(index)) => self.move_right_at(index),
            ("remove", Some(index)) => self.remove_at(index),
            ("move_left", None) => self.move_left(&field),
            ("move_right", None) => self.move_right(&field),
            ("remove", None) => self.remove_column(&field),
            ("filter", _) => {
                let Ok(index) = data("row").parse::<usize>() else {
                    return Ok(false);
                };
                let exclude = data("exclude") == "true";
                Ok(self.filter(index, &field, exclude, sink))
            }
            _ => Ok(false),
        }
    }
}
