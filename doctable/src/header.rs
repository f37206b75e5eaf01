//! Header state: the column list, the active sort, and the header row.

use serde::{Deserialize, Serialize};
use tabledom::Element;

use crate::column::{ColumnKey, ColumnList};
use crate::mapping::SharedMapping;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// The single active sort. Serializes as `[field, "asc" | "desc"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    from = "(ColumnKey, SortDirection)",
    into = "(ColumnKey, SortDirection)"
)]
pub struct SortSpec {
    pub field: ColumnKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<ColumnKey>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<ColumnKey>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<ColumnKey>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

impl From<(ColumnKey, SortDirection)> for SortSpec {
    fn from((field, direction): (ColumnKey, SortDirection)) -> Self {
        Self { field, direction }
    }
}

impl From<SortSpec> for (ColumnKey, SortDirection) {
    fn from(spec: SortSpec) -> Self {
        (spec.field, spec.direction)
    }
}

/// Sort affordance shown next to a column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortIndicator {
    Neutral,
    Ascending,
    Descending,
}

impl SortIndicator {
    pub fn css_class(self) -> &'static str {
        match self {
            SortIndicator::Neutral => "fa-sort",
            SortIndicator::Ascending => "fa-sort-up",
            SortIndicator::Descending => "fa-sort-down",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderCellKind {
    /// Leading expand/collapse column. Never sortable, movable or removable.
    Toggle,
    /// Time column pinned after the toggle when a time field is set.
    Time(ColumnKey),
    /// A data column at `index` in the column list.
    Column { key: ColumnKey, index: usize },
}

/// Descriptor for one header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub kind: HeaderCellKind,
    pub label: String,
    pub sortable: bool,
    pub indicator: Option<SortIndicator>,
    pub can_move_left: bool,
    pub can_move_right: bool,
    pub can_remove: bool,
}

/// Column list plus sort state, shared with every row of the table.
///
/// `cycle_sort` walks unsorted → asc → desc → asc … for one field and
/// restarts at asc when a different field is clicked. Fields the mapping
/// does not mark as indexed are never sorted.
pub struct HeaderController {
    columns: ColumnList,
    sorting: Option<SortSpec>,
    mapping: SharedMapping,
}

impl std::fmt::Debug for HeaderController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderController")
            .field("columns", &self.columns)
            .field("sorting", &self.sorting)
            .finish_non_exhaustive()
    }
}

impl HeaderController {
    pub fn new(mapping: SharedMapping) -> Self {
        Self {
            columns: ColumnList::new(),
            sorting: None,
            mapping,
        }
    }

    pub fn with_columns(mut self, columns: impl Into<ColumnList>) -> Self {
        self.columns = columns.into();
        self
    }

    pub fn with_sorting(mut self, sorting: Option<SortSpec>) -> Self {
        self.sorting = sorting;
        self
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    pub fn columns(&self) -> &ColumnList {
        &self.columns
    }

    pub fn set_columns(&mut self, columns: impl Into<ColumnList>) {
        self.columns = columns.into();
    }

    /// Swap the first occurrence of `field` with its left neighbour.
    /// No-op when first or absent.
    pub fn move_left(&mut self, field: &str) -> bool {
        match self.columns.position(field) {
            Some(index) => self.move_left_at(index),
            None => false,
        }
    }

    /// Swap the first occurrence of `field` with its right neighbour.
    /// No-op when last or absent.
    pub fn move_right(&mut self, field: &str) -> bool {
        match self.columns.position(field) {
            Some(index) => self.move_right_at(index),
            None => false,
        }
    }

    /// Remove the first occurrence of `field` from the column list.
    pub fn remove_column(&mut self, field: &str) -> bool {
        match self.columns.position(field) {
            Some(index) => self.remove_at(index),
            None => false,
        }
    }

    /// Swap the column at `index` with its left neighbour.
    pub fn move_left_at(&mut self, index: usize) -> bool {
        let moved = index > 0 && self.columns.swap(index, index - 1);
        log::debug!("[header] move_left index={} moved={}", index, moved);
        moved
    }

    /// Swap the column at `index` with its right neighbour.
    pub fn move_right_at(&mut self, index: usize) -> bool {
        let moved = index
            .checked_add(1)
            .is_some_and(|next| self.columns.swap(index, next));
        log::debug!("[header] move_right index={} moved={}", index, moved);
        moved
    }

    pub fn remove_at(&mut self, index: usize) -> bool {
        let removed = self.columns.remove_at(index);
        log::debug!("[header] remove index={} removed={:?}", index, removed);
        removed.is_some()
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    pub fn sorting(&self) -> Option<&SortSpec> {
        self.sorting.as_ref()
    }

    /// Replace the sort from the host side. Unlike [`cycle_sort`](Self::cycle_sort)
    /// this trusts the caller.
    pub fn set_sorting(&mut self, sorting: Option<SortSpec>) {
        self.sorting = sorting;
    }

    pub fn is_sortable(&self, field: &str) -> bool {
        self.mapping.is_indexed(field)
    }

    /// Advance the sort cycle for `field`.
    ///
    /// Returns the new sort, or `None` when `field` is not indexed and the
    /// sort was left alone.
    pub fn cycle_sort(&mut self, field: &str) -> Option<SortSpec> {
        if !self.is_sortable(field) {
            log::debug!("[header] refusing to sort unindexed field {}", field);
            return None;
        }

        let next = match &self.sorting {
            Some(current) if current.field == field => {
                SortSpec::new(current.field.clone(), current.direction.flip())
            }
            _ => SortSpec::asc(field),
        };
        log::debug!("[header] sort {:?} -> {:?}", self.sorting, next);
        self.sorting = Some(next.clone());
        Some(next)
    }

    pub fn sort_indicator(&self, field: &str) -> SortIndicator {
        match &self.sorting {
            Some(spec) if spec.field == field => match spec.direction {
                SortDirection::Asc => SortIndicator::Ascending,
                SortDirection::Desc => SortIndicator::Descending,
            },
            _ => SortIndicator::Neutral,
        }
    }

    // -------------------------------------------------------------------------
    // Header row
    // -------------------------------------------------------------------------

    pub fn header_cells(&self, timefield: Option<&ColumnKey>) -> Vec<HeaderCell> {
        let mut cells = Vec::with_capacity(self.columns.len() + 2);
        cells.push(HeaderCell {
            kind: HeaderCellKind::Toggle,
            label: String::new(),
            sortable: false,
            indicator: None,
            can_move_left: false,
            can_move_right: false,
            can_remove: false,
        });

        if let Some(time) = timefield {
            let sortable = self.is_sortable(time.as_str());
            cells.push(HeaderCell {
                kind: HeaderCellKind::Time(time.clone()),
                label: time.to_string(),
                sortable,
                indicator: sortable.then(|| self.sort_indicator(time.as_str())),
                can_move_left: false,
                can_move_right: false,
                can_remove: false,
            });
        }

        let last = self.columns.len().saturating_sub(1);
        for (index, key) in self.columns.iter().enumerate() {
            let sortable = self.is_sortable(key.as_str());
            cells.push(HeaderCell {
                kind: HeaderCellKind::Column {
                    key: key.clone(),
                    index,
                },
                label: key.to_string(),
                sortable,
                indicator: sortable.then(|| self.sort_indicator(key.as_str())),
                can_move_left: index > 0,
                can_move_right: index < last,
                can_remove: true,
            });
        }
        cells
    }

    /// Element form of the header row.
    ///
    /// Buttons carry `action` (`sort`, `move_left`, `move_right`, `remove`)
    /// and the `field` they act on. Buttons of regular columns also carry the
    /// column's `index`, so duplicated columns stay distinguishable.
    pub fn to_element(&self, timefield: Option<&ColumnKey>) -> Element {
        let cells = self.header_cells(timefield).into_iter().map(|cell| {
            let (field, index) = match &cell.kind {
                HeaderCellKind::Toggle => return Element::header_cell(""),
                HeaderCellKind::Time(key) => (key.clone(), None),
                HeaderCellKind::Column { key, index } => (key.clone(), Some(*index)),
            };
            let action = |name: &str, class: &str| {
                let button = Element::button(class)
                    .data("action", name)
                    .data("field", field.as_str());
                match index {
                    Some(index) => button.data("index", index.to_string()),
                    None => button,
                }
            };

            let mut th = Element::new(tabledom::Tag::HeaderCell)
                .data("column", field.as_str())
                .child(Element::new(tabledom::Tag::Box).text(cell.label.as_str()));
            if let Some(indicator) = cell.indicator {
                th = th.child(action("sort", indicator.css_class()));
            }
            if cell.can_remove {
                th = th.child(action("remove", "fa-remove"));
            }
            if cell.can_move_left {
                th = th.child(action("move_left", "fa-angle-double-left"));
            }
            if cell.can_move_right {
                th = th.child(action("move_right", "fa-angle-double-right"));
            }
            th
        });
        Element::header_row().children(cells)
    }
}
