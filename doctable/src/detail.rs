//! The detail pseudo-row shown under an expanded row.

use serde::Serialize;
use serde_json::Value;
use tabledom::Element;

use crate::mapping::{FilterSink, MetaFieldPolicy};
use crate::row::RowData;

pub const FILTER_INCLUDE_CLASS: &str = "fa-search-plus";
pub const FILTER_EXCLUDE_CLASS: &str = "fa-search-minus";

/// One field listed in a detail row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailEntry {
    pub field: String,
    pub value: Value,
    pub formatted: String,
}

/// Field listing for one row. Empty while the row is collapsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetailRow {
    entries: Vec<DetailEntry>,
}

impl DetailRow {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every field of `row` in name order, minus metadata fields.
    ///
    /// Fields that are not columns are listed too.
    pub fn collect(row: &RowData, meta: &dyn MetaFieldPolicy) -> Self {
        let hidden = meta.meta_fields();
        let entries = row
            .fields()
            .filter(|(name, _)| !hidden.contains(*name))
            .map(|(name, value)| DetailEntry {
                field: name.to_string(),
                value: value.raw.clone(),
                formatted: value.formatted.clone(),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[DetailEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entry(&self, field: &str) -> Option<&DetailEntry> {
        self.entries.iter().find(|e| e.field == field)
    }

    /// Fire the include (`exclude == false`) or exclude filter for `field`.
    ///
    /// Returns false when the row lists no such field.
    pub fn filter(&self, field: &str, exclude: bool, sink: &mut dyn FilterSink) -> bool {
        let Some(entry) = self.entry(field) else {
            return false;
        };
        log::debug!(
            "[detail] filter field={} exclude={} value={}",
            entry.field,
            exclude,
            entry.value
        );
        sink.on_filter(&entry.field, &entry.value, exclude);
        true
    }

    /// Element form of the detail row for `row_index`.
    ///
    /// Each entry is a row of: field name, formatted value, include button,
    /// exclude button. Buttons carry `action = filter` and enough data to be
    /// dispatched back to [`DetailRow::filter`].
    pub fn to_element(&self, row_index: usize) -> Element {
        let entries = self.entries.iter().map(|entry| {
            let button = |class: &str, exclude: bool| {
                Element::button(class)
                    .data("action", "filter")
                    .data("row", row_index.to_string())
                    .data("field", entry.field.as_str())
                    .data("exclude", exclude.to_string())
            };
            Element::row()
                .child(Element::cell(entry.field.as_str()).class("discover-detail-field"))
                .child(Element::cell(entry.formatted.as_str()).class("discover-detail-value"))
                .child(button(FILTER_INCLUDE_CLASS, false))
                .child(button(FILTER_EXCLUDE_CLASS, true))
        });
        Element::detail_row()
            .class("discover-table-details")
            .children(entries)
    }
}
