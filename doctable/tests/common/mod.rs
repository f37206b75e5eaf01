#![allow(dead_code)]

use std::sync::Arc;

use doctable::prelude::*;
use serde_json::json;
use tabledom::ElementRef;

/// The three-field mapping used throughout the tests.
pub fn mapping() -> SharedMapping {
    Arc::new(
        Mapping::new()
            .field("bytes", true, FieldType::Number)
            .field("request", false, FieldType::String)
            .field("timestamp", true, FieldType::Date),
    )
}

/// A row whose display text for field `f` is `f_formatted_<id>`.
pub fn fake_row(id: usize) -> RowData {
    let source = json!({
        "bytes": id * 10,
        "request": format!("/page/{id}"),
        "timestamp": format!("2015-01-01T00:00:{:02}Z", id % 60),
    });
    RowData::new()
        .with_id(id.to_string())
        .field("bytes", source["bytes"].clone(), format!("bytes_formatted_{id}"))
        .field("request", source["request"].clone(), format!("request_formatted_{id}"))
        .field("timestamp", source["timestamp"].clone(), format!("timestamp_formatted_{id}"))
        .with_source(source, format!("_source_formatted_{id}"))
}

pub fn fake_rows(n: usize) -> Vec<RowData> {
    (0..n).map(fake_row).collect()
}

pub fn keys(list: &[&str]) -> ColumnList {
    list.iter().copied().collect()
}

/// Element renderer that counts cell creations and releases.
#[derive(Debug, Default)]
pub struct CountingRenderer {
    inner: ElementRenderer,
    pub created: usize,
    pub released: usize,
}

impl CellRenderer for CountingRenderer {
    type Handle = ElementRef;

    fn create(&mut self, row: &RowData, column: &ColumnKey) -> ElementRef {
        self.created += 1;
        self.inner.create(row, column)
    }

    fn create_toggle(&mut self, row: &RowData) -> ElementRef {
        self.inner.create_toggle(row)
    }

    fn update_toggle(&mut self, handle: &ElementRef, expanded: bool) {
        self.inner.update_toggle(handle, expanded)
    }

    fn release(&mut self, handle: ElementRef) {
        self.released += 1;
        self.inner.release(handle)
    }
}

/// Every handle of a row view, toggle first.
pub fn handles(view: &RowView<ElementRef>) -> Vec<ElementRef> {
    view.handles().cloned().collect()
}

pub fn text(handle: &ElementRef) -> String {
    handle.read(|el| el.text_content())
}

pub fn assert_same(a: &ElementRef, b: &ElementRef) {
    assert!(a.ptr_eq(b), "expected the same element, got {} and {}", a.id(), b.id());
}
