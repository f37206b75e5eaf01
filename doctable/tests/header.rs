mod common;

use common::{keys, mapping};
use doctable::prelude::*;
use tabledom::Tag;
use tabledom::element::{find_by_class, find_by_tag};

fn header() -> HeaderController {
    HeaderController::new(mapping())
}

// ============================================================================
// Header cells
// ============================================================================

#[test]
fn test_only_toggle_column_by_default() {
    let header = header();
    let cells = header.header_cells(None);
    assert_eq!(cells.len(), 1);
    assert_eq!(cells[0].kind, HeaderCellKind::Toggle);
    assert!(!cells[0].sortable && !cells[0].can_move_left && !cells[0].can_remove);
}

#[test]
fn test_time_column_when_timefield_is_set() {
    let header = header();
    let time = ColumnKey::from("timestamp");
    let cells = header.header_cells(Some(&time));
    assert_eq!(cells.len(), 2);
    assert_eq!(cells[1].kind, HeaderCellKind::Time(time));
    assert!(cells[1].sortable);
    assert!(!cells[1].can_move_left && !cells[1].can_move_right);
}

#[test]
fn test_add_and_remove_columns() {
    let mut header = header();

    header.set_columns(keys(&["bytes"]));
    let cells = header.header_cells(None);
    assert_eq!(cells.len(), 2);
    assert!(cells[1].label.contains("bytes"));

    header.set_columns(keys(&["bytes", "request"]));
    let cells = header.header_cells(None);
    assert_eq!(cells.len(), 3);
    assert!(cells[2].label.contains("request"));

    header.set_columns(keys(&["request"]));
    let cells = header.header_cells(None);
    assert_eq!(cells.len(), 2);
    assert!(cells[1].label.contains("request"));
}

#[test]
fn test_header_element_has_one_th_per_cell() {
    let header = header().with_columns(keys(&["bytes", "request"]));
    let time = ColumnKey::from("timestamp");
    let row = header.to_element(Some(&time));

    assert_eq!(row.tag, Tag::HeaderRow);
    assert_eq!(find_by_tag(&row, Tag::HeaderCell).len(), 4);
    // bytes and timestamp are indexed, request is not
    assert_eq!(find_by_class(&row, "fa-sort").len(), 2);
    assert_eq!(row.child_elements()[0].text_content(), "");
}

#[test]
fn test_move_buttons_hidden_at_edges() {
    let header = header().with_columns(keys(&["bytes", "request", "timestamp"]));
    let cells = header.header_cells(None);
    assert!(!cells[1].can_move_left && cells[1].can_move_right);
    assert!(cells[2].can_move_left && cells[2].can_move_right);
    assert!(cells[3].can_move_left && !cells[3].can_move_right);
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_sort_asc_by_default_then_desc() {
    let mut header = header();
    let field = "bytes";

    assert_eq!(header.sorting(), None);
    assert_eq!(header.sort_indicator(field).css_class(), "fa-sort");

    assert_eq!(header.cycle_sort(field), Some(SortSpec::asc(field)));
    assert_eq!(header.sorting(), Some(&SortSpec::asc(field)));
    assert_eq!(header.sort_indicator(field).css_class(), "fa-sort-up");

    assert_eq!(header.cycle_sort(field), Some(SortSpec::desc(field)));
    assert_eq!(header.sort_indicator(field).css_class(), "fa-sort-down");

    assert_eq!(header.cycle_sort(field), Some(SortSpec::asc(field)));
    assert_eq!(header.sort_indicator(field), SortIndicator::Ascending);

    // Any other field shows the neutral indicator
    assert_eq!(header.sort_indicator("timestamp"), SortIndicator::Neutral);
}

#[test]
fn test_does_not_sort_unindexed_fields() {
    let mut header = header();
    assert_eq!(header.cycle_sort("request"), None);
    assert_eq!(header.sorting(), None);

    header.cycle_sort("bytes");
    assert_eq!(header.cycle_sort("request"), None);
    assert_eq!(header.sorting(), Some(&SortSpec::asc("bytes")));

    header.cycle_sort("bytes");
    assert_eq!(header.cycle_sort("request"), None);
    assert_eq!(header.sorting(), Some(&SortSpec::desc("bytes")));
}

#[test]
fn test_switching_field_restarts_at_asc() {
    let mut header = header();
    header.cycle_sort("bytes");
    header.cycle_sort("bytes");
    assert_eq!(header.cycle_sort("timestamp"), Some(SortSpec::asc("timestamp")));
    assert_eq!(header.sort_indicator("bytes"), SortIndicator::Neutral);
}

#[test]
fn test_sort_spec_serializes_as_pair() {
    let spec = SortSpec::desc("bytes");
    let json = serde_json::to_string(&spec).unwrap();
    assert_eq!(json, r#"["bytes","desc"]"#);
    let back: SortSpec = serde_json::from_str(r#"["timestamp","asc"]"#).unwrap();
    assert_eq!(back, SortSpec::asc("timestamp"));
}

// ============================================================================
// Moving columns
// ============================================================================

fn moving() -> HeaderController {
    header().with_columns(keys(&["bytes", "request", "timestamp"]))
}

#[test]
fn test_move_columns_to_the_right() {
    let mut header = moving();

    assert!(header.move_right("bytes"));
    assert_eq!(header.columns()[1], "bytes");

    assert!(header.move_right("bytes"));
    assert_eq!(header.columns()[2], "bytes");

    assert!(!header.move_right("bytes"));
    assert_eq!(header.columns()[2], "bytes");
}

#[test]
fn test_does_not_move_the_last_column_right() {
    let mut header = moving();
    assert_eq!(header.columns()[2], "timestamp");
    assert!(!header.move_right("timestamp"));
    assert_eq!(header.columns()[2], "timestamp");
}

#[test]
fn test_move_columns_to_the_left() {
    let mut header = moving();

    assert!(header.move_left("timestamp"));
    assert_eq!(header.columns()[1], "timestamp");

    assert!(header.move_left("request"));
    assert_eq!(header.columns()[1], "request");
}

#[test]
fn test_does_not_move_the_first_column_left() {
    let mut header = moving();
    assert_eq!(header.columns()[0], "bytes");
    assert!(!header.move_left("bytes"));
    assert_eq!(header.columns()[0], "bytes");
}

#[test]
fn test_moving_unknown_column_is_noop() {
    let mut header = moving();
    let before = header.columns().clone();
    assert!(!header.move_left("nope"));
    assert!(!header.move_right("nope"));
    assert_eq!(header.columns(), &before);
}

#[test]
fn test_index_moves_address_one_duplicate() {
    let mut header = header().with_columns(keys(&["bytes", "request", "bytes"]));

    assert!(header.move_left_at(2));
    assert_eq!(header.columns(), &keys(&["bytes", "bytes", "request"]));

    assert!(header.remove_at(1));
    assert_eq!(header.columns(), &keys(&["bytes", "request"]));
    assert!(!header.remove_at(5));
    assert!(!header.move_right_at(1));
    assert!(!header.move_right_at(usize::MAX));
}

#[test]
fn test_column_buttons_carry_their_index() {
    let header = header().with_columns(keys(&["bytes", "request", "bytes"]));
    let time = ColumnKey::from("timestamp");
    let row = header.to_element(Some(&time));

    let removes: Vec<Option<&str>> = find_by_class(&row, "fa-remove")
        .iter()
        .map(|b| b.get_data("index"))
        .collect();
    assert_eq!(removes, vec![Some("0"), Some("1"), Some("2")]);

    let time_sort = find_by_class(&row, "fa-sort")
        .into_iter()
        .find(|b| b.get_data("field") == Some("timestamp"))
        .unwrap();
    assert_eq!(time_sort.get_data("index"), None);
}
