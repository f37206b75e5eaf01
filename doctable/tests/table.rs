mod common;

use common::{CountingRenderer, assert_same, fake_row, fake_rows, handles, keys, mapping};
use doctable::prelude::*;
use serde_json::Value;
use tabledom::element::{find_by_class, find_by_tag};
use tabledom::{Tag, TextLayout};

fn table(rows: usize) -> TableAssembler {
    let config = TableConfig::default()
        .with_columns(["bytes"])
        .with_max_length(50)
        .with_timefield("timestamp");
    let mut table = TableAssembler::new(config, mapping()).unwrap();
    table.set_rows(fake_rows(rows)).unwrap();
    table
}

fn summary_rows(table: &TableAssembler) -> usize {
    let tree = table.to_element();
    find_by_class(&tree, "discover-table-row").len()
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_has_a_header_and_a_table_element() {
    let table = table(200);
    let tree = table.to_element();
    assert_eq!(tree.tag, Tag::Table);
    assert_eq!(find_by_tag(&tree, Tag::HeaderRow).len(), 1);
}

#[test]
fn test_rows_have_toggle_time_and_columns() {
    let table = table(3);
    let view = table.view(0).unwrap();
    let cells = handles(view);
    assert_eq!(cells.len(), 3);
    assert!(common::text(&cells[1]).starts_with("timestamp_formatted_0"));
    assert!(common::text(&cells[2]).starts_with("bytes_formatted_0"));
}

// ============================================================================
// Batched reveal
// ============================================================================

#[test]
fn test_has_50_rows_to_start() {
    let table = table(200);
    assert_eq!(table.reveal_count(), 50);
    assert_eq!(summary_rows(&table), 50);
}

#[test]
fn test_add_rows_adds_50_rows() {
    let mut table = table(200);
    assert!(table.add_rows().unwrap());
    assert_eq!(summary_rows(&table), 100);
}

#[test]
fn test_add_rows_caps_at_row_count() {
    let mut table = table(200);
    assert!(table.add_rows().unwrap());
    assert!(table.add_rows().unwrap());
    assert!(table.add_rows().unwrap());
    assert_eq!(table.reveal_count(), 200);
    assert!(!table.add_rows().unwrap());
    assert_eq!(table.reveal_count(), 200);
    assert_eq!(table.visible().len(), 200);
}

#[test]
fn test_add_rows_with_uneven_remainder() {
    let mut table = table(70);
    assert_eq!(table.reveal_count(), 50);
    assert!(table.add_rows().unwrap());
    assert_eq!(table.reveal_count(), 70);
    assert!(!table.add_rows().unwrap());
}

#[test]
fn test_fewer_rows_than_max_length() {
    let table = table(7);
    assert_eq!(table.reveal_count(), 7);
    assert_eq!(table.visible().len(), 7);
}

#[test]
fn test_replacing_rows_resets_reveal_count() {
    let mut table = table(200);
    table.add_rows().unwrap();
    table.set_rows(fake_rows(120)).unwrap();
    assert_eq!(table.reveal_count(), 50);
    assert_eq!(table.visible().len(), 50);
}

#[test]
fn test_revealing_keeps_existing_cells() {
    let mut table = table(200);
    let first = handles(table.view(0).unwrap());
    table.add_rows().unwrap();
    let after = handles(table.view(0).unwrap());
    for (a, b) in first.iter().zip(&after) {
        assert_same(a, b);
    }
}

#[test]
fn test_zero_max_length_is_rejected() {
    let config = TableConfig::default().with_max_length(0);
    assert!(matches!(
        TableAssembler::new(config, mapping()),
        Err(TableError::Config(ConfigError::InvalidMaxLength))
    ));

    let mut table = table(10);
    assert!(table.set_max_length(0).is_err());
    assert_eq!(table.max_length(), 50);
}

// ============================================================================
// Column changes
// ============================================================================

#[test]
fn test_column_change_reconciles_every_visible_row() {
    let config = TableConfig::default().with_columns(["bytes"]).with_max_length(10);
    let mut table = TableAssembler::with_renderer(config, mapping(), CountingRenderer::default()).unwrap();
    table.set_rows(fake_rows(25)).unwrap();
    assert_eq!(table.renderer().created, 10);

    let stats = table.set_columns(keys(&["request", "bytes"])).unwrap();
    assert_eq!(stats.created, 10);
    assert_eq!(stats.reused, 10);
    assert_eq!(stats.moved, 10);
    assert_eq!(stats.released, 0);

    for view in table.visible() {
        assert_eq!(view.cells().len(), 2);
        assert_eq!(view.cells()[1].column(), "bytes");
    }
}

#[test]
fn test_timefield_can_be_cleared() {
    let mut table = table(2);
    let stats = table.set_timefield(None).unwrap();
    assert_eq!(stats.released, 2);
    assert!(table.view(0).unwrap().time_cell().is_none());
    assert_eq!(table.header_cells().len(), 2);
}

#[test]
fn test_header_moves_emit_column_events() {
    let mut table = table(5);
    table.set_columns(keys(&["bytes", "request"])).unwrap();
    let before = handles(table.view(0).unwrap());

    assert!(table.move_right("bytes").unwrap());
    assert!(!table.move_right("bytes").unwrap());

    let after = handles(table.view(0).unwrap());
    assert_same(&after[2], &before[3]);
    assert_same(&after[3], &before[2]);

    assert_eq!(
        table.drain_events(),
        vec![TableEvent::ColumnsChanged {
            columns: keys(&["request", "bytes"])
        }]
    );
}

#[test]
fn test_remove_column_from_header() {
    let mut table = table(5);
    assert!(table.remove_column("bytes").unwrap());
    assert!(table.columns().is_empty());
    assert_eq!(table.view(0).unwrap().cells().len(), 0);
    assert!(!table.remove_column("bytes").unwrap());
}

fn header_button(table: &TableAssembler, class: &str, index: usize) -> String {
    let tree = table.to_element();
    find_by_class(&tree, class)
        .into_iter()
        .find(|b| b.get_data("index") == Some(index.to_string().as_str()))
        .map(|b| b.id.clone())
        .unwrap()
}

#[test]
fn test_header_buttons_act_on_the_clicked_duplicate() {
    let mut table = table(3);
    table.set_columns(keys(&["bytes", "request", "bytes"])).unwrap();
    let before = handles(table.view(0).unwrap());
    let mut sink = |_: &str, _: &Value, _: bool| {};

    let left = header_button(&table, "fa-angle-double-left", 2);
    assert!(table.click(&left, &mut sink).unwrap());
    assert_eq!(table.columns(), &keys(&["bytes", "bytes", "request"]));

    // the second bytes cell moved; the first one stayed put
    let after = handles(table.view(0).unwrap());
    assert_same(&after[2], &before[2]);
    assert_same(&after[3], &before[4]);
    assert_same(&after[4], &before[3]);

    let remove = header_button(&table, "fa-remove", 1);
    assert!(table.click(&remove, &mut sink).unwrap());
    assert_eq!(table.columns(), &keys(&["bytes", "request"]));
    assert_same(&handles(table.view(0).unwrap())[2], &before[2]);

    assert_eq!(
        table.drain_events(),
        vec![
            TableEvent::ColumnsChanged {
                columns: keys(&["bytes", "bytes", "request"])
            },
            TableEvent::ColumnsChanged {
                columns: keys(&["bytes", "request"])
            },
        ]
    );
}

#[test]
fn test_index_edits_on_table() {
    let mut table = table(2);
    table.set_columns(keys(&["bytes", "request", "bytes"])).unwrap();

    assert!(!table.move_right_at(2).unwrap());
    assert!(!table.move_left_at(0).unwrap());
    assert!(!table.remove_at(7).unwrap());
    assert!(table.drain_events().is_empty());

    assert!(table.move_right_at(0).unwrap());
    assert_eq!(table.columns(), &keys(&["request", "bytes", "bytes"]));
}

#[test]
fn test_sort_emits_event_and_refuses_unindexed() {
    let mut table = table(5);
    assert_eq!(table.cycle_sort("request").unwrap(), None);
    assert!(table.drain_events().is_empty());

    assert_eq!(table.cycle_sort("bytes").unwrap(), Some(SortSpec::asc("bytes")));
    assert_eq!(
        table.drain_events(),
        vec![TableEvent::SortChanged {
            sorting: Some(SortSpec::asc("bytes"))
        }]
    );
    assert_eq!(table.sorting(), Some(&SortSpec::asc("bytes")));
}

// ============================================================================
// Details
// ============================================================================

#[test]
fn test_detail_row_is_empty_by_default() {
    let table = table(1);
    let tree = table.to_element();
    let rows = tree.child_elements();
    assert_eq!(rows[1].tag, Tag::Row);
    assert_eq!(rows[2].tag, Tag::DetailRow);
    assert_eq!(rows[2].text_content(), "");
    assert!(table.detail(0).unwrap().is_empty());
}

#[test]
fn test_clicking_toggle_expands_detail_row() {
    let mut table = table(1);
    let toggle_id = table.view(0).unwrap().toggle_handle().id();
    let mut sink = |_: &str, _: &Value, _: bool| {};

    assert!(table.click(&toggle_id, &mut sink).unwrap());
    assert!(table.view(0).unwrap().expanded());
    let tree = table.to_element();
    assert_ne!(tree.child_elements()[2].text_content(), "");

    let toggle = table.view(0).unwrap().toggle_handle().snapshot();
    assert!(toggle.has_class("fa-caret-down"));
}

#[test]
fn test_expanded_detail_lists_each_field() {
    let mut table = table(1).with_meta_policy(MetaFields::none());
    assert!(table.toggle_row(0));

    let detail = table.detail(0).unwrap();
    assert_eq!(detail.len(), 3);
    let tree = table.to_element();
    let details = &tree.child_elements()[2];
    assert_eq!(details.tag, Tag::DetailRow);
    assert_eq!(find_by_tag(details, Tag::Row).len(), 3);

    assert!(table.toggle_row(0));
    assert!(table.detail(0).unwrap().is_empty());
    assert!(!table.toggle_row(5), "row 5 is not visible");
}

#[test]
fn test_detail_lists_fields_that_are_not_columns() {
    let mut table = table(1);
    table.set_columns(ColumnList::new()).unwrap();
    table.toggle_row(0);
    let fields: Vec<String> = table
        .detail(0)
        .unwrap()
        .entries()
        .iter()
        .map(|e| e.field.clone())
        .collect();
    assert_eq!(fields, vec!["bytes", "request", "timestamp"]);
}

#[test]
fn test_filter_buttons_call_the_sink() {
    let mut table = table(1);
    table.toggle_row(0);
    let tree = table.to_element();
    let plus = find_by_class(&tree, "fa-search-plus")[0].id.clone();
    let minus = find_by_class(&tree, "fa-search-minus")[0].id.clone();

    let mut calls: Vec<(String, Value, bool)> = Vec::new();
    let mut sink = |field: &str, value: &Value, exclude: bool| {
        calls.push((field.to_string(), value.clone(), exclude));
    };
    assert!(table.click(&plus, &mut sink).unwrap());
    assert!(table.click(&minus, &mut sink).unwrap());

    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, "bytes");
    assert_eq!(calls[0].1, serde_json::json!(0));
    assert!(!calls[0].2);
    assert!(calls[1].2);
}

#[test]
fn test_filter_on_collapsed_row_does_nothing() {
    let table = table(1);
    let mut fired = false;
    let mut sink = |_: &str, _: &Value, _: bool| fired = true;
    assert!(!table.filter(0, "bytes", false, &mut sink));
    assert!(!fired);
}

#[test]
fn test_header_sort_button_click() {
    let mut table = table(1);
    let tree = table.to_element();
    let sort = find_by_class(&tree, "fa-sort")
        .into_iter()
        .find(|b| b.get_data("field") == Some("bytes"))
        .map(|b| b.id.clone())
        .unwrap();

    let mut sink = |_: &str, _: &Value, _: bool| {};
    assert!(table.click(&sort, &mut sink).unwrap());
    assert_eq!(table.sorting(), Some(&SortSpec::asc("bytes")));
    assert!(!table.click("no-such-element", &mut sink).unwrap());
}

#[test]
fn test_toggle_events_are_queued() {
    let mut table = table(2);
    table.toggle_row(1);
    table.toggle_row(1);
    assert_eq!(
        table.drain_events(),
        vec![
            TableEvent::RowToggled {
                index: 1,
                expanded: true
            },
            TableEvent::RowToggled {
                index: 1,
                expanded: false
            },
        ]
    );
}

// ============================================================================
// Text rendering
// ============================================================================

#[test]
fn test_render_text_lists_header_and_rows() {
    let mut table = table(2);
    table.toggle_row(0);
    let layout = TextLayout {
        header_rule: false,
        ..Default::default()
    };
    let lines = table.render_text(&layout);

    assert!(lines[0].contains("timestamp") && lines[0].contains("bytes"));
    assert!(lines[1].contains("bytes_formatted_0"));
    // three detail lines follow the expanded row
    assert!(lines[2].trim_start().starts_with("bytes"));
    assert_eq!(lines.len(), 1 + 1 + 3 + 1);
    assert!(lines[5].contains("bytes_formatted_1"));
}

#[test]
fn test_row_data_of_visible_rows() {
    let table = table(3);
    assert_eq!(table.view(2).unwrap().row(), &fake_row(2));
    assert_eq!(table.row_count(), 3);
}
