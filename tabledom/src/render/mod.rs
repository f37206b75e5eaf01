//! Plain-text rendering of table element trees.
//!
//! Header and summary rows share one set of column widths. Detail rows are
//! rendered below their row as indented `field  value` lines and take no part
//! in column sizing. Empty detail rows produce no output, and columns that
//! are empty in every row take no space.

use crate::element::{Element, Tag};
use crate::text::{display_width, fit_to_width, single_line};

/// Options for [`render_lines`].
#[derive(Debug, Clone)]
pub struct TextLayout {
    /// Cells wider than this are truncated with an ellipsis.
    pub max_cell_width: usize,
    /// Spaces between adjacent cells.
    pub gap: usize,
    /// Draw a rule under the header row.
    pub header_rule: bool,
    /// Indentation of detail entries.
    pub detail_indent: usize,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            max_cell_width: 40,
            gap: 2,
            header_rule: true,
            detail_indent: 4,
        }
    }
}

fn cell_texts(row: &Element) -> Vec<String> {
    row.child_elements()
        .iter()
        .map(|cell| single_line(&cell.text_content()))
        .collect()
}

fn column_widths(root: &Element, layout: &TextLayout) -> Vec<usize> {
    let mut widths: Vec<usize> = Vec::new();
    for row in root.child_elements().iter().filter(|r| r.tag.is_row()) {
        for (i, text) in cell_texts(row).iter().enumerate() {
            let w = display_width(text).min(layout.max_cell_width);
            match widths.get_mut(i) {
                Some(existing) => *existing = (*existing).max(w),
                None => widths.push(w),
            }
        }
    }
    widths
}

fn render_row(texts: &[String], widths: &[usize], gap: usize) -> String {
    let sep = " ".repeat(gap);
    let line = texts
        .iter()
        .zip(widths)
        .filter(|(_, width)| **width > 0)
        .map(|(text, width)| fit_to_width(text, *width))
        .collect::<Vec<_>>()
        .join(&sep);
    line.trim_end().to_string()
}

fn render_detail(detail: &Element, layout: &TextLayout, out: &mut Vec<String>) {
    let entries: Vec<Vec<String>> = detail
        .child_elements()
        .iter()
        .map(|entry| {
            cell_texts(entry)
                .into_iter()
                .filter(|t| !t.is_empty())
                .collect()
        })
        .collect();
    let field_width = entries
        .iter()
        .filter_map(|e| e.first())
        .map(|f| display_width(f))
        .max()
        .unwrap_or(0);

    let indent = " ".repeat(layout.detail_indent);
    for entry in entries {
        let mut parts = entry.into_iter();
        let Some(field) = parts.next() else {
            continue;
        };
        let rest = parts.collect::<Vec<_>>().join(" ");
        let line = format!("{indent}{}  {rest}", fit_to_width(&field, field_width));
        out.push(line.trim_end().to_string());
    }
}

/// Render a [`Tag::Table`] element into aligned text lines.
pub fn render_lines(root: &Element, layout: &TextLayout) -> Vec<String> {
    let widths = column_widths(root, layout);
    let mut out = Vec::new();

    for child in root.child_elements() {
        match child.tag {
            Tag::HeaderRow => {
                let line = render_row(&cell_texts(child), &widths, layout.gap);
                out.push(line);
                if layout.header_rule {
                    let shown = widths.iter().filter(|w| **w > 0).count();
                    let total = widths.iter().sum::<usize>()
                        + layout.gap * shown.saturating_sub(1);
                    out.push("-".repeat(total));
                }
            }
            Tag::Row => out.push(render_row(&cell_texts(child), &widths, layout.gap)),
            Tag::DetailRow if !child.content.is_empty() => render_detail(child, layout, &mut out),
            _ => {}
        }
    }

    log::trace!(
        "[render] {} lines, {} columns, widths={:?}",
        out.len(),
        widths.len(),
        widths
    );
    out
}
