use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// What kind of table part an element represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tag {
    #[default]
    Box,
    Table,
    HeaderRow,
    HeaderCell,
    Row,
    Cell,
    DetailRow,
    Button,
}

impl Tag {
    fn prefix(self) -> &'static str {
        match self {
            Tag::Box => "box",
            Tag::Table => "table",
            Tag::HeaderRow => "thead",
            Tag::HeaderCell => "th",
            Tag::Row => "tr",
            Tag::Cell => "td",
            Tag::DetailRow => "detail",
            Tag::Button => "button",
        }
    }

    /// Whether this tag lays its children out as table columns.
    pub fn is_row(self) -> bool {
        matches!(self, Tag::HeaderRow | Tag::Row)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: Tag,

    // Content
    pub content: Content,

    // Visual
    pub classes: Vec<String>,

    // Interaction
    pub clickable: bool,

    // Custom data storage (column keys, handler names, transient UI state)
    pub data: HashMap<String, String>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            id: generate_id(tag.prefix()),
            tag,
            ..Default::default()
        }
    }

    pub fn table() -> Self {
        Self::new(Tag::Table)
    }

    pub fn header_row() -> Self {
        Self::new(Tag::HeaderRow)
    }

    pub fn row() -> Self {
        Self::new(Tag::Row)
    }

    pub fn detail_row() -> Self {
        Self::new(Tag::DetailRow)
    }

    pub fn cell(text: impl Into<String>) -> Self {
        Self::new(Tag::Cell).text(text)
    }

    pub fn header_cell(text: impl Into<String>) -> Self {
        Self::new(Tag::HeaderCell).text(text)
    }

    pub fn button(class: impl Into<String>) -> Self {
        Self::new(Tag::Button).class(class).clickable(true)
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    // Content
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        for child in children {
            self = self.child(child);
        }
        self
    }

    // Visual
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    // Interaction
    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get_data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Direct children, empty for text and empty elements.
    pub fn child_elements(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    /// Concatenated text of this element and all descendants, in order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.content {
            Content::None => {}
            Content::Text(text) => out.push_str(text),
            Content::Children(children) => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}
