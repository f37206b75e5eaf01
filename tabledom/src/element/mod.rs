mod content;
mod node;

pub use content::Content;
pub use node::{Element, Tag};

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    for child in root.child_elements() {
        if let Some(found) = find_element(child, id) {
            return Some(found);
        }
    }

    None
}

/// Collect every descendant (including `root`) matching `predicate`, in document order.
pub fn find_all<'a>(root: &'a Element, predicate: impl Fn(&Element) -> bool) -> Vec<&'a Element> {
    fn walk<'a>(el: &'a Element, predicate: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if predicate(el) {
            out.push(el);
        }
        for child in el.child_elements() {
            walk(child, predicate, out);
        }
    }

    let mut out = Vec::new();
    walk(root, &predicate, &mut out);
    out
}

/// All descendants with the given tag.
pub fn find_by_tag(root: &Element, tag: Tag) -> Vec<&Element> {
    find_all(root, |el| el.tag == tag)
}

/// All descendants carrying the given class.
pub fn find_by_class<'a>(root: &'a Element, class: &str) -> Vec<&'a Element> {
    find_all(root, |el| el.has_class(class))
}
