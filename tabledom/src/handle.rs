//! Shared element handles.
//!
//! A handle is the unit of identity for a rendered element: two handles are
//! the same element exactly when they point at the same allocation. Cloning a
//! handle never clones the element.

use std::sync::{Arc, PoisonError, RwLock};

use crate::element::Element;

#[derive(Debug, Clone)]
pub struct ElementRef(Arc<RwLock<Element>>);

impl ElementRef {
    pub fn new(element: Element) -> Self {
        Self(Arc::new(RwLock::new(element)))
    }

    /// True when both handles refer to the same live element.
    pub fn ptr_eq(&self, other: &ElementRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn id(&self) -> String {
        self.read(|el| el.id.clone())
    }

    pub fn read<R>(&self, f: impl FnOnce(&Element) -> R) -> R {
        let guard = self.0.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut Element) -> R) -> R {
        let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Detached copy of the element, for building a render tree.
    pub fn snapshot(&self) -> Element {
        self.read(Element::clone)
    }
}

impl PartialEq for ElementRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ElementRef {}
