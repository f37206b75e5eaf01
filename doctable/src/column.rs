//! Column keys and the ordered column list.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a displayable field.
///
/// Keys are compared by value only. Two keys that render identical text are
/// still distinct columns unless the keys themselves are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnKey(String);

impl ColumnKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for ColumnKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl AsRef<str> for ColumnKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ColumnKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ColumnKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ColumnKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Ordered list of column keys. Duplicates are allowed.
///
/// Only the application edits a column list. Row views observe successive
/// snapshots of it and never write back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnList(Vec<ColumnKey>);

impl ColumnList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the first occurrence of `field`.
    pub fn position(&self, field: &str) -> Option<usize> {
        self.0.iter().position(|k| k.as_str() == field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.position(field).is_some()
    }

    pub fn push(&mut self, key: impl Into<ColumnKey>) {
        self.0.push(key.into());
    }

    /// Insert at `index`, clamped to the end of the list.
    pub fn insert(&mut self, index: usize, key: impl Into<ColumnKey>) {
        let index = index.min(self.0.len());
        self.0.insert(index, key.into());
    }

    /// Remove the first occurrence of `field`. Returns whether anything was removed.
    pub fn remove(&mut self, field: &str) -> bool {
        match self.position(field) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn remove_at(&mut self, index: usize) -> Option<ColumnKey> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    pub fn pop(&mut self) -> Option<ColumnKey> {
        self.0.pop()
    }

    /// Swap two positions. Out-of-range indices leave the list untouched.
    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        if a >= self.0.len() || b >= self.0.len() || a == b {
            return false;
        }
        self.0.swap(a, b);
        true
    }

    pub fn reverse(&mut self) {
        self.0.reverse();
    }

    pub fn replace(&mut self, columns: impl IntoIterator<Item = impl Into<ColumnKey>>) {
        self.0 = columns.into_iter().map(Into::into).collect();
    }

    pub fn retain(&mut self, f: impl FnMut(&ColumnKey) -> bool) {
        self.0.retain(f);
    }

    pub fn as_slice(&self) -> &[ColumnKey] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<ColumnKey> {
        self.0
    }
}

impl Deref for ColumnList {
    type Target = [ColumnKey];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<K: Into<ColumnKey>> FromIterator<K> for ColumnList {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<ColumnKey>> From<Vec<K>> for ColumnList {
    fn from(keys: Vec<K>) -> Self {
        keys.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a ColumnList {
    type Item = &'a ColumnKey;
    type IntoIter = std::slice::Iter<'a, ColumnKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
