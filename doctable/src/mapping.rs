//! Collaborators the table consults but does not own.
//!
//! - [`FieldMapping`] answers whether a field is indexed (and so sortable).
//! - [`ValueFormatter`] turns a raw value into display text.
//! - [`MetaFieldPolicy`] names internal fields hidden from detail rows.
//! - [`FilterSink`] receives filter requests from detail-row affordances.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;
use crate::row::SOURCE_FIELD;

/// Type tag reported by the field-mapping registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Number,
    Date,
    Boolean,
    Ip,
    GeoPoint,
    Object,
    #[default]
    #[serde(other)]
    Unknown,
}

pub trait FieldMapping {
    fn is_indexed(&self, field: &str) -> bool;

    fn type_of(&self, field: &str) -> FieldType;
}

/// Read-only mapping shared between the header and the host.
pub type SharedMapping = Arc<dyn FieldMapping + Send + Sync>;

/// Mapping entry for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldSpec {
    #[serde(default)]
    pub indexed: bool,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
}

/// In-memory field mapping.
///
/// Deserializes from a JSON object of the form
/// `{"bytes": {"indexed": true, "type": "number"}, ...}`.
/// Unmapped fields are reported as not indexed and of unknown type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mapping {
    fields: HashMap<String, FieldSpec>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field entry.
    pub fn field(mut self, name: impl Into<String>, indexed: bool, field_type: FieldType) -> Self {
        self.fields.insert(
            name.into(),
            FieldSpec {
                indexed,
                field_type,
            },
        );
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl FieldMapping for Mapping {
    fn is_indexed(&self, field: &str) -> bool {
        self.fields.get(field).is_some_and(|spec| spec.indexed)
    }

    fn type_of(&self, field: &str) -> FieldType {
        self.fields
            .get(field)
            .map(|spec| spec.field_type)
            .unwrap_or_default()
    }
}

/// Turns a raw field value into display text.
///
/// Implementations must be total: every value, including `null`, formats to
/// some string (empty for absent data).
pub trait ValueFormatter {
    fn format(&self, field: &str, raw: &Value) -> String;
}

/// Formatter used when the host supplies none.
///
/// Strings render verbatim, scalars through `Display`, `null` as empty text.
/// The `_source` pseudo-field renders as a `key: value` summary of the whole
/// document. Other arrays and objects render as compact JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

impl DefaultFormatter {
    fn scalar(raw: &Value) -> String {
        match raw {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            other => other.to_string(),
        }
    }

    fn summary(raw: &Value) -> String {
        match raw {
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| format!("{k}: {}", Self::scalar(v)))
                .collect::<Vec<_>>()
                .join(" "),
            other => Self::scalar(other),
        }
    }
}

impl ValueFormatter for DefaultFormatter {
    fn format(&self, field: &str, raw: &Value) -> String {
        if field == SOURCE_FIELD {
            Self::summary(raw)
        } else {
            Self::scalar(raw)
        }
    }
}

impl<F> ValueFormatter for F
where
    F: Fn(&str, &Value) -> String,
{
    fn format(&self, field: &str, raw: &Value) -> String {
        self(field, raw)
    }
}

/// Names of internal fields that detail rows leave out.
pub trait MetaFieldPolicy {
    fn meta_fields(&self) -> BTreeSet<String>;

    fn is_meta(&self, field: &str) -> bool {
        self.meta_fields().contains(field)
    }
}

pub const DEFAULT_META_FIELDS: &[&str] = &["_id", "_type", "_index", "_score"];

/// Fixed set of metadata field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaFields(BTreeSet<String>);

impl MetaFields {
    pub fn new(fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(fields.into_iter().map(Into::into).collect())
    }

    pub fn none() -> Self {
        Self(BTreeSet::new())
    }
}

impl Default for MetaFields {
    fn default() -> Self {
        Self::new(DEFAULT_META_FIELDS.iter().copied())
    }
}

impl MetaFieldPolicy for MetaFields {
    fn meta_fields(&self) -> BTreeSet<String> {
        self.0.clone()
    }

    fn is_meta(&self, field: &str) -> bool {
        self.0.contains(field)
    }
}

/// Receives filter requests. Fire-and-forget.
pub trait FilterSink {
    fn on_filter(&mut self, field: &str, value: &Value, exclude: bool);
}

impl<F> FilterSink for F
where
    F: FnMut(&str, &Value, bool),
{
    fn on_filter(&mut self, field: &str, value: &Value, exclude: bool) {
        self(field, value, exclude)
    }
}
