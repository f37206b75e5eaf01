//! Row data: display text plus raw value for every field of a document.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::RowError;
use crate::mapping::ValueFormatter;

/// Pseudo-field rendering a summary of the whole document.
pub const SOURCE_FIELD: &str = "_source";

/// Raw value of a field together with its formatted display text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValue {
    pub raw: Value,
    pub formatted: String,
}

impl FieldValue {
    pub fn new(raw: Value, formatted: impl Into<String>) -> Self {
        Self {
            raw,
            formatted: formatted.into(),
        }
    }
}

/// One document as the table sees it.
///
/// Fields are keyed by flattened name (`a.b` for nested objects) and iterate
/// in name order. The `_source` pseudo-field is held apart from the regular
/// fields: it can be shown as a column but is never listed in a detail row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RowData {
    id: Option<String>,
    fields: BTreeMap<String, FieldValue>,
    source: Option<FieldValue>,
}

impl RowData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a field with explicit display text.
    pub fn field(mut self, name: impl Into<String>, raw: Value, formatted: impl Into<String>) -> Self {
        self.fields
            .insert(name.into(), FieldValue::new(raw, formatted));
        self
    }

    /// Set the `_source` pseudo-field with explicit display text.
    pub fn with_source(mut self, raw: Value, formatted: impl Into<String>) -> Self {
        self.source = Some(FieldValue::new(raw, formatted));
        self
    }

    /// Build a row from a search hit or a plain document.
    ///
    /// A hit (an object with an object-valued `_source`) contributes its
    /// top-level metadata fields and the flattened `_source`. Any other object
    /// is flattened as a whole. Every field is formatted exactly once.
    pub fn from_document(doc: &Map<String, Value>, formatter: &dyn ValueFormatter) -> Self {
        let mut row = RowData::new();
        row.id = doc.get("_id").and_then(Value::as_str).map(str::to_string);

        let source = match doc.get(SOURCE_FIELD) {
            Some(Value::Object(source)) => {
                for (key, value) in doc.iter().filter(|(k, _)| k.as_str() != SOURCE_FIELD) {
                    row.insert_formatted(key.clone(), value.clone(), formatter);
                }
                source
            }
            _ => doc,
        };

        let mut flat = Vec::new();
        flatten(None, source, &mut flat);
        for (key, value) in flat {
            row.insert_formatted(key, value, formatter);
        }

        let raw = Value::Object(source.clone());
        let formatted = formatter.format(SOURCE_FIELD, &raw);
        row.source = Some(FieldValue::new(raw, formatted));
        row
    }

    /// Build a row from an arbitrary JSON value. `index` is reported on error.
    pub fn from_value(index: usize, value: &Value, formatter: &dyn ValueFormatter) -> Result<Self, RowError> {
        match value {
            Value::Object(doc) => Ok(Self::from_document(doc, formatter)),
            _ => Err(RowError::NotAnObject { index }),
        }
    }

    fn insert_formatted(&mut self, name: String, raw: Value, formatter: &dyn ValueFormatter) {
        let formatted = formatter.format(&name, &raw);
        self.fields.insert(name, FieldValue::new(raw, formatted));
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        if field == SOURCE_FIELD {
            return self.source.as_ref().or_else(|| self.fields.get(field));
        }
        self.fields.get(field)
    }

    /// Display text for `field`, empty when the row has no such field.
    pub fn display(&self, field: &str) -> &str {
        self.get(field).map(|v| v.formatted.as_str()).unwrap_or("")
    }

    pub fn raw(&self, field: &str) -> Option<&Value> {
        self.get(field).map(|v| &v.raw)
    }

    /// Overwrite the display text of an existing field.
    pub fn set_formatted(&mut self, field: &str, formatted: impl Into<String>) -> bool {
        let slot = if field == SOURCE_FIELD {
            self.source.as_mut()
        } else {
            self.fields.get_mut(field)
        };
        match slot {
            Some(value) => {
                value.formatted = formatted.into();
                true
            }
            None => false,
        }
    }

    /// Regular fields in name order. Excludes `_source`.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn flatten(prefix: Option<&str>, map: &Map<String, Value>, out: &mut Vec<(String, Value)>) {
    for (key, value) in map {
        let name = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(inner) if !inner.is_empty() => flatten(Some(&name), inner, out),
            other => out.push((name, other.clone())),
        }
    }
}

/// Parse a JSON array of documents into rows.
pub fn rows_from_json(json: &str, formatter: &dyn ValueFormatter) -> Result<Vec<RowData>, RowError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(docs) = value else {
        return Err(RowError::NotAnArray);
    };
    docs.iter()
        .enumerate()
        .map(|(index, doc)| RowData::from_value(index, doc, formatter))
        .collect()
}
