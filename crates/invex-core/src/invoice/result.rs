//! Field values and the ordered result mapping.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Wire value recorded for a field whose rule did not match.
pub const NOT_FOUND: &str = "Not found";

/// Outcome of a single field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Trimmed text captured by the rule's locator.
    Found(String),
    /// The rule did not match, or could not be built.
    NotFound,
}

impl FieldValue {
    pub fn is_found(&self) -> bool {
        matches!(self, FieldValue::Found(_))
    }

    /// Extracted text, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            FieldValue::Found(v) => Some(v),
            FieldValue::NotFound => None,
        }
    }

    /// Text as it goes on the wire, with the sentinel for missing values.
    pub fn as_str(&self) -> &str {
        self.value().unwrap_or(NOT_FOUND)
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(FieldValue::NotFound, FieldValue::Found)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Ordered field name to value mapping produced by one extraction.
///
/// Insertion order is preserved. Inserting an existing key replaces its value
/// in place without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultMapping {
    entries: Vec<(String, FieldValue)>,
}

impl ResultMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert or overwrite a field.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Wire string for a field (the sentinel when missing from the text).
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).map(FieldValue::as_str)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields with an extracted value.
    pub fn found_count(&self) -> usize {
        self.entries.iter().filter(|(_, v)| v.is_found()).count()
    }
}

impl Serialize for ResultMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
