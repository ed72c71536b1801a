//! Test metadata seam.
//!
//! The engine persists everything the reporting pass needs - method, route,
//! resolved parameters, recorded interactions - through a minimal key/value
//! capability any test framework's context object can satisfy.

use indexmap::IndexMap;
use serde_json::Value;

/// Key/value attachment to the currently executing test.
pub trait Metadata {
    /// Read a value by key.
    fn get(&self, key: &str) -> Option<&Value>;

    /// Attach or replace a value.
    fn set(&mut self, key: &str, value: Value);

    /// Detach a value, returning the previous one if present.
    fn remove(&mut self, key: &str) -> Option<Value>;
}

/// Ordered in-memory [`Metadata`] implementation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryMetadata {
    entries: IndexMap<String, Value>,
}

impl InMemoryMetadata {
    /// Create an empty metadata table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Snapshot as a JSON object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

impl Metadata for InMemoryMetadata {
    fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }
}
