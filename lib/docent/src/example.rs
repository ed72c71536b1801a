//! Wrapped documentable examples.

use serde_json::Value;

use crate::{InMemoryMetadata, Metadata};

/// A finished test wrapped for the documentation pass: its description
/// plus the metadata snapshot the engine stamped while it ran.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    description: String,
    metadata: InMemoryMetadata,
}

impl Example {
    /// Wrap a finished test.
    #[must_use]
    pub fn new(description: impl Into<String>, metadata: InMemoryMetadata) -> Self {
        Self {
            description: description.into(),
            metadata,
        }
    }

    /// The test's description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The metadata snapshot.
    #[must_use]
    pub const fn metadata(&self) -> &InMemoryMetadata {
        &self.metadata
    }

    /// The resource the example belongs to, if stamped.
    #[must_use]
    pub fn resource_name(&self) -> Option<&str> {
        self.metadata.get("resource_name").and_then(Value::as_str)
    }

    /// Returns `false` only when the `"document"` tag is explicitly
    /// `false`; any other tag (or none) keeps the example documentable.
    #[must_use]
    pub fn should_document(&self) -> bool {
        self.metadata.get("document") != Some(&Value::Bool(false))
    }

    /// JSON representation for writers.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut object = serde_json::Map::new();
        object.insert(
            "description".to_string(),
            Value::String(self.description.clone()),
        );
        if let Value::Object(entries) = self.metadata.to_value() {
            object.extend(entries);
        }
        Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn metadata_with(key: &str, value: Value) -> InMemoryMetadata {
        let mut metadata = InMemoryMetadata::new();
        metadata.set(key, value);
        metadata
    }

    #[test]
    fn exposes_description_and_resource() {
        let example = Example::new(
            "Creating an order",
            metadata_with("resource_name", json!("Order")),
        );
        assert_eq!(example.description(), "Creating an order");
        assert_eq!(example.resource_name(), Some("Order"));
    }

    #[test]
    fn documents_by_default() {
        let example = Example::new("test", InMemoryMetadata::new());
        assert!(example.should_document());
    }

    #[test]
    fn document_false_excludes() {
        let example = Example::new("test", metadata_with("document", json!(false)));
        assert!(!example.should_document());
    }

    #[test]
    fn non_boolean_document_tags_still_document() {
        let example = Example::new("test", metadata_with("document", json!("not_all")));
        assert!(example.should_document());
    }

    #[test]
    fn to_value_merges_description_and_metadata() {
        let example = Example::new("test", metadata_with("route", json!("/orders")));
        assert_eq!(
            example.to_value(),
            json!({ "description": "test", "route": "/orders" })
        );
    }
}
