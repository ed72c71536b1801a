//! Index of documentable examples.

use serde_json::Value;

use crate::Example;

/// Ordered collection of examples gathered over a documentation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Index {
    examples: Vec<Example>,
}

impl Index {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an example.
    pub fn push(&mut self, example: Example) {
        self.examples.push(example);
    }

    /// Indexed examples, in insertion order.
    #[must_use]
    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    /// Number of indexed examples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    /// Returns `true` if nothing was indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// JSON representation for writers.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "examples": self.examples.iter().map(Example::to_value).collect::<Vec<_>>(),
        })
    }
}
