//! Header declarations and lazy resolution.
//!
//! A header value is declared either literally or as a lookup into the
//! test's environment, resolved only at send time. Metadata keeps the
//! declaration form; the dispatched request carries the resolved form.

use docent_core::canonical_string;
use indexmap::IndexMap;
use serde_json::Value;

use crate::Environment;

/// A declared header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    /// Send the value as written.
    Literal(String),
    /// Resolve the named environment binding at send time; the header is
    /// omitted when the name is unbound.
    Lookup(String),
}

impl HeaderValue {
    /// A literal header value.
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// A deferred lookup by environment name.
    #[must_use]
    pub fn lookup(name: impl Into<String>) -> Self {
        Self::Lookup(name.into())
    }

    /// Declaration form recorded in metadata: literals verbatim, lookups as
    /// `:name`.
    #[must_use]
    pub fn to_metadata(&self) -> Value {
        match self {
            Self::Literal(value) => Value::String(value.clone()),
            Self::Lookup(name) => Value::String(format!(":{name}")),
        }
    }
}

/// Resolve declared headers against the environment.
///
/// Literals pass through; lookups resolve to the bound value's canonical
/// print form, or drop out of the result when unbound.
#[must_use]
pub fn resolve_headers(
    declared: &IndexMap<String, HeaderValue>,
    env: &Environment,
) -> IndexMap<String, String> {
    let mut resolved = IndexMap::new();
    for (name, value) in declared {
        match value {
            HeaderValue::Literal(text) => {
                resolved.insert(name.clone(), text.clone());
            }
            HeaderValue::Lookup(key) => {
                if let Some(text) = env.get(key).as_ref().and_then(canonical_string) {
                    resolved.insert(name.clone(), text);
                }
            }
        }
    }
    resolved
}

/// Declaration-form metadata for a header table.
#[must_use]
pub fn headers_to_metadata(declared: &IndexMap<String, HeaderValue>) -> Value {
    Value::Object(
        declared
            .iter()
            .map(|(name, value)| (name.clone(), value.to_metadata()))
            .collect(),
    )
}
