//! Named-value environment for a single test.
//!
//! Tests bind values by name - either eagerly or as deferred thunks - and
//! the request machinery looks them up when building paths, parameters, and
//! headers. A thunk is evaluated at most once per test; undefined names are
//! absent, never an error.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

enum Binding {
    Value(Value),
    Thunk(Box<dyn Fn() -> Value>),
}

/// Lazily evaluated, memoized name-to-value bindings for one test.
#[derive(Default)]
pub struct Environment {
    bindings: IndexMap<String, Binding>,
    memoized: RefCell<HashMap<String, Value>>,
}

impl Environment {
    /// Create an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a name to a value.
    ///
    /// Rebinding replaces the previous binding and forgets any memoized
    /// result for the name.
    pub fn bind(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        self.memoized.borrow_mut().remove(&name);
        self.bindings.insert(name, Binding::Value(value.into()));
    }

    /// Bind a name to a deferred computation, evaluated at most once.
    pub fn bind_with(&mut self, name: impl Into<String>, thunk: impl Fn() -> Value + 'static) {
        let name = name.into();
        self.memoized.borrow_mut().remove(&name);
        self.bindings.insert(name, Binding::Thunk(Box::new(thunk)));
    }

    /// Look up a bound value by name, evaluating and memoizing thunks.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.bindings.get(name)? {
            Binding::Value(value) => Some(value.clone()),
            Binding::Thunk(thunk) => {
                if let Some(value) = self.memoized.borrow().get(name) {
                    return Some(value.clone());
                }
                let value = thunk();
                self.memoized
                    .borrow_mut()
                    .insert(name.to_string(), value.clone());
                Some(value)
            }
        }
    }

    /// Returns `true` if a binding exists for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Names bound in this environment, in binding order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("names", &self.bindings.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
