//! Scope registry and resolution.
//!
//! Description scopes form a static tree built before any test runs. Each
//! node holds its local declarations only; nothing is copied down the tree.
//! Resolution walks the chain from the outermost scope to the test's own
//! scope, overlaying declarations by name, and never mutates the registry.
//!
//! Per-scope application order is: parameter declarations, then bulk
//! required markings, then scope rules. An inner declaration therefore
//! beats an outer rule, and a rule beats an explicit `scope` option
//! declared in the same scope.

use docent_core::{Method, ParameterSelection, ParameterSpec, ResolvedParameterSet, ScopeRule};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::trace;

use crate::HeaderValue;

/// Handle to a scope node within a [`ScopeRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

#[derive(Debug, Default)]
struct ScopeNode {
    parent: Option<ScopeId>,
    resource: Option<String>,
    document: Option<Value>,
    endpoint: Option<(Method, String)>,
    parameters: IndexMap<String, ParameterSpec>,
    required: Vec<String>,
    rules: Vec<ScopeRule>,
    headers: IndexMap<String, HeaderValue>,
}

/// Everything a test inherits from its scope chain.
#[derive(Debug, Default)]
pub struct ResolvedScope {
    /// Overlaid parameter declarations, in first-declaration order.
    pub parameters: ResolvedParameterSet,
    /// Overlaid header declarations, in first-declaration order.
    pub headers: IndexMap<String, HeaderValue>,
    /// Innermost `(method, route)` declaration, if any.
    pub endpoint: Option<(Method, String)>,
    /// Innermost resource name, if any.
    pub resource: Option<String>,
    /// Innermost documentation tag, if any.
    pub document: Option<Value>,
}

/// The static tree of description scopes.
///
/// Built once per documented resource; read-only during test execution.
#[derive(Debug, Default)]
pub struct ScopeRegistry {
    nodes: Vec<ScopeNode>,
}

impl ScopeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a top-level scope.
    pub fn root(&mut self) -> ScopeId {
        self.push(ScopeNode::default())
    }

    /// Create a top-level scope documenting the named resource.
    pub fn resource(&mut self, name: impl Into<String>) -> ScopeId {
        self.push(ScopeNode {
            resource: Some(name.into()),
            ..ScopeNode::default()
        })
    }

    /// Create a scope nested under `parent`.
    pub fn child(&mut self, parent: ScopeId) -> ScopeId {
        self.push(ScopeNode {
            parent: Some(parent),
            ..ScopeNode::default()
        })
    }

    fn push(&mut self, node: ScopeNode) -> ScopeId {
        let id = ScopeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn node(&self, id: ScopeId) -> Option<&ScopeNode> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: ScopeId) -> Option<&mut ScopeNode> {
        self.nodes.get_mut(id.0)
    }

    /// Declare a parameter within a scope; redeclaring a name overwrites
    /// the scope's local entry.
    pub fn declare_parameter(&mut self, scope: ScopeId, spec: ParameterSpec) {
        if let Some(node) = self.node_mut(scope) {
            node.parameters.insert(spec.name().to_string(), spec);
        }
    }

    /// Flag the named parameters as required, scoped like any other
    /// declaration. Names unknown at resolution time are ignored.
    pub fn mark_required<I, S>(&mut self, scope: ScopeId, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(node) = self.node_mut(scope) {
            node.required.extend(names.into_iter().map(Into::into));
        }
    }

    /// Register a scope rule wrapping the selected parameters under
    /// `wrapping_key`. Selected names no ancestor declared resolve to
    /// nothing and are silently skipped.
    pub fn scope_parameters(
        &mut self,
        scope: ScopeId,
        wrapping_key: impl Into<String>,
        selection: ParameterSelection,
    ) {
        if let Some(node) = self.node_mut(scope) {
            node.rules.push(ScopeRule::new(wrapping_key, selection));
        }
    }

    /// Declare a header within a scope, overlaid by name like parameters.
    pub fn declare_header(
        &mut self,
        scope: ScopeId,
        name: impl Into<String>,
        value: HeaderValue,
    ) {
        if let Some(node) = self.node_mut(scope) {
            node.headers.insert(name.into(), value);
        }
    }

    /// Associate an HTTP method and route template with a scope.
    pub fn endpoint(&mut self, scope: ScopeId, method: Method, route: impl Into<String>) {
        if let Some(node) = self.node_mut(scope) {
            node.endpoint = Some((method, route.into()));
        }
    }

    /// Tag a scope's examples for the documentation pass; `false` excludes
    /// them from the index.
    pub fn set_document(&mut self, scope: ScopeId, value: impl Into<Value>) {
        if let Some(node) = self.node_mut(scope) {
            node.document = Some(value.into());
        }
    }

    /// Scope ids from the outermost ancestor down to `leaf`.
    #[must_use]
    pub fn chain(&self, leaf: ScopeId) -> Vec<ScopeId> {
        let mut chain = Vec::new();
        let mut current = Some(leaf);
        while let Some(id) = current {
            chain.push(id);
            current = self.node(id).and_then(|node| node.parent);
        }
        chain.reverse();
        chain
    }

    /// Resolve the effective parameter set for a test scope.
    #[must_use]
    pub fn resolve(&self, leaf: ScopeId) -> ResolvedParameterSet {
        self.resolve_chain(&self.chain(leaf))
    }

    /// Resolve a parameter set for an explicit outermost-to-innermost chain.
    #[must_use]
    pub fn resolve_chain(&self, chain: &[ScopeId]) -> ResolvedParameterSet {
        let mut set = ResolvedParameterSet::new();
        for id in chain {
            let Some(node) = self.node(*id) else { continue };
            for spec in node.parameters.values() {
                set.overlay(spec);
            }
            set.mark_required(node.required.iter().map(String::as_str));
            for rule in &node.rules {
                set.apply_rule(rule);
            }
        }
        trace!(scopes = chain.len(), parameters = set.len(), "resolved scope chain");
        set
    }

    /// Resolve the effective header declarations for a test scope.
    #[must_use]
    pub fn resolve_headers(&self, leaf: ScopeId) -> IndexMap<String, HeaderValue> {
        let mut headers = IndexMap::new();
        for id in self.chain(leaf) {
            if let Some(node) = self.node(id) {
                for (name, value) in &node.headers {
                    headers.insert(name.clone(), value.clone());
                }
            }
        }
        headers
    }

    /// Resolve everything a test inherits from its scope chain.
    #[must_use]
    pub fn resolve_scope(&self, leaf: ScopeId) -> ResolvedScope {
        let chain = self.chain(leaf);
        let mut resolved = ResolvedScope {
            parameters: self.resolve_chain(&chain),
            headers: self.resolve_headers(leaf),
            ..ResolvedScope::default()
        };
        for id in chain {
            let Some(node) = self.node(id) else { continue };
            if let Some(endpoint) = &node.endpoint {
                resolved.endpoint = Some(endpoint.clone());
            }
            if let Some(resource) = &node.resource {
                resolved.resource = Some(resource.clone());
            }
            if let Some(document) = &node.document {
                resolved.document = Some(document.clone());
            }
        }
        resolved
    }
}
