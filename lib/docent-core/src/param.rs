//! Parameter metadata model.
//!
//! Tests declare parameters per description scope; resolution overlays the
//! declarations along the scope chain into an ordered
//! [`ResolvedParameterSet`] used both for documentation output and for
//! request serialization.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// One declared parameter within a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    name: String,
    description: Option<String>,
    required: bool,
    scope: Option<String>,
}

impl ParameterSpec {
    /// Declare a parameter by name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            required: false,
            scope: None,
        }
    }

    /// Set the documentation text.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the parameter as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Nest the parameter under a wrapping key at serialization time.
    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Which declared parameters a [`ScopeRule`] covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterSelection {
    /// Every parameter resolved in the scope.
    All,
    /// Only the listed parameter names.
    Names(Vec<String>),
}

impl ParameterSelection {
    /// Select the given names.
    #[must_use]
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Names(names.into_iter().map(Into::into).collect())
    }

    /// Returns `true` if the selection covers `name`.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Names(names) => names.iter().any(|n| n == name),
        }
    }
}

/// A directive wrapping a subset of parameters under a nested key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeRule {
    /// Key the selected parameters nest under.
    pub wrapping_key: String,
    /// Parameters the rule covers.
    pub selection: ParameterSelection,
}

impl ScopeRule {
    /// Create a rule wrapping `selection` under `wrapping_key`.
    #[must_use]
    pub fn new(wrapping_key: impl Into<String>, selection: ParameterSelection) -> Self {
        Self {
            wrapping_key: wrapping_key.into(),
            selection,
        }
    }
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// A parameter after overlay across the scope chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedParameter {
    /// Parameter name, unique within the resolved set.
    pub name: String,
    /// Documentation text, if any declaration provided one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the parameter is required.
    #[serde(skip_serializing_if = "is_false")]
    pub required: bool,
    /// Wrapping key the parameter serializes under, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Ordered set of resolved parameters, keyed by name.
///
/// Order of first declaration is preserved across overlays; re-declaring a
/// name updates the entry in place. Deterministic documentation output
/// depends on this ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedParameterSet {
    entries: IndexMap<String, ResolvedParameter>,
}

impl ResolvedParameterSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay a declaration onto the set.
    ///
    /// A new name appends at the end. An existing name merges in place:
    /// explicitly set fields of the newer declaration win, unset fields
    /// keep the accumulated value.
    pub fn overlay(&mut self, spec: &ParameterSpec) {
        if let Some(entry) = self.entries.get_mut(&spec.name) {
            if spec.description.is_some() {
                entry.description.clone_from(&spec.description);
            }
            if spec.required {
                entry.required = true;
            }
            if spec.scope.is_some() {
                entry.scope.clone_from(&spec.scope);
            }
        } else {
            self.entries.insert(
                spec.name.clone(),
                ResolvedParameter {
                    name: spec.name.clone(),
                    description: spec.description.clone(),
                    required: spec.required,
                    scope: spec.scope.clone(),
                },
            );
        }
    }

    /// Flag the named parameters as required; unknown names are ignored.
    pub fn mark_required<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            if let Some(entry) = self.entries.get_mut(name) {
                entry.required = true;
            }
        }
    }

    /// Apply a scope rule, stamping the wrapping key on covered entries.
    pub fn apply_rule(&mut self, rule: &ScopeRule) {
        for entry in self.entries.values_mut() {
            if rule.selection.matches(&entry.name) {
                entry.scope = Some(rule.wrapping_key.clone());
            }
        }
    }

    /// Look up a resolved parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResolvedParameter> {
        self.entries.get(name)
    }

    /// Iterate in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedParameter> {
        self.entries.values()
    }

    /// Number of resolved parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Metadata representation: an array of parameter objects.
    #[must_use]
    pub fn to_metadata(&self) -> Value {
        Value::Array(
            self.iter()
                .map(|entry| serde_json::to_value(entry).unwrap_or(Value::Null))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a ResolvedParameterSet {
    type Item = &'a ResolvedParameter;
    type IntoIter = indexmap::map::Values<'a, String, ResolvedParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn overlay_preserves_first_declared_order() {
        let mut set = ResolvedParameterSet::new();
        set.overlay(&ParameterSpec::new("type"));
        set.overlay(&ParameterSpec::new("size"));
        set.overlay(&ParameterSpec::new("type").description("redeclared"));

        let names: Vec<_> = set.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["type", "size"]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn overlay_merges_explicit_fields_only() {
        let mut set = ResolvedParameterSet::new();
        set.overlay(&ParameterSpec::new("type").description("Order type").scope("order"));
        set.overlay(&ParameterSpec::new("type").required());

        let entry = set.get("type").expect("type");
        assert_eq!(entry.description.as_deref(), Some("Order type"));
        assert!(entry.required);
        assert_eq!(entry.scope.as_deref(), Some("order"));
    }

    #[test]
    fn mark_required_ignores_unknown_names() {
        let mut set = ResolvedParameterSet::new();
        set.overlay(&ParameterSpec::new("type"));
        set.mark_required(["type", "absent"]);

        assert!(set.get("type").expect("type").required);
        assert!(set.get("absent").is_none());
    }

    #[test]
    fn apply_rule_stamps_selected_names() {
        let mut set = ResolvedParameterSet::new();
        set.overlay(&ParameterSpec::new("api_key"));
        set.overlay(&ParameterSpec::new("name"));
        set.overlay(&ParameterSpec::new("size"));
        set.apply_rule(&ScopeRule::new(
            "order",
            ParameterSelection::names(["name", "size"]),
        ));

        assert_eq!(set.get("api_key").expect("api_key").scope, None);
        assert_eq!(
            set.get("name").expect("name").scope.as_deref(),
            Some("order")
        );
        assert_eq!(
            set.get("size").expect("size").scope.as_deref(),
            Some("order")
        );
    }

    #[test]
    fn apply_rule_all_covers_everything() {
        let mut set = ResolvedParameterSet::new();
        set.overlay(&ParameterSpec::new("api_key"));
        set.overlay(&ParameterSpec::new("name"));
        set.apply_rule(&ScopeRule::new("order", ParameterSelection::All));

        assert!(set.iter().all(|p| p.scope.as_deref() == Some("order")));
    }

    #[test]
    fn rule_over_unknown_name_is_a_no_op() {
        let mut set = ResolvedParameterSet::new();
        set.overlay(&ParameterSpec::new("type"));
        set.apply_rule(&ScopeRule::new(
            "order",
            ParameterSelection::names(["not_there"]),
        ));

        assert_eq!(set.get("type").expect("type").scope, None);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn metadata_omits_default_fields() {
        let mut set = ResolvedParameterSet::new();
        set.overlay(&ParameterSpec::new("type").description("The type of drink you want."));
        set.overlay(&ParameterSpec::new("note").description("Any additional notes.").required());

        assert_eq!(
            set.to_metadata(),
            json!([
                { "name": "type", "description": "The type of drink you want." },
                { "name": "note", "description": "Any additional notes.", "required": true },
            ])
        );
    }
}
