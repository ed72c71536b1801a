//! Parameter serialization.
//!
//! Turns a resolved parameter set plus the test's bound values into the
//! ordered mapping that becomes either a query string or a structured
//! request body. Scoped parameters nest under their wrapping key at the
//! position of the group's first member.

use docent_core::ResolvedParameterSet;
use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::Environment;

/// Build the ordered parameter mapping for one request.
///
/// Parameters without a bound value are omitted entirely, and names listed
/// in `path_vars` are consumed by path substitution rather than serialized.
/// Explicit extras merge last at the top level with highest precedence -
/// they can add keys the test never declared or override grouped output
/// wholesale.
#[must_use]
pub fn serialize_params(
    resolved: &ResolvedParameterSet,
    env: &Environment,
    extra: &IndexMap<String, Value>,
    path_vars: &[String],
) -> IndexMap<String, Value> {
    let mut out: IndexMap<String, Value> = IndexMap::new();

    for param in resolved {
        if path_vars.iter().any(|name| *name == param.name) {
            continue;
        }
        let value = extra
            .get(&param.name)
            .cloned()
            .or_else(|| env.get(&param.name));
        let Some(value) = value else { continue };

        match &param.scope {
            Some(key) => {
                let slot = out
                    .entry(key.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                if let Value::Object(group) = slot {
                    group.insert(param.name.clone(), value);
                }
            }
            None => {
                out.insert(param.name.clone(), value);
            }
        }
    }

    for (name, value) in extra {
        if resolved.get(name).is_none() && !path_vars.iter().any(|var| var == name) {
            out.insert(name.clone(), value.clone());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use docent_core::{ParameterSelection, ParameterSpec, ScopeRule};
    use serde_json::json;

    use super::*;

    fn resolved(specs: &[ParameterSpec]) -> ResolvedParameterSet {
        let mut set = ResolvedParameterSet::new();
        for spec in specs {
            set.overlay(spec);
        }
        set
    }

    #[test]
    fn bound_parameters_serialize_in_order() {
        let set = resolved(&[ParameterSpec::new("type"), ParameterSpec::new("size")]);
        let mut env = Environment::new();
        env.bind("type", "coffee");
        env.bind("size", "medium");

        let params = serialize_params(&set, &env, &IndexMap::new(), &[]);
        assert_eq!(
            serde_json::to_value(&params).expect("params"),
            json!({ "type": "coffee", "size": "medium" })
        );
    }

    #[test]
    fn unbound_parameters_are_omitted() {
        let set = resolved(&[ParameterSpec::new("type"), ParameterSpec::new("note")]);
        let mut env = Environment::new();
        env.bind("type", "coffee");

        let params = serialize_params(&set, &env, &IndexMap::new(), &[]);
        assert_eq!(params.len(), 1);
        assert!(!params.contains_key("note"));
    }

    #[test]
    fn scoped_parameters_group_under_wrapping_key() {
        let mut set = resolved(&[
            ParameterSpec::new("api_key"),
            ParameterSpec::new("name"),
            ParameterSpec::new("size"),
        ]);
        set.apply_rule(&ScopeRule::new(
            "order",
            ParameterSelection::names(["name", "size"]),
        ));

        let mut env = Environment::new();
        env.bind("api_key", "1234");
        env.bind("name", "Order 5");
        env.bind("size", 5);

        let params = serialize_params(&set, &env, &IndexMap::new(), &[]);
        assert_eq!(
            serde_json::to_value(&params).expect("params"),
            json!({ "api_key": "1234", "order": { "name": "Order 5", "size": 5 } })
        );
    }

    #[test]
    fn scope_all_wraps_everything() {
        let mut set = resolved(&[
            ParameterSpec::new("api_key"),
            ParameterSpec::new("name"),
            ParameterSpec::new("size"),
        ]);
        set.apply_rule(&ScopeRule::new("order", ParameterSelection::All));

        let mut env = Environment::new();
        env.bind("api_key", "1234");
        env.bind("name", "Order 5");
        env.bind("size", 5);

        let params = serialize_params(&set, &env, &IndexMap::new(), &[]);
        assert_eq!(
            serde_json::to_value(&params).expect("params"),
            json!({ "order": { "api_key": "1234", "name": "Order 5", "size": 5 } })
        );
    }

    #[test]
    fn extras_override_declared_values() {
        let set = resolved(&[ParameterSpec::new("size")]);
        let mut env = Environment::new();
        env.bind("size", "medium");

        let mut extra = IndexMap::new();
        extra.insert("size".to_string(), json!("large"));

        let params = serialize_params(&set, &env, &extra, &[]);
        assert_eq!(params.get("size"), Some(&json!("large")));
    }

    #[test]
    fn path_variables_are_not_serialized() {
        let set = resolved(&[ParameterSpec::new("id"), ParameterSpec::new("page")]);
        let mut env = Environment::new();
        env.bind("id", 1);
        env.bind("page", 2);

        let params = serialize_params(
            &set,
            &env,
            &IndexMap::new(),
            &["id".to_string()],
        );
        assert_eq!(
            serde_json::to_value(&params).expect("params"),
            json!({ "page": 2 })
        );
    }

    #[test]
    fn extras_add_undeclared_keys_last() {
        let set = resolved(&[ParameterSpec::new("type")]);
        let mut env = Environment::new();
        env.bind("type", "coffee");

        let mut extra = IndexMap::new();
        extra.insert("extra".to_string(), json!(true));

        let params = serialize_params(&set, &env, &extra, &[]);
        assert_eq!(
            serde_json::to_value(&params).expect("params"),
            json!({ "type": "coffee", "extra": true })
        );
    }
}
