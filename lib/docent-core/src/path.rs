//! Route template substitution.
//!
//! Route templates use `:name` placeholders (e.g. `/orders/:order_id`).
//! Placeholders with a bound value are replaced by the value's canonical
//! print form; unresolved placeholders stay literal so a partially
//! specified route can still be documented.

use serde_json::Value;

use crate::canonical_string;

/// Substitute `:identifier` placeholders in a route template.
///
/// `lookup` resolves a placeholder name to its bound value. Identifiers are
/// ASCII alphanumerics and underscores. A placeholder is left unchanged when
/// the lookup misses or the value has no scalar print form; no escaping or
/// validation is performed here.
///
/// # Example
///
/// ```
/// use docent_core::build_path;
/// use serde_json::json;
///
/// let path = build_path("/orders/:order_id/line_items/:id", |name| match name {
///     "order_id" => Some(json!(3)),
///     "id" => Some(json!(2)),
///     _ => None,
/// });
/// assert_eq!(path, "/orders/3/line_items/2");
/// ```
pub fn build_path<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<Value>,
{
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != ':' {
            out.push(c);
            continue;
        }

        let mut name = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_ascii_alphanumeric() || next == '_' {
                name.push(next);
                chars.next();
            } else {
                break;
            }
        }

        if name.is_empty() {
            out.push(':');
            continue;
        }

        match lookup(&name).as_ref().and_then(canonical_string) {
            Some(text) => out.push_str(&text),
            None => {
                out.push(':');
                out.push_str(&name);
            }
        }
    }

    out
}

/// Placeholder names appearing in a route template, in order.
///
/// # Example
///
/// ```
/// use docent_core::path_placeholders;
///
/// let names = path_placeholders("/orders/:order_id/line_items/:id");
/// assert_eq!(names, ["order_id", "id"]);
/// ```
#[must_use]
pub fn path_placeholders(template: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != ':' {
            continue;
        }
        let mut name = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_ascii_alphanumeric() || next == '_' {
                name.push(next);
                chars.next();
            } else {
                break;
            }
        }
        if !name.is_empty() {
            names.push(name);
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn substitutes_bound_placeholders() {
        let path = build_path("/orders/:id", |name| {
            (name == "id").then(|| json!(1))
        });
        assert_eq!(path, "/orders/1");
    }

    #[test]
    fn unbound_placeholders_stay_literal() {
        let path = build_path("/orders/:order_id", |_| None);
        assert_eq!(path, "/orders/:order_id");
    }

    #[test]
    fn mixed_bindings() {
        let path = build_path("/orders/:order_id/line_items/:id", |name| {
            (name == "order_id").then(|| json!(3))
        });
        assert_eq!(path, "/orders/3/line_items/:id");
    }

    #[test]
    fn second_pass_is_idempotent_without_new_bindings() {
        let once = build_path("/orders/:order_id/items/:id", |name| {
            (name == "id").then(|| json!(2))
        });
        let twice = build_path(&once, |name| (name == "id").then(|| json!(2)));
        assert_eq!(once, twice);
    }

    #[test]
    fn string_values_print_unquoted() {
        let path = build_path("/users/:slug", |name| {
            (name == "slug").then(|| json!("alice"))
        });
        assert_eq!(path, "/users/alice");
    }

    #[test]
    fn bare_colon_is_preserved() {
        let path = build_path("/time/12:30", |_| None);
        assert_eq!(path, "/time/12:30");
    }

    #[test]
    fn placeholders_list_in_template_order() {
        assert_eq!(
            path_placeholders("/orders/:order_id/line_items/:id"),
            ["order_id", "id"]
        );
        assert!(path_placeholders("/orders").is_empty());
    }

    #[test]
    fn composite_values_do_not_substitute() {
        let path = build_path("/orders/:id", |name| {
            (name == "id").then(|| json!([1, 2]))
        });
        assert_eq!(path, "/orders/:id");
    }
}
