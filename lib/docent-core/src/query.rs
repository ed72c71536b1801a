//! Nested query-string encoding.
//!
//! Composite parameter values encode in nested-bracket form: arrays as
//! repeated `key[]=v` pairs, maps as `key[sub]=v`, recursively. Generated
//! documentation depends on this exact shape, so the encoding is the one
//! bit-exact contract in the crate.

use indexmap::IndexMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;

use crate::{Error, Result};

/// Bytes escaped in query components; unreserved characters pass through.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Form-style component escaping, space as `+`.
fn escape(component: &str) -> String {
    utf8_percent_encode(component, QUERY_COMPONENT)
        .to_string()
        .replace("%20", "+")
}

/// Encode an ordered parameter mapping into a query string.
///
/// Keys and values are escaped in full, brackets included. Pair order
/// follows the mapping's insertion order, depth-first through composites.
///
/// # Errors
///
/// Returns [`Error::UnsupportedValue`] for `null` values: a query string
/// has no null representation and silent coercion would corrupt the
/// documented request.
///
/// # Example
///
/// ```
/// use docent_core::encode_query;
/// use indexmap::IndexMap;
/// use serde_json::json;
///
/// let mut params = IndexMap::new();
/// params.insert("id_eq".to_string(), json!([1, 2]));
/// let query = encode_query(&params).expect("encode");
/// assert_eq!(query, "id_eq%5B%5D=1&id_eq%5B%5D=2");
/// ```
pub fn encode_query(params: &IndexMap<String, Value>) -> Result<String> {
    let mut pairs = Vec::new();
    for (key, value) in params {
        encode_value(key, value, &mut pairs)?;
    }
    Ok(pairs.join("&"))
}

fn encode_value(key: &str, value: &Value, out: &mut Vec<String>) -> Result<()> {
    match value {
        Value::Array(items) => {
            let nested = format!("{key}[]");
            for item in items {
                encode_value(&nested, item, out)?;
            }
        }
        Value::Object(map) => {
            for (sub, item) in map {
                encode_value(&format!("{key}[{sub}]"), item, out)?;
            }
        }
        Value::String(text) => out.push(format!("{}={}", escape(key), escape(text))),
        Value::Number(number) => {
            out.push(format!("{}={}", escape(key), escape(&number.to_string())));
        }
        Value::Bool(flag) => out.push(format!("{}={}", escape(key), escape(&flag.to_string()))),
        Value::Null => {
            return Err(Error::unsupported_value(
                key,
                "null has no query-string representation",
            ));
        }
    }
    Ok(())
}
