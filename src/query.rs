//! Bracket-notation query serialization for the content API.
//!
//! The CMS expects nested query structures flattened into bracketed keys:
//! `filters[slug][$eq]=my-post`, `sort[0]=publishedAt:desc`. Arrays flatten
//! by index, objects by key, and `null` leaves are omitted entirely at any
//! depth.

use serde_json::Value;

/// Serialize a nested query structure into a URL query string.
///
/// Returns an empty string for an empty query, otherwise a string starting
/// with `?`. Serialization is deterministic for a given structure.
pub fn build_query_string(query: &Value) -> String {
    let mut pairs: Vec<String> = Vec::new();

    if let Value::Object(map) = query {
        for (key, value) in map {
            push_query_pairs(value, key, &mut pairs);
        }
    }

    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

fn push_query_pairs(value: &Value, key_prefix: &str, pairs: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                push_query_pairs(item, &format!("{}[{}]", key_prefix, index), pairs);
            }
        }
        Value::Object(map) => {
            for (key, nested) in map {
                push_query_pairs(nested, &format!("{}[{}]", key_prefix, key), pairs);
            }
        }
        Value::String(s) => push_pair(key_prefix, s, pairs),
        Value::Bool(b) => push_pair(key_prefix, &b.to_string(), pairs),
        Value::Number(n) => push_pair(key_prefix, &n.to_string(), pairs),
    }
}

fn push_pair(key: &str, value: &str, pairs: &mut Vec<String>) {
    pairs.push(format!(
        "{}={}",
        urlencoding::encode(key),
        urlencoding::encode(value)
    ));
}
