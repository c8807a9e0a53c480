//! Structural comparison of bundled and locally edited JSON values.
//!
//! An absent value (`None`) is distinct from JSON `null` throughout, and is
//! rendered as `undefined`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A leaf-level difference between a bundled and a local value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difference {
    /// Dotted path from the compared root, array indices included
    /// (`tweets.0.text`)
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundled: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<Value>,
}

/// Display form of a value: `undefined`, `null`, a quoted string, or
/// pretty-printed JSON with a two-space indent
pub fn format_value(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::String(s)) => format!("\"{}\"", s),
        Some(other) => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Deep equality.
///
/// Numbers compare by value (`1` equals `1.0`), objects by key count and
/// per-key recursion, arrays element-wise. An array never equals an object.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => values_equal(a, b),
        _ => false,
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, value)| compare_values(Some(value), y.get(key)))
        }
        _ => false,
    }
}

fn is_container(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Object(_) | Value::Array(_)))
}

fn keys(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Object(map)) => map.keys().cloned().collect(),
        Some(Value::Array(items)) => (0..items.len()).map(|i| i.to_string()).collect(),
        _ => Vec::new(),
    }
}

fn child<'a>(value: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    match value? {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Walk both values and report every leaf that differs.
///
/// Keys are visited in bundled order, then keys only the local side has.
/// The walk descends only when both sides are objects or arrays; any other
/// mismatch is reported at the current path.
pub fn find_differences(bundled: Option<&Value>, local: Option<&Value>, path: &str) -> Vec<Difference> {
    let mut all_keys = keys(bundled);
    for key in keys(local) {
        if !all_keys.contains(&key) {
            all_keys.push(key);
        }
    }

    let mut differences = Vec::new();
    for key in all_keys {
        let current_path = if path.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", path, key)
        };
        let bundled_value = child(bundled, &key);
        let local_value = child(local, &key);

        if compare_values(bundled_value, local_value) {
            continue;
        }

        if is_container(bundled_value) && is_container(local_value) {
            differences.extend(find_differences(bundled_value, local_value, &current_path));
        } else {
            differences.push(Difference {
                path: current_path,
                bundled: bundled_value.cloned(),
                local: local_value.cloned(),
            });
        }
    }

    differences
}
