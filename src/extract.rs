//! Record array discovery inside JSON responses
//!
//! Providers rarely agree on where the records live, so discovery is
//! positional: the record array is a top-level key holding an array. Two
//! modes exist and must stay distinct: single-array strategies take the
//! *last* array-valued key in the object's property order, while the cursor
//! strategy tracks every array-valued key independently.

use serde_json::Value;

/// Find the record array of a response: the last top-level key holding an
/// array, in property order. Non-object responses carry no arrays.
pub fn last_array(response: &Value) -> Option<(&str, &Vec<Value>)> {
    let object = response.as_object()?;
    let mut found = None;
    for (key, value) in object {
        if let Value::Array(items) = value {
            found = Some((key.as_str(), items));
        }
    }
    found
}

/// Every top-level key holding an array, in property order
pub fn all_arrays(response: &Value) -> Vec<(&str, &Vec<Value>)> {
    match response.as_object() {
        Some(object) => object
            .iter()
            .filter_map(|(key, value)| match value {
                Value::Array(items) => Some((key.as_str(), items)),
                _ => None,
            })
            .collect(),
        None => Vec::new(),
    }
}

/// Walk a dot-path through nested objects and array indices
pub fn resolve_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    let mut current = value;
    for part in path.split('.') {
        current = match current {
            Value::Object(object) => object.get(part)?,
            Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// JavaScript-style truthiness over JSON values
///
/// Absent, `null`, `false`, `0`, and `""` are falsy; everything else is
/// truthy, including empty arrays and objects.
#[allow(clippy::float_cmp)]
pub fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => false,
    }
}
