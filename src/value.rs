//! Helpers over [`serde_json::Value`], the dynamically-typed value every
//! JSON-shaped piece of the interpreter flows through.
//!
//! Server-authored configs are loosely typed: numbers arrive as strings,
//! flags arrive as numbers. The coercion rules here are the single place
//! that looseness is defined.

use serde_json::Value;

/// Truthiness of a value, used when a condition has no explicit operator.
///
/// Null is false, booleans are themselves, numbers are true unless zero,
/// strings are true unless empty or `"false"`, arrays and objects are true
/// unless empty.
pub fn truthiness(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty() && s != "false",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Coerce a value to f64 for numeric comparison.
///
/// Numbers pass through, numeric strings parse, booleans map to 1/0.
/// Everything else has no numeric interpretation.
pub fn as_f64_coerced(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Loose equality between two values.
///
/// Structural equality first, then numeric equality after coercion, then
/// display-string equality. Server configs routinely compare `"5"` against
/// `5` and `"true"` against `true`; both must match.
pub fn loose_eq(left: &Value, right: &Value) -> bool {
    if left == right {
        return true;
    }
    if let (Some(l), Some(r)) = (as_f64_coerced(left), as_f64_coerced(right)) {
        return l == r;
    }
    display_string(left) == display_string(right)
}

/// Walk a dot-separated path through nested objects and arrays.
///
/// Numeric path segments index into arrays. An empty path returns the value
/// itself. Returns `None` as soon as a segment has no target.
pub fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }

    let mut current = value;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => {
                let index = segment.parse::<usize>().ok()?;
                items.get(index)?
            }
            _ => return None,
        };
    }
    Some(current)
}

/// Render a value for embedding inside a longer string.
///
/// Scalars render bare (no quotes); a null renders empty so interpolation
/// never produces the word "null"; arrays and objects render as compact JSON.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
