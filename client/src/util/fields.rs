//! Declarative field resolution over loosely shaped JSON records.
//!
//! DESIGN
//! ======
//! The backend returns the same logical field under several key names
//! depending on the endpoint and its age. Callers describe each target field
//! as an ordered list of dotted paths (`"user.email"`) and the resolver takes
//! the first one that holds a usable value, so the fallback order stays a
//! reviewable table instead of nested conditionals.

#[cfg(test)]
#[path = "fields_test.rs"]
mod fields_test;

use serde_json::Value;

/// Ordered candidate paths for one target field.
pub type FieldRules = &'static [&'static str];

/// Look up a dotted path (`"requestedBy.phone"`) inside `record`.
pub fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(record, |node, key| node.get(key))
}

/// Whether a value counts as present: not null, not `false`, not an empty
/// string, not zero.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// First candidate holding a truthy value.
pub fn resolve<'a>(record: &'a Value, rules: &[&str]) -> Option<&'a Value> {
    rules.iter().filter_map(|path| lookup(record, path)).find(|v| is_truthy(v))
}

/// First candidate that is present and not null (zero and empty strings count).
pub fn resolve_defined<'a>(record: &'a Value, rules: &[&str]) -> Option<&'a Value> {
    rules.iter().filter_map(|path| lookup(record, path)).find(|v| !v.is_null())
}

/// Render a scalar value as display text.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// First truthy candidate rendered as text.
pub fn resolve_text(record: &Value, rules: &[&str]) -> Option<String> {
    resolve(record, rules).and_then(value_text)
}

/// Coerce a JSON value to a number the way a form input would: numbers pass
/// through, numeric strings parse, blank strings are zero.
pub fn value_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() { Some(0.0) } else { s.parse::<f64>().ok() }
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// First defined candidate coerced to a finite number, else zero.
pub fn resolve_count(record: &Value, rules: &[&str]) -> f64 {
    resolve_defined(record, rules)
        .and_then(value_number)
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Extract a list from either a bare array or an envelope keyed by one of `keys`.
pub fn unwrap_list(value: Value, keys: &[&str]) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => keys
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Extract an object from an envelope key when present, else the value itself.
pub fn unwrap_object(value: Value, key: &str) -> Value {
    match value {
        Value::Object(mut map) if map.get(key).is_some_and(Value::is_object) => map.remove(key).unwrap_or(Value::Null),
        other => other,
    }
}
