use serde_json::Value;
use std::collections::HashMap;

/// Lowercases `key` and drops everything that is not `[a-z0-9]`.
///
/// `ProjectTitle`, `project_title` and `Project-Title` all normalize to `projecttitle`.
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Looks up a logical field in a record whose key casing is not known up front.
///
/// Every alias is first tried verbatim, in order. Only when none of them is present
/// are the record keys and the aliases compared in normalized form (see
/// [`normalize_key`]); the first alias with a normalized match wins.
///
/// Anything that is not a JSON object misses every lookup.
pub fn get_value<'a>(record: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    let map = record.as_object()?;

    if let Some(v) = aliases.iter().find_map(|alias| map.get(*alias)) {
        return Some(v);
    }

    // Keys iterate in record order; the last one wins when two collapse to the same form.
    let mut normalized: HashMap<String, &str> = HashMap::with_capacity(map.len());
    for key in map.keys() {
        normalized.insert(normalize_key(key), key.as_str());
    }

    aliases.iter().find_map(|alias| {
        normalized
            .get(&normalize_key(alias))
            .and_then(|key| map.get(*key))
    })
}

/// Like [`get_value`], but returns an owned value and falls back to `default`.
pub fn get_value_or(record: &Value, aliases: &[&str], default: Value) -> Value {
    get_value(record, aliases).cloned().unwrap_or(default)
}

/// Walks nested objects by exact key. Any missing key or non-object step yields `None`.
pub fn safe_get<'a>(record: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(record, |cur, key| cur.as_object().and_then(|m| m.get(*key)))
}

/// Truthiness for JSON values: null, false, 0, "" and empty containers are falsy.
pub(crate) fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
