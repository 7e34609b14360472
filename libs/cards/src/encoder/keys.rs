use serde_json::{Map, Value};

use super::config::KeyEncoding;
use crate::error::EncodingError;

/// Rewrites every object key in `value` and optionally orders keys lexicographically.
///
/// Fails when two keys of one object end up with the same name, e.g. `fooBar` and
/// `foo_bar` under snake case.
pub(crate) fn rewrite(
    value: Value,
    keys: KeyEncoding,
    sorted: bool,
) -> Result<Value, EncodingError> {
    match value {
        Value::Object(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (key, nested) in map {
                entries.push((rename(key, keys), rewrite(nested, keys, sorted)?));
            }
            if sorted {
                entries.sort_by(|a, b| a.0.cmp(&b.0));
            }
            let mut out = Map::with_capacity(entries.len());
            for (key, nested) in entries {
                if out.contains_key(&key) {
                    return Err(EncodingError::KeyCollision(key));
                }
                out.insert(key, nested);
            }
            Ok(Value::Object(out))
        }
        Value::Array(items) => items
            .into_iter()
            .map(|item| rewrite(item, keys, sorted))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        other => Ok(other),
    }
}

fn rename(key: String, keys: KeyEncoding) -> String {
    match keys {
        KeyEncoding::UseDefaultKeys => key,
        KeyEncoding::ConvertToSnakeCase => to_snake_case(&key),
    }
}

/// Converts a camelCase key to snake_case.
///
/// Acronyms stay together (`myURLValue` -> `my_url_value`); leading and trailing
/// underscores are kept as they are.
pub(crate) fn to_snake_case(key: &str) -> String {
    let trimmed = key.trim_matches('_');
    if trimmed.is_empty() {
        return key.to_string();
    }
    let leading = key.len() - key.trim_start_matches('_').len();
    let trailing = key.len() - key.trim_end_matches('_').len();

    let chars: Vec<char> = trimmed.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);
    out.push_str(&key[..leading]);
    for (idx, ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && idx > 0 {
            let prev = chars[idx - 1];
            let next_is_lower = chars.get(idx + 1).is_some_and(|c| c.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && prev != '_' {
                out.push('_');
            }
        }
        out.extend(ch.to_lowercase());
    }
    out.push_str(&key[key.len() - trailing..]);
    out
}
