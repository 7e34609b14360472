use serde_json::Value;

/// JSON-pointer-ish paths of every `null` inside the payload.
///
/// Card wire output never contains `null`: absent optionals are omitted.
pub fn find_nulls(value: &Value) -> Vec<String> {
    let mut found = Vec::new();
    let mut stack = vec![(String::new(), value)];
    while let Some((path, current)) = stack.pop() {
        match current {
            Value::Null => found.push(if path.is_empty() { "/".into() } else { path }),
            Value::Array(items) => {
                for (idx, item) in items.iter().enumerate() {
                    stack.push((format!("{path}/{idx}"), item));
                }
            }
            Value::Object(map) => {
                for (key, item) in map {
                    stack.push((format!("{path}/{key}"), item));
                }
            }
            _ => {}
        }
    }
    found.sort();
    found
}

pub fn assert_no_nulls(value: &Value) {
    let nulls = find_nulls(value);
    assert!(
        nulls.is_empty(),
        "expected payload without nulls, found at {:?}: {}",
        nulls,
        value
    );
}

/// Collects the `type` of every card action in document order.
///
/// An object counts as an action when it has both a string `type` and a `value`.
pub fn collect_action_types(value: &Value) -> Vec<String> {
    let mut types = Vec::new();
    walk_actions(value, &mut types);
    types
}

fn walk_actions(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if let (Some(Value::String(kind)), true) = (map.get("type"), map.contains_key("value"))
            {
                out.push(kind.clone());
            }
            for item in map.values() {
                walk_actions(item, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk_actions(item, out);
            }
        }
        _ => {}
    }
}
