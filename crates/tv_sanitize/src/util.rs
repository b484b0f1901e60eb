//! Shared tree walker for the rewriting passes.

use serde_json::{Map, Value};

/// What a pass wants done with one `(key, value)` entry of an object.
pub(super) enum EntryAction {
    /// Keep the key and keep walking into the value.
    Keep,
    /// Keep the key, use this value as-is (not walked).
    Replace(Value),
    /// Leave the entry out of the rebuilt object.
    Drop,
}

/// Rebuild `value`, asking `decide` about every object entry on the way down.
///
/// `decide` receives the object that owns the entry, so passes can look at
/// siblings. Arrays are walked element by element; scalars are cloned.
pub(super) fn rewrite_entries<F>(value: &Value, decide: &mut F) -> Value
where
    F: FnMut(&Map<String, Value>, &str, &Value) -> EntryAction,
{
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, child) in map {
                match decide(map, key, child) {
                    EntryAction::Keep => {
                        out.insert(key.clone(), rewrite_entries(child, decide));
                    }
                    EntryAction::Replace(replacement) => {
                        out.insert(key.clone(), replacement);
                    }
                    EntryAction::Drop => {}
                }
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| rewrite_entries(item, decide))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keep_everything_is_a_deep_copy() {
        let input = json!({ "a": [{ "b": 1 }, 2], "c": { "d": null } });
        let output = rewrite_entries(&input, &mut |_, _, _| EntryAction::Keep);
        assert_eq!(output, input);
    }

    #[test]
    fn drop_applies_at_every_depth() {
        let input = json!({ "x": 1, "a": { "x": 2, "b": [{ "x": 3, "y": 4 }] } });
        let output = rewrite_entries(&input, &mut |_, key, _| {
            if key == "x" {
                EntryAction::Drop
            } else {
                EntryAction::Keep
            }
        });
        assert_eq!(output, json!({ "a": { "b": [{ "y": 4 }] } }));
    }
}
