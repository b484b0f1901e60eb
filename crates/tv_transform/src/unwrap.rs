//! Effective-root selection.
//!
//! Tokens Studio exports wrap the base set under a top-level `global` key.
//! When that key holds a value it becomes the root and every sibling
//! top-level set is discarded. Sibling sets are not merged; use the
//! sanitizer's set merging for that.

use serde_json::Value;

/// Name of the top-level set that becomes the root when present.
pub const GLOBAL_SET: &str = "global";

/// Return the `global` subtree if the root has one, else the document itself.
///
/// A `global` holding an empty value (`null`, `false`, `0`, `""`) counts as
/// absent. Never fails: a document that is not a mapping is returned unchanged.
pub fn unwrap_global(document: Value) -> Value {
    let Value::Object(mut sets) = document else {
        return document;
    };

    if !sets.get(GLOBAL_SET).is_some_and(|global| !is_empty_value(global)) {
        return Value::Object(sets);
    }

    let global = sets.remove(GLOBAL_SET).unwrap_or(Value::Null);
    if !sets.is_empty() {
        let dropped: Vec<&str> = sets.keys().map(String::as_str).collect();
        tracing::warn!(?dropped, "`{GLOBAL_SET}` set found; discarding sibling top-level sets");
    }
    global
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn global_becomes_root_and_siblings_are_dropped() {
        let document = json!({
            "global": { "color": { "red": { "$value": "#f00" } } },
            "dark": { "color": { "bg": { "$value": "#000" } } }
        });
        assert_eq!(
            unwrap_global(document),
            json!({ "color": { "red": { "$value": "#f00" } } })
        );
    }

    #[test]
    fn document_without_global_is_unchanged() {
        let document = json!({ "color": {}, "space": {} });
        assert_eq!(unwrap_global(document.clone()), document);
    }

    #[test]
    fn empty_global_counts_as_absent() {
        for global in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            let document = json!({ "global": global, "color": { "a": 1 } });
            assert_eq!(unwrap_global(document.clone()), document);
        }
    }

    #[test]
    fn non_mapping_document_passes_through() {
        let document = json!("just a string");
        assert_eq!(unwrap_global(document.clone()), document);
    }

    #[test]
    fn non_mapping_global_is_returned_as_is() {
        assert_eq!(unwrap_global(json!({ "global": 3, "a": {} })), json!(3));
        assert_eq!(unwrap_global(json!({ "global": true })), json!(true));
    }
}
