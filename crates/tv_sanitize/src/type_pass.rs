//! Type tag cleanup: rename legacy tags and strip the deprecated tag field.

use std::collections::BTreeMap;

use serde_json::Value;
use tv_tree::TYPE_KEYS;

use crate::util::{rewrite_entries, EntryAction};

/// Rewrite every type tag found in `renames` to its current name.
pub fn rename_types(tree: &Value, renames: &BTreeMap<String, String>) -> Value {
    let mut renamed = 0usize;
    let result = rewrite_entries(tree, &mut |_, key, child| {
        if !TYPE_KEYS.contains(&key) {
            return EntryAction::Keep;
        }
        match child.as_str().and_then(|tag| renames.get(tag)) {
            Some(current) => {
                renamed += 1;
                EntryAction::Replace(Value::String(current.clone()))
            }
            None => EntryAction::Keep,
        }
    });
    tracing::debug!(renamed, "renamed legacy type tags");
    result
}

/// Remove `field` from every object that also carries a `$type` tag.
///
/// Only string values are removed, so a group that happens to share the
/// field's name survives.
pub fn strip_field(tree: &Value, field: &str) -> Value {
    let mut stripped = 0usize;
    let result = rewrite_entries(tree, &mut |owner, key, child| {
        let tagged = owner.get(TYPE_KEYS[0]).is_some_and(Value::is_string);
        if key == field && key != TYPE_KEYS[0] && tagged && child.is_string() {
            stripped += 1;
            EntryAction::Drop
        } else {
            EntryAction::Keep
        }
    });
    tracing::debug!(field, stripped, "stripped deprecated type fields");
    result
}
