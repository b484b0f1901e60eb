//! Token set merging.
//!
//! Tokens Studio exports one top-level key per token set (`global`, `light`,
//! `dark`, ...) next to `$`-prefixed metadata (`$themes`, `$metadata`).
//! Merging folds the sets, in document order, into a single tree.

use serde_json::{Map, Value};

/// Deep-merge every non-metadata top-level set of `tree` into one tree.
///
/// A non-object document is returned unchanged. Top-level sets that are not
/// objects are skipped.
pub fn merge_sets(tree: &Value) -> Value {
    let Value::Object(sets) = tree else {
        return tree.clone();
    };

    let mut merged = Map::new();
    for (name, set) in sets {
        if name.starts_with('$') {
            tracing::debug!(set = %name, "skipping metadata entry");
            continue;
        }
        match set {
            Value::Object(tokens) => {
                tracing::debug!(set = %name, entries = tokens.len(), "merging token set");
                deep_merge(&mut merged, tokens);
            }
            _ => tracing::warn!(set = %name, "skipping top-level entry that is not a token set"),
        }
    }
    Value::Object(merged)
}

/// Merge `source` into `target`.
///
/// Objects present on both sides merge recursively. Anything else from
/// `source` replaces what `target` had, keeping the existing key position.
pub fn deep_merge(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, incoming) in source {
        if let (Some(Value::Object(existing)), Value::Object(nested)) =
            (target.get_mut(key), incoming)
        {
            deep_merge(existing, nested);
            continue;
        }
        target.insert(key.clone(), incoming.clone());
    }
}
