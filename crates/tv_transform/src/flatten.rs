//! Recursive descent from a token tree to a [`FlatTokenMap`].
//!
//! Each key along the way contributes one dash-joined path segment:
//! - token with a scalar value → one entry
//! - token with a composite value → the composite's fields, flattened
//!   under the token's path
//! - group → its children, flattened under the group's path
//! - bare leaf (including arrays) → one entry holding the leaf as-is

use tv_tree::{FlatTokenMap, Scalar, TokenGroup, TokenNode, TokenValue};

/// Flatten `root` into an ordered `path -> value` map.
///
/// The root is always walked as a group of its own fields; see
/// [`TokenGroup::root`].
pub fn flatten(root: &TokenGroup) -> FlatTokenMap {
    let mut out = FlatTokenMap::new();
    flatten_into(root, "", &mut out);
    tracing::debug!(entries = out.len(), "flattened token tree");
    out
}

/// `prefix-key`, or just `key` at the top level.
pub fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}-{key}")
    }
}

fn flatten_into(group: &TokenGroup, prefix: &str, out: &mut FlatTokenMap) {
    for (key, child) in group.iter() {
        let path = join_path(prefix, key);
        match child {
            TokenNode::Token(token) => match &token.value {
                TokenValue::Composite(fields) => flatten_into(fields, &path, out),
                TokenValue::Scalar(value) => store(out, path, value),
            },
            TokenNode::Group(nested) => flatten_into(nested, &path, out),
            TokenNode::Leaf(value) => store(out, path, value),
        }
    }
}

fn store(out: &mut FlatTokenMap, path: String, value: &Scalar) {
    if out.contains(&path) {
        tracing::trace!(%path, "later entry overwrites an earlier one");
    }
    out.insert(path, value.clone());
}
