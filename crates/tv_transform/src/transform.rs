//! Top-level transform entry point.
//!
//! Runs unwrap → flatten → emit over one parsed token document.

use serde_json::Value;
use tv_tree::{FlatTokenMap, TokenGroup};

use crate::emit::{emit, EmitOptions};
use crate::flatten::flatten;
use crate::unwrap::unwrap_global;

/// Unwrap and flatten a token document.
pub fn flatten_document(document: Value) -> FlatTokenMap {
    let root = TokenGroup::root(unwrap_global(document));
    flatten(&root)
}

/// Turn a token document into CSS custom-property text.
pub fn transform(document: Value, options: &EmitOptions) -> String {
    let flat = flatten_document(document);
    emit(&flat, options)
}
