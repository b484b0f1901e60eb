//! CSS custom-property emission.

use serde::{Deserialize, Serialize};
use tv_tree::{FlatTokenMap, Scalar};

use crate::normalize::normalize;
use crate::reference::rewrite_references;

/// Output settings for [`emit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    /// Selector of the single block all declarations go into.
    pub selector: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            selector: ":root".to_string(),
        }
    }
}

/// Right-hand side of a declaration.
///
/// Strings get their references rewritten; other scalars are formatted
/// as-is and never rescanned.
pub fn format_value(value: &Scalar) -> String {
    match value {
        Scalar::String(s) => rewrite_references(s).into_owned(),
        other => other.to_string(),
    }
}

/// Render `map` as one selector block, one declaration per entry, in map order.
pub fn emit(map: &FlatTokenMap, options: &EmitOptions) -> String {
    let mut css = format!("{} {{\n", options.selector);
    for (path, value) in map.iter() {
        css.push_str(&format!("  --{}: {};\n", normalize(path), format_value(value)));
    }
    css.push_str("}\n");

    tracing::debug!(declarations = map.len(), selector = %options.selector, "emitted css");
    css
}
