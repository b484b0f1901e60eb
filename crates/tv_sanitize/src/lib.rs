//! Cleanup passes for token documents exported by design tools.
//!
//! Runs on the raw JSON before it is turned into a token tree. Every pass
//! reads its input by reference and builds a new document; the caller's
//! tree is never touched.
//!
//! Processing order:
//! 1. Set merging (opt-in): fold every top-level token set into one tree
//! 2. Type tag renaming: legacy tag names to their current names
//! 3. Field stripping: drop a deprecated secondary type field

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

mod merge_pass;
mod type_pass;
mod util;

pub use merge_pass::{deep_merge, merge_sets};

/// Which cleanup passes run, and with what tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizeOptions {
    /// Merge all top-level sets instead of relying on the `global` unwrap.
    pub merge_sets: bool,
    /// Legacy type tag → current type tag.
    pub rename_types: BTreeMap<String, String>,
    /// Deprecated secondary type field removed wherever `$type` is present.
    pub deprecated_field: Option<String>,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        let rename_types = [
            ("fontFamilies", "fontFamily"),
            ("fontWeights", "fontWeight"),
            ("fontSizes", "fontSize"),
            ("lineHeights", "lineHeight"),
        ]
        .into_iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect();

        Self {
            merge_sets: false,
            rename_types,
            deprecated_field: Some("type".to_string()),
        }
    }
}

/// Run the enabled passes over `tree` and return the cleaned copy.
pub fn sanitize(tree: &Value, options: &SanitizeOptions) -> Value {
    let mut result = if options.merge_sets {
        merge_pass::merge_sets(tree)
    } else {
        tree.clone()
    };

    if !options.rename_types.is_empty() {
        result = type_pass::rename_types(&result, &options.rename_types);
    }

    if let Some(field) = &options.deprecated_field {
        result = type_pass::strip_field(&result, field);
    }

    result
}
