//! Build configuration file.
//!
//! ```json
//! {
//!   "sources": ["tokens/tokens.json"],
//!   "build_path": "src/styles",
//!   "destination": "variables.css",
//!   "selector": ":root",
//!   "sanitize": { "merge_sets": false }
//! }
//! ```
//!
//! Every field is optional. Command-line flags override what the file says.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tv_sanitize::SanitizeOptions;
use tv_transform::EmitOptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Token documents, deep-merged in order.
    pub sources: Vec<PathBuf>,
    pub build_path: PathBuf,
    pub destination: String,
    pub selector: String,
    /// Absent means the documents are used as exported.
    pub sanitize: Option<SanitizeOptions>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            sources: vec![PathBuf::from("tokens/tokens.json")],
            build_path: PathBuf::from("src/styles"),
            destination: "variables.css".to_string(),
            selector: EmitOptions::default().selector,
            sanitize: None,
        }
    }
}

impl BuildConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded build config");
        Ok(config)
    }

    pub fn output_path(&self) -> PathBuf {
        self.build_path.join(&self.destination)
    }

    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            selector: self.selector.clone(),
        }
    }

    /// Layer command-line values over the file's settings.
    pub fn apply(&mut self, overrides: BuildOverrides) {
        if !overrides.inputs.is_empty() {
            self.sources = overrides.inputs;
        }
        if let Some(selector) = overrides.selector {
            self.selector = selector;
        }
        apply_sanitize_flags(&mut self.sanitize, overrides.sanitize, overrides.merge_sets);
    }
}

/// Values given on the command line for `tv build`.
#[derive(Debug, Default)]
pub struct BuildOverrides {
    pub inputs: Vec<PathBuf>,
    pub selector: Option<String>,
    pub sanitize: bool,
    pub merge_sets: bool,
}

/// Turn `--sanitize` / `--merge-sets` into sanitizer options.
///
/// Either flag enables sanitizing; configured passes are kept.
pub fn apply_sanitize_flags(
    options: &mut Option<SanitizeOptions>,
    sanitize: bool,
    merge_sets: bool,
) {
    if !sanitize && !merge_sets {
        return;
    }
    let options = options.get_or_insert_with(SanitizeOptions::default);
    if merge_sets {
        options.merge_sets = true;
    }
}
