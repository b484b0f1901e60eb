//! Token source resolution: glob expansion and in-order deep merging.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tv_sanitize::deep_merge;
use tv_tree::load_document;

/// Expand glob patterns (`tokens/**/*.json`) into sorted file lists.
///
/// Plain paths pass through untouched, even when they do not exist, so a
/// missing file surfaces as a read error when it is loaded.
pub fn expand_sources(sources: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for source in sources {
        let pattern = source.to_string_lossy();
        if !pattern.contains(['*', '?', '[']) {
            files.push(source.clone());
            continue;
        }

        let mut matched: Vec<PathBuf> = glob::glob(&pattern)
            .with_context(|| format!("invalid source pattern {pattern}"))?
            .collect::<Result<_, _>>()
            .with_context(|| format!("failed to expand {pattern}"))?;
        if matched.is_empty() {
            bail!("source pattern {pattern} matched no files");
        }
        matched.sort();
        tracing::debug!(%pattern, files = matched.len(), "expanded source pattern");
        files.extend(matched);
    }
    Ok(files)
}

/// Load every source and deep-merge them in order into one document.
///
/// A single source may be any JSON value; with several, each must be an
/// object.
pub fn load_sources(sources: &[PathBuf]) -> Result<Value> {
    let files = expand_sources(sources)?;
    let [first, rest @ ..] = files.as_slice() else {
        bail!("no token sources given");
    };

    let mut document = load_document(first)?;
    for path in rest {
        let next = load_document(path)?;
        match (&mut document, next) {
            (Value::Object(merged), Value::Object(incoming)) => deep_merge(merged, &incoming),
            _ => bail!(
                "cannot merge {}: every source must be a JSON object",
                path.display()
            ),
        }
    }
    tracing::debug!(sources = files.len(), "loaded token sources");
    Ok(document)
}
