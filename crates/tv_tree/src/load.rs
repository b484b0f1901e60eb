//! Reading token documents from disk.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Failure to obtain a token document. Either kind aborts the run.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read token file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse token file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse a JSON token document. `path` is used for diagnostics only.
pub fn parse_document(source: &str, path: &Path) -> Result<Value, LoadError> {
    serde_json::from_str(source).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse a JSON token document.
pub fn load_document(path: &Path) -> Result<Value, LoadError> {
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "read token file");
    parse_document(&source, path)
}
