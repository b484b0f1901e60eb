//! The flat, ordered `path -> value` map produced by flattening.

use indexmap::IndexMap;

use crate::Scalar;

/// Ordered mapping from a dash-joined path to its raw scalar value.
///
/// Iteration follows first-insertion order. Inserting a path that is already
/// present replaces the value but keeps the original position; no collision
/// is reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatTokenMap {
    entries: IndexMap<String, Scalar>,
}

impl FlatTokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `path`. Returns the previous value if there was one.
    pub fn insert(&mut self, path: impl Into<String>, value: Scalar) -> Option<Scalar> {
        self.entries.insert(path.into(), value)
    }

    pub fn get(&self, path: &str) -> Option<&Scalar> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
