//! The flatten-and-resolve transform from a token tree to CSS custom properties.
//!
//! Stages:
//! - `unwrap`    → pick the `global` set as the effective root, if present
//! - `flatten`   → nested tree to an ordered `path -> value` map
//! - `normalize` → camelCase / dotted paths to one dash-lowercase identifier
//! - `reference` → `{color.primary}` → `var(--color-primary)`
//! - `emit`      → one `--name: value;` declaration per entry inside a selector block

pub mod unwrap;
pub mod flatten;
pub mod normalize;
pub mod reference;
pub mod emit;
pub mod transform;

pub use emit::{emit, format_value, EmitOptions};
pub use flatten::flatten;
pub use normalize::normalize;
pub use reference::rewrite_references;
pub use transform::{flatten_document, transform};
pub use unwrap::unwrap_global;
