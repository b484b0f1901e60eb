//! Identifier normalization.
//!
//! `fontSize` → `font-size`, `color.primary` → `color-primary`.
//!
//! Applied to declaration names and to reference paths alike, so a dotted
//! or camelCase reference lands on the same identifier as its target.

/// Canonical dash-lowercase identifier for a flattened path or reference.
///
/// 1. a dash goes between an ASCII lowercase letter and a following ASCII
///    uppercase letter
/// 2. every `.` becomes `-`
/// 3. the whole result is lowercased
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    let mut prev: Option<char> = None;

    for c in raw.chars() {
        if c.is_ascii_uppercase() && prev.is_some_and(|p| p.is_ascii_lowercase()) {
            out.push('-');
        }
        out.push(if c == '.' { '-' } else { c });
        prev = Some(c);
    }

    out.to_lowercase()
}
