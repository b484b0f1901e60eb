//! Reference rewriting: `{color.primary}` → `var(--color-primary)`.
//!
//! Purely lexical. The referenced path is never looked up, so a dangling or
//! cyclic reference still produces a well-formed `var()` expression.

use std::borrow::Cow;

use crate::normalize::normalize;

/// One `{inner}` occurrence inside a string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'a> {
    /// Byte offset of the opening `{`.
    pub start: usize,
    /// Byte offset just past the closing `}`.
    pub end: usize,
    /// Text between the braces, as written.
    pub inner: &'a str,
}

impl Reference<'_> {
    /// Output identifier this reference points at.
    pub fn target(&self) -> String {
        normalize(self.inner)
    }
}

/// Find every reference in `value`, left to right, without overlap.
///
/// The inner text is at least one character long, never spans a line break,
/// and ends at the first `}` after that first character. References do not
/// nest: in `{{a}}` the match is `{{a}` with inner text `{a`.
pub fn find_references(value: &str) -> Vec<Reference<'_>> {
    let bytes = value.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'{' {
            if let Some(close) = find_close(value, i + 1) {
                found.push(Reference {
                    start: i,
                    end: close + 1,
                    inner: &value[i + 1..close],
                });
                i = close + 1;
                continue;
            }
        }
        i += 1;
    }

    found
}

/// Byte offset of the `}` closing a reference whose inner text starts at `from`.
fn find_close(value: &str, from: usize) -> Option<usize> {
    let mut chars = value[from..].char_indices();

    // The first inner character is taken unconditionally, even a `}`.
    let (_, first) = chars.next()?;
    if is_line_break(first) {
        return None;
    }

    for (offset, c) in chars {
        if c == '}' {
            return Some(from + offset);
        }
        if is_line_break(c) {
            return None;
        }
    }
    None
}

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// The `var()` expression a reference to `inner` turns into.
pub fn var_reference(inner: &str) -> String {
    format!("var(--{})", normalize(inner))
}

/// Replace every reference in `value` with its `var()` expression.
///
/// Borrows `value` back unchanged when it holds no references.
pub fn rewrite_references(value: &str) -> Cow<'_, str> {
    let references = find_references(value);
    if references.is_empty() {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + references.len() * 8);
    let mut cursor = 0;
    for reference in &references {
        out.push_str(&value[cursor..reference.start]);
        out.push_str(&var_reference(reference.inner));
        cursor = reference.end;
    }
    out.push_str(&value[cursor..]);

    Cow::Owned(out)
}
