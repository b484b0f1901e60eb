//! Design-token tree model for tokenvars.
//!
//! A token document is a JSON mapping whose nodes take one of three shapes:
//! - a design token, carrying a reserved value field
//! - a group, a plain namespace level without a value field
//! - a leaf, any non-mapping value (string, number, boolean, null, array)
//!
//! The value field is `$value` in current exports and `value` in legacy
//! ones. Which one marks a token is decided once per document (see
//! [`TokenFormat`]), so a group with a child named `value` stays a group in
//! a `$value` document.
//!
//! The shape is decided once, when the JSON is converted into [`TokenNode`].
//! Everything downstream dispatches on the enum.

pub mod flat;
pub mod load;

pub use flat::FlatTokenMap;
pub use load::{load_document, parse_document, LoadError};

use serde_json::{Map, Number, Value};

/// Type tag keys, in order of preference.
pub const TYPE_KEYS: [&str; 2] = ["$type", "type"];
const DESCRIPTION_KEYS: [&str; 2] = ["$description", "description"];

/// Which key marks a mapping as a design token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenFormat {
    /// `$value`, as in current Tokens Studio / DTCG exports.
    Prefixed,
    /// Bare `value`, as in older exports.
    Legacy,
}

impl TokenFormat {
    /// `Prefixed` if a `$value` key appears anywhere outside an array,
    /// `Legacy` otherwise.
    pub fn detect(document: &Value) -> Self {
        if has_key(document, "$value") {
            TokenFormat::Prefixed
        } else {
            TokenFormat::Legacy
        }
    }

    pub fn value_key(self) -> &'static str {
        match self {
            TokenFormat::Prefixed => "$value",
            TokenFormat::Legacy => "value",
        }
    }
}

fn has_key(value: &Value, key: &str) -> bool {
    match value {
        Value::Object(map) => map.contains_key(key) || map.values().any(|v| has_key(v, key)),
        _ => false,
    }
}

/// One node of a token tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenNode {
    Token(DesignToken),
    Group(TokenGroup),
    Leaf(Scalar),
}

impl TokenNode {
    pub fn as_group(&self) -> Option<&TokenGroup> {
        match self {
            TokenNode::Group(group) => Some(group),
            _ => None,
        }
    }

    /// Number of design tokens in this subtree. A composite token counts once.
    pub fn token_count(&self) -> usize {
        match self {
            TokenNode::Token(_) => 1,
            TokenNode::Group(group) => group.token_count(),
            TokenNode::Leaf(_) => 0,
        }
    }

    pub fn convert(value: Value, format: TokenFormat) -> Self {
        match value {
            Value::Object(map) => TokenNode::from_object(map, format),
            other => TokenNode::Leaf(Scalar::from_non_object(other)),
        }
    }

    fn from_object(mut map: Map<String, Value>, format: TokenFormat) -> Self {
        let Some(raw) = map.remove(format.value_key()) else {
            return TokenNode::Group(TokenGroup::convert(map, format));
        };

        let value = match raw {
            Value::Object(composite) => {
                TokenValue::Composite(TokenGroup::convert(composite, format))
            }
            other => TokenValue::Scalar(Scalar::from_non_object(other)),
        };

        TokenNode::Token(DesignToken {
            value,
            token_type: take_string(&map, &TYPE_KEYS),
            description: take_string(&map, &DESCRIPTION_KEYS),
        })
    }
}

/// Converts with the format detected on `value` itself.
impl From<Value> for TokenNode {
    fn from(value: Value) -> Self {
        let format = TokenFormat::detect(&value);
        TokenNode::convert(value, format)
    }
}

fn take_string(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match map.get(*key) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    })
}

/// A node carrying a value field.
///
/// The type tag and description are kept for inspection only; flattening
/// looks at `value` alone.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignToken {
    pub value: TokenValue,
    pub token_type: Option<String>,
    pub description: Option<String>,
}

/// The payload of a design token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// A structured bundle of sub-fields (typography, shadow, border, ...).
    Composite(TokenGroup),
    Scalar(Scalar),
}

/// A namespace level: ordered `(key, node)` pairs in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenGroup {
    entries: Vec<(String, TokenNode)>,
}

impl TokenGroup {
    /// The root group of a document: its own `(key, child)` pairs, even when
    /// the root mapping itself carries a value field. A non-mapping document
    /// is an empty group.
    pub fn root(document: Value) -> Self {
        let format = TokenFormat::detect(&document);
        match document {
            Value::Object(map) => TokenGroup::convert(map, format),
            other => {
                tracing::debug!(kind = json_kind(&other), "token document is not a mapping");
                TokenGroup::default()
            }
        }
    }

    pub fn convert(map: Map<String, Value>, format: TokenFormat) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(key, value)| (key, TokenNode::convert(value, format)))
                .collect(),
        }
    }

    pub fn token_count(&self) -> usize {
        self.iter().map(|(_, node)| node.token_count()).sum()
    }

    pub fn get(&self, key: &str) -> Option<&TokenNode> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, node)| node)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenNode)> {
        self.entries.iter().map(|(k, node)| (k.as_str(), node))
    }

    pub fn into_entries(self) -> Vec<(String, TokenNode)> {
        self.entries
    }
}

impl FromIterator<(String, TokenNode)> for TokenGroup {
    fn from_iter<I: IntoIterator<Item = (String, TokenNode)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A terminal value.
///
/// Arrays are kept whole as [`Scalar::Sequence`] and are never walked.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Number(Number),
    Bool(bool),
    Null,
    Sequence(Vec<Value>),
}

impl Scalar {
    // Mappings never reach a leaf position through `TokenNode::from`; a stray
    // one is kept opaque as a one-element sequence rather than dropped.
    fn from_non_object(value: Value) -> Self {
        match value {
            Value::String(s) => Scalar::String(s),
            Value::Number(n) => Scalar::Number(n),
            Value::Bool(b) => Scalar::Bool(b),
            Value::Null => Scalar::Null,
            Value::Array(items) => Scalar::Sequence(items),
            Value::Object(map) => Scalar::Sequence(vec![Value::Object(map)]),
        }
    }
}

/// Formats a scalar the way it appears on the right-hand side of a CSS
/// declaration. Strings are written verbatim; reference rewriting happens
/// in the emitter, not here.
impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::String(s) => f.write_str(s),
            Scalar::Number(n) => write_number(f, n),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Null => f.write_str("null"),
            Scalar::Sequence(items) => write_sequence(f, items),
        }
    }
}

// Floats follow the number-to-string rules of the design tools' JS runtime:
// no `.0` on integral values, `-0` as `0`, and exponent notation (`1e+21`,
// `1e-7`) outside [1e-6, 1e21).
fn write_number(f: &mut std::fmt::Formatter<'_>, n: &Number) -> std::fmt::Result {
    let x = match n.as_f64() {
        Some(x) if n.is_f64() && x.is_finite() => x,
        _ => return write!(f, "{n}"),
    };
    if x == 0.0 {
        return f.write_str("0");
    }
    if x.abs() >= 1e21 || x.abs() < 1e-6 {
        let exponent_form = format!("{x:e}");
        return match exponent_form.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => write!(f, "{mantissa}e+{exp}"),
            _ => f.write_str(&exponent_form),
        };
    }
    write!(f, "{x}")
}

fn write_sequence(f: &mut std::fmt::Formatter<'_>, items: &[Value]) -> std::fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        match item {
            Value::Null => {}
            Value::String(s) => f.write_str(s)?,
            Value::Number(n) => write_number(f, n)?,
            Value::Bool(b) => write!(f, "{b}")?,
            Value::Array(nested) => write_sequence(f, nested)?,
            Value::Object(_) => write!(f, "{item}")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dollar_value_marks_a_token() {
        let node = TokenNode::from(json!({ "$value": "#fff", "$type": "color" }));
        let TokenNode::Token(token) = node else {
            panic!("expected a token");
        };
        assert_eq!(token.value, TokenValue::Scalar(Scalar::String("#fff".into())));
        assert_eq!(token.token_type.as_deref(), Some("color"));
    }

    #[test]
    fn legacy_value_key_marks_a_token() {
        let node = TokenNode::from(json!({ "value": 4, "type": "spacing" }));
        assert!(matches!(node, TokenNode::Token(_)));
    }

    #[test]
    fn child_named_value_is_a_group_in_prefixed_documents() {
        let node = TokenNode::from(json!({ "opacity": { "value": { "$value": 0.5 } } }));
        let opacity = node.as_group().unwrap().get("opacity").unwrap();
        let inner = opacity.as_group().expect("`value` child keeps `opacity` a group");
        assert!(matches!(inner.get("value"), Some(TokenNode::Token(_))));
    }

    #[test]
    fn format_detection() {
        assert_eq!(TokenFormat::detect(&json!({ "a": { "value": 1 } })), TokenFormat::Legacy);
        assert_eq!(
            TokenFormat::detect(&json!({ "a": { "b": { "$value": 1 } }, "c": { "value": 2 } })),
            TokenFormat::Prefixed
        );
        assert_eq!(
            TokenFormat::detect(&json!({ "a": [{ "$value": 1 }] })),
            TokenFormat::Legacy
        );
    }

    #[test]
    fn root_keeps_its_own_fields() {
        let root = TokenGroup::root(json!({ "$value": "#fff", "$type": "color" }));
        let keys: Vec<_> = root.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["$value", "$type"]);
        assert_eq!(root.get("$value"), Some(&TokenNode::Leaf(Scalar::String("#fff".into()))));
    }

    #[test]
    fn non_mapping_root_is_empty() {
        assert!(TokenGroup::root(json!("tokens")).is_empty());
        assert!(TokenGroup::root(json!([1, 2])).is_empty());
    }

    #[test]
    fn dollar_value_wins_over_legacy_value() {
        let node = TokenNode::from(json!({ "$value": "a", "value": "b" }));
        let TokenNode::Token(token) = node else {
            panic!("expected a token");
        };
        assert_eq!(token.value, TokenValue::Scalar(Scalar::String("a".into())));
    }

    #[test]
    fn null_value_is_still_a_token() {
        let node = TokenNode::from(json!({ "$value": null }));
        let TokenNode::Token(token) = node else {
            panic!("expected a token");
        };
        assert_eq!(token.value, TokenValue::Scalar(Scalar::Null));
    }

    #[test]
    fn object_value_is_composite() {
        let node = TokenNode::from(json!({
            "$value": { "fontFamily": "Inter", "fontSize": 16 },
            "$type": "typography"
        }));
        let TokenNode::Token(DesignToken {
            value: TokenValue::Composite(group),
            ..
        }) = node
        else {
            panic!("expected a composite token");
        };
        let keys: Vec<_> = group.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["fontFamily", "fontSize"]);
    }

    #[test]
    fn group_keeps_document_order() {
        let node = TokenNode::from(json!({ "z": 1, "a": 2, "m": 3 }));
        let group = node.as_group().unwrap();
        let keys: Vec<_> = group.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn arrays_are_opaque_leaves() {
        let node = TokenNode::from(json!([{ "$value": 1 }, 2]));
        assert!(matches!(node, TokenNode::Leaf(Scalar::Sequence(ref items)) if items.len() == 2));
    }

    #[test]
    fn token_count_counts_composites_once() {
        let node = TokenNode::from(json!({
            "color": { "red": { "$value": "#f00" }, "raw": "#0f0" },
            "type": { "body": { "$value": { "fontSize": 16, "lineHeight": 1.5 } } }
        }));
        assert_eq!(node.token_count(), 2);
    }

    #[test]
    fn extreme_floats_use_exponent_notation() {
        let show = |x: f64| Scalar::Number(Number::from_f64(x).unwrap()).to_string();
        assert_eq!(show(1e21), "1e+21");
        assert_eq!(show(2.5e22), "2.5e+22");
        assert_eq!(show(1e-7), "1e-7");
        assert_eq!(show(-1.5e-7), "-1.5e-7");
        assert_eq!(show(1e20), "100000000000000000000");
        assert_eq!(show(0.000001), "0.000001");
    }

    #[test]
    fn scalar_display() {
        assert_eq!(Scalar::Number(Number::from(16)).to_string(), "16");
        assert_eq!(
            Scalar::Number(Number::from_f64(1.0).unwrap()).to_string(),
            "1"
        );
        assert_eq!(
            Scalar::Number(Number::from_f64(1.5).unwrap()).to_string(),
            "1.5"
        );
        assert_eq!(
            Scalar::Number(Number::from_f64(-0.0).unwrap()).to_string(),
            "0"
        );
        assert_eq!(Scalar::Bool(true).to_string(), "true");
        assert_eq!(Scalar::Null.to_string(), "null");
        assert_eq!(
            Scalar::Sequence(vec![json!("Inter"), json!("sans-serif")]).to_string(),
            "Inter,sans-serif"
        );
        assert_eq!(
            Scalar::Sequence(vec![json!(1), json!(null), json!([2, 3])]).to_string(),
            "1,,2,3"
        );
    }
}
