//! Span attribute values.
//!
//! Drafty entities carry a flat `data` object. Inline payloads travel as
//! base64 strings, so [`Attributes::bytes`] decodes string values on access.

use std::borrow::Cow;
use std::collections::HashMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// A scalar or binary attribute value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttrValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Bytes(Vec<u8>),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<u8>> for AttrValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

/// Attributes of a single span.
///
/// # Example
///
/// ```
/// use drafty_render::Attributes;
///
/// let attrs = Attributes::new()
///     .with("mime", "image/png")
///     .with("width", 640)
///     .with("val", "aGVsbG8=");
/// assert_eq!(attrs.str("mime"), Some("image/png"));
/// assert_eq!(attrs.int("width"), Some(640));
/// assert_eq!(attrs.bytes("val").as_deref(), Some(&b"hello"[..]));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes(HashMap<String, AttrValue>);

impl Attributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// String value of `key`.
    #[must_use]
    pub fn str(&self, key: &str) -> Option<&str> {
        match self.0.get(key)? {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer value of `key`.
    #[must_use]
    pub fn int(&self, key: &str) -> Option<i64> {
        match self.0.get(key)? {
            AttrValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Binary value of `key`, decoding base64 string values.
    ///
    /// Returns `None` for strings that are not valid base64.
    #[must_use]
    pub fn bytes(&self, key: &str) -> Option<Cow<'_, [u8]>> {
        match self.0.get(key)? {
            AttrValue::Bytes(b) => Some(Cow::Borrowed(b)),
            AttrValue::Str(s) => STANDARD.decode(s).ok().map(Cow::Owned),
            _ => None,
        }
    }

    /// Convert an entity `data` object.
    ///
    /// Nested arrays, objects and nulls are skipped; a non-object value
    /// yields empty attributes.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        let mut attrs = Self::new();
        for (key, value) in object {
            let converted = match value {
                serde_json::Value::String(s) => AttrValue::Str(s.clone()),
                serde_json::Value::Bool(b) => AttrValue::Bool(*b),
                serde_json::Value::Number(n) => match n.as_i64() {
                    Some(i) => AttrValue::Int(i),
                    None => match n.as_f64() {
                        Some(f) => AttrValue::Float(f),
                        None => continue,
                    },
                },
                serde_json::Value::Null
                | serde_json::Value::Array(_)
                | serde_json::Value::Object(_) => continue,
            };
            attrs.0.insert(key.clone(), converted);
        }
        attrs
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_typed_accessors_reject_other_types() {
        let attrs = Attributes::new().with("size", 10).with("name", "a.txt");
        assert_eq!(attrs.str("size"), None);
        assert_eq!(attrs.int("name"), None);
        assert_eq!(attrs.int("missing"), None);
    }

    #[test]
    fn test_bytes_from_raw_bytes() {
        let attrs = Attributes::new().with("val", vec![1_u8, 2, 3]);
        assert_eq!(attrs.bytes("val").as_deref(), Some(&[1_u8, 2, 3][..]));
    }

    #[test]
    fn test_bytes_invalid_base64() {
        let attrs = Attributes::new().with("val", "not base64!");
        assert!(attrs.bytes("val").is_none());
    }

    #[test]
    fn test_from_json_converts_scalars() {
        let json = serde_json::json!({
            "mime": "image/jpeg",
            "width": 100,
            "ratio": 1.5,
            "incoming": true,
            "nested": {"a": 1},
            "list": [1, 2],
            "nothing": null
        });
        let attrs = Attributes::from_json(&json);

        assert_eq!(attrs.str("mime"), Some("image/jpeg"));
        assert_eq!(attrs.int("width"), Some(100));
        assert_eq!(attrs.get("ratio"), Some(&AttrValue::Float(1.5)));
        assert_eq!(attrs.get("incoming"), Some(&AttrValue::Bool(true)));
        assert!(attrs.get("nested").is_none());
        assert!(attrs.get("list").is_none());
        assert!(attrs.get("nothing").is_none());
    }

    #[test]
    fn test_from_json_non_object() {
        assert!(Attributes::from_json(&serde_json::json!("text")).is_empty());
    }

    #[test]
    fn test_from_iterator() {
        let attrs: Attributes = [("act", "url"), ("ref", "https://example.com")]
            .into_iter()
            .collect();
        assert_eq!(attrs.str("act"), Some("url"));
    }
}
