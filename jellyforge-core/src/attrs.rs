//! Attribute maps and their canonical `key="value"` encoding.
//!
//! Values are emitted verbatim: quote characters are not escaped. Template
//! authors are trusted, and the downstream markup consumer relies on `${...}`
//! expressions surviving untouched.

use std::fmt;

/// A single stringified attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttrValue(pub String);

impl AttrValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<&String> for AttrValue {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self(b.to_string())
    }
}

macro_rules! attr_value_from_number {
    ($($t:ty),*) => {
        $(impl From<$t> for AttrValue {
            fn from(n: $t) -> Self {
                Self(n.to_string())
            }
        })*
    };
}

attr_value_from_number!(i32, i64, u32, u64, usize, f64);

/// Ordered attribute name → value mapping.
///
/// Keys are unique. Inserting an existing key replaces its value but keeps
/// its original position, so a map built as "defaults, then overrides"
/// lists attributes in default order with explicit values winning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    entries: Vec<(String, AttrValue)>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace in place. Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert only when `value` is present.
    pub fn insert_opt(&mut self, key: impl Into<String>, value: Option<AttrValue>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Apply `overrides` on top of `self`: existing keys are replaced in
    /// place, new keys are appended in the overrides' order.
    pub fn merge(mut self, overrides: AttributeMap) -> Self {
        for (key, value) in overrides.entries {
            self.insert(key, value);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Canonical encoding, see [`encode`].
    pub fn encode(&self) -> String {
        encode(self)
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeMap
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = AttributeMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl IntoIterator for AttributeMap {
    type Item = (String, AttrValue);
    type IntoIter = std::vec::IntoIter<(String, AttrValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Encode as `k1="v1" k2="v2"`, single-space separated, in insertion order.
/// An empty map encodes to the empty string.
pub fn encode(attrs: &AttributeMap) -> String {
    attrs
        .iter()
        .map(|(k, v)| format!(r#"{k}="{v}""#))
        .collect::<Vec<_>>()
        .join(" ")
}
