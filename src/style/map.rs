//! Resolved style properties.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// CSS property names produced by the resolver.
pub mod props {
    pub const COLOR: &str = "color";
    pub const BACKGROUND_COLOR: &str = "background-color";
    pub const FONT_WEIGHT: &str = "font-weight";
    pub const FONT_STYLE: &str = "font-style";
    pub const TEXT_DECORATION: &str = "text-decoration";
    pub const FONT_SIZE: &str = "font-size";
    pub const TEXT_ALIGN: &str = "text-align";
    pub const PADDING: &str = "padding";
    pub const BORDER: &str = "border";
}

/// An ordered map of CSS-like style properties.
///
/// Serializes as a plain JSON object, so a column's base style can be stored
/// next to its format string.
///
/// # Example
///
/// ```rust
/// use gridformat::StyleMap;
///
/// let base = StyleMap::new().with("color", "#333333").with("font-size", "12px");
/// let conditional = StyleMap::new().with("color", "#DC2626");
///
/// let merged = base.merged(&conditional);
/// assert_eq!(merged.get("color"), Some("#DC2626"));
/// assert_eq!(merged.get("font-size"), Some("12px"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleMap(BTreeMap<String, String>);

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, returning the updated map for chaining.
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(property, value);
        self
    }

    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.0.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        self.0.remove(property)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.0.contains_key(property)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copies every property of `overrides` into `self`, replacing same-named ones.
    pub fn extend_from(&mut self, overrides: &StyleMap) {
        for (k, v) in &overrides.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// Returns `self` layered under `overrides`.
    pub fn merged(&self, overrides: &StyleMap) -> StyleMap {
        let mut out = self.clone();
        out.extend_from(overrides);
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for StyleMap {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overrides_same_named() {
        let base = StyleMap::from([("color", "black"), ("border", "1px solid")]);
        let cond = StyleMap::from([("color", "red")]);

        let merged = base.merged(&cond);
        assert_eq!(merged.get("color"), Some("red"));
        assert_eq!(merged.get("border"), Some("1px solid"));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_empty() {
        let map = StyleMap::new();
        assert!(map.is_empty());
        assert!(!map.contains("color"));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let map = StyleMap::new().with("color", "#FF0000");
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r##"{"color":"#FF0000"}"##);

        let back: StyleMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_remove() {
        let mut map = StyleMap::new().with("padding", "4px");
        assert_eq!(map.remove("padding"), Some("4px".to_string()));
        assert!(map.is_empty());
    }
}
