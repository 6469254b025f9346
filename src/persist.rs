//! The persistable form of a column format.
//!
//! Hosts store a [`FormatSpec`] and recompile it on load; callbacks are never
//! persisted.
//!
//! ```rust
//! use gridformat::{FormatSpec, StyleMap, Value};
//!
//! let spec = FormatSpec::new("[Red]0.00", StyleMap::new().with("padding", "4px"));
//! let json = serde_json::to_string(&spec).unwrap();
//! assert_eq!(json, r#"{"format":"[Red]0.00","baseStyle":{"padding":"4px"}}"#);
//!
//! let restored: FormatSpec = serde_json::from_str(&json).unwrap();
//! assert_eq!(restored.compile().format(&Value::Number(2.0)), "2.00");
//! ```

use serde::{Deserialize, Serialize};

use crate::cache::FormatCache;
use crate::compiled::CompiledFormat;
use crate::style::StyleMap;

/// A format string and its base style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatSpec {
    pub format: String,
    #[serde(default)]
    pub base_style: StyleMap,
}

impl FormatSpec {
    pub fn new(format: impl Into<String>, base_style: StyleMap) -> Self {
        Self {
            format: format.into(),
            base_style,
        }
    }

    pub fn compile(&self) -> CompiledFormat {
        CompiledFormat::with_base_style(&self.format, self.base_style.clone())
    }

    pub fn compile_with(&self, cache: &FormatCache) -> CompiledFormat {
        cache.compile(&self.format, self.base_style.clone())
    }
}

impl From<&CompiledFormat> for FormatSpec {
    fn from(compiled: &CompiledFormat) -> Self {
        compiled.spec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ColorMode;
    use crate::value::Value;

    #[test]
    fn test_missing_base_style_defaults_to_empty() {
        let spec: FormatSpec = serde_json::from_str(r#"{"format":"0.0"}"#).unwrap();
        assert_eq!(spec, FormatSpec::new("0.0", StyleMap::new()));
    }

    #[test]
    fn test_round_trip_preserves_behaviour() {
        let original = CompiledFormat::with_base_style(
            "[>0][Green]0.00;[Red](0.00)",
            StyleMap::new().with("font-size", "12px"),
        );
        let json = serde_json::to_string(&FormatSpec::from(&original)).unwrap();
        let restored = serde_json::from_str::<FormatSpec>(&json).unwrap().compile();

        for n in [5.0, -5.0, 0.0] {
            let v = Value::Number(n);
            assert_eq!(original.format(&v), restored.format(&v));
            assert_eq!(
                original.style_for_mode(&v, original.base_style(), ColorMode::Light),
                restored.style_for_mode(&v, restored.base_style(), ColorMode::Light)
            );
        }
    }

    #[test]
    fn test_compile_with_cache() {
        let cache = FormatCache::new(8);
        let spec = FormatSpec::new("0%", StyleMap::new());
        let fmt = spec.compile_with(&cache);
        assert_eq!(fmt.format(&Value::Number(0.5)), "50%");
        assert!(cache.contains("0%"));
    }
}
