//! Compiled formats: the per-cell entry points.
//!
//! [`compile`] turns a format string into a [`CompiledFormat`] once. The
//! grid then calls [`CompiledFormat::format`] and [`CompiledFormat::style_for`]
//! for every cell. Neither call ever fails: a malformed format or a value
//! the pattern cannot render falls back to the value's default string form.
//!
//! # Example
//!
//! ```rust
//! use gridformat::{compile, ColorMode, StyleMap, Value};
//!
//! let fmt = compile("[Green]#,##0.00;[Red](#,##0.00);\"-\"");
//!
//! assert_eq!(fmt.format(&Value::Number(1234.5)), "1,234.50");
//! assert_eq!(fmt.format(&Value::Number(-42.0)), "(42.00)");
//! assert_eq!(fmt.format(&Value::Number(0.0)), "-");
//!
//! let style = fmt
//!     .style_for_mode(&Value::Number(-42.0), &StyleMap::new(), ColorMode::Light)
//!     .unwrap();
//! assert_eq!(style.get("color"), Some("#DC2626"));
//! ```

use std::fmt;
use std::sync::Arc;

use log::warn;

use crate::error::FormatError;
use crate::persist::FormatSpec;
use crate::section::{self, ParsedFormat, Section};
use crate::style::StyleMap;
use crate::theme::{detect_color_mode, ColorMode};
use crate::value::Value;

/// Compiles a format string with an empty base style.
pub fn compile(raw: &str) -> CompiledFormat {
    CompiledFormat::new(raw)
}

/// An immutable, cheaply clonable compiled format string.
#[derive(Debug, Clone)]
pub struct CompiledFormat {
    source: Arc<str>,
    base_style: StyleMap,
    parsed: Result<Arc<ParsedFormat>, FormatError>,
}

impl CompiledFormat {
    pub fn new(raw: &str) -> Self {
        Self::with_base_style(raw, StyleMap::new())
    }

    /// Compiles `raw` and attaches a base style that conditional styles
    /// layer on top of.
    pub fn with_base_style(raw: &str, base_style: StyleMap) -> Self {
        let parsed = section::parse(raw).map(Arc::new);
        Self::from_parts(Arc::from(raw), base_style, parsed)
    }

    pub(crate) fn from_parts(
        source: Arc<str>,
        base_style: StyleMap,
        parsed: Result<Arc<ParsedFormat>, FormatError>,
    ) -> Self {
        if let Err(err) = &parsed {
            warn!("format {:?} is malformed: {}", source, err);
        }
        Self {
            source,
            base_style,
            parsed,
        }
    }

    /// Returns a copy sharing the parsed sections but with another base style.
    pub fn rebased(&self, base_style: StyleMap) -> Self {
        Self {
            source: Arc::clone(&self.source),
            base_style,
            parsed: self.parsed.clone(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn base_style(&self) -> &StyleMap {
        &self.base_style
    }

    /// The parse error, if the format string was malformed.
    pub fn error(&self) -> Option<&FormatError> {
        self.parsed.as_ref().err()
    }

    pub fn is_valid(&self) -> bool {
        self.parsed.is_ok()
    }

    /// The parsed sections; empty for a malformed format.
    pub fn sections(&self) -> &[Section] {
        match &self.parsed {
            Ok(parsed) => parsed.sections(),
            Err(_) => &[],
        }
    }

    fn select(&self, value: &Value<'_>) -> Option<(&Section, bool)> {
        let parsed = self.parsed.as_ref().ok()?;
        let selected = parsed.select(value);
        debug_assert!(
            selected.is_some(),
            "no section selected for {:?} in {:?}",
            value,
            self.source
        );
        selected
    }

    /// Formats a value. Never fails.
    pub fn format(&self, value: &Value<'_>) -> String {
        if value.is_null() {
            return String::new();
        }
        match self.select(value) {
            Some((section, omit_sign)) => section
                .render(value, omit_sign)
                .unwrap_or_else(|_| value.to_string()),
            None => value.to_string(),
        }
    }

    /// Resolves the cell style using the detected color mode.
    ///
    /// See [`style_for_mode`](Self::style_for_mode).
    pub fn style_for(&self, value: &Value<'_>, base: &StyleMap) -> Option<StyleMap> {
        self.style_for_mode(value, base, detect_color_mode())
    }

    /// Resolves the cell style for an explicit color mode.
    ///
    /// The selected section's properties override same-named `base`
    /// properties. Returns `None` when the section has no style and `base`
    /// is empty.
    pub fn style_for_mode(
        &self,
        value: &Value<'_>,
        base: &StyleMap,
        mode: ColorMode,
    ) -> Option<StyleMap> {
        let conditional = if value.is_null() {
            None
        } else {
            self.select(value)
                .map(|(section, _)| section)
                .filter(|section| section.has_style())
                .map(|section| section.style(mode))
        };

        match (conditional, base.is_empty()) {
            (None, true) => None,
            (None, false) => Some(base.clone()),
            (Some(cond), true) => Some(cond.clone()),
            (Some(cond), false) => Some(base.merged(cond)),
        }
    }

    /// [`style_for`](Self::style_for) with this format's own base style.
    pub fn style(&self, value: &Value<'_>) -> Option<StyleMap> {
        self.style_for(value, &self.base_style)
    }

    /// The persistable form of this format.
    pub fn spec(&self) -> FormatSpec {
        FormatSpec::new(self.source.as_ref(), self.base_style.clone())
    }

    /// Packages the format as grid callbacks.
    pub fn callbacks(&self) -> CellCallbacks {
        let for_format = self.clone();
        let for_style = self.clone();
        CellCallbacks {
            format: Arc::new(move |value: &Value<'_>| for_format.format(value)),
            style: Arc::new(move |value: &Value<'_>, base: &StyleMap| {
                for_style.style_for(value, base)
            }),
            source: self.source.to_string(),
            base_style: self.base_style.clone(),
        }
    }
}

impl PartialEq for CompiledFormat {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.base_style == other.base_style
    }
}

/// Formats a value to display text.
pub type FormatFn = Arc<dyn for<'v> Fn(&Value<'v>) -> String + Send + Sync>;

/// Resolves a value's style against a base style.
pub type StyleFn = Arc<dyn for<'v> Fn(&Value<'v>, &StyleMap) -> Option<StyleMap> + Send + Sync>;

/// The callback pair a grid column holds, with the source it came from.
///
/// The source and base style travel as plain fields so the host can persist
/// them without inspecting the closures.
#[derive(Clone)]
pub struct CellCallbacks {
    pub format: FormatFn,
    pub style: StyleFn,
    pub source: String,
    pub base_style: StyleMap,
}

impl CellCallbacks {
    pub fn spec(&self) -> FormatSpec {
        FormatSpec::new(self.source.as_str(), self.base_style.clone())
    }
}

impl fmt::Debug for CellCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellCallbacks")
            .field("source", &self.source)
            .field("base_style", &self.base_style)
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const FORMATS: &[&str] = &[
        "#,##0.00",
        "[>0][Green]#,##0.00;[<0][Red](#,##0.00);\"-\"",
        "0.0%",
        "0.0,\"K\"",
        "0.00E+00",
        "# ?/?",
        "# ??/32",
        "yyyy-mm-dd hh:mm",
        "[Upper]@",
        "[Truncate:4]\"> \"@",
        "0;-0;0;@;[=7]\"seven\"",
    ];

    proptest! {
        #[test]
        fn compile_is_deterministic(idx in 0..FORMATS.len(), n in -1e12f64..1e12) {
            let a = compile(FORMATS[idx]);
            let b = compile(FORMATS[idx]);
            let v = Value::Number(n);
            prop_assert_eq!(a.format(&v), b.format(&v));
            prop_assert_eq!(
                a.style_for_mode(&v, &StyleMap::new(), ColorMode::Light),
                b.style_for_mode(&v, &StyleMap::new(), ColorMode::Light)
            );
        }

        #[test]
        fn format_is_idempotent(idx in 0..FORMATS.len(), text in "\\PC{0,12}") {
            let fmt = compile(FORMATS[idx]);
            let v = Value::Text(&text);
            prop_assert_eq!(fmt.format(&v), fmt.format(&v));
        }

        #[test]
        fn arbitrary_format_strings_never_panic(raw in "\\PC{0,24}", n in proptest::num::f64::ANY) {
            let fmt = compile(&raw);
            let _ = fmt.format(&Value::Number(n));
            let _ = fmt.format(&Value::Text(&raw));
            let _ = fmt.style_for_mode(&Value::Number(n), &StyleMap::new(), ColorMode::Dark);
        }

        #[test]
        fn grouped_output_parses_back(n in -1e15f64..1e15) {
            let out = compile("#,##0.00").format(&Value::Number(n));
            let parsed: f64 = out.replace(',', "").parse().unwrap();
            prop_assert!((parsed - n).abs() <= 0.005 + n.abs() * f64::EPSILON);
        }

        #[test]
        fn integral_values_render_exactly(
            n in -1_000_000_000_000_000i64..1_000_000_000_000_000i64
        ) {
            let out = compile("0").format(&Value::Number(n as f64));
            prop_assert_eq!(out, n.to_string());
        }
    }
}
