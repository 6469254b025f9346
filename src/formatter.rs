//! A formatter with its own cache and theme.

use crate::cache::{CacheConfig, FormatCache};
use crate::compiled::CompiledFormat;
use crate::persist::FormatSpec;
use crate::style::StyleMap;
use crate::theme::{ColorMode, ThemeChoice};
use crate::value::Value;

/// Formats cells by format string, compiling each string once.
///
/// Use this when a host renders many columns and does not want to hold
/// [`CompiledFormat`]s itself. Every call goes through the formatter's own
/// cache.
///
/// # Example
///
/// ```rust
/// use gridformat::{ColorMode, Formatter, StyleMap, ThemeChoice, Value};
///
/// let formatter = Formatter::builder()
///     .theme(ThemeChoice::Fixed(ColorMode::Dark))
///     .cache_capacity(64)
///     .build();
///
/// assert_eq!(formatter.format("0.0%", &Value::Number(0.25)), "25.0%");
///
/// let style = formatter
///     .style_for("[Red]0", &Value::Number(1.0), &StyleMap::new())
///     .unwrap();
/// assert_eq!(style.get("color"), Some("#F87171"));
/// ```
#[derive(Debug)]
pub struct Formatter {
    cache: FormatCache,
    theme: ThemeChoice,
}

impl Formatter {
    /// Creates a formatter with an adaptive theme and the default cache size.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> FormatterBuilder {
        FormatterBuilder::default()
    }

    pub fn compile(&self, fmt: &str) -> CompiledFormat {
        self.cache.compile(fmt, StyleMap::new())
    }

    pub fn compile_spec(&self, spec: &FormatSpec) -> CompiledFormat {
        spec.compile_with(&self.cache)
    }

    pub fn format(&self, fmt: &str, value: &Value<'_>) -> String {
        self.compile(fmt).format(value)
    }

    /// Resolves a cell style in this formatter's color mode.
    pub fn style_for(&self, fmt: &str, value: &Value<'_>, base: &StyleMap) -> Option<StyleMap> {
        self.compile(fmt)
            .style_for_mode(value, base, self.color_mode())
    }

    /// The color mode styles are resolved in, re-detected for adaptive themes.
    pub fn color_mode(&self) -> ColorMode {
        self.theme.resolve()
    }

    pub fn theme(&self) -> ThemeChoice {
        self.theme
    }

    pub fn cache(&self) -> &FormatCache {
        &self.cache
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Formatter`].
#[derive(Debug, Clone, Default)]
pub struct FormatterBuilder {
    theme: ThemeChoice,
    cache: CacheConfig,
}

impl FormatterBuilder {
    pub fn theme(mut self, theme: impl Into<ThemeChoice>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache.capacity = capacity;
        self
    }

    pub fn cache_config(mut self, config: CacheConfig) -> Self {
        self.cache = config;
        self
    }

    pub fn build(self) -> Formatter {
        Formatter {
            cache: FormatCache::with_config(&self.cache),
            theme: self.theme,
        }
    }
}
