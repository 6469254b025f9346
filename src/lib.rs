//! # gridformat - Excel-style format strings for grid cells
//!
//! `gridformat` compiles spreadsheet-style format strings into cell
//! formatters. A compiled format turns raw cell values into display text and
//! resolves conditional styles for the cell, adapting named colors to the
//! light or dark theme.
//!
//! ## Format strings
//!
//! A format string is up to four (or more) `;`-separated sections. Each
//! section may start with bracket directives and ends with a pattern:
//!
//! ```text
//! [>=1000][Green][Bold]#,##0,"K" ; [Red](#,##0.00) ; "-" ; [Upper]@
//! ```
//!
//! - Conditions: `[>0]`, `[<=100]`, `[=0]`, `[<>5]`
//! - Colors: `[Red]`, `[#FF8800]`, `[Color3]`
//! - Styles: `[Bold]`, `[Italic]`, `[BG:#fff]`, `[Align:right]`, `[Size:14]`
//! - Text transforms: `[Upper]`, `[Title]`, `[Snake]`, `[Truncate:10]`
//! - Patterns: numbers (`#,##0.00`, `0%`, `0.00E+00`, `# ?/?`), dates
//!   (`yyyy-mm-dd`, `h:mm AM/PM`), text (`"Name: "@`) and quoted literals
//!
//! Without conditions, sections take Excel's positional roles: positive,
//! negative, zero, text.
//!
//! ## Quick start
//!
//! ```rust
//! use gridformat::{compile, ColorMode, StyleMap, Value};
//!
//! let fmt = compile("[>0][Green]#,##0.00;[<0][Red]#,##0.00;\"-\"");
//!
//! assert_eq!(fmt.format(&Value::Number(1234.5)), "1,234.50");
//! assert_eq!(fmt.format(&Value::Number(0.0)), "-");
//!
//! let style = fmt.style_for_mode(&Value::Number(-3.0), &StyleMap::new(), ColorMode::Dark);
//! assert_eq!(style.unwrap().get("color"), Some("#F87171"));
//! ```
//!
//! ## Failure behaviour
//!
//! Formatting never fails. A malformed format string is reported through
//! [`CompiledFormat::error`] and logged; its cells render their default
//! string form without style. The same fallback applies to a value a
//! pattern cannot render, such as text in a number-only format.
//!
//! ## Caching
//!
//! [`FormatCache`] memoizes compiled formats by source string, and
//! [`Formatter`] wraps a cache and a [`ThemeChoice`] for hosts that format by
//! string. [`compile_cached`] uses a process-wide cache.
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: compilation at `debug`,
//! unknown directives at `debug`, malformed formats at `warn` and cache hits
//! at `trace`.

pub mod cache;
pub mod compiled;
pub mod condition;
pub mod error;
pub mod formatter;
pub mod pattern;
pub mod persist;
pub mod section;
pub mod style;
pub mod term;
pub mod theme;
mod util;
pub mod value;

pub use cache::{compile_cached, global_cache, CacheConfig, FormatCache};
pub use compiled::{compile, CellCallbacks, CompiledFormat, FormatFn, StyleFn};
pub use condition::{Condition, Operator};
pub use error::{FormatError, MalformedReason};
pub use formatter::{Formatter, FormatterBuilder};
pub use pattern::{Pattern, TextTransform};
pub use persist::FormatSpec;
pub use section::{parse, ParsedFormat, Section};
pub use style::{resolve_style, ColorSpec, HorizontalAlign, NamedColor, StyleDirective, StyleMap};
pub use term::{render_ansi, render_ansi_aligned, to_console_style};
pub use theme::{detect_color_mode, set_theme_detector, ColorMode, ThemeChoice};
pub use util::{pad_to_width, rgb_to_ansi256};
pub use value::Value;
