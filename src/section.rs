//! Section parsing: splitting a format string and reading each section's
//! leading directives.
//!
//! A format string is a `;`-separated list of sections:
//!
//! ```text
//! [>=100][Green][Bold]#,##0.00 ; [Red](#,##0.00) ; "-" ; [Upper]@
//! ```
//!
//! Each section starts with zero or more `[...]` directives, each one a
//! condition, a color, a text transform or a style keyword. The rest of the
//! section is its [`Pattern`].

use log::debug;

use crate::condition::Condition;
use crate::error::{FormatError, MalformedReason};
use crate::pattern::{Pattern, TextTransform};
use crate::style::{resolve_style, ColorSpec, StyleDirective, StyleMap};
use crate::theme::ColorMode;
use crate::value::Value;

/// One `;`-separated part of a format string.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    condition: Option<Condition>,
    color: Option<ColorSpec>,
    styles: Vec<StyleDirective>,
    transform: Option<TextTransform>,
    pattern: Pattern,
    light: StyleMap,
    dark: StyleMap,
}

impl Section {
    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    pub fn color(&self) -> Option<&ColorSpec> {
        self.color.as_ref()
    }

    pub fn styles(&self) -> &[StyleDirective] {
        &self.styles
    }

    pub fn transform(&self) -> Option<TextTransform> {
        self.transform
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Whether the section contributes any style properties.
    pub fn has_style(&self) -> bool {
        !self.light.is_empty()
    }

    /// The section's resolved style for a color mode.
    pub fn style(&self, mode: ColorMode) -> &StyleMap {
        match mode {
            ColorMode::Light => &self.light,
            ColorMode::Dark => &self.dark,
        }
    }

    /// Renders a value through the transform and pattern.
    ///
    /// For text patterns the transform applies to the value before `@`
    /// substitution; for every other pattern it applies to the rendered text.
    pub fn render(&self, value: &Value<'_>, omit_sign: bool) -> Result<String, FormatError> {
        match (&self.pattern, self.transform) {
            (Pattern::Text(text), Some(transform)) => {
                Ok(text.render(&transform.apply(&value.to_string())))
            }
            (pattern, transform) => {
                let out = pattern.render(value, omit_sign)?;
                Ok(match transform {
                    Some(t) => t.apply(&out),
                    None => out,
                })
            }
        }
    }
}

/// A parsed format string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFormat {
    sections: Vec<Section>,
}

impl ParsedFormat {
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// True when no section carries a condition, so sections get Excel's
    /// positional roles.
    pub fn is_implicit(&self) -> bool {
        self.sections.iter().all(|s| s.condition.is_none())
    }

    /// Picks the section for `value`.
    ///
    /// Returns the section and whether it renders negatives without a minus
    /// sign. Every path falls back to the last section, so `None` only comes
    /// back for a format with no sections. [`parse`] never builds one:
    /// `split_sections` yields at least one part, even for `""`.
    pub fn select(&self, value: &Value<'_>) -> Option<(&Section, bool)> {
        let implicit = self.is_implicit();

        let Some(n) = value.as_number() else {
            let text_section = if implicit {
                self.sections.get(3)
            } else {
                self.sections
                    .iter()
                    .find(|s| s.condition.is_none() && s.pattern.is_textual())
            };
            return text_section.or(self.sections.last()).map(|s| (s, false));
        };

        if let Some(section) = self
            .sections
            .iter()
            .find(|s| s.condition.is_some_and(|c| c.matches(n)))
        {
            return Some((section, false));
        }

        let two_section_zero = implicit && self.sections.len() == 2 && n == 0.0;
        for (i, section) in self.sections.iter().enumerate().take(3) {
            if section.condition.is_some() {
                continue;
            }
            let role = match i {
                0 => n > 0.0 || two_section_zero,
                1 => n < 0.0,
                _ => n == 0.0,
            };
            if role {
                return Some((section, implicit && i == 1));
            }
        }

        self.sections.last().map(|s| (s, false))
    }
}

/// Parses a format string into sections.
///
/// Fails only on unbalanced brackets or an unterminated quote.
///
/// # Example
///
/// ```rust
/// use gridformat::parse;
///
/// let parsed = parse("[>0][Green]0.00;[Red]0.00;\"-\"").unwrap();
/// assert_eq!(parsed.sections().len(), 3);
/// assert!(parse("[Red0.00").is_err());
/// ```
pub fn parse(raw: &str) -> Result<ParsedFormat, FormatError> {
    let parts = split_sections(raw)?;
    let multi = parts.len() > 1;
    let sections = parts
        .into_iter()
        .map(|part| parse_section(part, multi))
        .collect::<Vec<_>>();
    debug!(
        "compiled format {:?} into {} section(s)",
        raw,
        sections.len()
    );
    Ok(ParsedFormat { sections })
}

/// Splits on top-level `;`, validating quotes and brackets on the way.
fn split_sections(raw: &str) -> Result<Vec<&str>, FormatError> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quote_start: Option<usize> = None;
    let mut bracket_start: Option<usize> = None;
    let mut escaped = false;

    for (idx, ch) in raw.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if quote_start.is_some() {
            if ch == '"' {
                quote_start = None;
            }
            continue;
        }
        if bracket_start.is_some() {
            match ch {
                ']' => bracket_start = None,
                '[' => {
                    return Err(FormatError::malformed(idx, MalformedReason::NestedBracket))
                }
                _ => {}
            }
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => quote_start = Some(idx),
            '[' => bracket_start = Some(idx),
            ']' => {
                return Err(FormatError::malformed(
                    idx,
                    MalformedReason::UnexpectedClosingBracket,
                ))
            }
            ';' => {
                parts.push(&raw[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }

    if let Some(pos) = quote_start {
        return Err(FormatError::malformed(pos, MalformedReason::UnterminatedQuote));
    }
    if let Some(pos) = bracket_start {
        return Err(FormatError::malformed(pos, MalformedReason::UnclosedBracket));
    }
    parts.push(&raw[start..]);
    Ok(parts)
}

fn parse_section(text: &str, multi: bool) -> Section {
    let mut condition = None;
    let mut color = None;
    let mut transform = None;
    let mut styles = Vec::new();
    let mut rest = text;

    loop {
        let trimmed = rest.trim_start();
        let Some(inner) = trimmed.strip_prefix('[') else {
            break;
        };
        // Currency tags belong to the pattern.
        if inner.starts_with('$') {
            break;
        }
        let Some(end) = inner.find(']') else {
            break;
        };
        let content = &inner[..end];
        rest = &inner[end + 1..];

        if let Some(c) = Condition::parse(content) {
            if condition.is_none() {
                condition = Some(c);
            } else {
                debug!("ignoring second condition [{}] in section {:?}", content, text);
            }
        } else if let Some(c) = ColorSpec::parse(content) {
            color = Some(c);
        } else if let Some(t) = TextTransform::parse(content) {
            transform = Some(t);
        } else {
            let directive = StyleDirective::parse(content);
            if directive.is_unknown() {
                debug!("unknown format directive [{}]", content);
            }
            styles.push(directive);
        }
    }

    let no_directives =
        condition.is_none() && color.is_none() && transform.is_none() && styles.is_empty();
    // An empty section of a multi-section format hides its values.
    let pattern = if multi && no_directives && text.is_empty() {
        Pattern::Literal(String::new())
    } else {
        Pattern::classify(rest, transform.is_some())
    };

    let light = resolve_style(&styles, color.as_ref(), ColorMode::Light);
    let dark = resolve_style(&styles, color.as_ref(), ColorMode::Dark);

    Section {
        condition,
        color,
        styles,
        transform,
        pattern,
        light,
        dark,
    }
}
