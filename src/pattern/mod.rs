//! Section patterns: the part of a section that turns a value into text.
//!
//! After its leading directives, a section's remaining text is classified
//! into one of the [`Pattern`] kinds:
//!
//! - [`NumberPattern`]: digit placeholders `0`, `#`, `?` with grouping,
//!   decimals, percent, scaling, fractions and scientific notation
//! - [`DateTimePattern`]: `yyyy`, `mm`, `dd`, `hh`, `ss`, `AM/PM` tokens
//! - [`TextPattern`]: literal text around `@` placeholders
//! - `Literal`: fixed text that ignores the value
//! - `General`: the value's default string form
//!
//! Rendering returns `Err` when the value cannot be coerced; callers fall
//! back to the default string form.

mod datetime;
mod literal;
mod number;
mod text;

pub use datetime::{DateTimePattern, DateToken, Meridiem};
pub use number::{Fraction, NumberPattern, Scale};
pub use text::{TextPattern, TextTransform};

use crate::error::FormatError;
use crate::value::Value;
use literal::{pieces, unquote, Piece};

/// A classified section pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pattern {
    General,
    Number(NumberPattern),
    DateTime(DateTimePattern),
    Text(TextPattern),
    Literal(String),
}

impl Pattern {
    /// Classifies the text left after a section's directives.
    ///
    /// `has_transform` turns an empty remainder into an implicit `@`.
    pub fn classify(body: &str, has_transform: bool) -> Pattern {
        if body.trim().is_empty() {
            return if has_transform {
                Pattern::Text(TextPattern::value_only())
            } else {
                Pattern::General
            };
        }
        if body.trim().eq_ignore_ascii_case("general") {
            return Pattern::General;
        }

        let scan = Scan::of(body);
        if scan.placeholder && !scan.is_datetime() {
            if let Some(number) = NumberPattern::parse(body) {
                return Pattern::Number(number);
            }
        }
        if scan.is_datetime() {
            return Pattern::DateTime(DateTimePattern::parse(body));
        }
        if scan.at_sign {
            return Pattern::Text(TextPattern::parse(body));
        }
        Pattern::Literal(unquote(body))
    }

    /// Whether the pattern can render non-numeric values as text.
    pub fn is_textual(&self) -> bool {
        matches!(self, Pattern::Text(_) | Pattern::Literal(_))
    }

    /// Renders `value`. `omit_sign` drops the minus from negative numbers
    /// when the surrounding section carries its own sign.
    pub fn render(&self, value: &Value<'_>, omit_sign: bool) -> Result<String, FormatError> {
        match self {
            Pattern::General => Ok(match value.as_number() {
                Some(n) if omit_sign && n < 0.0 => Value::Number(-n).to_string(),
                _ => value.to_string(),
            }),
            Pattern::Number(number) => {
                let n = value
                    .as_number()
                    .ok_or_else(|| FormatError::coercion("a number", value))?;
                number.render(n, omit_sign)
            }
            Pattern::DateTime(date) => {
                let dt = value
                    .as_datetime()
                    .ok_or_else(|| FormatError::coercion("a date", value))?;
                Ok(date.render(&dt))
            }
            Pattern::Text(text) => Ok(text.render(&value.to_string())),
            Pattern::Literal(text) => Ok(text.clone()),
        }
    }
}

/// What the unquoted characters of a pattern body contain.
#[derive(Debug, Default)]
struct Scan {
    placeholder: bool,
    at_sign: bool,
    date_token: bool,
    other_letter: bool,
}

impl Scan {
    fn of(body: &str) -> Self {
        let mut scan = Scan::default();
        let raw: Vec<char> = pieces(body)
            .into_iter()
            .map(|p| match p {
                Piece::Raw(_, c) => c,
                // Any non-letter breaks letter runs and scale lookbehind.
                _ => '\u{0}',
            })
            .collect();

        let mut i = 0;
        while i < raw.len() {
            let c = raw[i];
            match c {
                '0' | '#' | '?' => scan.placeholder = true,
                '@' => scan.at_sign = true,
                'A' | 'a' => {
                    if let Some((len, _)) = datetime::meridiem_len(&raw, i) {
                        scan.date_token = true;
                        i += len;
                        continue;
                    }
                    scan.other_letter = true;
                }
                // `0.0M` scales by a million rather than naming a month.
                'M' | 'm' if i > 0 && matches!(raw[i - 1], '0' | '#' | '?' | ',') => {
                    scan.other_letter = true;
                }
                c if datetime::is_date_letter(c) => scan.date_token = true,
                c if c.is_alphabetic() => scan.other_letter = true,
                _ => {}
            }
            i += 1;
        }
        scan
    }

    fn is_datetime(&self) -> bool {
        self.date_token && !self.other_letter
    }
}
