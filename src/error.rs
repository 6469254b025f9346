//! Format string errors.

use thiserror::Error;

/// Why a format string could not be split into sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// A `"` literal run is never closed.
    UnterminatedQuote,
    /// A `[` directive is never closed.
    UnclosedBracket,
    /// A `]` appears without a matching `[`.
    UnexpectedClosingBracket,
    /// A `[` appears inside another bracket group.
    NestedBracket,
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            MalformedReason::UnterminatedQuote => "unterminated quoted literal",
            MalformedReason::UnclosedBracket => "unclosed '[' directive",
            MalformedReason::UnexpectedClosingBracket => "unexpected ']'",
            MalformedReason::NestedBracket => "nested '[' inside a directive",
        };
        f.write_str(text)
    }
}

/// Error returned by format string parsing and pattern rendering.
///
/// None of these ever escape [`CompiledFormat::format`](crate::CompiledFormat::format)
/// or [`CompiledFormat::style_for`](crate::CompiledFormat::style_for); they are
/// surfaced for diagnostics and mapped to "looks unformatted" at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Brackets or quotes are unbalanced.
    #[error("malformed format string at byte {position}: {reason}")]
    Malformed {
        position: usize,
        reason: MalformedReason,
    },
    /// The value cannot become what the pattern expects.
    #[error("cannot render '{value}' as {expected}")]
    CoercionFailure {
        expected: &'static str,
        value: String,
    },
}

impl FormatError {
    pub(crate) fn malformed(position: usize, reason: MalformedReason) -> Self {
        FormatError::Malformed { position, reason }
    }

    pub(crate) fn coercion(expected: &'static str, value: impl ToString) -> Self {
        FormatError::CoercionFailure {
            expected,
            value: value.to_string(),
        }
    }
}
