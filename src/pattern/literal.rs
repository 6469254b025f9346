//! Quoted runs, escapes and bracket tags inside a pattern.

/// One lexical unit of a pattern body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Piece<'a> {
    /// An unquoted character and its byte offset.
    Raw(usize, char),
    /// Content of a `"..."` run, quotes removed.
    Quoted(&'a str),
    /// The character following a `\`.
    Escaped(char),
    /// Content of a `[...]` tag, brackets removed.
    Bracket(&'a str),
}

/// Splits a pattern body into pieces.
///
/// An unterminated quote or bracket swallows the rest of the input; the
/// section splitter has already rejected those before patterns are built.
pub(crate) fn pieces(s: &str) -> Vec<Piece<'_>> {
    let mut out = Vec::new();
    let mut iter = s.char_indices().peekable();

    while let Some((idx, ch)) = iter.next() {
        match ch {
            '"' => {
                let start = idx + 1;
                let end = s[start..].find('"').map(|p| start + p).unwrap_or(s.len());
                out.push(Piece::Quoted(&s[start..end]));
                while iter.peek().is_some_and(|(i, _)| *i <= end) {
                    iter.next();
                }
            }
            '[' => {
                let start = idx + 1;
                let end = s[start..].find(']').map(|p| start + p).unwrap_or(s.len());
                out.push(Piece::Bracket(&s[start..end]));
                while iter.peek().is_some_and(|(i, _)| *i <= end) {
                    iter.next();
                }
            }
            '\\' => match iter.next() {
                Some((_, next)) => out.push(Piece::Escaped(next)),
                None => out.push(Piece::Raw(idx, ch)),
            },
            _ => out.push(Piece::Raw(idx, ch)),
        }
    }

    out
}

/// Renders literal text the way it appears around numbers and dates.
///
/// - quoted runs and escapes are emitted verbatim
/// - `[$€-407]` currency tags emit their symbol, other tags are dropped
/// - `_x` reserves the width of `x` and renders as a single space
/// - `*x` (fill) is omitted since the cell width is unknown here
pub(crate) fn render_pieces(segment: &[Piece<'_>]) -> String {
    let mut out = String::new();
    let mut skip_next = false;
    let mut pending: Option<char> = None;

    for piece in segment.iter().copied() {
        if skip_next {
            skip_next = false;
            if let Some('_') = pending.take() {
                out.push(' ');
            }
            continue;
        }
        match piece {
            Piece::Quoted(text) => out.push_str(text),
            Piece::Escaped(c) => out.push(c),
            Piece::Bracket(content) => {
                if let Some(symbol) = currency_symbol_from_bracket(content) {
                    out.push_str(symbol);
                }
            }
            Piece::Raw(_, c @ ('_' | '*')) => {
                skip_next = true;
                pending = Some(c);
            }
            Piece::Raw(_, c) => out.push(c),
        }
    }
    // A trailing `_` with nothing to measure still reserves a column.
    if let Some('_') = pending {
        out.push(' ');
    }

    out
}

/// Removes quoting from a literal-only section, keeping everything else verbatim.
pub(crate) fn unquote(segment: &str) -> String {
    let mut out = String::new();
    for piece in pieces(segment) {
        match piece {
            Piece::Quoted(text) => out.push_str(text),
            Piece::Escaped(c) => out.push(c),
            Piece::Bracket(content) => match currency_symbol_from_bracket(content) {
                Some(symbol) => out.push_str(symbol),
                None => {
                    out.push('[');
                    out.push_str(content);
                    out.push(']');
                }
            },
            Piece::Raw(_, c) => out.push(c),
        }
    }
    out
}

pub(crate) fn currency_symbol_from_bracket(content: &str) -> Option<&str> {
    let after = content.strip_prefix('$')?;
    let symbol = after.split_once('-').map(|(s, _)| s).unwrap_or(after);
    if symbol.is_empty() {
        None
    } else {
        Some(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pieces() {
        let p = pieces(r#"0"a;b"\x[Red]"#);
        assert_eq!(
            p,
            vec![
                Piece::Raw(0, '0'),
                Piece::Quoted("a;b"),
                Piece::Escaped('x'),
                Piece::Bracket("Red"),
            ]
        );
    }

    #[test]
    fn test_render_literal_segment() {
        let render_literal_segment = |s: &str| render_pieces(&pieces(s));
        assert_eq!(render_literal_segment(r#"" units""#), " units");
        assert_eq!(render_literal_segment(r"\$"), "$");
        assert_eq!(render_literal_segment("[$€-407] "), "€ ");
        assert_eq!(render_literal_segment("_)"), " ");
        assert_eq!(render_literal_segment("*-"), "");
        assert_eq!(render_literal_segment("[Red]x"), "x");
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote(r#""N/A""#), "N/A");
        assert_eq!(unquote(r#"Total: "n""#), "Total: n");
        assert_eq!(unquote("a_b"), "a_b");
        assert_eq!(unquote("[$£]"), "£");
    }
}
