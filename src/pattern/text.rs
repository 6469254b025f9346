//! Text patterns (`"Name: "@`) and text transforms (`[Upper]`, `[Truncate:12]`).

use super::literal::{currency_symbol_from_bracket, pieces, Piece};
use crate::util::{capitalize, split_words, truncate_chars};

/// A case or length transform applied to the rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextTransform {
    Upper,
    Lower,
    /// Capitalizes every whitespace-separated word.
    Title,
    /// Lowercases everything, then capitalizes the first letter of each sentence.
    Sentence,
    Camel,
    Pascal,
    Snake,
    Kebab,
    Trim,
    /// Keeps at most `n` characters, appending `…` when clipped.
    Truncate(usize),
}

impl TextTransform {
    /// Parses directive content such as `Upper`, `snake_case` or `Truncate:10`.
    pub fn parse(content: &str) -> Option<Self> {
        let (key, value) = match content.split_once(':') {
            Some((k, v)) => (k, Some(v.trim())),
            None => (content, None),
        };
        let key: String = key
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect();
        let key = key.strip_suffix("case").unwrap_or(&key);

        let transform = match (key, value) {
            ("upper", None) => TextTransform::Upper,
            ("lower", None) => TextTransform::Lower,
            ("title", None) => TextTransform::Title,
            ("sentence", None) => TextTransform::Sentence,
            ("camel", None) => TextTransform::Camel,
            ("pascal", None) => TextTransform::Pascal,
            ("snake", None) => TextTransform::Snake,
            ("kebab", None) => TextTransform::Kebab,
            ("trim", None) => TextTransform::Trim,
            ("truncate", Some(n)) => TextTransform::Truncate(n.parse().ok()?),
            _ => return None,
        };
        Some(transform)
    }

    pub fn apply(self, s: &str) -> String {
        match self {
            TextTransform::Upper => s.to_uppercase(),
            TextTransform::Lower => s.to_lowercase(),
            TextTransform::Title => title_case(s),
            TextTransform::Sentence => sentence_case(s),
            TextTransform::Camel => {
                let words = split_words(s);
                let mut out = String::new();
                for (i, word) in words.iter().enumerate() {
                    if i == 0 {
                        out.push_str(&word.to_lowercase());
                    } else {
                        out.push_str(&capitalize(word));
                    }
                }
                out
            }
            TextTransform::Pascal => split_words(s).iter().map(|w| capitalize(w)).collect(),
            TextTransform::Snake => join_lower(s, "_"),
            TextTransform::Kebab => join_lower(s, "-"),
            TextTransform::Trim => s.trim().to_string(),
            TextTransform::Truncate(n) => truncate_chars(s, n),
        }
    }
}

fn join_lower(s: &str, sep: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(sep)
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

fn sentence_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut capitalize_next = true;
    let mut after_terminator = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if capitalize_next {
                out.extend(c.to_uppercase());
                capitalize_next = false;
            } else {
                out.extend(c.to_lowercase());
            }
            after_terminator = false;
            continue;
        }
        if matches!(c, '.' | '!' | '?') {
            after_terminator = true;
        } else if c.is_whitespace() && after_terminator {
            capitalize_next = true;
        } else if !c.is_whitespace() {
            after_terminator = false;
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum TextPiece {
    Value,
    Literal(String),
}

/// Literal pieces around `@` value placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextPattern {
    pieces: Vec<TextPiece>,
}

impl TextPattern {
    pub fn parse(body: &str) -> Self {
        let mut out: Vec<TextPiece> = Vec::new();
        let push_text = |out: &mut Vec<TextPiece>, text: &str| {
            if let Some(TextPiece::Literal(prev)) = out.last_mut() {
                prev.push_str(text);
            } else {
                out.push(TextPiece::Literal(text.to_string()));
            }
        };

        for piece in pieces(body) {
            match piece {
                Piece::Raw(_, '@') => out.push(TextPiece::Value),
                Piece::Raw(_, c) | Piece::Escaped(c) => {
                    let mut buf = [0u8; 4];
                    push_text(&mut out, c.encode_utf8(&mut buf));
                }
                Piece::Quoted(text) => push_text(&mut out, text),
                Piece::Bracket(content) => {
                    if let Some(symbol) = currency_symbol_from_bracket(content) {
                        push_text(&mut out, symbol);
                    }
                }
            }
        }
        Self { pieces: out }
    }

    /// The pattern a bare transform directive implies: just the value.
    pub fn value_only() -> Self {
        Self {
            pieces: vec![TextPiece::Value],
        }
    }

    /// Substitutes `text` for every `@`.
    pub fn render(&self, text: &str) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                TextPiece::Value => out.push_str(text),
                TextPiece::Literal(lit) => out.push_str(lit),
            }
        }
        out
    }
}
