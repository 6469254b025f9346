//! Helpers shared by the pattern renderers and the terminal preview.

use unicode_width::UnicodeWidthStr;

use crate::style::HorizontalAlign;

/// Maps a resolved style color to the closest ANSI-256 index.
///
/// Exact grays go to the 24-step gray ramp, everything else to the 6x6x6
/// color cube.
///
/// ```rust
/// use gridformat::rgb_to_ansi256;
///
/// assert_eq!(rgb_to_ansi256((0xDC, 0x26, 0x26)), 160);
/// ```
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

/// Parses `#RRGGBB` or `#RGB` into an RGB triplet.
pub fn parse_hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        6 => Some((
            u8::from_str_radix(&digits[0..2], 16).ok()?,
            u8::from_str_radix(&digits[2..4], 16).ok()?,
            u8::from_str_radix(&digits[4..6], 16).ok()?,
        )),
        3 => {
            let expand = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).map(|v| v * 17);
            Some((expand(0).ok()?, expand(1).ok()?, expand(2).ok()?))
        }
        _ => None,
    }
}

/// Clips text to `max_chars` characters and marks the cut with `…`.
///
/// The ellipsis comes after the kept characters and is not counted.
pub(crate) fn truncate_chars(s: &str, max_chars: usize) -> String {
    let mut chars = s.chars();
    let mut kept: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        kept.push('…');
    }
    kept
}

/// Pads text with spaces to `width` display columns.
///
/// Width follows `unicode-width`, so CJK characters count as two columns.
/// Text already at or past `width` is returned unchanged.
///
/// ```rust
/// use gridformat::{pad_to_width, HorizontalAlign};
///
/// assert_eq!(pad_to_width("42", 5, HorizontalAlign::Right), "   42");
/// assert_eq!(pad_to_width("日本", 6, HorizontalAlign::Left), "日本  ");
/// ```
pub fn pad_to_width(s: &str, width: usize, align: HorizontalAlign) -> String {
    let gap = width.saturating_sub(s.width());
    let (left, right) = match align {
        HorizontalAlign::Left => (0, gap),
        HorizontalAlign::Right => (gap, 0),
        HorizontalAlign::Center => (gap / 2, gap - gap / 2),
    };
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}

/// Splits text into words for case conversion.
///
/// Boundaries are runs of non-alphanumeric characters and lower-to-upper
/// transitions (`helloWorld` → `hello`, `World`). An acronym followed by a
/// word (`HTTPServer`) splits before the last capital.
pub(crate) fn split_words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(prev) = current.chars().last() {
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = ((prev.is_lowercase() || prev.is_numeric()) && c.is_uppercase())
                || (prev.is_uppercase() && c.is_uppercase() && next_is_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Uppercases the first character and lowercases the rest.
pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
