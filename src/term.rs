//! Terminal preview of styled cells.
//!
//! Grid hosts consume [`StyleMap`]s directly; this module maps them onto
//! [`console::Style`] so formats can be previewed in a terminal.

use console::Style;

use crate::compiled::CompiledFormat;
use crate::style::{props, HorizontalAlign, StyleMap};
use crate::theme::ColorMode;
use crate::util::{pad_to_width, parse_hex_rgb, rgb_to_ansi256};
use crate::value::Value;

/// Converts style properties to a terminal style.
///
/// Hex colors are mapped to the nearest ANSI-256 index. Properties with no
/// terminal equivalent (size, padding, alignment, border) are ignored.
pub fn to_console_style(map: &StyleMap) -> Style {
    let mut style = Style::new();

    if let Some(rgb) = map.get(props::COLOR).and_then(parse_hex_rgb) {
        style = style.color256(rgb_to_ansi256(rgb));
    }
    if let Some(rgb) = map.get(props::BACKGROUND_COLOR).and_then(parse_hex_rgb) {
        style = style.on_color256(rgb_to_ansi256(rgb));
    }
    if map.get(props::FONT_WEIGHT).is_some_and(is_bold_weight) {
        style = style.bold();
    }
    if map.get(props::FONT_STYLE) == Some("italic") {
        style = style.italic();
    }
    if let Some(decoration) = map.get(props::TEXT_DECORATION) {
        if decoration.contains("underline") {
            style = style.underlined();
        }
        if decoration.contains("line-through") {
            style = style.strikethrough();
        }
    }
    style
}

fn is_bold_weight(weight: &str) -> bool {
    match weight.trim() {
        "bold" | "bolder" => true,
        w => w.parse::<u32>().is_ok_and(|n| n >= 600),
    }
}

/// Formats a value and applies its resolved style as ANSI escapes.
pub fn render_ansi(format: &CompiledFormat, value: &Value<'_>, mode: ColorMode) -> String {
    let text = format.format(value);
    match format.style_for_mode(value, format.base_style(), mode) {
        Some(map) => to_console_style(&map).apply_to(text).to_string(),
        None => text,
    }
}

/// Like [`render_ansi`], but pads the cell to `width` display columns first.
///
/// Padding follows the resolved `text-align`. Without one, numbers align
/// right and everything else aligns left.
pub fn render_ansi_aligned(
    format: &CompiledFormat,
    value: &Value<'_>,
    width: usize,
    mode: ColorMode,
) -> String {
    let text = format.format(value);
    let style = format.style_for_mode(value, format.base_style(), mode);
    let align = style
        .as_ref()
        .and_then(|map| map.get(props::TEXT_ALIGN))
        .and_then(HorizontalAlign::parse)
        .unwrap_or(match value {
            Value::Number(_) => HorizontalAlign::Right,
            _ => HorizontalAlign::Left,
        });
    let cell = pad_to_width(&text, width, align);
    match style {
        Some(map) => to_console_style(&map).apply_to(cell).to_string(),
        None => cell,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiled::compile;

    fn styled(map: &StyleMap, text: &str) -> String {
        to_console_style(map)
            .force_styling(true)
            .apply_to(text)
            .to_string()
    }

    #[test]
    fn test_color_maps_to_ansi256() {
        let map = StyleMap::new().with("color", "#FF0000");
        let out = styled(&map, "x");
        assert!(out.contains("\x1b[38;5;196m"));
        assert!(out.contains('x'));
    }

    #[test]
    fn test_background() {
        let map = StyleMap::new().with("background-color", "#0000FF");
        assert!(styled(&map, "x").contains("\x1b[48;5;21m"));
    }

    #[test]
    fn test_font_flags() {
        let map = StyleMap::new()
            .with("font-weight", "700")
            .with("font-style", "italic")
            .with("text-decoration", "underline line-through");
        let out = styled(&map, "x");
        assert!(out.contains("\x1b[1m"));
        assert!(out.contains("\x1b[3m"));
        assert!(out.contains("\x1b[4m"));
        assert!(out.contains("\x1b[9m"));
    }

    #[test]
    fn test_light_weight_is_not_bold() {
        let map = StyleMap::new().with("font-weight", "400");
        assert_eq!(styled(&map, "x"), "x");
    }

    #[test]
    fn test_render_ansi_unstyled_is_plain() {
        let fmt = compile("0.00");
        assert_eq!(
            render_ansi(&fmt, &Value::Number(1.0), ColorMode::Light),
            "1.00"
        );
    }

    #[test]
    fn test_render_ansi_keeps_text() {
        let fmt = compile("[Red]0.00");
        let out = render_ansi(&fmt, &Value::Number(1.0), ColorMode::Light);
        assert!(console::strip_ansi_codes(&out).contains("1.00"));
    }

    #[test]
    fn test_aligned_numbers_pad_left() {
        let fmt = compile("0.00");
        let number = render_ansi_aligned(&fmt, &Value::Number(1.0), 7, ColorMode::Light);
        assert_eq!(console::strip_ansi_codes(&number), "   1.00");
        let text = render_ansi_aligned(&fmt, &Value::Text("abc"), 5, ColorMode::Light);
        assert_eq!(console::strip_ansi_codes(&text), "abc  ");
    }

    #[test]
    fn test_aligned_follows_text_align() {
        let fmt = compile("[Align:center]@");
        let out = render_ansi_aligned(&fmt, &Value::Text("日本"), 8, ColorMode::Light);
        assert_eq!(console::strip_ansi_codes(&out), "  日本  ");
    }
}
