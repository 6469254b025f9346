//! Directive resolution into a [`StyleMap`].

use super::color::ColorSpec;
use super::directive::StyleDirective;
use super::map::{props, StyleMap};
use crate::theme::ColorMode;

/// Resolves a section's directives into concrete style properties.
///
/// The bare color token (`[Red]`) sets `color` first; later directives win
/// over earlier ones, so an explicit `[Color:#123456]` overrides it.
/// [`StyleDirective::Unknown`] entries are skipped.
///
/// # Example
///
/// ```rust
/// use gridformat::{resolve_style, ColorMode, ColorSpec, NamedColor, StyleDirective};
///
/// let style = resolve_style(
///     &[StyleDirective::Bold],
///     Some(&ColorSpec::Named(NamedColor::Green)),
///     ColorMode::Light,
/// );
/// assert_eq!(style.get("font-weight"), Some("700"));
/// assert_eq!(style.get("color"), Some(NamedColor::Green.hex(ColorMode::Light)));
/// ```
pub fn resolve_style(
    directives: &[StyleDirective],
    color: Option<&ColorSpec>,
    mode: ColorMode,
) -> StyleMap {
    let mut style = StyleMap::new();
    if let Some(color) = color {
        style.insert(props::COLOR, color.resolve(mode));
    }

    let mut underline = false;
    let mut strike = false;

    for directive in directives {
        match directive {
            StyleDirective::Bold => style.insert(props::FONT_WEIGHT, "700"),
            StyleDirective::Italic => style.insert(props::FONT_STYLE, "italic"),
            StyleDirective::Underline => underline = true,
            StyleDirective::Strikethrough => strike = true,
            StyleDirective::Color(c) => style.insert(props::COLOR, c.resolve(mode)),
            StyleDirective::Background(c) => style.insert(props::BACKGROUND_COLOR, c.resolve(mode)),
            StyleDirective::Border(b) => style.insert(props::BORDER, b.as_str()),
            StyleDirective::FontSize(px) => style.insert(props::FONT_SIZE, format!("{}px", px)),
            StyleDirective::Align(a) => style.insert(props::TEXT_ALIGN, a.as_css()),
            StyleDirective::Padding(p) => style.insert(props::PADDING, p.as_str()),
            StyleDirective::FontWeight(w) => style.insert(props::FONT_WEIGHT, w.as_str()),
            StyleDirective::Unknown(_) => {}
        }
    }

    let decoration = match (underline, strike) {
        (true, true) => Some("underline line-through"),
        (true, false) => Some("underline"),
        (false, true) => Some("line-through"),
        (false, false) => None,
    };
    if let Some(decoration) = decoration {
        style.insert(props::TEXT_DECORATION, decoration);
    }

    style
}
