//! Style keyword directives such as `[Bold]`, `[BG:#fff]` or `[Align:right]`.

use super::color::ColorSpec;

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

impl HorizontalAlign {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "left" | "start" => Some(HorizontalAlign::Left),
            "center" | "centre" | "middle" => Some(HorizontalAlign::Center),
            "right" | "end" => Some(HorizontalAlign::Right),
            _ => None,
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            HorizontalAlign::Left => "left",
            HorizontalAlign::Center => "center",
            HorizontalAlign::Right => "right",
        }
    }
}

/// One style instruction from a section prefix.
///
/// Directives are resolved once at compile time; the per-value path only
/// sees the resulting [`StyleMap`](super::StyleMap).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StyleDirective {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Color(ColorSpec),
    Background(ColorSpec),
    Border(String),
    /// Font size in pixels.
    FontSize(u32),
    Align(HorizontalAlign),
    Padding(String),
    FontWeight(String),
    /// Unrecognized bracket content, kept verbatim and ignored at render time.
    Unknown(String),
}

impl StyleDirective {
    /// Classifies bracket content against the keyword table.
    ///
    /// Keywords are case-insensitive and may carry a `:value` suffix. Content
    /// that matches nothing, or whose value is invalid, becomes
    /// [`StyleDirective::Unknown`].
    pub fn parse(content: &str) -> Self {
        Self::parse_known(content).unwrap_or_else(|| StyleDirective::Unknown(content.to_string()))
    }

    fn parse_known(content: &str) -> Option<Self> {
        let (key, value) = match content.split_once(':') {
            Some((k, v)) => (k.trim().to_lowercase(), Some(v.trim())),
            None => (content.trim().to_lowercase(), None),
        };

        let directive = match (key.as_str(), value) {
            ("bold", None) => StyleDirective::Bold,
            ("italic", None) => StyleDirective::Italic,
            ("underline", None) => StyleDirective::Underline,
            ("strike" | "strikethrough", None) => StyleDirective::Strikethrough,
            ("left" | "center" | "centre" | "right", None) => {
                StyleDirective::Align(HorizontalAlign::parse(&key)?)
            }
            ("align", Some(v)) => StyleDirective::Align(HorizontalAlign::parse(v)?),
            ("bg" | "background", Some(v)) => StyleDirective::Background(ColorSpec::parse(v)?),
            ("color" | "fg", Some(v)) => StyleDirective::Color(ColorSpec::parse(v)?),
            ("border", Some(v)) if !v.is_empty() => StyleDirective::Border(v.to_string()),
            ("size" | "fontsize" | "font-size", Some(v)) => {
                let px = v.trim_end_matches("px").trim().parse::<u32>().ok()?;
                StyleDirective::FontSize(px)
            }
            ("padding", Some(v)) if !v.is_empty() => StyleDirective::Padding(v.to_string()),
            ("weight" | "fontweight" | "font-weight", Some(v)) if !v.is_empty() => {
                StyleDirective::FontWeight(v.to_string())
            }
            _ => return None,
        };
        Some(directive)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, StyleDirective::Unknown(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::NamedColor;

    #[test]
    fn test_flag_keywords() {
        assert_eq!(StyleDirective::parse("Bold"), StyleDirective::Bold);
        assert_eq!(StyleDirective::parse("ITALIC"), StyleDirective::Italic);
        assert_eq!(StyleDirective::parse("underline"), StyleDirective::Underline);
        assert_eq!(StyleDirective::parse("Strike"), StyleDirective::Strikethrough);
        assert_eq!(
            StyleDirective::parse("Center"),
            StyleDirective::Align(HorizontalAlign::Center)
        );
    }

    #[test]
    fn test_valued_keywords() {
        assert_eq!(
            StyleDirective::parse("BG:#fff"),
            StyleDirective::Background(ColorSpec::Hex("#FFFFFF".to_string()))
        );
        assert_eq!(
            StyleDirective::parse("Background: Yellow"),
            StyleDirective::Background(ColorSpec::Named(NamedColor::Yellow))
        );
        assert_eq!(
            StyleDirective::parse("Color:#112233"),
            StyleDirective::Color(ColorSpec::Hex("#112233".to_string()))
        );
        assert_eq!(StyleDirective::parse("Size:14"), StyleDirective::FontSize(14));
        assert_eq!(StyleDirective::parse("FontSize:12px"), StyleDirective::FontSize(12));
        assert_eq!(
            StyleDirective::parse("Align:right"),
            StyleDirective::Align(HorizontalAlign::Right)
        );
        assert_eq!(
            StyleDirective::parse("Padding:4px 8px"),
            StyleDirective::Padding("4px 8px".to_string())
        );
        assert_eq!(
            StyleDirective::parse("Border:1px solid #ccc"),
            StyleDirective::Border("1px solid #ccc".to_string())
        );
        assert_eq!(
            StyleDirective::parse("Weight:600"),
            StyleDirective::FontWeight("600".to_string())
        );
    }

    #[test]
    fn test_unknown_is_preserved() {
        let d = StyleDirective::parse("Sparkle");
        assert_eq!(d, StyleDirective::Unknown("Sparkle".to_string()));
        assert!(d.is_unknown());
    }

    #[test]
    fn test_invalid_values_are_unknown() {
        assert!(StyleDirective::parse("Size:big").is_unknown());
        assert!(StyleDirective::parse("BG:notacolor").is_unknown());
        assert!(StyleDirective::parse("Align:diagonal").is_unknown());
        assert!(StyleDirective::parse("Bold:yes").is_unknown());
        assert!(StyleDirective::parse("Padding:").is_unknown());
    }
}
