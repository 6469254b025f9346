//! Color tokens: named colors with light/dark variants and hex literals.

use crate::theme::ColorMode;
use crate::util::parse_hex_rgb;

/// A color from the fixed palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    White,
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Purple,
    Magenta,
    Cyan,
    Gray,
    Pink,
}

/// `(name, color, light hex, dark hex)`.
///
/// Dark variants are brighter so conditional colors stay readable on dark
/// grid backgrounds. Black and White are absolute.
const PALETTE: &[(&str, NamedColor, &str, &str)] = &[
    ("black", NamedColor::Black, "#000000", "#000000"),
    ("white", NamedColor::White, "#FFFFFF", "#FFFFFF"),
    ("red", NamedColor::Red, "#DC2626", "#F87171"),
    ("green", NamedColor::Green, "#16A34A", "#4ADE80"),
    ("blue", NamedColor::Blue, "#2563EB", "#60A5FA"),
    ("yellow", NamedColor::Yellow, "#CA8A04", "#FACC15"),
    ("orange", NamedColor::Orange, "#EA580C", "#FB923C"),
    ("purple", NamedColor::Purple, "#9333EA", "#C084FC"),
    ("magenta", NamedColor::Magenta, "#C026D3", "#E879F9"),
    ("cyan", NamedColor::Cyan, "#0891B2", "#22D3EE"),
    ("gray", NamedColor::Gray, "#6B7280", "#9CA3AF"),
    ("grey", NamedColor::Gray, "#6B7280", "#9CA3AF"),
    ("pink", NamedColor::Pink, "#DB2777", "#F472B6"),
];

impl NamedColor {
    /// Looks up a color by name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        PALETTE
            .iter()
            .find(|(n, ..)| n.eq_ignore_ascii_case(name))
            .map(|(_, color, ..)| *color)
    }

    pub fn name(self) -> &'static str {
        PALETTE
            .iter()
            .find(|(_, color, ..)| *color == self)
            .map(|(n, ..)| *n)
            .unwrap_or("black")
    }

    /// Returns the hex value for the given mode.
    pub fn hex(self, mode: ColorMode) -> &'static str {
        let entry = PALETTE.iter().find(|(_, color, ..)| *color == self);
        match (entry, mode) {
            (Some((_, _, light, _)), ColorMode::Light) => *light,
            (Some((_, _, _, dark)), ColorMode::Dark) => *dark,
            (None, _) => "#000000",
        }
    }
}

/// A color directive: either a palette name or a literal hex string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColorSpec {
    Named(NamedColor),
    /// Normalized to uppercase `#RRGGBB`.
    Hex(String),
}

impl ColorSpec {
    /// Parses `Red`, `#f00`, `#FF0000` or the Excel indices `Color1`..`Color10`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            let (r, g, b) = parse_hex_rgb(s)?;
            return Some(ColorSpec::Hex(format!("#{:02X}{:02X}{:02X}", r, g, b)));
        }
        if let Some(named) = NamedColor::from_name(s) {
            return Some(ColorSpec::Named(named));
        }
        parse_indexed(s)
    }

    /// Resolves to a hex string for the given mode.
    pub fn resolve(&self, mode: ColorMode) -> String {
        match self {
            ColorSpec::Named(named) => named.hex(mode).to_string(),
            ColorSpec::Hex(hex) => hex.clone(),
        }
    }
}

impl From<NamedColor> for ColorSpec {
    fn from(named: NamedColor) -> Self {
        ColorSpec::Named(named)
    }
}

// Excel's legacy palette slots; only the first ten are common in format codes.
fn parse_indexed(s: &str) -> Option<ColorSpec> {
    let prefix = s.get(..5)?;
    if !prefix.eq_ignore_ascii_case("color") {
        return None;
    }
    let index: u8 = s[5..].trim().parse().ok()?;
    let spec = match index {
        1 => ColorSpec::Named(NamedColor::Black),
        2 => ColorSpec::Named(NamedColor::White),
        3 => ColorSpec::Named(NamedColor::Red),
        4 => ColorSpec::Named(NamedColor::Green),
        5 => ColorSpec::Named(NamedColor::Blue),
        6 => ColorSpec::Named(NamedColor::Yellow),
        7 => ColorSpec::Named(NamedColor::Magenta),
        8 => ColorSpec::Named(NamedColor::Cyan),
        9 => ColorSpec::Hex("#800000".to_string()),
        10 => ColorSpec::Hex("#008000".to_string()),
        _ => return None,
    };
    Some(spec)
}
