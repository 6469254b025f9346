//! Theme selection for style resolution.

use serde::{Deserialize, Serialize};

use super::adaptive::{detect_color_mode, ColorMode};

/// Either a fixed color mode or one that follows the OS setting.
///
/// # Example
///
/// ```rust
/// use gridformat::{ColorMode, ThemeChoice};
///
/// assert_eq!(ThemeChoice::Fixed(ColorMode::Dark).resolve(), ColorMode::Dark);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// A mode that doesn't change with the system setting.
    Fixed(ColorMode),
    /// Follows the detector installed with [`set_theme_detector`](super::set_theme_detector).
    #[default]
    Adaptive,
}

impl ThemeChoice {
    /// Resolves to a concrete color mode.
    pub fn resolve(&self) -> ColorMode {
        match self {
            ThemeChoice::Fixed(mode) => *mode,
            ThemeChoice::Adaptive => detect_color_mode(),
        }
    }
}

impl From<ColorMode> for ThemeChoice {
    fn from(mode: ColorMode) -> Self {
        ThemeChoice::Fixed(mode)
    }
}

impl std::str::FromStr for ThemeChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" | "adaptive" => Ok(ThemeChoice::Adaptive),
            "light" => Ok(ThemeChoice::Fixed(ColorMode::Light)),
            "dark" => Ok(ThemeChoice::Fixed(ColorMode::Dark)),
            other => Err(format!(
                "unknown theme '{}'. Available: auto, light, dark",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_fixed_resolves_to_itself() {
        assert_eq!(ThemeChoice::Fixed(ColorMode::Light).resolve(), ColorMode::Light);
        assert_eq!(ThemeChoice::from(ColorMode::Dark).resolve(), ColorMode::Dark);
    }

    #[test]
    #[serial]
    fn test_adaptive_uses_detector() {
        crate::theme::set_theme_detector(|| ColorMode::Dark);
        assert_eq!(ThemeChoice::Adaptive.resolve(), ColorMode::Dark);
        crate::theme::reset_theme_detector();
    }

    #[test]
    fn test_from_str() {
        assert_eq!("auto".parse::<ThemeChoice>(), Ok(ThemeChoice::Adaptive));
        assert_eq!(
            "DARK".parse::<ThemeChoice>(),
            Ok(ThemeChoice::Fixed(ColorMode::Dark))
        );
        assert!("sepia".parse::<ThemeChoice>().is_err());
    }
}
