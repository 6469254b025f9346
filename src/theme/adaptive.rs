//! Color mode detection that responds to the system setting.

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// The user's preferred color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    pub fn is_dark(self) -> bool {
        self == ColorMode::Dark
    }
}

type ThemeDetector = fn() -> ColorMode;

static THEME_DETECTOR: Lazy<Mutex<ThemeDetector>> = Lazy::new(|| Mutex::new(os_theme_detector));

// Asking the OS is slow on some platforms; grids call this per cell.
static OS_COLOR_MODE: Lazy<ColorMode> = Lazy::new(|| match detect_os_theme() {
    OsThemeMode::Dark => ColorMode::Dark,
    OsThemeMode::Light => ColorMode::Light,
});

/// Overrides the detector used to determine whether the user prefers a light or dark theme.
///
/// This is useful for testing or when the host application tracks its own theme.
pub fn set_theme_detector(detector: ThemeDetector) {
    let mut guard = match THEME_DETECTOR.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *guard = detector;
}

/// Restores the OS-backed detector.
pub fn reset_theme_detector() {
    set_theme_detector(os_theme_detector);
}

/// Returns the current color mode as reported by the active detector.
pub fn detect_color_mode() -> ColorMode {
    let detector = match THEME_DETECTOR.lock() {
        Ok(guard) => *guard,
        Err(poisoned) => *poisoned.into_inner(),
    };
    detector()
}

fn os_theme_detector() -> ColorMode {
    *OS_COLOR_MODE
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_detector_override() {
        set_theme_detector(|| ColorMode::Dark);
        assert_eq!(detect_color_mode(), ColorMode::Dark);

        set_theme_detector(|| ColorMode::Light);
        assert_eq!(detect_color_mode(), ColorMode::Light);

        reset_theme_detector();
    }

    #[test]
    fn test_color_mode_serde() {
        let json = serde_json::to_string(&ColorMode::Dark).unwrap();
        assert_eq!(json, "\"dark\"");
        let mode: ColorMode = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(mode, ColorMode::Light);
    }
}
