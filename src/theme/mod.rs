//! Light/dark color mode selection.
//!
//! This module provides:
//!
//! - [`ColorMode`]: Light or dark color mode enum
//! - [`ThemeChoice`]: A fixed mode or one that follows the OS setting
//! - [`set_theme_detector`]: Override for how the OS mode is detected
//!
//! Named colors in format strings resolve to a different hex value per mode,
//! so conditional coloring stays legible under either theme.

mod adaptive;
mod choice;

pub use adaptive::{detect_color_mode, reset_theme_detector, set_theme_detector, ColorMode};
pub use choice::ThemeChoice;
