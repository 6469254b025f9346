//! Color and style directives.
//!
//! This module provides the styling primitives of a format section:
//!
//! - [`ColorSpec`] / [`NamedColor`]: Color tokens with light/dark variants
//! - [`StyleDirective`]: Keyword directives like `Bold` or `BG:#fff`
//! - [`StyleMap`]: Resolved CSS-like properties handed to the grid
//! - [`resolve_style`]: Turns directives into a [`StyleMap`] for a color mode

mod color;
mod directive;
mod map;
mod resolve;

pub use color::{ColorSpec, NamedColor};
pub use directive::{HorizontalAlign, StyleDirective};
pub use map::{props, StyleMap};
pub use resolve::resolve_style;
