//! Style output for resolved placements
//!
//! This module turns a resolution into the [`StyleDirective`] applied to
//! floating content and renders it as CSS text.

pub mod config;
pub mod css;
pub mod style;

pub use config::CssConfig;
pub use css::render_css;
pub use style::{pixel_ceil, pixel_round, to_px, StyleDirective};
