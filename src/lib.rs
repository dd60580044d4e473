//! Overlay Placement - collision-aware positioning of floating content
//!
//! This library places floating content (menus, tooltips, dropdowns, dialog
//! panels) next to a target so that it stays inside the visible scrollable
//! viewport, flipping and shifting when the preferred placement overflows
//! and limiting the content's size to the space that is left.
//!
//! # Example
//!
//! ```rust
//! use overlay_placement::place_scene;
//!
//! let directive = place_scene(r#"
//!     target = "button"
//!     content = "menu"
//!
//!     [viewport]
//!     width = 800
//!     height = 600
//!
//!     [[element]]
//!     id = "button"
//!     x = 100
//!     y = 100
//!     width = 80
//!     height = 20
//!
//!     [[element]]
//!     id = "menu"
//!     width = 120
//!     height = 60
//! "#).unwrap();
//!
//! assert_eq!(directive.top.as_deref(), Some("120px"));
//! assert_eq!(directive.left.as_deref(), Some("80px"));
//! ```

pub mod dom;
pub mod error;
pub mod layout;
pub mod parser;
pub mod renderer;
pub mod scene;

pub use dom::{Document, ElementId, ElementSpec};
pub use error::ParseError;
pub use layout::{
    parse_anchor, Anchor, PlacementConfig, PlacementError, PlacementProps, PlacementResolver,
    ResizeWatcher, Resolution, Target,
};
pub use renderer::{render_css, CssConfig, StyleDirective};
pub use scene::{Scene, SceneError};

/// Frames advanced after mounting so settle passes can run
pub const DEFAULT_FRAMES: usize = 3;

/// Place the content of a scene and return the final directive
///
/// The scene is mounted on its in-memory document and [`DEFAULT_FRAMES`]
/// frames are advanced.
pub fn place_scene(source: &str) -> Result<StyleDirective, SceneError> {
    let scene = Scene::from_str(source)?;
    Ok(place(&scene, DEFAULT_FRAMES))
}

/// Mount a scene, advance `frames` frames and return the final directive
pub fn place(scene: &Scene, frames: usize) -> StyleDirective {
    let watcher = scene.mount();
    scene.document.advance_frames(frames);
    watcher.directive()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"
target = "button"
content = "menu"

[viewport]
width = 800
height = 600

[[element]]
id = "button"
x = 300
y = 560
width = 100
height = 20

[[element]]
id = "menu"
width = 100
height = 200
"#;

    #[test]
    fn test_place_scene_flips_near_bottom() {
        let directive = place_scene(SCENE).unwrap();
        assert_eq!(directive.anchor_origin.as_deref(), Some("top center"));
        assert_eq!(directive.transform_origin.as_deref(), Some("bottom center"));
        assert_eq!(directive.top.as_deref(), Some("360px"));
    }

    #[test]
    fn test_place_scene_reports_bad_toml() {
        assert!(place_scene("not toml at all [").is_err());
    }
}
