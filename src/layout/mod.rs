//! Placement of floating content
//!
//! This module takes a target, floating content and placement props, and
//! computes where the content goes so it stays inside the visible viewport:
//! flipping to the other side when the preferred one overflows, shifting
//! along the viewport edges, and limiting its size to the space left.

pub mod anchor;
pub mod config;
pub mod engine;
pub mod error;
pub mod measure;
pub mod props;
pub mod resolver;
pub mod surface;
pub mod transform;
pub mod types;
pub mod viewport;
pub mod watcher;

pub use anchor::{parse_anchor, Anchor, Placement, Side};
pub use config::PlacementConfig;
pub use engine::{
    compute, compute_with, Flipped, GeometricProbe, Outcome, OverflowProbe, PlacementInput, Probe,
    Resolution,
};
pub use error::PlacementError;
pub use measure::{intrinsic_size, target_box, Target};
pub use props::{
    LocationStrategy, OffsetPair, OffsetValue, PlacementProps, SizeLimits, SizeValue,
};
pub use resolver::PlacementResolver;
pub use surface::{InlineOffsets, Measurable, OverflowStyle, Surface, Unsubscribe};
pub use transform::ScaleTranslate;
pub use types::*;
pub use viewport::{resolve_viewport, scroll_parents};
pub use watcher::ResizeWatcher;
