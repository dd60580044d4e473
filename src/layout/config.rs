//! Configuration for the placement engine

use serde::Deserialize;

/// Configuration options for placement resolution
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Distance kept between floating content and the viewport edges
    pub viewport_margin: f64,

    /// Number of flip restarts before resolution gives up and keeps the
    /// last computed placement
    pub max_resets: usize,

    /// Extra passes scheduled on frame boundaries after the first placement,
    /// while the content is taller than the space it was given
    pub settle_frames: usize,

    /// Device pixels per CSS pixel, used for rounding emitted lengths
    pub device_pixel_ratio: f64,

    /// Number of resize-triggered flip results remembered to detect a
    /// flip/resize loop
    pub flip_history: usize,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            viewport_margin: 12.0,
            max_resets: 10,
            settle_frames: 2,
            device_pixel_ratio: 1.0,
            flip_history: 4,
        }
    }
}

impl PlacementConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewport margin
    pub fn with_viewport_margin(mut self, margin: f64) -> Self {
        self.viewport_margin = margin;
        self
    }

    /// Set the flip restart bound
    pub fn with_max_resets(mut self, resets: usize) -> Self {
        self.max_resets = resets;
        self
    }

    /// Set the number of settle passes
    pub fn with_settle_frames(mut self, frames: usize) -> Self {
        self.settle_frames = frames;
        self
    }

    /// Set the device pixel ratio
    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }
}
