//! Element descriptions for the in-memory document

use crate::layout::surface::OverflowStyle;
use crate::layout::types::Size;

/// Handle to an element of a [`Document`](super::Document)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Static layout of an element before any inline positioning
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSpec {
    pub x: f64,
    pub y: f64,
    /// Natural width of the content
    pub width: f64,
    /// Natural height of the content at its natural width
    pub height: f64,
    pub overflow_y: OverflowStyle,
    /// Explicit scroll size; derived from the content when unset
    pub scroll_size: Option<Size>,
    /// Computed transform, `none` when unset
    pub transform: Option<String>,
    /// Computed transform origin; the box center when unset
    pub transform_origin: Option<String>,
    pub hidden: bool,
    /// Content that reflows when narrowed, keeping its area
    pub wrap: bool,
}

impl ElementSpec {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            overflow_y: OverflowStyle::Visible,
            scroll_size: None,
            transform: None,
            transform_origin: None,
            hidden: false,
            wrap: false,
        }
    }

    pub fn with_overflow(mut self, overflow: OverflowStyle) -> Self {
        self.overflow_y = overflow;
        self
    }

    pub fn with_scroll_size(mut self, width: f64, height: f64) -> Self {
        self.scroll_size = Some(Size::new(width, height));
        self
    }

    pub fn with_transform(mut self, transform: impl Into<String>, origin: impl Into<String>) -> Self {
        self.transform = Some(transform.into());
        self.transform_origin = Some(origin.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn wrapping(mut self) -> Self {
        self.wrap = true;
        self
    }

    /// Height of the content when laid out `width` wide
    pub(crate) fn height_at(&self, width: f64) -> f64 {
        if self.wrap && width > 0.0 && width < self.width {
            self.width * self.height / width
        } else {
            self.height
        }
    }
}
