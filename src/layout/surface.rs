//! Platform capabilities the placement engine depends on
//!
//! Everything that needs a live rendering surface goes through these traits:
//! measuring boxes, walking the element tree, reading computed styles,
//! observing resizes and scheduling work on frame boundaries. The engine
//! itself only sees the boxes they produce.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::{BoundingBox, Point, Size};

/// Guard returned by subscriptions; dropping it cancels the subscription
#[must_use = "dropping the guard cancels the subscription"]
pub struct Unsubscribe(Option<Box<dyn FnOnce()>>);

impl Unsubscribe {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self(Some(Box::new(cancel)))
    }

    /// A guard with nothing to cancel
    pub fn noop() -> Self {
        Self(None)
    }

    /// Cancel now instead of on drop
    pub fn cancel(mut self) {
        if let Some(cancel) = self.0.take() {
            cancel();
        }
    }
}

impl Drop for Unsubscribe {
    fn drop(&mut self) {
        if let Some(cancel) = self.0.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Unsubscribe")
            .field(&self.0.is_some())
            .finish()
    }
}

/// Something with a live box that can report size changes
pub trait Measurable {
    /// Current bounding box in viewport coordinates
    fn get_box(&self) -> BoundingBox;

    /// Call `callback` whenever the size changes
    fn on_resize(&self, callback: Box<dyn FnMut()>) -> Unsubscribe;
}

/// Computed `overflow-y` of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowStyle {
    #[default]
    Visible,
    Hidden,
    Clip,
    Auto,
    Scroll,
}

/// Positioning offsets currently set in an element's inline style
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InlineOffsets {
    pub left: Option<String>,
    pub top: Option<String>,
    pub right: Option<String>,
}

impl InlineOffsets {
    /// Whether both `top` and `left` are set
    pub fn is_positioned(&self) -> bool {
        self.top.is_some() && self.left.is_some()
    }
}

/// A rendering surface: element tree, computed styles and the frame clock
pub trait Surface {
    type Element: Copy + Eq + fmt::Debug + 'static;
    type Handle: Measurable;

    /// Box measurement and resize observation for an element
    fn measure(&self, el: Self::Element) -> Self::Handle;

    /// The document's root element
    fn root(&self) -> Option<Self::Element>;

    fn parent(&self, el: Self::Element) -> Option<Self::Element>;

    /// Size of the area inside the element's borders, excluding scrollbars
    fn client_size(&self, el: Self::Element) -> Size;

    /// Size of the element's content including the part scrolled out of view
    fn scroll_size(&self, el: Self::Element) -> Size;

    /// Laid-out size before transforms
    fn offset_size(&self, el: Self::Element) -> Size;

    fn overflow_y(&self, el: Self::Element) -> OverflowStyle;

    /// Computed `transform`, e.g. `none` or `matrix(...)`
    fn transform(&self, el: Self::Element) -> String;

    /// Computed `transform-origin` in pixels
    fn transform_origin(&self, el: Self::Element) -> String;

    fn inline_offsets(&self, el: Self::Element) -> InlineOffsets;

    /// False for elements that are not rendered (e.g. `display: none`)
    fn is_rendered(&self, el: Self::Element) -> bool;

    /// Scroll offsets of the document body while its scrolling is blocked
    fn body_scroll(&self) -> Point;

    /// Index of the frame currently being prepared
    fn frame(&self) -> u64;

    /// Run `callback` before the next frame is painted
    fn request_frame(&self, callback: Box<dyn FnOnce(u64)>);

    /// Live bounding box of an element
    fn bounding_rect(&self, el: Self::Element) -> BoundingBox {
        self.measure(el).get_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_unsubscribe_runs_once_on_drop() {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let guard = Unsubscribe::new(move || c.set(c.get() + 1));
        drop(guard);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_unsubscribe_cancel() {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        Unsubscribe::new(move || c.set(c.get() + 1)).cancel();
        assert_eq!(count.get(), 1);
        Unsubscribe::noop().cancel();
    }

    #[test]
    fn test_inline_offsets_positioned() {
        let mut offsets = InlineOffsets::default();
        assert!(!offsets.is_positioned());
        offsets.top = Some("10px".to_string());
        assert!(!offsets.is_positioned());
        offsets.left = Some("0px".to_string());
        assert!(offsets.is_positioned());
    }
}
