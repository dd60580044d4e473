//! Effective viewport of floating content
//!
//! Content inside scrolling containers is clipped by every one of them, so
//! the region it may occupy is the intersection of their visible client
//! areas.

use super::surface::{OverflowStyle, Surface};
use super::types::BoundingBox;

/// Whether an element scrolls its content vertically
pub fn is_scrollable<S: Surface>(surface: &S, el: S::Element) -> bool {
    match surface.overflow_y(el) {
        OverflowStyle::Scroll => true,
        OverflowStyle::Auto => surface.scroll_size(el).height > surface.client_size(el).height,
        _ => false,
    }
}

/// Scrolling ancestors of `el`, nearest first
///
/// The root element is included when it scrolls.
pub fn scroll_parents<S: Surface>(surface: &S, el: S::Element) -> Vec<S::Element> {
    let mut parents = Vec::new();
    let mut current = surface.parent(el);
    while let Some(parent) = current {
        if is_scrollable(surface, parent) {
            parents.push(parent);
        }
        current = surface.parent(parent);
    }
    parents
}

/// Visible client area of a scroll container
///
/// The root's client area always starts at the viewport origin.
pub fn client_box<S: Surface>(surface: &S, el: S::Element) -> BoundingBox {
    let client = surface.client_size(el);
    if surface.root() == Some(el) {
        return BoundingBox::new(0.0, 0.0, client.width, client.height);
    }
    let rect = surface.bounding_rect(el);
    BoundingBox::new(rect.x, rect.y, client.width, client.height)
}

/// Intersect the client areas of `parents` and inset the result by `margin`
///
/// An empty chain falls back to the root element. Without a root the
/// viewport is a zero-sized box at the origin.
pub fn resolve_viewport<S: Surface>(surface: &S, parents: &[S::Element], margin: f64) -> BoundingBox {
    let clip = parents
        .iter()
        .map(|&el| client_box(surface, el))
        .reduce(|acc, b| acc.intersection(&b))
        .or_else(|| surface.root().map(|root| client_box(surface, root)));

    match clip {
        Some(clip) => clip.inset(margin),
        None => BoundingBox::zero(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, ElementSpec};
    use crate::layout::surface::OverflowStyle;
    use crate::layout::types::Size;

    #[test]
    fn test_no_scroll_parents_uses_root() {
        let doc = Document::new(Size::new(800.0, 600.0));
        let content = doc.append(None, ElementSpec::new(0.0, 0.0, 100.0, 100.0));
        let parents = scroll_parents(&doc, content);
        assert!(parents.is_empty());
        assert_eq!(
            resolve_viewport(&doc, &parents, 12.0),
            BoundingBox::new(12.0, 12.0, 776.0, 576.0)
        );
    }

    #[test]
    fn test_auto_overflow_needs_scrollable_content() {
        let doc = Document::new(Size::new(800.0, 600.0));
        let fits = doc.append(
            None,
            ElementSpec::new(0.0, 0.0, 400.0, 300.0).with_overflow(OverflowStyle::Auto),
        );
        let scrolls = doc.append(
            None,
            ElementSpec::new(0.0, 0.0, 400.0, 300.0)
                .with_overflow(OverflowStyle::Auto)
                .with_scroll_size(400.0, 900.0),
        );
        let always = doc.append(
            None,
            ElementSpec::new(0.0, 0.0, 400.0, 300.0).with_overflow(OverflowStyle::Scroll),
        );
        assert!(!is_scrollable(&doc, fits));
        assert!(is_scrollable(&doc, scrolls));
        assert!(is_scrollable(&doc, always));
    }

    #[test]
    fn test_nested_scroll_parents_intersect() {
        let doc = Document::new(Size::new(800.0, 600.0));
        let outer = doc.append(
            None,
            ElementSpec::new(50.0, 50.0, 600.0, 400.0).with_overflow(OverflowStyle::Scroll),
        );
        let inner = doc.append(
            Some(outer),
            ElementSpec::new(300.0, 100.0, 500.0, 500.0).with_overflow(OverflowStyle::Scroll),
        );
        let content = doc.append(Some(inner), ElementSpec::new(320.0, 120.0, 100.0, 50.0));

        let parents = scroll_parents(&doc, content);
        assert_eq!(parents, vec![inner, outer]);
        assert_eq!(
            resolve_viewport(&doc, &parents, 0.0),
            BoundingBox::new(300.0, 100.0, 350.0, 350.0)
        );
        assert_eq!(
            resolve_viewport(&doc, &parents, 12.0),
            BoundingBox::new(312.0, 112.0, 326.0, 326.0)
        );
    }
}
