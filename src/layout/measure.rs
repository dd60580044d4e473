//! Measuring targets and floating content

use tracing::debug;

use crate::parser::{parse_length, parse_transform, parse_transform_origin, OriginPoint};

use super::surface::Surface;
use super::transform::ScaleTranslate;
use super::types::{BoundingBox, Point};

/// What floating content attaches to
#[derive(Debug, Clone, PartialEq)]
pub enum Target<E> {
    Element(E),
    /// Several elements; the first one is used
    Elements(Vec<E>),
    /// A point in viewport coordinates, e.g. a cursor position
    Point(Point),
}

impl<E: Copy> Target<E> {
    /// The element whose box and size changes matter, if any
    pub fn element(&self) -> Option<E> {
        match self {
            Target::Element(el) => Some(*el),
            Target::Elements(els) => els.first().copied(),
            Target::Point(_) => None,
        }
    }
}

/// Box of a target
///
/// A point yields a zero-sized box. An element that is not rendered, or an
/// empty element list, yields `last` so the content stays where it was.
pub fn target_box<S: Surface>(
    surface: &S,
    target: &Target<S::Element>,
    last: Option<BoundingBox>,
) -> BoundingBox {
    if let Target::Point(point) = target {
        return BoundingBox::at_point(*point);
    }

    match target.element() {
        Some(el) if surface.is_rendered(el) => surface.bounding_rect(el),
        Some(el) => {
            debug!(element = ?el, "target is not rendered, keeping its last box");
            last.unwrap_or_default()
        }
        None => last.unwrap_or_default(),
    }
}

/// Box the content would occupy without the styles placement applied
///
/// The rendered rect has its transform un-applied, then the inline
/// `left`/`top` offsets (`right` in right-to-left layouts) are removed. The
/// extent is taken from the scroll size where that is larger, so a previously
/// applied `max-width`/`max-height` does not shrink the next measurement.
pub fn intrinsic_size<S: Surface>(surface: &S, el: S::Element, is_rtl: bool) -> BoundingBox {
    let rendered = surface.bounding_rect(el);
    let offset_size = surface.offset_size(el);

    let computed = surface.transform(el);
    let layout = match parse_transform(&computed) {
        Ok(spec) => {
            let origin = parse_transform_origin(&surface.transform_origin(el))
                .unwrap_or(OriginPoint { x: 0.0, y: 0.0 });
            ScaleTranslate::from_spec(&spec, origin)
                .map(|t| t.unapply(&rendered, offset_size))
                .unwrap_or(rendered)
        }
        Err(_) => {
            debug!(transform = %computed, "unsupported transform, measuring as rendered");
            rendered
        }
    };

    let inline = surface.inline_offsets(el);
    let length = |value: &Option<String>| {
        value
            .as_deref()
            .and_then(|v| parse_length(v).ok())
            .unwrap_or(0.0)
    };

    let x = if is_rtl {
        layout.x + length(&inline.right)
    } else {
        layout.x - length(&inline.left)
    };
    let y = layout.y - length(&inline.top);

    let scroll = surface.scroll_size(el);
    BoundingBox::new(
        x,
        y,
        layout.width.max(scroll.width),
        layout.height.max(scroll.height),
    )
}
