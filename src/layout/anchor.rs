//! Anchor algebra
//!
//! An [`Anchor`] names a point on a box by a side and an alignment along that
//! side. Anchors are parsed from descriptors such as `"bottom"` or
//! `"top end"`, resolved to physical sides for the writing direction, and
//! transformed by the three involutions used while searching for a placement
//! that fits the viewport.

use std::fmt;

use tracing::debug;

use crate::parser::{parse_anchor_spec, AnchorKeyword, AnchorSpec};

use super::types::{Axis, BoundingBox, Point};

/// A physical side or alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

impl Side {
    pub const ALL: [Side; 5] = [Side::Top, Side::Bottom, Side::Left, Side::Right, Side::Center];

    /// Opposite side; `center` maps to itself
    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Center => Side::Center,
        }
    }

    /// `top` or `bottom`
    pub fn is_block(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }

    /// `left` or `right`
    pub fn is_inline(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Left => "left",
            Side::Right => "right",
            Side::Center => "center",
        }
    }

    /// Direction a positive offset pushes along this side
    ///
    /// `top`/`left` pull towards the origin, `bottom`/`right` push away from
    /// it, `center` has no direction.
    pub fn direction(self) -> Point {
        match self {
            Side::Top => Point::new(0.0, -1.0),
            Side::Bottom => Point::new(0.0, 1.0),
            Side::Left => Point::new(-1.0, 0.0),
            Side::Right => Point::new(1.0, 0.0),
            Side::Center => Point::new(0.0, 0.0),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A side plus the alignment along it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub side: Side,
    pub align: Side,
}

impl Anchor {
    pub const CENTER: Anchor = Anchor::new(Side::Center, Side::Center);

    pub const fn new(side: Side, align: Side) -> Self {
        Self { side, align }
    }

    /// Swap `top`/`bottom` or `left`/`right` on the side, keeping the alignment
    pub fn flip_side(self) -> Anchor {
        Anchor::new(self.side.opposite(), self.align)
    }

    /// Swap the alignment, keeping the side
    pub fn flip_align(self) -> Anchor {
        Anchor::new(self.side, self.align.opposite())
    }

    /// Exchange side and alignment
    pub fn flip_corner(self) -> Anchor {
        Anchor::new(self.align, self.side)
    }

    /// Axis the anchor's side sits on: `Y` for block sides, `X` otherwise
    pub fn axis(self) -> Axis {
        if self.side.is_block() {
            Axis::Y
        } else {
            Axis::X
        }
    }

    /// Viewport coordinates of the anchor point on `bounds`
    pub fn to_point(self, bounds: &BoundingBox) -> Point {
        let fraction = |side: Side| match side {
            Side::Top | Side::Left => 0.0,
            Side::Bottom | Side::Right => 1.0,
            Side::Center => 0.5,
        };

        let (fx, fy) = if self.side.is_block() {
            (fraction(self.align), fraction(self.side))
        } else if self.side.is_inline() {
            (fraction(self.side), fraction(self.align))
        } else {
            (0.5, 0.5)
        };

        Point::new(bounds.x + bounds.width * fx, bounds.y + bounds.height * fy)
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Anchor::CENTER
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.side, self.align)
    }
}

/// Anchor on the target paired with the origin on the content that touches it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Placement {
    pub anchor: Anchor,
    pub origin: Anchor,
}

impl Placement {
    pub fn new(anchor: Anchor, origin: Anchor) -> Self {
        Self { anchor, origin }
    }

    /// Apply the same anchor transform to both halves
    pub fn map(self, f: impl Fn(Anchor) -> Anchor) -> Placement {
        Placement::new(f(self.anchor), f(self.origin))
    }
}

/// Resolve a keyword to a physical side for the writing direction
pub fn to_physical(keyword: AnchorKeyword, is_rtl: bool) -> Side {
    match keyword {
        AnchorKeyword::Top => Side::Top,
        AnchorKeyword::Bottom => Side::Bottom,
        AnchorKeyword::Left => Side::Left,
        AnchorKeyword::Right => Side::Right,
        AnchorKeyword::Center => Side::Center,
        AnchorKeyword::Start if is_rtl => Side::Right,
        AnchorKeyword::Start => Side::Left,
        AnchorKeyword::End if is_rtl => Side::Left,
        AnchorKeyword::End => Side::Right,
    }
}

/// Resolve a parsed spec to a physical anchor
///
/// A missing alignment centers on the side, except for the logical sides
/// `start`/`end`, which align to the block start (`top`).
pub fn resolve_spec(spec: &AnchorSpec, is_rtl: bool) -> Anchor {
    let side = spec.side.node;
    let align = match &spec.align {
        Some(align) => align.node,
        None if side.is_logical() => AnchorKeyword::Top,
        None => AnchorKeyword::Center,
    };
    Anchor::new(to_physical(side, is_rtl), to_physical(align, is_rtl))
}

/// Parse a `"side [align]"` descriptor
///
/// Malformed descriptors resolve to `center center`.
pub fn parse_anchor(raw: &str, is_rtl: bool) -> Anchor {
    match parse_anchor_spec(raw) {
        Ok(spec) => resolve_spec(&spec, is_rtl),
        Err(errors) => {
            debug!(
                descriptor = raw,
                error = %errors.first().map(|e| e.to_string()).unwrap_or_default(),
                "malformed anchor, using center"
            );
            Anchor::CENTER
        }
    }
}
