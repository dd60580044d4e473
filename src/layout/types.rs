//! Core geometric types for the placement engine

use serde::{Deserialize, Serialize};

/// A 2D point in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector from `other` to `self`
    pub fn offset_from(&self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Add a vector
    pub fn translate(&self, delta: Point) -> Point {
        Point::new(self.x + delta.x, self.y + delta.y)
    }
}

/// Width and height pair
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle
///
/// `width` and `height` are never negative for boxes produced by this crate;
/// constructors clamp them to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Create a zero-sized bounding box at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Zero-sized box at a point
    pub fn at_point(point: Point) -> Self {
        Self::new(point.x, point.y, 0.0, 0.0)
    }

    /// Left edge x-coordinate
    pub fn left(&self) -> f64 {
        self.x
    }

    /// Top edge y-coordinate
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if `other` lies entirely within this box
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        other.x >= self.x
            && other.right() <= self.right()
            && other.y >= self.y
            && other.bottom() <= self.bottom()
    }

    /// Move the box by a vector
    pub fn translate(&self, delta: Point) -> BoundingBox {
        BoundingBox {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..*self
        }
    }

    /// Overlapping region of two boxes
    ///
    /// Disjoint boxes produce a zero-sized box at the would-be intersection
    /// corner rather than a negative extent.
    pub fn intersection(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        BoundingBox::new(x, y, right - x, bottom - y)
    }

    /// Shrink the box by `margin` on every side
    pub fn inset(&self, margin: f64) -> BoundingBox {
        BoundingBox::new(
            self.x + margin,
            self.y + margin,
            self.width - margin * 2.0,
            self.height - margin * 2.0,
        )
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

/// Layout axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::X, Axis::Y];
}

/// Distance a box extends past a boundary on one axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisOverflow {
    pub before: f64,
    pub after: f64,
}

impl AxisOverflow {
    /// Sum of both sides
    pub fn total(&self) -> f64 {
        self.before + self.after
    }

    pub fn is_overflowing(&self) -> bool {
        self.before > 0.0 || self.after > 0.0
    }
}

/// Per-axis overflow of a box relative to a boundary
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Overflow {
    pub x: AxisOverflow,
    pub y: AxisOverflow,
}

impl Overflow {
    pub fn axis(&self, axis: Axis) -> AxisOverflow {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// True when the inner box was fully contained
    pub fn is_contained(&self) -> bool {
        !self.x.is_overflowing() && !self.y.is_overflowing()
    }
}

/// How far `inner` extends past each edge of `outer`
///
/// Every component is non-negative and all four are zero iff `inner` is
/// fully contained in `outer`.
pub fn overflow(inner: &BoundingBox, outer: &BoundingBox) -> Overflow {
    Overflow {
        x: AxisOverflow {
            before: (outer.left() - inner.left()).max(0.0),
            after: (inner.right() - outer.right()).max(0.0),
        },
        y: AxisOverflow {
            before: (outer.top() - inner.top()).max(0.0),
            after: (inner.bottom() - outer.bottom()).max(0.0),
        },
    }
}
