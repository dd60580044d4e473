//! Scale/translate transforms for measuring floating content.
//!
//! Floating content is usually mid-animation when it gets measured: a scale
//! transition or a translate is applied through its computed `transform`.
//! The placement engine needs the box the element *would* have without that
//! transform, so this module applies a transform to a layout box (what a
//! renderer reports as the bounding rect) and algebraically un-applies it
//! again (what the engine measures).
//!
//! ## Convention
//!
//! Only the scale and translation components of a matrix are honoured:
//! - `matrix(a, b, c, d, e, f)`: scale `(a, d)`, translation `(e, f)`
//! - `matrix3d(m0 .. m15)`: scale `(m0, m5)`, translation `(m12, m13)`
//!
//! Skew and rotation terms are ignored. The transform origin is given in
//! pixels relative to the element's top-left corner.

use crate::parser::{OriginPoint, TransformSpec};

use super::types::{BoundingBox, Point, Size};

/// Scale and translation around a transform origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleTranslate {
    /// Horizontal scale factor
    pub scale_x: f64,
    /// Vertical scale factor
    pub scale_y: f64,
    /// Translation applied after scaling
    pub translate: Point,
    /// Transform origin relative to the element's top-left corner
    pub origin: Point,
}

impl ScaleTranslate {
    /// Create a new transform.
    pub fn new(scale_x: f64, scale_y: f64, translate: Point, origin: Point) -> Self {
        Self {
            scale_x,
            scale_y,
            translate,
            origin,
        }
    }

    /// Extract scale and translation from a computed transform value.
    ///
    /// Returns `None` for `transform: none`.
    pub fn from_spec(spec: &TransformSpec, origin: OriginPoint) -> Option<Self> {
        let origin = Point::new(origin.x, origin.y);
        match spec {
            TransformSpec::None => None,
            TransformSpec::Matrix(m) => Some(Self::new(m[0], m[3], Point::new(m[4], m[5]), origin)),
            TransformSpec::Matrix3d(m) => {
                Some(Self::new(m[0], m[5], Point::new(m[12], m[13]), origin))
            }
        }
    }

    /// Check if this is effectively a no-op.
    pub fn is_identity(&self) -> bool {
        (self.scale_x - 1.0).abs() < f64::EPSILON
            && (self.scale_y - 1.0).abs() < f64::EPSILON
            && self.translate.x.abs() < f64::EPSILON
            && self.translate.y.abs() < f64::EPSILON
    }

    /// Box a renderer reports for an element laid out at `layout`.
    ///
    /// ```text
    /// x' = x + tx + (1 - sx) * ox
    /// w' = w * sx
    /// ```
    pub fn apply(&self, layout: &BoundingBox) -> BoundingBox {
        if self.is_identity() {
            return *layout;
        }

        let x = layout.x + self.translate.x + (1.0 - self.scale_x) * self.origin.x;
        let y = layout.y + self.translate.y + (1.0 - self.scale_y) * self.origin.y;
        let width = layout.width * self.scale_x;
        let height = layout.height * self.scale_y;

        // A negative scale mirrors the box around its origin
        BoundingBox::new(
            x.min(x + width),
            y.min(y + height),
            width.abs(),
            height.abs(),
        )
    }

    /// Recover the untransformed layout box from a rendered bounding rect.
    ///
    /// A zero scale collapses the rendered box, so the extent falls back to
    /// the element's offset size plus one pixel.
    pub fn unapply(&self, rendered: &BoundingBox, offset_size: Size) -> BoundingBox {
        if self.is_identity() {
            return *rendered;
        }

        let x = rendered.x - self.translate.x - (1.0 - self.scale_x) * self.origin.x;
        let y = rendered.y - self.translate.y - (1.0 - self.scale_y) * self.origin.y;
        let width = if self.scale_x != 0.0 {
            rendered.width / self.scale_x.abs()
        } else {
            offset_size.width + 1.0
        };
        let height = if self.scale_y != 0.0 {
            rendered.height / self.scale_y.abs()
        } else {
            offset_size.height + 1.0
        };

        BoundingBox::new(x, y, width, height)
    }
}
