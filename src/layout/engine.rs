//! Placement engine
//!
//! Given the target box, the content's intrinsic box and the viewport, this
//! module finds where the content goes:
//!
//! 1. **Attach**: move the content so its origin point touches the target's
//!    anchor point, then apply the main/cross offsets.
//! 2. **Flip**: for each overflowing axis not yet flipped, try the mirrored
//!    placement. It is accepted if it overflows no more on either side of that
//!    axis, or if its total overflow is under half the original. Accepting a
//!    flip restarts from step 1.
//! 3. **Shift**: slide the content back inside the viewport on each side that
//!    still overflows.
//! 4. **Size**: measure the space left for the content and keep its leading
//!    edges visible.
//!
//! Flipping is bounded by [`PlacementConfig::max_resets`]; when the bound is
//! hit the last placement is shifted and sized without further flipping and
//! the outcome is reported as non-convergent.
//!
//! Everything here is pure: the overflow measurement goes through the
//! [`OverflowProbe`] trait so it can be replaced in tests.

use tracing::trace;

use super::anchor::{Anchor, Placement};
use super::config::PlacementConfig;
use super::error::PlacementError;
use super::props::{OffsetPair, SizeLimits};
use super::types::{overflow, Axis, BoundingBox, Overflow, Point, Size};

/// Measurements and preferences for one resolution pass
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementInput {
    /// Box of the element the content attaches to
    pub target: BoundingBox,
    /// Content box with previous positioning and transforms removed
    pub content: BoundingBox,
    /// Visible region the content must stay inside
    pub viewport: BoundingBox,
    /// Placement to try first
    pub preferred: Placement,
    pub offset: OffsetPair,
    pub limits: SizeLimits,
}

/// Result of checking one candidate placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    /// Overflow of the attached content against the viewport
    pub overflow: Overflow,
    /// Translation that attaches the content for this placement
    pub delta: Point,
}

/// Measures how a candidate placement overflows
pub trait OverflowProbe {
    fn check(&self, placement: &Placement, content: &BoundingBox) -> Probe;
}

/// The real overflow measurement against a target box and viewport
#[derive(Debug, Clone, Copy)]
pub struct GeometricProbe<'a> {
    input: &'a PlacementInput,
}

impl<'a> GeometricProbe<'a> {
    pub fn new(input: &'a PlacementInput) -> Self {
        Self { input }
    }
}

impl OverflowProbe for GeometricProbe<'_> {
    fn check(&self, placement: &Placement, content: &BoundingBox) -> Probe {
        let target_point = placement.anchor.to_point(&self.input.target);
        let content_point = placement.origin.to_point(content);
        let attach = target_point.offset_from(content_point);

        let main = placement.anchor.side.direction();
        let cross = placement.anchor.align.direction();
        let delta = Point::new(
            attach.x + main.x * self.input.offset.main + cross.x * self.input.offset.cross,
            attach.y + main.y * self.input.offset.main + cross.y * self.input.offset.cross,
        );

        let mut attached = content.translate(delta);
        attached.width = attached.width.min(self.input.limits.max_width);
        attached.height = attached.height.min(self.input.limits.max_height);

        Probe {
            overflow: overflow(&attached, &self.input.viewport),
            delta,
        }
    }
}

/// Axes that were flipped during a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Flipped {
    pub x: bool,
    pub y: bool,
}

impl Flipped {
    pub fn get(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    fn set(&mut self, axis: Axis) {
        match axis {
            Axis::X => self.x = true,
            Axis::Y => self.y = true,
        }
    }
}

/// Final placement and geometry of a resolution pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub placement: Placement,
    /// Total translation applied to the intrinsic content box
    pub translation: Point,
    /// Content box after translation
    pub content: BoundingBox,
    /// Space left inside the viewport for the content
    pub available: Size,
    pub flipped: Flipped,
    /// Number of flip restarts taken
    pub resets: usize,
}

impl Resolution {
    /// Whether the content needs more height than it was given
    pub fn is_height_clamped(&self) -> bool {
        self.content.height > self.available.height
    }
}

/// Tagged result of a resolution pass
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Converged(Resolution),
    /// The flip bound was hit; the resolution is a best effort
    NonConvergent(Resolution),
}

impl Outcome {
    pub fn resolution(&self) -> &Resolution {
        match self {
            Outcome::Converged(r) | Outcome::NonConvergent(r) => r,
        }
    }

    pub fn into_resolution(self) -> Resolution {
        match self {
            Outcome::Converged(r) | Outcome::NonConvergent(r) => r,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, Outcome::Converged(_))
    }

    /// Treat non-convergence as an error carrying the best-effort resolution
    pub fn strict(self) -> Result<Resolution, PlacementError> {
        match self {
            Outcome::Converged(r) => Ok(r),
            Outcome::NonConvergent(r) => Err(PlacementError::NonConvergent {
                resets: r.resets,
                best_effort: Box::new(r),
            }),
        }
    }
}

/// Resolve a placement with the geometric overflow probe
pub fn compute(input: &PlacementInput, config: &PlacementConfig) -> Outcome {
    compute_with(input, &GeometricProbe::new(input), config)
}

/// Resolve a placement with a custom overflow probe
pub fn compute_with(
    input: &PlacementInput,
    probe: &impl OverflowProbe,
    config: &PlacementConfig,
) -> Outcome {
    let mut placement = input.preferred;
    let mut content = input.content;
    let mut translation = Point::default();
    let mut flipped = Flipped::default();
    let mut resets = 0;
    let mut converged = true;

    loop {
        let Probe { overflow: current, delta } = probe.check(&placement, &content);
        translation = translation.translate(delta);
        content = content.translate(delta);

        if converged {
            if let Some(next) = flip(&placement, &current, &content, &mut flipped, probe) {
                placement = next;
                resets += 1;
                if resets > config.max_resets {
                    converged = false;
                }
                continue;
            }
        }

        // Shift back inside on each side that overflows
        let shift = Point::new(
            current.x.before - current.x.after,
            current.y.before - current.y.after,
        );
        translation = translation.translate(shift);
        content = content.translate(shift);

        let remaining = overflow(&content, &input.viewport);
        let available = Size::new(
            input.viewport.width - remaining.x.total(),
            input.viewport.height - remaining.y.total(),
        );

        // Content larger than the viewport keeps its leading edges visible
        let push = Point::new(remaining.x.before, remaining.y.before);
        translation = translation.translate(push);
        content = content.translate(push);

        let resolution = Resolution {
            placement,
            translation,
            content,
            available,
            flipped,
            resets,
        };
        return if converged {
            Outcome::Converged(resolution)
        } else {
            Outcome::NonConvergent(resolution)
        };
    }
}

/// Try mirrored placements for each overflowing axis
///
/// The flip for an axis is chosen relative to the anchor's own axis: overflow
/// along the anchor's axis flips the side, overflow across it flips the
/// alignment. Every candidate is compared with the unflipped overflow.
fn flip(
    placement: &Placement,
    current: &Overflow,
    content: &BoundingBox,
    flipped: &mut Flipped,
    probe: &impl OverflowProbe,
) -> Option<Placement> {
    let anchor_axis = placement.anchor.axis();
    let mut result = *placement;
    let mut accepted = false;

    for axis in Axis::BOTH {
        let before = current.axis(axis);
        if !before.is_overflowing() || flipped.get(axis) {
            continue;
        }

        let mirror: fn(Anchor) -> Anchor = if axis == anchor_axis {
            Anchor::flip_side
        } else {
            Anchor::flip_align
        };
        let candidate = result.map(mirror);
        // center sides and aligns mirror onto themselves
        if candidate == result {
            continue;
        }
        let after = probe.check(&candidate, content).overflow.axis(axis);

        let no_worse = after.before <= before.before && after.after <= before.after;
        let much_better = after.total() < before.total() / 2.0;
        trace!(
            ?axis,
            anchor = %candidate.anchor,
            before = before.total(),
            after = after.total(),
            accepted = no_worse || much_better,
            "flip candidate"
        );
        if no_worse || much_better {
            result = candidate;
            flipped.set(axis);
            accepted = true;
        }
    }

    accepted.then_some(result)
}
