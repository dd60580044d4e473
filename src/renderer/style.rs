//! The style record applied to floating content

use serde::Serialize;

use crate::layout::engine::Resolution;
use crate::layout::props::SizeLimits;
use crate::layout::types::{Axis, BoundingBox};

/// Inline styles that position floating content
///
/// Every value is a CSS length (`"<n>px"`) or a keyword pair, or `None` when
/// the property is left unconstrained. Exactly one of `left`/`right` is set
/// for a positioned element.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct StyleDirective {
    /// `"side align"` of the anchor on the target, for dependent elements
    /// such as arrows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform_origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<String>,
}

impl StyleDirective {
    /// Build the directive for a resolved placement
    pub fn from_resolution(
        resolution: &Resolution,
        target: &BoundingBox,
        limits: &SizeLimits,
        is_rtl: bool,
        device_pixel_ratio: f64,
    ) -> Self {
        let placement = resolution.placement;
        let Resolution {
            translation,
            available,
            ..
        } = *resolution;

        let min_width = if placement.anchor.axis() == Axis::Y {
            limits.min_width.min(target.width)
        } else {
            limits.min_width
        };
        let floor = |min: f64| if min.is_finite() { min } else { 0.0 };
        let max_width = pixel_ceil(
            clamp(available.width, floor(limits.min_width), limits.max_width),
            device_pixel_ratio,
        );
        let max_height = pixel_ceil(
            clamp(available.height, floor(limits.min_height), limits.max_height),
            device_pixel_ratio,
        );

        let horizontal = if is_rtl {
            -translation.x
        } else {
            translation.x
        };
        let horizontal = to_px(pixel_round(horizontal, device_pixel_ratio));

        Self {
            anchor_origin: Some(placement.anchor.to_string()),
            transform_origin: Some(placement.origin.to_string()),
            top: to_px(pixel_round(translation.y, device_pixel_ratio)),
            left: if is_rtl { None } else { horizontal.clone() },
            right: if is_rtl { horizontal } else { None },
            min_width: to_px(min_width),
            max_width: to_px(max_width),
            max_height: to_px(max_height),
        }
    }

    /// Whether no property is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Set properties as `(name, value)` pairs in a fixed order
    ///
    /// The anchor marker is reported under `anchor_property`.
    pub fn declarations<'a>(&'a self, anchor_property: &'a str) -> Vec<(&'a str, &'a str)> {
        [
            (anchor_property, &self.anchor_origin),
            ("transform-origin", &self.transform_origin),
            ("top", &self.top),
            ("left", &self.left),
            ("right", &self.right),
            ("min-width", &self.min_width),
            ("max-width", &self.max_width),
            ("max-height", &self.max_height),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
        .collect()
    }
}

/// `min(max(value, min), max)` where the lower bound wins a conflict
fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Round to the nearest device pixel
pub fn pixel_round(value: f64, device_pixel_ratio: f64) -> f64 {
    (value * device_pixel_ratio).round() / device_pixel_ratio
}

/// Round up to the next device pixel
pub fn pixel_ceil(value: f64, device_pixel_ratio: f64) -> f64 {
    (value * device_pixel_ratio).ceil() / device_pixel_ratio
}

/// Format a pixel length; non-finite values are unconstrained
pub fn to_px(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    // Avoid emitting "-0px"
    let value = if value == 0.0 { 0.0 } else { value };
    Some(format!("{}px", value))
}
