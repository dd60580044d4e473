//! Placement inputs as supplied by a floating component, and their
//! normalization into the values the engine works with.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ParseError;
use crate::parser::{parse_anchor_spec, parse_length, parse_offset, parse_origin_spec, OriginSpec};

use super::anchor::{parse_anchor, resolve_spec, Anchor, Placement};

/// How a floating element is positioned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationStrategy {
    /// Not positioned by the engine; the element keeps its own layout
    Static,
    /// Attached to the target and kept inside the viewport
    #[default]
    Connected,
}

/// An offset as written: a number, a `[main, cross]` pair or a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OffsetValue {
    Number(f64),
    Pair([f64; 2]),
    Text(String),
}

impl From<f64> for OffsetValue {
    fn from(value: f64) -> Self {
        OffsetValue::Number(value)
    }
}

impl From<(f64, f64)> for OffsetValue {
    fn from((main, cross): (f64, f64)) -> Self {
        OffsetValue::Pair([main, cross])
    }
}

impl From<&str> for OffsetValue {
    fn from(value: &str) -> Self {
        OffsetValue::Text(value.to_string())
    }
}

/// A size constraint as written: a number of pixels or a CSS length string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeValue {
    Number(f64),
    Text(String),
}

impl SizeValue {
    /// Pixel value, or `+inf` when the value does not parse
    pub fn pixels(&self) -> f64 {
        match self {
            SizeValue::Number(n) if n.is_nan() => f64::INFINITY,
            SizeValue::Number(n) => *n,
            SizeValue::Text(text) => parse_length(text).unwrap_or(f64::INFINITY),
        }
    }
}

impl From<f64> for SizeValue {
    fn from(value: f64) -> Self {
        SizeValue::Number(value)
    }
}

impl From<&str> for SizeValue {
    fn from(value: &str) -> Self {
        SizeValue::Text(value.to_string())
    }
}

/// Offset split into its main-axis and cross-axis components
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OffsetPair {
    /// Distance along the anchor side's direction
    pub main: f64,
    /// Distance along the anchor alignment's direction
    pub cross: f64,
}

/// Size constraints in pixels; unset limits are `+inf`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeLimits {
    pub min_width: f64,
    pub min_height: f64,
    pub max_width: f64,
    pub max_height: f64,
}

impl SizeLimits {
    pub const UNBOUNDED: SizeLimits = SizeLimits {
        min_width: f64::INFINITY,
        min_height: f64::INFINITY,
        max_width: f64::INFINITY,
        max_height: f64::INFINITY,
    };
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// A descriptor that does not parse and falls back to its default
#[derive(Debug)]
pub struct DescriptorError {
    /// Name of the prop holding the descriptor
    pub field: &'static str,
    pub source: String,
    pub errors: Vec<ParseError>,
}

impl DescriptorError {
    /// Render every error with source context
    pub fn report(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.format(&self.source, self.field))
            .collect()
    }
}

/// Everything a floating component configures about its placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementProps {
    pub strategy: LocationStrategy,
    /// Preferred anchor on the target, `"side [align]"`
    pub location: String,
    /// `"auto"`, `"overlap"` or an anchor on the content
    pub origin: String,
    pub offset: Option<OffsetValue>,
    pub min_width: Option<SizeValue>,
    pub min_height: Option<SizeValue>,
    pub max_width: Option<SizeValue>,
    pub max_height: Option<SizeValue>,
    /// Right-to-left writing direction
    #[serde(alias = "rtl")]
    pub is_rtl: bool,
}

impl Default for PlacementProps {
    fn default() -> Self {
        Self {
            strategy: LocationStrategy::Connected,
            location: "bottom".to_string(),
            origin: "auto".to_string(),
            offset: None,
            min_width: None,
            min_height: None,
            max_width: None,
            max_height: None,
            is_rtl: false,
        }
    }
}

impl PlacementProps {
    /// Create props with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: LocationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn with_offset(mut self, offset: impl Into<OffsetValue>) -> Self {
        self.offset = Some(offset.into());
        self
    }

    pub fn with_min_width(mut self, value: impl Into<SizeValue>) -> Self {
        self.min_width = Some(value.into());
        self
    }

    pub fn with_min_height(mut self, value: impl Into<SizeValue>) -> Self {
        self.min_height = Some(value.into());
        self
    }

    pub fn with_max_width(mut self, value: impl Into<SizeValue>) -> Self {
        self.max_width = Some(value.into());
        self
    }

    pub fn with_max_height(mut self, value: impl Into<SizeValue>) -> Self {
        self.max_height = Some(value.into());
        self
    }

    pub fn with_rtl(mut self, is_rtl: bool) -> Self {
        self.is_rtl = is_rtl;
        self
    }

    /// Preferred anchor/origin pair before any flipping
    ///
    /// Combinations that would map the content onto the anchor's own corner
    /// are corner-flipped.
    pub fn preferred_placement(&self) -> Placement {
        let anchor = parse_anchor(&self.location, self.is_rtl);
        let origin = match parse_origin_spec(&self.origin) {
            Ok(OriginSpec::Overlap) => anchor,
            Ok(OriginSpec::Auto) => anchor.flip_side(),
            Ok(OriginSpec::Anchor(spec)) => resolve_spec(&spec, self.is_rtl),
            Err(_) => {
                debug!(descriptor = %self.origin, "malformed origin, using center");
                Anchor::CENTER
            }
        };

        let placement = Placement::new(anchor, origin);
        if anchor.side == origin.side && anchor.align == origin.flip_align().align {
            placement.map(Anchor::flip_corner)
        } else {
            placement
        }
    }

    /// Offset as `(main, cross)`; missing or malformed offsets are zero
    pub fn offset_pair(&self) -> OffsetPair {
        let pair = match &self.offset {
            None => OffsetPair::default(),
            Some(OffsetValue::Number(main)) => OffsetPair {
                main: *main,
                cross: 0.0,
            },
            Some(OffsetValue::Pair([main, cross])) => OffsetPair {
                main: *main,
                cross: *cross,
            },
            Some(OffsetValue::Text(text)) => match parse_offset(text) {
                Ok(spec) => OffsetPair {
                    main: spec.main,
                    cross: spec.cross.unwrap_or(0.0),
                },
                Err(_) => {
                    debug!(descriptor = %text, "malformed offset, using zero");
                    OffsetPair::default()
                }
            },
        };

        let finite = |value: f64| {
            if value.is_finite() {
                value
            } else {
                debug!(value, "non-finite offset, using zero");
                0.0
            }
        };
        OffsetPair {
            main: finite(pair.main),
            cross: finite(pair.cross),
        }
    }

    /// Descriptors that will be replaced by their defaults
    pub fn descriptor_errors(&self) -> Vec<DescriptorError> {
        let mut found = Vec::new();
        let mut check = |field: &'static str, source: &str, result: Result<(), Vec<ParseError>>| {
            if let Err(errors) = result {
                found.push(DescriptorError {
                    field,
                    source: source.to_string(),
                    errors,
                });
            }
        };

        check("location", &self.location, parse_anchor_spec(&self.location).map(drop));
        check("origin", &self.origin, parse_origin_spec(&self.origin).map(drop));
        if let Some(OffsetValue::Text(text)) = &self.offset {
            check("offset", text, parse_offset(text).map(drop));
        }
        let sizes = [
            ("min_width", &self.min_width),
            ("min_height", &self.min_height),
            ("max_width", &self.max_width),
            ("max_height", &self.max_height),
        ];
        for (field, value) in sizes {
            if let Some(SizeValue::Text(text)) = value {
                check(field, text, parse_length(text).map(drop));
            }
        }
        found
    }

    /// Size constraints in pixels
    pub fn size_limits(&self) -> SizeLimits {
        let pixels = |value: &Option<SizeValue>| {
            value
                .as_ref()
                .map(SizeValue::pixels)
                .unwrap_or(f64::INFINITY)
        };
        SizeLimits {
            min_width: pixels(&self.min_width),
            min_height: pixels(&self.min_height),
            max_width: pixels(&self.max_width),
            max_height: pixels(&self.max_height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::anchor::Side;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_bottom_auto() {
        let placement = PlacementProps::default().preferred_placement();
        assert_eq!(placement.anchor, Anchor::new(Side::Bottom, Side::Center));
        assert_eq!(placement.origin, Anchor::new(Side::Top, Side::Center));
    }

    #[test]
    fn test_overlap_origin_matches_anchor() {
        let placement = PlacementProps::new()
            .with_location("top start")
            .with_origin("overlap")
            .preferred_placement();
        assert_eq!(placement.anchor, placement.origin);
        assert_eq!(placement.anchor, Anchor::new(Side::Top, Side::Left));
    }

    #[test]
    fn test_explicit_origin_is_rtl_resolved() {
        let placement = PlacementProps::new()
            .with_location("bottom end")
            .with_origin("top end")
            .with_rtl(true)
            .preferred_placement();
        assert_eq!(placement.anchor, Anchor::new(Side::Bottom, Side::Left));
        assert_eq!(placement.origin, Anchor::new(Side::Top, Side::Left));
    }

    #[test]
    fn test_degenerate_pair_is_corner_flipped() {
        // origin's mirrored alignment lands on the anchor's own corner
        let placement = PlacementProps::new()
            .with_location("top left")
            .with_origin("top right")
            .preferred_placement();
        assert_eq!(placement.anchor, Anchor::new(Side::Left, Side::Top));
        assert_eq!(placement.origin, Anchor::new(Side::Right, Side::Top));
    }

    #[test]
    fn test_malformed_origin_is_center() {
        let placement = PlacementProps::new()
            .with_origin("somewhere")
            .preferred_placement();
        assert_eq!(placement.origin, Anchor::CENTER);
    }

    #[test]
    fn test_offset_shapes() {
        assert_eq!(PlacementProps::new().offset_pair(), OffsetPair::default());
        assert_eq!(
            PlacementProps::new().with_offset(8.0).offset_pair(),
            OffsetPair { main: 8.0, cross: 0.0 }
        );
        assert_eq!(
            PlacementProps::new().with_offset((8.0, -2.0)).offset_pair(),
            OffsetPair { main: 8.0, cross: -2.0 }
        );
        assert_eq!(
            PlacementProps::new().with_offset("4 6").offset_pair(),
            OffsetPair { main: 4.0, cross: 6.0 }
        );
        assert_eq!(
            PlacementProps::new().with_offset("4").offset_pair(),
            OffsetPair { main: 4.0, cross: 0.0 }
        );
        assert_eq!(
            PlacementProps::new().with_offset("far").offset_pair(),
            OffsetPair::default()
        );
    }

    #[test]
    fn test_non_finite_offsets_are_zero() {
        assert_eq!(
            PlacementProps::new().with_offset(f64::NAN).offset_pair(),
            OffsetPair::default()
        );
        assert_eq!(
            PlacementProps::new().with_offset(f64::INFINITY).offset_pair(),
            OffsetPair::default()
        );
        assert_eq!(
            PlacementProps::new().with_offset((6.0, f64::NAN)).offset_pair(),
            OffsetPair { main: 6.0, cross: 0.0 }
        );
        assert_eq!(
            PlacementProps::new().with_offset("1e999 2").offset_pair(),
            OffsetPair { main: 0.0, cross: 2.0 }
        );
    }

    #[test]
    fn test_size_limits() {
        let limits = PlacementProps::new()
            .with_min_width(120.0)
            .with_max_height("300px")
            .with_max_width("wide")
            .size_limits();
        assert_eq!(limits.min_width, 120.0);
        assert_eq!(limits.max_height, 300.0);
        assert_eq!(limits.max_width, f64::INFINITY);
        assert_eq!(limits.min_height, f64::INFINITY);
    }

    #[test]
    fn test_descriptor_errors() {
        assert!(PlacementProps::new().descriptor_errors().is_empty());

        let props = PlacementProps::new()
            .with_location("top bottom")
            .with_offset("4 x")
            .with_max_height("tall");
        let errors = props.descriptor_errors();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["location", "offset", "max_height"]);
        assert!(errors[0].report().contains("location"));
    }

    #[test]
    fn test_props_from_toml() {
        let props: PlacementProps = toml::from_str(
            r#"
location = "top end"
offset = [8, 2]
max_height = "240px"
min_width = 100
rtl = true
"#,
        )
        .unwrap();
        assert_eq!(props.location, "top end");
        assert_eq!(props.origin, "auto");
        assert_eq!(props.offset, Some(OffsetValue::Pair([8.0, 2.0])));
        assert_eq!(props.max_height, Some(SizeValue::Text("240px".to_string())));
        assert_eq!(props.min_width, Some(SizeValue::Number(100.0)));
        assert!(props.is_rtl);
    }
}
