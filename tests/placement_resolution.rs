//! Integration tests for resolving placements against a document

use std::cell::Cell;

use overlay_placement::layout::{
    compute, compute_with, Axis, AxisOverflow, BoundingBox, Overflow, OverflowProbe, Placement,
    PlacementInput, Point, Probe, Side, Size, SizeLimits,
};
use overlay_placement::{
    Anchor, Document, ElementId, ElementSpec, PlacementConfig, PlacementProps, PlacementResolver,
    StyleDirective, Target,
};
use pretty_assertions::assert_eq;

fn document() -> Document {
    Document::new(Size::new(800.0, 600.0))
}

fn resolve(doc: &Document, target: ElementId, content: ElementId, props: PlacementProps) -> StyleDirective {
    let mut resolver = PlacementResolver::new(props, PlacementConfig::default());
    resolver.update_location(doc, &Target::Element(target), content);
    resolver.directive().clone()
}

fn px(value: &Option<String>) -> f64 {
    value
        .as_deref()
        .and_then(|v| v.strip_suffix("px"))
        .and_then(|v| v.parse().ok())
        .unwrap_or(f64::NAN)
}

fn below() -> Placement {
    Placement::new(
        Anchor::new(Side::Bottom, Side::Center),
        Anchor::new(Side::Top, Side::Center),
    )
}

fn below_start() -> Placement {
    Placement::new(
        Anchor::new(Side::Bottom, Side::Left),
        Anchor::new(Side::Top, Side::Left),
    )
}

#[test]
fn test_flips_above_target_near_viewport_bottom() {
    let doc = document();
    let target = doc.append(None, ElementSpec::new(300.0, 570.0, 100.0, 20.0));
    let content = doc.append(None, ElementSpec::new(0.0, 0.0, 100.0, 200.0));

    let directive = resolve(&doc, target, content, PlacementProps::new());
    assert_eq!(directive.anchor_origin.as_deref(), Some("top center"));
    assert_eq!(directive.transform_origin.as_deref(), Some("bottom center"));
    assert_eq!(directive.top.as_deref(), Some("370px"));
    assert_eq!(directive.left.as_deref(), Some("300px"));
}

#[test]
fn test_stays_below_when_there_is_room() {
    let doc = document();
    let target = doc.append(None, ElementSpec::new(300.0, 100.0, 100.0, 20.0));
    let content = doc.append(None, ElementSpec::new(0.0, 0.0, 100.0, 200.0));

    let directive = resolve(&doc, target, content, PlacementProps::new());
    assert_eq!(directive.anchor_origin.as_deref(), Some("bottom center"));
    assert_eq!(directive.top.as_deref(), Some("120px"));
    assert_eq!(directive.min_width.as_deref(), Some("100px"));
    assert_eq!(directive.max_width.as_deref(), Some("776px"));
    assert_eq!(directive.max_height.as_deref(), Some("576px"));
}

#[test]
fn test_same_inputs_give_identical_directives() {
    let doc = document();
    let target = doc.append(None, ElementSpec::new(250.0, 300.0, 60.0, 30.0));
    let content = doc.append(
        None,
        ElementSpec::new(0.0, 0.0, 180.0, 90.0)
            .with_transform("matrix(0.8, 0, 0, 0.8, 0, 0)", "90px 0px"),
    );
    let props = PlacementProps::new()
        .with_location("end center")
        .with_offset((6.0, -2.0));

    let mut resolver = PlacementResolver::new(props, PlacementConfig::default());
    resolver.update_location(&doc, &Target::Element(target), content);
    let first = resolver.directive().clone();
    resolver.update_location(&doc, &Target::Element(target), content);
    assert_eq!(resolver.directive(), &first);

    // applying the directive does not compound into the next pass
    doc.apply_style(content, &first);
    resolver.update_location(&doc, &Target::Element(target), content);
    assert_eq!(resolver.directive(), &first);
}

#[test]
fn test_rtl_positions_with_right() {
    let doc = document();
    let target = doc.append(None, ElementSpec::new(300.0, 100.0, 80.0, 20.0));
    // statically positioned against the right edge
    let content = doc.append(None, ElementSpec::new(680.0, 0.0, 120.0, 60.0));
    let props = PlacementProps::new()
        .with_location("bottom start")
        .with_rtl(true);

    let mut resolver = PlacementResolver::new(props, PlacementConfig::default());
    resolver.update_location(&doc, &Target::Element(target), content);
    let directive = resolver.directive().clone();
    assert_eq!(directive.anchor_origin.as_deref(), Some("bottom right"));
    assert_eq!(directive.transform_origin.as_deref(), Some("top right"));
    assert_eq!(directive.right.as_deref(), Some("420px"));
    assert_eq!(directive.left, None);

    doc.apply_style(content, &directive);
    resolver.update_location(&doc, &Target::Element(target), content);
    assert_eq!(resolver.directive(), &directive);
}

#[test]
fn test_size_props_bound_the_limits() {
    let doc = document();
    let target = doc.append(None, ElementSpec::new(300.0, 100.0, 100.0, 20.0));
    let content = doc.append(None, ElementSpec::new(0.0, 0.0, 100.0, 200.0));
    let props = PlacementProps::new()
        .with_min_width(150.0)
        .with_max_width("300px")
        .with_max_height(250.0);

    let directive = resolve(&doc, target, content, props);
    // the target is narrower than the requested minimum
    assert_eq!(directive.min_width.as_deref(), Some("100px"));
    assert_eq!(directive.max_width.as_deref(), Some("300px"));
    assert_eq!(directive.max_height.as_deref(), Some("250px"));
}

#[test]
fn test_shrinking_viewport_never_widens_content() {
    let doc = document();
    let target = doc.append(None, ElementSpec::new(40.0, 100.0, 60.0, 20.0));
    let content = doc.append(None, ElementSpec::new(0.0, 0.0, 300.0, 80.0));

    let mut previous = f64::INFINITY;
    for width in (100..=1000).rev().step_by(25) {
        doc.set_viewport(Size::new(width as f64, 600.0));
        let directive = resolve(&doc, target, content, PlacementProps::new());
        let max_width = px(&directive.max_width);
        assert!(
            max_width <= previous,
            "viewport {} gave max-width {} after {}",
            width,
            max_width,
            previous
        );
        previous = max_width;
    }
}

/// Overflows for the preferred placement, and twice as much for anything
/// else.
struct WorseEverywhere {
    preferred: Placement,
    calls: Cell<usize>,
}

impl OverflowProbe for WorseEverywhere {
    fn check(&self, placement: &Placement, _content: &BoundingBox) -> Probe {
        self.calls.set(self.calls.get() + 1);
        let amount = if *placement == self.preferred { 20.0 } else { 40.0 };
        let side = AxisOverflow {
            before: amount,
            after: amount,
        };
        Probe {
            overflow: Overflow { x: side, y: side },
            delta: Point::default(),
        }
    }
}

/// Reports every candidate as overflowing less than the last one.
struct AlwaysBetter {
    calls: Cell<usize>,
}

impl OverflowProbe for AlwaysBetter {
    fn check(&self, _placement: &Placement, _content: &BoundingBox) -> Probe {
        let call = self.calls.get();
        self.calls.set(call + 1);
        let side = AxisOverflow {
            before: 0.0,
            after: 100.0 / (call + 1) as f64,
        };
        Probe {
            overflow: Overflow { x: side, y: side },
            delta: Point::default(),
        }
    }
}

fn probe_input() -> PlacementInput {
    PlacementInput {
        target: BoundingBox::new(100.0, 100.0, 50.0, 20.0),
        content: BoundingBox::new(0.0, 0.0, 100.0, 100.0),
        viewport: BoundingBox::new(0.0, 0.0, 800.0, 600.0),
        preferred: below(),
        offset: Default::default(),
        limits: SizeLimits::UNBOUNDED,
    }
}

#[test]
fn test_rejected_flips_keep_the_original_placement() {
    let probe = WorseEverywhere {
        preferred: below_start(),
        calls: Cell::new(0),
    };
    let input = PlacementInput {
        preferred: below_start(),
        ..probe_input()
    };
    let outcome = compute_with(&input, &probe, &PlacementConfig::default());
    assert!(outcome.is_converged());
    let resolution = outcome.into_resolution();
    assert_eq!(resolution.placement, below_start());
    assert_eq!(resolution.resets, 0);
    assert!(probe.calls.get() <= 10);
}

#[test]
fn test_accepted_flips_are_bounded_per_axis() {
    let probe = AlwaysBetter {
        calls: Cell::new(0),
    };
    let input = PlacementInput {
        preferred: below_start(),
        ..probe_input()
    };
    let outcome = compute_with(&input, &probe, &PlacementConfig::default());
    assert!(outcome.is_converged());
    let resolution = outcome.into_resolution();
    assert!(resolution.flipped.get(Axis::X));
    assert!(resolution.flipped.get(Axis::Y));
    assert!(resolution.resets <= 2);
    assert!(probe.calls.get() <= 10);
}

#[test]
fn test_fitting_content_is_not_moved_by_shift() {
    let input = probe_input();
    let resolution = compute(&input, &PlacementConfig::default()).into_resolution();
    assert!(input.viewport.contains_box(&resolution.content));
    assert_eq!(resolution.content, BoundingBox::new(75.0, 120.0, 100.0, 100.0));
    assert_eq!(resolution.available, Size::new(800.0, 600.0));
}
