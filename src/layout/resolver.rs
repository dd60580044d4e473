//! Stateful placement resolution against a live surface

use tracing::{debug, error};

use crate::renderer::StyleDirective;

use super::config::PlacementConfig;
use super::engine::{compute, Outcome, PlacementInput, Resolution};
use super::measure::{intrinsic_size, target_box, Target};
use super::props::{LocationStrategy, PlacementProps};
use super::surface::Surface;
use super::types::BoundingBox;
use super::viewport::{resolve_viewport, scroll_parents};

/// Resolves where floating content goes and owns the emitted directive
#[derive(Debug, Clone)]
pub struct PlacementResolver {
    props: PlacementProps,
    config: PlacementConfig,
    last_target: Option<BoundingBox>,
    last_resolution: Option<Resolution>,
    directive: StyleDirective,
}

impl PlacementResolver {
    pub fn new(props: PlacementProps, config: PlacementConfig) -> Self {
        Self {
            props,
            config,
            last_target: None,
            last_resolution: None,
            directive: StyleDirective::default(),
        }
    }

    pub fn props(&self) -> &PlacementProps {
        &self.props
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Replace the placement props; takes effect on the next update
    pub fn set_props(&mut self, props: PlacementProps) {
        self.props = props;
    }

    /// The most recently emitted directive
    pub fn directive(&self) -> &StyleDirective {
        &self.directive
    }

    /// The most recent resolution, if the content was positioned
    pub fn last_resolution(&self) -> Option<&Resolution> {
        self.last_resolution.as_ref()
    }

    /// Measure, resolve and emit a new directive
    ///
    /// Returns `None` when the strategy does not position the content; the
    /// directive is then empty.
    pub fn update_location<S: Surface>(
        &mut self,
        surface: &S,
        target: &Target<S::Element>,
        content: S::Element,
    ) -> Option<Resolution> {
        if self.props.strategy == LocationStrategy::Static {
            self.directive = StyleDirective::default();
            self.last_resolution = None;
            return None;
        }

        let target_box = target_box(surface, target, self.last_target);
        self.last_target = Some(target_box);

        let is_rtl = self.props.is_rtl;
        let mut content_box = intrinsic_size(surface, content, is_rtl);

        let parents = scroll_parents(surface, content);
        if parents.is_empty() && !surface.inline_offsets(content).is_positioned() {
            let scroll = surface.body_scroll();
            content_box.x -= scroll.x;
            content_box.y -= scroll.y;
        }
        let viewport = resolve_viewport(surface, &parents, self.config.viewport_margin);

        let limits = self.props.size_limits();
        let input = PlacementInput {
            target: target_box,
            content: content_box,
            viewport,
            preferred: self.props.preferred_placement(),
            offset: self.props.offset_pair(),
            limits,
        };

        let resolution = match compute(&input, &self.config) {
            Outcome::Converged(resolution) => resolution,
            Outcome::NonConvergent(resolution) => {
                error!(
                    resets = resolution.resets,
                    anchor = %resolution.placement.anchor,
                    "infinite loop detected while positioning floating content, keeping last placement"
                );
                resolution
            }
        };
        debug!(
            anchor = %resolution.placement.anchor,
            origin = %resolution.placement.origin,
            x = resolution.translation.x,
            y = resolution.translation.y,
            "resolved placement"
        );

        self.directive = StyleDirective::from_resolution(
            &resolution,
            &target_box,
            &limits,
            is_rtl,
            self.config.device_pixel_ratio,
        );
        self.last_resolution = Some(resolution);
        Some(resolution)
    }
}
