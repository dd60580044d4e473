//! Keeping floating content placed while things change
//!
//! A [`ResizeWatcher`] owns a [`PlacementResolver`] for one target/content
//! pair. It re-resolves when either element changes size or the props
//! change, and publishes every new directive to its listeners.
//!
//! Three mechanisms keep this from feeding back on itself:
//!
//! - **Observe gate**: after each pass, resize notifications are ignored
//!   until the next frame, so the size change caused by applying the new
//!   style does not trigger another pass.
//! - **Flip history**: resize-triggered passes remember their `flipped`
//!   result. When the history is full and the latest result equals the one
//!   two passes earlier, placement is alternating between two states that
//!   resize the content, and the notification is dropped. The history is
//!   cleared whenever notifications stop arriving on consecutive frames.
//! - **Settle passes**: when the content did not fit the height it was
//!   given, the next frames re-resolve after reflow, up to
//!   [`PlacementConfig::settle_frames`] times.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::renderer::StyleDirective;

use super::config::PlacementConfig;
use super::engine::{Flipped, Resolution};
use super::measure::Target;
use super::props::PlacementProps;
use super::resolver::PlacementResolver;
use super::surface::{Measurable, Surface, Unsubscribe};

type Listener = Box<dyn FnMut(&StyleDirective)>;

struct WatchState<S: Surface> {
    surface: S,
    resolver: PlacementResolver,
    target: Target<S::Element>,
    content: S::Element,
    connected: bool,
    observe: bool,
    last_frame: Option<u64>,
    history: VecDeque<Flipped>,
    subscriptions: Vec<Unsubscribe>,
}

struct Shared<S: Surface> {
    state: RefCell<WatchState<S>>,
    listeners: RefCell<Vec<Listener>>,
}

/// Re-resolves a placement when its inputs change
///
/// Listeners run synchronously after each pass; they must not call back
/// into the watcher.
pub struct ResizeWatcher<S: Surface + 'static> {
    shared: Rc<Shared<S>>,
}

impl<S: Surface + 'static> ResizeWatcher<S> {
    pub fn new(
        surface: S,
        target: Target<S::Element>,
        content: S::Element,
        props: PlacementProps,
        config: PlacementConfig,
    ) -> Self {
        let history = VecDeque::with_capacity(config.flip_history);
        Self {
            shared: Rc::new(Shared {
                state: RefCell::new(WatchState {
                    surface,
                    resolver: PlacementResolver::new(props, config),
                    target,
                    content,
                    connected: false,
                    observe: false,
                    last_frame: None,
                    history,
                    subscriptions: Vec::new(),
                }),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Register a listener for published directives
    pub fn on_update(&self, listener: impl FnMut(&StyleDirective) + 'static) {
        self.shared.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Start observing and run the first pass
    pub fn connect(&self) -> Option<Resolution> {
        self.shared.state.borrow_mut().connected = true;
        subscribe(&self.shared);
        let resolution = update(&self.shared);
        settle(&self.shared, resolution.as_ref(), self.config().settle_frames);
        resolution
    }

    /// Stop observing; pending frame callbacks become no-ops
    pub fn disconnect(&self) {
        let subscriptions = {
            let mut state = self.shared.state.borrow_mut();
            state.connected = false;
            state.observe = false;
            std::mem::take(&mut state.subscriptions)
        };
        drop(subscriptions);
    }

    pub fn is_connected(&self) -> bool {
        self.shared.state.borrow().connected
    }

    /// Run a pass now and publish the result
    pub fn update(&self) -> Option<Resolution> {
        update(&self.shared)
    }

    /// Replace the props and re-resolve when they changed
    pub fn set_props(&self, props: PlacementProps) -> Option<Resolution> {
        {
            let mut state = self.shared.state.borrow_mut();
            if state.resolver.props() == &props {
                return state.resolver.last_resolution().copied();
            }
            state.resolver.set_props(props);
            if !state.connected {
                return None;
            }
        }
        update(&self.shared)
    }

    /// Attach to a different target
    pub fn set_target(&self, target: Target<S::Element>) -> Option<Resolution> {
        let connected = {
            let mut state = self.shared.state.borrow_mut();
            state.target = target;
            state.connected
        };
        if !connected {
            return None;
        }
        subscribe(&self.shared);
        let resolution = update(&self.shared);
        settle(&self.shared, resolution.as_ref(), self.config().settle_frames);
        resolution
    }

    /// The most recently published directive
    pub fn directive(&self) -> StyleDirective {
        self.shared.state.borrow().resolver.directive().clone()
    }

    /// The most recent resolution
    pub fn resolution(&self) -> Option<Resolution> {
        self.shared.state.borrow().resolver.last_resolution().copied()
    }

    pub fn config(&self) -> PlacementConfig {
        self.shared.state.borrow().resolver.config().clone()
    }
}

/// Observe the target element (if any) and the content
fn subscribe<S: Surface + 'static>(shared: &Rc<Shared<S>>) {
    let previous = std::mem::take(&mut shared.state.borrow_mut().subscriptions);
    drop(previous);

    let mut state = shared.state.borrow_mut();
    let elements = [state.target.element(), Some(state.content)];
    let subscriptions = elements
        .into_iter()
        .flatten()
        .map(|el| {
            let weak = Rc::downgrade(shared);
            state.surface.measure(el).on_resize(Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    on_resize(&shared);
                }
            }))
        })
        .collect();
    state.subscriptions = subscriptions;
}

/// Resolve, close the observe gate until the next frame, and publish
fn update<S: Surface + 'static>(shared: &Rc<Shared<S>>) -> Option<Resolution> {
    let (resolution, directive) = {
        let mut state = shared.state.borrow_mut();
        state.observe = false;
        let weak = Rc::downgrade(shared);
        state.surface.request_frame(Box::new(move |_| {
            if let Some(shared) = weak.upgrade() {
                shared.state.borrow_mut().observe = true;
            }
        }));

        let WatchState {
            surface,
            resolver,
            target,
            content,
            ..
        } = &mut *state;
        let resolution = resolver.update_location(surface, target, *content);
        (resolution, resolver.directive().clone())
    };

    for listener in shared.listeners.borrow_mut().iter_mut() {
        listener(&directive);
    }
    resolution
}

/// Schedule another pass while the content is taller than the space it got
fn settle<S: Surface + 'static>(
    shared: &Rc<Shared<S>>,
    resolution: Option<&Resolution>,
    remaining: usize,
) {
    let Some(resolution) = resolution else {
        return;
    };
    if remaining == 0 || !resolution.is_height_clamped() {
        return;
    }

    let weak: Weak<Shared<S>> = Rc::downgrade(shared);
    shared
        .state
        .borrow()
        .surface
        .request_frame(Box::new(move |frame| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            if !shared.state.borrow().connected {
                return;
            }
            trace!(frame, remaining, "settle pass");
            let resolution = update(&shared);
            settle(&shared, resolution.as_ref(), remaining - 1);
        }));
}

fn on_resize<S: Surface + 'static>(shared: &Rc<Shared<S>>) {
    let capacity = {
        let state = shared.state.borrow();
        if !state.observe {
            return;
        }
        trace!(frame = state.surface.frame(), "resize notification");

        // Notifications on consecutive frames keep the history
        let weak = Rc::downgrade(shared);
        state.surface.request_frame(Box::new(move |frame| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let mut state = shared.state.borrow_mut();
            if state.last_frame != Some(frame) {
                state.history.clear();
            }
            let weak = Rc::downgrade(&shared);
            state.surface.request_frame(Box::new(move |frame| {
                if let Some(shared) = weak.upgrade() {
                    shared.state.borrow_mut().last_frame = Some(frame);
                }
            }));
        }));

        let capacity = state.resolver.config().flip_history;
        let history = &state.history;
        let len = history.len();
        if capacity >= 3 && len >= capacity && history[len - 1] == history[len - 3] {
            debug!("flipping is causing a container resize loop, skipping update");
            return;
        }
        capacity
    };

    if let Some(resolution) = update(shared) {
        if capacity == 0 {
            return;
        }
        let mut state = shared.state.borrow_mut();
        if state.history.len() >= capacity {
            state.history.pop_front();
        }
        state.history.push_back(resolution.flipped);
    }
}
