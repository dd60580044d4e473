//! In-memory document
//!
//! A small rendering surface for headless hosts and tests. Elements have a
//! static layout box and natural content size; inline styles move and clamp
//! them the way a browser would for an absolutely positioned element:
//!
//! - `left`/`top` offset from the static position, `right` offsets leftwards
//! - `min-width`/`max-width` clamp the width, wrapping content reflows
//! - `max-height` clamps the height and makes the rest scrollable
//! - the computed transform is applied last
//!
//! Time advances explicitly with [`Document::advance_frame`]: frame callbacks
//! run first, then resize notifications for every observed element whose
//! size changed.

mod element;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::mem;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::layout::surface::{InlineOffsets, Measurable, OverflowStyle, Surface, Unsubscribe};
use crate::layout::transform::ScaleTranslate;
use crate::layout::types::{BoundingBox, Point, Size};
use crate::parser::{parse_length, parse_transform, parse_transform_origin};
use crate::renderer::config::DEFAULT_ANCHOR_PROPERTY;
use crate::renderer::StyleDirective;

pub use element::{ElementId, ElementSpec};

/// Resize notifications delivered within one frame before the rest waits
/// for the next one
const MAX_RESIZE_DEPTH: usize = 4;

/// Inline properties written by [`Document::apply_style`]
const MANAGED_PROPERTIES: [&str; 8] = [
    DEFAULT_ANCHOR_PROPERTY,
    "transform-origin",
    "top",
    "left",
    "right",
    "min-width",
    "max-width",
    "max-height",
];

type ResizeCallback = Rc<RefCell<Box<dyn FnMut()>>>;

struct Node {
    parent: Option<ElementId>,
    spec: ElementSpec,
    style: BTreeMap<String, String>,
}

struct Observer {
    id: u64,
    element: ElementId,
    last: Size,
    callback: ResizeCallback,
}

struct DocumentInner {
    nodes: Vec<Node>,
    body_scroll: Point,
    frame: u64,
    frame_callbacks: Vec<Box<dyn FnOnce(u64)>>,
    observers: Vec<Observer>,
    next_observer: u64,
}

impl DocumentInner {
    fn node(&self, id: ElementId) -> &Node {
        &self.nodes[id.0]
    }

    fn length(&self, id: ElementId, property: &str) -> Option<f64> {
        self.node(id)
            .style
            .get(property)
            .and_then(|value| parse_length(value).ok())
    }

    /// Laid-out size with inline clamps applied
    fn size(&self, id: ElementId) -> Size {
        let node = self.node(id);
        if node.spec.hidden {
            return Size::default();
        }

        let mut width = node.spec.width;
        if let Some(max) = self.length(id, "max-width") {
            width = width.min(max);
        }
        if let Some(min) = self.length(id, "min-width") {
            width = width.max(min);
        }

        let mut height = node.spec.height_at(width);
        if let Some(max) = self.length(id, "max-height") {
            height = height.min(max);
        }
        Size::new(width, height)
    }

    /// Laid-out box with inline offsets applied, before the transform
    fn layout_box(&self, id: ElementId) -> BoundingBox {
        let node = self.node(id);
        if node.spec.hidden {
            return BoundingBox::zero();
        }

        let x = match (self.length(id, "left"), self.length(id, "right")) {
            (Some(left), _) => node.spec.x + left,
            (None, Some(right)) => node.spec.x - right,
            (None, None) => node.spec.x,
        };
        let y = node.spec.y + self.length(id, "top").unwrap_or(0.0);
        let size = self.size(id);
        BoundingBox::new(x, y, size.width, size.height)
    }

    fn transform_origin(&self, id: ElementId) -> String {
        match &self.node(id).spec.transform_origin {
            Some(origin) => origin.clone(),
            None => {
                let size = self.size(id);
                format!("{}px {}px", size.width / 2.0, size.height / 2.0)
            }
        }
    }

    fn rect(&self, id: ElementId) -> BoundingBox {
        let layout = self.layout_box(id);
        let Some(transform) = &self.node(id).spec.transform else {
            return layout;
        };
        let (Ok(spec), Ok(origin)) = (
            parse_transform(transform),
            parse_transform_origin(&self.transform_origin(id)),
        ) else {
            return layout;
        };
        match ScaleTranslate::from_spec(&spec, origin) {
            Some(t) => t.apply(&layout),
            None => layout,
        }
    }

    fn scroll_size(&self, id: ElementId) -> Size {
        let node = self.node(id);
        if let Some(size) = node.spec.scroll_size {
            return size;
        }
        let size = self.size(id);
        let width = if node.spec.wrap {
            size.width
        } else {
            size.width.max(node.spec.width)
        };
        let height = size.height.max(node.spec.height_at(size.width));
        Size::new(width, height)
    }
}

/// A shared handle to an in-memory document
#[derive(Clone)]
pub struct Document {
    inner: Rc<RefCell<DocumentInner>>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Document")
            .field("elements", &inner.nodes.len())
            .field("frame", &inner.frame)
            .field("observers", &inner.observers.len())
            .finish()
    }
}

impl Document {
    /// Create a document whose root element fills a viewport of `viewport`
    pub fn new(viewport: Size) -> Self {
        let root = Node {
            parent: None,
            spec: ElementSpec::new(0.0, 0.0, viewport.width, viewport.height),
            style: BTreeMap::new(),
        };
        Self {
            inner: Rc::new(RefCell::new(DocumentInner {
                nodes: vec![root],
                body_scroll: Point::default(),
                frame: 0,
                frame_callbacks: Vec::new(),
                observers: Vec::new(),
                next_observer: 0,
            })),
        }
    }

    /// The root element
    pub fn document_element(&self) -> ElementId {
        ElementId(0)
    }

    /// Add an element under `parent`, or under the root when `None`
    pub fn append(&self, parent: Option<ElementId>, spec: ElementSpec) -> ElementId {
        let mut inner = self.inner.borrow_mut();
        let id = ElementId(inner.nodes.len());
        inner.nodes.push(Node {
            parent: Some(parent.unwrap_or(ElementId(0))),
            spec,
            style: BTreeMap::new(),
        });
        id
    }

    /// Resize the viewport
    pub fn set_viewport(&self, size: Size) {
        let mut inner = self.inner.borrow_mut();
        inner.nodes[0].spec.width = size.width;
        inner.nodes[0].spec.height = size.height;
    }

    pub fn set_body_scroll(&self, scroll: Point) {
        self.inner.borrow_mut().body_scroll = scroll;
    }

    /// Move an element's static position
    pub fn set_position(&self, el: ElementId, x: f64, y: f64) {
        let mut inner = self.inner.borrow_mut();
        let spec = &mut inner.nodes[el.0].spec;
        spec.x = x;
        spec.y = y;
    }

    /// Change an element's natural content size
    pub fn set_size(&self, el: ElementId, width: f64, height: f64) {
        let mut inner = self.inner.borrow_mut();
        let spec = &mut inner.nodes[el.0].spec;
        spec.width = width;
        spec.height = height;
    }

    pub fn set_hidden(&self, el: ElementId, hidden: bool) {
        self.inner.borrow_mut().nodes[el.0].spec.hidden = hidden;
    }

    /// Set or remove an inline style property
    pub fn set_inline(&self, el: ElementId, property: &str, value: Option<&str>) {
        let mut inner = self.inner.borrow_mut();
        let style = &mut inner.nodes[el.0].style;
        match value {
            Some(value) => {
                style.insert(property.to_string(), value.to_string());
            }
            None => {
                style.remove(property);
            }
        }
    }

    /// Current value of an inline style property
    pub fn inline(&self, el: ElementId, property: &str) -> Option<String> {
        self.inner.borrow().node(el).style.get(property).cloned()
    }

    /// Replace the positioning styles of `el` with `directive`
    pub fn apply_style(&self, el: ElementId, directive: &StyleDirective) {
        let mut inner = self.inner.borrow_mut();
        let style = &mut inner.nodes[el.0].style;
        for property in MANAGED_PROPERTIES {
            style.remove(property);
        }
        for (property, value) in directive.declarations(DEFAULT_ANCHOR_PROPERTY) {
            style.insert(property.to_string(), value.to_string());
        }
    }

    /// A listener that applies every published directive to `el`
    pub fn styler(&self, el: ElementId) -> impl FnMut(&StyleDirective) + 'static {
        let document = self.clone();
        move |directive| document.apply_style(el, directive)
    }

    /// Run frame callbacks, then deliver resize notifications
    ///
    /// Returns the index of the frame that was produced.
    pub fn advance_frame(&self) -> u64 {
        let (frame, callbacks) = {
            let mut inner = self.inner.borrow_mut();
            inner.frame += 1;
            (inner.frame, mem::take(&mut inner.frame_callbacks))
        };
        trace!(frame, callbacks = callbacks.len(), "advancing frame");
        for callback in callbacks {
            callback(frame);
        }
        self.deliver_resizes();
        frame
    }

    /// Advance `count` frames
    pub fn advance_frames(&self, count: usize) {
        for _ in 0..count {
            self.advance_frame();
        }
    }

    /// Number of frame callbacks waiting for the next frame
    pub fn pending_frames(&self) -> usize {
        self.inner.borrow().frame_callbacks.len()
    }

    fn deliver_resizes(&self) {
        for _ in 0..MAX_RESIZE_DEPTH {
            let changed: Vec<ResizeCallback> = {
                let mut inner = self.inner.borrow_mut();
                let sizes: Vec<Size> = inner
                    .observers
                    .iter()
                    .map(|observer| inner.size(observer.element))
                    .collect();
                inner
                    .observers
                    .iter_mut()
                    .zip(sizes)
                    .filter_map(|(observer, size)| {
                        if observer.last == size {
                            return None;
                        }
                        observer.last = size;
                        Some(observer.callback.clone())
                    })
                    .collect()
            };
            if changed.is_empty() {
                return;
            }
            for callback in changed {
                (callback.borrow_mut())();
            }
        }
    }

    fn observe(&self, el: ElementId, callback: Box<dyn FnMut()>) -> Unsubscribe {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_observer;
            inner.next_observer += 1;
            let last = inner.size(el);
            inner.observers.push(Observer {
                id,
                element: el,
                last,
                callback: Rc::new(RefCell::new(callback)),
            });
            id
        };

        let weak: Weak<RefCell<DocumentInner>> = Rc::downgrade(&self.inner);
        Unsubscribe::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().observers.retain(|o| o.id != id);
            }
        })
    }

    /// Number of active resize observations
    pub fn observer_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }
}

/// Measurement handle for one element of a [`Document`]
#[derive(Debug, Clone)]
pub struct ElementRef {
    document: Document,
    id: ElementId,
}

impl Measurable for ElementRef {
    fn get_box(&self) -> BoundingBox {
        self.document.inner.borrow().rect(self.id)
    }

    fn on_resize(&self, callback: Box<dyn FnMut()>) -> Unsubscribe {
        self.document.observe(self.id, callback)
    }
}

impl Surface for Document {
    type Element = ElementId;
    type Handle = ElementRef;

    fn measure(&self, el: ElementId) -> ElementRef {
        ElementRef {
            document: self.clone(),
            id: el,
        }
    }

    fn root(&self) -> Option<ElementId> {
        Some(self.document_element())
    }

    fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.inner.borrow().node(el).parent
    }

    fn client_size(&self, el: ElementId) -> Size {
        self.inner.borrow().size(el)
    }

    fn scroll_size(&self, el: ElementId) -> Size {
        self.inner.borrow().scroll_size(el)
    }

    fn offset_size(&self, el: ElementId) -> Size {
        self.inner.borrow().size(el)
    }

    fn overflow_y(&self, el: ElementId) -> OverflowStyle {
        self.inner.borrow().node(el).spec.overflow_y
    }

    fn transform(&self, el: ElementId) -> String {
        self.inner
            .borrow()
            .node(el)
            .spec
            .transform
            .clone()
            .unwrap_or_else(|| "none".to_string())
    }

    fn transform_origin(&self, el: ElementId) -> String {
        self.inner.borrow().transform_origin(el)
    }

    fn inline_offsets(&self, el: ElementId) -> InlineOffsets {
        let inner = self.inner.borrow();
        let style = &inner.node(el).style;
        InlineOffsets {
            left: style.get("left").cloned(),
            top: style.get("top").cloned(),
            right: style.get("right").cloned(),
        }
    }

    fn is_rendered(&self, el: ElementId) -> bool {
        !self.inner.borrow().node(el).spec.hidden
    }

    fn body_scroll(&self) -> Point {
        self.inner.borrow().body_scroll
    }

    fn frame(&self) -> u64 {
        self.inner.borrow().frame
    }

    fn request_frame(&self, callback: Box<dyn FnOnce(u64)>) {
        self.inner.borrow_mut().frame_callbacks.push(callback);
    }
}
