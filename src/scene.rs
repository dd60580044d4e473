//! Scene files
//!
//! A scene describes a document, the element floating content attaches to,
//! the content itself and its placement props, in TOML:
//!
//! ```toml
//! target = "button"
//! content = "menu"
//!
//! [viewport]
//! width = 800
//! height = 600
//!
//! [[element]]
//! id = "button"
//! x = 100
//! y = 560
//! width = 80
//! height = 24
//!
//! [[element]]
//! id = "menu"
//! width = 160
//! height = 200
//!
//! [props]
//! location = "bottom start"
//! ```
//!
//! `target` is an element id, a list of ids, or an `[x, y]` point.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::dom::{Document, ElementId, ElementSpec};
use crate::layout::{
    OverflowStyle, PlacementConfig, PlacementProps, Point, ResizeWatcher, Size, Target,
};
use crate::renderer::CssConfig;

/// Errors that can occur when loading a scene
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read scene file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse scene TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("unknown element '{0}'")]
    UnknownElement(String),
    #[error("element '{0}' is defined more than once")]
    DuplicateElement(String),
}

/// TOML structure for deserializing scenes
#[derive(Deserialize)]
struct TomlScene {
    viewport: TomlViewport,
    #[serde(default, rename = "element")]
    elements: Vec<TomlElement>,
    target: TomlTarget,
    content: String,
    #[serde(default)]
    props: PlacementProps,
    #[serde(default)]
    config: PlacementConfig,
    #[serde(default)]
    css: CssConfig,
}

#[derive(Deserialize)]
struct TomlViewport {
    width: f64,
    height: f64,
    #[serde(default)]
    body_scroll: Option<[f64; 2]>,
}

#[derive(Deserialize)]
struct TomlElement {
    id: String,
    parent: Option<String>,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    width: f64,
    height: f64,
    #[serde(default)]
    overflow: OverflowStyle,
    scroll_width: Option<f64>,
    scroll_height: Option<f64>,
    transform: Option<String>,
    transform_origin: Option<String>,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    wrap: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TomlTarget {
    Id(String),
    Point([f64; 2]),
    Ids(Vec<String>),
}

impl TomlElement {
    fn spec(&self) -> ElementSpec {
        let scroll_size = match (self.scroll_width, self.scroll_height) {
            (None, None) => None,
            (w, h) => Some(Size::new(
                w.unwrap_or(self.width),
                h.unwrap_or(self.height),
            )),
        };
        ElementSpec {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            overflow_y: self.overflow,
            scroll_size,
            transform: self.transform.clone(),
            transform_origin: self.transform_origin.clone(),
            hidden: self.hidden,
            wrap: self.wrap,
        }
    }
}

/// A loaded scene: a populated document plus what to place in it
#[derive(Debug, Clone)]
pub struct Scene {
    pub document: Document,
    /// Element ids by name
    pub elements: BTreeMap<String, ElementId>,
    pub target: Target<ElementId>,
    pub content: ElementId,
    pub props: PlacementProps,
    pub config: PlacementConfig,
    pub css: CssConfig,
}

impl Scene {
    /// Load a scene from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a scene from a TOML string
    pub fn from_str(content: &str) -> Result<Self, SceneError> {
        let parsed: TomlScene = toml::from_str(content)?;

        let document = Document::new(Size::new(parsed.viewport.width, parsed.viewport.height));
        if let Some([x, y]) = parsed.viewport.body_scroll {
            document.set_body_scroll(Point::new(x, y));
        }

        let mut elements = BTreeMap::new();
        for element in &parsed.elements {
            if elements.contains_key(&element.id) {
                return Err(SceneError::DuplicateElement(element.id.clone()));
            }
            let parent = element
                .parent
                .as_ref()
                .map(|name| lookup(&elements, name))
                .transpose()?;
            let id = document.append(parent, element.spec());
            elements.insert(element.id.clone(), id);
        }

        let target = match &parsed.target {
            TomlTarget::Id(name) => Target::Element(lookup(&elements, name)?),
            TomlTarget::Point([x, y]) => Target::Point(Point::new(*x, *y)),
            TomlTarget::Ids(names) => Target::Elements(
                names
                    .iter()
                    .map(|name| lookup(&elements, name))
                    .collect::<Result<_, _>>()?,
            ),
        };
        let content = lookup(&elements, &parsed.content)?;

        Ok(Scene {
            document,
            elements,
            target,
            content,
            props: parsed.props,
            config: parsed.config,
            css: parsed.css,
        })
    }

    /// Look up an element by name
    pub fn element(&self, name: &str) -> Option<ElementId> {
        self.elements.get(name).copied()
    }

    /// Connect a watcher that styles the content element on every pass
    pub fn mount(&self) -> ResizeWatcher<Document> {
        let watcher = ResizeWatcher::new(
            self.document.clone(),
            self.target.clone(),
            self.content,
            self.props.clone(),
            self.config.clone(),
        );
        watcher.on_update(self.document.styler(self.content));
        watcher.connect();
        watcher
    }
}

fn lookup(elements: &BTreeMap<String, ElementId>, name: &str) -> Result<ElementId, SceneError> {
    elements
        .get(name)
        .copied()
        .ok_or_else(|| SceneError::UnknownElement(name.to_string()))
}
