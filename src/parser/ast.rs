//! Syntax trees for placement descriptors
//!
//! Descriptors are the small string values a floating element is configured
//! with: anchor locations, origins, offsets, CSS lengths and the computed
//! transform of the content element.

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A single side or alignment keyword as written, before RTL resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKeyword {
    Top,
    Bottom,
    Left,
    Right,
    Center,
    /// Logical inline start (left in LTR, right in RTL)
    Start,
    /// Logical inline end (right in LTR, left in RTL)
    End,
}

impl AnchorKeyword {
    /// Keyword text as it appears in a descriptor
    pub fn as_str(&self) -> &'static str {
        match self {
            AnchorKeyword::Top => "top",
            AnchorKeyword::Bottom => "bottom",
            AnchorKeyword::Left => "left",
            AnchorKeyword::Right => "right",
            AnchorKeyword::Center => "center",
            AnchorKeyword::Start => "start",
            AnchorKeyword::End => "end",
        }
    }

    /// Whether the keyword names a block-axis side (`top`/`bottom`)
    pub fn is_block(&self) -> bool {
        matches!(self, AnchorKeyword::Top | AnchorKeyword::Bottom)
    }

    /// Whether the keyword names an inline-axis side, physical or logical
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            AnchorKeyword::Left | AnchorKeyword::Right | AnchorKeyword::Start | AnchorKeyword::End
        )
    }

    /// Whether the keyword is logical and needs the writing direction to resolve
    pub fn is_logical(&self) -> bool {
        matches!(self, AnchorKeyword::Start | AnchorKeyword::End)
    }
}

/// `side [align]`
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorSpec {
    pub side: Spanned<AnchorKeyword>,
    pub align: Option<Spanned<AnchorKeyword>>,
}

/// Where the content attaches relative to the anchor point
#[derive(Debug, Clone, PartialEq)]
pub enum OriginSpec {
    /// Opposite side of the anchor
    Auto,
    /// Same point as the anchor
    Overlap,
    /// Explicit anchor spec
    Anchor(AnchorSpec),
}

/// `main [cross]`, whitespace or comma separated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetSpec {
    pub main: f64,
    pub cross: Option<f64>,
}

/// A computed `transform` value
#[derive(Debug, Clone, PartialEq)]
pub enum TransformSpec {
    /// `none`
    None,
    /// `matrix(a, b, c, d, e, f)`
    Matrix([f64; 6]),
    /// `matrix3d(...)` with sixteen column-major values
    Matrix3d([f64; 16]),
}

/// A computed `transform-origin` value in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OriginPoint {
    pub x: f64,
    pub y: f64,
}
