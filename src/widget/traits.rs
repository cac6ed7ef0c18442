//! Widget trait and the measurement context it runs against.
//!
//! Every tag in the registry maps to a [`Widget`], which reports the node's
//! intrinsic content size before layout. Text metrics and asset dimensions
//! are collaborators supplied by the host through [`TextMetrics`] and
//! [`AssetSizes`].

use std::collections::HashMap;

use crate::css::scalar::Scalar;
use crate::dom::NodeData;
use crate::geometry::Size;

/// Errors from intrinsic measurement.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeasureError {
    #[error("no natural size known for asset '{path}'")]
    MissingAsset { path: String },
    #[error("<{tag}> requires the '{prop}' prop")]
    MissingProp { tag: &'static str, prop: &'static str },
}

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Measures rendered text width.
pub trait TextMetrics {
    /// Width in pixels of `text` drawn at `font_size`.
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

/// Fixed advance per character, as a fraction of the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub advance: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self { advance: 0.5 }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * self.advance * font_size
    }
}

/// Natural dimensions of loaded image assets.
pub trait AssetSizes {
    fn natural_size(&self, path: &str) -> Option<Size>;
}

/// In-memory asset dimension table.
#[derive(Debug, Clone, Default)]
pub struct AssetTable {
    sizes: HashMap<String, Size>,
}

impl AssetTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset's natural size (builder).
    pub fn with_asset(mut self, path: impl Into<String>, size: Size) -> Self {
        self.sizes.insert(path.into(), size);
        self
    }

    /// Register an asset's natural size.
    pub fn insert(&mut self, path: impl Into<String>, size: Size) {
        self.sizes.insert(path.into(), size);
    }
}

impl AssetSizes for AssetTable {
    fn natural_size(&self, path: &str) -> Option<Size> {
        self.sizes.get(path).copied()
    }
}

// ---------------------------------------------------------------------------
// MeasureContext
// ---------------------------------------------------------------------------

/// Inputs shared by every measurement in one layout pass.
pub struct MeasureContext<'a> {
    pub text: &'a dyn TextMetrics,
    pub assets: &'a dyn AssetSizes,
    /// Font size used when a node has no `font-size` style.
    pub font_size: f32,
}

impl<'a> MeasureContext<'a> {
    /// Font size for `node`: its `font-size` style in px, or the default.
    pub fn font_size_of(&self, node: &NodeData) -> f32 {
        node.style
            .get("font-size")
            .and_then(Scalar::parse)
            .and_then(|s| s.resolve(Size::ZERO, None))
            .filter(|fs| *fs > 0.0)
            .unwrap_or(self.font_size)
    }

    /// Width of a text prop at `font_size`; a missing prop measures as empty.
    pub fn prop_width(&self, node: &NodeData, prop: &str, font_size: f32) -> f32 {
        node.prop_text(prop)
            .map(|text| self.text.text_width(&text, font_size))
            .unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Per-tag behaviour. Object-safe so the registry can hand out
/// `&'static dyn Widget`.
pub trait Widget {
    /// Whether nodes of this kind may hold children.
    fn is_container(&self) -> bool {
        false
    }

    /// Intrinsic content size of `node` (margin excluded).
    ///
    /// Explicit `width`/`height` styles still take precedence in layout; this
    /// is what the node would be without them.
    fn measure(&self, node: &NodeData, ctx: &MeasureContext<'_>) -> Result<Size, MeasureError>;
}
