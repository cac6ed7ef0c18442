//! Session configuration.

use crate::geometry::Size;
use crate::layout::DEFAULT_FONT_SIZE;
use crate::reactive::DEFAULT_MAX_DEPTH;
use crate::widget::AssetTable;

/// Configuration for a [`Session`](super::Session).
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Initial viewport size.
    pub viewport: Size,
    /// Bound on nested write notifications before a write cycle is reported.
    pub max_notify_depth: usize,
    /// Font size for text without a `font-size` style.
    pub font_size: f32,
    /// Natural sizes of image assets.
    pub assets: AssetTable,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(800.0, 600.0),
            max_notify_depth: DEFAULT_MAX_DEPTH,
            font_size: DEFAULT_FONT_SIZE,
            assets: AssetTable::new(),
        }
    }
}

impl SessionConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewport (builder).
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Size::new(width, height);
        self
    }

    /// Set the notification depth bound (builder).
    pub fn with_max_notify_depth(mut self, depth: usize) -> Self {
        self.max_notify_depth = depth;
        self
    }

    /// Set the default font size (builder).
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Register an image asset's natural size (builder).
    pub fn with_asset(mut self, path: impl Into<String>, size: Size) -> Self {
        self.assets.insert(path, size);
        self
    }
}
