//! Image widget: sized from the natural dimensions of its `path` asset.

use crate::dom::NodeData;
use crate::geometry::Size;
use crate::widget::traits::{MeasureContext, MeasureError, Widget};

/// A raster image.
#[derive(Debug, Clone, Copy, Default)]
pub struct Image;

impl Widget for Image {
    fn measure(&self, node: &NodeData, ctx: &MeasureContext<'_>) -> Result<Size, MeasureError> {
        // Both axes styled: the asset is never consulted.
        if node.style.contains("width") && node.style.contains("height") {
            return Ok(Size::ZERO);
        }
        let path = node.prop_text("path").ok_or(MeasureError::MissingProp {
            tag: "image",
            prop: "path",
        })?;
        ctx.assets
            .natural_size(&path)
            .ok_or(MeasureError::MissingAsset { path })
    }
}
