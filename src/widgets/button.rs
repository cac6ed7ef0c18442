//! Button widget: a labelled push button.

use crate::dom::NodeData;
use crate::geometry::Size;
use crate::widget::traits::{MeasureContext, MeasureError, Widget};
use crate::widgets::LABEL_FONT_SIZE;

const MIN_WIDTH: f32 = 100.0;
const HEIGHT: f32 = 40.0;
/// Labels at least this wide grow the button past its minimum width.
const GROW_THRESHOLD: f32 = 58.0;
const LABEL_PADDING: f32 = 42.0;

/// A push button sized around its `label`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Button;

impl Widget for Button {
    fn measure(&self, node: &NodeData, ctx: &MeasureContext<'_>) -> Result<Size, MeasureError> {
        let label = ctx.prop_width(node, "label", LABEL_FONT_SIZE);
        let width = if label >= GROW_THRESHOLD {
            label + LABEL_PADDING
        } else {
            MIN_WIDTH
        };
        Ok(Size::new(width, HEIGHT))
    }
}
