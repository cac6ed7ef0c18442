//! Fixed-size value controls: text input, select, slider.

use crate::dom::NodeData;
use crate::geometry::Size;
use crate::widget::traits::{MeasureContext, MeasureError, Widget};

/// Single-line text input, usually bound through `value="{path}"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Input;

impl Widget for Input {
    fn measure(&self, _node: &NodeData, _ctx: &MeasureContext<'_>) -> Result<Size, MeasureError> {
        Ok(Size::new(180.0, 40.0))
    }
}

/// Drop-down list over the `options` prop.
#[derive(Debug, Clone, Copy, Default)]
pub struct Select;

impl Widget for Select {
    fn measure(&self, _node: &NodeData, _ctx: &MeasureContext<'_>) -> Result<Size, MeasureError> {
        Ok(Size::new(240.0, 40.0))
    }
}

/// Horizontal range slider.
#[derive(Debug, Clone, Copy, Default)]
pub struct Slider;

impl Widget for Slider {
    fn measure(&self, _node: &NodeData, _ctx: &MeasureContext<'_>) -> Result<Size, MeasureError> {
        Ok(Size::new(300.0, 20.0))
    }
}
