//! Container widget: `div` and `template`.
//!
//! Containers have no content of their own. Their size is either styled or
//! aggregated from their children by the layout engine.

use crate::dom::NodeData;
use crate::geometry::Size;
use crate::widget::traits::{MeasureContext, MeasureError, Widget};

/// A flex container.
#[derive(Debug, Clone, Copy, Default)]
pub struct Container;

impl Widget for Container {
    fn is_container(&self) -> bool {
        true
    }

    fn measure(&self, _node: &NodeData, _ctx: &MeasureContext<'_>) -> Result<Size, MeasureError> {
        Ok(Size::ZERO)
    }
}
