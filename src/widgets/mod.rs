//! Built-in widgets: one per registry tag.
//!
//! Widgets are stateless unit structs; all per-node state lives in
//! [`NodeData`](crate::dom::NodeData) props. Grouped radios share the
//! session-owned [`RadioGroups`] table.

pub mod container;
pub mod text;
pub mod image;
pub mod button;
pub mod input;
pub mod toggle;

pub use container::Container;
pub use text::Text;
pub use image::Image;
pub use button::Button;
pub use input::{Input, Select, Slider};
pub use toggle::{Checkbox, ColorPicker, Radio, RadioGroups, Switch};

/// Label font size used by labelled controls.
pub(crate) const LABEL_FONT_SIZE: f32 = 14.0;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::widget::{AssetTable, MeasureContext, MonospaceMetrics};

    /// Run `f` with a monospace context (advance 0.5, default font 16px).
    pub fn with_ctx<R>(assets: &AssetTable, f: impl FnOnce(&MeasureContext<'_>) -> R) -> R {
        let metrics = MonospaceMetrics::default();
        let ctx = MeasureContext {
            text: &metrics,
            assets,
            font_size: 16.0,
        };
        f(&ctx)
    }
}
