//! Text widget: a single run of `content` at the node's font size.

use crate::dom::NodeData;
use crate::geometry::Size;
use crate::widget::traits::{MeasureContext, MeasureError, Widget};

/// Static text. Sized to the measured `content` width and one line of
/// `font-size` height.
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl Widget for Text {
    fn measure(&self, node: &NodeData, ctx: &MeasureContext<'_>) -> Result<Size, MeasureError> {
        let font_size = ctx.font_size_of(node);
        Ok(Size::new(ctx.prop_width(node, "content", font_size), font_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::specificity::Specificity;
    use crate::widget::{AssetTable, Tag};
    use crate::widgets::test_support::with_ctx;

    #[test]
    fn default_font_size() {
        let node = NodeData::new(Tag::Text).with_prop("content", "hello");
        let size = with_ctx(&AssetTable::new(), |ctx| Text.measure(&node, ctx));
        assert_eq!(size, Ok(Size::new(40.0, 16.0)));
    }

    #[test]
    fn styled_font_size() {
        let mut node = NodeData::new(Tag::Text).with_prop("content", "hi");
        node.style.apply("font-size", "30px", Specificity::new(0, 1, 0));
        let size = with_ctx(&AssetTable::new(), |ctx| Text.measure(&node, ctx));
        assert_eq!(size, Ok(Size::new(30.0, 30.0)));
    }

    #[test]
    fn numeric_content_is_displayed() {
        let node = NodeData::new(Tag::Text).with_prop("content", 1234);
        let size = with_ctx(&AssetTable::new(), |ctx| Text.measure(&node, ctx));
        assert_eq!(size, Ok(Size::new(32.0, 16.0)));
    }

    #[test]
    fn missing_content_is_empty() {
        let node = NodeData::new(Tag::Text);
        let size = with_ctx(&AssetTable::new(), |ctx| Text.measure(&node, ctx));
        assert_eq!(size, Ok(Size::new(0.0, 16.0)));
    }
}
