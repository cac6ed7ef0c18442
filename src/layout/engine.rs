//! Flex layout over the DOM.
//!
//! [`LayoutEngine`] measures every node's intrinsic size, fixes the root box to
//! the viewport, then arranges each container's children top-down. Every pass
//! recomputes child boxes from styles and intrinsic sizes alone, so running it
//! twice without intervening changes gives identical boxes.
//!
//! Boxes are margin boxes. Explicit `width`/`height` styles are border-box
//! sizes; a node's content area is its box inset by margin, border and padding.

use std::fmt;

use crate::css::scalar::{border_width, parse_edges, Scalar};
use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;
use crate::geometry::{Dim, Edge, Edges, LayoutBox, Size};
use crate::layout::axis::{Align, Axes, Distribute, FlexDirection, FlexWrap};
use crate::layout::line::{place_cross, place_main, split_lines, FlexItem};
use crate::widget::{AssetSizes, AssetTable, MeasureContext, MeasureError, MonospaceMetrics, TextMetrics};

/// Default font size when a text node has no `font-size` style.
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

/// Errors from a layout pass.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("node {0:?} is not in the tree")]
    MissingNode(NodeId),
    #[error(transparent)]
    Measure(#[from] MeasureError),
}

/// Computes absolute boxes for a styled tree.
pub struct LayoutEngine {
    viewport: Size,
    font_size: f32,
    text: Box<dyn TextMetrics>,
    assets: Box<dyn AssetSizes>,
}

impl fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("viewport", &self.viewport)
            .field("font_size", &self.font_size)
            .finish_non_exhaustive()
    }
}

impl LayoutEngine {
    /// Create an engine for `viewport` with monospace text metrics and no
    /// known assets.
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            font_size: DEFAULT_FONT_SIZE,
            text: Box::new(MonospaceMetrics::default()),
            assets: Box::new(AssetTable::new()),
        }
    }

    /// Use `metrics` to measure text (builder).
    pub fn with_text_metrics(mut self, metrics: impl TextMetrics + 'static) -> Self {
        self.text = Box::new(metrics);
        self
    }

    /// Use `assets` for image natural sizes (builder).
    pub fn with_assets(mut self, assets: impl AssetSizes + 'static) -> Self {
        self.assets = Box::new(assets);
        self
    }

    /// Set the fallback font size (builder).
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    /// The current viewport.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Change the viewport. Takes effect on the next [`layout`](Self::layout).
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Measure and arrange every node under `root`.
    pub fn layout(&self, dom: &mut Dom, root: NodeId) -> Result<(), LayoutError> {
        let _span = tracing::debug_span!("layout", viewport = ?self.viewport).entered();

        if !dom.contains(root) {
            return Err(LayoutError::MissingNode(root));
        }
        self.measure(dom, root)?;

        let root_box = dom
            .get(root)
            .map(|data| self.root_box(data))
            .ok_or(LayoutError::MissingNode(root))?;
        if let Some(data) = dom.get_mut(root) {
            data.layout = root_box;
        }

        let mut pending = vec![root];
        while let Some(node) = pending.pop() {
            self.arrange(dom, node, node == root)?;
            for &child in dom.children(node).iter().rev() {
                if dom.has_children(child) {
                    pending.push(child);
                }
            }
        }
        Ok(())
    }

    /// Seed `intrinsic` on every node under `root` from its widget.
    pub fn measure(&self, dom: &mut Dom, root: NodeId) -> Result<(), LayoutError> {
        let ctx = MeasureContext {
            text: self.text.as_ref(),
            assets: self.assets.as_ref(),
            font_size: self.font_size,
        };
        for id in dom.walk_depth_first(root) {
            let Some(data) = dom.get(id) else { continue };
            let size = data.tag.widget().measure(data, &ctx).map_err(|err| {
                tracing::error!(tag = %data.tag, error = %err, "measurement failed");
                err
            })?;
            if let Some(data) = dom.get_mut(id) {
                data.intrinsic = Some(size);
            }
        }
        Ok(())
    }

    /// The root fills the viewport unless it has explicit sizes.
    fn root_box(&self, data: &NodeData) -> LayoutBox {
        let margin = self.edges(data, "margin");
        let viewport = self.viewport;
        let width = self
            .explicit(data, Dim::Width, Some(viewport))
            .map(|w| w + margin.along(Dim::Width))
            .unwrap_or(viewport.width);
        let height = self
            .explicit(data, Dim::Height, Some(viewport))
            .map(|h| h + margin.along(Dim::Height))
            .unwrap_or(viewport.height);
        LayoutBox::from_size(Size::new(width, height))
    }

    /// Lay out the direct children of one container inside its current box.
    fn arrange(&self, dom: &mut Dom, node: NodeId, is_root: bool) -> Result<(), LayoutError> {
        let children = dom.children(node).to_vec();
        if children.is_empty() {
            return Ok(());
        }
        let data = dom.get(node).ok_or(LayoutError::MissingNode(node))?;
        let style = &data.style;

        let wrap = FlexWrap::parse(style.get("flex-wrap"));
        let axes = Axes::new(FlexDirection::parse(style.get("flex-direction")), wrap);
        let justify = Distribute::parse(style.get("justify-content"));
        let align_content = Distribute::parse(style.get("align-content"));
        let align_items = style.get("align-items");
        let insets = self.insets(data);
        let mut frame = data.layout;

        let content = Size::new(
            (frame.width - insets.along(Dim::Width)).max(0.0),
            (frame.height - insets.along(Dim::Height)).max(0.0),
        );

        // Children in `order`, ties in document order.
        let mut entries: Vec<(i32, NodeId, FlexItem)> = Vec::with_capacity(children.len());
        for &child in &children {
            let Some(cdata) = dom.get(child) else { continue };
            let item = FlexItem {
                main: self.outer_size(dom, child, axes.main, Some(content)),
                cross: self.outer_size(dom, child, axes.cross, Some(content)),
                flex: number(cdata.style.get("flex")).unwrap_or(0.0).max(0.0),
                stretchable: self.explicit(cdata, axes.cross, Some(content)).is_none(),
                align: Align::resolve(cdata.style.get("align-self"), align_items),
                main_pos: 0.0,
                cross_pos: 0.0,
            };
            let order = number(cdata.style.get("order")).map(|o| o as i32).unwrap_or(0);
            entries.push((order, child, item));
        }
        entries.sort_by_key(|(order, ..)| *order);
        let (ids, mut items): (Vec<NodeId>, Vec<FlexItem>) =
            entries.into_iter().map(|(_, id, item)| (id, item)).unzip();

        // Main axis.
        let content_main = content.get(axes.main);
        let lines = split_lines(&mut items, content_main, wrap);
        let main_base = base(&frame, &insets, axes.main_start, axes.main_sign);
        for line in &lines {
            place_main(line, &mut items, main_base, axes.main_sign, content_main, justify);
        }

        // Cross axis: an unsized container grows to hold all its lines.
        let explicit_cross = is_root || has_explicit(data, axes.cross);
        if !explicit_cross {
            let needed: f32 =
                lines.iter().map(|l| l.cross_space).sum::<f32>() + insets.along(axes.cross);
            if needed > frame.dim(axes.cross) {
                let (start, end) = axes.cross.edges();
                frame.set_dim(axes.cross, needed);
                frame.set_edge(end, frame.edge(start) + needed);
            }
        }
        let content_cross = (frame.dim(axes.cross) - insets.along(axes.cross)).max(0.0);
        let cross_base = base(&frame, &insets, axes.cross_start, axes.cross_sign);
        place_cross(&lines, &mut items, cross_base, axes.cross_sign, content_cross, align_content);

        tracing::trace!(?node, lines = lines.len(), children = ids.len(), "arranged container");

        if let Some(data) = dom.get_mut(node) {
            data.layout = frame;
        }
        for (id, item) in ids.into_iter().zip(items) {
            let mut bx = LayoutBox::default();
            bx.set_dim(axes.main, item.main);
            bx.set_edge(axes.main_start, item.main_pos);
            bx.set_edge(axes.main_end, item.main_pos + axes.main_sign * item.main);
            bx.set_dim(axes.cross, item.cross);
            bx.set_edge(axes.cross_start, item.cross_pos);
            bx.set_edge(axes.cross_end, item.cross_pos + axes.cross_sign * item.cross);
            if let Some(child) = dom.get_mut(id) {
                child.layout = bx;
            }
        }
        Ok(())
    }

    /// Margin-box extent of `node` along `dim` before flexing.
    ///
    /// Explicit sizes win; leaves fall back to their intrinsic size and
    /// containers to their children's extents (summed along their own main
    /// axis, maxed across it) plus their insets.
    fn outer_size(&self, dom: &Dom, node: NodeId, dim: Dim, reference: Option<Size>) -> f32 {
        let Some(data) = dom.get(node) else { return 0.0 };
        let margin = self.edges(data, "margin").along(dim);
        if let Some(size) = self.explicit(data, dim, reference) {
            return size + margin;
        }
        if !data.tag.is_container() {
            return data.intrinsic.map(|s| s.get(dim)).unwrap_or(0.0) + margin;
        }

        let direction = FlexDirection::parse(data.style.get("flex-direction"));
        let main = Axes::new(direction, FlexWrap::NoWrap).main;
        let extents = dom
            .children(node)
            .iter()
            .map(|&child| self.outer_size(dom, child, dim, None));
        let inner = if dim == main {
            extents.sum::<f32>()
        } else {
            extents.fold(0.0, f32::max)
        };
        inner + self.insets(data).along(dim)
    }

    /// Explicit border-box size along `dim`, resolved in pixels.
    ///
    /// Percentages resolve against `reference`; without one they count as
    /// unset, as do `auto` and unparseable values.
    fn explicit(&self, data: &NodeData, dim: Dim, reference: Option<Size>) -> Option<f32> {
        data.style
            .get(dim.name())
            .and_then(Scalar::parse)
            .and_then(|s| s.resolve(self.viewport, reference.map(|r| r.get(dim))))
    }

    /// Margin, border and padding combined.
    fn insets(&self, data: &NodeData) -> Edges {
        let border = match data.style.get("border-width") {
            Some(width) => parse_edges(width, self.viewport, None),
            None => Edges::all(
                data.style
                    .get("border")
                    .map(|b| border_width(b, self.viewport))
                    .unwrap_or(0.0),
            ),
        };
        self.edges(data, "margin") + border + self.edges(data, "padding")
    }

    fn edges(&self, data: &NodeData, property: &str) -> Edges {
        data.style
            .get(property)
            .map(|v| parse_edges(v, self.viewport, None))
            .unwrap_or(Edges::ZERO)
    }
}

/// Whether a size style is present and not `auto`/garbage.
fn has_explicit(data: &NodeData, dim: Dim) -> bool {
    data.style
        .get(dim.name())
        .and_then(Scalar::parse)
        .is_some_and(|s| !s.is_auto())
}

/// Content-box origin on one axis: the start edge moved inwards.
fn base(frame: &LayoutBox, insets: &Edges, start: Edge, sign: f32) -> f32 {
    frame.edge(start) + sign * insets.side(start)
}

/// First token of a numeric style (`flex: 2`, `flex: 1 1 auto`, `order: -1`).
fn number(value: Option<&str>) -> Option<f32> {
    value?
        .split_whitespace()
        .next()?
        .parse::<f32>()
        .ok()
        .filter(|n| n.is_finite())
}
