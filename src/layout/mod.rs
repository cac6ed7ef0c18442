//! Flex layout: axis mapping, line placement, and the tree-walking engine.

pub mod axis;
pub mod engine;
pub mod line;

pub use axis::{Align, Axes, Distribute, FlexDirection, FlexWrap};
pub use engine::{LayoutEngine, LayoutError, DEFAULT_FONT_SIZE};
pub use line::{FlexItem, FlexLine};
