//! Flex keywords and the main/cross axis mapping they imply.

use crate::geometry::{Dim, Edge};

/// `flex-direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

impl FlexDirection {
    /// Parse a keyword; unknown values fall back to `row`.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("row") => FlexDirection::Row,
            Some("row-reverse") => FlexDirection::RowReverse,
            Some("column") => FlexDirection::Column,
            Some("column-reverse") => FlexDirection::ColumnReverse,
            Some(other) => {
                tracing::warn!(value = other, "unknown flex-direction; using row");
                FlexDirection::Row
            }
        }
    }
}

/// `flex-wrap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexWrap {
    #[default]
    NoWrap,
    Wrap,
    WrapReverse,
}

impl FlexWrap {
    /// Parse a keyword. Both `nowrap` and `no-wrap` mean no wrapping.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("nowrap") | Some("no-wrap") => FlexWrap::NoWrap,
            Some("wrap") => FlexWrap::Wrap,
            Some("wrap-reverse") => FlexWrap::WrapReverse,
            Some(other) => {
                tracing::warn!(value = other, "unknown flex-wrap; using nowrap");
                FlexWrap::NoWrap
            }
        }
    }
}

/// `justify-content` and `align-content` distribution modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Distribute {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    /// Only meaningful for `align-content`; acts as `flex-start` on the main axis.
    Stretch,
}

impl Distribute {
    /// Parse a keyword; unknown values fall back to `flex-start`.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("flex-start") => Distribute::FlexStart,
            Some("flex-end") => Distribute::FlexEnd,
            Some("center") => Distribute::Center,
            Some("space-between") => Distribute::SpaceBetween,
            Some("space-around") => Distribute::SpaceAround,
            Some("stretch") => Distribute::Stretch,
            Some(other) => {
                tracing::warn!(value = other, "unknown distribution keyword; using flex-start");
                Distribute::FlexStart
            }
        }
    }
}

/// `align-items` / `align-self`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Stretch,
    FlexStart,
    FlexEnd,
    Center,
}

impl Align {
    /// Resolve a child's alignment: `align-self` unless absent or `auto`,
    /// then the container's `align-items`. Unknown keywords mean `flex-start`.
    pub fn resolve(align_self: Option<&str>, align_items: Option<&str>) -> Self {
        let value = match align_self.map(str::trim) {
            None | Some("auto") => align_items.map(str::trim),
            some => some,
        };
        match value {
            None | Some("stretch") => Align::Stretch,
            Some("flex-start") => Align::FlexStart,
            Some("flex-end") => Align::FlexEnd,
            Some("center") => Align::Center,
            Some(other) => {
                tracing::warn!(value = other, "unknown alignment; using flex-start");
                Align::FlexStart
            }
        }
    }
}

/// Main/cross axis mapping for one container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axes {
    pub main: Dim,
    pub main_start: Edge,
    pub main_end: Edge,
    pub main_sign: f32,
    pub cross: Dim,
    pub cross_start: Edge,
    pub cross_end: Edge,
    pub cross_sign: f32,
}

impl Axes {
    /// Derive the mapping from direction and wrap mode.
    ///
    /// Reverse directions start from the far edge with a negative sign;
    /// `wrap-reverse` does the same on the cross axis.
    pub fn new(direction: FlexDirection, wrap: FlexWrap) -> Self {
        let (main, reversed) = match direction {
            FlexDirection::Row => (Dim::Width, false),
            FlexDirection::RowReverse => (Dim::Width, true),
            FlexDirection::Column => (Dim::Height, false),
            FlexDirection::ColumnReverse => (Dim::Height, true),
        };
        let (main_start, main_end) = oriented(main, reversed);
        let cross = main.cross();
        let cross_reversed = wrap == FlexWrap::WrapReverse;
        let (cross_start, cross_end) = oriented(cross, cross_reversed);

        Self {
            main,
            main_start,
            main_end,
            main_sign: if reversed { -1.0 } else { 1.0 },
            cross,
            cross_start,
            cross_end,
            cross_sign: if cross_reversed { -1.0 } else { 1.0 },
        }
    }
}

fn oriented(dim: Dim, reversed: bool) -> (Edge, Edge) {
    let (start, end) = dim.edges();
    if reversed {
        (end, start)
    } else {
        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_axes() {
        let a = Axes::new(FlexDirection::Row, FlexWrap::NoWrap);
        assert_eq!((a.main, a.main_start, a.main_end, a.main_sign), (Dim::Width, Edge::Left, Edge::Right, 1.0));
        assert_eq!((a.cross, a.cross_start, a.cross_end, a.cross_sign), (Dim::Height, Edge::Top, Edge::Bottom, 1.0));
    }

    #[test]
    fn row_reverse_axes() {
        let a = Axes::new(FlexDirection::RowReverse, FlexWrap::NoWrap);
        assert_eq!((a.main_start, a.main_end, a.main_sign), (Edge::Right, Edge::Left, -1.0));
        assert_eq!(a.cross_start, Edge::Top);
    }

    #[test]
    fn column_reverse_axes() {
        let a = Axes::new(FlexDirection::ColumnReverse, FlexWrap::Wrap);
        assert_eq!((a.main, a.main_start, a.main_sign), (Dim::Height, Edge::Bottom, -1.0));
        assert_eq!((a.cross, a.cross_start, a.cross_sign), (Dim::Width, Edge::Left, 1.0));
    }

    #[test]
    fn wrap_reverse_swaps_cross_edges() {
        let a = Axes::new(FlexDirection::Column, FlexWrap::WrapReverse);
        assert_eq!((a.cross_start, a.cross_end, a.cross_sign), (Edge::Right, Edge::Left, -1.0));
    }

    #[test]
    fn keyword_parsing() {
        assert_eq!(FlexDirection::parse(None), FlexDirection::Row);
        assert_eq!(FlexDirection::parse(Some("column")), FlexDirection::Column);
        assert_eq!(FlexDirection::parse(Some("sideways")), FlexDirection::Row);
        assert_eq!(FlexWrap::parse(Some("no-wrap")), FlexWrap::NoWrap);
        assert_eq!(FlexWrap::parse(Some("nowrap")), FlexWrap::NoWrap);
        assert_eq!(FlexWrap::parse(Some("wrap-reverse")), FlexWrap::WrapReverse);
        assert_eq!(Distribute::parse(Some("space-around")), Distribute::SpaceAround);
        assert_eq!(Distribute::parse(Some("space-evenly")), Distribute::FlexStart);
    }

    #[test]
    fn align_self_overrides_items() {
        assert_eq!(Align::resolve(None, None), Align::Stretch);
        assert_eq!(Align::resolve(None, Some("center")), Align::Center);
        assert_eq!(Align::resolve(Some("auto"), Some("flex-end")), Align::FlexEnd);
        assert_eq!(Align::resolve(Some("flex-start"), Some("center")), Align::FlexStart);
        assert_eq!(Align::resolve(Some("baseline"), Some("center")), Align::FlexStart);
    }
}
