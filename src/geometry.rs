//! Core geometry types: Size, LayoutBox, Edges.
//!
//! Coordinates are `f32` pixels on the canvas. [`LayoutBox`] carries all four
//! edges plus width/height so axis-generic layout code can address any of
//! them through [`Edge`] and [`Dim`].

use std::ops::Add;

// ---------------------------------------------------------------------------
// Axis addressing
// ---------------------------------------------------------------------------

/// One of the four box edges.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// The edge on the opposite side of the same axis.
    #[inline]
    pub const fn opposite(self) -> Edge {
        match self {
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
            Edge::Top => Edge::Bottom,
            Edge::Bottom => Edge::Top,
        }
    }

    /// CSS property suffix for this edge (`"left"`, `"top"`, ...).
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Right => "right",
            Edge::Top => "top",
            Edge::Bottom => "bottom",
        }
    }
}

/// A size dimension: the extent along one axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dim {
    Width,
    Height,
}

impl Dim {
    /// The orthogonal dimension.
    #[inline]
    pub const fn cross(self) -> Dim {
        match self {
            Dim::Width => Dim::Height,
            Dim::Height => Dim::Width,
        }
    }

    /// CSS property name for this dimension.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Dim::Width => "width",
            Dim::Height => "height",
        }
    }

    /// The two edges bounding this dimension, in (start, end) order.
    #[inline]
    pub const fn edges(self) -> (Edge, Edge) {
        match self {
            Dim::Width => (Edge::Left, Edge::Right),
            Dim::Height => (Edge::Top, Edge::Bottom),
        }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size in pixels (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Extent along `dim`.
    #[inline]
    pub fn get(self, dim: Dim) -> f32 {
        match dim {
            Dim::Width => self.width,
            Dim::Height => self.height,
        }
    }

    /// Set the extent along `dim`.
    #[inline]
    pub fn set(&mut self, dim: Dim, value: f32) {
        match dim {
            Dim::Width => self.width = value,
            Dim::Height => self.height = value,
        }
    }
}

impl Add for Size {
    type Output = Size;
    #[inline]
    fn add(self, rhs: Size) -> Size {
        Size { width: self.width + rhs.width, height: self.height + rhs.height }
    }
}

// ---------------------------------------------------------------------------
// LayoutBox
// ---------------------------------------------------------------------------

/// The absolute margin box of a node, written by the layout engine.
///
/// All six fields are stored so that reverse directions can place the end
/// edge first and derive the start edge from it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LayoutBox {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutBox {
    /// A box at the origin with the given size.
    #[inline]
    pub fn from_size(size: Size) -> Self {
        Self {
            left: 0.0,
            right: size.width,
            top: 0.0,
            bottom: size.height,
            width: size.width,
            height: size.height,
        }
    }

    /// Position of `edge`.
    #[inline]
    pub fn edge(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Left => self.left,
            Edge::Right => self.right,
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
        }
    }

    /// Set the position of `edge`.
    #[inline]
    pub fn set_edge(&mut self, edge: Edge, value: f32) {
        match edge {
            Edge::Left => self.left = value,
            Edge::Right => self.right = value,
            Edge::Top => self.top = value,
            Edge::Bottom => self.bottom = value,
        }
    }

    /// Extent along `dim`.
    #[inline]
    pub fn dim(&self, dim: Dim) -> f32 {
        match dim {
            Dim::Width => self.width,
            Dim::Height => self.height,
        }
    }

    /// Set the extent along `dim`.
    #[inline]
    pub fn set_dim(&mut self, dim: Dim, value: f32) {
        match dim {
            Dim::Width => self.width = value,
            Dim::Height => self.height = value,
        }
    }

    /// Width and height as a [`Size`].
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

// ---------------------------------------------------------------------------
// Edges
// ---------------------------------------------------------------------------

/// Per-side lengths, used for margin, border and padding.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    /// Zero on all sides.
    pub const ZERO: Edges = Edges { top: 0.0, right: 0.0, bottom: 0.0, left: 0.0 };

    /// Create edges with explicit values for each side.
    #[inline]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    /// All four sides set to the same value.
    #[inline]
    pub const fn all(value: f32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    /// Expand a CSS 1-4 value shorthand (`top right bottom left` order).
    ///
    /// Returns `None` for an empty slice or more than four values.
    pub fn from_shorthand(values: &[f32]) -> Option<Self> {
        match *values {
            [a] => Some(Self::all(a)),
            [v, h] => Some(Self::new(v, h, v, h)),
            [t, h, b] => Some(Self::new(t, h, b, h)),
            [t, r, b, l] => Some(Self::new(t, r, b, l)),
            _ => None,
        }
    }

    /// Length on `edge`.
    #[inline]
    pub fn side(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Left => self.left,
            Edge::Right => self.right,
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
        }
    }

    /// Sum of both sides bounding `dim`.
    #[inline]
    pub fn along(&self, dim: Dim) -> f32 {
        match dim {
            Dim::Width => self.left + self.right,
            Dim::Height => self.top + self.bottom,
        }
    }
}

impl Add for Edges {
    type Output = Edges;
    #[inline]
    fn add(self, rhs: Edges) -> Edges {
        Edges {
            top: self.top + rhs.top,
            right: self.right + rhs.right,
            bottom: self.bottom + rhs.bottom,
            left: self.left + rhs.left,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
