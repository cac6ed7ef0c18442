//! CSS scalar values: Scalar, Unit (px, %, vw, vh, auto).
//!
//! Style values stay as raw text in [`ComputedStyle`](crate::css::ComputedStyle);
//! the layout engine parses them on demand through [`Scalar::parse`] and
//! resolves them to pixels against the viewport and a reference length.

use std::fmt;

use crate::geometry::{Edges, Size};

/// A CSS unit type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Unit {
    /// Pixels. Unitless numbers are pixels too.
    Px,
    /// Percentage of a reference length (the parent's content box).
    Percent,
    /// Viewport width percentage.
    Vw,
    /// Viewport height percentage.
    Vh,
    /// Auto-size (content-based).
    Auto,
}

/// A scalar value with a unit, e.g. `10px`, `50%`, `auto`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scalar {
    pub value: f32,
    pub unit: Unit,
}

impl Scalar {
    /// Create a scalar in pixels.
    pub fn px(value: f32) -> Self {
        Self { value, unit: Unit::Px }
    }

    /// Create a scalar as a percentage.
    pub fn percent(value: f32) -> Self {
        Self { value, unit: Unit::Percent }
    }

    /// Create a scalar in viewport-width units.
    pub fn vw(value: f32) -> Self {
        Self { value, unit: Unit::Vw }
    }

    /// Create a scalar in viewport-height units.
    pub fn vh(value: f32) -> Self {
        Self { value, unit: Unit::Vh }
    }

    /// Create an auto scalar.
    pub fn auto() -> Self {
        Self { value: 0.0, unit: Unit::Auto }
    }

    /// Returns `true` if this scalar is auto-sized.
    pub fn is_auto(&self) -> bool {
        self.unit == Unit::Auto
    }

    /// Parse a single length token. Returns `None` for anything unrecognised.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("auto") {
            return Some(Self::auto());
        }
        let (number, unit) = if let Some(n) = text.strip_suffix("px") {
            (n, Unit::Px)
        } else if let Some(n) = text.strip_suffix('%') {
            (n, Unit::Percent)
        } else if let Some(n) = text.strip_suffix("vw") {
            (n, Unit::Vw)
        } else if let Some(n) = text.strip_suffix("vh") {
            (n, Unit::Vh)
        } else {
            (text, Unit::Px)
        };
        let value: f32 = number.parse().ok()?;
        value.is_finite().then_some(Self { value, unit })
    }

    /// Resolve to pixels. `reference` is the length percentages are taken of;
    /// `None` there, or an auto scalar, yields `None`.
    pub fn resolve(&self, viewport: Size, reference: Option<f32>) -> Option<f32> {
        match self.unit {
            Unit::Px => Some(self.value),
            Unit::Vw => Some(self.value / 100.0 * viewport.width),
            Unit::Vh => Some(self.value / 100.0 * viewport.height),
            Unit::Percent => reference.map(|r| self.value / 100.0 * r),
            Unit::Auto => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.unit {
            Unit::Auto => return write!(f, "auto"),
            Unit::Px => "px",
            Unit::Percent => "%",
            Unit::Vw => "vw",
            Unit::Vh => "vh",
        };
        if self.value.fract() == 0.0 {
            write!(f, "{}{suffix}", self.value as i64)
        } else {
            write!(f, "{}{suffix}", self.value)
        }
    }
}

/// Parse a `margin`/`padding` style 1-4 value shorthand into pixels.
///
/// Unresolvable sides count as zero; a malformed list yields [`Edges::ZERO`].
pub fn parse_edges(text: &str, viewport: Size, reference: Option<f32>) -> Edges {
    let values: Vec<f32> = text
        .split_whitespace()
        .map(|tok| {
            Scalar::parse(tok)
                .and_then(|s| s.resolve(viewport, reference))
                .unwrap_or(0.0)
        })
        .collect();
    Edges::from_shorthand(&values).unwrap_or(Edges::ZERO)
}

/// Border width from a `border` shorthand (`1px solid red`): the first token.
pub fn border_width(text: &str, viewport: Size) -> f32 {
    text.split_whitespace()
        .next()
        .and_then(Scalar::parse)
        .and_then(|s| s.resolve(viewport, None))
        .unwrap_or(0.0)
}
