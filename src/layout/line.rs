//! Flex lines: splitting children into lines and placing them on both axes.
//!
//! Everything here is axis-agnostic arithmetic over [`FlexItem`]s. Positions
//! are the coordinate of an item's start edge; with a negative sign the item
//! extends from that edge towards smaller coordinates.

use crate::layout::axis::{Align, Distribute, FlexWrap};

/// One child as seen by the line algorithm. Sizes are margin-box sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct FlexItem {
    pub main: f32,
    pub cross: f32,
    /// Flex weight; zero means inflexible.
    pub flex: f32,
    /// Whether `stretch` may resize the cross axis (no explicit cross size).
    pub stretchable: bool,
    pub align: Align,
    /// Position of the main-start edge, once placed.
    pub main_pos: f32,
    /// Position of the cross-start edge, once placed.
    pub cross_pos: f32,
}

impl FlexItem {
    /// An inflexible, stretchable item with the given sizes.
    pub fn new(main: f32, cross: f32) -> Self {
        Self {
            main,
            cross,
            flex: 0.0,
            stretchable: true,
            align: Align::Stretch,
            main_pos: 0.0,
            cross_pos: 0.0,
        }
    }

    /// Set the flex weight (builder).
    pub fn with_flex(mut self, flex: f32) -> Self {
        self.flex = flex;
        self
    }

    /// Set the cross alignment (builder).
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Mark the cross size as explicit (builder).
    pub fn fixed_cross(mut self) -> Self {
        self.stretchable = false;
        self
    }

    fn is_flexible(&self) -> bool {
        self.flex > 0.0
    }
}

/// Indices of the items on one line plus its remaining main space and the
/// largest cross size among its members.
#[derive(Debug, Clone, PartialEq)]
pub struct FlexLine {
    pub items: Vec<usize>,
    /// Remaining main-axis space; negative on an overflowing `nowrap` line.
    pub main_space: f32,
    pub cross_space: f32,
}

impl FlexLine {
    fn new(main_space: f32) -> Self {
        Self {
            items: Vec::new(),
            main_space,
            cross_space: 0.0,
        }
    }

    fn push(&mut self, index: usize, item: &FlexItem) {
        self.items.push(index);
        if !item.is_flexible() {
            self.main_space -= item.main;
        }
        self.cross_space = self.cross_space.max(item.cross);
    }
}

/// Split `items` (already in `order`) into lines.
///
/// Flexible items always join the current line. Without wrapping everything
/// shares one line. With wrapping, oversized items are clamped to
/// `content_main` and a new line starts whenever an item does not fit.
pub fn split_lines(items: &mut [FlexItem], content_main: f32, wrap: FlexWrap) -> Vec<FlexLine> {
    let mut lines = vec![FlexLine::new(content_main)];

    for (index, item) in items.iter_mut().enumerate() {
        if !item.is_flexible() && wrap != FlexWrap::NoWrap {
            item.main = item.main.min(content_main);
            let fits = lines
                .last()
                .is_some_and(|line| line.main_space >= item.main);
            if !fits {
                lines.push(FlexLine::new(content_main));
            }
        }
        if let Some(line) = lines.last_mut() {
            line.push(index, item);
        }
    }

    tracing::trace!(lines = lines.len(), "split flex lines");
    lines
}

/// Resolve main sizes and positions for one line.
pub fn place_main(
    line: &FlexLine,
    items: &mut [FlexItem],
    base: f32,
    sign: f32,
    content_main: f32,
    justify: Distribute,
) {
    if line.main_space < 0.0 {
        shrink_line(line, items, base, sign, content_main);
        return;
    }

    let flex_total: f32 = line.items.iter().map(|&i| items[i].flex.max(0.0)).sum();
    if flex_total > 0.0 {
        for &i in &line.items {
            if items[i].is_flexible() {
                items[i].main = items[i].flex / flex_total * line.main_space;
            }
        }
        pack(line, items, base, sign, 0.0);
        return;
    }

    let (start, gap) = distribute(justify, line.main_space, line.items.len());
    pack(line, items, base + sign * start, sign, sign * gap);
}

/// Uniform shrink of an overflowing line; flexible items collapse to zero.
fn shrink_line(line: &FlexLine, items: &mut [FlexItem], base: f32, sign: f32, content_main: f32) {
    let denominator = content_main + line.main_space.abs();
    let scale = if denominator > 0.0 && content_main > 0.0 {
        content_main / denominator
    } else {
        0.0
    };
    for &i in &line.items {
        if items[i].is_flexible() {
            items[i].main = 0.0;
        }
        items[i].main *= scale;
    }
    pack(line, items, base, sign, 0.0);
}

/// Place line members sequentially from `start`, `gap` apart.
fn pack(line: &FlexLine, items: &mut [FlexItem], start: f32, sign: f32, gap: f32) {
    let mut current = start;
    for &i in &line.items {
        items[i].main_pos = current;
        current += sign * items[i].main + gap;
    }
}

/// Leading offset and gap (both unsigned) for distributing `free` space over
/// `count` slots. `space-*` with one slot or less, or with no free space, packs
/// from the start.
fn distribute(mode: Distribute, free: f32, count: usize) -> (f32, f32) {
    match mode {
        Distribute::FlexStart | Distribute::Stretch => (0.0, 0.0),
        Distribute::FlexEnd => (free, 0.0),
        Distribute::Center => (free / 2.0, 0.0),
        Distribute::SpaceBetween if count > 1 && free >= 0.0 => (0.0, free / (count - 1) as f32),
        Distribute::SpaceAround if count > 1 && free >= 0.0 => {
            let gap = free / count as f32;
            (gap / 2.0, gap)
        }
        Distribute::SpaceBetween | Distribute::SpaceAround => (0.0, 0.0),
    }
}

/// Place lines across the cross axis, then each item within its line.
///
/// `content_cross` is the container's cross content extent. `stretch` grows
/// every line by an equal share of positive leftover space.
pub fn place_cross(
    lines: &[FlexLine],
    items: &mut [FlexItem],
    base: f32,
    sign: f32,
    content_cross: f32,
    align_content: Distribute,
) {
    let used: f32 = lines.iter().map(|l| l.cross_space).sum();
    let leftover = content_cross - used;

    let (start, gap) = distribute(align_content, leftover, lines.len());
    let extra = if align_content == Distribute::Stretch && leftover > 0.0 && !lines.is_empty() {
        leftover / lines.len() as f32
    } else {
        0.0
    };

    let mut current = base + sign * start;
    for line in lines {
        let line_cross = line.cross_space + extra;
        for &i in &line.items {
            let item = &mut items[i];
            match item.align {
                Align::Stretch => {
                    if item.stretchable {
                        item.cross = line_cross;
                    }
                    item.cross_pos = current;
                }
                Align::FlexStart => item.cross_pos = current,
                Align::FlexEnd => item.cross_pos = current + sign * (line_cross - item.cross),
                Align::Center => item.cross_pos = current + sign * (line_cross - item.cross) / 2.0,
            }
        }
        current += sign * line_cross + sign * gap;
    }
}
