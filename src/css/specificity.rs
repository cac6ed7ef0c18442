//! 3-tuple CSS specificity calculation and comparison.
//!
//! ```text
//! (id_count, class_count, tag_count)
//! ```
//!
//! Fields are declared in priority order so the derived `Ord` is the
//! lexicographic cascade comparison. Source order is not part of the tuple:
//! ties are settled by the resolver applying rules in declaration order.

use crate::css::model::{Selector, SelectorPart};

/// CSS specificity, ordered from highest to lowest priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity {
    /// Number of `#id` parts.
    pub id_count: u16,
    /// Number of `.class` parts.
    pub class_count: u16,
    /// Number of tag parts.
    pub tag_count: u16,
}

impl Specificity {
    /// Specificity of built-in defaults. Any matching rule beats or ties it.
    pub const ZERO: Specificity = Specificity { id_count: 0, class_count: 0, tag_count: 0 };

    /// Create a specificity from explicit counts.
    pub const fn new(id_count: u16, class_count: u16, tag_count: u16) -> Self {
        Self { id_count, class_count, tag_count }
    }

    /// Count the id, class and tag parts of a selector.
    pub fn of(selector: &Selector) -> Self {
        selector
            .parts
            .iter()
            .fold(Self::ZERO, |mut acc, part| {
                match part {
                    SelectorPart::Id(_) => acc.id_count += 1,
                    SelectorPart::Class(_) => acc.class_count += 1,
                    SelectorPart::Tag(_) => acc.tag_count += 1,
                    SelectorPart::Unknown(_) => {}
                }
                acc
            })
    }
}
