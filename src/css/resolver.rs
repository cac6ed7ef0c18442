//! Cascade resolution: match rules against the tree and write computed styles.
//!
//! Rules are applied to each node in declaration order. A declaration
//! overwrites the node's current entry when that entry is unset or has lower
//! or equal specificity, so among equally specific rules the later one wins.

use crate::css::model::{SelectorPart, StyleRule};
use crate::css::parser::{parse_stylesheet, ParseError};
use crate::css::specificity::Specificity;
use crate::css::style::ComputedStyle;
use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;

/// Layout defaults written into every container with zero specificity.
pub const CONTAINER_DEFAULTS: [(&str, &str); 5] = [
    ("justify-content", "flex-start"),
    ("align-items", "stretch"),
    ("flex-direction", "row"),
    ("flex-wrap", "nowrap"),
    ("align-content", "stretch"),
];

/// `flex-wrap` keywords recognised inside a `flex-flow` shorthand.
const WRAP_KEYWORDS: [&str; 4] = ["nowrap", "no-wrap", "wrap", "wrap-reverse"];

/// A rule list ready for matching against the tree.
#[derive(Debug, Default, Clone)]
pub struct StyleResolver {
    /// Rules with pre-computed specificity, in declaration order.
    rules: Vec<CompiledRule>,
}

/// A single rule with its pre-computed specificity.
#[derive(Debug, Clone)]
struct CompiledRule {
    rule: StyleRule,
    specificity: Specificity,
}

impl StyleResolver {
    /// Compile rules by computing each one's specificity.
    pub fn new(rules: Vec<StyleRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| {
                if rule.selector.has_unknown() || rule.selector.parts.is_empty() {
                    tracing::warn!(selector = %rule.selector, "selector can never match; rule skipped");
                }
                CompiledRule {
                    specificity: Specificity::of(&rule.selector),
                    rule,
                }
            })
            .collect();
        Self { rules }
    }

    /// Parse stylesheet text and compile it.
    pub fn parse(css: &str) -> Result<Self, ParseError> {
        Ok(Self::new(parse_stylesheet(css)?))
    }

    /// Number of compiled rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rules in declaration order.
    pub fn rules(&self) -> impl Iterator<Item = &StyleRule> {
        self.rules.iter().map(|c| &c.rule)
    }

    /// Recompute the style of every node under `root`, depth-first.
    pub fn resolve(&self, dom: &mut Dom, root: NodeId) {
        let _span = tracing::debug_span!("cascade", rules = self.rules.len()).entered();
        for node in dom.walk_depth_first(root) {
            let style = self.compute_style(dom, node);
            if let Some(data) = dom.get_mut(node) {
                data.style = style;
            }
        }
    }

    /// Compute the style for a single node from scratch.
    pub fn compute_style(&self, dom: &Dom, node: NodeId) -> ComputedStyle {
        let mut style = ComputedStyle::new();

        for compiled in &self.rules {
            if !matches_selector(&compiled.rule.selector.parts, node, dom) {
                continue;
            }
            tracing::trace!(selector = %compiled.rule.selector, ?node, "rule matched");
            for decl in &compiled.rule.declarations {
                apply_declaration(&mut style, &decl.property, &decl.value, compiled.specificity);
            }
        }

        if dom.get(node).is_some_and(|n| n.tag.is_container()) {
            for (property, value) in CONTAINER_DEFAULTS {
                style.set_default(property, value);
            }
        }

        style
    }
}

/// Convenience entry point: compile `rules` and resolve the tree under `root`.
pub fn resolve_styles(dom: &mut Dom, root: NodeId, rules: &[StyleRule]) {
    StyleResolver::new(rules.to_vec()).resolve(dom, root);
}

/// Apply one declaration, expanding the `flex-flow` shorthand.
fn apply_declaration(style: &mut ComputedStyle, property: &str, value: &str, spec: Specificity) {
    style.apply(property, value, spec);
    if property == "flex-flow" {
        for token in value.split_whitespace() {
            let longhand = if WRAP_KEYWORDS.contains(&token) {
                "flex-wrap"
            } else {
                "flex-direction"
            };
            style.apply(longhand, token, spec);
        }
    }
}

/// Match selector parts right-to-left against `node` and its parent chain.
///
/// Each part must match the current node; the cursor moves to the parent only
/// after a successful match. Any failure, or running out of ancestors, fails
/// the whole selector.
fn matches_selector(parts: &[SelectorPart], node: NodeId, dom: &Dom) -> bool {
    if parts.is_empty() {
        return false;
    }
    let mut cursor = Some(node);
    for part in parts.iter().rev() {
        let Some(current) = cursor else {
            return false;
        };
        match dom.get(current) {
            Some(data) if matches_part(part, data) => cursor = dom.parent(current),
            _ => return false,
        }
    }
    true
}

/// Check whether a single selector part matches a node.
fn matches_part(part: &SelectorPart, node: &NodeData) -> bool {
    match part {
        SelectorPart::Id(id) => node.id() == Some(id.as_str()),
        SelectorPart::Class(class) => node.has_class(class),
        SelectorPart::Tag(tag) => node.tag.name() == tag,
        SelectorPart::Unknown(_) => false,
    }
}
