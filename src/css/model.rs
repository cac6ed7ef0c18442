//! Style rule model: Selector, SelectorPart, Declaration, StyleRule.

use std::fmt;

/// One whitespace-separated part of a descendant selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorPart {
    /// `#name`: matches a node whose `id` prop equals `name`.
    Id(String),
    /// `.name`: matches a node listing `name` in its `class` prop.
    Class(String),
    /// `name`: matches a node whose tag name is exactly `name`.
    Tag(String),
    /// Anything else (`a:hover`, `div.x`, `*`, a lone `#`). Never matches.
    Unknown(String),
}

impl SelectorPart {
    /// Classify a single selector part.
    pub fn parse(text: &str) -> Self {
        let is_name = |s: &str| {
            !s.is_empty()
                && s.chars()
                    .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        };
        if let Some(rest) = text.strip_prefix('#') {
            if is_name(rest) {
                return SelectorPart::Id(rest.to_owned());
            }
        } else if let Some(rest) = text.strip_prefix('.') {
            if is_name(rest) {
                return SelectorPart::Class(rest.to_owned());
            }
        } else if is_name(text) {
            return SelectorPart::Tag(text.to_owned());
        }
        SelectorPart::Unknown(text.to_owned())
    }
}

impl fmt::Display for SelectorPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorPart::Id(name) => write!(f, "#{name}"),
            SelectorPart::Class(name) => write!(f, ".{name}"),
            SelectorPart::Tag(name) | SelectorPart::Unknown(name) => f.write_str(name),
        }
    }
}

/// A descendant selector: parts matched right-to-left up the parent chain.
///
/// `"div .row #save"` has parts `[Tag(div), Class(row), Id(save)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub parts: Vec<SelectorPart>,
}

impl Selector {
    /// Split selector text on whitespace and classify each part.
    pub fn parse(text: &str) -> Self {
        Self {
            parts: text.split_whitespace().map(SelectorPart::parse).collect(),
        }
    }

    /// Whether any part can never match.
    pub fn has_unknown(&self) -> bool {
        self.parts
            .iter()
            .any(|p| matches!(p, SelectorPart::Unknown(_)))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

/// A single `property: value` pair with the value kept as raw trimmed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// A selector plus its ordered declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    pub selector: Selector,
    pub declarations: Vec<Declaration>,
}

impl StyleRule {
    /// Create a rule with no declarations.
    pub fn new(selector: &str) -> Self {
        Self {
            selector: Selector::parse(selector),
            declarations: Vec::new(),
        }
    }

    /// Append a declaration (builder).
    pub fn declare(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.declarations.push(Declaration {
            property: property.into(),
            value: value.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_parts() {
        assert_eq!(SelectorPart::parse("#main"), SelectorPart::Id("main".into()));
        assert_eq!(SelectorPart::parse(".row"), SelectorPart::Class("row".into()));
        assert_eq!(SelectorPart::parse("button"), SelectorPart::Tag("button".into()));
        assert_eq!(SelectorPart::parse("my-tag_2"), SelectorPart::Tag("my-tag_2".into()));
    }

    #[test]
    fn malformed_parts_are_unknown() {
        for text in ["#", ".", "a:hover", "div.x", "*", "#a.b", "[x]"] {
            assert!(
                matches!(SelectorPart::parse(text), SelectorPart::Unknown(_)),
                "{text} should be unknown"
            );
        }
    }

    #[test]
    fn selector_split_and_display() {
        let sel = Selector::parse("  div   .row #save ");
        assert_eq!(sel.parts.len(), 3);
        assert_eq!(sel.to_string(), "div .row #save");
        assert!(!sel.has_unknown());
        assert!(Selector::parse("div a:hover").has_unknown());
    }

    #[test]
    fn rule_builder() {
        let rule = StyleRule::new("#a").declare("width", "10px").declare("height", "5px");
        assert_eq!(rule.selector.parts, vec![SelectorPart::Id("a".into())]);
        assert_eq!(rule.declarations.len(), 2);
        assert_eq!(rule.declarations[1].property, "height");
    }
}
