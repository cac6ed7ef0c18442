//! Node types: NodeId, NodeData.

use std::collections::BTreeMap;

use slotmap::new_key_type;

use crate::css::style::ComputedStyle;
use crate::geometry::{LayoutBox, Size};
use crate::value::Value;
use crate::widget::Tag;

new_key_type! {
    /// Unique identifier for a DOM node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single DOM node.
///
/// `id` and `class` are ordinary props; the selector helpers read them from
/// [`NodeData::props`] so a binding that rewrites `class` restyles the node.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Tag identity (selects intrinsic measurement and tag selectors).
    pub tag: Tag,
    /// Raw property values from the template, bindings already projected.
    pub props: BTreeMap<String, Value>,
    /// Cascade output, rewritten on every style pass.
    pub style: ComputedStyle,
    /// Absolute margin box, written by the layout engine.
    pub layout: LayoutBox,
    /// Intrinsic content size, seeded by the measure step before layout.
    pub intrinsic: Option<Size>,
    /// Data path bound two-way through the `value` prop.
    pub bind: Option<String>,
}

impl NodeData {
    /// Create a new `NodeData` for `tag` with no props.
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            props: BTreeMap::new(),
            style: ComputedStyle::new(),
            layout: LayoutBox::default(),
            intrinsic: None,
            bind: None,
        }
    }

    /// Set a prop (builder).
    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    /// Set the `id` prop (builder).
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_prop("id", id.into())
    }

    /// Add a single class (builder).
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// A prop value, if present.
    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }

    /// A prop rendered as text; missing props read as `None`.
    pub fn prop_text(&self, name: &str) -> Option<String> {
        self.props.get(name).map(Value::to_string)
    }

    /// Set a prop value.
    pub fn set_prop(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.props.insert(name.into(), value.into());
    }

    /// The `id` prop, when it is text.
    pub fn id(&self) -> Option<&str> {
        self.props.get("id").and_then(Value::as_str)
    }

    /// Space-separated names from the `class` prop.
    pub fn classes(&self) -> Vec<&str> {
        self.props
            .get("class")
            .and_then(Value::as_str)
            .map(|s| s.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Check whether this node has a given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().contains(&class)
    }

    /// Add a class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let mut classes: Vec<String> = self.classes().into_iter().map(str::to_owned).collect();
        classes.push(class.to_owned());
        self.set_prop("class", classes.join(" "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults() {
        let data = NodeData::new(Tag::Button);
        assert_eq!(data.tag, Tag::Button);
        assert!(data.id().is_none());
        assert!(data.classes().is_empty());
        assert!(data.style.is_empty());
        assert!(data.intrinsic.is_none());
        assert!(data.bind.is_none());
    }

    #[test]
    fn id_comes_from_props() {
        let data = NodeData::new(Tag::Text).with_id("title");
        assert_eq!(data.id(), Some("title"));
        assert_eq!(data.prop_text("id").as_deref(), Some("title"));
    }

    #[test]
    fn classes_split_on_whitespace() {
        let data = NodeData::new(Tag::Div).with_prop("class", " row  wide ");
        assert_eq!(data.classes(), vec!["row", "wide"]);
        assert!(data.has_class("wide"));
        assert!(!data.has_class("row wide"));
    }

    #[test]
    fn with_class_dedup() {
        let data = NodeData::new(Tag::Div).with_class("primary").with_class("primary");
        assert_eq!(data.classes(), vec!["primary"]);
    }

    #[test]
    fn add_class_appends() {
        let mut data = NodeData::new(Tag::Div).with_class("a");
        data.add_class("b");
        data.add_class("a");
        assert_eq!(data.prop_text("class").as_deref(), Some("a b"));
    }

    #[test]
    fn non_text_id_is_ignored() {
        let data = NodeData::new(Tag::Div).with_prop("id", 3);
        assert_eq!(data.id(), None);
    }

    #[test]
    fn node_id_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<NodeId>();
    }
}
