//! Template descriptions and the tag factory that instantiates them.
//!
//! A [`TemplateNode`] is the parsed, not-yet-instantiated component tree: tag
//! names are still strings and props still hold raw binding text such as
//! `"{user.name}"`. [`Dom::build`] resolves every tag through the registry
//! and inserts the nodes in document order.

use std::collections::BTreeMap;

use crate::dom::{Dom, NodeData, NodeId};
use crate::value::Value;
use crate::widget::{Tag, UnknownTag};

/// Errors from instantiating a template.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TemplateError {
    #[error("unknown tag '{0}'")]
    UnknownTag(String),
    #[error("<{tag}> cannot hold children")]
    ChildrenOnLeaf { tag: Tag },
}

impl From<UnknownTag> for TemplateError {
    fn from(err: UnknownTag) -> Self {
        TemplateError::UnknownTag(err.0)
    }
}

/// One element of a template tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemplateNode {
    pub tag: String,
    pub props: BTreeMap<String, Value>,
    pub children: Vec<TemplateNode>,
}

impl TemplateNode {
    /// An element with no props or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            props: BTreeMap::new(),
            children: Vec::new(),
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

    /// Set the `class` prop (builder).
    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_prop("class", class.into())
    }

    /// Append a child (builder).
    pub fn with_child(mut self, child: TemplateNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children (builder).
    pub fn with_children(mut self, children: impl IntoIterator<Item = TemplateNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Number of elements in this subtree, including itself.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TemplateNode::count).sum::<usize>()
    }
}

impl Dom {
    /// Instantiate `template` into a fresh DOM. Returns the DOM and its root.
    pub fn build(template: &TemplateNode) -> Result<(Dom, NodeId), TemplateError> {
        let mut dom = Dom::new();
        let root = dom.insert(instantiate(template)?);
        let mut pending: Vec<(NodeId, &TemplateNode)> = vec![(root, template)];

        while let Some((parent, node)) = pending.pop() {
            if node.children.is_empty() {
                continue;
            }
            let tag = dom.get(parent).map(|d| d.tag).unwrap_or(Tag::Div);
            if !tag.is_container() {
                return Err(TemplateError::ChildrenOnLeaf { tag });
            }
            for child in &node.children {
                let id = dom.insert_child(parent, instantiate(child)?);
                pending.push((id, child));
            }
        }

        tracing::debug!(nodes = dom.len(), "built dom from template");
        Ok((dom, root))
    }
}

fn instantiate(node: &TemplateNode) -> Result<NodeData, TemplateError> {
    let tag: Tag = node.tag.parse()?;
    let mut data = NodeData::new(tag);
    data.props = node.props.clone();
    Ok(data)
}
