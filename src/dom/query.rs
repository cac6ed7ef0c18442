//! DOM queries by id.
//!
//! All queries walk the tree from the root in document order, so the first
//! match is the first in the template.

use super::node::{NodeData, NodeId};
use super::tree::Dom;

impl Dom {
    /// Find the first node whose `id` prop matches the given string.
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.iter_tree().find(|(_, data)| data.id() == Some(id)).map(|(n, _)| n)
    }

    /// Iterate `(NodeId, &NodeData)` pairs under the root in document order.
    fn iter_tree(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.root()
            .map(|root| self.walk_depth_first(root))
            .unwrap_or_default()
            .into_iter()
            .filter_map(move |id| self.get(id).map(|data| (id, data)))
    }
}
