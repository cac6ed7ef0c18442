//! DOM arena: slotmap-backed node tree with id/class/tag queries.

pub mod node;
pub mod tree;
pub mod query;

pub use node::{NodeData, NodeId};
pub use tree::Dom;
