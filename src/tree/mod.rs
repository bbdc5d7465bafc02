//! Hierarchical view of a diff report.
//!
//! [`DiffTree::build`] turns the flat, category-grouped records of a
//! [`crate::report::DiffReport`] into a tree mirroring the shape of the
//! compared data. Each node aggregates the classification of every record at
//! or below it. The tree is never mutated after the build, so it can be shared
//! freely between readers.

mod builder;
mod node;

use std::collections::HashMap;

pub use builder::TreeBuildError;
pub use node::{NodeId, TreeNode};

use crate::report::{PathSegment, canonical_key};

/// Arena of nodes plus a lookup index from canonical path key to node.
#[derive(Debug, Clone)]
pub struct DiffTree {
    nodes: Vec<TreeNode>,
    index: HashMap<String, NodeId>,
}

impl DiffTree {
    pub fn root(&self) -> &TreeNode {
        &self.nodes[NodeId::ROOT.0]
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    /// Looks a node up by canonical key, see [`crate::report::canonical_key`].
    pub fn get(&self, key: &str) -> Option<&TreeNode> {
        self.index.get(key).and_then(|id| self.node(*id))
    }

    pub fn get_path(&self, path: &[PathSegment]) -> Option<&TreeNode> {
        self.get(&canonical_key(path))
    }

    pub fn child(&self, parent: &TreeNode, segment: &PathSegment) -> Option<&TreeNode> {
        parent.child_id(segment).and_then(|id| self.node(id))
    }

    /// Children of `parent` in first-discovery order.
    pub fn children<'a>(&'a self, parent: &'a TreeNode) -> impl Iterator<Item = &'a TreeNode> {
        parent.child_ids().filter_map(|(_, id)| self.node(id))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root exists even when nothing changed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order walk starting at the root, children in discovery order.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            tree: self,
            stack: vec![NodeId::ROOT],
        }
    }
}

pub struct PreOrder<'a> {
    tree: &'a DiffTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.node(self.stack.pop()?)?;
        let children: Vec<NodeId> = node.child_ids().map(|(_, id)| id).collect();
        self.stack.extend(children.into_iter().rev());
        Some(node)
    }
}
