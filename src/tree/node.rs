use hashlink::LinkedHashMap;

use crate::classification::Classification;
use crate::report::{ChangeRecord, PathSegment};

/// Position of a node inside its [`crate::tree::DiffTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(super) usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

/// One path inside the compared structures.
///
/// Nodes only point down: children are stored by id, keyed by their local
/// path segment, in the order they were first discovered.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub(super) key: String,
    pub(super) name: String,
    pub(super) path: Vec<PathSegment>,
    pub(super) classification: Classification,
    pub(super) change_records: Vec<ChangeRecord>,
    pub(super) children: LinkedHashMap<PathSegment, NodeId>,
}

impl TreeNode {
    pub(super) fn new(key: String, name: String, path: Vec<PathSegment>) -> Self {
        Self {
            key,
            name,
            path,
            classification: Classification::Unchanged,
            change_records: Vec::new(),
            children: LinkedHashMap::new(),
        }
    }

    /// Canonical key of [`TreeNode::path`].
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// Records whose path is exactly this node's path.
    pub fn change_records(&self) -> &[ChangeRecord] {
        &self.change_records
    }

    pub fn child_ids(&self) -> impl Iterator<Item = (&PathSegment, NodeId)> {
        self.children.iter().map(|(segment, id)| (segment, *id))
    }

    pub fn child_id(&self, segment: &PathSegment) -> Option<NodeId> {
        self.children.get(segment).copied()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }
}
