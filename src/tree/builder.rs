use std::collections::HashMap;

use snafu::prelude::*;
use tracing::{debug, trace};

use crate::classification::Classification;
use crate::report::{
    ChangeRecord, DiffReport, PathSegment, ROOT_KEY, ROOT_NAME, ViewMode, canonical_key,
};
use crate::tree::{DiffTree, NodeId, TreeNode};

impl DiffTree {
    /// Builds the tree for a report in tree view.
    ///
    /// Every record materializes the chain of nodes from the root down to its
    /// path, then its category's classification is merged into each node of
    /// that chain. The root always exists and absorbs the classification of
    /// every group, even one whose records all sit deeper in the tree.
    pub fn build(report: DiffReport) -> Result<DiffTree, TreeBuildError> {
        ensure!(
            report.view() == ViewMode::Tree,
            NotTreeViewSnafu {
                view: report.view()
            }
        );

        let mut builder = TreeBuilder::new();
        for (category, records) in report.into_groups() {
            builder.add_group(&category, records);
        }

        Ok(builder.finish())
    }
}

/// Unbuilt state of a [`DiffTree`]. Only [`TreeBuilder::finish`] leaves it.
struct TreeBuilder {
    nodes: Vec<TreeNode>,
    index: HashMap<String, NodeId>,
}

impl TreeBuilder {
    fn new() -> Self {
        let root = TreeNode::new(ROOT_KEY.to_string(), ROOT_NAME.to_string(), Vec::new());

        Self {
            nodes: vec![root],
            index: HashMap::from([(ROOT_KEY.to_string(), NodeId::ROOT)]),
        }
    }

    fn add_group(&mut self, category: &str, records: Vec<ChangeRecord>) {
        let classification = Classification::from_category(category);
        debug!(
            "Adding {} record(s) of category '{}' as {}",
            records.len(),
            category,
            classification
        );

        self.merge_into(NodeId::ROOT, classification);

        for record in records {
            self.add_record(classification, record);
        }
    }

    fn add_record(&mut self, classification: Classification, record: ChangeRecord) {
        let terminal = self.materialize(record.path());
        self.propagate(record.path(), classification);

        trace!("Attaching record at {}", self.nodes[terminal.0].key);
        self.merge_into(terminal, classification);
        self.nodes[terminal.0].change_records.push(record);
    }

    /// Ensures a node exists for every prefix of `path` and returns the node
    /// of the full path.
    fn materialize(&mut self, path: &[PathSegment]) -> NodeId {
        let mut current = NodeId::ROOT;

        for (depth, segment) in path.iter().enumerate() {
            let prefix = &path[..=depth];
            let key = canonical_key(prefix);

            current = match self.index.get(&key) {
                Some(&id) => id,
                None => self.create_child(current, segment, prefix, key),
            };
        }

        current
    }

    fn create_child(
        &mut self,
        parent: NodeId,
        segment: &PathSegment,
        path: &[PathSegment],
        key: String,
    ) -> NodeId {
        trace!("Creating node {}", key);
        let id = NodeId(self.nodes.len());

        self.nodes
            .push(TreeNode::new(key.clone(), segment.to_string(), path.to_vec()));
        self.nodes[parent.0].children.insert(segment.clone(), id);
        self.index.insert(key, id);

        id
    }

    /// Merges into the strict ancestors of `path`, excluding the root which
    /// already took the group's classification. Ancestors are found again
    /// through the index since nodes do not know their parent.
    fn propagate(&mut self, path: &[PathSegment], classification: Classification) {
        for depth in 0..path.len().saturating_sub(1) {
            let key = canonical_key(&path[..=depth]);
            if let Some(&id) = self.index.get(&key) {
                self.merge_into(id, classification);
            }
        }
    }

    fn merge_into(&mut self, id: NodeId, classification: Classification) {
        let node = &mut self.nodes[id.0];
        node.classification = node.classification.merge(classification);
    }

    fn finish(self) -> DiffTree {
        debug!(
            "Built diff tree with {} node(s), root is {}",
            self.nodes.len(),
            self.nodes[NodeId::ROOT.0].classification
        );

        DiffTree {
            nodes: self.nodes,
            index: self.index,
        }
    }
}

#[derive(Debug, Snafu)]
pub enum TreeBuildError {
    #[snafu(display("Expected a diff report in tree view, got the {} view", view))]
    NotTreeView { view: ViewMode },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Value;
    use crate::report::{
        DICTIONARY_ITEM_ADDED, DICTIONARY_ITEM_REMOVED, ITERABLE_ITEM_REMOVED, ReportSubtype,
        TYPE_CHANGES, VALUES_CHANGED,
    };
    use Classification::*;

    fn path(segments: &[&str]) -> Vec<PathSegment> {
        segments.iter().map(|s| PathSegment::from(*s)).collect()
    }

    fn changed(segments: &[&str]) -> ChangeRecord {
        ChangeRecord::new(
            path(segments),
            Some(Value::Int(1)),
            Some(Value::Int(2)),
            ReportSubtype::Value,
        )
    }

    fn added(segments: &[&str]) -> ChangeRecord {
        ChangeRecord::new(
            path(segments),
            None,
            Some(Value::Int(2)),
            ReportSubtype::DictionaryItem,
        )
    }

    fn removed(segments: &[&str]) -> ChangeRecord {
        ChangeRecord::new(
            path(segments),
            Some(Value::Int(1)),
            None,
            ReportSubtype::DictionaryItem,
        )
    }

    fn classification_of(tree: &DiffTree, key: &str) -> Classification {
        tree.get(key)
            .unwrap_or_else(|| panic!("missing node {key}"))
            .classification()
    }

    #[test]
    fn empty_report_yields_root_only() {
        let tree = DiffTree::build(DiffReport::new(ViewMode::Tree)).unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root().key(), ROOT_KEY);
        assert_eq!(tree.root().name(), ROOT_NAME);
        assert!(tree.root().path().is_empty());
        assert_eq!(tree.root().classification(), Unchanged);
        assert!(tree.get(ROOT_KEY).is_some());
    }

    #[test]
    fn text_view_is_rejected() {
        let report =
            DiffReport::new(ViewMode::Text).with_group(VALUES_CHANGED, [changed(&["a"])]);
        let result = DiffTree::build(report);

        assert!(matches!(
            result,
            Err(TreeBuildError::NotTreeView {
                view: ViewMode::Text
            })
        ));
    }

    #[test]
    fn single_value_change() {
        let report =
            DiffReport::new(ViewMode::Tree).with_group(VALUES_CHANGED, [changed(&["a"])]);
        let tree = DiffTree::build(report).unwrap();

        assert_eq!(tree.root().classification(), Modified);
        assert_eq!(tree.root().child_count(), 1);

        let child = tree
            .child(tree.root(), &PathSegment::from("a"))
            .expect("child 'a'");
        assert_eq!(child.key(), "['a']");
        assert_eq!(child.name(), "a");
        assert_eq!(child.classification(), Modified);
        assert!(child.is_leaf());
        assert_eq!(child.change_records().len(), 1);
    }

    #[test]
    fn deep_changes_propagate_to_every_ancestor() {
        let report = DiffReport::new(ViewMode::Tree)
            .with_group(DICTIONARY_ITEM_ADDED, [added(&["b", "b", "b"])])
            .with_group(VALUES_CHANGED, [changed(&["a", "b", "c"])]);
        let tree = DiffTree::build(report).unwrap();

        for key in ["['a']", "['a', 'b']", "['a', 'b', 'c']"] {
            assert_eq!(classification_of(&tree, key), Modified, "{key}");
        }
        for key in ["['b']", "['b', 'b']", "['b', 'b', 'b']"] {
            assert_eq!(classification_of(&tree, key), Added, "{key}");
        }
        assert_eq!(tree.root().classification(), Modified);
        assert_eq!(tree.len(), 7);

        // intermediate nodes carry no records of their own
        assert!(tree.get("['a', 'b']").unwrap().change_records().is_empty());
    }

    #[test]
    fn same_path_in_two_groups_shares_one_node() {
        let report = DiffReport::new(ViewMode::Tree)
            .with_group(DICTIONARY_ITEM_REMOVED, [removed(&["x", "y"])])
            .with_group(DICTIONARY_ITEM_ADDED, [added(&["x", "y"])]);
        let tree = DiffTree::build(report).unwrap();

        assert_eq!(tree.len(), 3);
        let node = tree.get("['x', 'y']").unwrap();
        assert_eq!(node.change_records().len(), 2);
        assert_eq!(node.classification(), Modified);
        assert_eq!(classification_of(&tree, "['x']"), Modified);
    }

    #[test]
    fn children_keep_first_discovery_order() {
        let report = DiffReport::new(ViewMode::Tree)
            .with_group(
                DICTIONARY_ITEM_REMOVED,
                [removed(&["p", "z"]), removed(&["p", "a"])],
            )
            .with_group(
                DICTIONARY_ITEM_ADDED,
                [added(&["p", "m"]), added(&["p", "z"])],
            );
        let tree = DiffTree::build(report).unwrap();

        let parent = tree.get("['p']").unwrap();
        let names: Vec<_> = tree.children(parent).map(TreeNode::name).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn record_at_empty_path_belongs_to_root() {
        let record = ChangeRecord::new(
            Vec::new(),
            Some(Value::Int(1)),
            Some(Value::from("1")),
            ReportSubtype::Type,
        );
        let report = DiffReport::new(ViewMode::Tree).with_group(TYPE_CHANGES, [record]);
        let tree = DiffTree::build(report).unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root().change_records().len(), 1);
        assert_eq!(tree.root().classification(), Modified);
    }

    #[test]
    fn node_can_hold_records_and_children() {
        let report = DiffReport::new(ViewMode::Tree)
            .with_group(DICTIONARY_ITEM_ADDED, [added(&["a", "x"])])
            .with_group(TYPE_CHANGES, [changed(&["a"])]);
        let tree = DiffTree::build(report).unwrap();

        let a = tree.get("['a']").unwrap();
        assert_eq!(a.change_records().len(), 1);
        assert_eq!(a.child_count(), 1);
        assert_eq!(a.classification(), Modified);
        assert_eq!(classification_of(&tree, "['a', 'x']"), Added);
    }

    #[test]
    fn group_order_does_not_change_classifications() {
        let groups = vec![
            (ITERABLE_ITEM_REMOVED, vec![removed(&["l", "2"])]),
            (DICTIONARY_ITEM_ADDED, vec![added(&["l", "3"]), added(&["m"])]),
            (VALUES_CHANGED, vec![changed(&["n", "o"])]),
        ];

        let forward = groups
            .iter()
            .cloned()
            .fold(DiffReport::new(ViewMode::Tree), |report, (c, r)| {
                report.with_group(c, r)
            });
        let backward = groups
            .iter()
            .rev()
            .cloned()
            .fold(DiffReport::new(ViewMode::Tree), |report, (c, r)| {
                report.with_group(c, r)
            });

        let forward = DiffTree::build(forward).unwrap();
        let backward = DiffTree::build(backward).unwrap();

        assert_eq!(forward.len(), backward.len());
        for node in forward.iter() {
            assert_eq!(
                node.classification(),
                classification_of(&backward, node.key()),
                "{}",
                node.key()
            );
        }
        assert_eq!(classification_of(&forward, "['l']"), Modified);
    }

    #[test]
    fn unknown_category_materializes_unchanged_nodes() {
        let report =
            DiffReport::new(ViewMode::Tree).with_group("unprocessed", [changed(&["q", "r"])]);
        let tree = DiffTree::build(report).unwrap();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.root().classification(), Unchanged);
        assert_eq!(classification_of(&tree, "['q', 'r']"), Unchanged);
    }

    #[test]
    fn index_and_sequence_segments_are_distinct_children() {
        let by_index = ChangeRecord::new(
            vec![PathSegment::from("s"), PathSegment::Index(0)],
            Some(Value::Int(1)),
            None,
            ReportSubtype::IterableItem,
        );
        let report = DiffReport::new(ViewMode::Tree)
            .with_group(ITERABLE_ITEM_REMOVED, [by_index])
            .with_group(DICTIONARY_ITEM_ADDED, [added(&["s", "0"])]);
        let tree = DiffTree::build(report).unwrap();

        let s = tree.get("['s']").unwrap();
        assert_eq!(s.child_count(), 2);
        assert_eq!(classification_of(&tree, "['s', 0]"), Removed);
        assert_eq!(classification_of(&tree, "['s', '0']"), Added);
        assert_eq!(s.classification(), Modified);
    }
}
