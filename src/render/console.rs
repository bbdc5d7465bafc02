use colored::Colorize;

use crate::classification::Classification;
use crate::render::{Render, describe_values, record_classification};
use crate::report::{ChangeRecord, ReportSubtype};
use crate::tree::{DiffTree, TreeNode};

const UNCHANGED_LABEL: &str = "# unchanged";
const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Box-drawing tree for terminals.
///
/// Branches print their name, leaves print one line per change record, e.g.
/// `~ port = 80 -> 8080`. Multi-line strings print their text diff below.
#[derive(Debug, Clone, Default)]
pub struct ConsoleRenderer {
    color: bool,
}

impl ConsoleRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, classification: Classification) -> String {
        if !self.color {
            return text.to_string();
        }
        match classification {
            Classification::Unchanged => text.bright_black().to_string(),
            Classification::Added => text.green().to_string(),
            Classification::Removed => text.red().to_string(),
            Classification::Modified => text.yellow().to_string(),
        }
    }

    /// Label of `node` followed by any continuation lines.
    fn node_lines(&self, node: &TreeNode) -> Vec<String> {
        let mut lines = Vec::new();

        if !node.is_leaf() {
            lines.push(self.paint(node.name(), node.classification()));
        } else if !node.classification().is_changed() {
            lines.push(self.paint(UNCHANGED_LABEL, Classification::Unchanged));
            return lines;
        }

        for record in node.change_records() {
            lines.extend(self.record_lines(node.name(), record));
        }
        lines
    }

    fn record_lines(&self, name: &str, record: &ChangeRecord) -> Vec<String> {
        let classification = record_classification(record);
        let symbol = classification.symbol();

        if record.report_subtype() == ReportSubtype::SetItem {
            let member = record.after().or(record.before());
            let text = match member {
                Some(member) => format!("{symbol} {member}"),
                None => format!("{symbol} {name}"),
            };
            return vec![self.paint(&text, classification)];
        }

        if let Some(diff) = record.text_diff() {
            let mut lines = vec![self.paint(&format!("{symbol} {name}:"), classification)];
            lines.extend(diff.lines().map(|line| self.paint_diff_line(line)));
            return lines;
        }

        let text = format!("{symbol} {name} = {}", describe_values(record));
        vec![self.paint(&text, classification)]
    }

    fn paint_diff_line(&self, line: &str) -> String {
        let classification = match line.chars().next() {
            Some('+') => Classification::Added,
            Some('-') => Classification::Removed,
            _ => Classification::Unchanged,
        };
        format!("  {}", self.paint(line, classification))
    }

    fn render_children(
        &self,
        tree: &DiffTree,
        node: &TreeNode,
        prefix: &str,
        out: &mut Vec<String>,
    ) {
        let children: Vec<&TreeNode> = tree.children(node).collect();

        for (i, child) in children.iter().enumerate() {
            let last = i + 1 == children.len();
            let connector = if last { LAST_BRANCH } else { BRANCH };
            let child_prefix = format!("{prefix}{}", if last { SPACE } else { PIPE });

            let mut lines = self.node_lines(child).into_iter();
            if let Some(label) = lines.next() {
                out.push(format!("{prefix}{connector}{label}"));
            }
            out.extend(lines.map(|line| format!("{child_prefix}{line}")));

            self.render_children(tree, child, &child_prefix, out);
        }
    }
}

impl Render for ConsoleRenderer {
    type Output = String;

    fn render(&self, tree: &DiffTree) -> String {
        let root = tree.root();
        let mut out = self.node_lines(root);

        if root.is_leaf() && root.classification().is_changed() {
            // records at the root are the whole diff, e.g. a top-level scalar
            return out.join("\n");
        }

        self.render_children(tree, root, "", &mut out);
        out.join("\n")
    }
}
