use crate::render::Render;
use crate::tree::DiffTree;

/// One `<symbol> <canonical key>` line per changed node, parents first.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryRenderer;

impl Render for SummaryRenderer {
    type Output = String;

    fn render(&self, tree: &DiffTree) -> String {
        tree.iter()
            .filter(|node| node.classification().is_changed())
            .map(|node| format!("{} {}", node.classification().symbol(), node.key()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
