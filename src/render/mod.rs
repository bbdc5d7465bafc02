//! Renderers reading a finished [`DiffTree`].
//!
//! Rendering is a capability, not a base class: each output format is an
//! independent [`Render`] implementation sharing the same tree.

mod console;
mod flat;
mod summary;

pub use console::ConsoleRenderer;
pub use flat::render_flat;
pub use summary::SummaryRenderer;

use crate::classification::Classification;
use crate::report::ChangeRecord;
use crate::tree::DiffTree;

pub trait Render {
    type Output;

    fn render(&self, tree: &DiffTree) -> Self::Output;
}

/// Classification of a single record, judged from which sides it carries.
pub fn record_classification(record: &ChangeRecord) -> Classification {
    match (record.before(), record.after()) {
        (Some(_), Some(_)) => Classification::Modified,
        (None, Some(_)) => Classification::Added,
        (Some(_), None) => Classification::Removed,
        (None, None) => Classification::Unchanged,
    }
}

/// `before -> after`, or whichever side exists.
pub fn describe_values(record: &ChangeRecord) -> String {
    match (record.before(), record.after()) {
        (Some(before), Some(after)) => format!("{before} -> {after}"),
        (None, Some(after)) => after.to_string(),
        (Some(before), None) => before.to_string(),
        (None, None) => String::new(),
    }
}
