//! Change classification and its merge algebra.
//!
//! Every node of a [`crate::tree::DiffTree`] carries one [`Classification`],
//! obtained by merging the classifications of all change records found at or
//! below that node. The merge is commutative, associative and idempotent, with
//! [`Classification::Unchanged`] as identity and [`Classification::Modified`]
//! as absorbing element, so the result never depends on visitation order.

use derive_more::Display;

/// Marker that turns a category into a modification. Matches both
/// `values_changed` and `type_changes`.
const CHANGED_MARKER: &str = "change";
const ADDED_MARKER: &str = "added";
const REMOVED_MARKER: &str = "removed";

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Classification {
    #[default]
    #[display("unchanged")]
    Unchanged,
    #[display("added")]
    Added,
    #[display("removed")]
    Removed,
    #[display("modified")]
    Modified,
}

impl Classification {
    pub const ALL: [Classification; 4] = [
        Classification::Unchanged,
        Classification::Added,
        Classification::Removed,
        Classification::Modified,
    ];

    /// Combines two classifications.
    ///
    /// Something both added and removed can only be described as modified.
    pub fn merge(self, other: Classification) -> Classification {
        use Classification::*;

        match (self, other) {
            (Unchanged, x) | (x, Unchanged) => x,
            (Modified, _) | (_, Modified) => Modified,
            (Added, Added) => Added,
            (Removed, Removed) => Removed,
            (Added, Removed) | (Removed, Added) => Modified,
        }
    }

    /// Folds [`Classification::merge`] over `items`, starting from `Unchanged`.
    pub fn merge_all(items: impl IntoIterator<Item = Classification>) -> Classification {
        items
            .into_iter()
            .fold(Classification::Unchanged, Classification::merge)
    }

    /// Maps a diff engine category tag to a classification.
    ///
    /// Tags may contain several markers at once, so the checks run in a fixed
    /// priority order: changed, added, removed. Unknown tags are `Unchanged`.
    pub fn from_category(category: &str) -> Classification {
        if category.contains(CHANGED_MARKER) {
            Classification::Modified
        } else if category.contains(ADDED_MARKER) {
            Classification::Added
        } else if category.contains(REMOVED_MARKER) {
            Classification::Removed
        } else {
            Classification::Unchanged
        }
    }

    /// Single character prefix used by the renderers.
    pub fn symbol(&self) -> &'static str {
        match self {
            Classification::Unchanged => " ",
            Classification::Added => "+",
            Classification::Removed => "-",
            Classification::Modified => "~",
        }
    }

    pub fn is_changed(&self) -> bool {
        *self != Classification::Unchanged
    }
}
