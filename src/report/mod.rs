//! Change records as reported by a diff engine, and the canonical path keys
//! used to index them.

mod path;
mod record;

pub use path::{PathSegment, ROOT_KEY, ROOT_NAME, canonical_key, path_of};
pub use record::{
    ChangeRecord, DICTIONARY_ITEM_ADDED, DICTIONARY_ITEM_REMOVED, DiffReport,
    ITERABLE_ITEM_ADDED, ITERABLE_ITEM_REMOVED, ReportSubtype, SET_ITEM_ADDED, SET_ITEM_REMOVED,
    TYPE_CHANGES, VALUES_CHANGED, ViewMode,
};
