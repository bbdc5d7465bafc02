use derive_more::Display;
use hashlink::LinkedHashMap;

use crate::document::Value;
use crate::report::{PathSegment, canonical_key};

pub const VALUES_CHANGED: &str = "values_changed";
pub const TYPE_CHANGES: &str = "type_changes";
pub const DICTIONARY_ITEM_ADDED: &str = "dictionary_item_added";
pub const DICTIONARY_ITEM_REMOVED: &str = "dictionary_item_removed";
pub const ITERABLE_ITEM_ADDED: &str = "iterable_item_added";
pub const ITERABLE_ITEM_REMOVED: &str = "iterable_item_removed";
pub const SET_ITEM_ADDED: &str = "set_item_added";
pub const SET_ITEM_REMOVED: &str = "set_item_removed";

/// What kind of report produced a record. Only renderers look at it.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportSubtype {
    #[display("value")]
    Value,
    #[display("type")]
    Type,
    #[display("dictionary_item")]
    DictionaryItem,
    #[display("iterable_item")]
    IterableItem,
    #[display("set_item")]
    SetItem,
}

/// A single difference found at one path.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRecord {
    path: Vec<PathSegment>,
    before: Option<Value>,
    after: Option<Value>,
    report_subtype: ReportSubtype,
    text_diff: Option<String>,
}

impl ChangeRecord {
    pub fn new(
        path: Vec<PathSegment>,
        before: Option<Value>,
        after: Option<Value>,
        report_subtype: ReportSubtype,
    ) -> Self {
        Self {
            path,
            before,
            after,
            report_subtype,
            text_diff: None,
        }
    }

    pub fn with_text_diff(mut self, text_diff: impl Into<String>) -> Self {
        self.text_diff = Some(text_diff.into());
        self
    }

    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    pub fn key(&self) -> String {
        canonical_key(&self.path)
    }

    pub fn before(&self) -> Option<&Value> {
        self.before.as_ref()
    }

    pub fn after(&self) -> Option<&Value> {
        self.after.as_ref()
    }

    pub fn report_subtype(&self) -> ReportSubtype {
        self.report_subtype
    }

    pub fn text_diff(&self) -> Option<&str> {
        self.text_diff.as_deref()
    }
}

/// How the diff engine laid out its findings.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Records grouped by category, one record per path.
    #[default]
    #[display("tree")]
    Tree,
    /// Flat listing meant to be printed as is.
    #[display("text")]
    Text,
}

/// Output of the diff engine: change records grouped by category, in the
/// order the engine first reported each category.
#[derive(Debug, Clone, Default)]
pub struct DiffReport {
    view: ViewMode,
    groups: LinkedHashMap<String, Vec<ChangeRecord>>,
}

impl DiffReport {
    pub fn new(view: ViewMode) -> Self {
        Self {
            view,
            groups: LinkedHashMap::new(),
        }
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn push(&mut self, category: impl Into<String>, record: ChangeRecord) {
        self.groups
            .entry(category.into())
            .or_insert_with(Vec::new)
            .push(record);
    }

    pub fn with_group(
        mut self,
        category: impl Into<String>,
        records: impl IntoIterator<Item = ChangeRecord>,
    ) -> Self {
        self.groups
            .entry(category.into())
            .or_insert_with(Vec::new)
            .extend(records);
        self
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &[ChangeRecord])> {
        self.groups
            .iter()
            .map(|(category, records)| (category.as_str(), records.as_slice()))
    }

    pub fn records(&self, category: &str) -> &[ChangeRecord] {
        self.groups
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn into_groups(self) -> impl Iterator<Item = (String, Vec<ChangeRecord>)> {
        self.groups.into_iter()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }

    pub fn record_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}
