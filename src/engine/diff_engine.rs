use std::collections::HashSet;

use tracing::{debug, trace};

use crate::document::Value;
use crate::engine::align::{gaps, text_diff};
use crate::report::{
    ChangeRecord, DICTIONARY_ITEM_ADDED, DICTIONARY_ITEM_REMOVED, DiffReport, ITERABLE_ITEM_ADDED,
    ITERABLE_ITEM_REMOVED, PathSegment, ReportSubtype, SET_ITEM_ADDED, SET_ITEM_REMOVED,
    TYPE_CHANGES, VALUES_CHANGED, ViewMode, canonical_key,
};

#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    pub view: ViewMode,
    /// Canonical keys of paths that are neither compared nor reported.
    pub exclude_paths: HashSet<String>,
}

/// Structural comparison of two [`Value`]s.
///
/// Mappings are compared key by key, sequences are aligned on their longest
/// common subsequence, sets by membership. Anything else is a leaf compared
/// by type, then by value.
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    options: EngineOptions,
}

impl DiffEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn diff(&self, before: &Value, after: &Value) -> DiffReport {
        let mut report = DiffReport::new(self.options.view);
        let mut path = Vec::new();
        self.compare(before, after, &mut path, &mut report);

        debug!(
            "Diff found {} change(s) in {} view",
            report.record_count(),
            report.view()
        );
        report
    }

    fn is_excluded(&self, path: &[PathSegment]) -> bool {
        !self.options.exclude_paths.is_empty()
            && self.options.exclude_paths.contains(&canonical_key(path))
    }

    fn compare(
        &self,
        before: &Value,
        after: &Value,
        path: &mut Vec<PathSegment>,
        report: &mut DiffReport,
    ) {
        if self.is_excluded(path) {
            trace!("Skipping excluded path {}", canonical_key(path));
            return;
        }

        match (before, after) {
            (Value::Map(old), Value::Map(new)) => {
                for (key, value) in old.iter().filter(|(key, _)| !new.contains_key(*key)) {
                    self.report_item(
                        report,
                        path,
                        PathSegment::Key(key.clone()),
                        DICTIONARY_ITEM_REMOVED,
                        Some(value),
                        None,
                        ReportSubtype::DictionaryItem,
                    );
                }
                for (key, value) in new.iter().filter(|(key, _)| !old.contains_key(*key)) {
                    self.report_item(
                        report,
                        path,
                        PathSegment::Key(key.clone()),
                        DICTIONARY_ITEM_ADDED,
                        None,
                        Some(value),
                        ReportSubtype::DictionaryItem,
                    );
                }
                for (key, old_value) in old {
                    if let Some(new_value) = new.get(key) {
                        path.push(PathSegment::Key(key.clone()));
                        self.compare(old_value, new_value, path, report);
                        path.pop();
                    }
                }
            }
            (Value::Seq(old), Value::Seq(new)) => self.compare_sequences(old, new, path, report),
            (Value::Set(old), Value::Set(new)) => {
                for member in old.iter().filter(|member| !new.contains(member)) {
                    self.report_item(
                        report,
                        path,
                        set_member_segment(member),
                        SET_ITEM_REMOVED,
                        Some(member),
                        None,
                        ReportSubtype::SetItem,
                    );
                }
                for member in new.iter().filter(|member| !old.contains(member)) {
                    self.report_item(
                        report,
                        path,
                        set_member_segment(member),
                        SET_ITEM_ADDED,
                        None,
                        Some(member),
                        ReportSubtype::SetItem,
                    );
                }
            }
            _ if before.type_name() != after.type_name() => {
                report.push(
                    TYPE_CHANGES,
                    ChangeRecord::new(
                        path.clone(),
                        Some(before.clone()),
                        Some(after.clone()),
                        ReportSubtype::Type,
                    ),
                );
            }
            _ if before != after => {
                let record = ChangeRecord::new(
                    path.clone(),
                    Some(before.clone()),
                    Some(after.clone()),
                    ReportSubtype::Value,
                );
                let record = match (before.as_str(), after.as_str()) {
                    (Some(old), Some(new)) if old.contains('\n') || new.contains('\n') => {
                        record.with_text_diff(text_diff(old, new))
                    }
                    _ => record,
                };
                report.push(VALUES_CHANGED, record);
            }
            _ => {}
        }
    }

    /// Pairs unmatched items positionally inside each gap of the alignment;
    /// the surplus of either side is reported as removed or added.
    fn compare_sequences(
        &self,
        old: &[Value],
        new: &[Value],
        path: &mut Vec<PathSegment>,
        report: &mut DiffReport,
    ) {
        for gap in gaps(old, new) {
            let paired = gap.before.len().min(gap.after.len());

            for offset in 0..paired {
                let (i, j) = (gap.before.start + offset, gap.after.start + offset);
                path.push(PathSegment::Index(i));
                self.compare(&old[i], &new[j], path, report);
                path.pop();
            }
            for i in gap.before.clone().skip(paired) {
                self.report_item(
                    report,
                    path,
                    PathSegment::Index(i),
                    ITERABLE_ITEM_REMOVED,
                    Some(&old[i]),
                    None,
                    ReportSubtype::IterableItem,
                );
            }
            for j in gap.after.clone().skip(paired) {
                self.report_item(
                    report,
                    path,
                    PathSegment::Index(j),
                    ITERABLE_ITEM_ADDED,
                    None,
                    Some(&new[j]),
                    ReportSubtype::IterableItem,
                );
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn report_item(
        &self,
        report: &mut DiffReport,
        parent: &[PathSegment],
        segment: PathSegment,
        category: &str,
        before: Option<&Value>,
        after: Option<&Value>,
        report_subtype: ReportSubtype,
    ) {
        let mut path = parent.to_vec();
        path.push(segment);

        if self.is_excluded(&path) {
            trace!("Skipping excluded path {}", canonical_key(&path));
            return;
        }

        report.push(
            category,
            ChangeRecord::new(path, before.cloned(), after.cloned(), report_subtype),
        );
    }
}

/// Set members are addressed by their display form. Strings display quoted,
/// so `1` and `"1"` land on different nodes.
fn set_member_segment(member: &Value) -> PathSegment {
    PathSegment::Key(member.to_string())
}
