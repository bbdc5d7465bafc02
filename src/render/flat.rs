use crate::render::describe_values;
use crate::report::DiffReport;

/// Lists a report as is, one `category: key values` line per record.
///
/// Works on either view since it never builds a tree.
pub fn render_flat(report: &DiffReport) -> String {
    report
        .groups()
        .flat_map(|(category, records)| {
            records.iter().map(move |record| {
                format!("{category}: {} {}", record.key(), describe_values(record))
            })
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Value;
    use crate::engine::{DiffEngine, EngineOptions};
    use crate::report::ViewMode;

    #[test]
    fn lists_records_by_category() {
        let engine = DiffEngine::new(EngineOptions {
            view: ViewMode::Text,
            ..EngineOptions::default()
        });
        let report = engine.diff(
            &Value::from_yaml_str("{a: 1, b: 2}").unwrap(),
            &Value::from_yaml_str("{a: 3, c: x}").unwrap(),
        );

        assert_eq!(
            render_flat(&report),
            "dictionary_item_removed: ['b'] 2\n\
             dictionary_item_added: ['c'] \"x\"\n\
             values_changed: ['a'] 1 -> 3"
        );
    }
}
