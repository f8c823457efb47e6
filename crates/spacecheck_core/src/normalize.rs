//! Tabular normalizer: raw source table -> header/item model.
//!
//! # Responsibility
//! - Turn the loader's `{header, data}` table into base headers and items.
//! - Keep the column contract in one place: three leading metadata columns,
//!   one trailing ignored column, spaces in between.
//!
//! # Invariants
//! - Never panics; malformed rows are silently omitted.
//! - Emitted headers and items always start unchecked.

use crate::model::header::HeaderEntry;
use crate::model::item::DataItem;
use crate::model::snapshot::CheckModel;
use crate::model::table::{SourceRecord, SourceTable, COL_CATEGORY, COL_NOTE, COL_PROJECT};
use serde_json::Value;

/// Leading metadata columns (`category`, `project`, `note`) skipped before
/// the first space column.
const LEADING_METADATA_COLUMNS: usize = 3;
/// Trailing non-space columns ignored at the end of the header row.
const TRAILING_IGNORED_COLUMNS: usize = 1;

/// Normalizes a raw source table into the canonical model.
///
/// Every header column between the metadata prefix and the ignored suffix
/// becomes one unchecked base header. For each such column, every row whose
/// cell under that column is truthy yields one unchecked item carrying the
/// row's `category`/`project`/`note` metadata.
///
/// A table with a missing or too-short header row yields an empty model.
pub fn normalize(table: &SourceTable) -> CheckModel {
    let columns = space_columns(&table.header);
    let mut model = CheckModel {
        header: columns.iter().map(HeaderEntry::base).collect(),
        data: Vec::new(),
    };

    for title in &columns {
        for record in &table.data {
            if record.get(title.as_str()).is_some_and(is_truthy) {
                model.data.push(item_from_record(title, record));
            }
        }
    }

    model
}

fn space_columns(header: &[String]) -> Vec<String> {
    if header.len() <= LEADING_METADATA_COLUMNS + TRAILING_IGNORED_COLUMNS {
        return Vec::new();
    }
    header[LEADING_METADATA_COLUMNS..header.len() - TRAILING_IGNORED_COLUMNS].to_vec()
}

fn item_from_record(space: &str, record: &SourceRecord) -> DataItem {
    DataItem {
        space: space.to_string(),
        category: string_cell(record, COL_CATEGORY),
        project: string_cell(record, COL_PROJECT),
        note: string_cell(record, COL_NOTE),
        checked: false,
    }
}

fn string_cell(record: &SourceRecord, column: &str) -> String {
    record
        .get(column)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// JS-style truthiness over JSON cells: `null`, `false`, `0` and `""` are
/// falsy; everything else, including empty arrays and objects, is truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::{is_truthy, normalize, space_columns};
    use crate::model::table::SourceTable;
    use serde_json::json;

    fn table(json: serde_json::Value) -> SourceTable {
        serde_json::from_value(json).expect("test table should deserialize")
    }

    #[test]
    fn space_columns_drop_metadata_prefix_and_trailing_column() {
        let header: Vec<String> = ["category", "project", "note", "Kitchen", "Bathroom", "done"]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(space_columns(&header), vec!["Kitchen", "Bathroom"]);
    }

    #[test]
    fn short_header_yields_no_spaces() {
        let header: Vec<String> = ["category", "project", "note", "done"]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert!(space_columns(&header).is_empty());
    }

    #[test]
    fn truthiness_matches_source_semantics() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn rows_land_only_under_truthy_columns() {
        let model = normalize(&table(json!({
            "header": ["category", "project", "note", "A", "B", "done"],
            "data": [
                { "category": "c", "project": "p1", "note": "n", "A": 1, "B": 0 },
            ],
        })));

        assert_eq!(model.header.len(), 2);
        assert_eq!(model.data.len(), 1);
        assert_eq!(model.data[0].space, "A");
        assert_eq!(model.data[0].project, "p1");
        assert!(!model.data[0].checked);
    }

    #[test]
    fn missing_header_or_data_degrades_to_empty_model() {
        let model = normalize(&table(json!({})));
        assert!(model.header.is_empty());
        assert!(model.data.is_empty());
    }

    #[test]
    fn malformed_rows_are_silently_omitted() {
        let model = normalize(&table(json!({
            "header": ["category", "project", "note", "A", "done"],
            "data": [
                {},
                { "project": "kept", "A": true },
            ],
        })));

        assert_eq!(model.data.len(), 1);
        assert_eq!(model.data[0].project, "kept");
        assert_eq!(model.data[0].category, "");
        assert_eq!(model.data[0].note, "");
    }
}
