//! JSON data parsing
//!
//! Parses JSON arrays of objects into typed columns.

use crate::data::error::{DataError, DataResult};
use crate::types::{CategoricalColumn, Column, NumericColumn};
use serde_json::Value;

/// Wrapper keys tried when the document is an object rather than an array
const WRAPPER_KEYS: [&str; 5] = ["data", "rows", "items", "records", "results"];

/// Parse JSON bytes into typed columns
///
/// Column order follows first appearance of each key across the records.
pub fn parse_json_bytes(bytes: &[u8]) -> DataResult<Vec<Column>> {
    let value: Value = serde_json::from_slice(bytes)?;
    let records = extract_array(&value)?;

    let mut names: Vec<&str> = Vec::new();
    for record in records {
        let obj = record
            .as_object()
            .ok_or_else(|| DataError::InvalidData("Array elements must be objects".to_string()))?;
        for key in obj.keys() {
            if !names.contains(&key.as_str()) {
                names.push(key);
            }
        }
    }

    let columns = names
        .into_iter()
        .map(|name| {
            let cells: Vec<Option<&Value>> = records
                .iter()
                .map(|r| r.get(name).filter(|v| !v.is_null()))
                .collect();

            let all_numbers = cells.iter().flatten().all(|v| v.is_number());
            let any_present = cells.iter().any(Option::is_some);

            if all_numbers && any_present {
                let values = cells.iter().map(|c| c.and_then(Value::as_f64)).collect();
                Column::Numeric(NumericColumn::new(name, values))
            } else {
                let values = cells.iter().map(|c| c.and_then(json_value_to_text)).collect();
                Column::Categorical(CategoricalColumn::new(name, values))
            }
        })
        .collect();

    Ok(columns)
}

/// Extract the array from JSON value, handling common wrapper patterns
fn extract_array(value: &Value) -> DataResult<&Vec<Value>> {
    match value {
        Value::Array(arr) => Ok(arr),
        Value::Object(obj) => WRAPPER_KEYS
            .iter()
            .find_map(|key| obj.get(*key).and_then(Value::as_array))
            .ok_or_else(|| {
                DataError::InvalidData(
                    "JSON must be an array or have a data/rows/items/records/results array"
                        .to_string(),
                )
            }),
        _ => Err(DataError::InvalidData(
            "JSON must be an array of objects".to_string(),
        )),
    }
}

/// Convert a JSON value to a label
fn json_value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(arr) => Some(
            arr.iter()
                .map(|v| format!("{}", v))
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}
