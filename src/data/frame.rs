//! Polars-backed reading of delimited uploads.
//!
//! Polars infers a dtype per column from the first rows of the file; the
//! frame is then converted once into typed [`Column`]s so nothing downstream
//! inspects dtypes again.

use crate::data::error::DataResult;
use crate::settings::DashboardSettings;
use crate::types::{CategoricalColumn, Column, NumericColumn};
use polars::prelude::{AnyValue, CsvReadOptions, DataFrame, PolarsResult, SerReader};
use std::io::Cursor;

/// Read CSV/TSV bytes into typed columns.
///
/// Column dtypes are inferred from the first `infer_schema_rows` rows. When a
/// later value does not fit the sampled dtype the upload is read again with
/// every row taking part in inference, so the column widens to float or
/// string instead of failing.
///
/// At most `max_rows + 1` rows are parsed so the caller can detect an
/// oversized upload without materializing all of it.
pub fn read_delimited(
    bytes: &[u8],
    separator: u8,
    settings: &DashboardSettings,
) -> DataResult<Vec<Column>> {
    let df = match read_frame(bytes, separator, settings, Some(settings.infer_schema_rows)) {
        Ok(df) => df,
        Err(e) => {
            tracing::debug!("Sampled schema rejected ({}), inferring from all rows", e);
            read_frame(bytes, separator, settings, None)?
        }
    };

    Ok(frame_to_columns(&df))
}

fn read_frame(
    bytes: &[u8],
    separator: u8,
    settings: &DashboardSettings,
    infer_schema_length: Option<usize>,
) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer_schema_length)
        .with_n_rows(Some(settings.max_rows.saturating_add(1)))
        .map_parse_options(|opts| opts.with_separator(separator))
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()
}

/// Convert every frame column to a typed column
pub fn frame_to_columns(df: &DataFrame) -> Vec<Column> {
    let height = df.height();

    df.get_columns()
        .iter()
        .map(|column| {
            let name = column.name().to_string();
            if is_numeric_dtype(column.dtype()) {
                let values = (0..height)
                    .map(|row| column.get(row).ok().and_then(|v| any_value_to_f64(&v)))
                    .collect();
                Column::Numeric(NumericColumn::new(name, values))
            } else {
                let values = (0..height)
                    .map(|row| column.get(row).ok().and_then(|v| any_value_to_text(&v)))
                    .collect();
                Column::Categorical(CategoricalColumn::new(name, values))
            }
        })
        .collect()
}

/// Integer and float dtypes are numeric; everything else is a label
fn is_numeric_dtype(dtype: &polars::datatypes::DataType) -> bool {
    matches!(
        dtype,
        polars::datatypes::DataType::Int8
            | polars::datatypes::DataType::Int16
            | polars::datatypes::DataType::Int32
            | polars::datatypes::DataType::Int64
            | polars::datatypes::DataType::UInt8
            | polars::datatypes::DataType::UInt16
            | polars::datatypes::DataType::UInt32
            | polars::datatypes::DataType::UInt64
            | polars::datatypes::DataType::Float32
            | polars::datatypes::DataType::Float64
    )
}

fn any_value_to_f64(value: &AnyValue) -> Option<f64> {
    match value {
        AnyValue::Int8(v) => Some(*v as f64),
        AnyValue::Int16(v) => Some(*v as f64),
        AnyValue::Int32(v) => Some(*v as f64),
        AnyValue::Int64(v) => Some(*v as f64),
        AnyValue::UInt8(v) => Some(*v as f64),
        AnyValue::UInt16(v) => Some(*v as f64),
        AnyValue::UInt32(v) => Some(*v as f64),
        AnyValue::UInt64(v) => Some(*v as f64),
        AnyValue::Float32(v) => Some(*v as f64),
        AnyValue::Float64(v) => Some(*v),
        _ => None,
    }
}

fn any_value_to_text(value: &AnyValue) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => Some(s.to_string()),
        AnyValue::StringOwned(s) => Some(s.as_str().to_string()),
        AnyValue::Boolean(b) => Some(b.to_string()),
        other => Some(format!("{}", other)),
    }
}
