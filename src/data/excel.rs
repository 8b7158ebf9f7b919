//! Spreadsheet uploads (xlsx, xls, xlsm, xlsb, ods) via calamine.
//!
//! The first worksheet is read; its first row is the header. A column is
//! numeric when every non-empty cell holds an integer or float.

use crate::data::error::{DataError, DataResult};
use crate::types::{CategoricalColumn, Column, NumericColumn};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

/// Read the first worksheet of a workbook into typed columns
pub fn read_workbook(bytes: &[u8]) -> DataResult<Vec<Column>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook.worksheet_range_at(0).ok_or(DataError::NoColumns)??;

    let mut rows = range.rows();
    let header = rows.next().ok_or(DataError::EmptyFile)?;
    let headers: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, cell)| match cell_to_text(cell) {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => format!("column_{}", idx + 1),
        })
        .collect();

    if headers.is_empty() {
        return Err(DataError::NoColumns);
    }

    let body: Vec<&[Data]> = rows.collect();

    let columns = headers
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let cells: Vec<Option<&Data>> = body.iter().map(|row| row.get(idx)).collect();
            if is_numeric_column(&cells) {
                let values = cells.iter().map(|c| c.and_then(cell_to_f64)).collect();
                Column::Numeric(NumericColumn::new(name, values))
            } else {
                let values = cells.iter().map(|c| c.and_then(cell_to_text)).collect();
                Column::Categorical(CategoricalColumn::new(name, values))
            }
        })
        .collect();

    Ok(columns)
}

/// Numeric when at least one cell is a number and no cell holds anything else
fn is_numeric_column(cells: &[Option<&Data>]) -> bool {
    let mut has_number = false;
    for cell in cells.iter().flatten() {
        match cell {
            Data::Int(_) | Data::Float(_) => has_number = true,
            Data::Empty | Data::Error(_) => {}
            _ => return false,
        }
    }
    has_number
}

fn cell_to_f64(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(v) => Some(*v as f64),
        Data::Float(v) => Some(*v),
        _ => None,
    }
}

fn cell_to_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => Some(format!("{}", *v as i64)),
        other => Some(other.to_string()),
    }
}
