//! Unit tests for spreadsheet uploads, using workbooks written on the fly.

use databoard::app::{DashboardProfile, Session};
use databoard::data::{Upload, load_dataset};
use databoard::settings::DashboardSettings;
use databoard::types::ColumnKind;
use rust_xlsxwriter::{Workbook, XlsxError};
use tempfile::tempdir;

/// Airline-style sheet with a blank header, a missing cell and a mixed column
fn airline_workbook() -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    sheet.write_string(0, 0, "Gender")?;
    sheet.write_string(0, 1, "Age")?;
    // (0, 2) left blank
    sheet.write_string(0, 3, "Class")?;
    sheet.write_string(0, 4, "Arrival Delay in Minutes")?;
    sheet.write_string(0, 5, "Seat comfort")?;

    let rows: [(&str, f64, f64, &str, Option<f64>); 3] = [
        ("Male", 13.0, 1.0, "Eco Plus", Some(18.0)),
        ("Female", 25.0, 2.0, "Business", None),
        ("Female", 26.0, 3.0, "Business", Some(0.0)),
    ];
    for (i, (gender, age, id, class, delay)) in rows.into_iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, gender)?;
        sheet.write_number(row, 1, age)?;
        sheet.write_number(row, 2, id)?;
        sheet.write_string(row, 3, class)?;
        if let Some(delay) = delay {
            sheet.write_number(row, 4, delay)?;
        }
    }
    sheet.write_number(1, 5, 3.0)?;
    sheet.write_string(2, 5, "n/a")?;
    sheet.write_number(3, 5, 4.0)?;

    Ok(workbook)
}

fn xlsx_upload(mut workbook: Workbook) -> Upload {
    Upload::new("airline.xlsx", workbook.save_to_buffer().unwrap())
}

#[test]
fn test_workbook_headers() {
    let ds = load_dataset(&xlsx_upload(airline_workbook().unwrap()), &DashboardSettings::default()).unwrap();

    let names: Vec<&str> = ds.column_names().collect();
    assert_eq!(
        names,
        vec!["Gender", "Age", "column_3", "Class", "Arrival Delay in Minutes", "Seat comfort"]
    );
    assert_eq!(ds.name(), "airline");
    assert_eq!(ds.row_count(), 3);
}

#[test]
fn test_workbook_column_kinds() {
    let ds = load_dataset(&xlsx_upload(airline_workbook().unwrap()), &DashboardSettings::default()).unwrap();

    let kinds: Vec<ColumnKind> = ds.columns().iter().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            ColumnKind::Categorical,
            ColumnKind::Numeric,
            ColumnKind::Numeric,
            ColumnKind::Categorical,
            ColumnKind::Numeric,
            ColumnKind::Categorical,
        ]
    );

    let age = ds.column("Age").unwrap().as_numeric().unwrap();
    assert_eq!(age.values, vec![Some(13.0), Some(25.0), Some(26.0)]);
}

#[test]
fn test_workbook_mixed_column_keeps_numbers_as_text() {
    let ds = load_dataset(&xlsx_upload(airline_workbook().unwrap()), &DashboardSettings::default()).unwrap();

    let seat = ds.column("Seat comfort").unwrap().as_categorical().unwrap();
    let values: Vec<Option<&str>> = seat.values.iter().map(|v| v.as_deref()).collect();
    assert_eq!(values, vec![Some("3"), Some("n/a"), Some("4")]);
}

#[test]
fn test_workbook_missing_cell() {
    let ds = load_dataset(&xlsx_upload(airline_workbook().unwrap()), &DashboardSettings::default()).unwrap();

    let delay = ds.column("Arrival Delay in Minutes").unwrap();
    assert_eq!(delay.kind(), ColumnKind::Numeric);
    assert_eq!(delay.missing_count(), 1);
    assert_eq!(delay.as_numeric().unwrap().values, vec![Some(18.0), None, Some(0.0)]);
}

#[test]
fn test_header_only_sheet_is_empty_dataset() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Age").unwrap();
    sheet.write_string(0, 1, "Class").unwrap();

    let ds = load_dataset(&xlsx_upload(workbook), &DashboardSettings::default()).unwrap();
    assert!(ds.is_empty());
    assert_eq!(ds.column_count(), 0);
}

#[test]
fn test_airline_session_loads_workbook_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("airline.xlsx");
    airline_workbook().unwrap().save(&path).unwrap();

    let settings = DashboardSettings::default();
    let upload = Upload::from_path(&path, &settings).unwrap();
    let mut session = Session::new(DashboardProfile::airline(), settings);
    session.upload(&upload).unwrap();

    let classification = session.classification().unwrap();
    assert_eq!(classification.categorical, vec!["Gender", "Class", "Seat comfort"]);
    assert_eq!(
        classification.numeric,
        vec!["Age", "column_3", "Arrival Delay in Minutes"]
    );
}
