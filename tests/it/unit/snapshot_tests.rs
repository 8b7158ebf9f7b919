//! Snapshot tests using the insta crate.
//!
//! These pin the serialized shapes the UI layer consumes and the wording of
//! user-facing errors.
//!
//! To update snapshots after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use crate::helpers::airline_dataset;
use databoard::app::{DashboardProfile, Page, Session};
use databoard::charts::{ChartError, classify_columns};
use databoard::data::Upload;
use databoard::settings::DashboardSettings;
use databoard::types::{ChartKind, ChartRequest, ColumnKind, Role};

// ============================================================================
// Serialized views
// ============================================================================

#[test]
fn snapshot_classification() {
    insta::assert_json_snapshot!(classify_columns(&airline_dataset()), @r#"
    {
      "numeric": [
        "Age",
        "Flight Distance",
        "Arrival Delay in Minutes"
      ],
      "categorical": [
        "Gender",
        "Class"
      ]
    }
    "#);
}

#[test]
fn snapshot_chart_request() {
    let request = ChartRequest::scatterplot("GDP_per_capita", "Happiness_Score").with_color("Region");
    insta::assert_json_snapshot!(request, @r#"
    {
      "kind": "scatterplot",
      "fields": {
        "x": "GDP_per_capita",
        "y": "Happiness_Score",
        "color": "Region"
      }
    }
    "#);
}

#[test]
fn snapshot_awaiting_upload_view() {
    let mut session = Session::new(DashboardProfile::airline(), DashboardSettings::default());
    let _ = session.upload(&Upload::new("notes.txt", "hello"));

    insta::assert_json_snapshot!(session.view(Page::Exploration), @r#"
    {
      "page": "awaiting_upload",
      "message": "Upload a dataset to get started!",
      "error": "Unsupported file type: notes.txt"
    }
    "#);
}

// ============================================================================
// Error messages
// ============================================================================

#[test]
fn snapshot_chart_error_messages() {
    let errors = [
        ChartError::InvalidColumn {
            role: Role::X,
            column: "Seat comfort".to_string(),
        },
        ChartError::TypeMismatch {
            kind: ChartKind::BoxPlot,
            role: Role::X,
            column: "Age".to_string(),
            expected: ColumnKind::Categorical,
            found: ColumnKind::Numeric,
        },
        ChartError::MissingRole {
            kind: ChartKind::BarPlot,
            role: Role::Y,
        },
        ChartError::UnexpectedRole {
            kind: ChartKind::Histogram,
            role: Role::Y,
        },
        ChartError::UnsupportedKind {
            kind: ChartKind::Scatterplot,
        },
    ];
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();

    insta::assert_snapshot!(messages.join("\n"), @r"
    column 'Seat comfort' selected for x does not exist in the dataset
    Box Plot needs a categorical column for x, but 'Age' is numeric
    Bar Plot needs a column for y
    Histogram has no y role
    Scatterplot is not available on this dashboard
    ");
}
