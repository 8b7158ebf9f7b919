//! Integration tests from upload to render-ready chart data.

use crate::helpers::happiness_csv;
use databoard::app::{DashboardProfile, Session, SessionError};
use databoard::charts::ChartError;
use databoard::data::{ChartData, ChartOptions};
use databoard::settings::DashboardSettings;
use databoard::types::{AggregationType, ChartRequest, Role, SortOrder};

fn loaded_session() -> Session {
    let mut session = Session::new(DashboardProfile::happiness(), DashboardSettings::default());
    session.upload(&happiness_csv()).unwrap();
    session
}

#[test]
fn test_bar_plot_by_region() {
    let session = loaded_session();
    let options = session
        .chart_options()
        .with_aggregation(AggregationType::Count)
        .with_sort_order(SortOrder::ValueDesc);

    let data = session
        .render_chart(&ChartRequest::bar_plot("Region", "Happiness_Score"), &options)
        .unwrap();

    let Some(ChartData::Bar(bar)) = data else {
        panic!("expected bar data, got {:?}", data);
    };
    let points: Vec<(&str, f64)> = bar.points.iter().map(|p| (p.label.as_str(), p.value)).collect();
    assert_eq!(
        points,
        vec![("Western Europe", 3.0), ("Middle East", 1.0), ("Latin America", 1.0)]
    );
    assert_eq!(bar.max_value, 3.0);
    assert_eq!(bar.min_value, 1.0);
}

#[test]
fn test_histogram_counts_every_row() {
    let session = loaded_session();
    let options = ChartOptions {
        histogram_bins: 4,
        ..session.chart_options()
    };

    let data = session
        .render_chart(&ChartRequest::histogram("GDP_per_capita"), &options)
        .unwrap();

    let Some(ChartData::Histogram(hist)) = data else {
        panic!("expected histogram data");
    };
    assert_eq!(hist.edges.len(), 5);
    assert_eq!(hist.series.len(), 1);
    assert_eq!(hist.series[0].counts.iter().sum::<u64>(), 5);
}

#[test]
fn test_scatter_colored_by_region() {
    let session = loaded_session();
    let request = ChartRequest::scatterplot("GDP_per_capita", "Happiness_Score").with_color("Region");

    let descriptor = session.build_chart(&request).unwrap();
    assert_eq!(descriptor.title, "Gdp Per Capita vs. Happiness Score");

    let Some(ChartData::Scatter(scatter)) = session.render_chart(&request, &session.chart_options()).unwrap() else {
        panic!("expected scatter data");
    };
    let labels: Vec<Option<&str>> = scatter.series.iter().map(|s| s.label.as_deref()).collect();
    assert_eq!(
        labels,
        vec![Some("Western Europe"), Some("Middle East"), Some("Latin America")]
    );
    assert_eq!(scatter.series[0].points.len(), 3);
}

#[test]
fn test_box_plot_per_category() {
    let session = loaded_session();
    let data = session
        .render_chart(
            &ChartRequest::box_plot("Region", "Happiness_Score"),
            &session.chart_options(),
        )
        .unwrap();

    let Some(ChartData::Box(boxes)) = data else {
        panic!("expected box data");
    };
    assert_eq!(boxes.boxes.len(), 3);
    assert_eq!(boxes.boxes[0].label, "Western Europe");
    assert_eq!(boxes.boxes[0].count, 3);
    assert_eq!(boxes.boxes[0].median, 7.59);
}

#[test]
fn test_multi_selection_keeps_going_after_failure() {
    let session = loaded_session();
    let results = session
        .build_charts(&[
            ChartRequest::box_plot("Happiness_Score", "GDP_per_capita"),
            ChartRequest::histogram("Happiness_Score"),
        ])
        .unwrap();

    assert!(matches!(
        results[0],
        Err(ChartError::TypeMismatch { role: Role::X, .. })
    ));
    assert_eq!(results[1].as_ref().map(|c| c.title.as_str()), Ok("Histogram of Happiness_Score"));
}

#[test]
fn test_render_propagates_validation_error() {
    let session = loaded_session();
    let result = session.render_chart(&ChartRequest::histogram("Region"), &session.chart_options());
    assert!(matches!(
        result,
        Err(SessionError::Chart(ChartError::TypeMismatch { .. }))
    ));
}
