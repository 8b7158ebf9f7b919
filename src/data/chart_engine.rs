//! Chart data processing engine
//!
//! Turns a validated [`ChartDescriptor`] into render-ready series. Heavy
//! operations (binning, grouping, aggregation, quartiles, sorting) happen
//! here rather than in the renderer.

use crate::charts::ChartDescriptor;
use crate::constants::{BOX_WHISKER_IQR, CHART_COLORS, MAX_CHART_CATEGORIES, MAX_HISTOGRAM_BINS};
use crate::data::stats::quantile;
use crate::settings::DashboardSettings;
use crate::types::{AggregationType, ChartKind, Column, Role, SortOrder};
use serde::Serialize;
use std::collections::HashMap;

/// Rendering knobs that do not change what a chart means
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChartOptions {
    pub histogram_bins: usize,
    pub max_categories: usize,
    pub aggregation: AggregationType,
    pub sort_order: SortOrder,
}

impl ChartOptions {
    pub fn from_settings(settings: &DashboardSettings) -> Self {
        Self {
            histogram_bins: settings.histogram_bins.clamp(1, MAX_HISTOGRAM_BINS),
            max_categories: settings.max_categories.clamp(1, MAX_CHART_CATEGORIES),
            aggregation: AggregationType::default(),
            sort_order: SortOrder::default(),
        }
    }

    pub fn with_aggregation(mut self, aggregation: AggregationType) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::from_settings(&DashboardSettings::default())
    }
}

/// Processed chart data ready for rendering
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartData {
    Histogram(HistogramData),
    Box(BoxPlotData),
    Bar(BarData),
    Scatter(ScatterData),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistogramData {
    pub x_label: String,
    /// `bins + 1` ascending edges
    pub edges: Vec<f64>,
    /// One series per color group, or a single unlabeled series
    pub series: Vec<HistogramSeries>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistogramSeries {
    pub label: Option<String>,
    pub color: &'static str,
    pub counts: Vec<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoxPlotData {
    pub x_label: String,
    pub y_label: String,
    pub boxes: Vec<BoxSummary>,
}

/// Five-number summary of one category, whiskers at 1.5 IQR
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoxSummary {
    pub label: String,
    pub color: &'static str,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BarData {
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ChartPoint>,
    /// Maximum value for scaling
    pub max_value: f64,
    /// Minimum value for scaling
    pub min_value: f64,
}

/// A single labeled value
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScatterData {
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ScatterSeries>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub label: Option<String>,
    pub color: &'static str,
    pub points: Vec<(f64, f64)>,
}

/// Process a descriptor into chart-ready data
///
/// Returns `None` when no row has the values the chart needs.
pub fn process_chart_data(descriptor: &ChartDescriptor<'_>, options: &ChartOptions) -> Option<ChartData> {
    let x = descriptor.column(Role::X)?;
    let y = descriptor.column(Role::Y);
    let color = descriptor.column(Role::Color);

    match descriptor.kind {
        ChartKind::Histogram => histogram(x, color, options).map(ChartData::Histogram),
        ChartKind::BoxPlot => box_plot(x, y?, options).map(ChartData::Box),
        ChartKind::BarPlot => bar_plot(x, y?, options).map(ChartData::Bar),
        ChartKind::Scatterplot => scatter(x, y?, color).map(ChartData::Scatter),
    }
}

fn color_at(index: usize) -> &'static str {
    CHART_COLORS[index % CHART_COLORS.len()]
}

fn label_at(column: Option<&Column>, row: usize) -> Option<String> {
    column
        .and_then(Column::as_categorical)
        .and_then(|c| c.values.get(row).cloned().flatten())
}

fn value_at(column: &Column, row: usize) -> Option<f64> {
    column
        .as_numeric()
        .and_then(|c| c.values.get(row).copied().flatten())
}

/// Group `(label, value)` pairs by label, preserving insertion order
fn group_by_label(pairs: impl Iterator<Item = (String, f64)>) -> Vec<(String, Vec<f64>)> {
    let mut group_order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<f64>> = HashMap::new();

    for (label, value) in pairs {
        if !groups.contains_key(&label) {
            group_order.push(label.clone());
        }
        groups.entry(label).or_default().push(value);
    }

    group_order
        .into_iter()
        .filter_map(|label| groups.remove(&label).map(|values| (label, values)))
        .collect()
}

fn histogram(x: &Column, color: Option<&Column>, options: &ChartOptions) -> Option<HistogramData> {
    let rows: Vec<(Option<String>, f64)> = (0..x.len())
        .filter_map(|row| value_at(x, row).map(|v| (label_at(color, row), v)))
        .filter(|(label, _)| color.is_none() || label.is_some())
        .collect();

    let min = rows.iter().map(|(_, v)| *v).reduce(f64::min)?;
    let max = rows.iter().map(|(_, v)| *v).reduce(f64::max)?;

    let (bins, start, width) = if max > min {
        let bins = options.histogram_bins.clamp(1, MAX_HISTOGRAM_BINS);
        (bins, min, (max - min) / bins as f64)
    } else {
        (1, min - 0.5, 1.0)
    };
    let edges: Vec<f64> = (0..=bins).map(|i| start + width * i as f64).collect();
    let bin_of = |v: f64| (((v - start) / width).floor() as usize).min(bins - 1);

    let series = if color.is_some() {
        let grouped = group_by_label(
            rows.into_iter()
                .filter_map(|(label, v)| label.map(|l| (l, v))),
        );
        grouped
            .into_iter()
            .enumerate()
            .map(|(i, (label, values))| {
                let mut counts = vec![0u64; bins];
                for v in values {
                    counts[bin_of(v)] += 1;
                }
                HistogramSeries {
                    label: Some(label),
                    color: color_at(i),
                    counts,
                }
            })
            .collect()
    } else {
        let mut counts = vec![0u64; bins];
        for (_, v) in rows {
            counts[bin_of(v)] += 1;
        }
        vec![HistogramSeries {
            label: None,
            color: color_at(0),
            counts,
        }]
    };

    Some(HistogramData {
        x_label: x.name().to_string(),
        edges,
        series,
    })
}

fn box_plot(x: &Column, y: &Column, options: &ChartOptions) -> Option<BoxPlotData> {
    let grouped = group_by_label(
        (0..x.len()).filter_map(|row| Some((label_at(Some(x), row)?, value_at(y, row)?))),
    );

    let boxes: Vec<BoxSummary> = grouped
        .into_iter()
        .take(options.max_categories)
        .enumerate()
        .filter_map(|(i, (label, mut values))| {
            values.sort_by(f64::total_cmp);
            let q1 = quantile(&values, 0.25)?;
            let median = quantile(&values, 0.5)?;
            let q3 = quantile(&values, 0.75)?;
            let fence = BOX_WHISKER_IQR * (q3 - q1);
            let (low_fence, high_fence) = (q1 - fence, q3 + fence);

            let inside = values.iter().copied().filter(|v| (low_fence..=high_fence).contains(v));
            let lower_whisker = inside.clone().reduce(f64::min).unwrap_or(q1);
            let upper_whisker = inside.reduce(f64::max).unwrap_or(q3);
            let outliers = values
                .iter()
                .copied()
                .filter(|v| !(low_fence..=high_fence).contains(v))
                .collect();

            Some(BoxSummary {
                label,
                color: color_at(i),
                count: values.len(),
                min: *values.first()?,
                q1,
                median,
                q3,
                max: *values.last()?,
                lower_whisker,
                upper_whisker,
                outliers,
            })
        })
        .collect();

    if boxes.is_empty() {
        return None;
    }

    Some(BoxPlotData {
        x_label: x.name().to_string(),
        y_label: y.name().to_string(),
        boxes,
    })
}

fn bar_plot(x: &Column, y: &Column, options: &ChartOptions) -> Option<BarData> {
    let grouped = group_by_label(
        (0..x.len()).filter_map(|row| Some((label_at(Some(x), row)?, value_at(y, row)?))),
    );

    if grouped.is_empty() {
        return None;
    }

    // Apply aggregation in insertion order
    let mut points: Vec<(String, f64)> = grouped
        .into_iter()
        .map(|(label, values)| {
            let aggregated = match options.aggregation {
                AggregationType::Sum => values.iter().sum(),
                AggregationType::Average => values.iter().sum::<f64>() / values.len() as f64,
                AggregationType::Count => values.len() as f64,
                AggregationType::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
                AggregationType::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            };
            (label, aggregated)
        })
        .collect();

    match options.sort_order {
        SortOrder::None => {}
        SortOrder::LabelAsc => points.sort_by(|a, b| a.0.cmp(&b.0)),
        SortOrder::LabelDesc => points.sort_by(|a, b| b.0.cmp(&a.0)),
        SortOrder::ValueAsc => points.sort_by(|a, b| a.1.total_cmp(&b.1)),
        SortOrder::ValueDesc => points.sort_by(|a, b| b.1.total_cmp(&a.1)),
    }

    let points: Vec<ChartPoint> = points
        .into_iter()
        .take(options.max_categories)
        .enumerate()
        .map(|(i, (label, value))| ChartPoint {
            label,
            value,
            color: color_at(i),
        })
        .collect();

    let max_value = points.iter().map(|p| p.value).reduce(f64::max)?;
    let min_value = points.iter().map(|p| p.value).reduce(f64::min)?;

    Some(BarData {
        x_label: x.name().to_string(),
        y_label: y.name().to_string(),
        points,
        max_value,
        min_value,
    })
}

fn scatter(x: &Column, y: &Column, color: Option<&Column>) -> Option<ScatterData> {
    let rows = (0..x.len()).filter_map(|row| Some((label_at(color, row), value_at(x, row)?, value_at(y, row)?)));

    let series: Vec<ScatterSeries> = if color.is_some() {
        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Vec<(f64, f64)>> = HashMap::new();
        for (label, xv, yv) in rows {
            let Some(label) = label else { continue };
            if !groups.contains_key(&label) {
                order.push(label.clone());
            }
            groups.entry(label).or_default().push((xv, yv));
        }
        order
            .into_iter()
            .enumerate()
            .filter_map(|(i, label)| {
                let points = groups.remove(&label)?;
                Some(ScatterSeries {
                    label: Some(label),
                    color: color_at(i),
                    points,
                })
            })
            .collect()
    } else {
        let points: Vec<(f64, f64)> = rows.map(|(_, xv, yv)| (xv, yv)).collect();
        vec![ScatterSeries {
            label: None,
            color: color_at(0),
            points,
        }]
    };

    if series.iter().all(|s| s.points.is_empty()) {
        return None;
    }

    Some(ScatterData {
        x_label: x.name().to_string(),
        y_label: y.name().to_string(),
        series,
    })
}
