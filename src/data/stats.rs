//! Summary statistics for the Data Overview page.
//!
//! Mirrors what a dataframe `describe()` reports: count, mean, sample
//! standard deviation, min, quartiles (linear interpolation) and max for
//! numeric columns; count, unique, top and freq for categorical ones.

use crate::types::{Column, Dataset};
use serde::Serialize;
use std::collections::HashMap;

/// Statistics for one numeric column; `None` where undefined (too few values)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

/// Statistics for one categorical column
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoricalSummary {
    pub column: String,
    pub count: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MissingCount {
    pub column: String,
    pub missing: usize,
}

/// First rows of a dataset rendered as text
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Preview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Describe every numeric column, in column order
pub fn describe(dataset: &Dataset) -> Vec<NumericSummary> {
    dataset
        .columns()
        .iter()
        .filter_map(Column::as_numeric)
        .map(|col| {
            let mut values: Vec<f64> = col.present().collect();
            values.sort_by(f64::total_cmp);
            summarize(&col.name, &values)
        })
        .collect()
}

fn summarize(name: &str, sorted: &[f64]) -> NumericSummary {
    let count = sorted.len();
    let mean = (count > 0).then(|| sorted.iter().sum::<f64>() / count as f64);
    let std = mean.filter(|_| count > 1).map(|m| {
        let ss: f64 = sorted.iter().map(|v| (v - m).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    });

    NumericSummary {
        column: name.to_string(),
        count,
        mean,
        std,
        min: sorted.first().copied(),
        p25: quantile(sorted, 0.25),
        p50: quantile(sorted, 0.5),
        p75: quantile(sorted, 0.75),
        max: sorted.last().copied(),
    }
}

/// Describe every categorical column, in column order
///
/// Ties for `top` go to the label seen first.
pub fn describe_categorical(dataset: &Dataset) -> Vec<CategoricalSummary> {
    dataset
        .columns()
        .iter()
        .filter_map(Column::as_categorical)
        .map(|col| {
            let mut order: Vec<&str> = Vec::new();
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for label in col.values.iter().flatten() {
                let entry = counts.entry(label.as_str()).or_insert_with(|| {
                    order.push(label.as_str());
                    0
                });
                *entry += 1;
            }

            let mut top: Option<(&str, usize)> = None;
            for label in &order {
                let n = counts[label];
                if top.is_none_or(|(_, best)| n > best) {
                    top = Some((*label, n));
                }
            }

            CategoricalSummary {
                column: col.name.clone(),
                count: counts.values().sum(),
                unique: order.len(),
                top: top.map(|(label, _)| label.to_string()),
                freq: top.map(|(_, n)| n).unwrap_or(0),
            }
        })
        .collect()
}

/// Missing-cell count for every column, in column order
pub fn missing_values(dataset: &Dataset) -> Vec<MissingCount> {
    dataset
        .columns()
        .iter()
        .map(|col| MissingCount {
            column: col.name().to_string(),
            missing: col.missing_count(),
        })
        .collect()
}

/// The first `n` rows as display strings
pub fn preview(dataset: &Dataset, n: usize) -> Preview {
    let rows = (0..dataset.row_count().min(n))
        .map(|row| {
            dataset
                .columns()
                .iter()
                .map(|col| col.display_value(row))
                .collect()
        })
        .collect();

    Preview {
        columns: dataset.column_names().map(str::to_string).collect(),
        rows,
    }
}

/// Quantile of sorted values with linear interpolation between neighbours
pub(crate) fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}
