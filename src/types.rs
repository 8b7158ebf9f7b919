//! Core types for databoard.
//!
//! This module defines the dataset model (typed columns fixed at load time)
//! and the chart request model that the visualization handler validates.

use crate::data::error::{DataError, DataResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Dataset Types
// ============================================================================

/// The uploaded table held in memory for a session.
///
/// Immutable once built: a new upload replaces the whole dataset.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dataset {
    name: String,
    origin: DatasetOrigin,
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Build a dataset from typed columns.
    ///
    /// Every column must have the same length and a unique name. A dataset
    /// with zero rows carries no columns: there are no values to type them by.
    pub fn new(name: impl Into<String>, origin: DatasetOrigin, columns: Vec<Column>) -> DataResult<Self> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(DataError::DuplicateColumn(column.name().to_string()));
            }
            if column.len() != row_count {
                return Err(DataError::RaggedColumn {
                    column: column.name().to_string(),
                    expected: row_count,
                    found: column.len(),
                });
            }
        }

        let columns = if row_count == 0 { Vec::new() } else { columns };

        Ok(Self {
            name: name.into(),
            origin,
            columns,
            row_count,
        })
    }

    /// Create a dataset with no rows and no columns
    pub fn empty(name: impl Into<String>, origin: DatasetOrigin) -> Self {
        Self {
            name: name.into(),
            origin,
            columns: Vec::new(),
            row_count: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> &DatasetOrigin {
        &self.origin
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by exact name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}

/// A named column whose type was decided once, at load time.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Column {
    Numeric(NumericColumn),
    Categorical(CategoricalColumn),
}

impl Column {
    pub fn name(&self) -> &str {
        match self {
            Column::Numeric(c) => &c.name,
            Column::Categorical(c) => &c.name,
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::Numeric(_) => ColumnKind::Numeric,
            Column::Categorical(_) => ColumnKind::Categorical,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(c) => c.values.len(),
            Column::Categorical(c) => c.values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of missing cells
    pub fn missing_count(&self) -> usize {
        match self {
            Column::Numeric(c) => c.values.iter().filter(|v| v.is_none()).count(),
            Column::Categorical(c) => c.values.iter().filter(|v| v.is_none()).count(),
        }
    }

    /// Cell rendered as text, empty when missing or out of range
    pub fn display_value(&self, row: usize) -> String {
        match self {
            Column::Numeric(c) => match c.values.get(row).copied().flatten() {
                Some(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", n as i64),
                Some(n) => format!("{}", n),
                None => String::new(),
            },
            Column::Categorical(c) => c.values.get(row).cloned().flatten().unwrap_or_default(),
        }
    }

    pub fn as_numeric(&self) -> Option<&NumericColumn> {
        match self {
            Column::Numeric(c) => Some(c),
            Column::Categorical(_) => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&CategoricalColumn> {
        match self {
            Column::Categorical(c) => Some(c),
            Column::Numeric(_) => None,
        }
    }
}

/// Column of numbers; `None` marks a missing cell
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NumericColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl NumericColumn {
    /// NaN and infinite cells are stored as missing
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values: values
                .into_iter()
                .map(|v| v.filter(|n| n.is_finite()))
                .collect(),
        }
    }

    /// Present values in row order
    pub fn present(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(|v| *v)
    }
}

/// Column of labels; `None` marks a missing cell
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoricalColumn {
    pub name: String,
    pub values: Vec<Option<String>>,
}

impl CategoricalColumn {
    pub fn new(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Distinct labels in first-appearance order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.values
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|label| seen.insert(*label))
            .collect()
    }
}

/// The two column types a chart role can require
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl ColumnKind {
    pub fn label(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a dataset came from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DatasetOrigin {
    /// Built in memory (tests, embedding callers)
    InMemory,
    /// Decoded from an uploaded file
    Upload { file_name: String, format: FileFormat },
}

/// Upload formats the loaders understand
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    Csv,
    Tsv,
    Excel,
    Json,
}

impl FileFormat {
    /// Detect the format from a file name's extension
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        let ext = ext.to_lowercase();
        [
            FileFormat::Csv,
            FileFormat::Tsv,
            FileFormat::Excel,
            FileFormat::Json,
        ]
        .into_iter()
        .find(|format| format.extensions().contains(&ext.as_str()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileFormat::Csv => "CSV",
            FileFormat::Tsv => "TSV",
            FileFormat::Excel => "Excel",
            FileFormat::Json => "JSON",
        }
    }

    /// Lowercase file extensions mapped to this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            FileFormat::Csv => &["csv"],
            FileFormat::Tsv => &["tsv", "tab"],
            FileFormat::Excel => &["xlsx", "xls", "xlsm", "xlsb", "ods"],
            FileFormat::Json => &["json"],
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Chart Types
// ============================================================================

/// Types of charts available
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Histogram,
    BoxPlot,
    BarPlot,
    Scatterplot,
}

impl ChartKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Histogram => "Histogram",
            ChartKind::BoxPlot => "Box Plot",
            ChartKind::BarPlot => "Bar Plot",
            ChartKind::Scatterplot => "Scatterplot",
        }
    }

    pub fn all() -> &'static [ChartKind] {
        &[
            ChartKind::Histogram,
            ChartKind::BoxPlot,
            ChartKind::BarPlot,
            ChartKind::Scatterplot,
        ]
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown chart kind '{0}'")]
pub struct ParseChartKindError(pub String);

impl FromStr for ChartKind {
    type Err = ParseChartKindError;

    /// Accepts the labels shown in the visualization picker, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "histogram" => Ok(ChartKind::Histogram),
            "boxplot" => Ok(ChartKind::BoxPlot),
            "barplot" => Ok(ChartKind::BarPlot),
            "scatterplot" | "scatterplots" | "scatter" => Ok(ChartKind::Scatterplot),
            _ => Err(ParseChartKindError(s.to_string())),
        }
    }
}

/// The axis or purpose a column is bound to within a chart request
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    X,
    Y,
    Color,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::X => "x",
            Role::Y => "y",
            Role::Color => "color",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A user's chart selection: a kind plus column names bound to roles
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub kind: ChartKind,
    pub fields: BTreeMap<Role, String>,
}

impl ChartRequest {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            fields: BTreeMap::new(),
        }
    }

    pub fn histogram(x: impl Into<String>) -> Self {
        Self::new(ChartKind::Histogram).with_field(Role::X, x)
    }

    pub fn box_plot(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self::new(ChartKind::BoxPlot)
            .with_field(Role::X, x)
            .with_field(Role::Y, y)
    }

    pub fn bar_plot(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self::new(ChartKind::BarPlot)
            .with_field(Role::X, x)
            .with_field(Role::Y, y)
    }

    pub fn scatterplot(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self::new(ChartKind::Scatterplot)
            .with_field(Role::X, x)
            .with_field(Role::Y, y)
    }

    pub fn with_field(mut self, role: Role, column: impl Into<String>) -> Self {
        self.fields.insert(role, column.into());
        self
    }

    pub fn with_color(self, column: impl Into<String>) -> Self {
        self.with_field(Role::Color, column)
    }

    pub fn field(&self, role: Role) -> Option<&str> {
        self.fields.get(&role).map(String::as_str)
    }
}

/// Aggregation method for grouping duplicate X values
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregationType {
    /// Sum values for each group (stacked bars)
    #[default]
    Sum,
    /// Average values for each group
    Average,
    /// Count occurrences in each group
    Count,
    /// Minimum value in each group
    Min,
    /// Maximum value in each group
    Max,
}

impl AggregationType {
    pub fn label(&self) -> &'static str {
        match self {
            AggregationType::Sum => "Sum",
            AggregationType::Average => "Average",
            AggregationType::Count => "Count",
            AggregationType::Min => "Min",
            AggregationType::Max => "Max",
        }
    }
}

/// Sort order for chart categories
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Keep first-appearance order
    #[default]
    None,
    /// Sort by label ascending (A-Z, 0-9)
    LabelAsc,
    /// Sort by label descending (Z-A, 9-0)
    LabelDesc,
    /// Sort by value ascending (low to high)
    ValueAsc,
    /// Sort by value descending (high to low)
    ValueDesc,
}

impl SortOrder {
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::None => "Original",
            SortOrder::LabelAsc => "Label A→Z",
            SortOrder::LabelDesc => "Label Z→A",
            SortOrder::ValueAsc => "Value ↑",
            SortOrder::ValueDesc => "Value ↓",
        }
    }
}
