//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `DatasetBuilder` - Builder pattern for in-memory datasets
//! - `airline_dataset()` / `happiness_csv()` - Common fixtures

use databoard::data::Upload;
use databoard::types::{
    CategoricalColumn, Column, Dataset, DatasetOrigin, NumericColumn,
};

// ============================================================================
// DatasetBuilder - Builder pattern for creating test datasets
// ============================================================================

/// Builder for in-memory datasets.
///
/// # Example
/// ```ignore
/// let ds = DatasetBuilder::new("airline")
///     .numeric("Age", &[30.0, 41.0])
///     .categorical("Class", &["Eco", "Business"])
///     .build();
/// ```
pub struct DatasetBuilder {
    name: String,
    columns: Vec<Column>,
}

impl DatasetBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
        }
    }

    /// Add a numeric column with no missing values.
    pub fn numeric(self, name: &str, values: &[f64]) -> Self {
        self.numeric_opt(name, values.iter().map(|v| Some(*v)).collect())
    }

    /// Add a numeric column where `None` is a missing cell.
    pub fn numeric_opt(mut self, name: &str, values: Vec<Option<f64>>) -> Self {
        self.columns
            .push(Column::Numeric(NumericColumn::new(name, values)));
        self
    }

    /// Add a categorical column; empty strings become missing cells.
    pub fn categorical(mut self, name: &str, values: &[&str]) -> Self {
        let values = values
            .iter()
            .map(|v| (!v.is_empty()).then(|| v.to_string()))
            .collect();
        self.columns
            .push(Column::Categorical(CategoricalColumn::new(name, values)));
        self
    }

    pub fn build(self) -> Dataset {
        Dataset::new(self.name, DatasetOrigin::InMemory, self.columns).unwrap()
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Small slice of the airline passenger satisfaction data.
pub fn airline_dataset() -> Dataset {
    DatasetBuilder::new("airline")
        .categorical("Gender", &["Male", "Female", "Female", "Male", "Female"])
        .numeric("Age", &[13.0, 25.0, 26.0, 61.0, 47.0])
        .categorical("Class", &["Eco Plus", "Business", "Business", "Eco", "Eco"])
        .numeric("Flight Distance", &[460.0, 235.0, 1142.0, 562.0, 214.0])
        .numeric_opt(
            "Arrival Delay in Minutes",
            vec![Some(18.0), Some(6.0), None, Some(9.0), Some(0.0)],
        )
        .build()
}

/// Happiest-countries CSV content.
pub const HAPPINESS_CSV: &str = "\
Country,Region,Happiness_Score,GDP_per_capita
Finland,Western Europe,7.80,1.89
Denmark,Western Europe,7.59,1.95
Iceland,Western Europe,7.53,1.93
Israel,Middle East,7.47,1.83
Costa Rica,Latin America,6.61,1.42
";

pub fn happiness_csv() -> Upload {
    Upload::new("happiness.csv", HAPPINESS_CSV)
}
