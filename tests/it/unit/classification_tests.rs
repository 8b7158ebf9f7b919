//! Unit tests for column classification.

use crate::helpers::{DatasetBuilder, airline_dataset};
use databoard::charts::classify_columns;
use databoard::types::{ColumnKind, Dataset, DatasetOrigin};
use std::collections::HashSet;

#[test]
fn test_partition_is_disjoint_and_exhaustive() {
    let ds = airline_dataset();
    let classification = classify_columns(&ds);

    let numeric: HashSet<&str> = classification.numeric.iter().map(String::as_str).collect();
    let categorical: HashSet<&str> = classification
        .categorical
        .iter()
        .map(String::as_str)
        .collect();
    let all: HashSet<&str> = ds.column_names().collect();

    assert!(numeric.is_disjoint(&categorical));
    assert_eq!(&numeric | &categorical, all);
    assert_eq!(
        classification.numeric.len() + classification.categorical.len(),
        ds.column_count()
    );
}

#[test]
fn test_lists_follow_column_order() {
    let classification = classify_columns(&airline_dataset());
    assert_eq!(
        classification.numeric,
        vec!["Age", "Flight Distance", "Arrival Delay in Minutes"]
    );
    assert_eq!(classification.categorical, vec!["Gender", "Class"]);
}

#[test]
fn test_classification_is_deterministic() {
    let ds = airline_dataset();
    assert_eq!(classify_columns(&ds), classify_columns(&ds.clone()));
}

#[test]
fn test_empty_dataset_has_empty_sets() {
    let ds = Dataset::empty("nothing", DatasetOrigin::InMemory);
    let classification = classify_columns(&ds);

    assert!(classification.numeric.is_empty());
    assert!(classification.categorical.is_empty());
    assert!(classification.is_empty());
}

#[test]
fn test_zero_row_columns_are_not_classified() {
    let ds = DatasetBuilder::new("headers_only")
        .numeric("Age", &[])
        .categorical("Class", &[])
        .build();

    assert!(classify_columns(&ds).is_empty());
}

#[test]
fn test_columns_of_kind() {
    let classification = classify_columns(&airline_dataset());
    assert_eq!(
        classification.columns_of(ColumnKind::Categorical),
        &["Gender".to_string(), "Class".to_string()]
    );
    assert_eq!(classification.kind_of("Age"), Some(ColumnKind::Numeric));
}
