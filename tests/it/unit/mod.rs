//! Unit tests for databoard.

mod classification_tests;
mod excel_tests;
mod logging_tests;
mod snapshot_tests;
