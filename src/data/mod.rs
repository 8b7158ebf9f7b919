//! Data loading and processing module
//!
//! Turns uploads into typed datasets and datasets into the numbers the
//! pages and charts display.
//!
//! ## Formats
//!
//! - CSV/TSV through polars (`frame`)
//! - Spreadsheets through calamine (`excel`)
//! - JSON arrays of records through serde_json (`json_parser`)
//!
//! ## Error Handling
//!
//! All loading returns `DataResult<T>` which uses the `DataError` type.
//! Common errors include:
//! - `TooLarge`: File exceeds size limits
//! - `TooManyRows`: Dataset exceeds row limits
//! - `UnsupportedFormat`: Extension is not a known data format
//! - `Csv`/`Json`/`Spreadsheet`: Parse errors

pub mod chart_engine;
pub mod error;
mod excel;
mod frame;
mod json_parser;
mod loader;
pub mod stats;

pub use chart_engine::*;
pub use error::*;
pub use loader::*;
pub use stats::*;
