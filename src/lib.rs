//! databoard - upload a table, classify its columns, build validated charts.
//!
//! The flow is: an upload becomes a typed [`types::Dataset`]
//! ([`data::load_dataset`]), its columns are split into numeric and
//! categorical sets ([`charts::classify_columns`]), and a user's
//! [`types::ChartRequest`] is validated into a [`charts::ChartDescriptor`]
//! ([`charts::build_chart`]) for a renderer to draw. [`app::Session`] ties
//! these together for one user.

pub mod app;
pub mod charts;
pub mod constants;
pub mod data;
pub mod logging;
pub mod settings;
pub mod types;
