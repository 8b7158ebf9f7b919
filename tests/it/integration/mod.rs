//! Integration tests for databoard.
//!
//! These tests drive a `Session` the way a dashboard page would: upload,
//! navigate, pick charts.

mod chart_workflow_tests;
