//! Application-wide constants.
//!
//! Centralizes limits and defaults so loaders, statistics and the chart
//! engine agree on them.

// ============================================================================
// Upload Limits
// ============================================================================

/// Maximum upload size in megabytes
pub const MAX_FILE_SIZE_MB: usize = 100;

/// Maximum number of data rows accepted from an upload
pub const MAX_ROWS: usize = 100_000;

/// Number of rows sampled when inferring column types
pub const INFER_SCHEMA_ROWS: usize = 1000;

// ============================================================================
// Page Defaults
// ============================================================================

/// Rows shown in the dataset preview (`head()`)
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

// ============================================================================
// Chart Defaults
// ============================================================================

/// Number of bins for histograms
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// Upper bound on histogram bins, whatever the settings file says
pub const MAX_HISTOGRAM_BINS: usize = 500;

/// Maximum number of categories drawn on a bar or box plot
pub const DEFAULT_MAX_CATEGORIES: usize = 50;

/// Upper bound on drawn categories, whatever the settings file says
pub const MAX_CHART_CATEGORIES: usize = 1000;

/// Interquartile-range multiplier for box plot whiskers
pub const BOX_WHISKER_IQR: f64 = 1.5;

/// Chart color palette, assigned to groups in first-appearance order
pub const CHART_COLORS: [&str; 8] = [
    "#2f6fe0", // Bright Blue
    "#1d9e52", // Green
    "#f5891b", // Orange
    "#8a4ae0", // Violet/Purple
    "#e03c3c", // Red
    "#1da89a", // Cyan/Teal
    "#ebcf1a", // Yellow
    "#e04aa8", // Pink/Magenta
];
