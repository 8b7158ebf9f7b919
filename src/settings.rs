//! Dashboard settings, stored as JSON in the user's config directory.
//!
//! A missing file means defaults; unknown or absent keys fall back to their
//! default values.

use crate::constants::{
    DEFAULT_HISTOGRAM_BINS, DEFAULT_MAX_CATEGORIES, DEFAULT_PREVIEW_ROWS, INFER_SCHEMA_ROWS,
    MAX_CHART_CATEGORIES, MAX_FILE_SIZE_MB, MAX_HISTOGRAM_BINS, MAX_ROWS,
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Rows shown in dataset previews
    pub preview_rows: usize,
    /// Largest accepted upload, in megabytes
    pub max_file_size_mb: usize,
    /// Largest accepted upload, in data rows
    pub max_rows: usize,
    /// Rows sampled when inferring CSV column types
    pub infer_schema_rows: usize,
    pub histogram_bins: usize,
    pub max_categories: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
            max_file_size_mb: MAX_FILE_SIZE_MB,
            max_rows: MAX_ROWS,
            infer_schema_rows: INFER_SCHEMA_ROWS,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            max_categories: DEFAULT_MAX_CATEGORIES,
        }
    }
}

impl DashboardSettings {
    /// Load settings from `path`; a missing file yields defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let settings: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid settings file {}", path.display()))?;

        Ok(settings.normalized())
    }

    /// Load from the default location, falling back to defaults on any error
    pub fn load_or_default() -> Self {
        let Some(path) = default_settings_path() else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Using default settings: {:#}", e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;
        Ok(())
    }

    /// Counts that must be positive are raised to 1; chart sizes are capped
    fn normalized(mut self) -> Self {
        self.preview_rows = self.preview_rows.max(1);
        self.infer_schema_rows = self.infer_schema_rows.max(1);
        self.histogram_bins = self.histogram_bins.clamp(1, MAX_HISTOGRAM_BINS);
        self.max_categories = self.max_categories.clamp(1, MAX_CHART_CATEGORIES);
        self
    }
}

/// `<config_dir>/databoard/settings.json`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("databoard").join("settings.json"))
}
