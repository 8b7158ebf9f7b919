//! Page content models.
//!
//! Each page is rendered from the session into a plain value the UI layer
//! draws; pages that depend on data show [`PageView::AwaitingUpload`] until
//! a valid dataset exists.

use crate::charts::ColumnClassification;
use crate::data::{CategoricalSummary, MissingCount, NumericSummary, Preview};
use crate::types::ChartKind;
use serde::Serialize;
use std::fmt;

/// Message shown on data pages before a successful upload
pub const AWAITING_UPLOAD_MESSAGE: &str = "Upload a dataset to get started!";

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize)]
pub enum Page {
    Home,
    DataOverview,
    Exploration,
    Extras,
}

impl Page {
    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::DataOverview => "Data Overview",
            Page::Exploration => "Exploratory Data Analysis",
            Page::Extras => "Extras",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageView {
    Home(HomeView),
    AwaitingUpload {
        message: &'static str,
        /// Why the last upload failed, if it did
        error: Option<String>,
    },
    Overview(OverviewView),
    Exploration(ExplorationView),
    Extras {
        title: String,
        text: String,
    },
    /// The page is not part of this dashboard's navigation
    NotOffered { page: Page },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HomeView {
    pub title: String,
    pub welcome: String,
    /// First rows of the active dataset, when one is loaded
    pub preview: Option<Preview>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverviewView {
    pub dataset_name: String,
    pub row_count: usize,
    pub column_count: usize,
    pub preview: Preview,
    pub numeric_summary: Vec<NumericSummary>,
    pub categorical_summary: Vec<CategoricalSummary>,
    pub missing: Vec<MissingCount>,
}

/// What the column pickers and chart-kind selector offer
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExplorationView {
    pub classification: ColumnClassification,
    pub chart_kinds: Vec<ChartKind>,
}
