//! Dashboard presets.
//!
//! Both dashboards share one chart handler; a profile only decides the
//! title, welcome text, which chart kinds are offered and which upload
//! formats are accepted.

use crate::app::pages::Page;
use crate::charts::ChartHandler;
use crate::types::{ChartKind, FileFormat};

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardProfile {
    pub title: String,
    pub welcome: String,
    pub supported_kinds: Vec<ChartKind>,
    pub accepted_formats: Vec<FileFormat>,
    /// Text for the Extras page; the page is hidden when absent
    pub extras: Option<String>,
}

impl DashboardProfile {
    /// Airline passenger satisfaction: spreadsheet uploads, no scatterplots
    pub fn airline() -> Self {
        Self {
            title: "Airline Satisfaction Prediction".to_string(),
            welcome: "Explore the Airline Passenger Satisfaction dataset: flight distance, \
                      seat comfort, inflight entertainment and more."
                .to_string(),
            supported_kinds: vec![ChartKind::Histogram, ChartKind::BoxPlot, ChartKind::BarPlot],
            accepted_formats: vec![FileFormat::Excel],
            extras: Some(
                "Passenger satisfaction with major airlines fell for a second consecutive \
                 year, driven largely by the cost of airfare."
                    .to_string(),
            ),
        }
    }

    /// Happiest countries: CSV uploads, every chart kind
    pub fn happiness() -> Self {
        Self {
            title: "Happiest Countries Analysis".to_string(),
            welcome: "Upload a dataset, explore happiness scores, and visualize key metrics."
                .to_string(),
            supported_kinds: ChartKind::all().to_vec(),
            accepted_formats: vec![FileFormat::Csv],
            extras: None,
        }
    }

    /// General-purpose explorer accepting every format and chart kind
    pub fn explorer() -> Self {
        Self {
            title: "Data Explorer".to_string(),
            welcome: "Upload a table to see its summary statistics and chart its columns."
                .to_string(),
            supported_kinds: ChartKind::all().to_vec(),
            accepted_formats: vec![
                FileFormat::Csv,
                FileFormat::Tsv,
                FileFormat::Excel,
                FileFormat::Json,
            ],
            extras: None,
        }
    }

    pub fn accepts(&self, format: FileFormat) -> bool {
        self.accepted_formats.contains(&format)
    }

    pub fn handler(&self) -> ChartHandler {
        ChartHandler::new(self.supported_kinds.iter().copied())
    }

    /// Pages offered in navigation order
    pub fn pages(&self) -> Vec<Page> {
        let mut pages = vec![Page::Home, Page::DataOverview, Page::Exploration];
        if self.extras.is_some() {
            pages.push(Page::Extras);
        }
        pages
    }
}
