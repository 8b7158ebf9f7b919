//! Session-scoped dashboard state.
//!
//! A [`Session`] owns the single active dataset for one user. Uploads
//! replace it wholesale; a failed upload clears it, so no page ever works
//! against stale data.

use crate::app::pages::{
    AWAITING_UPLOAD_MESSAGE, ExplorationView, HomeView, OverviewView, Page, PageView,
};
use crate::app::profile::DashboardProfile;
use crate::charts::{ChartDescriptor, ChartError, ChartHandler, ColumnClassification, classify_columns};
use crate::data::{
    ChartData, ChartOptions, DataError, Upload, describe, describe_categorical, load_dataset,
    missing_values, preview, process_chart_data,
};
use crate::settings::DashboardSettings;
use crate::types::{ChartRequest, Dataset};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No dataset loaded; upload a file first")]
    NoDataset,

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Chart(#[from] ChartError),
}

pub struct Session {
    profile: DashboardProfile,
    settings: DashboardSettings,
    handler: ChartHandler,
    dataset: Option<Dataset>,
    last_error: Option<String>,
}

impl Session {
    pub fn new(profile: DashboardProfile, settings: DashboardSettings) -> Self {
        let handler = profile.handler();
        Self {
            profile,
            settings,
            handler,
            dataset: None,
            last_error: None,
        }
    }

    pub fn profile(&self) -> &DashboardProfile {
        &self.profile
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Message from the most recent failed upload
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Replace the active dataset with a decoded upload.
    ///
    /// On failure the previous dataset is discarded and the error kept for
    /// display.
    pub fn upload(&mut self, upload: &Upload) -> Result<&Dataset, SessionError> {
        match self.decode(upload) {
            Ok(dataset) => {
                tracing::info!(
                    file = %upload.file_name,
                    rows = dataset.row_count(),
                    columns = dataset.column_count(),
                    "Dataset loaded"
                );
                self.last_error = None;
                Ok(self.dataset.insert(dataset))
            }
            Err(e) => {
                tracing::warn!(file = %upload.file_name, "Upload rejected: {}", e);
                self.dataset = None;
                self.last_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    fn decode(&self, upload: &Upload) -> Result<Dataset, DataError> {
        if let Some(format) = upload.format() {
            if !self.profile.accepts(format) {
                return Err(DataError::NotAccepted { format });
            }
        }
        load_dataset(upload, &self.settings)
    }

    /// Drop the active dataset, e.g. when the upload widget is cleared
    pub fn clear(&mut self) {
        if self.dataset.take().is_some() {
            tracing::info!("Dataset cleared");
        }
        self.last_error = None;
    }

    fn active(&self) -> Result<&Dataset, SessionError> {
        self.dataset.as_ref().ok_or(SessionError::NoDataset)
    }

    pub fn classification(&self) -> Result<ColumnClassification, SessionError> {
        Ok(classify_columns(self.active()?))
    }

    pub fn build_chart(&self, request: &ChartRequest) -> Result<ChartDescriptor<'_>, SessionError> {
        let dataset = self.active()?;
        Ok(self.handler.build_chart(dataset, request)?)
    }

    /// Build every chart selected in one interaction
    pub fn build_charts(
        &self,
        requests: &[ChartRequest],
    ) -> Result<Vec<Result<ChartDescriptor<'_>, ChartError>>, SessionError> {
        let dataset = self.active()?;
        Ok(self.handler.build_charts(dataset, requests))
    }

    /// Build a chart and process it into render-ready data
    pub fn render_chart(
        &self,
        request: &ChartRequest,
        options: &ChartOptions,
    ) -> Result<Option<ChartData>, SessionError> {
        let descriptor = self.build_chart(request)?;
        Ok(process_chart_data(&descriptor, options))
    }

    /// Chart options derived from this session's settings
    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions::from_settings(&self.settings)
    }

    /// Content for a page given the current state
    pub fn view(&self, page: Page) -> PageView {
        let rows = self.settings.preview_rows;

        match (page, self.dataset.as_ref()) {
            (Page::Home, dataset) => PageView::Home(HomeView {
                title: self.profile.title.clone(),
                welcome: self.profile.welcome.clone(),
                preview: dataset.map(|ds| preview(ds, rows)),
            }),
            (Page::Extras, _) => match &self.profile.extras {
                Some(text) => PageView::Extras {
                    title: self.profile.title.clone(),
                    text: text.clone(),
                },
                None => PageView::NotOffered { page },
            },
            (Page::DataOverview, Some(ds)) => PageView::Overview(OverviewView {
                dataset_name: ds.name().to_string(),
                row_count: ds.row_count(),
                column_count: ds.column_count(),
                preview: preview(ds, rows),
                numeric_summary: describe(ds),
                categorical_summary: describe_categorical(ds),
                missing: missing_values(ds),
            }),
            (Page::Exploration, Some(ds)) => PageView::Exploration(ExplorationView {
                classification: classify_columns(ds),
                chart_kinds: self.handler.supported_kinds().to_vec(),
            }),
            (Page::DataOverview | Page::Exploration, None) => PageView::AwaitingUpload {
                message: AWAITING_UPLOAD_MESSAGE,
                error: self.last_error.clone(),
            },
        }
    }
}
