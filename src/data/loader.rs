//! Upload decoding
//!
//! Detects the file format from the upload's name, enforces size and row
//! limits, and dispatches to the matching reader.
//!
//! ## Limits
//!
//! - Uploads larger than `max_file_size_mb` return [`DataError::TooLarge`]
//! - Uploads with more than `max_rows` data rows return [`DataError::TooManyRows`]

use crate::data::error::{DataError, DataResult};
use crate::data::{excel, frame, json_parser};
use crate::settings::DashboardSettings;
use crate::types::{Dataset, DatasetOrigin, FileFormat};
use std::path::Path;
use std::time::Instant;

/// An uploaded file: its original name and raw bytes
#[derive(Clone, Debug)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, checking its size before reading it
    pub fn from_path(path: &Path, settings: &DashboardSettings) -> DataResult<Self> {
        let metadata = std::fs::metadata(path)?;
        check_size(metadata.len(), settings)?;

        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("upload")
            .to_string();

        Ok(Self {
            file_name,
            bytes: std::fs::read(path)?,
        })
    }

    /// Format implied by the file extension
    pub fn format(&self) -> Option<FileFormat> {
        FileFormat::from_file_name(&self.file_name)
    }

    /// File name without its extension, used as the dataset name
    pub fn stem(&self) -> &str {
        Path::new(&self.file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Data")
    }
}

/// Decode an upload into a dataset
pub fn load_dataset(upload: &Upload, settings: &DashboardSettings) -> DataResult<Dataset> {
    let start = Instant::now();

    let format = upload.format().ok_or_else(|| DataError::UnsupportedFormat {
        file_name: upload.file_name.clone(),
    })?;

    check_size(upload.bytes.len() as u64, settings)?;

    if upload.bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(DataError::EmptyFile);
    }

    let columns = match format {
        FileFormat::Csv => {
            let separator = detect_delimiter(&upload.bytes);
            frame::read_delimited(&upload.bytes, separator, settings)?
        }
        FileFormat::Tsv => frame::read_delimited(&upload.bytes, b'\t', settings)?,
        FileFormat::Excel => excel::read_workbook(&upload.bytes)?,
        FileFormat::Json => json_parser::parse_json_bytes(&upload.bytes)?,
    };

    if columns.is_empty() {
        return Err(DataError::NoColumns);
    }

    let rows = columns.first().map(|c| c.len()).unwrap_or(0);
    if rows > settings.max_rows {
        return Err(DataError::TooManyRows {
            rows,
            max_rows: settings.max_rows,
        });
    }

    let dataset = Dataset::new(
        upload.stem(),
        DatasetOrigin::Upload {
            file_name: upload.file_name.clone(),
            format,
        },
        columns,
    )?;

    tracing::debug!(
        "Loaded {} {} with {} rows x {} cols in {:?}",
        format,
        upload.file_name,
        dataset.row_count(),
        dataset.column_count(),
        start.elapsed()
    );

    Ok(dataset)
}

fn check_size(len: u64, settings: &DashboardSettings) -> DataResult<()> {
    let size_mb = len / (1024 * 1024);
    if size_mb > settings.max_file_size_mb as u64 {
        return Err(DataError::TooLarge {
            size_mb,
            max_mb: settings.max_file_size_mb,
        });
    }
    Ok(())
}

/// Pick the delimiter that appears most often in the first few lines
fn detect_delimiter(bytes: &[u8]) -> u8 {
    let head: Vec<u8> = bytes
        .split(|b| *b == b'\n')
        .take(5)
        .flatten()
        .copied()
        .collect();

    let count = |delimiter: u8| head.iter().filter(|b| **b == delimiter).count();
    let comma_count = count(b',');
    let tab_count = count(b'\t');
    let semicolon_count = count(b';');

    if tab_count > comma_count && tab_count > semicolon_count {
        b'\t'
    } else if semicolon_count > comma_count {
        b';'
    } else {
        b','
    }
}

/// Check if a file name has one of the loadable extensions
pub fn is_data_file(file_name: &str) -> bool {
    FileFormat::from_file_name(file_name).is_some()
}
