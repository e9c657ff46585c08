use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Load-time errors (fatal at startup)
// ---------------------------------------------------------------------------

/// Why a launch dataset could not be loaded.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("unreadable Arrow column: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: payload mass '{value}' is not a non-negative number")]
    InvalidPayload { row: usize, value: String },

    #[error("row {row}: outcome '{value}' is not 0 or 1")]
    InvalidOutcome { row: usize, value: String },

    #[error("row {row}: launch site is empty")]
    EmptySite { row: usize },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("dataset contains no launch records")]
    Empty,
}

// ---------------------------------------------------------------------------
// Post-load errors (recovered by the control layer)
// ---------------------------------------------------------------------------

/// A site selector value outside the dataset's site enumeration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown launch site: {0}")]
pub struct InvalidSelectionError(pub String);
