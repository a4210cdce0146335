use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a source file into a [`Dataset`](super::model::Dataset).
///
/// Fatal at startup: the dashboard never opens without a dataset.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("row {row}: invalid value in column '{column}': {reason}")]
    InvalidValue {
        row: usize,
        column: String,
        reason: String,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("reading arrow batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

/// A row the aggregation step cannot place into a chart.
///
/// Only the chart being recomputed fails; the other one is unaffected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregationError {
    #[error("row {row}: launch site is missing")]
    MissingSite { row: usize },

    #[error("row {row}: booster version category is missing")]
    MissingBoosterCategory { row: usize },

    #[error("row {row}: outcome must be 0 or 1, found {value}")]
    InvalidOutcome { row: usize, value: i64 },

    #[error("row {row}: payload mass is not a finite number")]
    InvalidPayload { row: usize },
}
