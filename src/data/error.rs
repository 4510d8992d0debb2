use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a reference table into a [`Catalog`](super::Catalog).
///
/// Always fatal for that source; nothing is retried.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("expected a top-level JSON array of records")]
    NotRecordArray,

    #[error("row {row}: {reason}")]
    Malformed { row: usize, reason: String },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}
