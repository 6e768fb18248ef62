use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a run before any row is processed.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV is missing required column: {0}")]
    MissingColumn(String),
}

/// Failures scoped to one row (or one photo of a row). Logged and skipped;
/// never fatal to the batch.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("malformed row: {0}")]
    Malformed(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Invalid(#[from] restock_core::CoreError),

    #[error("invalid price '{0}'")]
    InvalidPrice(String),

    #[error(transparent)]
    Store(#[from] restock_store::StoreError),

    #[error("failed to read photo {path}: {source}")]
    ReadPhoto {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
