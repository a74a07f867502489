//! Ingestion errors.
//!
//! Grid-provider failures are propagated as-is to the caller; the core
//! pipeline does not try to recover from an unreadable input.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed delimited data in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("input {path} contains no data rows")]
    EmptyInput { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, IngestError>;
