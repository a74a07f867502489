//! Fatal configuration errors.
//!
//! Per the error taxonomy, only configuration and input-availability
//! failures abort a run; everything else is handled row-locally and
//! reported. These are the fatal ones.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("unknown field name in configuration: {name}")]
    UnknownField { name: String },

    #[error("no required fields were specified")]
    NoRequiredFields,

    #[error("invalid postal pattern for locale {locale}: {message}")]
    InvalidPostalPattern { locale: String, message: String },

    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("flat layout is invalid: {0}")]
    InvalidLayout(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
