use std::path::PathBuf;

use thiserror::Error;

/// Errors from layout handling and flat-file encoding.
#[derive(Debug, Error)]
pub enum FlatError {
    #[error("layout file not found: {path}")]
    LayoutNotFound { path: PathBuf },

    #[error("malformed layout {path}: {message}")]
    MalformedLayout { path: PathBuf, message: String },

    #[error("layout has no fields")]
    EmptyLayout,

    #[error("layout tag {tag} appears more than once")]
    DuplicateTag { tag: String },

    #[error("fixed-width layout field {tag} has no width")]
    MissingWidth { tag: String },

    #[error("line length {actual} does not match layout width {expected}")]
    WidthMismatch { expected: usize, actual: usize },

    #[error("field {tag} holds unparseable date {value:?}")]
    InvalidDate { tag: String, value: String },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
