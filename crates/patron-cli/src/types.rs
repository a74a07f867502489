//! Result types shared between the pipeline and the summary printers.

use std::path::PathBuf;

use patron_classify::ColumnAssignment;
use patron_model::{RejectionReason, RejectionReport};

/// Everything a finished `convert` run reports back.
#[derive(Debug)]
pub struct ConvertResult {
    pub input: PathBuf,
    /// Destination file, `None` when writing to stdout.
    pub output: Option<PathBuf>,
    pub rows_read: usize,
    pub assignment: ColumnAssignment,
    pub accepted: usize,
    /// Row index and reasons for every record flagged for review.
    pub review: Vec<(usize, Vec<RejectionReason>)>,
    pub rejections: RejectionReport,
    pub records_written: usize,
    pub dry_run: bool,
}

impl ConvertResult {
    /// True when every ingested row made it through the hard rules.
    pub fn is_clean(&self) -> bool {
        self.rejections.rows.is_empty()
    }
}

/// Outcome of an `inspect` run.
#[derive(Debug)]
pub struct InspectResult {
    pub input: PathBuf,
    pub rows_read: usize,
    pub assignment: ColumnAssignment,
}
