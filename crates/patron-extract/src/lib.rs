#![deny(unsafe_code)]

//! The extraction pass: second of the two passes over the input grid.
//!
//! Identification froze a [`patron_classify::ColumnAssignment`]; this
//! crate replays the grid against it, re-running canonicalization cell
//! by cell to build one [`patron_model::CandidateRecord`] per row.
//! Cells in Unknown columns are dropped; a cell that no longer
//! canonicalizes under its column's assigned type is kept as raw text
//! so validation can report it instead of silently losing data.

mod extractor;

pub use extractor::Extractor;
