#![deny(unsafe_code)]

//! Adaptive column-type inference.
//!
//! Given a ragged grid of unlabeled text cells, this crate decides which
//! column holds which semantic field. Per-cell classifiers vote with a
//! confidence score; a per-column hypothesis accumulates those votes
//! across rows and is frozen into a [`ColumnAssignment`] after one full
//! pass. A column that starts out looking like one field type and later
//! accumulates stronger evidence for another is re-ranked automatically,
//! because ranking is always recomputed from the cumulative scores.

pub mod assignment;
pub mod classifiers;
pub mod engine;
pub mod hypothesis;
pub mod tracker;
pub mod vote;

pub use assignment::{ColumnAssignment, Diagnostic};
pub use classifiers::date::DateFormat;
pub use engine::IdentificationEngine;
pub use hypothesis::{ColumnHypothesis, TrackerConfig};
pub use tracker::HypothesisTracker;
pub use vote::{ClassificationVote, ClassifyContext};
