//! Record types flowing through the pipeline.
//!
//! A [`Cell`] is one raw grid value. The extractor assembles cells into a
//! [`CandidateRecord`]; the validator promotes accepted candidates to
//! [`FlatRecord`]s, which are what the encoder serializes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::FieldType;
use crate::value::CanonicalValue;

/// A single raw value from the input grid. Immutable once read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell<'a> {
    /// Raw text exactly as ingested.
    pub raw: &'a str,
    /// Zero-based row index in the grid.
    pub row: usize,
    /// Zero-based column index in the grid.
    pub col: usize,
}

impl<'a> Cell<'a> {
    pub fn new(raw: &'a str, row: usize, col: usize) -> Self {
        Self { raw, row, col }
    }

    /// The raw text with surrounding whitespace removed.
    pub fn trimmed(&self) -> &'a str {
        self.raw.trim()
    }

    /// True if the cell holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }
}

/// A per-row candidate record: canonical values keyed by field type.
///
/// Missing fields are simply absent; there are no null placeholders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Zero-based index of the originating input row.
    pub row: usize,
    fields: BTreeMap<FieldType, CanonicalValue>,
}

impl CandidateRecord {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            fields: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, field: FieldType, value: CanonicalValue) {
        self.fields.insert(field, value);
    }

    pub fn get(&self, field: FieldType) -> Option<&CanonicalValue> {
        self.fields.get(&field)
    }

    pub fn contains(&self, field: FieldType) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in `FieldType` declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldType, &CanonicalValue)> {
        self.fields.iter().map(|(field, value)| (*field, value))
    }
}

/// A fully validated record ready for flat-file encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRecord {
    /// Zero-based index of the originating input row.
    pub row: usize,
    fields: BTreeMap<FieldType, CanonicalValue>,
}

impl FlatRecord {
    /// Promotes an accepted candidate. Only the validator should call this.
    pub fn from_accepted(candidate: CandidateRecord) -> Self {
        Self {
            row: candidate.row,
            fields: candidate.fields,
        }
    }

    pub fn get(&self, field: FieldType) -> Option<&CanonicalValue> {
        self.fields.get(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldType, &CanonicalValue)> {
        self.fields.iter().map(|(field, value)| (*field, value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
