//! Per-column belief state.
//!
//! A [`ColumnHypothesis`] is a pure accumulator: every observed cell
//! adds its votes' confidences into per-type score sums and bumps
//! evidence/contradiction counters. Nothing is ever subtracted, so two
//! hypotheses built from disjoint row ranges merge by addition and the
//! merged state is identical to one built from all rows in any order.
//! Ranking is recomputed from the sums on demand, which is what lets a
//! column drift from one leading type to another as rows accumulate.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use patron_model::FieldType;
use serde::{Deserialize, Serialize};

use crate::classifiers::date::DateFormat;
use crate::vote::ClassificationVote;

/// Knobs controlling when a column's hypothesis is considered settled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// A cell voting this strongly for some type counts as a
    /// contradiction against every type it gave no evidence for.
    pub contradiction_threshold: f64,
    /// Leader score must exceed the runner-up by this ratio to commit.
    pub stability_margin: f64,
    /// Minimum evidence cells before a type can be assigned.
    pub min_rows: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            contradiction_threshold: 0.75,
            stability_margin: 1.25,
            min_rows: 2,
        }
    }
}

impl TrackerConfig {
    /// Tighter gates: more columns land on Unknown, fewer misfiles.
    pub fn strict() -> Self {
        Self {
            contradiction_threshold: 0.6,
            stability_margin: 1.5,
            min_rows: 3,
        }
    }

    /// Looser gates, for small or very dirty inputs.
    pub fn relaxed() -> Self {
        Self {
            contradiction_threshold: 0.9,
            stability_margin: 1.1,
            min_rows: 1,
        }
    }
}

/// Accumulated evidence about what one column holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnHypothesis {
    /// Cumulative confidence per type.
    scores: BTreeMap<FieldType, f64>,
    /// Cells that voted with nonzero confidence, per type.
    evidence: BTreeMap<FieldType, u32>,
    /// Cells that strongly suggested some other type, per type.
    contradictions: BTreeMap<FieldType, u32>,
    /// Which date formats fit this column's cells.
    date_formats: BTreeMap<DateFormat, u32>,
    /// Non-blank cells observed.
    cells_observed: u32,
}

impl ColumnHypothesis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one cell's full vote set into the hypothesis.
    ///
    /// Contradictions are judged per cell, not against accumulated
    /// state, so observation order cannot change the outcome.
    pub fn observe(&mut self, votes: &[ClassificationVote], config: &TrackerConfig) {
        self.cells_observed += 1;
        let strongest = votes
            .iter()
            .map(|v| f64::from(v.confidence))
            .fold(0.0_f64, f64::max);
        for vote in votes {
            if vote.is_evidence() {
                *self.scores.entry(vote.field_type).or_default() += f64::from(vote.confidence);
                *self.evidence.entry(vote.field_type).or_default() += 1;
            } else if strongest >= config.contradiction_threshold {
                *self.contradictions.entry(vote.field_type).or_default() += 1;
            }
        }
    }

    /// Tallies the date formats consistent with one cell.
    pub fn note_date_formats<I>(&mut self, formats: I)
    where
        I: IntoIterator<Item = DateFormat>,
    {
        for format in formats {
            *self.date_formats.entry(format).or_default() += 1;
        }
    }

    /// Folds another hypothesis into this one. Addition only, so merge
    /// is associative and commutative.
    pub fn merge(&mut self, other: &ColumnHypothesis) {
        for (field, score) in &other.scores {
            *self.scores.entry(*field).or_default() += score;
        }
        for (field, count) in &other.evidence {
            *self.evidence.entry(*field).or_default() += count;
        }
        for (field, count) in &other.contradictions {
            *self.contradictions.entry(*field).or_default() += count;
        }
        for (format, count) in &other.date_formats {
            *self.date_formats.entry(*format).or_default() += count;
        }
        self.cells_observed += other.cells_observed;
    }

    pub fn score(&self, field: FieldType) -> f64 {
        self.scores.get(&field).copied().unwrap_or_default()
    }

    pub fn evidence_count(&self, field: FieldType) -> u32 {
        self.evidence.get(&field).copied().unwrap_or_default()
    }

    pub fn contradiction_count(&self, field: FieldType) -> u32 {
        self.contradictions.get(&field).copied().unwrap_or_default()
    }

    pub fn cells_observed(&self) -> u32 {
        self.cells_observed
    }

    /// Types with nonzero score, best first. Ties break on declaration
    /// order so ranking is deterministic.
    pub fn ranked(&self) -> Vec<(FieldType, f64)> {
        let mut ranked: Vec<(FieldType, f64)> = self
            .scores
            .iter()
            .filter(|(_, score)| **score > 0.0)
            .map(|(field, score)| (*field, *score))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        ranked
    }

    pub fn leading(&self) -> Option<(FieldType, f64)> {
        self.ranked().first().copied()
    }

    pub fn runner_up(&self) -> Option<(FieldType, f64)> {
        self.ranked().get(1).copied()
    }

    /// Whether `leading()` has cleared both gates: enough evidence cells
    /// and enough separation from the runner-up.
    pub fn is_stable(&self, config: &TrackerConfig) -> bool {
        let Some((leader, leader_score)) = self.leading() else {
            return false;
        };
        if self.evidence_count(leader) < config.min_rows {
            return false;
        }
        match self.runner_up() {
            Some((_, runner_score)) => leader_score >= runner_score * config.stability_margin,
            None => true,
        }
    }

    /// The format seen most often; ties prefer [`DateFormat::ALL`] order.
    pub fn preferred_date_format(&self) -> Option<DateFormat> {
        let best = self.date_formats.values().copied().max()?;
        DateFormat::ALL
            .into_iter()
            .find(|format| self.date_formats.get(format).copied() == Some(best))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patron_model::CanonicalValue;

    fn vote(field: FieldType, confidence: f32) -> ClassificationVote {
        let canonical = (confidence > 0.0).then(|| CanonicalValue::Text("x".into()));
        ClassificationVote::new(field, confidence, canonical)
    }

    #[test]
    fn scores_accumulate_and_rerank() {
        let config = TrackerConfig::default();
        let mut hyp = ColumnHypothesis::new();
        hyp.observe(&[vote(FieldType::Phone, 0.5), vote(FieldType::Barcode, 0.7)], &config);
        assert_eq!(hyp.leading(), Some((FieldType::Barcode, 0.7_f32 as f64)));

        // Two more phone-shaped cells overtake the single barcode hit.
        hyp.observe(&[vote(FieldType::Phone, 0.7)], &config);
        hyp.observe(&[vote(FieldType::Phone, 0.7)], &config);
        assert_eq!(hyp.leading().map(|(f, _)| f), Some(FieldType::Phone));
        assert_eq!(hyp.evidence_count(FieldType::Phone), 3);
    }

    #[test]
    fn merge_equals_sequential_observation() {
        let config = TrackerConfig::default();
        let cells = [
            vec![vote(FieldType::Email, 0.95), vote(FieldType::GivenName, 0.0)],
            vec![vote(FieldType::Email, 0.75)],
            vec![vote(FieldType::GivenName, 0.3)],
        ];

        let mut sequential = ColumnHypothesis::new();
        for cell in &cells {
            sequential.observe(cell, &config);
        }

        let mut left = ColumnHypothesis::new();
        left.observe(&cells[0], &config);
        let mut right = ColumnHypothesis::new();
        right.observe(&cells[1], &config);
        right.observe(&cells[2], &config);
        left.merge(&right);

        assert_eq!(left, sequential);
    }

    #[test]
    fn contradictions_are_cell_local() {
        let config = TrackerConfig::default();
        let mut hyp = ColumnHypothesis::new();
        // Strong email evidence contradicts the silent name vote.
        hyp.observe(&[vote(FieldType::Email, 0.95), vote(FieldType::GivenName, 0.0)], &config);
        assert_eq!(hyp.contradiction_count(FieldType::GivenName), 1);
        // A weak cell contradicts nothing.
        hyp.observe(&[vote(FieldType::GivenName, 0.3), vote(FieldType::Email, 0.0)], &config);
        assert_eq!(hyp.contradiction_count(FieldType::Email), 0);
    }

    #[test]
    fn stability_needs_margin_and_rows() {
        let config = TrackerConfig::default();
        let mut hyp = ColumnHypothesis::new();
        hyp.observe(&[vote(FieldType::GivenName, 0.7), vote(FieldType::FamilyName, 0.25)], &config);
        // One row is below min_rows.
        assert!(!hyp.is_stable(&config));
        hyp.observe(&[vote(FieldType::GivenName, 0.7), vote(FieldType::FamilyName, 0.25)], &config);
        assert!(hyp.is_stable(&config));

        // Near-tied scores never stabilize under the default margin.
        let mut tied = ColumnHypothesis::new();
        for _ in 0..4 {
            tied.observe(&[vote(FieldType::GivenName, 0.3), vote(FieldType::FamilyName, 0.3)], &config);
        }
        assert!(!tied.is_stable(&config));
    }

    #[test]
    fn date_format_tally_prefers_consistency() {
        let mut hyp = ColumnHypothesis::new();
        hyp.note_date_formats([DateFormat::MonthDayYear, DateFormat::DayMonthYear]);
        hyp.note_date_formats([DateFormat::DayMonthYear]);
        assert_eq!(hyp.preferred_date_format(), Some(DateFormat::DayMonthYear));

        // A pure tie falls back to preference order.
        let mut tie = ColumnHypothesis::new();
        tie.note_date_formats([DateFormat::MonthDayYear, DateFormat::DayMonthYear]);
        assert_eq!(tie.preferred_date_format(), Some(DateFormat::MonthDayYear));
    }
}
