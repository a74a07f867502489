//! Grid-wide hypothesis state and the freeze into a column assignment.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use patron_model::FieldType;
use tracing::debug;

use crate::assignment::{ColumnAssignment, Diagnostic};
use crate::classifiers::date::DateFormat;
use crate::hypothesis::{ColumnHypothesis, TrackerConfig};
use crate::vote::ClassificationVote;

/// One [`ColumnHypothesis`] per observed column.
///
/// The tracker widens itself on demand, so ragged rows need no special
/// handling: a column that only exists in some rows simply accumulates
/// fewer observations.
#[derive(Debug, Clone, Default)]
pub struct HypothesisTracker {
    config: TrackerConfig,
    columns: Vec<ColumnHypothesis>,
}

impl HypothesisTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            columns: Vec::new(),
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, index: usize) -> Option<&ColumnHypothesis> {
        self.columns.get(index)
    }

    /// Folds one cell's votes into the hypothesis for `column`.
    pub fn observe(&mut self, column: usize, votes: &[ClassificationVote]) {
        self.ensure_width(column + 1);
        self.columns[column].observe(votes, &self.config);
    }

    /// Records which date formats fit the cell at `column`.
    pub fn note_date_formats<I>(&mut self, column: usize, formats: I)
    where
        I: IntoIterator<Item = DateFormat>,
    {
        self.ensure_width(column + 1);
        self.columns[column].note_date_formats(formats);
    }

    /// Folds another tracker built from a disjoint row range into this
    /// one. Both must share the same configuration.
    pub fn merge(&mut self, other: &HypothesisTracker) {
        self.ensure_width(other.width());
        for (mine, theirs) in self.columns.iter_mut().zip(&other.columns) {
            mine.merge(theirs);
        }
    }

    /// Whether some column is currently trending toward Country.
    /// Feeds the province classifier's country hint between rows.
    pub fn country_trending(&self) -> bool {
        self.columns.iter().any(|hyp| {
            hyp.leading()
                .is_some_and(|(field, _)| field == FieldType::Country)
        })
    }

    fn ensure_width(&mut self, width: usize) {
        while self.columns.len() < width {
            self.columns.push(ColumnHypothesis::new());
        }
    }

    /// Freezes the accumulated evidence into a final assignment.
    ///
    /// Each column's stable leader claims its field type. Two columns
    /// claiming the same type are resolved by strictly higher score:
    /// the loser falls back to its runner-up (which may itself
    /// conflict, so resolution repeats), and an exact tie leaves both
    /// columns Unknown. Every decision that is not a clean first-choice
    /// win produces a diagnostic.
    pub fn finalize(&self) -> ColumnAssignment {
        let mut assignment = ColumnAssignment::default();
        let candidates: Vec<Vec<(FieldType, f64)>> = self
            .columns
            .iter()
            .map(|hyp| self.gated_candidates(hyp))
            .collect();

        // field -> (column, score, rank the column is currently at)
        let mut claims: BTreeMap<FieldType, (usize, f64)> = BTreeMap::new();
        let mut rank: Vec<usize> = vec![0; self.columns.len()];
        let mut unresolved: Vec<bool> = vec![false; self.columns.len()];
        let mut queue: Vec<usize> = (0..self.columns.len()).collect();

        while let Some(column) = queue.pop() {
            if unresolved[column] {
                continue;
            }
            let Some(&(field, score)) = candidates[column].get(rank[column]) else {
                continue;
            };
            match claims.get(&field).copied() {
                None => {
                    claims.insert(field, (column, score));
                }
                Some((owner, owner_score)) => {
                    match score.partial_cmp(&owner_score).unwrap_or(Ordering::Equal) {
                        Ordering::Greater => {
                            claims.insert(field, (column, score));
                            assignment.diagnostics.push(Diagnostic {
                                column: owner,
                                message: format!(
                                    "lost {field} to column {column} ({owner_score:.2} < {score:.2})"
                                ),
                            });
                            rank[owner] += 1;
                            queue.push(owner);
                        }
                        Ordering::Less => {
                            assignment.diagnostics.push(Diagnostic {
                                column,
                                message: format!(
                                    "lost {field} to column {owner} ({score:.2} < {owner_score:.2})"
                                ),
                            });
                            rank[column] += 1;
                            queue.push(column);
                        }
                        Ordering::Equal => {
                            claims.remove(&field);
                            unresolved[column] = true;
                            unresolved[owner] = true;
                            for tied in [column, owner] {
                                assignment.diagnostics.push(Diagnostic {
                                    column: tied,
                                    message: format!(
                                        "tied with another column for {field} at {score:.2}, left unknown"
                                    ),
                                });
                            }
                        }
                    }
                }
            }
        }

        for column in 0..self.columns.len() {
            assignment.columns.insert(column, FieldType::Unknown);
        }
        for (field, (column, score)) in &claims {
            assignment.columns.insert(*column, *field);
            debug!(column, %field, score, "column assigned");
            if *field == FieldType::Date {
                if let Some(format) = self.columns[*column].preferred_date_format() {
                    assignment.date_formats.insert(*column, format);
                }
            }
        }

        // Explain columns that saw evidence but never settled.
        for (column, hyp) in self.columns.iter().enumerate() {
            if assignment.field_for(column) != FieldType::Unknown || unresolved[column] {
                continue;
            }
            if let Some((field, score)) = hyp.leading() {
                let message = if hyp.evidence_count(field) < self.config.min_rows {
                    format!("{field} led at {score:.2} but too few evidence cells")
                } else if candidates[column].is_empty() {
                    format!("{field} led at {score:.2} without a stable margin")
                } else {
                    continue; // Demoted past every viable candidate.
                };
                assignment.diagnostics.push(Diagnostic { column, message });
            }
        }

        assignment
    }

    /// The ranked field types `hyp` may claim, best first.
    ///
    /// The margin gate applies to the leader only; fallback candidates
    /// after a lost conflict just need enough evidence cells.
    fn gated_candidates(&self, hyp: &ColumnHypothesis) -> Vec<(FieldType, f64)> {
        if !hyp.is_stable(&self.config) {
            return Vec::new();
        }
        hyp.ranked()
            .into_iter()
            .filter(|(field, _)| hyp.evidence_count(*field) >= self.config.min_rows)
            .collect()
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
    fn stable_columns_get_their_leader() {
        let mut tracker = HypothesisTracker::new(TrackerConfig::default());
        for _ in 0..3 {
            tracker.observe(0, &[vote(FieldType::Phone, 0.7)]);
            tracker.observe(1, &[vote(FieldType::Email, 0.95)]);
        }
        let assignment = tracker.finalize();
        assert_eq!(assignment.field_for(0), FieldType::Phone);
        assert_eq!(assignment.field_for(1), FieldType::Email);
        assert!(assignment.diagnostics.is_empty());
    }

    #[test]
    fn thin_evidence_stays_unknown() {
        let mut tracker = HypothesisTracker::new(TrackerConfig::default());
        tracker.observe(0, &[vote(FieldType::Phone, 0.95)]);
        let assignment = tracker.finalize();
        assert_eq!(assignment.field_for(0), FieldType::Unknown);
        assert!(!assignment.diagnostics.is_empty());
    }

    #[test]
    fn conflict_demotes_the_weaker_column() {
        let mut tracker = HypothesisTracker::new(TrackerConfig::default());
        for _ in 0..3 {
            // Column 0 is the stronger phone claim; column 1 also looks
            // phone-like but carries barcode evidence to fall back on.
            tracker.observe(0, &[vote(FieldType::Phone, 0.95)]);
            tracker.observe(
                1,
                &[vote(FieldType::Phone, 0.5), vote(FieldType::Barcode, 0.2)],
            );
        }
        // Barcode needs its own margin-free fallback evidence.
        let assignment = tracker.finalize();
        assert_eq!(assignment.field_for(0), FieldType::Phone);
        assert_eq!(assignment.field_for(1), FieldType::Barcode);
        assert!(
            assignment
                .diagnostics
                .iter()
                .any(|d| d.column == 1 && d.message.contains("lost phone"))
        );
    }

    #[test]
    fn exact_tie_leaves_both_unknown() {
        let mut tracker = HypothesisTracker::new(TrackerConfig::default());
        for _ in 0..3 {
            tracker.observe(0, &[vote(FieldType::Email, 0.95)]);
            tracker.observe(1, &[vote(FieldType::Email, 0.95)]);
        }
        let assignment = tracker.finalize();
        assert_eq!(assignment.field_for(0), FieldType::Unknown);
        assert_eq!(assignment.field_for(1), FieldType::Unknown);
        assert_eq!(
            assignment
                .diagnostics
                .iter()
                .filter(|d| d.message.contains("tied"))
                .count(),
            2
        );
    }

    #[test]
    fn merge_matches_single_pass() {
        let config = TrackerConfig::default();
        let cells: [(usize, Vec<ClassificationVote>); 4] = [
            (0, vec![vote(FieldType::Phone, 0.7)]),
            (1, vec![vote(FieldType::Email, 0.95)]),
            (0, vec![vote(FieldType::Phone, 0.5)]),
            (1, vec![vote(FieldType::Email, 0.75)]),
        ];

        let mut whole = HypothesisTracker::new(config);
        for (col, votes) in &cells {
            whole.observe(*col, votes);
        }

        let mut first = HypothesisTracker::new(config);
        let mut second = HypothesisTracker::new(config);
        for (col, votes) in &cells[..2] {
            first.observe(*col, votes);
        }
        for (col, votes) in &cells[2..] {
            second.observe(*col, votes);
        }
        first.merge(&second);

        assert_eq!(first.finalize(), whole.finalize());
    }

    #[test]
    fn date_column_records_its_format() {
        let mut tracker = HypothesisTracker::new(TrackerConfig::default());
        for _ in 0..3 {
            tracker.observe(2, &[vote(FieldType::Date, 0.6)]);
            tracker.note_date_formats(2, [DateFormat::MonthDayYear, DateFormat::DayMonthYear]);
        }
        tracker.observe(2, &[vote(FieldType::Date, 0.9)]);
        tracker.note_date_formats(2, [DateFormat::DayMonthYear]);

        let assignment = tracker.finalize();
        assert_eq!(assignment.field_for(2), FieldType::Date);
        assert_eq!(assignment.date_format_for(2), Some(DateFormat::DayMonthYear));
    }
}
