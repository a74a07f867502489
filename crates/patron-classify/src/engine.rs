//! Row-by-row identification driver.

use patron_model::{ConfigError, FieldType, Locale, NameLists};
use tracing::{debug, info};

use crate::assignment::ColumnAssignment;
use crate::classifiers::{self, date};
use crate::hypothesis::TrackerConfig;
use crate::tracker::HypothesisTracker;
use crate::vote::ClassifyContext;

/// Runs every classifier over every cell and freezes the tracker into a
/// [`ColumnAssignment`].
///
/// One engine handles one grid. Rows are fed in order, but the result
/// is row-order independent: votes only ever accumulate. Between rows
/// the engine refreshes the classifier context's country hint from the
/// tracker's current Country belief, which is the single feedback path
/// from accumulated state back into classification.
pub struct IdentificationEngine<'a> {
    ctx: ClassifyContext<'a>,
    tracker: HypothesisTracker,
}

impl<'a> IdentificationEngine<'a> {
    pub fn new(
        locale: &'a Locale,
        name_lists: &'a NameLists,
        config: TrackerConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            ctx: ClassifyContext::new(locale, name_lists)?,
            tracker: HypothesisTracker::new(config),
        })
    }

    /// Classifies every non-blank cell of one row.
    pub fn observe_row<S>(&mut self, row: &[S])
    where
        S: AsRef<str>,
    {
        for (column, raw) in row.iter().enumerate() {
            let raw = raw.as_ref();
            if raw.trim().is_empty() {
                continue;
            }
            let votes = classifiers::classify_cell(&self.ctx, raw);
            if votes
                .iter()
                .any(|v| v.field_type == FieldType::Date && v.is_evidence())
            {
                self.tracker
                    .note_date_formats(column, date::scan(raw).into_iter().map(|(f, _)| f));
            }
            self.tracker.observe(column, &votes);
        }
        self.refresh_country_hint();
    }

    /// The tracker's current belief, for inspection mid-stream.
    pub fn tracker(&self) -> &HypothesisTracker {
        &self.tracker
    }

    /// Freezes the assignment.
    pub fn finish(self) -> ColumnAssignment {
        let assignment = self.tracker.finalize();
        info!(
            columns = assignment.columns.len(),
            assigned = assignment.assigned_count(),
            diagnostics = assignment.diagnostics.len(),
            "column identification frozen"
        );
        assignment
    }

    /// Feeds every row and freezes, in one call.
    pub fn identify<I, R, S>(mut self, rows: I) -> ColumnAssignment
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        for row in rows {
            self.observe_row(row.as_ref());
        }
        self.finish()
    }

    fn refresh_country_hint(&mut self) {
        let hint = self
            .tracker
            .country_trending()
            .then(|| self.ctx.locale.code.clone());
        if hint.as_deref() != self.ctx.country_hint() {
            debug!(hint = ?hint, "country hint updated");
        }
        self.ctx.set_country_hint(hint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect()
    }

    fn identify(data: &[&[&str]]) -> ColumnAssignment {
        let locale = Locale::canada();
        let lists = NameLists::default();
        let engine =
            IdentificationEngine::new(&locale, &lists, TrackerConfig::default()).unwrap();
        engine.identify(rows(data))
    }

    #[test]
    fn mixed_grid_assigns_each_column() {
        let assignment = identify(&[
            &["780-242-9978", "jane@example.com", "T6G 0G4", "Canada", "Jane", "Malenfant"],
            &["403-555-0188", "rob@example.org", "K1A 0B1", "canada", "Robert", "Okonkwo"],
            &["587-242-1100", "amy@example.net", "V5K 0A1", "Canada", "Amy", "Tremblay"],
        ]);
        assert_eq!(assignment.field_for(0), FieldType::Phone);
        assert_eq!(assignment.field_for(1), FieldType::Email);
        assert_eq!(assignment.field_for(2), FieldType::PostalCode);
        assert_eq!(assignment.field_for(3), FieldType::Country);
        assert_eq!(assignment.field_for(4), FieldType::GivenName);
        assert_eq!(assignment.field_for(5), FieldType::FamilyName);
    }

    #[test]
    fn identification_is_deterministic() {
        let data: &[&[&str]] = &[
            &["11 Cherry Ave", "2005-12-23", "F"],
            &["87 Whyte Corners", "2001-03-04", "M"],
            &["4 Rowan Pl", "1999-11-30", "F"],
        ];
        let first = identify(data);
        let second = identify(data);
        assert_eq!(first, second);
        assert_eq!(first.field_for(0), FieldType::StreetAddress);
        assert_eq!(first.field_for(1), FieldType::Date);
        assert_eq!(first.field_for(2), FieldType::Gender);
    }

    #[test]
    fn ragged_rows_widen_the_tracker() {
        let assignment = identify(&[
            &["780-242-9978"],
            &["403-555-0188", "jane@example.com"],
            &["587-242-1100", "rob@example.org"],
        ]);
        assert_eq!(assignment.field_for(0), FieldType::Phone);
        assert_eq!(assignment.field_for(1), FieldType::Email);
    }

    #[test]
    fn country_column_raises_province_confidence() {
        // With a Country column trending, bare codes clear the margin
        // gate against competing name evidence.
        let assignment = identify(&[
            &["Canada", "AB"],
            &["Canada", "BC"],
            &["canada", "ON"],
        ]);
        assert_eq!(assignment.field_for(0), FieldType::Country);
        assert_eq!(assignment.field_for(1), FieldType::Province);
    }

    #[test]
    fn date_assignment_carries_the_format() {
        use crate::classifiers::date::DateFormat;
        let assignment = identify(&[
            &["23/12/2005"],
            &["01/02/2001"],
            &["30/11/1999"],
        ]);
        assert_eq!(assignment.field_for(0), FieldType::Date);
        assert_eq!(assignment.date_format_for(0), Some(DateFormat::DayMonthYear));
    }
}
