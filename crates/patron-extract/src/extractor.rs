//! Row-to-record extraction against a frozen assignment.

use patron_classify::classifiers::{self, date};
use patron_classify::{ClassifyContext, ColumnAssignment};
use patron_model::{CandidateRecord, CanonicalValue, ConfigError, FieldType, Locale, NameLists};
use tracing::{debug, warn};

/// Replays grid rows against a frozen [`ColumnAssignment`].
pub struct Extractor<'a> {
    ctx: ClassifyContext<'a>,
    assignment: &'a ColumnAssignment,
}

impl<'a> Extractor<'a> {
    pub fn new(
        locale: &'a Locale,
        name_lists: &'a NameLists,
        assignment: &'a ColumnAssignment,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            ctx: ClassifyContext::new(locale, name_lists)?,
            assignment,
        })
    }

    /// Builds the candidate record for one row.
    ///
    /// Returns `None` when the row contributes nothing: every cell
    /// blank or in an Unknown column.
    pub fn extract_row<S>(&self, row_index: usize, row: &[S]) -> Option<CandidateRecord>
    where
        S: AsRef<str>,
    {
        let mut record = CandidateRecord::new(row_index);
        for (column, raw) in row.iter().enumerate() {
            let raw = raw.as_ref().trim();
            if raw.is_empty() {
                continue;
            }
            let field = self.assignment.field_for(column);
            if field == FieldType::Unknown {
                continue;
            }
            record.insert(field, self.canonical_value(column, field, raw));
        }
        if record.is_empty() {
            debug!(row = row_index, "row produced no fields");
            return None;
        }
        Some(record)
    }

    /// Extracts every row, skipping empty ones.
    pub fn extract_all<I, R, S>(&self, rows: I) -> Vec<CandidateRecord>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        rows.into_iter()
            .enumerate()
            .filter_map(|(index, row)| self.extract_row(index, row.as_ref()))
            .collect()
    }

    /// Canonicalizes one cell under its column's assigned type.
    ///
    /// Dates re-parse with the column's winning format so an ambiguous
    /// `03/04/2005` comes out consistent with the rest of the column.
    /// Anything that fails to canonicalize is kept as raw text for the
    /// validator to judge.
    fn canonical_value(&self, column: usize, field: FieldType, raw: &str) -> CanonicalValue {
        if field == FieldType::Date {
            if let Some(format) = self.assignment.date_format_for(column) {
                if let Some(parsed) = date::parse_with(format, raw) {
                    return CanonicalValue::Date(parsed);
                }
                warn!(column, raw, ?format, "date cell does not fit the column format");
                return CanonicalValue::text(raw);
            }
        }
        match classifiers::canonicalize(&self.ctx, field, raw) {
            Some(value) => value,
            None => {
                debug!(column, %field, raw, "cell kept as raw text");
                CanonicalValue::text(raw)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use patron_classify::DateFormat;

    fn assignment() -> ColumnAssignment {
        let mut assignment = ColumnAssignment::default();
        assignment.columns.insert(0, FieldType::Phone);
        assignment.columns.insert(1, FieldType::Date);
        assignment.columns.insert(2, FieldType::Province);
        assignment.columns.insert(3, FieldType::Unknown);
        assignment
            .date_formats
            .insert(1, DateFormat::DayMonthYear);
        assignment
    }

    #[test]
    fn extracts_canonical_values_per_assignment() {
        let locale = Locale::canada();
        let lists = NameLists::default();
        let assignment = assignment();
        let extractor = Extractor::new(&locale, &lists, &assignment).unwrap();

        let record = extractor
            .extract_row(0, &["(780) 242 9978", "03/04/2005", "ab", "noise"])
            .unwrap();
        assert_eq!(
            record.get(FieldType::Phone),
            Some(&CanonicalValue::text("780-242-9978"))
        );
        // Day-first, because that is what the column settled on.
        assert_eq!(
            record.get(FieldType::Date),
            Some(&CanonicalValue::Date(
                NaiveDate::from_ymd_opt(2005, 4, 3).unwrap()
            ))
        );
        assert_eq!(
            record.get(FieldType::Province),
            Some(&CanonicalValue::text("AB"))
        );
        // Unknown columns contribute nothing.
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn failed_canonicalization_keeps_raw_text() {
        let locale = Locale::canada();
        let lists = NameLists::default();
        let assignment = assignment();
        let extractor = Extractor::new(&locale, &lists, &assignment).unwrap();

        let record = extractor.extract_row(0, &["", "not a date", "ZZ"]).unwrap();
        assert_eq!(
            record.get(FieldType::Date),
            Some(&CanonicalValue::text("not a date"))
        );
        // "ZZ" is not a Canadian province but the cell survives for the
        // validator to reject.
        assert_eq!(
            record.get(FieldType::Province),
            Some(&CanonicalValue::text("ZZ"))
        );
        assert!(!record.contains(FieldType::Phone));
    }

    #[test]
    fn empty_rows_yield_nothing() {
        let locale = Locale::canada();
        let lists = NameLists::default();
        let assignment = assignment();
        let extractor = Extractor::new(&locale, &lists, &assignment).unwrap();
        assert!(extractor.extract_row(0, &["", "  ", ""]).is_none());
        assert!(extractor.extract_row(1, &["", "", "", "junk"]).is_none());

        let records = extractor.extract_all([
            vec!["242-9978".to_string()],
            vec![String::new()],
            vec!["555-0100".to_string()],
        ]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].row, 0);
        assert_eq!(records[1].row, 2);
    }
}
