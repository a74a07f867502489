//! The frozen result of column identification.

use std::collections::BTreeMap;
use std::fmt;

use patron_model::FieldType;
use serde::{Deserialize, Serialize};

use crate::classifiers::date::DateFormat;

/// Final column-to-field mapping for one input grid.
///
/// Every observed column index is present; columns whose evidence never
/// settled map to [`FieldType::Unknown`]. When a column was assigned
/// [`FieldType::Date`], `date_formats` records the format extraction
/// must re-parse with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnAssignment {
    /// Column index → assigned field type.
    pub columns: BTreeMap<usize, FieldType>,
    /// Winning date format per Date column.
    pub date_formats: BTreeMap<usize, DateFormat>,
    /// Why columns ended up Unknown or were re-ranked.
    pub diagnostics: Vec<Diagnostic>,
}

impl ColumnAssignment {
    /// The field assigned to `column`, Unknown if out of range.
    pub fn field_for(&self, column: usize) -> FieldType {
        self.columns
            .get(&column)
            .copied()
            .unwrap_or(FieldType::Unknown)
    }

    /// The column carrying `field`, if one was assigned.
    pub fn column_for(&self, field: FieldType) -> Option<usize> {
        self.columns
            .iter()
            .find(|(_, assigned)| **assigned == field)
            .map(|(col, _)| *col)
    }

    pub fn date_format_for(&self, column: usize) -> Option<DateFormat> {
        self.date_formats.get(&column).copied()
    }

    /// Columns that settled on a real field type.
    pub fn assigned_count(&self) -> usize {
        self.columns
            .values()
            .filter(|field| **field != FieldType::Unknown)
            .count()
    }
}

/// A human-readable note about one column's identification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub column: usize,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {}: {}", self.column, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_field_and_column() {
        let mut assignment = ColumnAssignment::default();
        assignment.columns.insert(0, FieldType::Phone);
        assignment.columns.insert(1, FieldType::Unknown);
        assignment.columns.insert(2, FieldType::Date);
        assignment
            .date_formats
            .insert(2, DateFormat::YearMonthDay);

        assert_eq!(assignment.field_for(0), FieldType::Phone);
        assert_eq!(assignment.field_for(9), FieldType::Unknown);
        assert_eq!(assignment.column_for(FieldType::Date), Some(2));
        assert_eq!(assignment.column_for(FieldType::Email), None);
        assert_eq!(assignment.date_format_for(2), Some(DateFormat::YearMonthDay));
        assert_eq!(assignment.assigned_count(), 2);
    }
}
