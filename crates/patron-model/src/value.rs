//! Canonical field values.
//!
//! A canonical value is the normalized internal representation of a field,
//! independent of the textual form it arrived in. `" T6g 0G4 "` becomes
//! `Text("T6G 0G4")`, `"23/12/2005"` becomes `Date(2005-12-23)`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanonicalValue {
    /// Normalized text (trimmed, case-folded where the field demands it).
    Text(String),
    /// A parsed calendar date.
    Date(NaiveDate),
}

impl CanonicalValue {
    /// Builds a text value, trimming surrounding whitespace.
    pub fn text(raw: &str) -> Self {
        CanonicalValue::Text(raw.trim().to_string())
    }

    /// Returns the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CanonicalValue::Text(s) => Some(s),
            CanonicalValue::Date(_) => None,
        }
    }

    /// Returns the date, if this is a date value.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CanonicalValue::Date(d) => Some(*d),
            CanonicalValue::Text(_) => None,
        }
    }
}

impl fmt::Display for CanonicalValue {
    /// Dates render as ISO 8601 (`YYYY-MM-DD`); the flat encoder applies
    /// layout-specific date formats itself.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalValue::Text(s) => f.write_str(s),
            CanonicalValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_trims() {
        assert_eq!(
            CanonicalValue::text("  T6G 0G4 "),
            CanonicalValue::Text("T6G 0G4".to_string())
        );
    }

    #[test]
    fn date_displays_iso() {
        let date = NaiveDate::from_ymd_opt(2005, 12, 23).unwrap();
        assert_eq!(CanonicalValue::Date(date).to_string(), "2005-12-23");
    }
}
