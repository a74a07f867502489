//! Validation verdicts and the rejection report.
//!
//! Rejections are data, not errors: a rejected row is recorded and
//! processing continues with the next row.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::field::FieldType;

/// Why a candidate record failed (or needs review). Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    /// A field the requirement policy marks as required is absent.
    MissingRequiredField(FieldType),
    /// A recommended field is absent. Flags review, never rejection.
    MissingRecommendedField(FieldType),
    /// Neither a phone number nor an email address is present.
    NoContactMethod,
    /// A field is present but its value fails its domain check.
    InvalidValue(FieldType),
    /// Country value is not in the configured allow-list.
    UnsupportedCountry,
    /// Province value does not belong to the identified country.
    UnsupportedProvince,
    /// Reserved: guardian vs registrant name columns could not be told
    /// apart. No rule emits this yet; the disambiguation heuristic is
    /// intentionally undefined.
    ConflictingGuardianRegistrant,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequiredField(field) => write!(f, "missing required field: {field}"),
            Self::MissingRecommendedField(field) => {
                write!(f, "missing recommended field: {field}")
            }
            Self::NoContactMethod => f.write_str("no contact method (phone or email)"),
            Self::InvalidValue(field) => write!(f, "invalid value for field: {field}"),
            Self::UnsupportedCountry => f.write_str("country is not supported"),
            Self::UnsupportedProvince => {
                f.write_str("province does not belong to the identified country")
            }
            Self::ConflictingGuardianRegistrant => {
                f.write_str("guardian and registrant name columns conflict")
            }
        }
    }
}

/// Outcome of validating one candidate record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationVerdict {
    /// All rules passed; the record may be encoded.
    Accepted,
    /// One or more hard rules failed. Reasons in rule-definition order.
    Rejected(Vec<RejectionReason>),
    /// Hard rules passed but a recommended field is missing; a human
    /// should look before loading.
    NeedsReview(Vec<RejectionReason>),
}

impl ValidationVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationVerdict::Accepted)
    }

    /// Reasons attached to this verdict, empty for `Accepted`.
    pub fn reasons(&self) -> &[RejectionReason] {
        match self {
            ValidationVerdict::Accepted => &[],
            ValidationVerdict::Rejected(reasons) | ValidationVerdict::NeedsReview(reasons) => {
                reasons
            }
        }
    }
}

/// One rejected (or review-flagged) input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRow {
    /// Zero-based input row index.
    pub row: usize,
    /// Triggered reasons, in rule-definition order.
    pub reasons: Vec<RejectionReason>,
}

/// The data shape handed to the rejection-report consumer.
/// Rendering is out of scope here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionReport {
    pub rows: Vec<RejectedRow>,
}

impl RejectionReport {
    pub fn push(&mut self, row: RejectedRow) {
        self.rows.push(row);
    }

    pub fn rejected_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_has_no_reasons() {
        assert!(ValidationVerdict::Accepted.reasons().is_empty());
        assert!(ValidationVerdict::Accepted.is_accepted());
    }

    #[test]
    fn reasons_preserve_order() {
        let verdict = ValidationVerdict::Rejected(vec![
            RejectionReason::MissingRequiredField(FieldType::Email),
            RejectionReason::UnsupportedProvince,
        ]);
        assert_eq!(
            verdict.reasons(),
            &[
                RejectionReason::MissingRequiredField(FieldType::Email),
                RejectionReason::UnsupportedProvince,
            ]
        );
    }
}
