//! The validator: verdicts per record, partitioned run output.

use patron_model::{
    CandidateRecord, ConfigError, FlatRecord, Locale, RejectedRow, RejectionReason,
    RejectionReport, RequirementPolicy, ValidationVerdict,
};
use regex::Regex;
use tracing::{debug, info};

/// Applies the full rule set to candidate records.
pub struct Validator<'a> {
    policy: &'a RequirementPolicy,
    locale: &'a Locale,
    postal: Regex,
}

/// The partitioned result of validating a whole run.
#[derive(Debug, Default)]
pub struct ValidationOutcome {
    /// Records that passed every rule, promoted for encoding.
    pub accepted: Vec<FlatRecord>,
    /// Records that passed the hard rules but want a human look. The
    /// caller decides whether these are encoded.
    pub review: Vec<(FlatRecord, Vec<RejectionReason>)>,
    /// Rows that failed a hard rule.
    pub rejections: RejectionReport,
}

impl<'a> Validator<'a> {
    pub fn new(policy: &'a RequirementPolicy, locale: &'a Locale) -> Result<Self, ConfigError> {
        let postal =
            Regex::new(&locale.postal_pattern).map_err(|err| ConfigError::InvalidPostalPattern {
                locale: locale.code.clone(),
                message: err.to_string(),
            })?;
        Ok(Self {
            policy,
            locale,
            postal,
        })
    }

    /// Judges one record. All triggered reasons are collected.
    pub fn validate(&self, record: &CandidateRecord) -> ValidationVerdict {
        let findings = crate::checks::run_all(self.policy, self.locale, &self.postal, record);
        if !findings.hard.is_empty() {
            return ValidationVerdict::Rejected(findings.hard);
        }
        if !findings.review.is_empty() {
            return ValidationVerdict::NeedsReview(findings.review);
        }
        ValidationVerdict::Accepted
    }

    /// Validates every candidate and partitions the results.
    pub fn validate_all<I>(&self, candidates: I) -> ValidationOutcome
    where
        I: IntoIterator<Item = CandidateRecord>,
    {
        let mut outcome = ValidationOutcome::default();
        for candidate in candidates {
            match self.validate(&candidate) {
                ValidationVerdict::Accepted => {
                    outcome.accepted.push(FlatRecord::from_accepted(candidate));
                }
                ValidationVerdict::NeedsReview(reasons) => {
                    debug!(row = candidate.row, ?reasons, "record flagged for review");
                    outcome
                        .review
                        .push((FlatRecord::from_accepted(candidate), reasons));
                }
                ValidationVerdict::Rejected(reasons) => {
                    debug!(row = candidate.row, ?reasons, "record rejected");
                    outcome.rejections.push(RejectedRow {
                        row: candidate.row,
                        reasons,
                    });
                }
            }
        }
        info!(
            accepted = outcome.accepted.len(),
            review = outcome.review.len(),
            rejected = outcome.rejections.rejected_count(),
            "validation finished"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use patron_model::{CanonicalValue, FieldType, RejectionReason, RunConfig};

    fn record(row: usize, fields: &[(FieldType, CanonicalValue)]) -> CandidateRecord {
        let mut record = CandidateRecord::new(row);
        for (field, value) in fields {
            record.insert(*field, value.clone());
        }
        record
    }

    fn full_record(row: usize) -> CandidateRecord {
        record(
            row,
            &[
                (FieldType::GivenName, CanonicalValue::text("Jane")),
                (FieldType::FamilyName, CanonicalValue::text("Doe")),
                (FieldType::Phone, CanonicalValue::text("780-242-9978")),
                (
                    FieldType::Date,
                    CanonicalValue::Date(NaiveDate::from_ymd_opt(2005, 12, 23).unwrap()),
                ),
                (FieldType::Province, CanonicalValue::text("AB")),
                (FieldType::Country, CanonicalValue::text("Canada")),
            ],
        )
    }

    #[test]
    fn complete_record_is_accepted() {
        let policy = RequirementPolicy::default();
        let locale = Locale::canada();
        let validator = Validator::new(&policy, &locale).unwrap();
        assert!(validator.validate(&full_record(0)).is_accepted());
    }

    #[test]
    fn rejection_collects_every_reason() {
        let policy = RequirementPolicy::default();
        let locale = Locale::canada();
        let validator = Validator::new(&policy, &locale).unwrap();
        // No family name, no contact, bad province.
        let candidate = record(
            3,
            &[
                (FieldType::GivenName, CanonicalValue::text("Jane")),
                (FieldType::Province, CanonicalValue::text("ZZ")),
                (FieldType::Country, CanonicalValue::text("Canada")),
                (
                    FieldType::Date,
                    CanonicalValue::Date(NaiveDate::from_ymd_opt(2005, 12, 23).unwrap()),
                ),
            ],
        );
        let verdict = validator.validate(&candidate);
        assert_eq!(
            verdict.reasons(),
            &[
                RejectionReason::MissingRequiredField(FieldType::FamilyName),
                RejectionReason::NoContactMethod,
                RejectionReason::UnsupportedProvince,
            ]
        );
    }

    #[test]
    fn configured_required_email_rejects_a_short_row() {
        // A shorter row never produced an Email field; a configuration
        // that requires one must reject it.
        let config: RunConfig =
            serde_json::from_str(r#"{"required": ["fname", "lname", "email"]}"#).unwrap();
        let policy = config.policy().unwrap();
        let locale = Locale::canada();
        let validator = Validator::new(&policy, &locale).unwrap();
        let candidate = record(
            0,
            &[
                (FieldType::GivenName, CanonicalValue::text("Jane")),
                (FieldType::FamilyName, CanonicalValue::text("Doe")),
                (FieldType::Phone, CanonicalValue::text("780-242-9978")),
            ],
        );
        let verdict = validator.validate(&candidate);
        assert_eq!(
            verdict.reasons(),
            &[RejectionReason::MissingRequiredField(FieldType::Email)]
        );
        assert!(matches!(verdict, ValidationVerdict::Rejected(_)));
    }

    #[test]
    fn missing_recommended_needs_review() {
        let mut policy = RequirementPolicy::default();
        policy.recommended.insert(FieldType::Date);
        let locale = Locale::canada();
        let validator = Validator::new(&policy, &locale).unwrap();
        let candidate = record(
            1,
            &[
                (FieldType::GivenName, CanonicalValue::text("Jane")),
                (FieldType::FamilyName, CanonicalValue::text("Doe")),
                (FieldType::Email, CanonicalValue::text("jane@b.ca")),
            ],
        );
        let verdict = validator.validate(&candidate);
        assert!(matches!(verdict, ValidationVerdict::NeedsReview(_)));
    }

    #[test]
    fn validate_all_partitions() {
        let mut policy = RequirementPolicy::default();
        policy.recommended.insert(FieldType::Date);
        let locale = Locale::canada();
        let validator = Validator::new(&policy, &locale).unwrap();
        let bad = record(1, &[(FieldType::GivenName, CanonicalValue::text("Jane"))]);
        let review = record(
            2,
            &[
                (FieldType::GivenName, CanonicalValue::text("Jane")),
                (FieldType::FamilyName, CanonicalValue::text("Doe")),
                (FieldType::Email, CanonicalValue::text("jane@b.ca")),
            ],
        );
        let outcome = validator.validate_all([full_record(0), bad, review]);
        assert_eq!(outcome.accepted.len(), 1);
        assert_eq!(outcome.review.len(), 1);
        assert_eq!(outcome.rejections.rejected_count(), 1);
        assert_eq!(outcome.rejections.rows[0].row, 1);
    }
}
