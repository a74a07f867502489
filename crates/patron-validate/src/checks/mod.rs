//! Validation rule modules.
//!
//! Each module checks one concern and returns the reasons it triggers.
//! `run_all` fixes the execution order, which is also the order reasons
//! appear in on a verdict.

mod geography;
mod required;
mod values;

use patron_model::{CandidateRecord, Locale, RejectionReason, RequirementPolicy};
use regex::Regex;

/// Everything triggered for one record, hard and soft separated.
pub(crate) struct Findings {
    /// Reasons that reject the record.
    pub hard: Vec<RejectionReason>,
    /// Reasons that only flag it for review.
    pub review: Vec<RejectionReason>,
}

/// Runs every rule against one candidate record.
pub(crate) fn run_all(
    policy: &RequirementPolicy,
    locale: &Locale,
    postal: &Regex,
    record: &CandidateRecord,
) -> Findings {
    let mut hard = Vec::new();
    let mut review = Vec::new();

    // 1. Required fields and the contact-method rule.
    required::check(policy, record, &mut hard, &mut review);

    // 2. Domain checks on present values.
    values::check(locale, postal, record, &mut hard);

    // 3. Country / province consistency.
    geography::check(locale, record, &mut hard);

    Findings { hard, review }
}
