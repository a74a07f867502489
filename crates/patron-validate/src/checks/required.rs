//! Presence checks: required fields, recommended fields, contact method.

use patron_model::{CandidateRecord, RejectionReason, RequirementPolicy};

pub(crate) fn check(
    policy: &RequirementPolicy,
    record: &CandidateRecord,
    hard: &mut Vec<RejectionReason>,
    review: &mut Vec<RejectionReason>,
) {
    for field in &policy.required {
        if !record.contains(*field) {
            hard.push(RejectionReason::MissingRequiredField(*field));
        }
    }

    if policy.require_contact
        && !RequirementPolicy::CONTACT_FIELDS
            .iter()
            .any(|field| record.contains(*field))
    {
        hard.push(RejectionReason::NoContactMethod);
    }

    for field in &policy.recommended {
        if !record.contains(*field) {
            review.push(RejectionReason::MissingRecommendedField(*field));
        }
    }
}
