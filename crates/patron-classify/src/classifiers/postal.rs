//! Postal code classifier.
//!
//! Matches the configured locale's postal shape against the uppercased,
//! space-stripped cell. For Canada that is letter-digit-letter
//! digit-letter-digit with an optional interior space.

use patron_model::{CanonicalValue, FieldType};

use crate::vote::{ClassificationVote, ClassifyContext};

const PATTERN_MATCH: f32 = 0.95;

pub fn classify(ctx: &ClassifyContext<'_>, raw: &str) -> ClassificationVote {
    let normalized: String = raw
        .trim()
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| ch.to_ascii_uppercase())
        .collect();
    if normalized.is_empty() {
        return ClassificationVote::none(FieldType::PostalCode);
    }
    if ctx.postal_pattern().is_match(&normalized) {
        return ClassificationVote::new(
            FieldType::PostalCode,
            PATTERN_MATCH,
            Some(CanonicalValue::Text(normalized)),
        );
    }
    ClassificationVote::none(FieldType::PostalCode)
}
