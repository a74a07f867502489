//! Province/state classifier.
//!
//! Exact or near match against the configured country's province table.
//! This is the one classifier permitted to consult the evolving column
//! assignment, read-only: when a Country column has already been
//! identified and agrees with the locale, a valid code scores higher.

use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;

use patron_model::{CanonicalValue, FieldType};

use crate::vote::{ClassificationVote, ClassifyContext};

/// Two-letter code valid for the identified country.
const CODE_WITH_COUNTRY: f32 = 0.95;
/// Two-letter code valid for the configured locale, country unconfirmed.
const CODE_MATCH: f32 = 0.85;
/// Full province name.
const NAME_MATCH: f32 = 0.9;
const NEAR_NAME: f32 = 0.65;
const NEAR_THRESHOLD: f64 = 0.9;

pub fn classify(ctx: &ClassifyContext<'_>, raw: &str) -> ClassificationVote {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|ch| ch.is_alphabetic() || ch == ' ') {
        return ClassificationVote::none(FieldType::Province);
    }

    if trimmed.chars().count() == 2 {
        if let Some(province) = ctx.locale.province_by_code(trimmed) {
            let confidence = if ctx
                .country_hint()
                .is_some_and(|hint| hint.eq_ignore_ascii_case(&ctx.locale.code))
            {
                CODE_WITH_COUNTRY
            } else {
                CODE_MATCH
            };
            return vote(confidence, &province.code);
        }
        return ClassificationVote::none(FieldType::Province);
    }

    if let Some(province) = ctx.locale.province_by_name(trimmed) {
        return vote(NAME_MATCH, &province.code);
    }

    let lowered = trimmed.to_lowercase();
    if lowered.len() >= 5 {
        for province in &ctx.locale.provinces {
            if jaro_similarity(lowered.chars(), province.name.to_lowercase().chars())
                >= NEAR_THRESHOLD
            {
                return vote(NEAR_NAME, &province.code);
            }
        }
    }

    ClassificationVote::none(FieldType::Province)
}

fn vote(confidence: f32, code: &str) -> ClassificationVote {
    ClassificationVote::new(
        FieldType::Province,
        confidence,
        Some(CanonicalValue::Text(code.to_uppercase())),
    )
}
