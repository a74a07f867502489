//! Country classifier.
//!
//! Exact or near match against the configured locale's country names
//! and abbreviations. The canonical value is always the locale's
//! primary country name.

use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;

use patron_model::{CanonicalValue, FieldType};

use crate::vote::{ClassificationVote, ClassifyContext};

const EXACT_MATCH: f32 = 1.0;
const NEAR_MATCH: f32 = 0.7;
const NEAR_THRESHOLD: f64 = 0.9;

pub fn classify(ctx: &ClassifyContext<'_>, raw: &str) -> ClassificationVote {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|ch| ch.is_alphabetic() || ch == ' ') {
        return ClassificationVote::none(FieldType::Country);
    }

    let canonical = || {
        ctx.locale
            .country_names
            .first()
            .map(|name| CanonicalValue::Text(name.clone()))
    };

    if ctx.locale.is_country(trimmed) {
        return ClassificationVote::new(FieldType::Country, EXACT_MATCH, canonical());
    }

    // "Cnada" should still count; "Jane" should not.
    let lowered = trimmed.to_lowercase();
    if lowered.len() >= 4 {
        for name in &ctx.locale.country_names {
            if name.len() >= 4
                && jaro_similarity(lowered.chars(), name.to_lowercase().chars()) >= NEAR_THRESHOLD
            {
                return ClassificationVote::new(FieldType::Country, NEAR_MATCH, canonical());
            }
        }
    }

    ClassificationVote::none(FieldType::Country)
}

#[cfg(test)]
mod tests {
    use super::*;
    use patron_model::{Locale, NameLists};

    fn classify_str(raw: &str) -> ClassificationVote {
        let locale = Locale::canada();
        let lists = NameLists::default();
        let ctx = ClassifyContext::new(&locale, &lists).unwrap();
        classify(&ctx, raw)
    }

    #[test]
    fn exact_and_abbreviated_names_match() {
        assert_eq!(classify_str("Canada").confidence, EXACT_MATCH);
        assert_eq!(classify_str("ca").confidence, EXACT_MATCH);
        assert_eq!(
            classify_str("CANADA").canonical,
            Some(CanonicalValue::Text("Canada".to_string()))
        );
    }

    #[test]
    fn typo_is_a_near_match() {
        assert_eq!(classify_str("Cnada").confidence, NEAR_MATCH);
    }

    #[test]
    fn unrelated_text_is_ignored() {
        assert_eq!(classify_str("France").confidence, 0.0);
        assert_eq!(classify_str("Jane").confidence, 0.0);
        assert_eq!(classify_str("780-242-9978").confidence, 0.0);
        assert_eq!(classify_str("").confidence, 0.0);
    }
}
