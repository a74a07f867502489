//! Email address classifier.
//!
//! Structural check: local part, `@`, domain with a dot. Confidence
//! scales with a plausible top-level domain; a bare `@` with some
//! structure around it is still weak evidence.

use std::sync::LazyLock;

use regex::Regex;

use patron_model::{CanonicalValue, FieldType};

use crate::vote::{ClassificationVote, ClassifyContext};

const STRUCTURAL_WITH_TLD: f32 = 0.95;
const STRUCTURAL: f32 = 0.75;
const BARE_AT: f32 = 0.3;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w.+\-]+@[\w\-]+(\.[\w\-]+)+$").expect("email pattern compiles")
});

pub fn classify(_ctx: &ClassifyContext<'_>, raw: &str) -> ClassificationVote {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ClassificationVote::none(FieldType::Email);
    }
    if !trimmed.contains('@') {
        return ClassificationVote::none(FieldType::Email);
    }

    let canonical = CanonicalValue::Text(trimmed.to_lowercase());

    if EMAIL.is_match(trimmed) {
        let confidence = if has_plausible_tld(trimmed) {
            STRUCTURAL_WITH_TLD
        } else {
            STRUCTURAL
        };
        return ClassificationVote::new(FieldType::Email, confidence, Some(canonical));
    }

    // Degenerate but @-bearing: "jane@host" or stray punctuation.
    let (local, domain) = trimmed.split_once('@').unwrap_or(("", ""));
    if !local.is_empty() && !domain.is_empty() && !domain.contains('@') {
        return ClassificationVote::new(FieldType::Email, BARE_AT, Some(canonical));
    }
    ClassificationVote::none(FieldType::Email)
}

/// Final label is 2-6 ASCII letters.
fn has_plausible_tld(address: &str) -> bool {
    address
        .rsplit('.')
        .next()
        .is_some_and(|tld| (2..=6).contains(&tld.len()) && tld.chars().all(|c| c.is_ascii_alphabetic()))
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
    fn full_address_scores_highest() {
        let vote = classify_str(" Jane.Doe@Example.COM ");
        assert_eq!(vote.confidence, STRUCTURAL_WITH_TLD);
        assert_eq!(
            vote.canonical,
            Some(CanonicalValue::Text("jane.doe@example.com".to_string()))
        );
    }

    #[test]
    fn numeric_tld_scores_lower() {
        let vote = classify_str("jane@example.c0m");
        assert_eq!(vote.confidence, STRUCTURAL);
    }

    #[test]
    fn missing_dot_is_weak_evidence() {
        let vote = classify_str("jane@host");
        assert_eq!(vote.confidence, BARE_AT);
    }

    #[test]
    fn plain_text_is_not_an_email() {
        assert_eq!(classify_str("Edward").confidence, 0.0);
        assert_eq!(classify_str("").confidence, 0.0);
    }
}
