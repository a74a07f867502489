//! Street-address classifier.
//!
//! Civic addresses have a strong shape: a leading house number followed
//! by alphabetic words, often ending in a recognizable suffix (Ave, St,
//! Cres). An injected suffix corpus sharpens the match; a built-in list
//! of common Canadian suffixes covers the rest.

use patron_model::{CanonicalValue, FieldType};

use crate::vote::{ClassificationVote, ClassifyContext};

/// Leading number plus a recognized suffix.
const NUMBER_AND_SUFFIX: f32 = 0.9;
/// Leading number, no recognized suffix.
const NUMBER_ONLY: f32 = 0.6;
/// Recognized suffix without a leading number (unit-first styles).
const SUFFIX_ONLY: f32 = 0.4;

const DEFAULT_SUFFIXES: [&str; 22] = [
    "AVE", "AVENUE", "BLVD", "BOULEVARD", "CRES", "CRESCENT", "CT", "COURT", "DR", "DRIVE",
    "LANE", "LN", "PL", "PLACE", "RD", "ROAD", "SQ", "SQUARE", "ST", "STREET", "TERRACE", "WAY",
];

pub fn classify(ctx: &ClassifyContext<'_>, raw: &str) -> ClassificationVote {
    let trimmed = raw.trim();
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.len() < 2 || tokens.len() > 8 {
        return ClassificationVote::none(FieldType::StreetAddress);
    }
    let leading_number = is_civic_number(tokens[0]);
    // A bare pair of numbers ("12 34") is not an address.
    let has_words = tokens
        .iter()
        .skip(1)
        .any(|t| t.chars().any(char::is_alphabetic));
    if !has_words {
        return ClassificationVote::none(FieldType::StreetAddress);
    }
    let has_suffix = tokens.iter().skip(1).any(|t| known_suffix(ctx, t));
    let confidence = match (leading_number, has_suffix) {
        (true, true) => NUMBER_AND_SUFFIX,
        (true, false) => NUMBER_ONLY,
        (false, true) => SUFFIX_ONLY,
        (false, false) => return ClassificationVote::none(FieldType::StreetAddress),
    };
    ClassificationVote::new(
        FieldType::StreetAddress,
        confidence,
        Some(CanonicalValue::Text(trimmed.to_string())),
    )
}

/// "11", "11A", "11-3" style civic numbers.
fn is_civic_number(token: &str) -> bool {
    let mut chars = token.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_digit()) {
        return false;
    }
    token
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_alphabetic() || c == '-')
}

fn known_suffix(ctx: &ClassifyContext<'_>, token: &str) -> bool {
    if ctx.name_lists.has_street_suffixes() {
        return ctx.name_lists.is_street_suffix(token);
    }
    let normalized = token.trim_end_matches(['.', ',']).to_ascii_uppercase();
    DEFAULT_SUFFIXES.contains(&normalized.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use patron_model::{Locale, NameLists};

    #[test]
    fn number_and_suffix_scores_highest() {
        let locale = Locale::canada();
        let lists = NameLists::default();
        let ctx = ClassifyContext::new(&locale, &lists).unwrap();
        let vote = classify(&ctx, "11 Cherry Ave");
        assert_eq!(vote.confidence, NUMBER_AND_SUFFIX);
    }

    #[test]
    fn number_without_suffix_still_counts() {
        let locale = Locale::canada();
        let lists = NameLists::default();
        let ctx = ClassifyContext::new(&locale, &lists).unwrap();
        assert_eq!(classify(&ctx, "87 Whyte Corners").confidence, NUMBER_ONLY);
    }

    #[test]
    fn injected_suffix_corpus_replaces_builtin() {
        let locale = Locale::canada();
        let lists =
            NameLists::from_entries(Vec::<&str>::new(), Vec::<&str>::new(), ["Gate", "Bay"]);
        let ctx = ClassifyContext::new(&locale, &lists).unwrap();
        assert_eq!(classify(&ctx, "4 Rowan Gate").confidence, NUMBER_AND_SUFFIX);
        // "Ave" is no longer recognized once a corpus is supplied.
        assert_eq!(classify(&ctx, "11 Cherry Ave").confidence, NUMBER_ONLY);
    }

    #[test]
    fn non_addresses_yield_no_evidence() {
        let locale = Locale::canada();
        let lists = NameLists::default();
        let ctx = ClassifyContext::new(&locale, &lists).unwrap();
        for raw in ["Jane", "Edmonton", "12 34", "780-242-9978", ""] {
            assert_eq!(classify(&ctx, raw).confidence, 0.0, "{raw:?}");
        }
    }
}
