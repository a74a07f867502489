//! Gender classifier.
//!
//! Small fixed vocabulary with accepted abbreviations: exact vocabulary
//! hits score 1.0, bare single-letter abbreviations score lower because
//! a lone letter is weak evidence on its own.

use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;

use patron_model::{CanonicalValue, FieldType};

use crate::vote::{ClassificationVote, ClassifyContext};

const EXACT_WORD: f32 = 1.0;
const SINGLE_LETTER: f32 = 0.6;
const NEAR_WORD: f32 = 0.8;
const NEAR_THRESHOLD: f64 = 0.92;

/// Vocabulary entries and the canonical code each maps to.
const VOCABULARY: [(&str, &str); 6] = [
    ("male", "M"),
    ("female", "F"),
    ("prefer not to say", "P"),
    ("not listed", "N"),
    ("nonbinary", "X"),
    ("non-binary", "X"),
];

const LETTER_CODES: [(char, &str); 5] = [('m', "M"), ('f', "F"), ('x', "X"), ('n', "N"), ('p', "P")];

pub fn classify(_ctx: &ClassifyContext<'_>, raw: &str) -> ClassificationVote {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ClassificationVote::none(FieldType::Gender);
    }
    let lowered = trimmed.to_lowercase();

    if let Some((_, code)) = VOCABULARY.iter().find(|(word, _)| *word == lowered) {
        return vote(EXACT_WORD, code);
    }

    if trimmed.chars().count() == 1 {
        let letter = lowered.chars().next().unwrap_or_default();
        if let Some((_, code)) = LETTER_CODES.iter().find(|(l, _)| *l == letter) {
            return vote(SINGLE_LETTER, code);
        }
        return ClassificationVote::none(FieldType::Gender);
    }

    // Near match catches "femael" and friends without accepting names.
    for (word, code) in VOCABULARY {
        if jaro_similarity(lowered.chars(), word.chars()) >= NEAR_THRESHOLD {
            return vote(NEAR_WORD, code);
        }
    }

    ClassificationVote::none(FieldType::Gender)
}

fn vote(confidence: f32, code: &str) -> ClassificationVote {
    ClassificationVote::new(
        FieldType::Gender,
        confidence,
        Some(CanonicalValue::Text(code.to_string())),
    )
}
