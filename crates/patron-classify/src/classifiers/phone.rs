//! Phone number classifier.
//!
//! North American numbers carry 10 meaningful digits (area code,
//! exchange, number), optionally prefixed with a country code of 1;
//! legacy local data still has 7-digit numbers. Digit count is judged
//! after stripping separators. A 9-digit "phone" is malformed but
//! plausible and scores low rather than zero; only the validator
//! rejects.

use patron_model::{CanonicalValue, FieldType};

use crate::vote::{ClassificationVote, ClassifyContext};

/// 10 digits with a valid area-code/exchange shape.
const TEN_DIGIT_VALID: f32 = 0.95;
/// 10 digits, shape off (e.g. area code starting with 0 or 1).
const TEN_DIGIT: f32 = 0.7;
/// 11 digits with a leading country code of 1.
const ELEVEN_DIGIT_VALID: f32 = 0.85;
/// 7-digit local number.
const SEVEN_DIGIT: f32 = 0.5;
/// Wrong digit count but nothing except digits and separators.
const DIGIT_RUN: f32 = 0.15;

pub fn classify(ctx: &ClassifyContext<'_>, raw: &str) -> ClassificationVote {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ClassificationVote::none(FieldType::Phone);
    }
    // Letters rule a phone number out entirely.
    if trimmed.chars().any(|ch| ch.is_alphabetic()) {
        return ClassificationVote::none(FieldType::Phone);
    }
    if !trimmed
        .chars()
        .all(|ch| ch.is_ascii_digit() || matches!(ch, ' ' | '-' | '(' | ')' | '+' | '.'))
    {
        return ClassificationVote::none(FieldType::Phone);
    }

    let mut digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    let had_country_code = digits.len() == 11 && digits.starts_with('1');
    if had_country_code {
        digits.remove(0);
    }

    let accepted = ctx.locale.phone_digit_counts.contains(&digits.len())
        || (had_country_code && ctx.locale.phone_digit_counts.contains(&11));
    if !accepted {
        // Plausible digit run, wrong length. Weak evidence only.
        if (6..=12).contains(&digits.len()) {
            return ClassificationVote::new(FieldType::Phone, DIGIT_RUN, None);
        }
        return ClassificationVote::none(FieldType::Phone);
    }

    let confidence = match digits.len() {
        10 if valid_ten_digit_shape(&digits) => {
            if had_country_code {
                ELEVEN_DIGIT_VALID
            } else {
                TEN_DIGIT_VALID
            }
        }
        10 => TEN_DIGIT,
        7 => SEVEN_DIGIT,
        _ => DIGIT_RUN,
    };

    ClassificationVote::new(
        FieldType::Phone,
        confidence,
        Some(CanonicalValue::Text(format_digits(&digits))),
    )
}

/// Area code and exchange both start with 2-9.
fn valid_ten_digit_shape(digits: &str) -> bool {
    let bytes = digits.as_bytes();
    bytes.len() == 10 && bytes[0] >= b'2' && bytes[3] >= b'2'
}

/// `7802429978` → `780-242-9978`, `2429978` → `242-9978`.
fn format_digits(digits: &str) -> String {
    match digits.len() {
        10 => format!("{}-{}-{}", &digits[0..3], &digits[3..6], &digits[6..10]),
        7 => format!("{}-{}", &digits[0..3], &digits[3..7]),
        _ => digits.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patron_model::{Locale, NameLists};

    fn ctx_fixture() -> (Locale, NameLists) {
        (Locale::canada(), NameLists::default())
    }

    #[test]
    fn ten_digit_with_valid_area_code_scores_highest() {
        let (locale, lists) = ctx_fixture();
        let ctx = ClassifyContext::new(&locale, &lists).unwrap();
        let vote = classify(&ctx, "780 242-9978");
        assert_eq!(vote.confidence, TEN_DIGIT_VALID);
        assert_eq!(
            vote.canonical,
            Some(CanonicalValue::Text("780-242-9978".to_string()))
        );
    }

    #[test]
    fn country_code_is_stripped() {
        let (locale, lists) = ctx_fixture();
        let ctx = ClassifyContext::new(&locale, &lists).unwrap();
        let vote = classify(&ctx, "+1 (780) 555-1212");
        assert_eq!(vote.confidence, ELEVEN_DIGIT_VALID);
        assert_eq!(
            vote.canonical,
            Some(CanonicalValue::Text("780-555-1212".to_string()))
        );
    }

    #[test]
    fn seven_digit_scores_lower() {
        let (locale, lists) = ctx_fixture();
        let ctx = ClassifyContext::new(&locale, &lists).unwrap();
        let vote = classify(&ctx, "555-0100");
        assert_eq!(vote.confidence, SEVEN_DIGIT);
        assert_eq!(
            vote.canonical,
            Some(CanonicalValue::Text("555-0100".to_string()))
        );
    }

    #[test]
    fn nine_digit_run_is_weak_but_nonzero() {
        let (locale, lists) = ctx_fixture();
        let ctx = ClassifyContext::new(&locale, &lists).unwrap();
        let vote = classify(&ctx, "123-456789");
        assert_eq!(vote.confidence, DIGIT_RUN);
    }

    #[test]
    fn text_is_not_a_phone() {
        let (locale, lists) = ctx_fixture();
        let ctx = ClassifyContext::new(&locale, &lists).unwrap();
        assert_eq!(classify(&ctx, "jane@x.com").confidence, 0.0);
        assert_eq!(classify(&ctx, "Edward").confidence, 0.0);
        assert_eq!(classify(&ctx, "").confidence, 0.0);
    }
}
