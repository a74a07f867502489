//! Library-card barcode classifier.
//!
//! Barcodes are unformatted digit runs whose lengths fall outside the
//! locale's phone shapes. Long runs (14-digit Codabar cards) are near
//! certain; shorter runs could be legacy card numbers and score lower.

use patron_model::{CanonicalValue, FieldType};

use crate::vote::{ClassificationVote, ClassifyContext};

const LONG_RUN: f32 = 0.9;
const SHORT_RUN: f32 = 0.7;

const MIN_DIGITS: usize = 6;
const MAX_DIGITS: usize = 15;
/// At or above this length a digit run is almost certainly a card number.
const LONG_THRESHOLD: usize = 12;

pub fn classify(ctx: &ClassifyContext<'_>, raw: &str) -> ClassificationVote {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return ClassificationVote::none(FieldType::Barcode);
    }
    let len = trimmed.len();
    if !(MIN_DIGITS..=MAX_DIGITS).contains(&len) {
        return ClassificationVote::none(FieldType::Barcode);
    }
    // Phone-shaped lengths belong to the phone classifier.
    if ctx.locale.phone_digit_counts.contains(&len) {
        return ClassificationVote::none(FieldType::Barcode);
    }
    let confidence = if len >= LONG_THRESHOLD { LONG_RUN } else { SHORT_RUN };
    ClassificationVote::new(
        FieldType::Barcode,
        confidence,
        Some(CanonicalValue::Text(trimmed.to_string())),
    )
}
