//! Domain checks on values that are present.
//!
//! Extraction keeps a cell as raw text when it fails to canonicalize,
//! so these rules see both clean canonical values and the stragglers.

use patron_model::{CandidateRecord, CanonicalValue, FieldType, Locale, RejectionReason};
use regex::Regex;

pub(crate) fn check(
    locale: &Locale,
    postal: &Regex,
    record: &CandidateRecord,
    hard: &mut Vec<RejectionReason>,
) {
    for (field, value) in record.iter() {
        let valid = match field {
            FieldType::Date => matches!(value, CanonicalValue::Date(_)),
            FieldType::Phone => valid_phone(locale, value),
            FieldType::Email => valid_email(value),
            FieldType::PostalCode => valid_postal(postal, value),
            FieldType::Gender => valid_gender(value),
            FieldType::Barcode => valid_barcode(value),
            // Geography and free-text fields have their own rules or none.
            _ => true,
        };
        if !valid {
            hard.push(RejectionReason::InvalidValue(field));
        }
    }
}

fn valid_phone(locale: &Locale, value: &CanonicalValue) -> bool {
    let Some(text) = value.as_text() else {
        return false;
    };
    let formatting_only = text
        .chars()
        .all(|ch| ch.is_ascii_digit() || matches!(ch, ' ' | '-' | '(' | ')' | '+' | '.'));
    let digits = text.chars().filter(char::is_ascii_digit).count();
    formatting_only && locale.phone_digit_counts.contains(&digits)
}

fn valid_email(value: &CanonicalValue) -> bool {
    let Some(text) = value.as_text() else {
        return false;
    };
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

fn valid_postal(postal: &Regex, value: &CanonicalValue) -> bool {
    let Some(text) = value.as_text() else {
        return false;
    };
    let compact: String = text
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    postal.is_match(&compact)
}

fn valid_gender(value: &CanonicalValue) -> bool {
    value
        .as_text()
        .is_some_and(|text| text.len() == 1 && "MFXNP".contains(text))
}

fn valid_barcode(value: &CanonicalValue) -> bool {
    value
        .as_text()
        .is_some_and(|text| !text.is_empty() && text.chars().all(|ch| ch.is_ascii_digit()))
}
