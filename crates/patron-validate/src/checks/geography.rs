//! Country / province consistency.
//!
//! The extractor canonicalized what it could; a province cell that did
//! not resolve to a code in the locale's table (say `ZZ` under Canada)
//! arrives here as raw text and is the unsupported-province case.

use patron_model::{CandidateRecord, FieldType, Locale, RejectionReason};

pub(crate) fn check(locale: &Locale, record: &CandidateRecord, hard: &mut Vec<RejectionReason>) {
    if let Some(country) = record.get(FieldType::Country).and_then(|v| v.as_text()) {
        if !locale.is_country(country) {
            hard.push(RejectionReason::UnsupportedCountry);
        }
    }

    if let Some(province) = record.get(FieldType::Province).and_then(|v| v.as_text()) {
        let known = locale.province_by_code(province).is_some()
            || locale.province_by_name(province).is_some();
        if !known {
            hard.push(RejectionReason::UnsupportedProvince);
        }
    }
}
