//! Supported-locale configuration.
//!
//! Classifiers and validation rules never hard-code a country: they work
//! against an injected [`Locale`]. Canada is built in; other locales can
//! be supplied as JSON with the same shape.

use serde::{Deserialize, Serialize};

/// A province or state within the locale's country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    /// Two-letter canonical code, e.g. `AB`.
    pub code: String,
    /// Full name, e.g. `Alberta`.
    pub name: String,
}

/// Everything locale-specific the pipeline needs: recognized country
/// names, the province/state table, the postal-code shape, and phone
/// digit-count expectations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    /// ISO-style country code, e.g. `CA`.
    pub code: String,
    /// Country names and abbreviations accepted on input.
    pub country_names: Vec<String>,
    /// Provinces/states with canonical two-letter codes.
    pub provinces: Vec<Province>,
    /// Regex source for a normalized (uppercased, space-stripped) postal code.
    pub postal_pattern: String,
    /// Digit counts accepted for a phone number after separator stripping.
    pub phone_digit_counts: Vec<usize>,
}

impl Locale {
    /// The built-in Canadian locale.
    pub fn canada() -> Self {
        let provinces = [
            ("AB", "Alberta"),
            ("BC", "British Columbia"),
            ("MB", "Manitoba"),
            ("NB", "New Brunswick"),
            ("NL", "Newfoundland and Labrador"),
            ("NS", "Nova Scotia"),
            ("NT", "Northwest Territories"),
            ("NU", "Nunavut"),
            ("ON", "Ontario"),
            ("PE", "Prince Edward Island"),
            ("QC", "Quebec"),
            ("SK", "Saskatchewan"),
            ("YT", "Yukon"),
        ];
        Self {
            code: "CA".to_string(),
            country_names: vec![
                "Canada".to_string(),
                "CA".to_string(),
                "CAN".to_string(),
            ],
            provinces: provinces
                .iter()
                .map(|(code, name)| Province {
                    code: (*code).to_string(),
                    name: (*name).to_string(),
                })
                .collect(),
            // Letter-digit-letter digit-letter-digit, space already stripped.
            postal_pattern: r"^[A-Za-z]\d[A-Za-z]\d[A-Za-z]\d$".to_string(),
            phone_digit_counts: vec![7, 10, 11],
        }
    }

    /// True if `value` names this locale's country (case-insensitive).
    pub fn is_country(&self, value: &str) -> bool {
        let trimmed = value.trim();
        self.country_names
            .iter()
            .any(|name| name.eq_ignore_ascii_case(trimmed))
    }

    /// Looks up a province by two-letter code (case-insensitive).
    pub fn province_by_code(&self, code: &str) -> Option<&Province> {
        let trimmed = code.trim();
        self.provinces
            .iter()
            .find(|p| p.code.eq_ignore_ascii_case(trimmed))
    }

    /// Looks up a province by full name (case-insensitive).
    pub fn province_by_name(&self, name: &str) -> Option<&Province> {
        let trimmed = name.trim();
        self.provinces
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(trimmed))
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::canada()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canada_has_thirteen_provinces() {
        let locale = Locale::canada();
        assert_eq!(locale.provinces.len(), 13);
        assert_eq!(locale.province_by_code("on").unwrap().name, "Ontario");
        assert_eq!(locale.province_by_name("ALBERTA").unwrap().code, "AB");
        assert!(locale.province_by_code("ZZ").is_none());
    }

    #[test]
    fn country_match_is_case_insensitive() {
        let locale = Locale::canada();
        assert!(locale.is_country("canada"));
        assert!(locale.is_country(" CA "));
        assert!(!locale.is_country("France"));
    }

    #[test]
    fn locale_round_trips_through_json() {
        let locale = Locale::canada();
        let json = serde_json::to_string(&locale).expect("serialize locale");
        let round: Locale = serde_json::from_str(&json).expect("deserialize locale");
        assert_eq!(locale, round);
    }
}
