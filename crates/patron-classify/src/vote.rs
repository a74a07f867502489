//! Classification votes and the shared read-only classifier context.

use patron_model::{CanonicalValue, ConfigError, FieldType, Locale, NameLists};
use regex::Regex;

/// The result of one classifier applied to one cell.
///
/// Confidence 0 means "no evidence", never "definitely not": absence of
/// evidence is data the tracker consumes, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationVote {
    pub field_type: FieldType,
    /// In `[0, 1]`, deterministic for identical input.
    pub confidence: f32,
    /// The parsed canonical value, when one could be produced.
    pub canonical: Option<CanonicalValue>,
}

impl ClassificationVote {
    pub fn new(field_type: FieldType, confidence: f32, canonical: Option<CanonicalValue>) -> Self {
        debug_assert!((0.0..=1.0).contains(&confidence));
        Self {
            field_type,
            confidence,
            canonical,
        }
    }

    /// A "no evidence" vote for `field_type`.
    pub fn none(field_type: FieldType) -> Self {
        Self {
            field_type,
            confidence: 0.0,
            canonical: None,
        }
    }

    pub fn is_evidence(&self) -> bool {
        self.confidence > 0.0
    }
}

/// Context available to every classifier.
///
/// Classifiers are pure functions of `(context, cell text)`. The context
/// is read-only during classification; the identification engine
/// refreshes `country_hint` between rows from the tracker's current
/// Country belief. Province is the one classifier allowed to consult it.
#[derive(Debug, Clone)]
pub struct ClassifyContext<'a> {
    pub locale: &'a Locale,
    pub name_lists: &'a NameLists,
    postal_pattern: Regex,
    country_hint: Option<String>,
}

impl<'a> ClassifyContext<'a> {
    /// Builds a context, compiling the locale's postal pattern.
    /// A pattern that does not compile is a fatal configuration error.
    pub fn new(locale: &'a Locale, name_lists: &'a NameLists) -> Result<Self, ConfigError> {
        let postal_pattern =
            Regex::new(&locale.postal_pattern).map_err(|err| ConfigError::InvalidPostalPattern {
                locale: locale.code.clone(),
                message: err.to_string(),
            })?;
        Ok(Self {
            locale,
            name_lists,
            postal_pattern,
            country_hint: None,
        })
    }

    /// The compiled postal-code pattern for the configured locale.
    pub fn postal_pattern(&self) -> &Regex {
        &self.postal_pattern
    }

    /// Country code currently believed for the grid, if any column is
    /// trending toward Country.
    pub fn country_hint(&self) -> Option<&str> {
        self.country_hint.as_deref()
    }

    pub fn set_country_hint(&mut self, hint: Option<String>) {
        self.country_hint = hint;
    }
}
