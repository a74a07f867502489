//! Run configuration and the field requirement policy.
//!
//! The JSON shape mirrors the original registration tooling:
//!
//! ```json
//! {
//!   "required": ["firstName", "lastName"],
//!   "optional": ["gender"],
//!   "delimiter": ",",
//!   "locale": "CA",
//!   "streetNames": "street_names.txt",
//!   "commonFirstNames": "first_names.txt",
//!   "commonLastNames": "last_names.txt"
//! }
//! ```
//!
//! Configuration problems are fatal and must surface before any row is
//! processed, since every downstream decision depends on them.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::field::FieldType;
use crate::locale::Locale;

/// Which fields a record must (or should) carry to be loadable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementPolicy {
    /// Fields whose absence rejects the record.
    pub required: BTreeSet<FieldType>,
    /// Fields whose absence flags the record for review.
    pub recommended: BTreeSet<FieldType>,
    /// Additionally require at least one usable contact method
    /// (phone or email).
    pub require_contact: bool,
}

impl RequirementPolicy {
    /// Fields counted as a usable contact method.
    pub const CONTACT_FIELDS: [FieldType; 2] = [FieldType::Phone, FieldType::Email];
}

impl Default for RequirementPolicy {
    /// Names are required and a contact method is required. Nothing is
    /// recommended by default; review-only fields come from the run
    /// configuration's `optional` list.
    fn default() -> Self {
        Self {
            required: BTreeSet::from([FieldType::GivenName, FieldType::FamilyName]),
            recommended: BTreeSet::new(),
            require_contact: true,
        }
    }
}

/// Raw run configuration as loaded from JSON. Field names are strings so
/// the original alias spellings (`fname`, `pcode`, `dob`) keep working;
/// [`RunConfig::policy`] resolves them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunConfig {
    /// Field names whose absence rejects a record.
    pub required: Vec<String>,
    /// Field names whose absence only flags a record for review.
    pub optional: Vec<String>,
    /// Input field delimiter; sniffed from the data when absent.
    pub delimiter: Option<char>,
    /// Locale code (`CA` built in) or omitted for the default.
    pub locale: Option<String>,
    /// Common street-suffix corpus file, one entry per line.
    pub street_names: Option<PathBuf>,
    /// Common given-name corpus file.
    pub common_first_names: Option<PathBuf>,
    /// Common family-name corpus file.
    pub common_last_names: Option<PathBuf>,
    /// Flat-file layout description; the Symphony layout when omitted.
    pub layout: Option<PathBuf>,
}

impl RunConfig {
    /// Loads and parses a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|err| ConfigError::Malformed {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Resolves the configured field names into a [`RequirementPolicy`].
    ///
    /// An empty `required` list is fatal: a run with nothing required
    /// would accept fully empty records.
    pub fn policy(&self) -> Result<RequirementPolicy, ConfigError> {
        if self.required.is_empty() {
            return Err(ConfigError::NoRequiredFields);
        }
        let required = parse_fields(&self.required)?;
        let mut recommended = parse_fields(&self.optional)?;
        // A field cannot be both; required wins.
        recommended.retain(|field| !required.contains(field));
        let require_contact = !required.contains(&FieldType::Phone)
            && !required.contains(&FieldType::Email);
        Ok(RequirementPolicy {
            required,
            recommended,
            require_contact,
        })
    }

    /// Resolves the locale allow-list entry.
    pub fn resolve_locale(&self) -> Result<Locale, ConfigError> {
        match self.locale.as_deref() {
            None => Ok(Locale::canada()),
            Some(code) if code.eq_ignore_ascii_case("CA") => Ok(Locale::canada()),
            Some(other) => Err(ConfigError::UnsupportedLocale(other.to_string())),
        }
    }
}

fn parse_fields(names: &[String]) -> Result<BTreeSet<FieldType>, ConfigError> {
    let mut fields = BTreeSet::new();
    for name in names {
        let field = name
            .parse::<FieldType>()
            .map_err(|_| ConfigError::UnknownField { name: name.clone() })?;
        fields.insert(field);
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_resolves_aliases() {
        let config: RunConfig = serde_json::from_str(
            r#"{"required": ["fname", "lname", "email"], "optional": ["gender", "dob"]}"#,
        )
        .unwrap();
        let policy = config.policy().unwrap();
        assert!(policy.required.contains(&FieldType::GivenName));
        assert!(policy.required.contains(&FieldType::Email));
        assert!(policy.recommended.contains(&FieldType::Gender));
        // Email is explicitly required, so the contact-method rule is moot.
        assert!(!policy.require_contact);
    }

    #[test]
    fn empty_required_is_fatal() {
        let config = RunConfig::default();
        assert!(matches!(
            config.policy(),
            Err(ConfigError::NoRequiredFields)
        ));
    }

    #[test]
    fn required_wins_over_optional() {
        let config: RunConfig = serde_json::from_str(
            r#"{"required": ["fname"], "optional": ["fname", "gender"]}"#,
        )
        .unwrap();
        let policy = config.policy().unwrap();
        assert!(!policy.recommended.contains(&FieldType::GivenName));
    }

    #[test]
    fn unknown_locale_is_fatal() {
        let config: RunConfig =
            serde_json::from_str(r#"{"required": ["fname"], "locale": "FR"}"#).unwrap();
        assert!(matches!(
            config.resolve_locale(),
            Err(ConfigError::UnsupportedLocale(_))
        ));
    }
}
