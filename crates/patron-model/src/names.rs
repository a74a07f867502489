//! Reference name lists from an existing system of record.
//!
//! These are injected external data: the given/family-name classifiers
//! fall back to pure heuristics when a corpus is absent, they just
//! score lower. Entries are compared case-insensitively.

use std::collections::BTreeSet;

/// Optional lookup corpora for name and street classification.
#[derive(Debug, Clone, Default)]
pub struct NameLists {
    given: BTreeSet<String>,
    family: BTreeSet<String>,
    street_suffixes: BTreeSet<String>,
}

impl NameLists {
    /// Builds lists from individual entries; normalizes and drops blanks.
    pub fn from_entries<G, F, T>(given: G, family: F, street_suffixes: T) -> Self
    where
        G: IntoIterator,
        G::Item: AsRef<str>,
        F: IntoIterator,
        F::Item: AsRef<str>,
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        Self {
            given: collect(given),
            family: collect(family),
            street_suffixes: collect(street_suffixes),
        }
    }

    pub fn has_given(&self) -> bool {
        !self.given.is_empty()
    }

    pub fn has_family(&self) -> bool {
        !self.family.is_empty()
    }

    pub fn has_street_suffixes(&self) -> bool {
        !self.street_suffixes.is_empty()
    }

    pub fn contains_given(&self, name: &str) -> bool {
        self.given.contains(&name.trim().to_ascii_uppercase())
    }

    pub fn contains_family(&self, name: &str) -> bool {
        self.family.contains(&name.trim().to_ascii_uppercase())
    }

    /// True if `token` matches a known street suffix (Ave, Cres, ...).
    pub fn is_street_suffix(&self, token: &str) -> bool {
        let normalized = token.trim().trim_end_matches('.').to_ascii_uppercase();
        self.street_suffixes.contains(&normalized)
    }
}

fn collect<I, S>(entries: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|s| s.as_ref().trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let lists = NameLists::from_entries(["Jane", "Bob"], ["Doe"], ["Ave", "Cres"]);
        assert!(lists.contains_given("JANE"));
        assert!(lists.contains_family("doe"));
        assert!(lists.is_street_suffix("cres."));
        assert!(!lists.contains_given("Zork"));
    }

    #[test]
    fn default_lists_are_empty() {
        let lists = NameLists::default();
        assert!(!lists.has_given());
        assert!(!lists.has_family());
        assert!(!lists.contains_given("Jane"));
    }
}
