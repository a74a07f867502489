//! Loading reference name lists from corpus files.
//!
//! One entry per line. A `None` path means "no corpus" and yields an
//! empty list; a configured path that cannot be read is an error, since
//! the operator asked for it.

use std::collections::BTreeSet;
use std::path::Path;

use patron_model::NameLists;
use tracing::{info, warn};

use crate::error::{IngestError, Result};

/// Loads whichever corpus files are configured into a [`NameLists`].
pub fn load_name_lists(
    given: Option<&Path>,
    family: Option<&Path>,
    street_suffixes: Option<&Path>,
) -> Result<NameLists> {
    let given = given.map(load_corpus).transpose()?.unwrap_or_default();
    let family = family.map(load_corpus).transpose()?.unwrap_or_default();
    let street = street_suffixes
        .map(load_corpus)
        .transpose()?
        .unwrap_or_default();

    if given.is_empty() && family.is_empty() {
        warn!("no reference name lists loaded; name classifiers run heuristic-only");
    } else {
        info!(
            given = given.len(),
            family = family.len(),
            street_suffixes = street.len(),
            "loaded reference name lists"
        );
    }
    Ok(NameLists::from_entries(given, family, street))
}

fn load_corpus(path: &Path) -> Result<BTreeSet<String>> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect())
}
