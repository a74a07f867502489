//! Per-field-type cell classifiers.
//!
//! Each module exposes `classify(ctx, raw) -> ClassificationVote` for its
//! fixed field type: a pure function with no dependency on row/column
//! position and no shared mutable state, so evaluation can be reordered
//! or parallelized freely. New field types slot in by adding a module
//! and a registry entry; the orchestration never changes.

pub mod barcode;
pub mod country;
pub mod date;
pub mod email;
pub mod gender;
pub mod name;
pub mod phone;
pub mod postal;
pub mod province;
pub mod street;

use patron_model::{CanonicalValue, FieldType};

use crate::vote::{ClassificationVote, ClassifyContext};

/// A classifier: (context, raw cell text) → vote.
pub type ClassifierFn = fn(&ClassifyContext<'_>, &str) -> ClassificationVote;

/// The classifier table, keyed by field type.
pub const REGISTRY: [(FieldType, ClassifierFn); 11] = [
    (FieldType::Phone, phone::classify),
    (FieldType::PostalCode, postal::classify),
    (FieldType::Gender, gender::classify),
    (FieldType::Email, email::classify),
    (FieldType::Country, country::classify),
    (FieldType::Province, province::classify),
    (FieldType::Date, date::classify),
    (FieldType::GivenName, name::classify_given),
    (FieldType::FamilyName, name::classify_family),
    (FieldType::StreetAddress, street::classify),
    (FieldType::Barcode, barcode::classify),
];

/// Looks up the classifier for one field type.
pub fn classifier_for(field: FieldType) -> Option<ClassifierFn> {
    REGISTRY
        .iter()
        .find(|(candidate, _)| *candidate == field)
        .map(|(_, classify)| *classify)
}

/// Runs every classifier against one cell, in registry order.
pub fn classify_cell(ctx: &ClassifyContext<'_>, raw: &str) -> Vec<ClassificationVote> {
    REGISTRY
        .iter()
        .map(|(_, classify)| classify(ctx, raw))
        .collect()
}

/// Re-runs one field's canonicalization, for the extraction pass.
pub fn canonicalize(
    ctx: &ClassifyContext<'_>,
    field: FieldType,
    raw: &str,
) -> Option<CanonicalValue> {
    let classify = classifier_for(field)?;
    classify(ctx, raw).canonical
}
