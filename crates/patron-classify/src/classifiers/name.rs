//! Given-name and family-name classifiers.
//!
//! Names are the hardest columns: nothing about "Doe" says surname the
//! way "@" says email. Both classifiers start from the same plausibility
//! heuristic (no digits, sane length and character classes) and are
//! pulled apart by vocabulary: injected reference lists when available,
//! otherwise a small built-in list of common given names. A plausible
//! name that is a known given name leans GivenName; one that is not
//! leans FamilyName, because surnames are far more varied than given
//! names. The heuristic floor stays above zero so classification
//! degrades rather than disappears without any list.

use patron_model::{CanonicalValue, FieldType};

use crate::vote::{ClassificationVote, ClassifyContext};

/// Membership in an injected reference list.
const LIST_MATCH: f32 = 0.85;
/// Membership in the built-in common given-name list.
const COMMON_GIVEN: f32 = 0.7;
/// Plausible name not recognized as a common given name.
const LIKELY_FAMILY: f32 = 0.45;
/// Bare plausibility floor.
const HEURISTIC: f32 = 0.3;
/// Plausible, but recognized as a common given name (for FamilyName).
const GIVEN_SHAPED: f32 = 0.25;

const MAX_LEN: usize = 40;

/// Common given names, used only when no reference list is injected.
const FALLBACK_GIVEN: [&str; 60] = [
    "AMY", "ANDREW", "ANNA", "ANNE", "BARBARA", "BOB", "BRIAN", "CAROL", "CATHERINE", "CHARLES",
    "CHRIS", "CLAIRE", "DANIEL", "DAVID", "DIANE", "DONALD", "DOROTHY", "EDWARD", "ELIZABETH",
    "EMILY", "EMMA", "ERIC", "FRANK", "GEORGE", "GRACE", "HANNAH", "HELEN", "HENRY", "JACK",
    "JAMES", "JANE", "JANET", "JASON", "JENNIFER", "JOHN", "JOSEPH", "KAREN", "KEVIN", "LAURA",
    "LINDA", "LISA", "MARGARET", "MARIA", "MARIE", "MARK", "MARY", "MICHAEL", "NANCY", "OLIVER",
    "PATRICIA", "PAUL", "PETER", "RICHARD", "ROBERT", "RUTH", "SARAH", "SUSAN", "THOMAS",
    "WILLIAM", "ZOE",
];

pub fn classify_given(ctx: &ClassifyContext<'_>, raw: &str) -> ClassificationVote {
    let Some(canonical) = plausible_name(raw) else {
        return ClassificationVote::none(FieldType::GivenName);
    };
    let confidence = if ctx.name_lists.has_given() {
        if ctx.name_lists.contains_given(&canonical) {
            LIST_MATCH
        } else {
            HEURISTIC
        }
    } else if is_common_given(&canonical) {
        COMMON_GIVEN
    } else {
        HEURISTIC
    };
    ClassificationVote::new(
        FieldType::GivenName,
        confidence,
        Some(CanonicalValue::Text(canonical)),
    )
}

pub fn classify_family(ctx: &ClassifyContext<'_>, raw: &str) -> ClassificationVote {
    let Some(canonical) = plausible_name(raw) else {
        return ClassificationVote::none(FieldType::FamilyName);
    };
    let confidence = if ctx.name_lists.has_family() {
        if ctx.name_lists.contains_family(&canonical) {
            LIST_MATCH
        } else {
            HEURISTIC
        }
    } else if given_shaped(ctx, &canonical) {
        GIVEN_SHAPED
    } else {
        LIKELY_FAMILY
    };
    ClassificationVote::new(
        FieldType::FamilyName,
        confidence,
        Some(CanonicalValue::Text(canonical)),
    )
}

/// Trimmed text that could be a personal name: alphabetic with internal
/// hyphen/apostrophe/space, at most two tokens, no digits.
fn plausible_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.len() < 2 || trimmed.len() > MAX_LEN {
        return None;
    }
    if !trimmed.chars().next().is_some_and(char::is_alphabetic) {
        return None;
    }
    if !trimmed
        .chars()
        .all(|ch| ch.is_alphabetic() || matches!(ch, '-' | '\'' | ' ' | '.'))
    {
        return None;
    }
    if trimmed.split_whitespace().count() > 2 {
        return None;
    }
    Some(trimmed.to_string())
}

fn is_common_given(name: &str) -> bool {
    let upper = name.to_ascii_uppercase();
    FALLBACK_GIVEN.contains(&upper.as_str())
}

/// Whether this plausible name is recognized as a given name, by the
/// injected list when present or the built-in one otherwise.
fn given_shaped(ctx: &ClassifyContext<'_>, name: &str) -> bool {
    if ctx.name_lists.has_given() {
        ctx.name_lists.contains_given(name)
    } else {
        is_common_given(name)
    }
}
