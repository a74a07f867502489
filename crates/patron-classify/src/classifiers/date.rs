//! Date classifier.
//!
//! Detects a separator ('/', '-', '.'), splits into three numeric
//! groups, and scores each format hypothesis by range-checking the
//! groups (day 1-31, month 1-12, four-digit year 1900-2099). Compact
//! `yyyymmdd` is handled separately. A cell where more than one format
//! fits (both low groups ≤ 12) is ambiguous and scores lower; the
//! tracker tallies which format stays consistent across the column's
//! rows and extraction uses the winning format.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use patron_model::{CanonicalValue, FieldType};

use crate::vote::{ClassificationVote, ClassifyContext};

const UNAMBIGUOUS: f32 = 0.9;
const AMBIGUOUS: f32 = 0.6;

const YEAR_MIN: i32 = 1900;
const YEAR_MAX: i32 = 2099;

/// A date format hypothesis, in preference order for ambiguous cells.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DateFormat {
    /// `2005-12-23`, `2005/12/23`
    YearMonthDay,
    /// `12/23/2005`
    MonthDayYear,
    /// `23/12/2005`
    DayMonthYear,
    /// `20051223`
    CompactYearMonthDay,
}

impl DateFormat {
    pub const ALL: [DateFormat; 4] = [
        DateFormat::YearMonthDay,
        DateFormat::MonthDayYear,
        DateFormat::DayMonthYear,
        DateFormat::CompactYearMonthDay,
    ];
}

pub fn classify(_ctx: &ClassifyContext<'_>, raw: &str) -> ClassificationVote {
    let candidates = scan(raw);
    match candidates.as_slice() {
        [] => ClassificationVote::none(FieldType::Date),
        [(_, date)] => ClassificationVote::new(
            FieldType::Date,
            UNAMBIGUOUS,
            Some(CanonicalValue::Date(*date)),
        ),
        [(_, date), ..] => ClassificationVote::new(
            FieldType::Date,
            AMBIGUOUS,
            Some(CanonicalValue::Date(*date)),
        ),
    }
}

/// Every format hypothesis consistent with this cell, in
/// [`DateFormat::ALL`] preference order.
pub fn scan(raw: &str) -> Vec<(DateFormat, NaiveDate)> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if trimmed.len() == 8 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        if let Some(date) = assemble(&trimmed[0..4], &trimmed[4..6], &trimmed[6..8]) {
            return vec![(DateFormat::CompactYearMonthDay, date)];
        }
        return Vec::new();
    }

    let Some(groups) = split_groups(trimmed) else {
        return Vec::new();
    };
    let [a, b, c] = groups;

    let mut candidates = Vec::new();
    if a.len() == 4 {
        if let Some(date) = assemble(a, b, c) {
            candidates.push((DateFormat::YearMonthDay, date));
        }
    }
    if c.len() == 4 {
        if let Some(date) = assemble(c, a, b) {
            candidates.push((DateFormat::MonthDayYear, date));
        }
        if let Some(date) = assemble(c, b, a) {
            candidates.push((DateFormat::DayMonthYear, date));
        }
    }
    // Identical month/day (e.g. 05/05/2005) is not a real ambiguity.
    if candidates.len() == 2 && candidates[0].1 == candidates[1].1 {
        candidates.truncate(1);
    }
    candidates
}

/// Re-parses a cell under one fixed format, for the extraction pass.
pub fn parse_with(format: DateFormat, raw: &str) -> Option<NaiveDate> {
    scan(raw)
        .into_iter()
        .find(|(candidate, _)| *candidate == format)
        .map(|(_, date)| date)
}

/// Splits on a single consistent separator into exactly three groups.
fn split_groups(text: &str) -> Option<[&str; 3]> {
    let separator = text.chars().find(|c| matches!(c, '/' | '-' | '.'))?;
    let mut parts = text.split(separator);
    let a = parts.next()?;
    let b = parts.next()?;
    let c = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    for part in [a, b, c] {
        if part.is_empty() || !part.chars().all(|ch| ch.is_ascii_digit()) {
            return None;
        }
    }
    Some([a, b, c])
}

fn assemble(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    if year.len() != 4 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}
