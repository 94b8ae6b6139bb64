//! Date extraction for receipts, tolerant of separator misreads.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::FieldExtractor;
use super::patterns::{
    embedded_date_pattern, prefixed_date_pattern, DEFAULT_YEAR_PREFIX, GENERIC_DATE, MAX_YEAR_PREFIX_LEN,
};
use crate::error::ExtractionError;

lazy_static! {
    static ref DEFAULT_PREFIXED: Regex = prefixed_date_pattern(DEFAULT_YEAR_PREFIX).unwrap();
    static ref DEFAULT_EMBEDDED: Regex = embedded_date_pattern(DEFAULT_YEAR_PREFIX).unwrap();
    static ref DATE_PARTS: Regex = Regex::new(r"^([0-9]{2,4})[./-]([0-9]{2})[./-]([0-9]{2})$").unwrap();
}

/// Date pattern tiers, tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateTier {
    /// Starts with the expected year prefix: `25/05/08`.
    ExactPrefix,
    /// Year prefix with digits glued in front: `0025/05/08`.
    EmbeddedPrefix,
    /// Any `NN[NN].NN.NN` or `NN[NN]/NN/NN` triple.
    Generic,
}

/// A date found on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    /// Matched text, verbatim from the repaired line.
    pub value: String,
    /// Tier that produced the match.
    pub tier: DateTier,
}

/// Date field extractor.
#[derive(Debug, Clone)]
pub struct DateMatcher {
    tiers: Vec<(DateTier, Regex)>,
    prefixed: Regex,
}

impl DateMatcher {
    /// Create a matcher expecting the default `25` year prefix.
    pub fn new() -> Self {
        Self::from_patterns(DEFAULT_PREFIXED.clone(), DEFAULT_EMBEDDED.clone())
    }

    /// Create a matcher for another year prefix, e.g. `"26"`.
    pub fn with_year_prefix(prefix: &str) -> Result<Self, ExtractionError> {
        let valid = (1..=MAX_YEAR_PREFIX_LEN).contains(&prefix.len())
            && prefix.chars().all(|c| c.is_ascii_digit());
        if !valid {
            return Err(ExtractionError::InvalidPattern(format!(
                "year prefix must be 1-{} digits, got {:?}",
                MAX_YEAR_PREFIX_LEN, prefix
            )));
        }

        Ok(Self::from_patterns(
            prefixed_date_pattern(prefix)?,
            embedded_date_pattern(prefix)?,
        ))
    }

    fn from_patterns(prefixed: Regex, embedded: Regex) -> Self {
        Self {
            tiers: vec![
                (DateTier::ExactPrefix, prefixed.clone()),
                (DateTier::EmbeddedPrefix, embedded),
                (DateTier::Generic, GENERIC_DATE.clone()),
            ],
            prefixed,
        }
    }
}

impl Default for DateMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateMatcher {
    type Output = DateMatch;

    fn extract(&self, line: &str) -> Option<Self::Output> {
        // Repair a working copy only; the caller keeps the original line.
        let candidate = repair_misread_separators(line);

        for (tier, pattern) in &self.tiers {
            let Some(found) = pattern.find(&candidate) else {
                continue;
            };

            let value = match tier {
                // Keep only the prefixed suffix of the glued run
                DateTier::EmbeddedPrefix => match self.prefixed.find(found.as_str()) {
                    Some(inner) => inner.as_str(),
                    None => continue,
                },
                _ => found.as_str(),
            };

            return Some(DateMatch {
                value: value.to_string(),
                tier: *tier,
            });
        }

        None
    }
}

/// Rewrite every `7` sitting between two digits as `/`.
///
/// OCR often reads the slash in `25/09/02` as a `7`. Neighbours are taken
/// from the unrepaired line, so `7up` and `7근` are never touched.
pub fn repair_misread_separators(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();

    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let between_digits = i > 0
                && chars[i - 1].is_ascii_digit()
                && chars.get(i + 1).is_some_and(|next| next.is_ascii_digit());
            if c == '7' && between_digits { '/' } else { c }
        })
        .collect()
}

/// Whether a normalized line carries any of the date context keywords.
pub fn has_date_keyword<S: AsRef<str>>(line: &str, keywords: &[S]) -> bool {
    keywords.iter().any(|k| line.contains(k.as_ref()))
}

/// Interpret a matched date as a calendar date.
///
/// Accepts the shapes [`DateMatcher`] produces (`25/09/02`, `2024.07.02`).
/// Returns `None` when the parts do not form a real date.
pub fn to_calendar_date(value: &str) -> Option<NaiveDate> {
    let caps = DATE_PARTS.captures(value)?;
    let year = parse_year(&caps[1]);
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_year(s: &str) -> i32 {
    let year: i32 = s.parse().unwrap_or(0);
    if year < 100 {
        // Two-digit year: assume 2000s for 00-50, 1900s for 51-99
        if year <= 50 {
            2000 + year
        } else {
            1900 + year
        }
    } else {
        year
    }
}
