//! Total amount extraction from fuzzy keyword lines.

use tracing::debug;

use super::FieldExtractor;
use super::patterns::{TOTAL_KEYWORDS, TOTAL_NUMBER_RUN};
use crate::error::ExtractionError;

/// Total amount extractor keyed on a set of keyword spellings.
#[derive(Debug, Clone)]
pub struct TotalMatcher {
    keywords: Vec<String>,
}

impl TotalMatcher {
    /// Create a matcher with the built-in keyword table.
    pub fn new() -> Self {
        Self::with_keywords(TOTAL_KEYWORDS.iter().copied())
    }

    /// Create a matcher with a custom keyword table.
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// Keywords this matcher accepts.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Whether the line contains any accepted keyword spelling.
    pub fn matches_keyword(&self, line: &str) -> bool {
        self.keywords.iter().any(|k| line.contains(k.as_str()))
    }

    /// Like [`FieldExtractor::extract`], but keeps parse failures.
    ///
    /// `None` means the line is not a total line or has no numeric run.
    pub fn try_extract(&self, line: &str) -> Option<Result<u64, ExtractionError>> {
        if !self.matches_keyword(line) {
            return None;
        }

        let run = TOTAL_NUMBER_RUN.find(line)?;
        Some(parse_amount_run(run.as_str()))
    }
}

impl Default for TotalMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TotalMatcher {
    type Output = u64;

    fn extract(&self, line: &str) -> Option<Self::Output> {
        match self.try_extract(line)? {
            Ok(amount) => Some(amount),
            Err(e) => {
                debug!("Ignoring total candidate: {}", e);
                None
            }
        }
    }
}

/// Parse a numeric run such as `12,500` into an integer amount.
///
/// Every non-digit is dropped first, so `1.500` reads as `1500`; a decimal
/// point is not told apart from a thousands separator.
pub fn parse_amount_run(run: &str) -> Result<u64, ExtractionError> {
    let digits: String = run.chars().filter(|c| c.is_ascii_digit()).collect();

    digits
        .parse()
        .map_err(|_| ExtractionError::MalformedNumericRun {
            value: run.to_string(),
        })
}
