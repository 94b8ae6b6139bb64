//! Receipt extraction result and provenance records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::receipt::rules::{to_calendar_date, DateTier};

/// Structured fields extracted from one receipt's OCR text.
///
/// Serializes as `{"date": .., "totalAmount": .., "items": [..]}`. `items`
/// is left out entirely when the analyzer runs without item support.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Transaction date, verbatim as matched (`25/09/02`, `2024.07.02`).
    pub date: Option<String>,

    /// Total amount in whole currency units.
    pub total_amount: Option<u64>,

    /// Distinct item names in first-seen order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
}

impl ExtractionResult {
    /// Check whether nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.total_amount.is_none()
            && self.items.as_ref().is_none_or(|items| items.is_empty())
    }

    /// The extracted date as a calendar date, when it forms a valid one.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(to_calendar_date)
    }

    /// Item names, empty when item extraction was disabled.
    pub fn items(&self) -> &[String] {
        self.items.as_deref().unwrap_or_default()
    }
}

/// Which date pass produced the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePass {
    /// Line carried a date keyword such as `거래일시`.
    Labeled,
    /// Unlabeled line, searched only after the labeled pass found nothing.
    Fallback,
}

/// Where a field value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSource {
    /// Zero-based line index in the input text.
    pub line: usize,
    /// The source line after normalization.
    pub text: String,
}

/// Provenance of the extracted date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSource {
    #[serde(flatten)]
    pub source: FieldSource,
    pub pass: DatePass,
    pub tier: DateTier,
}

/// Extraction result together with how it was reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// The extracted fields.
    pub result: ExtractionResult,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_source: Option<DateSource>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_source: Option<FieldSource>,

    /// Non-fatal problems, e.g. a total keyword next to an unparsable number.
    pub warnings: Vec<String>,

    /// Number of input lines.
    pub line_count: usize,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}
