//! Error types for the recx-core library.

use thiserror::Error;

/// Main error type for the recx library.
#[derive(Error, Debug)]
pub enum RecxError {
    /// Receipt field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in a configuration file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised inside the extraction rules.
///
/// None of these escape [`crate::ReceiptAnalyzer::analyze`]; a failed rule
/// leaves its field unset instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// Digits were found next to a total keyword but could not be parsed.
    #[error("malformed numeric run: {value:?}")]
    MalformedNumericRun { value: String },

    /// A configured pattern could not be compiled.
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

impl From<regex::Error> for ExtractionError {
    fn from(err: regex::Error) -> Self {
        Self::InvalidPattern(err.to_string())
    }
}

/// Result type for the recx library.
pub type Result<T> = std::result::Result<T, RecxError>;
