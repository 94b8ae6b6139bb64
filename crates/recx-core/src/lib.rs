//! Core library for Korean receipt OCR post-processing.
//!
//! This crate provides:
//! - Line normalization for noisy OCR output (full-width forms, stray spaces)
//! - Date extraction with repair of common separator misreads
//! - Total amount extraction from OCR-corrupted keyword spellings
//! - Purchased item name candidates
//!
//! The engine never touches images or OCR engines; it consumes recognized
//! text and returns an [`ExtractionResult`].

pub mod error;
pub mod models;
pub mod receipt;

pub use error::{ExtractionError, RecxError, Result};
pub use models::config::{ExtractionConfig, RecxConfig};
pub use models::receipt::{AnalysisReport, DatePass, DateSource, ExtractionResult, FieldSource};
pub use receipt::rules::DateTier;
pub use receipt::{analyze_receipt, ReceiptAnalyzer};
