//! Receipt field extraction module.

mod analyzer;
pub mod rules;

pub use analyzer::{analyze_receipt, ReceiptAnalyzer};
