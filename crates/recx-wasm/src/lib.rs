//! WASM bindings for receipt OCR text extraction.
//!
//! The browser capture flow runs OCR itself and hands the recognized text
//! here; nothing is kept between calls.

use wasm_bindgen::prelude::*;

use recx_core::receipt::rules::{self, DateMatcher, FieldExtractor, TotalMatcher};
use recx_core::{AnalysisReport, ExtractionResult, ReceiptAnalyzer as CoreAnalyzer};

/// Largest integer a JS number holds exactly (`Number.MAX_SAFE_INTEGER`).
const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract `{date, totalAmount, items}` from recognized receipt text.
#[wasm_bindgen]
pub fn analyze_receipt(text: &str) -> Result<JsValue, JsValue> {
    to_js(&js_safe_result(recx_core::analyze_receipt(text)))
}

/// Normalize one OCR line (half-width forms, no whitespace).
#[wasm_bindgen]
pub fn normalize_line(line: &str) -> String {
    rules::normalize_line(line)
}

/// Date on a single line, if any.
#[wasm_bindgen]
pub fn extract_date(line: &str) -> Option<String> {
    DateMatcher::new()
        .extract(&rules::normalize_line(line))
        .map(|m| m.value)
}

/// Total amount on a single line, if it carries a total keyword.
///
/// Amounts a JS number cannot hold exactly are reported as not found.
#[wasm_bindgen]
pub fn extract_total(line: &str) -> Option<f64> {
    js_safe_total(TotalMatcher::new().extract(&rules::normalize_line(line)))
        .map(|amount| amount as f64)
}

/// Configurable analyzer class for browser use.
#[wasm_bindgen]
pub struct ReceiptAnalyzer {
    inner: CoreAnalyzer,
}

#[wasm_bindgen]
impl ReceiptAnalyzer {
    /// Create an analyzer with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: CoreAnalyzer::new(),
        }
    }

    /// Enable or disable item extraction.
    #[wasm_bindgen]
    pub fn set_extract_items(&mut self, enabled: bool) {
        self.inner = self.inner.clone().with_items(enabled);
    }

    /// Change the expected year prefix, e.g. "26".
    #[wasm_bindgen]
    pub fn set_year_prefix(&mut self, prefix: &str) -> Result<(), JsValue> {
        self.inner = self
            .inner
            .clone()
            .with_year_prefix(prefix)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    /// Extract fields from recognized text.
    #[wasm_bindgen]
    pub fn analyze(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&js_safe_result(self.inner.analyze(text)))
    }

    /// Extract fields together with their source lines and warnings.
    #[wasm_bindgen]
    pub fn analyze_with_report(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&js_safe_report(self.inner.analyze_with_report(text)))
    }
}

impl Default for ReceiptAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn js_safe_total(total: Option<u64>) -> Option<u64> {
    total.filter(|amount| *amount <= MAX_SAFE_INTEGER)
}

fn js_safe_result(mut result: ExtractionResult) -> ExtractionResult {
    result.total_amount = js_safe_total(result.total_amount);
    result
}

fn js_safe_report(mut report: AnalysisReport) -> AnalysisReport {
    if let Some(amount) = report.result.total_amount.filter(|a| *a > MAX_SAFE_INTEGER) {
        report.result.total_amount = None;
        if let Some(source) = report.total_source.take() {
            report.warnings.push(format!(
                "line {}: total {} exceeds the JavaScript safe integer range",
                source.line + 1,
                amount
            ));
        }
    }
    report
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    // Absent fields must reach JS as null, not undefined
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
