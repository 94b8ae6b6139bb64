//! Common regex patterns and keyword tables for receipt extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Year prefix expected on receipts from the current deployment period.
pub const DEFAULT_YEAR_PREFIX: &str = "25";

/// Longest accepted year prefix (a full four-digit year).
pub const MAX_YEAR_PREFIX_LEN: usize = 4;

/// Keywords that label a transaction date line, in normalized form.
pub const DATE_KEYWORDS: &[&str] = &["거래일시", "일시", "날짜"];

/// Spellings of "total"/"amount" seen on receipts, including OCR misreads.
pub const TOTAL_KEYWORDS: &[&str] = &[
    "큼랙", "금랙", "총금랙", "금액", "금맥",
    "합계", "항계", "함계", "합꼐", "함꼐",
    "많게", "많계",
    "총액", "총금액", "총금",
    "계",
];

lazy_static! {
    // Any line ending convention
    pub static ref LINE_BREAK: Regex = Regex::new(r"\r\n|\r|\n").unwrap();

    // Price or quantity marker on an item line
    pub static ref DIGIT_RUN: Regex = Regex::new(r"[0-9]{2,}").unwrap();

    pub static ref HANGUL_SYLLABLE: Regex = Regex::new(r"[가-힣]").unwrap();

    // Everything that cannot be part of an item name
    pub static ref NON_NAME_CHARS: Regex = Regex::new(r"[^가-힣A-Za-z]").unwrap();

    // Amount next to a total keyword: 12,500 / 9800 / 1.000
    pub static ref TOTAL_NUMBER_RUN: Regex = Regex::new(r"[0-9][0-9,.\s]*[0-9]").unwrap();

    // Date shapes that do not depend on the year prefix
    pub static ref GENERIC_DATE: Regex = Regex::new(r"[0-9]{2,4}[./][0-9]{2}[./][0-9]{2}").unwrap();
}

/// Build the date pattern anchored on `prefix`: `25.07.02`, `25/07/02`.
pub fn prefixed_date_pattern(prefix: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"{}[./][0-9]{{2}}[./][0-9]{{2}}", regex::escape(prefix)))
}

/// Same as [`prefixed_date_pattern`] but tolerating digits glued in front.
pub fn embedded_date_pattern(prefix: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"[0-9]*{}[./][0-9]{{2}}[./][0-9]{{2}}", regex::escape(prefix)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_break_conventions() {
        let parts: Vec<&str> = LINE_BREAK.split("a\r\nb\rc\nd").collect();
        assert_eq!(parts, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_total_number_run_needs_two_digits() {
        assert_eq!(TOTAL_NUMBER_RUN.find("합계12,500원").unwrap().as_str(), "12,500");
        assert!(TOTAL_NUMBER_RUN.find("합계5원").is_none());
    }

    #[test]
    fn test_prefixed_date_pattern() {
        let re = prefixed_date_pattern("25").unwrap();
        assert!(re.is_match("25/09/02"));
        assert!(re.is_match("25.09.02"));
        assert!(!re.is_match("24.09.02"));
    }
}
