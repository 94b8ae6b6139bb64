//! Purchased item name candidates.

use super::FieldExtractor;
use super::patterns::{DIGIT_RUN, HANGUL_SYLLABLE, NON_NAME_CHARS};

/// Item name extractor.
///
/// A line counts as an item line when it has a run of two or more digits
/// and at least one Hangul syllable. The name is whatever Hangul and Latin
/// letters remain once everything else is stripped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemExtractor;

impl ItemExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Whether the line looks like it lists an item with a price or quantity.
    pub fn is_item_line(&self, line: &str) -> bool {
        DIGIT_RUN.is_match(line) && HANGUL_SYLLABLE.is_match(line)
    }
}

impl FieldExtractor for ItemExtractor {
    type Output = String;

    fn extract(&self, line: &str) -> Option<Self::Output> {
        if !self.is_item_line(line) {
            return None;
        }

        let name = NON_NAME_CHARS.replace_all(line, "").into_owned();
        (name.chars().count() > 1).then_some(name)
    }
}

/// Ordered item names without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemList {
    items: Vec<String>,
}

impl ItemList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a candidate unless it is a single character or already present.
    ///
    /// Returns whether the candidate was accepted.
    pub fn push(&mut self, candidate: String) -> bool {
        if candidate.chars().count() <= 1 || self.contains(&candidate) {
            return false;
        }
        self.items.push(candidate);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|item| item == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_item_candidate() {
        let extractor = ItemExtractor::new();
        assert_eq!(extractor.extract("아메리카노4500"), Some("아메리카노".to_string()));
        assert_eq!(extractor.extract("카페라떼(L)2@5,000"), Some("카페라떼L".to_string()));
    }

    #[test]
    fn test_requires_digit_run_and_hangul() {
        let extractor = ItemExtractor::new();
        // single digit is not a price
        assert_eq!(extractor.extract("아메리카노1"), None);
        // no Hangul
        assert_eq!(extractor.extract("COFFEE4500"), None);
        assert_eq!(extractor.extract(""), None);
    }

    #[test]
    fn test_single_letter_candidate_rejected() {
        let extractor = ItemExtractor::new();
        assert_eq!(extractor.extract("원12,500"), None);
    }

    #[test]
    fn test_inclusive_bias() {
        // A subtotal line still reads as an item line
        let extractor = ItemExtractor::new();
        assert_eq!(extractor.extract("소계12,500"), Some("소계".to_string()));
    }

    #[test]
    fn test_item_list_dedup() {
        let mut items = ItemList::new();
        assert!(items.push("아메리카노".to_string()));
        assert!(items.push("라떼".to_string()));
        assert!(!items.push("아메리카노".to_string()));
        assert!(!items.push("a".to_string()));
        assert_eq!(items.len(), 2);
        assert_eq!(items.into_vec(), vec!["아메리카노".to_string(), "라떼".to_string()]);
    }

    #[test]
    fn test_item_list_case_sensitive() {
        let mut items = ItemList::new();
        assert!(items.push("Latte".to_string()));
        assert!(items.push("latte".to_string()));
        assert_eq!(items.as_slice().len(), 2);
    }
}
