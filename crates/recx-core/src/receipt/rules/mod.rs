//! Rule-based field extractors for Korean receipts.

pub mod dates;
pub mod items;
pub mod normalize;
pub mod patterns;
pub mod totals;

pub use dates::{has_date_keyword, repair_misread_separators, to_calendar_date, DateMatch, DateMatcher, DateTier};
pub use items::{ItemExtractor, ItemList};
pub use normalize::{normalize_line, split_lines, to_half_width};
pub use patterns::*;
pub use totals::{parse_amount_run, TotalMatcher};

/// Trait for single-line field extractors.
///
/// Every implementation expects a line that already went through
/// [`normalize_line`].
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from one normalized line.
    fn extract(&self, line: &str) -> Option<Self::Output>;
}
