//! Multi-pass receipt analyzer.

use std::time::Instant;

use lazy_static::lazy_static;
use tracing::{debug, trace};

use crate::error::Result;
use crate::models::config::ExtractionConfig;
use crate::models::receipt::{AnalysisReport, DatePass, DateSource, ExtractionResult, FieldSource};

use super::rules::{
    has_date_keyword, normalize_line, split_lines, DateMatcher, FieldExtractor, ItemExtractor,
    ItemList, TotalMatcher, DATE_KEYWORDS,
};

lazy_static! {
    static ref DEFAULT_ANALYZER: ReceiptAnalyzer = ReceiptAnalyzer::new();
}

/// Analyze receipt text with the default settings, items included.
pub fn analyze_receipt(text: &str) -> ExtractionResult {
    DEFAULT_ANALYZER.analyze(text)
}

/// Receipt analyzer running the date, total and item rules over OCR text.
///
/// Each field takes the first match in line order. Dates are looked up in
/// two passes: lines labeled with a date keyword first, then every line.
/// The analyzer holds no per-call state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct ReceiptAnalyzer {
    dates: DateMatcher,
    totals: TotalMatcher,
    item_extractor: Option<ItemExtractor>,
    date_keywords: Vec<String>,
}

impl ReceiptAnalyzer {
    /// Create an analyzer with default settings.
    pub fn new() -> Self {
        Self {
            dates: DateMatcher::new(),
            totals: TotalMatcher::new(),
            item_extractor: Some(ItemExtractor::new()),
            date_keywords: DATE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Create an analyzer from an extraction config.
    pub fn with_config(config: &ExtractionConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            dates: DateMatcher::with_year_prefix(&config.year_prefix)?,
            totals: TotalMatcher::with_keywords(config.total_keywords.iter().cloned()),
            item_extractor: config.extract_items.then(ItemExtractor::new),
            date_keywords: config.date_keywords.clone(),
        })
    }

    /// Enable or disable item extraction.
    pub fn with_items(mut self, enabled: bool) -> Self {
        self.item_extractor = enabled.then(ItemExtractor::new);
        self
    }

    /// Set the year prefix preferred by the date matcher.
    pub fn with_year_prefix(mut self, prefix: &str) -> Result<Self> {
        self.dates = DateMatcher::with_year_prefix(prefix)?;
        Ok(self)
    }

    /// Whether results carry an item list.
    pub fn extracts_items(&self) -> bool {
        self.item_extractor.is_some()
    }

    /// Extract date, total and items from recognized receipt text.
    ///
    /// Never fails; fields that cannot be found stay empty.
    pub fn analyze(&self, text: &str) -> ExtractionResult {
        self.analyze_with_report(text).result
    }

    /// Same as [`analyze`](Self::analyze), also recording where each value came from.
    pub fn analyze_with_report(&self, text: &str) -> AnalysisReport {
        let start = Instant::now();

        let lines: Vec<String> = split_lines(text).into_iter().map(normalize_line).collect();

        let date_source = self.find_date(&lines);
        let mut total_amount = None;
        let mut total_source = None;
        let mut warnings = Vec::new();
        let mut items = self.item_extractor.map(|_| ItemList::new());

        for (index, line) in lines.iter().enumerate() {
            trace!("line {}: {}", index, line);

            if total_amount.is_none() {
                match self.totals.try_extract(line) {
                    Some(Ok(amount)) => {
                        debug!("Total {} found on line {}", amount, index);
                        total_amount = Some(amount);
                        total_source = Some(FieldSource {
                            line: index,
                            text: line.clone(),
                        });
                    }
                    Some(Err(e)) => {
                        debug!("Skipping total candidate on line {}: {}", index, e);
                        warnings.push(format!("line {}: {}", index + 1, e));
                    }
                    None => {}
                }
            }

            // A total line may also name an item
            if let (Some(extractor), Some(items)) = (&self.item_extractor, items.as_mut()) {
                if let Some(candidate) = extractor.extract(line) {
                    if items.push(candidate) {
                        trace!("Item candidate accepted on line {}", index);
                    }
                }
            }
        }

        let result = ExtractionResult {
            date: date_source.as_ref().map(|(value, _)| value.clone()),
            total_amount,
            items: items.map(ItemList::into_vec),
        };

        debug!(
            "Analyzed {} lines: date={:?} total={:?} items={}",
            lines.len(),
            result.date,
            result.total_amount,
            result.items().len()
        );

        AnalysisReport {
            result,
            date_source: date_source.map(|(_, source)| source),
            total_source,
            warnings,
            line_count: lines.len(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }

    fn find_date(&self, lines: &[String]) -> Option<(String, DateSource)> {
        let labeled = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| has_date_keyword(line, self.date_keywords.as_slice()));

        self.first_date(labeled, DatePass::Labeled).or_else(|| {
            debug!("No labeled date line, searching all lines");
            self.first_date(lines.iter().enumerate(), DatePass::Fallback)
        })
    }

    fn first_date<'a>(
        &self,
        mut lines: impl Iterator<Item = (usize, &'a String)>,
        pass: DatePass,
    ) -> Option<(String, DateSource)> {
        lines.find_map(|(index, line)| {
            let found = self.dates.extract(line)?;
            debug!("Date {} found on line {} ({:?}, {:?})", found.value, index, pass, found.tier);

            let source = DateSource {
                source: FieldSource {
                    line: index,
                    text: line.clone(),
                },
                pass,
                tier: found.tier,
            };
            Some((found.value, source))
        })
    }
}

impl Default for ReceiptAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
