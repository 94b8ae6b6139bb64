//! Configuration structures for receipt extraction.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{RecxError, Result};
use crate::receipt::rules::{DATE_KEYWORDS, DEFAULT_YEAR_PREFIX, MAX_YEAR_PREFIX_LEN, TOTAL_KEYWORDS};

/// Main configuration for recx.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecxConfig {
    /// Receipt extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Receipt extraction configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Collect item name candidates.
    pub extract_items: bool,

    /// Two-digit year prefix preferred by the date matcher.
    pub year_prefix: String,

    /// Keywords that label the transaction date line.
    pub date_keywords: Vec<String>,

    /// Keyword spellings that mark the total amount line.
    pub total_keywords: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            extract_items: true,
            year_prefix: DEFAULT_YEAR_PREFIX.to_string(),
            date_keywords: DATE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            total_keywords: TOTAL_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl ExtractionConfig {
    /// Check the settings for values the matchers cannot use.
    pub fn validate(&self) -> Result<()> {
        let prefix_ok = (1..=MAX_YEAR_PREFIX_LEN).contains(&self.year_prefix.len())
            && self.year_prefix.chars().all(|c| c.is_ascii_digit());
        if !prefix_ok {
            return Err(RecxError::Config(format!(
                "year_prefix must be 1-{} digits, got {:?}",
                MAX_YEAR_PREFIX_LEN, self.year_prefix
            )));
        }

        for (name, keywords) in [
            ("date_keywords", &self.date_keywords),
            ("total_keywords", &self.total_keywords),
        ] {
            if keywords.is_empty() {
                return Err(RecxError::Config(format!("{} must not be empty", name)));
            }
            if keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(RecxError::Config(format!("{} contains a blank entry", name)));
            }
        }

        Ok(())
    }
}

impl RecxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.extraction.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Default config file location.
    pub fn default_path(config_dir: &Path) -> PathBuf {
        config_dir.join("recx").join("config.json")
    }
}
