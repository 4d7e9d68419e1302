/*!
 * Extraction of translatable units from document text.
 *
 * A translatable unit is a maximal contiguous run of characters in the
 * configured foreign-script alphabet. The default alphabet is the CJK
 * Unified Ideographs block, matching the most common deployment (Chinese
 * source text embedded in otherwise Latin-script files).
 */

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Default run pattern: one or more CJK Unified Ideographs (U+4E00..U+9FA5)
pub const DEFAULT_SCRIPT_PATTERN: &str = "[\u{4e00}-\u{9fa5}]+";

static DEFAULT_SCRIPT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(DEFAULT_SCRIPT_PATTERN).expect("default script pattern is valid")
});

/// Scans document text for translatable foreign-script runs
#[derive(Debug, Clone)]
pub struct Extractor {
    /// Compiled run pattern for the configured script alphabet
    pattern: Regex,
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_SCRIPT_REGEX.clone(),
        }
    }
}

impl Extractor {
    /// Create an extractor for a custom script run pattern
    ///
    /// The pattern is expected to match one maximal run per match, the way
    /// a character-class-plus-`+` pattern does.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .with_context(|| format!("Invalid script pattern: {}", pattern))?;
        Ok(Self { pattern })
    }

    /// Extract all translatable units from `text` in first-occurrence order.
    ///
    /// Duplicates are preserved: a fragment appearing three times appears
    /// three times in the output. An empty result means the document has
    /// nothing to translate and must be skipped, not treated as a failure.
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.pattern
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
