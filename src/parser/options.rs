//! Parsing options and configuration.

use crate::enrich::QuotePattern;

/// Indentation differences up to this many inches are treated as equal.
pub const DEFAULT_TOLERANCE: f32 = 0.099;

/// Options for parsing judgments.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Indentation tolerance in inches
    pub tolerance: f32,

    /// Maximum number of blocks scanned when looking for the end of the header
    pub header_search_limit: usize,

    /// Whether to tag quoted amendments and definitions
    pub detect_amendments: bool,

    /// Quote marks delimiting amendments and definitions
    pub quote_pattern: QuotePattern,

    /// Whether to merge adjacent runs with identical formatting
    pub merge_runs: bool,

    /// Whether to NFC-normalize text runs
    pub normalize_unicode: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation tolerance.
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }

    /// Set the header search window.
    pub fn with_header_search_limit(mut self, limit: usize) -> Self {
        self.header_search_limit = limit;
        self
    }

    /// Enable or disable amendment detection.
    pub fn with_amendments(mut self, detect: bool) -> Self {
        self.detect_amendments = detect;
        self
    }

    /// Set the quote pattern used for amendments and definitions.
    pub fn with_quote_pattern(mut self, pattern: QuotePattern) -> Self {
        self.quote_pattern = pattern;
        self
    }

    /// Enable or disable run merging.
    pub fn with_merge_runs(mut self, merge: bool) -> Self {
        self.merge_runs = merge;
        self
    }

    /// Enable or disable Unicode normalization.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            header_search_limit: 100,
            detect_amendments: false,
            quote_pattern: QuotePattern::default(),
            merge_runs: true,
            normalize_unicode: true,
        }
    }
}
