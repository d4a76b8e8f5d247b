//! Rendering result with metadata and statistics.

use crate::model::Metadata;
use serde::{Deserialize, Serialize};

/// Result of rendering a judgment, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (XML or JSON)
    pub content: String,

    /// Judgment metadata
    pub metadata: Metadata,

    /// Structure statistics
    pub stats: ParseStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, metadata: Metadata, stats: ParseStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Counts of structural elements, collected while building output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Number of decisions
    pub decision_count: u32,

    /// Number of paragraphs (numbered or not)
    pub paragraph_count: u32,

    /// Number of subparagraphs
    pub subparagraph_count: u32,

    /// Number of cross-headings
    pub cross_heading_count: u32,

    /// Number of big levels
    pub big_level_count: u32,

    /// Number of quoted structures
    pub quoted_structure_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of footnotes
    pub footnote_count: u32,

    /// Number of annexes
    pub annex_count: u32,

    /// Approximate word count of the body
    pub word_count: u32,
}

impl ParseStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add word counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ParseStats) {
        self.decision_count += other.decision_count;
        self.paragraph_count += other.paragraph_count;
        self.subparagraph_count += other.subparagraph_count;
        self.cross_heading_count += other.cross_heading_count;
        self.big_level_count += other.big_level_count;
        self.quoted_structure_count += other.quoted_structure_count;
        self.table_count += other.table_count;
        self.footnote_count += other.footnote_count;
        self.annex_count += other.annex_count;
        self.word_count += other.word_count;
    }
}
