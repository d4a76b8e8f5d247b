//! Run merging and Unicode normalization.

use unicode_normalization::UnicodeNormalization;

use super::{walk_inlines, Enricher};
use crate::error::Result;
use crate::model::Inline;

/// Merges adjacent text runs with identical formatting.
///
/// Word splits text into runs for reasons that leave no visible trace
/// (spell-check state, revision ids), which defeats pattern matching.
#[derive(Debug, Clone, Copy)]
pub struct Merger {
    merge: bool,
    normalize: bool,
}

impl Merger {
    /// Create a merger that only merges runs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a merger that also NFC-normalizes text.
    pub fn normalizing() -> Self {
        Self {
            merge: true,
            normalize: true,
        }
    }

    /// Enable or disable merging.
    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    /// Enable or disable normalization.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self {
            merge: true,
            normalize: false,
        }
    }
}

/// NFC-normalize a string.
pub fn normalize_text(text: &str) -> String {
    text.nfc().collect()
}

impl Enricher for Merger {
    fn name(&self) -> &str {
        "merger"
    }

    fn enrich_inlines(&self, inlines: Vec<Inline>) -> Result<Vec<Inline>> {
        let inlines = walk_inlines(self, inlines)?;
        let mut result: Vec<Inline> = Vec::with_capacity(inlines.len());
        for inline in inlines {
            let inline = match inline {
                Inline::Text(mut run) if self.normalize => {
                    run.text = normalize_text(&run.text);
                    Inline::Text(run)
                }
                other => other,
            };
            if self.merge {
                if let (Some(Inline::Text(prev)), Inline::Text(run)) = (result.last_mut(), &inline) {
                    if prev.style == run.style {
                        prev.text.push_str(&run.text);
                        continue;
                    }
                }
            }
            result.push(inline);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Line, TextRun};

    #[test]
    fn test_merges_equal_styles() {
        let line = Line::with_contents(vec![
            Inline::text("Neutral "),
            Inline::text("Citation"),
            Inline::Text(TextRun::bold(" [2021]")),
            Inline::Tab,
            Inline::text("x"),
        ]);
        let block = Merger::new().enrich_block(Block::Line(line)).unwrap();
        let line = block.as_line().unwrap();
        assert_eq!(line.contents.len(), 4);
        assert_eq!(line.contents[0], Inline::text("Neutral Citation"));
    }

    #[test]
    fn test_normalizes() {
        let decomposed = "Rene\u{301}";
        let block = Merger::normalizing()
            .enrich_block(Block::line(decomposed))
            .unwrap();
        assert_eq!(block.plain_text(), "Ren\u{e9}");

        let untouched = Merger::new().enrich_block(Block::line(decomposed)).unwrap();
        assert_eq!(untouched.plain_text(), decomposed);
    }
}
