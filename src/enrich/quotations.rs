//! Quoted text and definitions in amending instruments.
//!
//! Only the last text run of a line is scanned. A quoted span is an
//! amendment ("quoted text") when the rest of the line uses an amending
//! verb, and a defined term otherwise. Lines carrying at least one
//! amendment are wrapped in a `Mod`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{walk_inlines, Enricher};
use crate::error::Result;
use crate::model::{Block, Inline, Line, Mod, NumberedLine, TextRun};

/// Verbs that mark a line as amending another instrument, in English and Welsh.
static AMENDING_VERB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:insert|inserted|leave\s+out|left\s+out|omit|omitted|substitute|substituted|mewnosoder|hepgorer|rhodder)\b",
    )
    .unwrap()
});

/// Opening and closing quote marks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotePattern {
    /// Opening mark
    pub start: String,
    /// Closing mark
    pub end: String,
}

impl QuotePattern {
    /// Create a quote pattern.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Straight double quotes.
    pub fn straight() -> Self {
        Self::new("\"", "\"")
    }

    fn regex(&self) -> Regex {
        let start = regex::escape(&self.start);
        let end = regex::escape(&self.end);
        // Content may not contain either mark, so spans never nest.
        let marks = regex::escape(&format!("{}{}", self.start, self.end));
        let pattern = if marks.is_empty() {
            format!("{}(.+?){}", start, end)
        } else {
            format!("{}([^{}]+){}", start, marks, end)
        };
        Regex::new(&pattern).expect("escaped quote marks form a valid pattern")
    }
}

impl Default for QuotePattern {
    fn default() -> Self {
        Self::new("\u{201C}", "\u{201D}")
    }
}

/// Tags quoted text and definitions, and wraps amending lines in a `Mod`.
#[derive(Debug, Clone)]
pub struct Quotations {
    pattern: QuotePattern,
    regex: Regex,
}

impl Quotations {
    /// Create the enricher for the given quote marks.
    pub fn new(pattern: QuotePattern) -> Self {
        let regex = pattern.regex();
        Self { pattern, regex }
    }

    /// Tag quoted spans in the last text run of `inlines`.
    fn tag_last_run(&self, mut inlines: Vec<Inline>) -> Vec<Inline> {
        let Some(index) = inlines.iter().rposition(Inline::is_text) else {
            return inlines;
        };
        let Inline::Text(run) = inlines.remove(index) else {
            return inlines;
        };

        let matches: Vec<_> = self
            .regex
            .captures_iter(&run.text)
            .filter_map(|caps| Some((caps.get(0)?, caps.get(1)?)))
            .collect();
        if matches.is_empty() {
            inlines.insert(index, Inline::Text(run));
            return inlines;
        }

        let mut outside: String = inlines
            .iter()
            .filter(|i| !i.is_tagged())
            .map(Inline::plain_text)
            .collect();
        let mut last = 0;
        for (whole, _) in &matches {
            outside.push_str(&run.text[last..whole.start()]);
            last = whole.end();
        }
        outside.push_str(&run.text[last..]);
        let amending = AMENDING_VERB.is_match(&outside);

        let mut spans: Vec<Inline> = Vec::with_capacity(matches.len() * 2 + 1);
        let mut last = 0;
        for (whole, inner) in matches {
            if whole.start() > last {
                spans.push(Inline::Text(run.with_text(&run.text[last..whole.start()])));
            }
            let quoted: TextRun = run.with_text(inner.as_str());
            spans.push(if amending {
                Inline::QuotedText {
                    run: quoted,
                    start_quote: self.pattern.start.clone(),
                    end_quote: self.pattern.end.clone(),
                }
            } else {
                Inline::Definition {
                    run: quoted,
                    start_quote: self.pattern.start.clone(),
                    end_quote: self.pattern.end.clone(),
                }
            });
            last = whole.end();
        }
        if last < run.text.len() {
            spans.push(Inline::Text(run.with_text(&run.text[last..])));
        }
        let tail = inlines.split_off(index);
        inlines.extend(spans);
        inlines.extend(tail);
        inlines
    }
}

impl Default for Quotations {
    fn default() -> Self {
        Self::new(QuotePattern::default())
    }
}

impl Enricher for Quotations {
    fn name(&self) -> &str {
        "quotations"
    }

    fn enrich_inlines(&self, inlines: Vec<Inline>) -> Result<Vec<Inline>> {
        let inlines = walk_inlines(self, inlines)?;
        Ok(self.tag_last_run(inlines))
    }

    fn enrich_line(&self, line: Line) -> Result<Block> {
        let contents = self.enrich_inlines(line.contents)?;
        let amends = amends(&contents);
        Ok(wrap_amendment(Block::Line(Line { contents, ..line }), amends))
    }

    fn enrich_numbered_line(&self, numbered: NumberedLine) -> Result<Block> {
        let contents = self.enrich_inlines(numbered.line.contents)?;
        let amends = amends(&contents);
        let line = Line {
            contents,
            ..numbered.line
        };
        Ok(wrap_amendment(Block::NumberedLine(NumberedLine { line, ..numbered }), amends))
    }
}

fn amends(contents: &[Inline]) -> bool {
    contents.iter().any(|i| matches!(i, Inline::QuotedText { .. }))
}

/// Wrap a line carrying quoted amendment text in a `Mod`.
fn wrap_amendment(block: Block, amends: bool) -> Block {
    if amends {
        Block::Mod(Mod {
            contents: vec![block],
        })
    } else {
        block
    }
}
