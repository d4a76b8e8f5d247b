//! Enrichment passes over the parsed tree.
//!
//! Each enricher rewrites the tree and returns a new one. The traversal is
//! shared: an enricher overrides the hook for the level it cares about
//! (usually [`Enricher::enrich_inlines`]) and the default methods carry it
//! through divisions, tables, quotations, amendments and footnotes.
//!
//! Enrichers only reclassify spans of existing text runs. Spans already
//! tagged by an earlier pass are never re-tagged, so the order in which a
//! family lists its enrichers matters.
//!
//! # Example
//!
//! ```
//! use judgment_parser::enrich::{Citations, Enricher};
//! use judgment_parser::model::{Block, Inline};
//!
//! let block = Block::line("Neutral Citation Number: [2021] EWCA Civ 12");
//! let enriched = Citations.enrich_block(block).unwrap();
//! let line = enriched.as_line().unwrap();
//! assert!(matches!(line.contents[1], Inline::NeutralCitation(_)));
//! ```

mod case_numbers;
mod citations;
mod courts;
mod dates;
mod footnotes;
mod judges;
mod jurisdictions;
mod lawyers;
mod merger;
mod metadata;
mod parties;
mod quotations;

pub use case_numbers::CaseNumbers;
pub use citations::Citations;
pub use courts::{court_by_code, court_from_citation, CourtTypes};
pub use dates::Dates;
pub use footnotes::FootnoteParens;
pub use judges::Judges;
pub use jurisdictions::Jurisdictions;
pub use lawyers::Lawyers;
pub use merger::{normalize_text, Merger};
pub use metadata::extract_metadata;
pub use parties::Parties;
pub use quotations::{QuotePattern, Quotations};

use regex::Regex;

use crate::error::Result;
use crate::model::{
    Block, Branch, Division, Inline, Leaf, Line, Mod, NumberedLine, QuotedStructure, Table,
    TableOfContents, TextRun,
};

/// A tree-rewriting pass.
///
/// All methods have default implementations that rebuild their input
/// unchanged apart from what nested hooks rewrite.
pub trait Enricher: Send + Sync {
    /// Name of the enricher, for logging.
    fn name(&self) -> &str;

    /// Rewrite a sequence of inline content.
    fn enrich_inlines(&self, inlines: Vec<Inline>) -> Result<Vec<Inline>> {
        walk_inlines(self, inlines)
    }

    /// Rewrite a line. May return a different block kind (e.g. a `Mod`).
    fn enrich_line(&self, line: Line) -> Result<Block> {
        Ok(Block::Line(walk_line(self, line)?))
    }

    /// Rewrite a numbered line. The number itself is never touched.
    fn enrich_numbered_line(&self, numbered: NumberedLine) -> Result<Block> {
        Ok(Block::NumberedLine(NumberedLine {
            line: walk_line(self, numbered.line)?,
            ..numbered
        }))
    }

    /// Rewrite a heading line.
    fn enrich_heading(&self, heading: Line) -> Result<Line> {
        walk_line(self, heading)
    }

    /// Rewrite a block.
    fn enrich_block(&self, block: Block) -> Result<Block> {
        walk_block(self, block)
    }

    /// Rewrite a sequence of blocks.
    fn enrich_blocks(&self, blocks: Vec<Block>) -> Result<Vec<Block>> {
        blocks.into_iter().map(|b| self.enrich_block(b)).collect()
    }

    /// Rewrite a division.
    fn enrich_division(&self, division: Division) -> Result<Division> {
        walk_division(self, division)
    }

    /// Rewrite a sequence of divisions.
    fn enrich_divisions(&self, divisions: Vec<Division>) -> Result<Vec<Division>> {
        divisions
            .into_iter()
            .map(|d| self.enrich_division(d))
            .collect()
    }
}

/// Default traversal of inline content: recurse into footnotes and links.
pub fn walk_inlines<E: Enricher + ?Sized>(enricher: &E, inlines: Vec<Inline>) -> Result<Vec<Inline>> {
    inlines
        .into_iter()
        .map(|inline| match inline {
            Inline::FootnoteRef {
                marker,
                style,
                content,
            } => Ok(Inline::FootnoteRef {
                marker,
                style,
                content: enricher.enrich_blocks(content)?,
            }),
            Inline::Hyperlink { href, contents } => Ok(Inline::Hyperlink {
                href,
                contents: enricher.enrich_inlines(contents)?,
            }),
            other => Ok(other),
        })
        .collect()
}

/// Default traversal of a line: rewrite its inline content.
pub fn walk_line<E: Enricher + ?Sized>(enricher: &E, line: Line) -> Result<Line> {
    let contents = enricher.enrich_inlines(line.contents)?;
    Ok(Line { contents, ..line })
}

/// Default traversal of a block.
pub fn walk_block<E: Enricher + ?Sized>(enricher: &E, block: Block) -> Result<Block> {
    match block {
        Block::Line(line) => enricher.enrich_line(line),
        Block::NumberedLine(numbered) => enricher.enrich_numbered_line(numbered),
        Block::Table(table) => Ok(Block::Table(walk_table(enricher, table)?)),
        Block::TableOfContents(toc) => Ok(Block::TableOfContents(TableOfContents {
            lines: toc
                .lines
                .into_iter()
                .map(|line| walk_line(enricher, line))
                .collect::<Result<_>>()?,
        })),
        Block::Quote(quote) => Ok(Block::Quote(QuotedStructure {
            contents: enricher.enrich_divisions(quote.contents)?,
        })),
        Block::Mod(m) => Ok(Block::Mod(Mod {
            contents: enricher.enrich_blocks(m.contents)?,
        })),
    }
}

/// Default traversal of a table: rewrite each cell's blocks.
pub fn walk_table<E: Enricher + ?Sized>(enricher: &E, mut table: Table) -> Result<Table> {
    for row in &mut table.rows {
        for cell in &mut row.cells {
            let contents = std::mem::take(&mut cell.contents);
            cell.contents = enricher.enrich_blocks(contents)?;
        }
    }
    Ok(table)
}

/// Default traversal of a division.
pub fn walk_division<E: Enricher + ?Sized>(enricher: &E, division: Division) -> Result<Division> {
    match division {
        Division::Leaf(leaf) => Ok(Division::Leaf(Leaf {
            heading: leaf.heading.map(|h| enricher.enrich_heading(h)).transpose()?,
            contents: enricher.enrich_blocks(leaf.contents)?,
            ..leaf
        })),
        Division::Branch(branch) => Ok(Division::Branch(Branch {
            heading: branch.heading.map(|h| enricher.enrich_heading(h)).transpose()?,
            intro: enricher.enrich_blocks(branch.intro)?,
            children: enricher.enrich_divisions(branch.children)?,
            wrap_up: enricher.enrich_blocks(branch.wrap_up)?,
            ..branch
        })),
    }
}

/// Run a stack of enrichers over blocks, in order.
pub fn enrich_blocks(enrichers: &[Box<dyn Enricher>], blocks: Vec<Block>) -> Result<Vec<Block>> {
    enrichers.iter().try_fold(blocks, |blocks, enricher| {
        log::trace!("Running {} over {} blocks", enricher.name(), blocks.len());
        enricher.enrich_blocks(blocks)
    })
}

/// Run a stack of enrichers over divisions, in order.
pub fn enrich_divisions(
    enrichers: &[Box<dyn Enricher>],
    divisions: Vec<Division>,
) -> Result<Vec<Division>> {
    enrichers
        .iter()
        .try_fold(divisions, |divisions, enricher| enricher.enrich_divisions(divisions))
}

/// Split untagged text runs around matches of `pattern`, wrapping each match.
///
/// `wrap` receives the matched slice (as a run with the original style) and
/// returns the tagged inline, or `None` to leave the match as plain text.
/// Tagged inlines are passed through untouched.
pub(crate) fn tag_matches<F>(inlines: Vec<Inline>, pattern: &Regex, mut wrap: F) -> Result<Vec<Inline>>
where
    F: FnMut(&TextRun) -> Result<Option<Inline>>,
{
    let mut result = Vec::with_capacity(inlines.len());
    for inline in inlines {
        let run = match inline {
            Inline::Text(run) => run,
            other => {
                result.push(other);
                continue;
            }
        };
        let mut last = 0;
        for m in pattern.find_iter(&run.text) {
            if m.start() == m.end() {
                continue;
            }
            let matched = run.with_text(m.as_str());
            if let Some(tagged) = wrap(&matched)? {
                if m.start() > last {
                    result.push(Inline::Text(run.with_text(&run.text[last..m.start()])));
                }
                result.push(tagged);
                last = m.end();
            }
        }
        if last == 0 {
            result.push(Inline::Text(run));
        } else if last < run.text.len() {
            result.push(Inline::Text(run.with_text(&run.text[last..])));
        }
    }
    Ok(result)
}

/// Wrap the non-blank core of a run, keeping surrounding whitespace as text.
pub(crate) fn tag_trimmed(run: &TextRun, wrap: impl FnOnce(TextRun) -> Inline) -> Vec<Inline> {
    let trimmed_start = run.text.trim_start();
    let lead = run.text.len() - trimmed_start.len();
    let core = trimmed_start.trim_end();
    if core.is_empty() {
        return vec![Inline::Text(run.clone())];
    }
    let tail = &trimmed_start[core.len()..];
    let mut result = Vec::with_capacity(3);
    if lead > 0 {
        result.push(Inline::Text(run.with_text(&run.text[..lead])));
    }
    result.push(wrap(run.with_text(core)));
    if !tail.is_empty() {
        result.push(Inline::Text(run.with_text(tail)));
    }
    result
}
