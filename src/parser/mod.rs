//! Judgment parsing module.
//!
//! Parsing runs in stages over a [`SourceDocument`]: run merging, hard-number
//! extraction, header detection, structural parsing, enrichment and finally
//! metadata extraction.

mod family;
mod header;
mod indent;
mod numbers;
mod options;
mod structure;

pub use family::{DocumentFamily, EnglandWales, FamilyRegistry, SupremeCourt, Tribunal};
pub use header::{split_header, HeaderSplit, HeaderStrategy};
pub use indent::{effective_indent, line_indent, next_tab_stop, number_width, numbered_indent};
pub use numbers::{extract_all, extract_hard_number, roman_value, NumberFormat};
pub use options::{ParseOptions, DEFAULT_TOLERANCE};
pub use structure::{ParsedBody, StructureParser};

use std::sync::Arc;

use crate::enrich::{self, extract_metadata, Enricher, Merger};
use crate::error::Result;
use crate::model::{Annex, Block, Decision, Judgment, SourceDocument};

/// Parser for judgments of one document family.
///
/// # Example
///
/// ```
/// use judgment_parser::model::{Block, SourceDocument};
/// use judgment_parser::parser::JudgmentParser;
///
/// let parser = JudgmentParser::for_family("ew")?;
/// let source = SourceDocument::from_blocks(vec![
///     Block::line("JUDGMENT"),
///     Block::line("1.\tThe appeal is allowed."),
/// ]);
/// let judgment = parser.parse(source)?;
/// assert_eq!(judgment.decision_count(), 1);
/// # Ok::<(), judgment_parser::Error>(())
/// ```
#[derive(Clone)]
pub struct JudgmentParser {
    family: Arc<dyn DocumentFamily>,
    options: ParseOptions,
}

impl JudgmentParser {
    /// Create a parser for a family with default options.
    pub fn new(family: Arc<dyn DocumentFamily>) -> Self {
        Self {
            family,
            options: ParseOptions::default(),
        }
    }

    /// Create a parser for a built-in family, looked up by name.
    pub fn for_family(name: &str) -> Result<Self> {
        FamilyRegistry::with_defaults().get(name).map(Self::new)
    }

    /// Set the parse options.
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the document family.
    pub fn family(&self) -> &dyn DocumentFamily {
        self.family.as_ref()
    }

    /// Get the parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse a source document into a judgment.
    pub fn parse(&self, source: SourceDocument) -> Result<Judgment> {
        let SourceDocument {
            name,
            header: header_part,
            body,
            images,
            attachments,
        } = source;
        let family = self.family.as_ref();
        let merger = Merger::new()
            .with_merge(self.options.merge_runs)
            .with_normalization(self.options.normalize_unicode);

        let (blocks, breaks): (Vec<Block>, Vec<bool>) = body
            .into_iter()
            .map(|b| (b.block, b.line_break_before))
            .unzip();
        let blocks = numbers::extract_all(merger.enrich_blocks(blocks)?);

        let split = header::split_header(&blocks, &breaks, family, self.options.header_search_limit);
        let mut cover_page = blocks;
        let body_blocks = cover_page.split_off(split.header_end);
        let header_blocks = cover_page.split_off(split.cover_end);

        let parsed = StructureParser::new(&body_blocks, family, &self.options).parse()?;
        log::debug!(
            "Parsed {} decision(s), {} annex(es) from {} body blocks",
            parsed.decisions.len(),
            parsed.annexes.len(),
            body_blocks.len()
        );

        let mut header = merger.enrich_blocks(header_part.into_iter().map(|b| b.block).collect())?;
        header.extend(header_blocks);

        let header_enrichers = family.header_enrichers();
        let cover_page = enrich::enrich_blocks(&header_enrichers, cover_page)?;
        let header = enrich::enrich_blocks(&header_enrichers, header)?;

        let body_enrichers = family.body_enrichers(&self.options);
        let body = parsed
            .decisions
            .into_iter()
            .map(|decision| {
                Ok(Decision {
                    author: decision.author,
                    contents: enrich::enrich_divisions(&body_enrichers, decision.contents)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let conclusions = enrich::enrich_blocks(&body_enrichers, parsed.conclusions)?;
        let annexes = parsed
            .annexes
            .into_iter()
            .map(|annex| {
                Ok(Annex {
                    number: annex.number,
                    contents: enrich::enrich_blocks(&body_enrichers, annex.contents)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let metadata = extract_metadata(name.as_deref(), &cover_page, &header);

        Ok(Judgment {
            cover_page,
            header,
            body,
            conclusions,
            annexes,
            attachments,
            images,
            metadata,
        })
    }
}

impl Default for JudgmentParser {
    fn default() -> Self {
        Self::new(Arc::new(EnglandWales))
    }
}
