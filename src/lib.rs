//! # judgment-parser
//!
//! Structural parser for court judgments and tribunal decisions.
//!
//! The input is the flat block sequence extracted from a word-processing
//! document ([`SourceDocument`]). The parser reconstructs the document's
//! implicit hierarchy (header, decisions, big levels, cross-headings,
//! numbered paragraphs, subparagraphs, quoted structures, annexes), tags
//! citations, parties, judges and dates, and renders the result as
//! Akoma Ntoso XML.
//!
//! ## Quick Start
//!
//! ```
//! use judgment_parser::{convert, ConvertOptions};
//! use judgment_parser::model::{Block, SourceDocument};
//!
//! let source = SourceDocument::from_blocks(vec![
//!     Block::line("Neutral Citation Number: [2021] EWCA Civ 12"),
//!     Block::line("Approved Judgment"),
//!     Block::line("1.\tThis appeal concerns a lease."),
//!     Block::line("2.\tIt is dismissed."),
//! ]);
//!
//! let result = convert(source, &ConvertOptions::default())?;
//! assert!(result.content.contains("<paragraph eId=\"para_2\">"));
//! # Ok::<(), judgment_parser::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Document families**: Court of Appeal / High Court, Supreme Court, tribunals
//! - **Speculative parsing**: numbering and indentation ambiguity resolved by backtracking
//! - **Enrichment**: neutral citations, case numbers, courts, dates, parties, judges, lawyers
//! - **Akoma Ntoso output**: stable ids, repaired table merges, content hash
//! - **Parallel processing**: batches are converted with Rayon

pub mod convert;
pub mod enrich;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{
    convert, convert_batch, convert_file, ConvertOptions, ConvertResult, ConverterRegistry,
    DocumentConverter, OutputFormat,
};
pub use error::{Error, Result};
pub use model::{Block, Division, DivisionKind, Judgment, Line, Metadata, SourceBlock, SourceDocument};
pub use parser::{DocumentFamily, FamilyRegistry, JudgmentParser, ParseOptions};
pub use render::{to_akn, to_akn_with_stats, JsonFormat, ParseStats, RenderOptions};

/// Parse a source document with the England and Wales family.
pub fn parse(source: SourceDocument) -> Result<Judgment> {
    JudgmentParser::default().parse(source)
}

/// Parse a source document and render it as Akoma Ntoso XML.
///
/// # Example
///
/// ```
/// use judgment_parser::model::{Block, SourceDocument};
///
/// let source = SourceDocument::from_blocks(vec![
///     Block::line("JUDGMENT"),
///     Block::line("1.\tText."),
/// ]);
/// let xml = judgment_parser::to_xml(source)?;
/// assert!(xml.starts_with("<?xml"));
/// # Ok::<(), judgment_parser::Error>(())
/// ```
pub fn to_xml(source: SourceDocument) -> Result<String> {
    let judgment = parse(source)?;
    render::to_akn(&judgment, &RenderOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_document() {
        let judgment = parse(SourceDocument::default()).unwrap();
        assert!(judgment.header.is_empty());
        assert!(judgment.annexes.is_empty());
    }

    #[test]
    fn test_to_xml_has_judgment_body() {
        let source = SourceDocument::from_blocks(vec![Block::line("JUDGMENT"), Block::line("1.\tText.")]);
        let xml = to_xml(source).unwrap();
        assert!(xml.contains("<judgmentBody>"));
        assert!(xml.contains("<header>"));
    }
}
