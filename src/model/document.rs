//! Document-level types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Attachment, Block, Division, Image, Line, PartyRole};

/// A pre-parsed document, as delivered by block extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceDocument {
    /// Document name (usually the source file name)
    pub name: Option<String>,

    /// Blocks of the word-processing header part, if any
    pub header: Vec<SourceBlock>,

    /// Blocks of the main body, in order
    pub body: Vec<SourceBlock>,

    /// Images referenced from the body
    pub images: Vec<Image>,

    /// Attached documents
    pub attachments: Vec<Attachment>,
}

impl SourceDocument {
    /// Create a source document from body blocks.
    pub fn from_blocks(blocks: impl IntoIterator<Item = Block>) -> Self {
        Self {
            body: blocks.into_iter().map(SourceBlock::new).collect(),
            ..Default::default()
        }
    }

    /// Set the document name and return self.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A block with its page/section boundary flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceBlock {
    /// The block
    #[serde(flatten)]
    pub block: Block,

    /// Whether a page or section break precedes this block
    #[serde(default)]
    pub line_break_before: bool,
}

impl SourceBlock {
    /// Wrap a block without a preceding break.
    pub fn new(block: Block) -> Self {
        Self {
            block,
            line_break_before: false,
        }
    }

    /// Wrap a block preceded by a page break.
    pub fn after_break(block: Block) -> Self {
        Self {
            block,
            line_break_before: true,
        }
    }
}

/// A parsed judgment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Judgment {
    /// Cover-page blocks
    pub cover_page: Vec<Block>,

    /// Header blocks
    pub header: Vec<Block>,

    /// Decisions (opinions) making up the body
    pub body: Vec<Decision>,

    /// Conclusions blocks
    pub conclusions: Vec<Block>,

    /// Annexes
    pub annexes: Vec<Annex>,

    /// Attached documents
    pub attachments: Vec<Attachment>,

    /// Images referenced from the content
    pub images: Vec<Image>,

    /// Metadata extracted from the header
    pub metadata: Metadata,
}

impl Judgment {
    /// Get the number of decisions.
    pub fn decision_count(&self) -> usize {
        self.body.len()
    }

    /// Get plain text content of the body.
    pub fn plain_text(&self) -> String {
        self.body
            .iter()
            .flat_map(|d| d.contents.iter())
            .map(Division::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// One self-contained opinion or ruling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// The author line (e.g., "LORD JUSTICE SMITH:")
    pub author: Option<Line>,

    /// The divisions of the decision
    pub contents: Vec<Division>,
}

/// An annex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annex {
    /// The annex marker line (e.g., "ANNEX 1")
    pub number: Line,

    /// The annex content
    pub contents: Vec<Block>,
}

/// A court, identified by code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Court {
    /// Code (e.g., "EWCA-Civil")
    pub code: String,

    /// Display name
    pub name: String,

    /// Base URL for links
    pub url: Option<String>,
}

/// A party named in the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyName {
    /// Name as written
    pub name: String,

    /// Role, if known
    pub role: Option<PartyRole>,
}

/// Metadata summary extracted from the header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document name
    pub name: Option<String>,

    /// Case title (e.g., "Smith v Jones")
    pub title: Option<String>,

    /// Court
    pub court: Option<Court>,

    /// Judgment date
    pub date: Option<NaiveDate>,

    /// Name of the judgment date (e.g., "decision")
    pub date_name: Option<String>,

    /// Neutral citation
    pub citation: Option<String>,

    /// Case numbers
    pub case_numbers: Vec<String>,

    /// Parties
    pub parties: Vec<PartyName>,

    /// Judges
    pub judges: Vec<String>,

    /// Lawyers
    pub lawyers: Vec<String>,

    /// Jurisdictions
    pub jurisdictions: Vec<String>,
}

impl Metadata {
    /// Year of the neutral citation, if any.
    pub fn citation_year(&self) -> Option<u32> {
        let cite = self.citation.as_deref()?;
        let start = cite.find('[')? + 1;
        let end = cite[start..].find(']')? + start;
        cite[start..end].parse().ok()
    }

    /// Ordinal number of the neutral citation, if any.
    pub fn citation_number(&self) -> Option<u32> {
        let cite = self.citation.as_deref()?;
        cite.split_whitespace().last()?.parse().ok()
    }
}
