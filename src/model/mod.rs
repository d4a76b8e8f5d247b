//! Document model types for judgment content.
//!
//! This module defines the intermediate representation shared by every
//! stage: the blocks produced by extraction, the structural division tree
//! built by the parser, and the finished `Judgment` handed to rendering.

mod block;
mod division;
mod document;
mod inline;
mod resource;
mod table;

pub use block::{Alignment, Block, Line, Mod, NumberedLine, QuotedStructure, TableOfContents};
pub use division::{Branch, Division, DivisionKind, Leaf};
pub use document::{
    Annex, Court, Decision, Judgment, Metadata, PartyName, SourceBlock, SourceDocument,
};
pub use inline::{Inline, PartyRole, TextRun, TextStyle};
pub use resource::{Attachment, Image};
pub use table::{Borders, Table, TableCell, TableRow, VerticalMerge};
