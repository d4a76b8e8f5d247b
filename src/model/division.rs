//! Structural tree nodes.

use serde::{Deserialize, Serialize};

use super::{Block, Line, TextRun};

/// The kind of a division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivisionKind {
    /// A top-level division in a consistent numbering format ("A.", "B.", ...)
    BigLevel,
    /// An unnumbered heading introducing a group of paragraphs
    CrossHeading,
    /// An unheaded group of paragraphs
    GroupOfParagraphs,
    /// A numbered paragraph
    NumberedParagraph,
    /// A subparagraph
    Subparagraph,
    /// An unnumbered filler division
    Dummy,
    /// A table of contents
    TableOfContents,
}

impl DivisionKind {
    /// Check if divisions of this kind are paragraph-shaped.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, DivisionKind::NumberedParagraph | DivisionKind::Dummy)
    }
}

/// A node in the structural tree.
///
/// Only leaves hold blocks directly; a branch's children are divisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Division {
    /// A division with block content
    Leaf(Leaf),
    /// A division with child divisions
    Branch(Branch),
}

impl Division {
    /// Get the kind of this division.
    pub fn kind(&self) -> DivisionKind {
        match self {
            Division::Leaf(leaf) => leaf.kind,
            Division::Branch(branch) => branch.kind,
        }
    }

    /// Replace the kind of this division.
    pub fn set_kind(&mut self, kind: DivisionKind) {
        match self {
            Division::Leaf(leaf) => leaf.kind = kind,
            Division::Branch(branch) => branch.kind = kind,
        }
    }

    /// Get the number of this division.
    pub fn number(&self) -> Option<&TextRun> {
        match self {
            Division::Leaf(leaf) => leaf.number.as_ref(),
            Division::Branch(branch) => branch.number.as_ref(),
        }
    }

    /// Get the heading of this division.
    pub fn heading(&self) -> Option<&Line> {
        match self {
            Division::Leaf(leaf) => leaf.heading.as_ref(),
            Division::Branch(branch) => branch.heading.as_ref(),
        }
    }

    /// Get the child divisions (empty for leaves).
    pub fn children(&self) -> &[Division] {
        match self {
            Division::Leaf(_) => &[],
            Division::Branch(branch) => &branch.children,
        }
    }

    /// Check if this division carries a real label, i.e. a number with
    /// letters or digits in it (bullets and dashes do not count).
    pub fn has_real_number(&self) -> bool {
        self.number()
            .map(|n| n.text.chars().any(char::is_alphanumeric))
            .unwrap_or(false)
    }

    /// Get plain text content of the division.
    pub fn plain_text(&self) -> String {
        let mut parts = Vec::new();
        if let Some(number) = self.number() {
            parts.push(number.text.clone());
        }
        if let Some(heading) = self.heading() {
            parts.push(heading.plain_text());
        }
        match self {
            Division::Leaf(leaf) => parts.extend(leaf.contents.iter().map(Block::plain_text)),
            Division::Branch(branch) => {
                parts.extend(branch.intro.iter().map(Block::plain_text));
                parts.extend(branch.children.iter().map(Division::plain_text));
                parts.extend(branch.wrap_up.iter().map(Block::plain_text));
            }
        }
        parts.join("\n")
    }
}

/// A division with block content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    /// Kind of division
    pub kind: DivisionKind,
    /// Number, if any
    pub number: Option<TextRun>,
    /// Heading, if any
    pub heading: Option<Line>,
    /// Block content
    pub contents: Vec<Block>,
}

impl Leaf {
    /// Create a leaf of the given kind.
    pub fn new(kind: DivisionKind, number: Option<TextRun>, contents: Vec<Block>) -> Self {
        Self {
            kind,
            number,
            heading: None,
            contents,
        }
    }
}

/// A division with child divisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    /// Kind of division
    pub kind: DivisionKind,
    /// Number, if any
    pub number: Option<TextRun>,
    /// Heading, if any
    pub heading: Option<Line>,
    /// Blocks preceding the children
    pub intro: Vec<Block>,
    /// Child divisions
    pub children: Vec<Division>,
    /// Blocks following the children
    pub wrap_up: Vec<Block>,
}

impl Branch {
    /// Create a branch of the given kind.
    pub fn new(kind: DivisionKind, number: Option<TextRun>, children: Vec<Division>) -> Self {
        Self {
            kind,
            number,
            heading: None,
            intro: Vec::new(),
            children,
            wrap_up: Vec::new(),
        }
    }

    /// Set the heading and return self.
    pub fn with_heading(mut self, heading: Line) -> Self {
        self.heading = Some(heading);
        self
    }
}
