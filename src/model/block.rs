//! Block-level types.

use serde::{Deserialize, Serialize};

use super::{Division, Inline, Table, TextRun, TextStyle};

/// A block of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A formatted line (a word-processing paragraph)
    Line(Line),

    /// A line with an extracted leading number
    NumberedLine(NumberedLine),

    /// A table
    Table(Table),

    /// A table of contents
    TableOfContents(TableOfContents),

    /// Text quoted verbatim from another instrument
    Quote(QuotedStructure),

    /// A marker around content that amends another instrument
    Mod(Mod),
}

impl Block {
    /// Create a plain line block.
    pub fn line(text: impl Into<String>) -> Self {
        Block::Line(Line::with_text(text))
    }

    /// Get the line of a `Line` or `NumberedLine` block.
    pub fn as_line(&self) -> Option<&Line> {
        match self {
            Block::Line(line) => Some(line),
            Block::NumberedLine(numbered) => Some(&numbered.line),
            _ => None,
        }
    }

    /// Get the extracted number, if any.
    pub fn number(&self) -> Option<&TextRun> {
        match self {
            Block::NumberedLine(numbered) => Some(&numbered.number),
            _ => None,
        }
    }

    /// Short name of the block kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Line(_) => "line",
            Block::NumberedLine(_) => "numbered line",
            Block::Table(_) => "table",
            Block::TableOfContents(_) => "table of contents",
            Block::Quote(_) => "quoted structure",
            Block::Mod(_) => "mod",
        }
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Line(line) => line.plain_text(),
            Block::NumberedLine(numbered) => numbered.plain_text(),
            Block::Table(table) => table.plain_text(),
            Block::TableOfContents(toc) => toc
                .lines
                .iter()
                .map(Line::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Quote(quote) => quote.plain_text(),
            Block::Mod(m) => m
                .contents
                .iter()
                .map(Block::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Check if this block is a table or table of contents.
    pub fn is_tabular(&self) -> bool {
        matches!(self, Block::Table(_) | Block::TableOfContents(_))
    }
}

impl From<Line> for Block {
    fn from(line: Line) -> Self {
        Block::Line(line)
    }
}

/// A formatted line of text.
///
/// Indents are absolute, in inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Paragraph style id
    #[serde(default)]
    pub style: Option<String>,

    /// Text alignment
    #[serde(default)]
    pub alignment: Alignment,

    /// Left indent in inches
    #[serde(default)]
    pub left_indent: f32,

    /// Right indent in inches
    #[serde(default)]
    pub right_indent: f32,

    /// First-line indent in inches (negative for a hanging indent)
    #[serde(default)]
    pub first_line_indent: f32,

    /// Custom tab stops, in inches from the left margin
    #[serde(default)]
    pub tab_stops: Vec<f32>,

    /// Inline content
    pub contents: Vec<Inline>,
}

impl Line {
    /// Create a new empty line.
    pub fn new() -> Self {
        Self {
            style: None,
            alignment: Alignment::Left,
            left_indent: 0.0,
            right_indent: 0.0,
            first_line_indent: 0.0,
            tab_stops: Vec::new(),
            contents: Vec::new(),
        }
    }

    /// Create a line with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut line = Self::new();
        line.add_text(text);
        line
    }

    /// Create a line from inline content.
    pub fn with_contents(contents: Vec<Inline>) -> Self {
        Self {
            contents,
            ..Self::new()
        }
    }

    /// Set the left and first-line indents and return self.
    pub fn indented(mut self, left: f32, first_line: f32) -> Self {
        self.left_indent = left;
        self.first_line_indent = first_line;
        self
    }

    /// Set the paragraph style and return self.
    pub fn styled(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Set the alignment and return self.
    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Add plain text to the line.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.contents.push(Inline::Text(TextRun::new(text)));
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.contents.push(Inline::Text(run));
    }

    /// Add a tab.
    pub fn add_tab(&mut self) {
        self.contents.push(Inline::Tab);
    }

    /// Get plain text content of the line.
    pub fn plain_text(&self) -> String {
        self.contents.iter().map(Inline::plain_text).collect()
    }

    /// Trimmed text, with tabs and line breaks as spaces.
    pub fn normalized_text(&self) -> String {
        self.plain_text()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check if the line has no visible text.
    pub fn is_empty(&self) -> bool {
        self.plain_text().trim().is_empty()
    }

    /// Start of the first line, i.e. left indent plus first-line indent.
    pub fn first_line_start(&self) -> f32 {
        self.left_indent + self.first_line_indent
    }

    /// Check if the line uses a hanging indent.
    pub fn is_hanging(&self) -> bool {
        self.first_line_indent < 0.0
    }

    /// Iterate over the styles of the line's non-blank text runs.
    fn text_styles(&self) -> impl Iterator<Item = &TextStyle> {
        self.contents
            .iter()
            .filter_map(Inline::run)
            .filter(|run| !run.text.trim().is_empty())
            .map(|run| &run.style)
    }

    /// Check if every visible run is bold.
    pub fn is_all_bold(&self) -> bool {
        self.text_styles().count() > 0 && self.text_styles().all(|s| s.bold)
    }

    /// Check if every visible run is italic.
    pub fn is_all_italic(&self) -> bool {
        self.text_styles().count() > 0 && self.text_styles().all(|s| s.italic)
    }

    /// Check if every visible run is underlined.
    pub fn is_all_underlined(&self) -> bool {
        self.text_styles().count() > 0 && self.text_styles().all(|s| s.underline)
    }

    /// Check if the letters of the line are all uppercase.
    pub fn is_uppercase(&self) -> bool {
        let text = self.plain_text();
        let mut letters = text.chars().filter(|c| c.is_alphabetic()).peekable();
        letters.peek().is_some() && letters.all(|c| c.is_uppercase())
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

/// A line whose leading number has been extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberedLine {
    /// The line, without its number
    #[serde(flatten)]
    pub line: Line,

    /// The extracted number (e.g., "1.", "(a)")
    pub number: TextRun,

    /// Whether this is the first line of a numbered paragraph
    #[serde(default = "default_true")]
    pub first_of_paragraph: bool,
}

fn default_true() -> bool {
    true
}

impl NumberedLine {
    /// Create a numbered line.
    pub fn new(number: TextRun, line: Line) -> Self {
        Self {
            line,
            number,
            first_of_paragraph: true,
        }
    }

    /// Number text followed by a tab and the remaining text.
    pub fn plain_text(&self) -> String {
        format!("{}\t{}", self.number.text, self.line.plain_text())
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}

impl Alignment {
    /// CSS value for this alignment.
    pub fn as_css(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "justify",
        }
    }
}

/// A table of contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableOfContents {
    /// The entries, one line each
    pub lines: Vec<Line>,
}

/// Text quoted verbatim from another instrument.
///
/// The children are complete division trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotedStructure {
    /// The quoted divisions
    pub contents: Vec<Division>,
}

impl QuotedStructure {
    /// Get plain text content of the quotation.
    pub fn plain_text(&self) -> String {
        self.contents
            .iter()
            .map(Division::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Content that amends another instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mod {
    /// The wrapped blocks
    pub contents: Vec<Block>,
}
