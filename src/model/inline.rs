//! Inline-level types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Block;

/// Inline content within a line.
///
/// The domain-tagged variants (`NeutralCitation` through `Definition`) are
/// produced by enrichment. Each wraps the exact `TextRun` it was carved
/// from, so the text of a line never changes when spans are tagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    /// A run of text with consistent formatting
    Text(TextRun),

    /// A tab character
    Tab,

    /// A manual line break
    LineBreak,

    /// A footnote reference with the footnote body
    FootnoteRef {
        /// The marker shown in the text (e.g., "1")
        marker: String,
        /// Style of the marker
        #[serde(default)]
        style: TextStyle,
        /// Footnote content
        content: Vec<Block>,
    },

    /// An inline image
    Image {
        /// Image name, matching an entry in the document's image list
        src: String,
        /// Inline style (width/height) if known
        style: Option<String>,
    },

    /// A hyperlink
    Hyperlink {
        /// Link target
        href: String,
        /// Link contents
        contents: Vec<Inline>,
    },

    /// A math fragment, kept as serialized MathML
    Math {
        /// MathML markup
        mathml: String,
    },

    /// A bookmark anchor (ignored on output)
    Bookmark {
        /// Bookmark name
        name: String,
    },

    /// A neutral citation, e.g. "[2021] EWCA Civ 12"
    NeutralCitation(TextRun),

    /// A case or claim number
    CaseNumber(TextRun),

    /// A court name
    CourtType {
        /// The tagged text
        run: TextRun,
        /// Court code (e.g., "EWCA-Civil")
        court: String,
    },

    /// A party name
    Party {
        /// The tagged text
        run: TextRun,
        /// The party's role, if it could be determined
        role: Option<PartyRole>,
    },

    /// A judge's name
    Judge(TextRun),

    /// A lawyer's name
    Lawyer(TextRun),

    /// A docket date (hearing date, judgment date)
    DocketDate {
        /// The tagged text
        run: TextRun,
        /// The parsed date
        date: NaiveDate,
        /// What the date denotes (e.g., "decision", "hearing")
        name: String,
    },

    /// A jurisdiction (tribunal chamber)
    Jurisdiction(TextRun),

    /// Text quoted verbatim as an amendment (insertion/substitution)
    QuotedText {
        /// The quoted text, without quote marks
        run: TextRun,
        /// Opening quote mark
        start_quote: String,
        /// Closing quote mark
        end_quote: String,
    },

    /// A quoted defined term
    Definition {
        /// The defined term, without quote marks
        run: TextRun,
        /// Opening quote mark
        start_quote: String,
        /// Closing quote mark
        end_quote: String,
    },
}

impl Inline {
    /// Create a plain text inline.
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text(TextRun::new(text))
    }

    /// Get the text contributed by this inline.
    pub fn plain_text(&self) -> String {
        match self {
            Inline::Text(run)
            | Inline::NeutralCitation(run)
            | Inline::CaseNumber(run)
            | Inline::Judge(run)
            | Inline::Lawyer(run)
            | Inline::Jurisdiction(run) => run.text.clone(),
            Inline::CourtType { run, .. }
            | Inline::Party { run, .. }
            | Inline::DocketDate { run, .. } => run.text.clone(),
            Inline::QuotedText {
                run,
                start_quote,
                end_quote,
            }
            | Inline::Definition {
                run,
                start_quote,
                end_quote,
            } => format!("{}{}{}", start_quote, run.text, end_quote),
            Inline::Tab => "\t".to_string(),
            Inline::LineBreak => "\n".to_string(),
            Inline::FootnoteRef { marker, .. } => marker.clone(),
            Inline::Hyperlink { contents, .. } => contents.iter().map(Inline::plain_text).collect(),
            Inline::Image { .. } | Inline::Math { .. } | Inline::Bookmark { .. } => String::new(),
        }
    }

    /// The text run of a plain or tagged span, if this is one.
    pub fn run(&self) -> Option<&TextRun> {
        match self {
            Inline::Text(run)
            | Inline::NeutralCitation(run)
            | Inline::CaseNumber(run)
            | Inline::Judge(run)
            | Inline::Lawyer(run)
            | Inline::Jurisdiction(run) => Some(run),
            Inline::CourtType { run, .. }
            | Inline::Party { run, .. }
            | Inline::DocketDate { run, .. }
            | Inline::QuotedText { run, .. }
            | Inline::Definition { run, .. } => Some(run),
            _ => None,
        }
    }

    /// Check if this is an untagged text run.
    pub fn is_text(&self) -> bool {
        matches!(self, Inline::Text(_))
    }

    /// Check if this is a tab.
    pub fn is_tab(&self) -> bool {
        matches!(self, Inline::Tab)
    }

    /// Check if this inline was tagged by an enricher.
    pub fn is_tagged(&self) -> bool {
        matches!(
            self,
            Inline::NeutralCitation(_)
                | Inline::CaseNumber(_)
                | Inline::CourtType { .. }
                | Inline::Party { .. }
                | Inline::Judge(_)
                | Inline::Lawyer(_)
                | Inline::DocketDate { .. }
                | Inline::Jurisdiction(_)
                | Inline::QuotedText { .. }
                | Inline::Definition { .. }
        )
    }
}

/// A run of text with consistent formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    #[serde(default)]
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a text run with the given style.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                bold: true,
                ..Default::default()
            },
        )
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                italic: true,
                ..Default::default()
            },
        )
    }

    /// Copy of this run's formatting with different text.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self::styled(text, self.style.clone())
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Text styling properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Character style id
    pub style_id: Option<String>,

    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Underlined text
    pub underline: bool,

    /// Strikethrough text
    pub strikethrough: bool,

    /// All caps
    pub caps: bool,

    /// Superscript
    pub superscript: bool,

    /// Subscript
    pub subscript: bool,

    /// Font name
    pub font_name: Option<String>,

    /// Font size in points
    pub font_size: Option<f32>,

    /// Text color (hex format, e.g., "#FF0000")
    pub color: Option<String>,

    /// Background/highlight color
    pub background_color: Option<String>,

    /// Hidden text
    pub hidden: bool,
}

impl TextStyle {
    /// Check if any emphasis is applied.
    pub fn has_styling(&self) -> bool {
        self.bold
            || self.italic
            || self.underline
            || self.strikethrough
            || self.superscript
            || self.subscript
    }

    /// CSS declarations for this style, in a stable order.
    pub fn to_css(&self) -> String {
        let mut decls = Vec::new();
        if self.bold {
            decls.push("font-weight:bold".to_string());
        }
        if self.italic {
            decls.push("font-style:italic".to_string());
        }
        match (self.underline, self.strikethrough) {
            (true, true) => decls.push("text-decoration-line:underline line-through".to_string()),
            (true, false) => decls.push("text-decoration-line:underline".to_string()),
            (false, true) => decls.push("text-decoration-line:line-through".to_string()),
            (false, false) => {}
        }
        if self.caps {
            decls.push("text-transform:uppercase".to_string());
        }
        if let Some(ref font) = self.font_name {
            decls.push(format!("font-family:'{}'", font));
        }
        if let Some(size) = self.font_size {
            decls.push(format!("font-size:{}pt", size));
        }
        if let Some(ref color) = self.color {
            decls.push(format!("color:{}", color));
        }
        if let Some(ref bg) = self.background_color {
            decls.push(format!("background-color:{}", bg));
        }
        decls.join(";")
    }
}

/// The role of a party to the proceedings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartyRole {
    /// Appellant
    Appellant,
    /// Respondent
    Respondent,
    /// Claimant
    Claimant,
    /// Defendant
    Defendant,
    /// Applicant
    Applicant,
    /// Petitioner
    Petitioner,
    /// Intervener
    Intervener,
    /// Interested party
    InterestedParty,
}

impl PartyRole {
    /// Parse a role from its display word, singular or plural.
    pub fn from_word(word: &str) -> Option<Self> {
        let lower = word.trim().trim_end_matches(['.', ',', ':']).to_lowercase();
        let lower = lower
            .strip_suffix("(s)")
            .or_else(|| lower.strip_suffix('s'))
            .unwrap_or(&lower)
            .trim();
        match lower {
            "appellant" => Some(Self::Appellant),
            "respondent" => Some(Self::Respondent),
            "claimant" => Some(Self::Claimant),
            "defendant" => Some(Self::Defendant),
            "applicant" => Some(Self::Applicant),
            "petitioner" => Some(Self::Petitioner),
            "intervener" => Some(Self::Intervener),
            "interested party" | "interested partie" => Some(Self::InterestedParty),
            _ => None,
        }
    }

    /// Identifier used in references.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Appellant => "appellant",
            Self::Respondent => "respondent",
            Self::Claimant => "claimant",
            Self::Defendant => "defendant",
            Self::Applicant => "applicant",
            Self::Petitioner => "petitioner",
            Self::Intervener => "intervener",
            Self::InterestedParty => "interested-party",
        }
    }

    /// Whether this role opposes the first-named side in a title.
    pub fn is_responding(&self) -> bool {
        matches!(self, Self::Respondent | Self::Defendant)
    }
}

impl std::fmt::Display for PartyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_of_tagged_spans() {
        let quoted = Inline::QuotedText {
            run: TextRun::new("the tenant"),
            start_quote: "\u{201C}".into(),
            end_quote: "\u{201D}".into(),
        };
        assert_eq!(quoted.plain_text(), "\u{201C}the tenant\u{201D}");
        assert!(quoted.is_tagged());
        assert!(!Inline::text("x").is_tagged());
    }

    #[test]
    fn test_party_role_from_word() {
        assert_eq!(PartyRole::from_word("Appellant"), Some(PartyRole::Appellant));
        assert_eq!(PartyRole::from_word("Respondents"), Some(PartyRole::Respondent));
        assert_eq!(PartyRole::from_word("Claimant(s)"), Some(PartyRole::Claimant));
        assert_eq!(PartyRole::from_word("Interested Party"), Some(PartyRole::InterestedParty));
        assert_eq!(PartyRole::from_word("Judge"), None);
    }

    #[test]
    fn test_style_css() {
        let style = TextStyle {
            bold: true,
            underline: true,
            ..Default::default()
        };
        assert_eq!(style.to_css(), "font-weight:bold;text-decoration-line:underline");
        assert!(TextStyle::default().to_css().is_empty());
    }
}
