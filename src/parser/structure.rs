//! Structural parser.
//!
//! Turns the flat body block sequence into decisions made of divisions. The
//! parser walks a single cursor forward; speculative strategies save the
//! cursor and restore it when they fail, so rollback never copies blocks.

use super::family::DocumentFamily;
use super::indent;
use super::numbers::NumberFormat;
use super::options::ParseOptions;
use crate::error::{Error, Result};
use crate::model::{
    Annex, Block, Branch, Decision, Division, DivisionKind, Leaf, Line, QuotedStructure, TextRun,
};

/// A condition that ends the divisions of an enclosing level.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Stop {
    /// A big-level heading in this format
    BigLevel(NumberFormat),
    /// A cross-heading
    CrossHeading,
}

/// Where the current run of divisions must end.
#[derive(Debug, Clone, Default)]
struct Scope {
    /// Big-level formats claimed by ancestors
    excluded: Vec<NumberFormat>,
    stops: Vec<Stop>,
    /// Inside a quoted structure: the indent at or below which it closes
    quote: Option<f32>,
}

impl Scope {
    fn quoted(boundary: f32) -> Self {
        Self {
            quote: Some(boundary),
            ..Self::default()
        }
    }

    fn with_stop(&self, stop: Stop) -> Self {
        let mut scope = self.clone();
        scope.stops.push(stop);
        scope
    }

    fn excluding(&self, format: NumberFormat) -> Self {
        let mut scope = self.clone();
        scope.excluded.push(format);
        scope
    }
}

/// The parsed body of a judgment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedBody {
    /// Decisions in order
    pub decisions: Vec<Decision>,
    /// Conclusions blocks
    pub conclusions: Vec<Block>,
    /// Annexes in order
    pub annexes: Vec<Annex>,
}

/// Cursor-based parser over the body blocks.
pub struct StructureParser<'a> {
    blocks: &'a [Block],
    i: usize,
    family: &'a dyn DocumentFamily,
    tolerance: f32,
}

impl<'a> StructureParser<'a> {
    /// Create a parser over pre-parsed body blocks.
    pub fn new(blocks: &'a [Block], family: &'a dyn DocumentFamily, options: &ParseOptions) -> Self {
        Self {
            blocks,
            i: 0,
            family,
            tolerance: options.tolerance,
        }
    }

    /// Parse the whole body.
    ///
    /// Fails if any block is left over, since that means the body has a
    /// shape no rule accounts for.
    pub fn parse(mut self) -> Result<ParsedBody> {
        let decisions = self.decisions();
        let conclusions = self.conclusions();
        let annexes = self.annexes();

        match self.peek() {
            None => Ok(ParsedBody {
                decisions,
                conclusions,
                annexes,
            }),
            Some(block @ (Block::Quote(_) | Block::Mod(_))) => Err(Error::UnexpectedBlock {
                position: self.i,
                kind: block.kind(),
            }),
            Some(block) => Err(Error::UnconsumedBlocks {
                position: self.i,
                total: self.blocks.len(),
                text: block.plain_text(),
            }),
        }
    }

    fn peek(&self) -> Option<&'a Block> {
        self.blocks.get(self.i)
    }

    /// Run `f`, restoring the cursor if it yields nothing.
    fn speculate<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let save = self.i;
        let result = f(self);
        if result.is_none() {
            self.i = save;
        }
        result
    }

    fn is_judge_name(&self, block: &Block) -> bool {
        matches!(block, Block::Line(line) if self.family.is_titled_judge_name(line))
    }

    fn is_conclusions_marker(&self, block: &Block) -> bool {
        matches!(block, Block::Line(line) if self.family.is_conclusions_marker(line))
    }

    fn is_annex_marker(&self, block: &Block) -> bool {
        matches!(block, Block::Line(line) if self.family.is_annex_marker(line))
    }

    /// Blocks that end a decision wherever they appear.
    fn is_decision_boundary(&self, block: &Block) -> bool {
        self.is_judge_name(block) || self.is_conclusions_marker(block) || self.is_annex_marker(block)
    }

    fn is_cross_heading(&self, block: &Block) -> bool {
        match block {
            Block::Line(line) => {
                !self.is_decision_boundary(block) && self.family.is_cross_heading(line, self.tolerance)
            }
            _ => false,
        }
    }

    /// Value of a big-level heading in `format`, if the block is one.
    fn big_level_value(&self, block: &Block, format: NumberFormat) -> Option<u32> {
        let Block::NumberedLine(numbered) = block else {
            return None;
        };
        if !indent::is_flush_left(&numbered.line, self.tolerance) || !self.family.is_heading_like(&numbered.line) {
            return None;
        }
        format.value(&numbered.number.text)
    }

    fn at_stop(&self, scope: &Scope) -> bool {
        let Some(block) = self.peek() else {
            return true;
        };
        match scope.quote {
            Some(boundary) => match indent::effective_indent(block) {
                Some(eff) if eff > boundary + self.tolerance => {}
                _ => return true,
            },
            None => {
                if self.is_decision_boundary(block) {
                    return true;
                }
            }
        }
        scope.stops.iter().any(|stop| match stop {
            Stop::BigLevel(format) => self.big_level_value(block, *format).is_some(),
            Stop::CrossHeading => self.is_cross_heading(block),
        })
    }

    fn decisions(&mut self) -> Vec<Decision> {
        let mut decisions = Vec::new();
        while let Some(block) = self.peek() {
            let start = self.i;
            if let Block::Line(line) = block {
                if self.family.is_titled_judge_name(line) {
                    self.i += 1;
                    let contents = self.divisions(&Scope::default());
                    decisions.push(Decision {
                        author: Some(line.clone()),
                        contents,
                    });
                    continue;
                }
            }
            if self.is_conclusions_marker(block) || self.is_annex_marker(block) {
                break;
            }
            let contents = self.divisions(&Scope::default());
            if self.i == start {
                break;
            }
            decisions.push(Decision {
                author: None,
                contents,
            });
        }
        decisions
    }

    fn conclusions(&mut self) -> Vec<Block> {
        let mut conclusions = Vec::new();
        if !self.peek().map(|b| self.is_conclusions_marker(b)).unwrap_or(false) {
            return conclusions;
        }
        while let Some(block) = self.peek() {
            if self.is_annex_marker(block) {
                break;
            }
            conclusions.push(block.clone());
            self.i += 1;
        }
        conclusions
    }

    fn annexes(&mut self) -> Vec<Annex> {
        let mut annexes = Vec::new();
        while let Some(Block::Line(marker)) = self.peek() {
            if !self.family.is_annex_marker(marker) {
                break;
            }
            self.i += 1;
            let mut contents = Vec::new();
            while let Some(block) = self.peek() {
                if self.is_annex_marker(block) || self.is_judge_name(block) {
                    break;
                }
                contents.push(block.clone());
                self.i += 1;
            }
            annexes.push(Annex {
                number: marker.clone(),
                contents,
            });
        }
        annexes
    }

    /// Parse divisions until the scope ends, trying big levels, then
    /// cross-headings, then plain paragraphs.
    fn divisions(&mut self, scope: &Scope) -> Vec<Division> {
        let mut result = Vec::new();
        while !self.at_stop(scope) {
            let start = self.i;
            if let Some(levels) = self.speculate(|p| p.big_levels(scope)) {
                result.extend(levels);
            } else if let Some(groups) = self.speculate(|p| p.cross_headings(scope)) {
                log::debug!("Accepted cross-headings at block {}", start);
                result.extend(groups);
            } else {
                result.extend(self.paragraphs(scope));
            }
            if self.i == start {
                break;
            }
        }
        result
    }

    fn paragraphs(&mut self, scope: &Scope) -> Vec<Division> {
        let mut result = Vec::new();
        while !self.at_stop(scope) {
            match self.paragraph(scope, false) {
                Some(paragraph) => result.push(paragraph),
                None => break,
            }
        }
        result
    }

    fn big_levels(&mut self, scope: &Scope) -> Option<Vec<Division>> {
        for format in NumberFormat::BIG_LEVELS {
            if scope.excluded.contains(&format) {
                continue;
            }
            let start = self.i;
            if let Some(levels) = self.speculate(|p| p.big_level_run(scope, format)) {
                log::debug!("Accepted big levels {:?} at block {}", format, start);
                return Some(levels);
            }
        }
        None
    }

    /// A run of big levels numbered 1, 2, 3, ... in one format, preceded
    /// by optional intro paragraphs. Needs at least two levels.
    fn big_level_run(&mut self, scope: &Scope, format: NumberFormat) -> Option<Vec<Division>> {
        let level_scope = scope.with_stop(Stop::BigLevel(format));
        let mut result = Vec::new();
        while !self.at_stop(&level_scope) {
            result.push(self.paragraph(&level_scope, false)?);
        }

        let child_scope = level_scope.excluding(format);
        let mut levels = 0;
        while let Some(block @ Block::NumberedLine(numbered)) = self.peek() {
            if self.big_level_value(block, format) != Some(levels + 1) {
                break;
            }
            self.i += 1;
            let children = self.divisions(&child_scope);
            result.push(headed(
                DivisionKind::BigLevel,
                Some(numbered.number.clone()),
                numbered.line.clone(),
                children,
            ));
            levels += 1;
        }
        (levels >= 2).then_some(result)
    }

    /// Cross-headings, each followed by its paragraphs, preceded by optional
    /// intro paragraphs gathered in an unheaded group. The intro counts as a
    /// group; needs two groups.
    fn cross_headings(&mut self, scope: &Scope) -> Option<Vec<Division>> {
        let heading_scope = scope.with_stop(Stop::CrossHeading);
        let mut intro = Vec::new();
        while !self.at_stop(&heading_scope) {
            intro.push(self.paragraph(&heading_scope, false)?);
        }
        let mut groups = usize::from(!intro.is_empty());
        let mut result = Vec::new();
        if !intro.is_empty() {
            result.push(Division::Branch(Branch::new(DivisionKind::GroupOfParagraphs, None, intro)));
        }

        while let Some(block @ Block::Line(heading)) = self.peek() {
            if !self.is_cross_heading(block) {
                break;
            }
            self.i += 1;
            let children = self.paragraphs(&heading_scope);
            result.push(headed(DivisionKind::CrossHeading, None, heading.clone(), children));
            groups += 1;
        }
        (groups >= 2).then_some(result)
    }

    /// Parse one paragraph and the deeper content it owns.
    ///
    /// Returns `None` without moving the cursor when the next block cannot
    /// start a paragraph.
    fn paragraph(&mut self, scope: &Scope, sub: bool) -> Option<Division> {
        let block = self.peek()?;
        let (number, first, parent_indent) = match block {
            Block::Table(_) => {
                self.i += 1;
                return Some(Division::Leaf(Leaf::new(DivisionKind::Dummy, None, vec![block.clone()])));
            }
            Block::TableOfContents(_) => {
                self.i += 1;
                return Some(Division::Leaf(Leaf::new(
                    DivisionKind::TableOfContents,
                    None,
                    vec![block.clone()],
                )));
            }
            Block::Quote(_) | Block::Mod(_) => return None,
            Block::Line(line) => (None, line, indent::line_indent(line)),
            Block::NumberedLine(numbered) if !numbered.first_of_paragraph => {
                (None, &numbered.line, indent::line_indent(&numbered.line))
            }
            Block::NumberedLine(numbered) => (
                Some(numbered.number.clone()),
                &numbered.line,
                indent::numbered_indent(numbered),
            ),
        };
        self.i += 1;

        let real_number = number
            .as_ref()
            .map(|n| n.text.chars().any(char::is_alphanumeric))
            .unwrap_or(false);
        let mut intro = vec![Block::Line(first.clone())];
        let mut children: Vec<Division> = Vec::new();
        let mut wrap_up = Vec::new();
        // Set when a quote closed immediately before the cursor
        let mut after_quote = false;
        // Set when a continuation line between quote fragments was absorbed
        let mut resumed = false;

        while let Some(next) = self.peek() {
            if self.at_stop(scope) {
                break;
            }
            if let Block::NumberedLine(numbered) = next {
                // Later lines of a list item continue its paragraph
                if !numbered.first_of_paragraph && children.is_empty() {
                    intro.push(Block::Line(numbered.line.clone()));
                    self.i += 1;
                    after_quote = false;
                    resumed = false;
                    continue;
                }
            }
            if next.is_tabular() {
                if !children.is_empty() {
                    break;
                }
                intro.push(next.clone());
                self.i += 1;
                after_quote = false;
                resumed = false;
                continue;
            }
            let Some(eff) = indent::effective_indent(next) else {
                break;
            };

            if eff <= parent_indent + self.tolerance {
                if let Block::Line(line) = next {
                    if after_quote
                        && children.is_empty()
                        && self.continues_quotation(first, line, eff, parent_indent)
                    {
                        intro.push(next.clone());
                        self.i += 1;
                        after_quote = false;
                        resumed = true;
                        continue;
                    }
                    if !children.is_empty() && self.family.is_wrap_up(line) {
                        wrap_up.push(next.clone());
                        self.i += 1;
                    }
                }
                break;
            }

            if children.is_empty() && (looks_like_quote(next) || after_quote || resumed) {
                if let Some(quote) = self.speculate(|p| p.quoted_structure(parent_indent)) {
                    intro.push(Block::Quote(quote));
                    after_quote = true;
                    resumed = false;
                    continue;
                }
            }

            let save = self.i;
            match self.paragraph(scope, true) {
                Some(child) => {
                    if !real_number && child.has_real_number() {
                        log::debug!("Rolled back numbered subparagraph at block {}", save);
                        self.i = save;
                        break;
                    }
                    children.push(child);
                    after_quote = false;
                    resumed = false;
                }
                None => break,
            }
        }

        let kind = if sub {
            DivisionKind::Subparagraph
        } else if number.is_some() {
            DivisionKind::NumberedParagraph
        } else {
            DivisionKind::Dummy
        };
        if children.is_empty() {
            return Some(Division::Leaf(Leaf::new(kind, number, intro)));
        }
        if !sub && number.is_none() && intro.len() == 1 {
            return Some(headed(DivisionKind::CrossHeading, None, first.clone(), children));
        }
        Some(Division::Branch(Branch {
            kind,
            number,
            heading: None,
            intro,
            children,
            wrap_up,
        }))
    }

    /// Check if `line`, met right after a quote closed, continues the same
    /// quotation: it sits where the parent's prose sits, is not emphasized,
    /// and another quote fragment follows it.
    fn continues_quotation(&self, parent: &Line, line: &Line, eff: f32, parent_indent: f32) -> bool {
        let aligned = if parent.is_hanging() {
            eff > parent.first_line_start() + self.tolerance
        } else {
            (eff - parent_indent).abs() <= self.tolerance
        };
        let fragment_follows = self
            .blocks
            .get(self.i + 1)
            .and_then(indent::effective_indent)
            .map(|next| next > parent_indent + self.tolerance)
            .unwrap_or(false);
        aligned && fragment_follows && !is_emphasized(line)
    }

    /// Parse a quoted structure whose lines are deeper than `boundary`.
    fn quoted_structure(&mut self, boundary: f32) -> Option<QuotedStructure> {
        let contents = self.divisions(&Scope::quoted(boundary));
        (!contents.is_empty()).then_some(QuotedStructure { contents })
    }
}

/// A headed division: a branch when it has children, else an empty leaf.
fn headed(kind: DivisionKind, number: Option<TextRun>, heading: Line, children: Vec<Division>) -> Division {
    if children.is_empty() {
        let mut leaf = Leaf::new(kind, number, Vec::new());
        leaf.heading = Some(heading);
        Division::Leaf(leaf)
    } else {
        Division::Branch(Branch::new(kind, number, children).with_heading(heading))
    }
}

/// Check if a block opens a quotation, by style or by a leading quote mark.
fn looks_like_quote(block: &Block) -> bool {
    let Some(line) = block.as_line() else {
        return false;
    };
    let styled = line
        .style
        .as_deref()
        .map(|s| s.to_lowercase().contains("quote"))
        .unwrap_or(false);
    styled
        || matches!(
            line.plain_text().trim_start().chars().next(),
            Some('\u{201C}' | '\u{2018}' | '"')
        )
}

fn is_emphasized(line: &Line) -> bool {
    line.is_all_italic() || line.is_all_bold() || line.is_all_underlined()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Inline, NumberedLine, Table, TableCell, TableRow};
    use crate::parser::family::EnglandWales;

    fn numbered(number: &str, text: &str, left: f32, first: f32) -> Block {
        Block::NumberedLine(NumberedLine::new(
            TextRun::new(number),
            Line::with_text(text).indented(left, first),
        ))
    }

    fn indented(text: &str, left: f32) -> Block {
        Block::Line(Line::with_text(text).indented(left, 0.0))
    }

    fn parse(blocks: &[Block]) -> Result<ParsedBody> {
        StructureParser::new(blocks, &EnglandWales, &ParseOptions::default()).parse()
    }

    #[test]
    fn test_flat_paragraphs() {
        let blocks = vec![
            numbered("1.", "First point.", 0.0, 0.0),
            numbered("2.", "Second point.", 0.0, 0.0),
        ];
        let body = parse(&blocks).unwrap();
        assert_eq!(body.decisions.len(), 1);
        let contents = &body.decisions[0].contents;
        assert_eq!(contents.len(), 2);
        assert!(contents
            .iter()
            .all(|d| d.kind() == DivisionKind::NumberedParagraph));
        assert_eq!(contents[1].number().map(|n| n.text.as_str()), Some("2."));
    }

    #[test]
    fn test_subparagraphs() {
        let blocks = vec![
            numbered("1.", "The grounds are:", 0.0, 0.0),
            numbered("(a)", "first;", 0.5, 0.0),
            numbered("(b)", "second.", 0.5, 0.0),
            numbered("2.", "Next.", 0.0, 0.0),
        ];
        let body = parse(&blocks).unwrap();
        let contents = &body.decisions[0].contents;
        assert_eq!(contents.len(), 2);
        let children = contents[0].children();
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|c| c.kind() == DivisionKind::Subparagraph));
    }

    #[test]
    fn test_wrap_up() {
        let blocks = vec![
            numbered("1.", "The grounds are:", 0.0, 0.0),
            numbered("(a)", "first;", 0.5, 0.0),
            Block::line("and for those reasons the appeal fails."),
        ];
        let body = parse(&blocks).unwrap();
        let Division::Branch(branch) = &body.decisions[0].contents[0] else {
            panic!("expected branch");
        };
        assert_eq!(branch.wrap_up.len(), 1);
    }

    #[test]
    fn test_unnumbered_parent_does_not_absorb_numbered_child() {
        let blocks = vec![
            Block::line("Some introductory remarks."),
            numbered("(a)", "first;", 0.5, 0.0),
        ];
        let body = parse(&blocks).unwrap();
        let contents = &body.decisions[0].contents;
        assert_eq!(contents.len(), 2);
        assert!(contents[0].children().is_empty());
    }

    #[test]
    fn test_heading_reclassified() {
        let blocks = vec![Block::line("Background"), indented("Some indented text.", 0.5)];
        let body = parse(&blocks).unwrap();
        let division = &body.decisions[0].contents[0];
        assert_eq!(division.kind(), DivisionKind::CrossHeading);
        assert_eq!(division.heading().map(Line::plain_text).as_deref(), Some("Background"));
    }

    #[test]
    fn test_big_levels() {
        let blocks = vec![
            numbered("A.", "Introduction", 0.0, 0.0),
            numbered("1.", "Text.", 0.0, 0.0),
            numbered("B.", "The facts", 0.0, 0.0),
            numbered("2.", "More text.", 0.0, 0.0),
            numbered("3.", "Even more text.", 0.0, 0.0),
        ];
        let body = parse(&blocks).unwrap();
        let contents = &body.decisions[0].contents;
        assert_eq!(contents.len(), 2);
        assert!(contents.iter().all(|d| d.kind() == DivisionKind::BigLevel));
        assert_eq!(contents[0].children().len(), 1);
        assert_eq!(contents[1].children().len(), 2);
    }

    #[test]
    fn test_single_big_level_rejected() {
        let blocks = vec![
            numbered("A.", "Introduction", 0.0, 0.0),
            numbered("1.", "Text.", 0.0, 0.0),
        ];
        let body = parse(&blocks).unwrap();
        let contents = &body.decisions[0].contents;
        assert!(contents.iter().all(|d| d.kind() != DivisionKind::BigLevel));
        assert_eq!(contents.len(), 2);
    }

    #[test]
    fn test_cross_headings() {
        let blocks = vec![
            Block::line("Background"),
            numbered("1.", "Text.", 0.0, 0.0),
            Block::line("Discussion"),
            numbered("2.", "More text.", 0.0, 0.0),
            numbered("3.", "Even more.", 0.0, 0.0),
        ];
        let body = parse(&blocks).unwrap();
        let contents = &body.decisions[0].contents;
        assert_eq!(contents.len(), 2);
        assert!(contents.iter().all(|d| d.kind() == DivisionKind::CrossHeading));
        assert_eq!(contents[1].children().len(), 2);
    }

    #[test]
    fn test_intro_grouped_before_cross_headings() {
        let blocks = vec![
            numbered("1.", "Preliminary remarks.", 0.0, 0.0),
            numbered("2.", "More remarks.", 0.0, 0.0),
            Block::line("Background"),
            numbered("3.", "Text.", 0.0, 0.0),
        ];
        let body = parse(&blocks).unwrap();
        let contents = &body.decisions[0].contents;
        let kinds: Vec<_> = contents.iter().map(Division::kind).collect();
        assert_eq!(kinds, vec![DivisionKind::GroupOfParagraphs, DivisionKind::CrossHeading]);
        assert!(contents[0].heading().is_none());
        assert_eq!(contents[0].children().len(), 2);
    }

    #[test]
    fn test_list_item_continuation() {
        let mut continuation =
            NumberedLine::new(TextRun::new("1."), Line::with_text("second line of the item."));
        continuation.first_of_paragraph = false;
        let blocks = vec![
            numbered("1.", "First line of the item,", 0.0, 0.0),
            Block::NumberedLine(continuation),
            numbered("2.", "Next item.", 0.0, 0.0),
        ];
        let body = parse(&blocks).unwrap();
        let contents = &body.decisions[0].contents;
        assert_eq!(contents.len(), 2);
        let Division::Leaf(first) = &contents[0] else {
            panic!("expected a leaf, got {:?}", contents[0]);
        };
        assert_eq!(first.contents.len(), 2);
        assert_eq!(first.contents[1].kind(), "line");
        assert_eq!(contents[1].number().map(|n| n.text.as_str()), Some("2."));
    }

    #[test]
    fn test_quoted_structure() {
        let blocks = vec![
            numbered("1.", "The section provides:", 0.0, 0.0),
            indented("\u{201C}A person commits an offence", 1.0),
            indented("if he does a thing.\u{201D}", 1.0),
            Block::line("That is clear."),
        ];
        let body = parse(&blocks).unwrap();
        let contents = &body.decisions[0].contents;
        let Division::Leaf(leaf) = &contents[0] else {
            panic!("expected leaf, got {:?}", contents[0]);
        };
        let Block::Quote(quote) = &leaf.contents[1] else {
            panic!("expected quote");
        };
        assert_eq!(quote.contents.len(), 2);
        assert_eq!(contents.len(), 2);
    }

    fn quotation(continuation: Line) -> Vec<Block> {
        vec![
            numbered("1.", "Section 2 provides:", 0.5, -0.5),
            indented("\u{201C}(2) The landlord must keep the structure in repair.\u{201D}", 1.0),
            Block::Line(continuation.indented(0.5, 0.0)),
            indented("\u{201C}(3) The tenant must pay the rent.\u{201D}", 1.0),
        ]
    }

    #[test]
    fn test_continuation_between_quote_fragments() {
        let blocks = quotation(Line::with_text("and subsection (3) reads:"));
        let body = parse(&blocks).unwrap();
        let contents = &body.decisions[0].contents;
        assert_eq!(contents.len(), 1);
        let Division::Leaf(leaf) = &contents[0] else {
            panic!("expected leaf, got {:?}", contents[0]);
        };
        let kinds: Vec<&str> = leaf.contents.iter().map(Block::kind).collect();
        assert_eq!(kinds, vec!["line", "quoted structure", "line", "quoted structure"]);
        assert_eq!(leaf.contents[2].plain_text(), "and subsection (3) reads:");
    }

    #[test]
    fn test_emphasized_continuation_not_merged() {
        let italic = Line::with_contents(vec![Inline::Text(TextRun::italic("Subsection (3)"))]);
        let body = parse(&quotation(italic)).unwrap();
        assert_eq!(body.decisions[0].contents.len(), 2);
    }

    #[test]
    fn test_trailing_line_after_quote_not_merged() {
        let blocks = vec![
            numbered("1.", "Section 2 provides:", 0.5, -0.5),
            indented("\u{201C}(2) The landlord must keep the structure in repair.\u{201D}", 1.0),
            indented("That is the whole section.", 0.5),
        ];
        let body = parse(&blocks).unwrap();
        assert_eq!(body.decisions[0].contents.len(), 2);
    }

    #[test]
    fn test_table_folds_into_intro() {
        let mut table = Table::new();
        table.add_row(TableRow::new(vec![TableCell::text("x")]));
        let blocks = vec![numbered("1.", "See the table:", 0.0, 0.0), Block::Table(table)];
        let body = parse(&blocks).unwrap();
        let Division::Leaf(leaf) = &body.decisions[0].contents[0] else {
            panic!("expected leaf");
        };
        assert_eq!(leaf.contents.len(), 2);
    }

    #[test]
    fn test_decisions_and_annex() {
        let blocks = vec![
            Block::line("LORD JUSTICE GREEN:"),
            numbered("1.", "Text.", 0.0, 0.0),
            Block::line("LADY JUSTICE WHITE:"),
            Block::line("I agree."),
            Block::line("ANNEX 1"),
            Block::line("Chronology"),
        ];
        let body = parse(&blocks).unwrap();
        assert_eq!(body.decisions.len(), 2);
        assert!(body.decisions.iter().all(|d| d.author.is_some()));
        assert_eq!(body.annexes.len(), 1);
        assert_eq!(body.annexes[0].contents.len(), 1);
    }

    #[test]
    fn test_conclusions() {
        let blocks = vec![
            numbered("1.", "Text.", 0.0, 0.0),
            Block::line("Signed: J Smith"),
            Block::line("Dated 1 March 2021"),
        ];
        let body = parse(&blocks).unwrap();
        assert_eq!(body.conclusions.len(), 2);
        assert_eq!(body.decisions.len(), 1);
    }

    #[test]
    fn test_unexpected_block() {
        let blocks = vec![Block::Mod(crate::model::Mod {
            contents: vec![Block::line("x")],
        })];
        let err = parse(&blocks).unwrap_err();
        assert!(matches!(err, Error::UnexpectedBlock { position: 0, .. }));
    }

    #[test]
    fn test_unconsumed_after_annex() {
        let blocks = vec![
            Block::line("Annex"),
            Block::line("Chronology"),
            Block::line("LORD JUSTICE GREEN:"),
        ];
        let err = parse(&blocks).unwrap_err();
        assert!(matches!(err, Error::UnconsumedBlocks { position: 2, total: 3, .. }));
    }
}
