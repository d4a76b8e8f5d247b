//! Hard-number extraction.
//!
//! Paragraph numbers typed as literal text ("1.", "(a)", "iv)") are moved
//! out of the line into a [`NumberedLine`]. Bare uppercase letters are too
//! easily confused with ordinary words, so a second pass keeps them only
//! where they form a plausible sequence at one indentation.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{Block, Inline, Line, NumberedLine, TextRun};

/// Shapes tried in order after the plain-number check.
const SHAPES: &[&str] = &[
    r"\d+\.",
    r"\(\d+\)",
    r"[A-Z]\.",
    r"\([A-Z]\)",
    r"[a-z]\.",
    r"[a-z]\)",
    r"\([a-z]\)",
    r"\([ivx]+\)",
    r"[ivx]+\)",
    r"[ivx]+\.",
    r"\d+(?:\.\d+)+\.?",
    r"\d+[A-Z]+\.",
    r"\(\d+[A-Z]+\)",
];

/// Each shape must be followed by whitespace, end of text, or an em-dash.
/// The em-dash is captured so it can stay with the text.
static NUMBER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    SHAPES
        .iter()
        .map(|shape| Regex::new(&format!(r"^({})(?:[ \t\u{{A0}}]+|$|(\u{{2014}}))", shape)).unwrap())
        .collect()
});

static PLAIN_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^(["\u{201C}]?\d+["\u{201D}]?)(\t|$)"#).unwrap());

static UPPER_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\(?([A-Z])[.)]$").unwrap());

/// Runs shorter than this are joined with the next run before matching.
const SHORT_RUN: usize = 5;

/// Numbering formats that can mark a big level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberFormat {
    /// "A.", "B.", ...
    UpperAlphaDot,
    /// "(A)", "(B)", ...
    UpperAlphaParen,
    /// "(1)", "(2)", ...
    DecimalParen,
    /// "(a)", "(b)", ...
    LowerAlphaParen,
    /// "(i)", "(ii)", ...
    LowerRomanParen,
}

impl NumberFormat {
    /// Big-level formats in the order they are tried.
    pub const BIG_LEVELS: [NumberFormat; 5] = [
        NumberFormat::UpperAlphaDot,
        NumberFormat::UpperAlphaParen,
        NumberFormat::DecimalParen,
        NumberFormat::LowerAlphaParen,
        NumberFormat::LowerRomanParen,
    ];

    /// Ordinal value of `number` in this format (1-based), if it matches.
    pub fn value(&self, number: &str) -> Option<u32> {
        let number = number.trim();
        let inner = match self {
            NumberFormat::UpperAlphaDot => number.strip_suffix('.'),
            _ => number.strip_prefix('(').and_then(|n| n.strip_suffix(')')),
        }?;
        match self {
            NumberFormat::UpperAlphaDot | NumberFormat::UpperAlphaParen => letter_value(inner, 'A'),
            NumberFormat::LowerAlphaParen => letter_value(inner, 'a'),
            NumberFormat::DecimalParen => {
                if inner.chars().all(|c| c.is_ascii_digit()) {
                    inner.parse().ok()
                } else {
                    None
                }
            }
            NumberFormat::LowerRomanParen => roman_value(inner),
        }
    }

}

fn letter_value(text: &str, base: char) -> Option<u32> {
    let mut chars = text.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let offset = (c as u32).checked_sub(base as u32)?;
    (offset < 26).then_some(offset + 1)
}

/// Value of a lowercase roman numeral.
pub fn roman_value(text: &str) -> Option<u32> {
    if text.is_empty() {
        return None;
    }
    let digits: Option<Vec<u32>> = text
        .chars()
        .map(|c| match c {
            'i' => Some(1),
            'v' => Some(5),
            'x' => Some(10),
            'l' => Some(50),
            'c' => Some(100),
            _ => None,
        })
        .collect();
    let digits = digits?;
    let mut total: i64 = 0;
    for (i, d) in digits.iter().enumerate() {
        match digits.get(i + 1) {
            Some(next) if next > d => total -= *d as i64,
            _ => total += *d as i64,
        }
    }
    u32::try_from(total).ok().filter(|v| *v > 0)
}

/// A successful match against the start of a line.
struct Match {
    /// The number text
    number: String,
    /// Byte offset in the matched text where the remainder starts
    rest: usize,
}

fn match_number(text: &str) -> Option<Match> {
    NUMBER_PATTERNS.iter().find_map(|re| {
        let caps = re.captures(text)?;
        let number = caps.get(1)?;
        let rest = match caps.get(2) {
            Some(dash) => dash.start(),
            None => caps.get(0)?.end(),
        };
        Some(Match {
            number: number.as_str().to_string(),
            rest,
        })
    })
}

/// Try to extract a hard number from the start of a line.
pub fn extract_hard_number(line: &Line) -> Option<NumberedLine> {
    let first = line.contents.iter().position(|i| !matches!(i, Inline::Bookmark { .. }))?;
    let run = match &line.contents[first] {
        Inline::Text(run) => run,
        _ => return None,
    };

    let mut contents: Vec<Inline> = line.contents[..first].to_vec();
    let number;
    let mut next = first + 1;
    let mut skip_tab = true;

    let plain = PLAIN_NUMBER.captures(&run.text).and_then(|caps| {
        let whole = caps.get(0)?;
        let digits = caps.get(1)?;
        let tab_in_text = whole.end() > digits.end();
        let followed_by_tab = matches!(line.contents.get(next), Some(Inline::Tab));
        (tab_in_text || followed_by_tab).then(|| (digits.end(), whole.end(), tab_in_text))
    });

    if let Some((digits_end, rest_start, tab_in_text)) = plain {
        number = run.with_text(&run.text[..digits_end]);
        let rest = &run.text[rest_start..];
        if !rest.is_empty() {
            contents.push(Inline::Text(run.with_text(rest)));
        }
        skip_tab = !tab_in_text;
    } else if let Some(m) = match_number(&run.text) {
        number = run.with_text(m.number);
        let rest = &run.text[m.rest..];
        if !rest.is_empty() {
            contents.push(Inline::Text(run.with_text(rest)));
        }
    } else {
        let second = match line.contents.get(next) {
            Some(Inline::Text(second)) if run.text.chars().count() < SHORT_RUN => second,
            _ => return None,
        };
        let joined = format!("{}{}", run.text, second.text);
        let m = match_number(&joined)?;
        number = run.with_text(m.number);
        let split = run.text.len();
        if m.rest < split {
            contents.push(Inline::Text(run.with_text(&run.text[m.rest..])));
            contents.push(Inline::Text(second.clone()));
        } else if m.rest < joined.len() {
            contents.push(Inline::Text(second.with_text(&joined[m.rest..])));
        }
        next += 1;
    }

    let mut remainder = line.contents[next..].iter().cloned().peekable();
    if skip_tab && contents.len() == first && matches!(remainder.peek(), Some(Inline::Tab)) {
        remainder.next();
    }
    contents.extend(remainder);
    trim_leading_whitespace(&mut contents[first..]);
    contents.retain(|i| !matches!(i, Inline::Text(run) if run.text.is_empty()));

    Some(NumberedLine::new(
        number,
        Line {
            contents,
            ..line.clone()
        },
    ))
}

fn trim_leading_whitespace(contents: &mut [Inline]) {
    if let Some(Inline::Text(run)) = contents.first_mut() {
        let trimmed = run.text.trim_start();
        if trimmed.len() != run.text.len() {
            run.text = trimmed.to_string();
        }
    }
}

/// Value of an uppercase-letter number ("A." or "(A)").
fn upper_letter_value(number: &TextRun) -> Option<u32> {
    let caps = UPPER_LETTER.captures(&number.text)?;
    let text = number.text.as_str();
    let balanced = text.starts_with('(') == text.ends_with(')');
    if !balanced {
        return None;
    }
    letter_value(caps.get(1)?.as_str(), 'A')
}

/// Indentation bucket of a line, in tenths of an inch.
fn indent_bucket(line: &Line) -> i32 {
    (line.first_line_start() * 10.0).round() as i32
}

/// Extract hard numbers from every plain line.
///
/// Lines that already carry a number are left alone. Uppercase-letter
/// candidates are kept only when they start or continue a sequence at
/// their indentation; the rest revert to their original line.
pub fn extract_all(blocks: Vec<Block>) -> Vec<Block> {
    let mut originals: HashMap<usize, Line> = HashMap::new();
    let mut blocks: Vec<Block> = blocks
        .into_iter()
        .enumerate()
        .map(|(index, block)| match block {
            Block::Line(line) => match extract_hard_number(&line) {
                Some(numbered) => {
                    if upper_letter_value(&numbered.number).is_some() {
                        originals.insert(index, line);
                    }
                    Block::NumberedLine(numbered)
                }
                None => Block::Line(line),
            },
            other => other,
        })
        .collect();

    let mut candidates: Vec<usize> = originals.keys().copied().collect();
    candidates.sort_unstable();
    let mut sequences = LetterSequences::default();
    for index in candidates {
        let Block::NumberedLine(numbered) = &blocks[index] else {
            continue;
        };
        let Some(value) = upper_letter_value(&numbered.number) else {
            continue;
        };
        let bucket = indent_bucket(&numbered.line);
        for reverted in sequences.evaluate(bucket, index, value) {
            if let Some(line) = originals.remove(&reverted) {
                log::debug!("Reverting hard number at block {}", reverted);
                blocks[reverted] = Block::Line(line);
            }
        }
    }
    blocks
}

/// Last accepted uppercase-letter value per indentation bucket.
#[derive(Debug, Default)]
struct LetterSequences {
    last: HashMap<i32, (usize, u32)>,
}

impl LetterSequences {
    /// Evaluate a candidate and return the block indices to revert.
    fn evaluate(&mut self, bucket: i32, index: usize, value: u32) -> Vec<usize> {
        match self.last.get(&bucket).copied() {
            None => {
                if value == 1 {
                    self.last.insert(bucket, (index, 1));
                    Vec::new()
                } else {
                    vec![index]
                }
            }
            Some((_, prev)) if value == prev + 1 => {
                self.last.insert(bucket, (index, value));
                Vec::new()
            }
            // A lone "A." not followed by "B." was probably a word; drop it and
            // judge the current candidate as if nothing preceded it.
            Some((earlier, 1)) => {
                self.last.remove(&bucket);
                let mut reverted = vec![earlier];
                reverted.extend(self.evaluate(bucket, index, value));
                reverted
            }
            Some(_) => {
                if value == 1 {
                    self.last.insert(bucket, (index, 1));
                    Vec::new()
                } else {
                    vec![index]
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(text: &str) -> Option<(String, String)> {
        extract_hard_number(&Line::with_text(text)).map(|n| (n.number.text, n.line.plain_text()))
    }

    #[test]
    fn test_shapes() {
        assert_eq!(numbered("1. Text"), Some(("1.".into(), "Text".into())));
        assert_eq!(numbered("(12) Text"), Some(("(12)".into(), "Text".into())));
        assert_eq!(numbered("(b) text"), Some(("(b)".into(), "text".into())));
        assert_eq!(numbered("iv) text"), Some(("iv)".into(), "text".into())));
        assert_eq!(numbered("(iv) text"), Some(("(iv)".into(), "text".into())));
        assert_eq!(numbered("1.2.3 Text"), Some(("1.2.3".into(), "Text".into())));
        assert_eq!(numbered("12A. Text"), Some(("12A.".into(), "Text".into())));
        assert_eq!(numbered("(12A) Text"), Some(("(12A)".into(), "Text".into())));
        assert_eq!(numbered("3."), Some(("3.".into(), "".into())));
    }

    #[test]
    fn test_non_numbers() {
        assert_eq!(numbered("e.g. this"), None);
        assert_eq!(numbered("The appeal"), None);
        assert_eq!(numbered("1990 was a year"), None);
    }

    #[test]
    fn test_em_dash_stays_with_text() {
        assert_eq!(numbered("1.\u{2014}Text"), Some(("1.".into(), "\u{2014}Text".into())));
    }

    #[test]
    fn test_plain_number_with_tab() {
        let mut line = Line::new();
        line.add_text("12");
        line.add_tab();
        line.add_text("The facts");
        let result = extract_hard_number(&line).unwrap();
        assert_eq!(result.number.text, "12");
        assert_eq!(result.line.contents.len(), 1);
        assert_eq!(result.plain_text(), "12\tThe facts");

        assert_eq!(numbered("12\tThe facts"), Some(("12".into(), "The facts".into())));
        assert_eq!(numbered("12 apples"), None);
    }

    #[test]
    fn test_number_then_tab_inline() {
        let mut line = Line::new();
        line.add_text("1.");
        line.add_tab();
        line.add_text("Text");
        let result = extract_hard_number(&line).unwrap();
        assert_eq!(result.number.text, "1.");
        assert_eq!(result.line.contents, vec![Inline::text("Text")]);
    }

    #[test]
    fn test_number_split_across_runs() {
        let mut line = Line::new();
        line.add_run(TextRun::bold("4"));
        line.add_text(". The claim");
        let result = extract_hard_number(&line).unwrap();
        assert_eq!(result.number.text, "4.");
        assert!(result.number.style.bold);
        assert_eq!(result.line.plain_text(), "The claim");
    }

    #[test]
    fn test_numbered_line_left_alone() {
        let blocks = vec![Block::NumberedLine(NumberedLine::new(
            TextRun::new("1."),
            Line::with_text("2. Not a number here"),
        ))];
        let result = extract_all(blocks.clone());
        assert_eq!(result, blocks);
    }

    #[test]
    fn test_format_values() {
        assert_eq!(NumberFormat::UpperAlphaDot.value("C."), Some(3));
        assert_eq!(NumberFormat::UpperAlphaParen.value("(B)"), Some(2));
        assert_eq!(NumberFormat::DecimalParen.value("(10)"), Some(10));
        assert_eq!(NumberFormat::LowerAlphaParen.value("(i)"), Some(9));
        assert_eq!(NumberFormat::LowerRomanParen.value("(iv)"), Some(4));
        assert_eq!(NumberFormat::LowerRomanParen.value("(b)"), None);
        assert!(NumberFormat::UpperAlphaDot.value("1.").is_none());
    }

    #[test]
    fn test_roman() {
        assert_eq!(roman_value("ix"), Some(9));
        assert_eq!(roman_value("xiv"), Some(14));
        assert_eq!(roman_value(""), None);
    }

    #[test]
    fn test_letter_sequence_accepted() {
        let blocks = vec![
            Block::line("A. First"),
            Block::line("text"),
            Block::line("B. Second"),
            Block::line("C. Third"),
        ];
        let result = extract_all(blocks);
        assert!(matches!(result[0], Block::NumberedLine(_)));
        assert!(matches!(result[2], Block::NumberedLine(_)));
        assert!(matches!(result[3], Block::NumberedLine(_)));
    }

    #[test]
    fn test_stray_letter_reverted() {
        let blocks = vec![
            Block::line("A. First"),
            Block::line("B. Second"),
            Block::line("M. Dupont gave evidence"),
            Block::line("C. Third"),
        ];
        let result = extract_all(blocks);
        assert!(matches!(result[1], Block::NumberedLine(_)));
        assert_eq!(result[2], Block::line("M. Dupont gave evidence"));
        assert!(matches!(result[3], Block::NumberedLine(_)));
    }

    #[test]
    fn test_lone_first_letter_reverted_by_mismatch() {
        let blocks = vec![Block::line("A. Smith"), Block::line("J. Jones")];
        let result = extract_all(blocks);
        assert_eq!(result[0], Block::line("A. Smith"));
        assert_eq!(result[1], Block::line("J. Jones"));
    }

    #[test]
    fn test_sequences_are_per_indent() {
        let blocks = vec![
            Block::line("A. Outer"),
            Block::Line(Line::with_text("A. Inner").indented(1.0, 0.0)),
            Block::line("B. Outer"),
            Block::Line(Line::with_text("B. Inner").indented(1.0, 0.0)),
        ];
        let result = extract_all(blocks);
        assert!(result.iter().all(|b| matches!(b, Block::NumberedLine(_))));
    }
}
