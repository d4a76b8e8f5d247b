//! Effective-indent computation.
//!
//! The effective indent of a line is where its prose actually starts on the
//! first line: the declared indents, moved right past the rendered number (if
//! any) and past each leading tab, resolved against the line's tab stops.

use crate::model::{Block, Inline, Line, NumberedLine, TextRun};

/// Spacing of default tab stops, in inches.
pub const DEFAULT_TAB_INTERVAL: f32 = 0.5;

/// Font size assumed when a run does not declare one, in points.
const DEFAULT_FONT_SIZE: f32 = 12.0;

const EPSILON: f32 = 0.001;

/// Position of the first tab stop strictly after `pos`.
///
/// Custom stops win over default ones; with a hanging indent the left
/// indent acts as an additional stop.
pub fn next_tab_stop(line: &Line, pos: f32) -> f32 {
    let implicit = (line.is_hanging() && line.left_indent > pos + EPSILON).then_some(line.left_indent);
    let custom = line
        .tab_stops
        .iter()
        .copied()
        .filter(|stop| *stop > pos + EPSILON)
        .chain(implicit)
        .fold(None, |min: Option<f32>, stop| {
            Some(min.map_or(stop, |m| m.min(stop)))
        });
    custom.unwrap_or_else(|| ((pos + EPSILON) / DEFAULT_TAB_INTERVAL).floor() * DEFAULT_TAB_INTERVAL + DEFAULT_TAB_INTERVAL)
}

/// Approximate rendered width of a number, in inches.
pub fn number_width(number: &TextRun) -> f32 {
    let size = number.style.font_size.unwrap_or(DEFAULT_FONT_SIZE);
    let em = size / 72.0;
    number
        .text
        .chars()
        .map(|c| match c {
            '.' | ',' | ':' | ';' | 'i' | 'l' | 'I' | '(' | ')' | '[' | ']' => 0.3 * em,
            'm' | 'w' | 'M' | 'W' => 0.8 * em,
            c if c.is_uppercase() => 0.65 * em,
            _ => 0.5 * em,
        })
        .sum()
}

/// Walk the leading tabs of `contents`, starting from `pos`.
fn skip_leading_tabs(line: &Line, contents: &[Inline], mut pos: f32) -> f32 {
    for inline in contents {
        match inline {
            Inline::Tab => pos = next_tab_stop(line, pos),
            Inline::Text(run) if run.text.is_empty() => continue,
            Inline::Bookmark { .. } => continue,
            _ => break,
        }
    }
    pos
}

/// Effective indent of an unnumbered line.
pub fn line_indent(line: &Line) -> f32 {
    skip_leading_tabs(line, &line.contents, line.first_line_start())
}

/// Effective indent of a numbered line: prose starts at the tab stop
/// following the rendered number.
pub fn numbered_indent(numbered: &NumberedLine) -> f32 {
    let line = &numbered.line;
    let after_number = line.first_line_start() + number_width(&numbered.number);
    let pos = next_tab_stop(line, after_number);
    skip_leading_tabs(line, &line.contents, pos)
}

/// Effective indent of a block, if it is line-shaped.
pub fn effective_indent(block: &Block) -> Option<f32> {
    match block {
        Block::Line(line) => Some(line_indent(line)),
        Block::NumberedLine(numbered) => Some(numbered_indent(numbered)),
        _ => None,
    }
}

/// Check if a line starts at the left margin.
pub fn is_flush_left(line: &Line, tolerance: f32) -> bool {
    line.first_line_start().abs() <= tolerance && line.left_indent <= tolerance
}
