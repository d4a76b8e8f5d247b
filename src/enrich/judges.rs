//! Judges named after the "Before" marker.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{tag_trimmed, walk_block, Enricher};
use crate::error::Result;
use crate::model::{Block, Inline, Line};

static BEFORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*b\s*e\s*f\s*o\s*r\s*e\b\s*:?\s*").unwrap());

static JUDICIAL_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:justice|lord|lady|judge|sir|dame|master|president|recorder|baroness|baron|deputy|registrar|chancellor|sheriff)\b",
    )
    .unwrap()
});

static END_OF_BENCH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(?:between|-\s*-\s*-|hearing|date|in the matter)").unwrap());

/// How many lines after "Before" may still name judges.
const WINDOW: usize = 8;

/// Tags judges' names listed after "Before:".
#[derive(Debug, Clone, Copy, Default)]
pub struct Judges;

fn tag_line(line: Line) -> Line {
    let contents = line
        .contents
        .into_iter()
        .flat_map(|inline| match inline {
            Inline::Text(run) if JUDICIAL_TITLE.is_match(&run.text) => tag_trimmed(&run, Inline::Judge),
            other => vec![other],
        })
        .collect();
    Line { contents, ..line }
}

/// Split a "Before: LORD JUSTICE X" line into the marker and the name.
fn tag_after_marker(line: Line) -> Line {
    let mut contents = Vec::with_capacity(line.contents.len() + 1);
    let mut marker_seen = false;
    for inline in line.contents {
        match inline {
            Inline::Text(run) if !marker_seen => {
                marker_seen = true;
                let end = BEFORE.find(&run.text).map(|m| m.end()).unwrap_or(0);
                contents.push(Inline::Text(run.with_text(&run.text[..end])));
                let rest = run.with_text(&run.text[end..]);
                if JUDICIAL_TITLE.is_match(&rest.text) {
                    contents.extend(tag_trimmed(&rest, Inline::Judge));
                } else if !rest.is_empty() {
                    contents.push(Inline::Text(rest));
                }
            }
            Inline::Text(run) if JUDICIAL_TITLE.is_match(&run.text) => {
                contents.extend(tag_trimmed(&run, Inline::Judge))
            }
            other => contents.push(other),
        }
    }
    contents.retain(|i| !matches!(i, Inline::Text(run) if run.text.is_empty()));
    Line { contents, ..line }
}

impl Enricher for Judges {
    fn name(&self) -> &str {
        "judges"
    }

    fn enrich_blocks(&self, blocks: Vec<Block>) -> Result<Vec<Block>> {
        let mut remaining = 0;
        let mut result = Vec::with_capacity(blocks.len());
        for block in blocks {
            match block {
                Block::Line(line) if BEFORE.is_match(&line.plain_text()) => {
                    remaining = WINDOW;
                    result.push(Block::Line(tag_after_marker(line)));
                }
                Block::Line(line) if remaining > 0 => {
                    if END_OF_BENCH.is_match(&line.plain_text()) {
                        remaining = 0;
                        result.push(Block::Line(line));
                    } else {
                        remaining -= 1;
                        result.push(Block::Line(tag_line(line)));
                    }
                }
                Block::Line(line) => result.push(Block::Line(line)),
                other => result.push(walk_block(self, other)?),
            }
        }
        Ok(result)
    }
}
