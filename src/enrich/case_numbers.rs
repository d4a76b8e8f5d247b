//! Case numbers.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{tag_trimmed, walk_inlines, Enricher};
use crate::error::Result;
use crate::model::{Inline, TextRun};

static CASE_NUMBER_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:case|claim|appeal|application)\s*(?:(?:nos?|numbers?|ref(?:erence)?)\b\.?\s*:?|:)\s*")
        .unwrap()
});

static SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*(?:[,;&]|\band\b)\s*").unwrap());

/// Tags case numbers following a "Case No:" style label.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseNumbers;

impl CaseNumbers {
    /// Tag each separated case number in `run`.
    fn tag_run(run: &TextRun, result: &mut Vec<Inline>) {
        let mut last = 0;
        for sep in SEPARATOR.find_iter(&run.text) {
            Self::tag_piece(run, &run.text[last..sep.start()], result);
            result.push(Inline::Text(run.with_text(sep.as_str())));
            last = sep.end();
        }
        Self::tag_piece(run, &run.text[last..], result);
    }

    fn tag_piece(run: &TextRun, piece: &str, result: &mut Vec<Inline>) {
        if piece.is_empty() {
            return;
        }
        if piece.chars().any(|c| c.is_ascii_digit()) {
            result.extend(tag_trimmed(&run.with_text(piece), Inline::CaseNumber));
        } else {
            result.push(Inline::Text(run.with_text(piece)));
        }
    }
}

impl Enricher for CaseNumbers {
    fn name(&self) -> &str {
        "case-numbers"
    }

    fn enrich_inlines(&self, inlines: Vec<Inline>) -> Result<Vec<Inline>> {
        let inlines = walk_inlines(self, inlines)?;
        let Some(first_text) = inlines.iter().position(|i| !i.is_tab()) else {
            return Ok(inlines);
        };
        let label = match &inlines[first_text] {
            Inline::Text(run) => CASE_NUMBER_LABEL.find(&run.text).map(|m| m.end()),
            _ => None,
        };
        let Some(label) = label else {
            return Ok(inlines);
        };

        let mut result = Vec::with_capacity(inlines.len() + 2);
        for (index, inline) in inlines.into_iter().enumerate() {
            match inline {
                Inline::Text(run) if index == first_text => {
                    result.push(Inline::Text(run.with_text(&run.text[..label])));
                    Self::tag_run(&run.with_text(&run.text[label..]), &mut result);
                }
                Inline::Text(run) if index > first_text => Self::tag_run(&run, &mut result),
                other => result.push(other),
            }
        }
        result.retain(|i| !matches!(i, Inline::Text(run) if run.text.is_empty()));
        Ok(result)
    }
}
