//! Counsel named before "(instructed by".

use once_cell::sync::Lazy;
use regex::Regex;

use super::{tag_trimmed, walk_inlines, Enricher};
use crate::error::Result;
use crate::model::{Inline, TextRun};

static INSTRUCTED_BY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\(\s*instructed\s+by").unwrap());

static SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*(?:,|\band\b|&)\s*").unwrap());

/// Tags the names of counsel on "X and Y (instructed by Z) for the Appellant" lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lawyers;

fn tag_names(run: &TextRun, result: &mut Vec<Inline>) {
    let mut last = 0;
    for sep in SEPARATOR.find_iter(&run.text) {
        result.extend(tag_trimmed(&run.with_text(&run.text[last..sep.start()]), Inline::Lawyer));
        result.push(Inline::Text(run.with_text(sep.as_str())));
        last = sep.end();
    }
    result.extend(tag_trimmed(&run.with_text(&run.text[last..]), Inline::Lawyer));
}

impl Enricher for Lawyers {
    fn name(&self) -> &str {
        "lawyers"
    }

    fn enrich_inlines(&self, inlines: Vec<Inline>) -> Result<Vec<Inline>> {
        let inlines = walk_inlines(self, inlines)?;
        let marker = inlines.iter().enumerate().find_map(|(index, inline)| match inline {
            Inline::Text(run) => INSTRUCTED_BY.find(&run.text).map(|m| (index, m.start())),
            _ => None,
        });
        let Some((marker_index, marker_offset)) = marker else {
            return Ok(inlines);
        };

        let mut result = Vec::with_capacity(inlines.len() + 4);
        for (index, inline) in inlines.into_iter().enumerate() {
            match inline {
                Inline::Text(run) if index < marker_index => tag_names(&run, &mut result),
                Inline::Text(run) if index == marker_index => {
                    tag_names(&run.with_text(&run.text[..marker_offset]), &mut result);
                    result.push(Inline::Text(run.with_text(&run.text[marker_offset..])));
                }
                other => result.push(other),
            }
        }
        result.retain(|i| !matches!(i, Inline::Text(run) if run.text.is_empty()));
        Ok(result)
    }
}
