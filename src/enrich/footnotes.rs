//! Parentheses around footnote references.

use super::{walk_inlines, Enricher};
use crate::error::Result;
use crate::model::Inline;

/// Removes the "(" and ")" that some authors type around a footnote marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct FootnoteParens;

impl Enricher for FootnoteParens {
    fn name(&self) -> &str {
        "footnote-parens"
    }

    fn enrich_inlines(&self, inlines: Vec<Inline>) -> Result<Vec<Inline>> {
        let mut inlines = walk_inlines(self, inlines)?;
        let mut i = 1;
        while i + 1 < inlines.len() {
            let wrapped = matches!(inlines[i], Inline::FootnoteRef { .. })
                && matches!(&inlines[i - 1], Inline::Text(run) if run.text.ends_with('('))
                && matches!(&inlines[i + 1], Inline::Text(run) if run.text.starts_with(')'));
            if wrapped {
                if let Inline::Text(run) = &mut inlines[i - 1] {
                    run.text.pop();
                }
                if let Inline::Text(run) = &mut inlines[i + 1] {
                    run.text.remove(0);
                }
            }
            i += 1;
        }
        inlines.retain(|i| !matches!(i, Inline::Text(run) if run.text.is_empty()));
        Ok(inlines)
    }
}
