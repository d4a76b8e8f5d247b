//! Tribunal chambers.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{tag_matches, walk_inlines, Enricher};
use crate::error::Result;
use crate::model::Inline;

static CHAMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:immigration\s+and\s+asylum|administrative\s+appeals|tax\s+and\s+chancery|lands|general\s+regulatory|social\s+entitlement|property|tax|health,?\s+education\s+and\s+social\s+care|war\s+pensions\s+and\s+armed\s+forces\s+compensation)\s+chamber\b",
    )
    .unwrap()
});

/// Tags the chamber a tribunal sits in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Jurisdictions;

impl Enricher for Jurisdictions {
    fn name(&self) -> &str {
        "jurisdictions"
    }

    fn enrich_inlines(&self, inlines: Vec<Inline>) -> Result<Vec<Inline>> {
        let inlines = walk_inlines(self, inlines)?;
        tag_matches(inlines, &CHAMBER, |run| Ok(Some(Inline::Jurisdiction(run.clone()))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, TextRun};

    #[test]
    fn test_chamber() {
        let block = Jurisdictions
            .enrich_block(Block::line("UPPER TRIBUNAL (IMMIGRATION AND ASYLUM CHAMBER)"))
            .unwrap();
        let line = block.as_line().unwrap();
        assert_eq!(
            line.contents[1],
            Inline::Jurisdiction(TextRun::new("IMMIGRATION AND ASYLUM CHAMBER"))
        );
        assert_eq!(block.plain_text(), "UPPER TRIBUNAL (IMMIGRATION AND ASYLUM CHAMBER)");
    }

    #[test]
    fn test_no_chamber() {
        let block = Jurisdictions.enrich_block(Block::line("The chamber was empty")).unwrap();
        assert!(block.as_line().unwrap().contents.iter().all(Inline::is_text));
    }
}
