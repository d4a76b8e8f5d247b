//! Neutral citations.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{tag_matches, walk_inlines, Enricher};
use crate::error::Result;
use crate::model::Inline;

static NEUTRAL_CITATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\[(?:19|20)\d{2}\]\s+(?:UKSC|UKPC|UKHL|EWCA\s+(?:Civ|Crim)|EWHC|EWFC|EWCOP|EWCR|UKUT|UKFTT|UKEAT|EAT|UKAIT|UKIAT|UKIPTrib)\s+\d+(?:\s+\((?:Admin|Admlty|Ch|Comm|Costs|Fam|IPEC|KB|QB|Mercantile|Pat|SCCO|TCC|AAC|IAC|LC|TC|GRC)\))?",
    )
    .unwrap()
});

/// Tags neutral citations such as "[2021] EWCA Civ 12".
#[derive(Debug, Clone, Copy, Default)]
pub struct Citations;

impl Enricher for Citations {
    fn name(&self) -> &str {
        "citations"
    }

    fn enrich_inlines(&self, inlines: Vec<Inline>) -> Result<Vec<Inline>> {
        let inlines = walk_inlines(self, inlines)?;
        tag_matches(inlines, &NEUTRAL_CITATION, |run| {
            Ok(Some(Inline::NeutralCitation(run.clone())))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, TextRun};

    fn citations_in(text: &str) -> Vec<String> {
        let block = Citations.enrich_block(Block::line(text)).unwrap();
        block
            .as_line()
            .unwrap()
            .contents
            .iter()
            .filter_map(|i| match i {
                Inline::NeutralCitation(run) => Some(run.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_citation_forms() {
        assert_eq!(citations_in("[2021] EWCA Civ 1234"), vec!["[2021] EWCA Civ 1234"]);
        assert_eq!(citations_in("Neutral Citation: [2019] UKSC 5."), vec!["[2019] UKSC 5"]);
        assert_eq!(
            citations_in("[2020] EWHC 123 (Admin) and [2020] UKUT 4 (IAC)"),
            vec!["[2020] EWHC 123 (Admin)", "[2020] UKUT 4 (IAC)"]
        );
        assert!(citations_in("[2020] 1 WLR 100").is_empty());
    }

    #[test]
    fn test_keeps_style() {
        let line = crate::model::Line::with_contents(vec![Inline::Text(TextRun::bold("[2021] UKSC 1"))]);
        let block = Citations.enrich_block(Block::Line(line)).unwrap();
        match &block.as_line().unwrap().contents[0] {
            Inline::NeutralCitation(run) => assert!(run.style.bold),
            other => panic!("unexpected {:?}", other),
        }
    }
}
