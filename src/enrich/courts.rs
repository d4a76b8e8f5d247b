//! Court names and the court table.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{tag_matches, walk_inlines, Enricher};
use crate::error::Result;
use crate::model::{Court, Inline};

/// A known court.
struct CourtEntry {
    code: &'static str,
    name: &'static str,
    /// Citation prefix, e.g. "EWCA Civ"
    citation: &'static str,
    /// How the court names itself in a header
    pattern: &'static str,
}

const COURTS: &[CourtEntry] = &[
    CourtEntry {
        code: "UKSC",
        name: "United Kingdom Supreme Court",
        citation: "UKSC",
        pattern: r"THE\s+SUPREME\s+COURT(?:\s+OF\s+THE\s+UNITED\s+KINGDOM)?",
    },
    CourtEntry {
        code: "UKPC",
        name: "Judicial Committee of the Privy Council",
        citation: "UKPC",
        pattern: r"(?:JUDICIAL\s+COMMITTEE\s+OF\s+THE\s+)?PRIVY\s+COUNCIL",
    },
    CourtEntry {
        code: "EWCA-Civil",
        name: "Court of Appeal (Civil Division)",
        citation: "EWCA Civ",
        pattern: r"COURT\s+OF\s+APPEAL\s*\(\s*CIVIL\s+DIVISION\s*\)",
    },
    CourtEntry {
        code: "EWCA-Criminal",
        name: "Court of Appeal (Criminal Division)",
        citation: "EWCA Crim",
        pattern: r"COURT\s+OF\s+APPEAL\s*\(\s*CRIMINAL\s+DIVISION\s*\)",
    },
    CourtEntry {
        code: "EWHC",
        name: "High Court",
        citation: "EWHC",
        pattern: r"HIGH\s+COURT\s+OF\s+JUSTICE",
    },
    CourtEntry {
        code: "EWFC",
        name: "Family Court",
        citation: "EWFC",
        pattern: r"(?:THE\s+)?FAMILY\s+COURT",
    },
    CourtEntry {
        code: "EWCOP",
        name: "Court of Protection",
        citation: "EWCOP",
        pattern: r"COURT\s+OF\s+PROTECTION",
    },
    CourtEntry {
        code: "UKUT",
        name: "Upper Tribunal",
        citation: "UKUT",
        pattern: r"UPPER\s+TRIBUNAL",
    },
    CourtEntry {
        code: "UKFTT",
        name: "First-tier Tribunal",
        citation: "UKFTT",
        pattern: r"FIRST[\s-]+TIER\s+TRIBUNAL",
    },
    CourtEntry {
        code: "EAT",
        name: "Employment Appeal Tribunal",
        citation: "EAT",
        pattern: r"EMPLOYMENT\s+APPEAL\s+TRIBUNAL",
    },
];

const BASE_URL: &str = "https://caselaw.nationalarchives.gov.uk";

static COURT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    COURTS
        .iter()
        .map(|c| Regex::new(&format!(r"(?i)\b{}", c.pattern)).unwrap())
        .collect()
});

fn to_court(entry: &CourtEntry) -> Court {
    Court {
        code: entry.code.to_string(),
        name: entry.name.to_string(),
        url: Some(format!("{}/{}", BASE_URL, entry.code.to_lowercase().replace('-', "/"))),
    }
}

/// Look up a court by code.
pub fn court_by_code(code: &str) -> Option<Court> {
    COURTS
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code))
        .map(to_court)
}

/// Infer the court from a neutral citation.
pub fn court_from_citation(citation: &str) -> Option<Court> {
    let rest = citation.split_once(']')?.1;
    let rest = rest.split_whitespace().collect::<Vec<_>>().join(" ");
    COURTS
        .iter()
        .filter(|c| {
            rest.strip_prefix(c.citation)
                .map(|after| after.starts_with(' '))
                .unwrap_or(false)
        })
        .max_by_key(|c| c.citation.len())
        .map(to_court)
}

/// Tags the name of the court.
#[derive(Debug, Clone, Copy, Default)]
pub struct CourtTypes;

impl Enricher for CourtTypes {
    fn name(&self) -> &str {
        "court-types"
    }

    fn enrich_inlines(&self, inlines: Vec<Inline>) -> Result<Vec<Inline>> {
        let mut inlines = walk_inlines(self, inlines)?;
        if inlines.iter().any(|i| matches!(i, Inline::CourtType { .. })) {
            return Ok(inlines);
        }
        for (entry, pattern) in COURTS.iter().zip(COURT_PATTERNS.iter()) {
            let mut found = false;
            inlines = tag_matches(inlines, pattern, |run| {
                if found {
                    return Ok(None);
                }
                found = true;
                Ok(Some(Inline::CourtType {
                    run: run.clone(),
                    court: entry.code.to_string(),
                }))
            })?;
            if found {
                break;
            }
        }
        Ok(inlines)
    }
}
