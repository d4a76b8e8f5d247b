//! Document families.
//!
//! Courts differ in how they lay out headers, name judges and mark annexes.
//! Those differences live behind [`DocumentFamily`]; the structural parser
//! itself is shared.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use super::header::HeaderStrategy;
use super::indent::is_flush_left;
use super::options::ParseOptions;
use crate::enrich::{
    CaseNumbers, Citations, CourtTypes, Dates, Enricher, FootnoteParens, Judges, Jurisdictions,
    Lawyers, Merger, Parties, Quotations,
};
use crate::error::{Error, Result};
use crate::model::Line;

static TITLED_JUDGE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^(?:THE\s+)?(?:LORD|LADY)\s+JUSTICE\s+[A-Z][A-Z'\-]*(?:\s+[A-Z][A-Z'\-]*)*$",
        r"^(?:THE\s+HONOURABLE\s+)?(?:MR|MRS|MS|MISS)\.?\s+JUSTICE\s+[A-Z][A-Z'\-]*(?:\s+[A-Z][A-Z'\-]*)*$",
        r"^(?:Lord|Lady)\s+Justice\s+[A-Z][A-Za-z'\-]*(?:\s+[A-Z][A-Za-z'\-]*)*$",
        r"^(?:Mr|Mrs|Ms|Miss)\.?\s+Justice\s+[A-Z][A-Za-z'\-]*(?:\s+[A-Z][A-Za-z'\-]*)*$",
        r"^(?:HIS|HER)\s+HONOUR\s+JUDGE\s+[A-Z][A-Z'\-]*(?:\s+[A-Z][A-Z'\-]*)*$",
        r"^(?:SIR|DAME)\s+[A-Z][A-Z'\-]*(?:\s+[A-Z][A-Z'\-]*)*$",
        r"^(?:THE\s+)?(?:MASTER\s+OF\s+THE\s+ROLLS|LORD\s+CHIEF\s+JUSTICE|CHANCELLOR\s+OF\s+THE\s+HIGH\s+COURT|PRESIDENT\s+OF\s+THE\s+FAMILY\s+DIVISION)$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static LAW_LORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:LORD|LADY)\s+[A-Z][A-Z'\-]*(?:\s+(?:OF\s+)?[A-Z][A-Z'\-]*)*(?:\s*\(with\s+whom\s+.+\))?$")
        .unwrap()
});

static TRIBUNAL_JUDGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:UPPER|DEPUTY\s+UPPER|FIRST-TIER)\s+TRIBUNAL\s+)?(?:JUDGE|Judge)\s+[A-Z][A-Za-z'\-]*(?:\s+[A-Z][A-Za-z'\-]*)*$",
    )
    .unwrap()
});

static ANNEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:ANNEX|APPENDIX|SCHEDULE)\s+(?:\d+|[A-Z])\s*$").unwrap()
});

static SIGNED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*Signed:\s").unwrap());

static TRIBUNAL_SIGNED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:Signed:\s|Signed\s*$|Signed\s+Date\b)").unwrap());

/// Maximum length of a judge's name line.
const MAX_NAME_LEN: usize = 120;

/// Maximum number of words in a heading.
const MAX_HEADING_WORDS: usize = 15;

/// Text of a judge line without a trailing colon.
fn judge_text(line: &Line) -> Option<String> {
    let text = line.normalized_text();
    if text.is_empty() || text.len() > MAX_NAME_LEN || text.ends_with('.') {
        return None;
    }
    Some(text.trim_end_matches(':').trim_end().to_string())
}

/// Behaviour that varies between document families.
pub trait DocumentFamily: Send + Sync {
    /// Registry name (e.g., "ew").
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// Header strategies, tried in order.
    fn header_strategies(&self) -> Vec<HeaderStrategy>;

    /// Whether documents of this family open with a cover page.
    fn has_cover_page(&self) -> bool {
        false
    }

    /// Check if a line names the judge whose opinion follows.
    fn is_titled_judge_name(&self, line: &Line) -> bool {
        judge_text(line)
            .map(|text| TITLED_JUDGE.iter().any(|re| re.is_match(&text)))
            .unwrap_or(false)
    }

    /// Check if a line starts an annex.
    fn is_annex_marker(&self, line: &Line) -> bool {
        let text = line.normalized_text();
        text.eq_ignore_ascii_case("annex")
            || text.eq_ignore_ascii_case("appendix")
            || ANNEX.is_match(&text)
    }

    /// Check if a line starts the conclusions.
    fn is_conclusions_marker(&self, line: &Line) -> bool {
        SIGNED.is_match(&line.plain_text())
    }

    /// Check if a line reads like a heading: short, and either emphasized
    /// or not ending like a sentence.
    fn is_heading_like(&self, line: &Line) -> bool {
        let text = line.normalized_text();
        if text.is_empty() || text.split_whitespace().count() > MAX_HEADING_WORDS {
            return false;
        }
        let emphasized =
            line.is_all_bold() || line.is_all_italic() || line.is_all_underlined() || line.is_uppercase();
        emphasized || !text.ends_with(['.', ',', ';', ':'])
    }

    /// Check if an unnumbered line is a cross-heading.
    fn is_cross_heading(&self, line: &Line, tolerance: f32) -> bool {
        is_flush_left(line, tolerance) && self.is_heading_like(line)
    }

    /// Check if a line closes a paragraph as its wrap-up.
    fn is_wrap_up(&self, line: &Line) -> bool {
        line.normalized_text()
            .chars()
            .next()
            .map(char::is_lowercase)
            .unwrap_or(false)
    }

    /// Enrichers applied to the cover page and header, in order.
    fn header_enrichers(&self) -> Vec<Box<dyn Enricher>> {
        vec![
            Box::new(Merger::new()),
            Box::new(Citations),
            Box::new(CaseNumbers),
            Box::new(CourtTypes),
            Box::new(Dates),
            Box::new(Parties),
            Box::new(Judges),
            Box::new(Lawyers),
        ]
    }

    /// Enrichers applied to the body, in order.
    fn body_enrichers(&self, options: &ParseOptions) -> Vec<Box<dyn Enricher>> {
        let mut enrichers: Vec<Box<dyn Enricher>> =
            vec![Box::new(Merger::new()), Box::new(FootnoteParens)];
        if options.detect_amendments {
            enrichers.push(Box::new(Quotations::new(options.quote_pattern.clone())));
        }
        enrichers
    }
}

/// Court of Appeal and High Court of England and Wales.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglandWales;

impl DocumentFamily for EnglandWales {
    fn name(&self) -> &str {
        "ew"
    }

    fn description(&self) -> &str {
        "Court of Appeal and High Court of England and Wales"
    }

    fn header_strategies(&self) -> Vec<HeaderStrategy> {
        vec![
            HeaderStrategy::Phrase(&["approved judgment", "judgment", "judgement", "approved judgement"]),
            HeaderStrategy::PageBreak,
            HeaderStrategy::TitleStyle,
        ]
    }
}

/// UK Supreme Court and Privy Council.
#[derive(Debug, Clone, Copy, Default)]
pub struct SupremeCourt;

impl DocumentFamily for SupremeCourt {
    fn name(&self) -> &str {
        "uksc"
    }

    fn description(&self) -> &str {
        "UK Supreme Court and Judicial Committee of the Privy Council"
    }

    fn header_strategies(&self) -> Vec<HeaderStrategy> {
        vec![
            HeaderStrategy::Phrase(&["judgment", "judgment given on", "reasons for judgment"]),
            HeaderStrategy::TitleStyle,
        ]
    }

    fn has_cover_page(&self) -> bool {
        true
    }

    fn is_titled_judge_name(&self, line: &Line) -> bool {
        judge_text(line)
            .map(|text| LAW_LORD.is_match(&text) || TITLED_JUDGE.iter().any(|re| re.is_match(&text)))
            .unwrap_or(false)
    }

    fn header_enrichers(&self) -> Vec<Box<dyn Enricher>> {
        vec![
            Box::new(Merger::new()),
            Box::new(Citations),
            Box::new(CaseNumbers),
            Box::new(CourtTypes),
            Box::new(Dates),
            Box::new(Parties),
            Box::new(Judges),
        ]
    }
}

/// Upper Tribunal, First-tier Tribunal and Employment Appeal Tribunal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tribunal;

impl DocumentFamily for Tribunal {
    fn name(&self) -> &str {
        "tribunal"
    }

    fn description(&self) -> &str {
        "Upper Tribunal, First-tier Tribunal and Employment Appeal Tribunal"
    }

    fn header_strategies(&self) -> Vec<HeaderStrategy> {
        vec![
            HeaderStrategy::Phrase(&[
                "decision and reasons",
                "decision",
                "decision and directions",
                "judgment",
                "summary of decision",
            ]),
            HeaderStrategy::PageBreak,
            HeaderStrategy::TitleStyle,
        ]
    }

    fn is_titled_judge_name(&self, line: &Line) -> bool {
        judge_text(line)
            .map(|text| TRIBUNAL_JUDGE.is_match(&text) || TITLED_JUDGE.iter().any(|re| re.is_match(&text)))
            .unwrap_or(false)
    }

    fn is_conclusions_marker(&self, line: &Line) -> bool {
        TRIBUNAL_SIGNED.is_match(&line.plain_text())
    }

    fn header_enrichers(&self) -> Vec<Box<dyn Enricher>> {
        vec![
            Box::new(Merger::new()),
            Box::new(Citations),
            Box::new(CaseNumbers),
            Box::new(CourtTypes),
            Box::new(Jurisdictions),
            Box::new(Dates),
            Box::new(Parties),
            Box::new(Judges),
        ]
    }
}

/// Registry of document families, looked up by name.
pub struct FamilyRegistry {
    families: HashMap<String, Arc<dyn DocumentFamily>>,
}

impl FamilyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            families: HashMap::new(),
        }
    }

    /// Create a registry with the built-in families.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(EnglandWales));
        registry.register(Arc::new(SupremeCourt));
        registry.register(Arc::new(Tribunal));
        registry
    }

    /// Register a family under its name, replacing any existing one.
    pub fn register(&mut self, family: Arc<dyn DocumentFamily>) {
        self.families.insert(family.name().to_lowercase(), family);
    }

    /// Get a family by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn DocumentFamily>> {
        self.families
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| Error::UnknownFamily(name.to_string()))
    }

    /// Registered family names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.families.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for FamilyRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
