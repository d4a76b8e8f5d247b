//! Docket dates.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{tag_matches, walk_line, Enricher};
use crate::error::{Error, Result};
use crate::model::{Block, Inline, Line};

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

static LONG_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+(January|February|March|April|May|June|July|August|September|October|November|December)\s*,?\s+(\d{4})\b",
    )
    .unwrap()
});

static NUMERIC_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").unwrap());

static HEARING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bhearings?\b|\bheard\b").unwrap());

/// Tags dates in the header, naming each by the line it appears on.
///
/// A date-shaped span that is not a real date ("31 February 2021") is an
/// error: the header is malformed and the document is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dates;

impl Dates {
    /// Parse a date span.
    pub fn parse(text: &str) -> Result<NaiveDate> {
        let invalid = || Error::InvalidDate(text.to_string());
        if let Some(caps) = LONG_DATE.captures(text) {
            let day: u32 = caps[1].parse().map_err(|_| invalid())?;
            let month = MONTHS
                .iter()
                .position(|m| m.eq_ignore_ascii_case(&caps[2]))
                .ok_or_else(invalid)? as u32
                + 1;
            let year: i32 = caps[3].parse().map_err(|_| invalid())?;
            return NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid);
        }
        if let Some(caps) = NUMERIC_DATE.captures(text) {
            let day: u32 = caps[1].parse().map_err(|_| invalid())?;
            let month: u32 = caps[2].parse().map_err(|_| invalid())?;
            let year: i32 = caps[3].parse().map_err(|_| invalid())?;
            return NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid);
        }
        Err(invalid())
    }

    fn tag(inlines: Vec<Inline>, pattern: &Regex, name: &str) -> Result<Vec<Inline>> {
        tag_matches(inlines, pattern, |run| {
            Ok(Some(Inline::DocketDate {
                run: run.clone(),
                date: Self::parse(&run.text)?,
                name: name.to_string(),
            }))
        })
    }
}

impl Enricher for Dates {
    fn name(&self) -> &str {
        "dates"
    }

    fn enrich_line(&self, line: Line) -> Result<Block> {
        let name = if HEARING.is_match(&line.plain_text()) {
            "hearing"
        } else {
            "decision"
        };
        let line = walk_line(self, line)?;
        let contents = Self::tag(line.contents, &LONG_DATE, name)?;
        let contents = Self::tag(contents, &NUMERIC_DATE, name)?;
        Ok(Block::Line(Line { contents, ..line }))
    }
}
