//! Metadata synthesis from the enriched header.

use crate::model::{Block, Inline, Metadata, PartyName};

use super::{court_by_code, court_from_citation};

/// Visit every inline in a block list, descending into tables.
fn for_each_inline<'a>(blocks: &'a [Block], f: &mut dyn FnMut(&'a Inline)) {
    for block in blocks {
        match block {
            Block::Line(line) => line.contents.iter().for_each(&mut *f),
            Block::NumberedLine(numbered) => numbered.line.contents.iter().for_each(&mut *f),
            Block::Table(table) => {
                for row in &table.rows {
                    for cell in &row.cells {
                        for_each_inline(&cell.contents, f);
                    }
                }
            }
            Block::Mod(m) => for_each_inline(&m.contents, f),
            Block::TableOfContents(_) | Block::Quote(_) => {}
        }
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() && !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

/// Build the metadata summary from tagged spans in the cover page and header.
///
/// The first neutral citation and court win. The date named "decision" is
/// preferred; failing that, the last date found is used.
pub fn extract_metadata(name: Option<&str>, cover_page: &[Block], header: &[Block]) -> Metadata {
    let mut meta = Metadata {
        name: name.map(str::to_string),
        ..Default::default()
    };
    let mut court_code: Option<String> = None;
    let mut decision_date = None;
    let mut any_date = None;

    let mut visit = |inline: &Inline| match inline {
        Inline::NeutralCitation(run) if meta.citation.is_none() => {
            meta.citation = Some(run.text.split_whitespace().collect::<Vec<_>>().join(" "));
        }
        Inline::CaseNumber(run) => push_unique(&mut meta.case_numbers, &run.text),
        Inline::CourtType { court, .. } if court_code.is_none() => court_code = Some(court.clone()),
        Inline::DocketDate { date, name, .. } => {
            if name == "decision" && decision_date.is_none() {
                decision_date = Some((*date, name.clone()));
            }
            any_date = Some((*date, name.clone()));
        }
        Inline::Party { run, role } => {
            let name = run.text.trim();
            if !meta.parties.iter().any(|p| p.name == name) {
                meta.parties.push(PartyName {
                    name: name.to_string(),
                    role: *role,
                });
            }
        }
        Inline::Judge(run) => push_unique(&mut meta.judges, &run.text),
        Inline::Lawyer(run) => push_unique(&mut meta.lawyers, &run.text),
        Inline::Jurisdiction(run) => push_unique(&mut meta.jurisdictions, &run.text),
        _ => {}
    };
    for_each_inline(cover_page, &mut visit);
    for_each_inline(header, &mut visit);

    if let Some((date, name)) = decision_date.or(any_date) {
        meta.date = Some(date);
        meta.date_name = Some(name);
    }
    meta.court = court_code
        .as_deref()
        .and_then(court_by_code)
        .or_else(|| meta.citation.as_deref().and_then(court_from_citation));
    meta.title = title_from_parties(&meta.parties).or_else(|| title_from_style(header));
    meta
}

/// "A v B" from the first party on each side.
fn title_from_parties(parties: &[PartyName]) -> Option<String> {
    let first = parties
        .iter()
        .find(|p| p.role.map(|r| !r.is_responding()).unwrap_or(true))?;
    let second = parties
        .iter()
        .find(|p| p.role.map(|r| r.is_responding()).unwrap_or(false))?;
    Some(format!("{} v {}", first.name, second.name))
}

fn title_from_style(header: &[Block]) -> Option<String> {
    header
        .iter()
        .filter_map(Block::as_line)
        .find(|line| {
            line.style
                .as_deref()
                .map(|s| s.eq_ignore_ascii_case("title"))
                .unwrap_or(false)
        })
        .map(|line| line.normalized_text())
        .filter(|t| !t.is_empty())
}
