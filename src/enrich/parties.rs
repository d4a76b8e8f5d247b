//! Party names.
//!
//! Headers lay parties out in one of three ways: name and role on one line
//! separated by tabs, the role alone on the line after the name, or a
//! two-column table. All three are recognised here.

use super::{tag_trimmed, walk_block, Enricher};
use crate::error::Result;
use crate::model::{Block, Inline, Line, PartyRole, Table};

/// Tags party names with their roles.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parties;

/// Connectors that sit between party names and are never names.
const CONNECTORS: &[&str] = &["v", "v.", "vs", "vs.", "and", "-and-", "- and -", "between", "between:"];

/// Role named by a line holding nothing else, e.g. "Appellant" or "(Respondents)".
fn role_only(line: &Line) -> Option<PartyRole> {
    let text = line.normalized_text();
    let text = text.trim_start_matches('(').trim_end_matches(')');
    PartyRole::from_word(text)
}

fn is_name_line(line: &Line) -> bool {
    let text = line.normalized_text();
    !text.is_empty()
        && !text.ends_with(':')
        && !CONNECTORS.contains(&text.to_lowercase().as_str())
        && !line.contents.iter().any(Inline::is_tagged)
}

fn tag_inlines(inlines: Vec<Inline>, role: Option<PartyRole>) -> Vec<Inline> {
    inlines
        .into_iter()
        .flat_map(|inline| match inline {
            Inline::Text(run) => tag_trimmed(&run, |run| Inline::Party { run, role }),
            other => vec![other],
        })
        .collect()
}

/// Name and role separated by tabs: "JOHN SMITH\t\tAppellant".
fn tab_layout(line: &Line) -> Option<Line> {
    let last_tab = line.contents.iter().rposition(Inline::is_tab)?;
    let role_text: String = line.contents[last_tab + 1..]
        .iter()
        .map(Inline::plain_text)
        .collect();
    let role = PartyRole::from_word(role_text.trim().trim_start_matches('(').trim_end_matches(')'))?;
    let name = Line::with_contents(line.contents[..last_tab].to_vec());
    if !is_name_line(&name) {
        return None;
    }
    let mut contents = tag_inlines(name.contents, Some(role));
    contents.extend(line.contents[last_tab..].iter().cloned());
    Some(Line {
        contents,
        ..line.clone()
    })
}

impl Parties {
    /// Rows whose last cell names a role tag the text of their first cell.
    fn enrich_table(&self, mut table: Table) -> Result<Table> {
        for row in &mut table.rows {
            if row.cells.len() < 2 {
                continue;
            }
            let role_text = row.cells[row.cells.len() - 1].plain_text();
            let Some(role) = PartyRole::from_word(role_text.trim()) else {
                continue;
            };
            let first = &mut row.cells[0];
            first.contents = std::mem::take(&mut first.contents)
                .into_iter()
                .map(|block| match block {
                    Block::Line(line) if is_name_line(&line) => Block::Line(Line {
                        contents: tag_inlines(line.contents, Some(role)),
                        ..line
                    }),
                    other => other,
                })
                .collect();
        }
        Ok(table)
    }
}

impl Enricher for Parties {
    fn name(&self) -> &str {
        "parties"
    }

    fn enrich_blocks(&self, blocks: Vec<Block>) -> Result<Vec<Block>> {
        let mut result: Vec<Block> = Vec::with_capacity(blocks.len());
        for block in blocks {
            match block {
                Block::Line(line) => {
                    if let Some(role) = role_only(&line) {
                        if let Some(Block::Line(prev)) = result.last_mut() {
                            if is_name_line(prev) {
                                prev.contents = tag_inlines(std::mem::take(&mut prev.contents), Some(role));
                            }
                        }
                        result.push(Block::Line(line));
                    } else if let Some(tagged) = tab_layout(&line) {
                        result.push(Block::Line(tagged));
                    } else {
                        result.push(Block::Line(line));
                    }
                }
                Block::Table(table) => result.push(Block::Table(self.enrich_table(table)?)),
                other => result.push(walk_block(self, other)?),
            }
        }
        Ok(result)
    }
}
