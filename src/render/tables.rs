//! Vertical-merge repair for tables.
//!
//! Word processors record a vertically merged cell as a "restart" cell
//! followed by one placeholder per row below. Output needs a `rowspan` on
//! the first cell instead, and no placeholders.

use crate::model::{Table, TableCell, VerticalMerge};

/// A cell with its repaired row span.
#[derive(Debug, Clone, PartialEq)]
pub struct RepairedCell<'a> {
    /// The source cell
    pub cell: &'a TableCell,
    /// Rows spanned
    pub rowspan: u16,
}

/// A row of repaired cells.
#[derive(Debug, Clone, PartialEq)]
pub struct RepairedRow<'a> {
    /// Cells, placeholders removed
    pub cells: Vec<RepairedCell<'a>>,
    /// Whether the row is a header row
    pub is_header: bool,
}

/// Grid column at which each cell of each row starts.
fn column_starts(table: &Table) -> Vec<Vec<usize>> {
    table
        .rows
        .iter()
        .map(|row| {
            let mut col = 0;
            row.cells
                .iter()
                .map(|cell| {
                    let start = col;
                    col += cell.colspan.max(1) as usize;
                    start
                })
                .collect()
        })
        .collect()
}

/// Re-derive row spans from merge placeholders and drop rows that were
/// merged away entirely.
pub fn repair_merges(table: &Table) -> Vec<RepairedRow<'_>> {
    if !table.has_merged_cells() {
        return table
            .rows
            .iter()
            .map(|row| RepairedRow {
                cells: row.cells.iter().map(|cell| RepairedCell { cell, rowspan: 1 }).collect(),
                is_header: row.is_header,
            })
            .collect();
    }
    let starts = column_starts(table);
    let continues_at = |row: usize, col: usize| {
        table.rows[row]
            .cells
            .iter()
            .zip(&starts[row])
            .any(|(cell, start)| *start == col && cell.is_continuation())
    };

    let spans: Vec<Vec<u16>> = table
        .rows
        .iter()
        .enumerate()
        .map(|(r, row)| {
            row.cells
                .iter()
                .enumerate()
                .map(|(c, cell)| match cell.v_merge {
                    Some(VerticalMerge::Continue) => 0,
                    Some(VerticalMerge::Restart) => {
                        let col = starts[r][c];
                        let below = (r + 1..table.rows.len())
                            .take_while(|&next| continues_at(next, col))
                            .count();
                        1 + below as u16
                    }
                    None => cell.rowspan.max(1),
                })
                .collect()
        })
        .collect();

    let merged_away: Vec<bool> = table
        .rows
        .iter()
        .map(|row| !row.cells.is_empty() && row.cells.iter().all(TableCell::is_continuation))
        .collect();

    // A kept span loses one row for each dropped row it covered.
    let dropped_within = |r: usize, span: u16| {
        let end = (r + span as usize).min(merged_away.len());
        merged_away[(r + 1).min(end)..end].iter().filter(|away| **away).count() as u16
    };
    let spans: Vec<Vec<u16>> = spans
        .into_iter()
        .enumerate()
        .map(|(r, row_spans)| {
            row_spans
                .into_iter()
                .map(|span| if span > 1 { (span - dropped_within(r, span)).max(1) } else { span })
                .collect()
        })
        .collect();

    table
        .rows
        .iter()
        .zip(spans)
        .zip(merged_away)
        .filter(|(_, away)| !away)
        .map(|((row, row_spans), _)| RepairedRow {
            cells: row
                .cells
                .iter()
                .zip(row_spans)
                .filter(|(cell, _)| !cell.is_continuation())
                .map(|(cell, rowspan)| RepairedCell { cell, rowspan })
                .collect(),
            is_header: row.is_header,
        })
        .collect()
}
