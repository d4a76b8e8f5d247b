//! Table types.

use serde::{Deserialize, Serialize};

use super::Block;

/// A table structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,

    /// Column widths in inches (optional)
    #[serde(default)]
    pub column_widths: Option<Vec<f32>>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            column_widths: None,
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of grid columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows
            .first()
            .map(|r| r.cells.iter().map(|c| c.colspan as usize).sum())
            .unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if any cell spans more than one row or column.
    pub fn has_merged_cells(&self) -> bool {
        self.rows
            .iter()
            .flat_map(|r| &r.cells)
            .any(|c| c.v_merge.is_some() || c.rowspan > 1 || c.colspan > 1)
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,

    /// Whether this is a header row
    #[serde(default)]
    pub is_header: bool,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            is_header: false,
        }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.plain_text())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content
    pub contents: Vec<Block>,

    /// Number of rows this cell spans
    #[serde(default = "one")]
    pub rowspan: u16,

    /// Number of grid columns this cell spans
    #[serde(default = "one")]
    pub colspan: u16,

    /// Vertical merge state as recorded by the word processor
    #[serde(default)]
    pub v_merge: Option<VerticalMerge>,

    /// Cell borders
    #[serde(default)]
    pub borders: Borders,

    /// Cell background color
    #[serde(default)]
    pub background_color: Option<String>,
}

fn one() -> u16 {
    1
}

impl TableCell {
    /// Create a new cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self::with_content(vec![Block::line(text)])
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::with_content(Vec::new())
    }

    /// Create a cell with block content.
    pub fn with_content(contents: Vec<Block>) -> Self {
        Self {
            contents,
            rowspan: 1,
            colspan: 1,
            v_merge: None,
            borders: Borders::default(),
            background_color: None,
        }
    }

    /// Set colspan and return self.
    pub fn colspan(mut self, span: u16) -> Self {
        self.colspan = span;
        self
    }

    /// Set vertical merge state and return self.
    pub fn merge(mut self, merge: VerticalMerge) -> Self {
        self.v_merge = Some(merge);
        self
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        self.contents
            .iter()
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty() || self.plain_text().trim().is_empty()
    }

    /// Check if this cell continues a vertical merge from the row above.
    pub fn is_continuation(&self) -> bool {
        self.v_merge == Some(VerticalMerge::Continue)
    }
}

/// Vertical merge state of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalMerge {
    /// First cell of a vertically merged range
    Restart,
    /// Placeholder continuing the range above
    Continue,
}

/// Cell border styles, as CSS border-style values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Borders {
    /// Top border
    pub top: Option<String>,
    /// Right border
    pub right: Option<String>,
    /// Bottom border
    pub bottom: Option<String>,
    /// Left border
    pub left: Option<String>,
}

impl Borders {
    /// CSS declarations for these borders.
    pub fn to_css(&self) -> Vec<String> {
        [
            ("top", &self.top),
            ("right", &self.right),
            ("bottom", &self.bottom),
            ("left", &self.left),
        ]
        .into_iter()
        .filter_map(|(side, style)| {
            style
                .as_ref()
                .map(|s| format!("border-{}-style:{}", side, s))
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = Table::new();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_table_with_data() {
        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["Name", "Role"]));
        table.add_row(TableRow::new(vec![
            TableCell::text("Alice").colspan(2),
        ]));
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert!(table.has_merged_cells());
    }

    #[test]
    fn test_cell_continuation() {
        let cell = TableCell::empty().merge(VerticalMerge::Continue);
        assert!(cell.is_continuation());
        assert!(cell.is_empty());
    }

    #[test]
    fn test_borders_css() {
        let borders = Borders {
            top: Some("solid".into()),
            ..Default::default()
        };
        assert_eq!(borders.to_css(), vec!["border-top-style:solid".to_string()]);
    }
}
