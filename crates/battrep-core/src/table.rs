//! Minimal tokenizer for the report's HTML tables.
//!
//! The report is not well-formed HTML, so this does not build a DOM. It
//! strips whitespace, cuts out the first `<table>` region and splits it on
//! row and cell markers. Callers pass text holding exactly one table.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

const TABLE_OPEN: &str = "<table>";
const TABLE_CLOSE: &str = "</table>";
const ROW_OPEN: &str = "<tr";
const ROW_CLOSE: &str = "</tr>";
const CELL_OPEN: &str = "<td";
const CELL_CLOSE: &str = "</td>";

/// Styled spacer rows (`<tr style="...">`) lose their marker here; their
/// leftovers land after the previous `</tr>` and are dropped with it.
const STYLED_ROW_OPEN: &str = "<trstyle";

/// Raw text of one table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell(String);

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Character count of the cell text.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl AsRef<str> for Cell {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Cells of one table row in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Get a cell. Rows may omit trailing cells.
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }
}

/// Rows of one table region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Generate normalized HTML for this table.
    pub fn to_html(&self) -> String {
        let mut html = String::from(TABLE_OPEN);

        for row in &self.rows {
            html.push_str("<tr>");
            for cell in row.iter() {
                html.push_str("<td>");
                html.push_str(cell.as_str());
                html.push_str(CELL_CLOSE);
            }
            html.push_str(ROW_CLOSE);
        }

        html.push_str(TABLE_CLOSE);
        html
    }
}

/// Remove spaces, line breaks and styled row markers.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| !matches!(c, ' ' | '\r' | '\n'))
        .collect();

    stripped.replace(STYLED_ROW_OPEN, "")
}

/// Extract the single table embedded in `text`.
pub fn extract_table(text: &str) -> Result<Table, ParseError> {
    let normalized = normalize(text);

    let start = normalized
        .find(TABLE_OPEN)
        .ok_or(ParseError::NoTableFound)?
        + TABLE_OPEN.len();
    let end = normalized[start..]
        .find(TABLE_CLOSE)
        .ok_or(ParseError::NoTableFound)?
        + start;

    let rows = normalized[start..end]
        .split(ROW_OPEN)
        .skip(1)
        .map(|fragment| {
            let body = after_tag(fragment);
            let inner = body.split(ROW_CLOSE).next().unwrap_or_default();
            extract_row(inner)
        })
        .collect();

    Ok(Table::new(rows))
}

/// Split the inside of one row into cells.
pub fn extract_row(raw: &str) -> Row {
    let cells = raw
        .split(CELL_OPEN)
        .skip(1)
        .map(|fragment| Cell::new(after_tag(fragment).replace(CELL_CLOSE, "")))
        .collect();

    Row::new(cells)
}

/// Drop an opening tag's attributes and `>`. Fragments without `>` are
/// returned whole.
fn after_tag(fragment: &str) -> &str {
    match fragment.find('>') {
        Some(end) => &fragment[end + 1..],
        None => fragment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(table: &Table) -> Vec<Vec<&str>> {
        table
            .iter()
            .map(|row| row.iter().map(Cell::as_str).collect())
            .collect()
    }

    #[test]
    fn test_extract_simple_table() {
        let html = r#"
            <h2>Title</h2>
            <table>
              <thead>
                <tr><td>PERIOD</td><td>CAPACITY</td></tr>
              </thead>
              <tr class="even 1">
                <td class="dateTime">2021-06-14</td>
                <td class="mw">49,510 mWh</td>
              </tr>
            </table>
            <p>after</p>
        "#;

        let table = extract_table(html).unwrap();

        assert_eq!(
            texts(&table),
            vec![
                vec!["PERIOD", "CAPACITY"],
                vec!["2021-06-14", "49,510mWh"],
            ]
        );
    }

    #[test]
    fn test_styled_spacer_row_is_dropped() {
        let html = "<table>\r\n\
            <tr><td>a</td></tr>\r\n\
            <tr style=\"height:0.4em;\"></tr>\r\n\
            <tr><td>b</td></tr>\r\n\
            </table>";

        let table = extract_table(html).unwrap();
        assert_eq!(texts(&table), vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn test_cell_markup_is_kept() {
        let table = extract_table(
            r#"<table><tr><td><span class="label">NAME</span></td><td>X</td></tr></table>"#,
        )
        .unwrap();

        assert_eq!(
            texts(&table),
            vec![vec![r#"<spanclass="label">NAME</span>"#, "X"]]
        );
    }

    #[test]
    fn test_rows_may_omit_trailing_cells() {
        let table =
            extract_table("<table><tr><td>a</td><td>b</td></tr><tr><td>c</td></tr></table>")
                .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.row(1).unwrap().len(), 1);
        assert!(table.row(1).unwrap().cell(1).is_none());
    }

    #[test]
    fn test_missing_table_markers() {
        assert_eq!(extract_table("no table here"), Err(ParseError::NoTableFound));
        assert_eq!(
            extract_table("<table><tr><td>a</td></tr>"),
            Err(ParseError::NoTableFound)
        );
        assert_eq!(
            extract_table("<tr><td>a</td></tr></table>"),
            Err(ParseError::NoTableFound)
        );
    }

    #[test]
    fn test_only_first_table_is_read() {
        let table = extract_table(
            "<table><tr><td>first</td></tr></table><table><tr><td>second</td></tr></table>",
        )
        .unwrap();
        assert_eq!(texts(&table), vec![vec!["first"]]);
    }

    #[test]
    fn test_extract_row_without_cells() {
        assert!(extract_row("").is_empty());
        assert!(extract_row("noise only").is_empty());
    }

    #[test]
    fn test_retokenizing_html_is_stable() {
        let html = r#"
            <table>
              <colgroup><col/><col/></colgroup>
              <thead><tr><td>&nbsp;</td><td>BATTERY 1</td><td>BATTERY 2</td></tr></thead>
              <tr><td><span class="label">NAME</span></td><td>DELL 1VX1H93</td><td>AUX</td></tr>
              <tr style="height:0.4em;"></tr>
              <tr><td><span class="label">CYCLE COUNT</span></td><td>12</td></tr>
            </table>
        "#;

        let first = extract_table(html).unwrap();
        let second = extract_table(&first.to_html()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }
}
