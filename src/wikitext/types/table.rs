/*!
Table node.

A table is a list of rows; every row maps the same ordered set of column keys
to a cell sentence. Keys are header names when the table has headers and
`col1`, `col2`, ... otherwise.
*/

use serde::Serialize;

use crate::wikitext::errors::WtError;
use crate::wikitext::types::fields::Fields;
use crate::wikitext::types::links::Link;
use crate::wikitext::types::sentence::Sentence;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    rows: Vec<Fields>,
    #[serde(skip)]
    wiki: String,
}

impl Table {
    pub fn new(rows: Vec<Fields>, wiki: String) -> Self {
        Self { rows, wiki }
    }

    pub fn rows(&self) -> &[Fields] {
        &self.rows
    }

    pub fn row(&self, idx: usize) -> Result<&Fields, WtError> {
        self.rows
            .get(idx)
            .ok_or_else(|| WtError::index_oob(idx, self.rows.len()))
    }

    /// Column keys, in order.
    pub fn keys(&self) -> Vec<&str> {
        self.rows
            .first()
            .map(|r| r.keys().collect())
            .unwrap_or_default()
    }

    /// Get a cell by row index and column identifier: a key, or a 0-based
    /// column number.
    pub fn get_cell(&self, row_idx: usize, col: &str) -> Option<&Sentence> {
        let row = self.rows.get(row_idx)?;
        if let Some(cell) = row.get(col) {
            return Some(cell);
        }
        let ci = col.parse::<usize>().ok()?;
        row.values().nth(ci)
    }

    /// All cells of one column, top to bottom.
    pub fn column(&self, key: &str) -> Vec<&Sentence> {
        self.rows.iter().filter_map(|r| r.get(key)).collect()
    }

    /// Rows as `(key, text)` pairs.
    pub fn key_value(&self) -> Vec<Vec<(String, String)>> {
        self.rows.iter().map(Fields::to_text_pairs).collect()
    }

    pub fn links(&self) -> Vec<&Link> {
        self.rows.iter().flat_map(|r| r.links()).collect()
    }

    /// Rows rendered one per line, cells separated by ` | `.
    pub fn text(&self) -> String {
        self.rows
            .iter()
            .map(|r| {
                r.values()
                    .map(|s| s.text())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn wikitext(&self) -> &str {
        &self.wiki
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        let row = |a: &str, b: &str| -> Fields {
            [
                ("name".to_string(), Sentence::plain(a)),
                ("age".to_string(), Sentence::plain(b)),
            ]
            .into_iter()
            .collect()
        };
        Table::new(vec![row("Ann", "31"), row("Bob", "")], String::new())
    }

    #[test]
    fn cells_by_key_and_index() {
        let t = table();
        assert_eq!(t.keys(), vec!["name", "age"]);
        assert_eq!(t.get_cell(0, "age").map(|s| s.text()), Some("31"));
        assert_eq!(t.get_cell(1, "0").map(|s| s.text()), Some("Bob"));
        assert!(t.get_cell(5, "name").is_none());
        assert!(t.row(9).is_err());
    }

    #[test]
    fn key_value_and_text() {
        let t = table();
        assert_eq!(t.key_value()[0][1], ("age".to_string(), "31".to_string()));
        assert_eq!(t.text(), "Ann | 31\nBob");
        assert_eq!(t.column("name").len(), 2);
    }
}
