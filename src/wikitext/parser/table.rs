//! Table parsing.
//!
//! `{| ... |}` blocks are found line by line with a stack, so a table nested
//! in a cell becomes a table of its own. Each block is split into rows
//! (`|-`) and cells (`||`, `!!`); spans are expanded, a header row is
//! chosen and every row is keyed by the headers (or `col{N}`).

use std::collections::HashSet;

use lazy_regex::{regex, regex_captures, regex_is_match, regex_replace, regex_replace_all};

use crate::wikitext::config::{COLSPAN_DROP_THRESHOLD, MAX_HEADER_ROWS, TABLE_HEADER_MIN_ROWS};
use crate::wikitext::i18n::TABLE_HEADER_WORDS;
use crate::wikitext::parser::sentence::sentence_from_wiki;
use crate::wikitext::types::fields::{Fields, normalize_key};
use crate::wikitext::types::sentence::Sentence;
use crate::wikitext::types::table::Table;

/// One cell as written, before it becomes a sentence.
#[derive(Debug, Clone, Default, PartialEq)]
struct RawCell {
    wiki: String,
    header: bool,
}

impl RawCell {
    fn new<S: Into<String>>(wiki: S, header: bool) -> Self {
        Self {
            wiki: wiki.into(),
            header,
        }
    }
}

/// Split `wiki` into the text outside tables and the source of each table.
/// A table still open at the end of input is closed there.
pub fn find_tables(wiki: &str) -> (String, Vec<String>) {
    let lines: Vec<&str> = wiki.split('\n').collect();
    let mut consumed = vec![false; lines.len()];
    let mut stack: Vec<Vec<usize>> = Vec::new();
    let mut found: Vec<Vec<usize>> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if is_table_start(line) {
            stack.push(vec![i]);
            consumed[i] = true;
            continue;
        }
        let Some(top) = stack.last_mut() else {
            continue;
        };
        top.push(i);
        consumed[i] = true;
        if line.trim_start().starts_with("|}")
            && let Some(done) = stack.pop()
        {
            found.push(done);
        }
    }
    while let Some(open) = stack.pop() {
        log::debug!("closing unterminated table at end of input");
        found.push(open);
    }

    let tables = found
        .iter()
        .map(|idxs| idxs.iter().map(|&i| lines[i]).collect::<Vec<_>>().join("\n"))
        .collect();
    let rest = lines
        .iter()
        .zip(&consumed)
        .filter(|(_, c)| !**c)
        .map(|(l, _)| *l)
        .collect::<Vec<_>>()
        .join("\n");
    (rest, tables)
}

/// Remove tables from `wiki` and parse them. Tables without rows are
/// dropped.
pub fn parse_tables(wiki: &str) -> (String, Vec<Table>) {
    let (rest, sources) = find_tables(wiki);
    let tables: Vec<Table> = sources
        .into_iter()
        .map(|src| parse_table(&src))
        .filter(|t| !t.is_empty())
        .collect();
    if !tables.is_empty() {
        log::debug!("parsed {} tables", tables.len());
    }
    (rest, tables)
}

fn split_cells(line: &str, header: bool) -> Vec<RawCell> {
    regex!(r"\|\||!!")
        .split(line)
        .map(|c| RawCell::new(c.trim(), header))
        .collect()
}

/// Rows of raw cells; captions dropped.
fn find_rows(src: &str) -> Vec<Vec<RawCell>> {
    let mut lines: Vec<&str> = src.split('\n').collect();
    if lines.first().is_some_and(|l| l.trim_start().starts_with("{|")) {
        lines.remove(0);
    }
    if lines.last().is_some_and(|l| l.trim_start().starts_with("|}")) {
        lines.pop();
    }
    // text wrapped onto the next line belongs to the cell above
    let body = lines.join("\n");
    let body = regex_replace_all!(r"\n(\s*[^|!{\s])", &body, |_, rest: &str| format!(" {}", rest));

    let mut rows = Vec::new();
    let mut row: Vec<RawCell> = Vec::new();
    for line in body.split('\n') {
        let line = line.trim();
        if line.is_empty() || line.starts_with("|+") {
            continue;
        }
        if line.starts_with("|-") {
            if !row.is_empty() {
                rows.push(std::mem::take(&mut row));
            }
            continue;
        }
        if let Some(rest) = line.strip_prefix('!') {
            row.extend(split_cells(rest, true));
        } else if let Some(rest) = line.strip_prefix('|') {
            row.extend(split_cells(rest, false));
        }
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

fn expand_rowspans(rows: &mut [Vec<RawCell>]) {
    for r in 0..rows.len() {
        for c in 0..rows[r].len() {
            let cell = &rows[r][c];
            let Some((whole, n)) = regex_captures!(r#"(?i).*rowspan *= *["']?([0-9]+)["']?[ |]*"#, &cell.wiki) else {
                continue;
            };
            let n: usize = n.parse().unwrap_or(1);
            let copy = RawCell::new(cell.wiki.replacen(whole, "", 1), cell.header);
            rows[r][c] = copy.clone();
            for next in rows.iter_mut().skip(r + 1).take(n.saturating_sub(1)) {
                let at = c.min(next.len());
                next.insert(at, copy.clone());
            }
        }
    }
}

fn expand_colspans(rows: &mut Vec<Vec<RawCell>>) {
    for row in rows.iter_mut() {
        let mut c = 0;
        while c < row.len() {
            let cell = &row[c];
            if let Some((whole, n)) = regex_captures!(r#"(?i).*colspan *= *["']?([0-9]+)["']?[ |]*"#, &cell.wiki) {
                let n: usize = n.parse().unwrap_or(1);
                if n > COLSPAN_DROP_THRESHOLD {
                    log::debug!("dropping row with colspan={}", n);
                    row.clear();
                    break;
                }
                let header = cell.header;
                row[c] = RawCell::new(cell.wiki.replacen(whole, "", 1), header);
                for _ in 1..n {
                    row.insert(c + 1, RawCell::new("", header));
                }
                c += n.max(1);
                continue;
            }
            c += 1;
        }
    }
    rows.retain(|r| !r.is_empty());
}

/// Cell text without presentation attributes.
fn clean_text(text: &str) -> String {
    let text = if text.contains('|') {
        regex_replace!(r"^.*?\| ?", text, |_| "").into_owned()
    } else {
        text.to_string()
    };
    let text = regex_replace!(r#"style=['"].*?['"]"#, &text, |_| "");
    text.trim().trim_start_matches('!').trim().to_string()
}

fn cell_sentence(cell: &RawCell) -> Sentence {
    let mut s = sentence_from_wiki(&cell.wiki);
    let text = clean_text(s.text());
    s.set_text(text);
    s
}

fn cell_text(cell: &RawCell) -> String {
    cell_sentence(cell).text().to_string()
}

/// Explicit `!` header rows, up to two; the second fills in over the first.
fn explicit_headers(rows: &mut Vec<Vec<RawCell>>) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for n in 0..MAX_HEADER_ROWS {
        let Some(first) = rows.first() else {
            break;
        };
        if first.len() < 2 {
            break;
        }
        let is_header = if n == 0 {
            first[0].header || first[1].header
        } else {
            first[0].header && first[1].header
        };
        if !is_header {
            break;
        }
        for (i, cell) in first.iter().enumerate() {
            let text = cell_text(cell);
            if i >= headers.len() {
                headers.resize(i + 1, String::new());
            }
            if n == 0 || !text.is_empty() {
                headers[i] = text;
            }
        }
        rows.remove(0);
    }
    headers
}

/// First row as headers, when it contains a common header word.
fn first_row_headers(rows: &[Vec<RawCell>]) -> Vec<String> {
    if rows.len() <= TABLE_HEADER_MIN_ROWS {
        return Vec::new();
    }
    let headers: Vec<String> = rows[0].iter().map(|c| cell_text(c).to_lowercase()).collect();
    if headers.iter().any(|h| TABLE_HEADER_WORDS.contains(&h.as_str())) {
        headers
    } else {
        Vec::new()
    }
}

fn find_headers(rows: &mut Vec<Vec<RawCell>>) -> Vec<String> {
    let headers = explicit_headers(rows);
    if headers.len() > 1 {
        return headers;
    }
    let headers = first_row_headers(rows);
    if headers.len() > 1 {
        rows.remove(0);
        return headers;
    }
    // a title row above the real header row
    let long_tail = rows.last().is_some_and(|r| r.len() > 2);
    if long_tail && rows.len() > 1 {
        let headers = first_row_headers(&rows[1..]);
        if headers.len() > 1 {
            rows.drain(..2);
            return headers;
        }
    }
    Vec::new()
}

/// Unique column keys for `width` columns.
fn column_keys(headers: &[String], width: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    (0..width)
        .map(|i| {
            let key = headers
                .get(i)
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
                .filter(|h| !seen.contains(&normalize_key(h)))
                .unwrap_or_else(|| {
                    let mut key = format!("col{}", i + 1);
                    let mut n = 2;
                    while seen.contains(&normalize_key(&key)) {
                        key = format!("col{}-{}", i + 1, n);
                        n += 1;
                    }
                    key
                });
            seen.insert(normalize_key(&key));
            key
        })
        .collect()
}

/// Parse one `{| ... |}` block.
pub fn parse_table(src: &str) -> Table {
    let mut rows = find_rows(src);
    expand_rowspans(&mut rows);
    expand_colspans(&mut rows);
    let headers = find_headers(&mut rows);

    let width = rows
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(0)
        .max(if rows.is_empty() { 0 } else { headers.len() });
    let keys = column_keys(&headers, width);

    let rows: Vec<Fields> = rows
        .iter()
        .map(|row| {
            keys.iter()
                .enumerate()
                .map(|(i, key)| {
                    let value = row.get(i).map(cell_sentence).unwrap_or_else(|| Sentence::plain(""));
                    (key.clone(), value)
                })
                .collect()
        })
        .collect();
    Table::new(rows, src.to_string())
}

/// Whether a line opens a table.
pub fn is_table_start(line: &str) -> bool {
    regex_is_match!(r"^\s*\{\|", line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(t: &Table, row: usize) -> Vec<(String, String)> {
        t.rows()[row]
            .iter()
            .map(|(k, v)| (k.to_string(), v.text().to_string()))
            .collect()
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn header_row_keys() {
        let t = parse_table("{|\n! A !! B\n|-\n| 1 || 2\n|}");
        assert_eq!(t.len(), 1);
        assert_eq!(texts(&t, 0), pairs(&[("A", "1"), ("B", "2")]));
    }

    #[test]
    fn unheadered_columns_are_numbered() {
        let t = parse_table("{| class=\"wikitable\"\n|+ Caption\n|-\n| x || y\n|-\n| z\n|}");
        assert_eq!(t.len(), 2);
        assert_eq!(t.keys(), vec!["col1", "col2"]);
        assert_eq!(t.get_cell(1, "col2").map(|s| s.text()), Some(""));
    }

    #[test]
    fn rowspan_copies_down() {
        let t = parse_table("{|\n! A !! B\n|-\n| rowspan=\"2\" | x || 1\n|-\n| 2\n|}");
        assert_eq!(texts(&t, 0), pairs(&[("A", "x"), ("B", "1")]));
        assert_eq!(texts(&t, 1), pairs(&[("A", "x"), ("B", "2")]));
    }

    #[test]
    fn colspan_inserts_and_drops() {
        let t = parse_table(
            "{|\n! A !! B !! C\n|-\n| colspan=2 | wide || c\n|-\n| colspan=\"5\" | banner\n|-\n| 1 || 2 || 3\n|}",
        );
        assert_eq!(t.len(), 2);
        assert_eq!(texts(&t, 0), pairs(&[("A", "wide"), ("B", ""), ("C", "c")]));
    }

    #[test]
    fn header_word_heuristic() {
        let src = "{|\n| Name || Year\n|-\n| a || 1\n|-\n| b || 2\n|-\n| c || 3\n|}";
        let t = parse_table(src);
        assert_eq!(t.keys(), vec!["name", "year"]);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn nested_tables_are_separate() {
        let src = "before\n{|\n| outer\n|-\n|\n{|\n| inner\n|}\n|}\nafter";
        let (rest, tables) = find_tables(src);
        assert_eq!(rest, "before\nafter");
        assert_eq!(tables.len(), 2);
        assert!(tables[0].contains("inner"));
        assert!(!tables[1].contains("inner"));
    }

    #[test]
    fn cells_keep_links() {
        let t = parse_table("{|\n! City !! Country\n|-\n| [[Paris]] || style=\"x\" | [[France|FR]]\n|}");
        let row = t.row(0).expect("row");
        assert_eq!(row.get("country").map(|s| s.text()), Some("FR"));
        assert_eq!(t.links().len(), 2);
    }

    #[test]
    fn unterminated_table_is_closed() {
        let (rest, tables) = parse_tables("text\n{|\n| a || b");
        assert_eq!(rest, "text");
        assert_eq!(tables.len(), 1);
        assert!(is_table_start(" {| class=x"));
    }
}
