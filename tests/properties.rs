use proptest::prelude::*;

use wikimodel::wikitext::parser::links::extract_links;
use wikimodel::wikitext::parser::sentence::split_sentences;
use wikimodel::wikitext::parser::table::parse_table;
use wikimodel::wikitext::scanner::find_flat;
use wikimodel::{ParseOptions, parse};

fn strip_ws(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

fn table_markup(rows: &[Vec<String>], rowspan_at: Option<usize>) -> String {
    let mut out = String::from("{|\n");
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            out.push_str("|-\n");
        }
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(j, c)| {
                if rowspan_at == Some(i) && j == 0 {
                    format!("rowspan=\"2\" | {}", c)
                } else {
                    c.clone()
                }
            })
            .collect();
        out.push_str("| ");
        out.push_str(&cells.join(" || "));
        out.push('\n');
    }
    out.push_str("|}");
    out
}

proptest! {
    #[test]
    fn scanner_spans_are_balanced_and_ordered(text in "[a-z{} |]{0,60}") {
        let spans = find_flat(&text, '{', '}');
        let mut pos = 0usize;
        for span in &spans {
            prop_assert!(span.body.starts_with("{{"));
            let opens = span.body.matches('{').count();
            let closes = span.body.matches('}').count();
            prop_assert_eq!(opens, closes);
            let found = text[pos..].find(&span.raw);
            prop_assert!(found.is_some());
            pos += found.unwrap_or_default() + span.raw.len();
        }
    }

    #[test]
    fn text_without_links_is_unchanged(text in "[A-Za-z0-9 ,.;']{0,80}") {
        let (out, links) = extract_links(&text);
        prop_assert!(links.is_empty());
        prop_assert_eq!(out, text);
    }

    #[test]
    fn sentences_cover_the_text(text in "[A-Za-z .!?\"]{0,120}") {
        let joined = split_sentences(&text).concat();
        prop_assert_eq!(strip_ws(&joined), strip_ws(&text));
    }

    #[test]
    fn table_rows_share_columns(
        rows in prop::collection::vec(prop::collection::vec("[a-z]{1,6}", 1..5), 1..6),
        span in prop::option::of(0usize..4),
    ) {
        let table = parse_table(&table_markup(&rows, span));
        if let Some(first) = table.rows().first() {
            for row in table.rows() {
                prop_assert_eq!(row.len(), first.len());
            }
        }
    }

    #[test]
    fn redirects_have_no_sections(page in "[A-Z][a-z]{1,12}( [a-z]{1,8})?", tail in "[a-z .\n]{0,40}") {
        let doc = parse(&format!("#REDIRECT [[{}]]\n{}", page, tail), &ParseOptions::default());
        prop_assert!(doc.is_redirect());
        prop_assert!(doc.sections().is_empty());
        prop_assert_eq!(doc.redirect_to().map(|r| r.page.clone()), Some(page));
    }

    #[test]
    fn parse_never_panics(markup in "[a-zA-Z0-9 \n{}\\[\\]|=!'#*:;<>/.é]{0,200}") {
        let doc = parse(&markup, &ParseOptions::default());
        prop_assert!(doc.is_redirect() || doc.redirect_to().is_none());
    }
}
