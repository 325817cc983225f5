//! List parsing: runs of two or more lines starting with `#`, `*`, `:`,
//! `;` or `|`.

use lazy_regex::{regex_is_match, regex_replace};

use crate::wikitext::enums::ListType;
use crate::wikitext::parser::sentence::sentence_from_wiki;
use crate::wikitext::types::list::List;
use crate::wikitext::types::sentence::Sentence;

fn is_list_line(line: &str) -> bool {
    regex_is_match!(r"^[#*:;|]+", line)
}

fn has_word_char(line: &str) -> bool {
    regex_is_match!(r"(?i)[\p{L}_0-9\]}]", line)
}

/// Numbered items become `N) text`; other markers are stripped. Numbering
/// restarts after any non-numbered line.
fn list_items(lines: &[&str]) -> Vec<Sentence> {
    let mut number = 1;
    lines
        .iter()
        .filter(|l| has_word_char(l))
        .map(|&line| {
            let text = if line.trim_start().starts_with('#') {
                let text = regex_replace!(r"^ ?#+\s*", line, |_| "");
                let out = format!("{}) {}", number, text);
                number += 1;
                out
            } else {
                number = 1;
                regex_replace!(r"^[#*:;|]+\s*", line, |_| "").into_owned()
            };
            sentence_from_wiki(&text)
        })
        .filter(|s| !s.is_empty())
        .collect()
}

/// Pull lists out of `wiki`. Returns the remaining text and the lists.
pub fn parse_lists(wiki: &str) -> (String, Vec<List>) {
    let lines: Vec<&str> = wiki.split('\n').collect();
    let mut rest: Vec<&str> = Vec::new();
    let mut lists = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let run = lines[i..].iter().take_while(|l| is_list_line(l)).count();
        if run < 2 {
            rest.push(lines[i]);
            i += 1;
            continue;
        }
        let block = &lines[i..i + run];
        let items = list_items(block);
        if !items.is_empty() {
            lists.push(List::new(ListType::from_marker(block[0]), items, block.join("\n")));
        }
        i += run;
    }
    (rest.join("\n"), lists)
}
