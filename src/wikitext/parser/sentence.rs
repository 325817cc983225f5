//! Sentence segmentation and sentence construction.
//!
//! Splitting is heuristic: a naive split at `.`, `!` or `?` followed by
//! whitespace, then pieces that do not look like a complete sentence are
//! merged forward. A piece is incomplete when it ends in a known
//! abbreviation, a single-capital initial, an ellipsis or `c.`, has no word
//! in it, or leaves a link, quote or parenthesis open.

use chrono::NaiveDate;
use lazy_regex::{regex, regex_captures, regex_is_match, regex_replace_all};

use crate::wikitext::i18n::ABBREVIATIONS;
use crate::wikitext::parser::formatting::extract_formatting;
use crate::wikitext::parser::links::extract_links;
use crate::wikitext::types::sentence::Sentence;

/// Two letters in a row.
fn has_word(s: &str) -> bool {
    regex_is_match!(r"\p{L}\p{L}", s)
}

fn ends_with_abbreviation(s: &str) -> bool {
    match regex_captures!(r"(?:^|[ '(])([\p{L}.]+?)[.!?]\s*$", s) {
        Some((_, word)) => ABBREVIATIONS.contains(word.to_lowercase().as_str()),
        None => false,
    }
}

fn is_balanced(s: &str) -> bool {
    let len = s.chars().count();
    if s.matches("[[").count() > s.matches("]]").count() {
        return false;
    }
    if len < 900 && s.matches('"').count() % 2 != 0 {
        return false;
    }
    if len < 600 && s.matches('(').count() != s.matches(')').count() {
        return false;
    }
    true
}

/// Whether a naive piece can stand on its own.
fn is_sentence(s: &str) -> bool {
    if ends_with_abbreviation(s) {
        return false;
    }
    // initials like "J. " or "U.S. Army" pieces
    if regex_is_match!(r"(?:^|[ .'])[A-Z]\.\s*$", s) {
        return false;
    }
    if regex_is_match!(r"\.{3,}\s+$", s) {
        return false;
    }
    if regex_is_match!(r"(?i)(?:^| )c\.\s$", s) {
        return false;
    }
    has_word(s) && is_balanced(s)
}

/// Naive split: each line, then each `... [.!?] ` run, keeping the text
/// between matches.
fn naive_split(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    for line in text.split('\n').filter(|l| !l.trim().is_empty()) {
        let mut last = 0;
        for m in regex!(r#"\S.+?[.!?]"?\s"#).find_iter(line) {
            if m.start() > last {
                out.push(line[last..m.start()].to_string());
            }
            out.push(m.as_str().to_string());
            last = m.end();
        }
        if last < line.len() {
            out.push(line[last..].to_string());
        }
    }
    out
}

/// Split `text` into sentence strings. Concatenating the result (modulo
/// whitespace) gives back the input. Returns `[text]` when no sentence
/// boundary is found, and nothing for blank input.
pub fn split_sentences(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    // pieces without a word glue onto a neighbour
    let pieces = naive_split(text);
    let mut chunks: Vec<String> = Vec::new();
    let mut pending = String::new();
    for piece in pieces {
        if has_word(&piece) {
            let mut chunk = std::mem::take(&mut pending);
            chunk.push_str(&piece);
            chunks.push(chunk);
        } else if let Some(prev) = chunks.last_mut() {
            prev.push_str(&piece);
        } else {
            pending.push_str(&piece);
        }
    }
    if !pending.is_empty() {
        chunks.push(pending);
    }

    // incomplete chunks merge into the next one
    let mut sentences = Vec::new();
    let mut carry = String::new();
    for chunk in chunks {
        carry.push_str(&chunk);
        if is_sentence(&carry) {
            sentences.push(std::mem::take(&mut carry));
        }
    }
    if !carry.is_empty() {
        match sentences.last_mut() {
            Some(last) if !has_word(&carry) => last.push_str(&carry),
            _ => sentences.push(carry),
        }
    }

    if sentences.is_empty() {
        return vec![text.to_string()];
    }
    sentences
}

/// Tidy resolved text: drop empty parentheses and fix spacing.
fn postprocess(text: &str) -> String {
    let text = regex_replace_all!(r"\([,;: ]+", text, |_| "(");
    let text = regex_replace_all!(r"\( *(?:; ?)?\)", &text, |_| "");
    let text = regex_replace_all!(r" +\.$", &text, |_| ".");
    let text = regex_replace_all!(r" {2,}", &text, |_| " ");
    text.trim().to_string()
}

/// Build one sentence from markup: resolve links, tidy, then strip
/// emphasis.
pub fn sentence_from_wiki(wiki: &str) -> Sentence {
    let (text, links) = extract_links(wiki);
    let text = postprocess(&text);
    let (text, formatting) = extract_formatting(&text);
    Sentence::new(text, links, formatting, wiki.to_string())
}

/// Build a sentence for a template or infobox value; a value that is a
/// whole date also gets its calendar date.
pub fn value_sentence(wiki: &str) -> Sentence {
    let sentence = sentence_from_wiki(wiki);
    let date = detect_date(sentence.text());
    sentence.with_date(date)
}

/// `1950-03-10`, `March 10, 1950` or `10 March 1950`.
pub fn detect_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.len() < 8 || text.len() > 30 {
        return None;
    }
    ["%Y-%m-%d", "%B %d, %Y", "%d %B %Y", "%b %d, %Y", "%d %b %Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Split and build the sentences of a paragraph. A leading sentence that
/// starts with `:` is an indented hatnote and is dropped.
pub fn parse_sentences(wiki: &str) -> Vec<Sentence> {
    let mut sentences: Vec<Sentence> = split_sentences(wiki)
        .iter()
        .map(|s| sentence_from_wiki(s))
        .filter(|s| !s.is_empty())
        .collect();
    if sentences.first().is_some_and(|s| s.text().starts_with(':')) {
        log::debug!("dropping hatnote sentence");
        sentences.remove(0);
    }
    sentences
}
