//! Paragraph splitting: blank-line separated blocks, each with its lists,
//! images and sentences.

use lazy_regex::regex;

use crate::wikitext::parser::image::parse_images;
use crate::wikitext::parser::list::parse_lists;
use crate::wikitext::parser::sentence::parse_sentences;
use crate::wikitext::types::paragraph::Paragraph;

pub fn parse_paragraph(wiki: &str, domain: &str) -> Paragraph {
    let (text, lists) = parse_lists(wiki);
    let (text, images) = parse_images(&text, domain);
    let sentences = parse_sentences(&text);
    Paragraph::new(sentences, lists, images, wiki.to_string())
}

/// Split section text into paragraphs. Empty paragraphs are dropped.
pub fn parse_paragraphs(wiki: &str, domain: &str) -> Vec<Paragraph> {
    regex!(r"\n[ \t\r]*\n")
        .split(wiki)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| parse_paragraph(chunk, domain))
        .filter(|p| !p.is_empty())
        .collect()
}
