//! `<ref>` extraction.
//!
//! Three passes, in order: plain `<ref>...</ref>`, self-closing
//! `<ref name="x"/>` (which only points at another reference and is
//! dropped), then `<ref name="x">...</ref>`. Remaining tag soup is stripped
//! at the end.

use lazy_regex::{regex, regex_is_match, regex_replace_all};
use regex::Captures;

use crate::wikitext::parser::sentence::sentence_from_wiki;
use crate::wikitext::parser::template::tokenizer::tokenize;
use crate::wikitext::parser::template::{
    TemplateContext, TemplateRegistry, record_fields, render_children,
};
use crate::wikitext::scanner::{find_flat, find_templates};
use crate::wikitext::types::templates::Reference;

/// A whole `{{cite ...}}` or `{{citation ...}}` body.
fn has_citation(content: &str) -> bool {
    regex_is_match!(r"(?i)^\s*\{\{\s*(?:cite|citation)", content)
        && regex_is_match!(r"\}\}\s*$", content)
        && !regex_is_match!(r"(?i)citation needed", content)
}

/// Nested templates are rendered before the citation is tokenized, so
/// `date={{date|2020|3|10}}` reads `March 10, 2020`.
fn citation(content: &str, registry: &TemplateRegistry, ctx: &TemplateContext) -> Option<Reference> {
    let span = find_templates(content).into_iter().next()?;
    let body = render_children(&span, registry, ctx, &mut Vec::new());
    let tpl = tokenize(&body, &[]);
    let kind = tpl
        .name()
        .strip_prefix("cite ")
        .map(|k| k.trim().to_string())
        .unwrap_or_else(|| "citation".to_string());
    Some(Reference::from_fields(kind, record_fields(&tpl), content.to_string()))
}

fn inline(content: &str) -> Option<Reference> {
    let mut text = content.to_string();
    for span in find_flat(content, '{', '}') {
        text = text.replacen(&span.raw, "", 1);
    }
    let sentence = sentence_from_wiki(&text);
    if sentence.is_empty() {
        return None;
    }
    Some(Reference::inline(sentence, content.to_string()))
}

fn parse_content(
    content: &str,
    registry: &TemplateRegistry,
    ctx: &TemplateContext,
    out: &mut Vec<Reference>,
) {
    let parsed = if has_citation(content) {
        citation(content, registry, ctx)
    } else {
        inline(content)
    };
    out.extend(parsed);
}

/// Run the three `<ref>` passes, handing each body to `on_content`, then
/// strip leftover tags. Bodies over 1800 characters and attributes over 200
/// are not taken as references.
fn take_refs<F: FnMut(&str)>(wiki: &str, mut on_content: F) -> String {
    let plain = regex!(r"(?i) ?<ref>((?s:.){0,1800}?)</ref> ?");
    let wiki = plain.replace_all(wiki, |caps: &Captures| {
        on_content(&caps[1]);
        " "
    });

    let wiki = regex_replace_all!(r#"(?i) ?<ref [^>]{0,200}?/> ?"#, &wiki, |_| " ");

    let named = regex!(r"(?i) ?<ref [^>]{0,200}>((?s:.){0,1800}?)</ref> ?");
    let wiki = named.replace_all(&wiki, |caps: &Captures| {
        on_content(&caps[1]);
        " "
    });

    regex_replace_all!(r#" ?<[ /]?[a-z0-9]{1,8}[a-z0-9=" ]{2,20}[ /]?> ?"#, &wiki, |_| " ")
        .into_owned()
}

/// Remove references from `wiki`, returning the cleaned text and the
/// references in document order of each pass.
pub fn parse_references(
    wiki: &str,
    registry: &TemplateRegistry,
    ctx: &TemplateContext,
) -> (String, Vec<Reference>) {
    let mut refs = Vec::new();
    let wiki = take_refs(wiki, |content| parse_content(content, registry, ctx, &mut refs));
    if !refs.is_empty() {
        log::debug!("found {} references", refs.len());
    }
    (wiki, refs)
}

/// Remove references from `wiki` without parsing them.
pub fn strip_references(wiki: &str) -> String {
    take_refs(wiki, |_| {})
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parse_references(wiki: &str) -> (String, Vec<Reference>) {
        let ctx = TemplateContext {
            today: NaiveDate::from_ymd_opt(2024, 1, 15).expect("date"),
        };
        super::parse_references(wiki, &TemplateRegistry::builtin(), &ctx)
    }

    #[test]
    fn structured_citation() {
        let (wiki, refs) = parse_references(
            "Toronto is big.<ref>{{cite web|url=https://example.org|title=Big city}}</ref> Next.",
        );
        assert_eq!(wiki, "Toronto is big. Next.");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].kind(), "web");
        assert_eq!(refs[0].title(), Some("Big city"));
        assert_eq!(refs[0].url(), Some("https://example.org"));
    }

    #[test]
    fn named_and_self_closing() {
        let (wiki, refs) = parse_references(
            r#"One.<ref name="a">Smith, ''Book'', p. 4.</ref> Two.<ref name="a" /> Three."#,
        );
        assert_eq!(wiki, "One. Two. Three.");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].kind(), "inline");
        assert_eq!(refs[0].text(), "Smith, Book, p. 4.");
    }

    #[test]
    fn citation_needed_is_not_a_citation() {
        assert!(!has_citation("{{citation needed|date=May 2020}}"));
        assert!(has_citation(" {{Citation |title=X}} "));
    }

    #[test]
    fn tag_soup_is_stripped() {
        let (wiki, refs) = parse_references("a<span class=\"x\">b</span>");
        assert!(refs.is_empty());
        assert!(!wiki.contains("<span"));
    }

    #[test]
    fn nested_templates_in_citation_are_rendered() {
        let (_, refs) = parse_references(
            "Growth.<ref>{{cite web|title=Report|date={{date|2020|3|10}}|url=https://example.org}}</ref>",
        );
        assert_eq!(refs.len(), 1);
        let date = refs[0].get("date").expect("date field");
        assert_eq!(date.text(), "March 10, 2020");
        assert!(date.date().is_some());
    }

    #[test]
    fn oversized_body_is_not_a_reference() {
        let body = "word ".repeat(400);
        let (wiki, refs) = parse_references(&format!("Text.<ref>{}</ref>", body));
        assert!(refs.is_empty());
        assert!(wiki.contains("word word"));
        assert!(!wiki.contains("<ref>"));

        let body = "word ".repeat(300);
        let (_, refs) = parse_references(&format!("Text.<ref>{}</ref>", body));
        assert_eq!(refs.len(), 1);
    }

    #[test]
    fn oversized_attributes_are_not_a_reference() {
        let name = "a".repeat(250);
        let (_, refs) = parse_references(&format!("Text.<ref name=\"{}\">Body text.</ref>", name));
        assert!(refs.is_empty());
    }

    #[test]
    fn strip_keeps_text_only() {
        assert_eq!(strip_references("Title<ref>{{cite web|title=X}}</ref>"), "Title ");
    }
}
