//! Section splitting and the per-section pipeline.
//!
//! A page is cut at heading lines (`== Title ==`). Each section's text then
//! goes through galleries, references, templates, tables and finally
//! paragraphs, each pass removing what it recognised.

use lazy_regex::regex;

use crate::wikitext::i18n::is_reference_title;
use crate::wikitext::parser::image::parse_galleries;
use crate::wikitext::parser::paragraph::parse_paragraphs;
use crate::wikitext::parser::reference::{parse_references, strip_references};
use crate::wikitext::parser::sentence::sentence_from_wiki;
use crate::wikitext::parser::table::parse_tables;
use crate::wikitext::parser::template::{TemplateContext, TemplateRegistry, resolve_templates};
use crate::wikitext::scanner::find_flat;
use crate::wikitext::types::section::Section;

/// A section before its body is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSection {
    pub title: String,
    pub depth: usize,
    pub body: String,
}

/// Everything a section pass needs besides the text.
#[derive(Debug, Clone, Copy)]
pub struct SectionPipeline<'a> {
    pub registry: &'a TemplateRegistry,
    pub ctx: TemplateContext,
    pub domain: &'a str,
}

/// Heading text without references or templates, as plain text.
pub fn heading_title(raw: &str) -> String {
    let mut text = strip_references(raw);
    let spans = find_flat(&text, '{', '}');
    for span in spans {
        text = text.replacen(&span.raw, "", 1);
    }
    sentence_from_wiki(&text).text().trim().to_string()
}

/// Cut `wiki` at heading lines. The text before the first heading is the
/// lead, with an empty title and depth 0.
///
/// Depth is the number of `=` minus two, so `==` headings are depth 0. When
/// the two sides differ the smaller count wins.
pub fn split_sections(wiki: &str) -> Vec<RawSection> {
    let heading = regex!(r"(?m)^(={1,5})([^\n]{1,200}?)(={1,5})[ \t]*$");
    let mut out = Vec::new();
    let mut title = String::new();
    let mut depth = 0;
    let mut last = 0;
    for caps in heading.captures_iter(wiki) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push(RawSection {
            title: std::mem::take(&mut title),
            depth,
            body: wiki[last..whole.start()].to_string(),
        });
        let marks = caps[1].len().min(caps[3].len());
        depth = marks.saturating_sub(2);
        title = heading_title(&caps[2]);
        last = whole.end();
    }
    out.push(RawSection {
        title,
        depth,
        body: wiki[last..].to_string(),
    });
    out
}

impl SectionPipeline<'_> {
    /// Run the section passes over one section body.
    pub fn parse(&self, raw: &RawSection) -> Section {
        let wiki = raw.body.as_str();
        let (wiki, gallery, gallery_records) = parse_galleries(wiki, self.domain);
        let (wiki, mut references) = parse_references(&wiki, self.registry, &self.ctx);
        let resolved = resolve_templates(&wiki, self.registry, &self.ctx);
        references.extend(resolved.references);
        let mut templates = gallery_records;
        templates.extend(resolved.templates);
        let (wiki, tables) = parse_tables(&resolved.wiki);
        let paragraphs = parse_paragraphs(&wiki, self.domain);

        Section {
            title: raw.title.clone(),
            depth: raw.depth,
            index: 0,
            paragraphs,
            tables,
            templates,
            infoboxes: resolved.infoboxes,
            references,
            images: gallery,
            wiki: raw.body.clone(),
        }
    }
}

/// Drop empty reference sections and an empty lead, then number the rest.
/// A section nested right under a dropped one moves up a level.
pub fn prune_sections(sections: Vec<Section>) -> Vec<Section> {
    let mut out: Vec<Section> = Vec::with_capacity(sections.len());
    let mut promote_from: Option<usize> = None;
    for (i, mut section) in sections.into_iter().enumerate() {
        if let Some(depth) = promote_from.take()
            && section.depth > depth
        {
            section.depth -= 1;
        }
        let empty_lead = i == 0 && section.title.is_empty();
        if section.is_empty() && (empty_lead || is_reference_title(&section.title)) {
            log::debug!("pruning empty section '{}'", section.title);
            promote_from = Some(section.depth);
            continue;
        }
        out.push(section);
    }
    for (i, section) in out.iter_mut().enumerate() {
        section.index = i;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn pipeline(reg: &TemplateRegistry) -> SectionPipeline<'_> {
        SectionPipeline {
            registry: reg,
            ctx: TemplateContext {
                today: NaiveDate::from_ymd_opt(2024, 1, 15).expect("date"),
            },
            domain: "en.wikipedia.org",
        }
    }

    #[test]
    fn splits_headings() {
        let raw = split_sections("Lead text.\n== History ==\nOld.\n=== Early ===\nOlder.\n==Geography==\nFlat.");
        let titles: Vec<(&str, usize)> = raw.iter().map(|r| (r.title.as_str(), r.depth)).collect();
        assert_eq!(
            titles,
            vec![("", 0), ("History", 0), ("Early", 1), ("Geography", 0)]
        );
        assert_eq!(raw[1].body.trim(), "Old.");
    }

    #[test]
    fn uneven_heading_marks() {
        let raw = split_sections("=== Odd ==\nx");
        assert_eq!(raw[1].title, "Odd");
        assert_eq!(raw[1].depth, 0);
    }

    #[test]
    fn heading_markup_is_stripped() {
        assert_eq!(heading_title(" [[Toronto|The city]]{{anchor|x}}<ref>r</ref> "), "The city");
    }

    #[test]
    fn pipeline_order() {
        let reg = TemplateRegistry::builtin();
        let raw = RawSection {
            title: "History".into(),
            depth: 0,
            body: "{{Infobox city|name=Springfield|population=1000}}\nFounded in 1834.<ref>{{cite book|title=Past}}</ref>\n{|\n! A !! B\n|-\n| 1 || 2\n|}\n\nSecond paragraph."
                .into(),
        };
        let s = pipeline(&reg).parse(&raw);
        assert_eq!(s.infoboxes().len(), 1);
        assert_eq!(s.references().len(), 1);
        assert_eq!(s.references()[0].kind(), "book");
        assert_eq!(s.tables().len(), 1);
        assert_eq!(s.paragraphs().len(), 2);
        assert_eq!(s.paragraphs()[0].text(), "Founded in 1834.");
    }

    #[test]
    fn empty_reference_sections_are_pruned() {
        let mk = |title: &str, depth: usize, text: bool| {
            let reg = TemplateRegistry::builtin();
            let body = if text { "Some words here." } else { "{{reflist}}" };
            pipeline(&reg).parse(&RawSection {
                title: title.into(),
                depth,
                body: body.into(),
            })
        };
        let sections = vec![
            mk("", 0, false),
            mk("History", 0, true),
            mk("References", 0, false),
            mk("Web", 1, true),
        ];
        let out = prune_sections(sections);
        let titles: Vec<(&str, usize, usize)> =
            out.iter().map(|s| (s.title(), s.depth(), s.index())).collect();
        assert_eq!(titles, vec![("History", 0, 0), ("Web", 0, 1)]);
    }
}
