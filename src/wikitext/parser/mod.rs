//! The page parser: turns one page of wikitext into a [`Document`].
//!
//! Each pass lives in its own module and works the same way: it takes the
//! remaining text, pulls out what it recognises, and hands back the rest.

pub mod formatting;
pub mod image;
pub mod links;
pub mod list;
pub mod page;
pub mod paragraph;
pub mod reference;
pub mod section;
pub mod sentence;
pub mod table;
pub mod template;

use std::borrow::Cow;

use lazy_regex::Lazy;

use crate::wikitext::config::ParseOptions;
use crate::wikitext::enums::DocumentType;
use crate::wikitext::parser::page::{
    extract_categories, is_disambiguation, parse_redirect, preprocess,
};
use crate::wikitext::parser::section::{SectionPipeline, prune_sections, split_sections};
use crate::wikitext::parser::template::{TemplateContext, TemplateRegistry};
use crate::wikitext::types::document::Document;

static BUILTIN: Lazy<TemplateRegistry> = Lazy::new(TemplateRegistry::builtin);

/// A reusable parser holding options and a template registry.
///
/// ```
/// use wikimodel::{ParseOptions, Parser};
/// let parser = Parser::new(ParseOptions::titled("Paris"));
/// let doc = parser.parse("'''Paris''' is the capital of [[France]].");
/// assert_eq!(doc.links().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Parser<'r> {
    options: ParseOptions,
    registry: Cow<'r, TemplateRegistry>,
}

impl Parser<'static> {
    /// A parser using the built-in template handlers.
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            registry: Cow::Borrowed(&*BUILTIN),
        }
    }
}

impl<'r> Parser<'r> {
    /// A parser using a caller supplied registry.
    pub fn with_registry(options: ParseOptions, registry: &'r TemplateRegistry) -> Self {
        Self {
            options,
            registry: Cow::Borrowed(registry),
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// The registry, for adding handlers before parsing.
    pub fn registry_mut(&mut self) -> &mut TemplateRegistry {
        self.registry.to_mut()
    }

    /// Parse one page. Never fails: malformed markup is repaired or dropped.
    pub fn parse(&self, markup: &str) -> Document {
        let opts = &self.options;
        let title = opts.title.clone();

        if let Some(target) = parse_redirect(markup) {
            let (_, categories) = extract_categories(markup);
            log::debug!("page is a redirect to '{}'", target.page);
            return Document::redirect(title, opts.page_id, target, categories, markup.to_string());
        }

        let kind = if is_disambiguation(markup, title.as_deref()) {
            DocumentType::Disambiguation
        } else {
            DocumentType::Article
        };

        let wiki = preprocess(markup);
        let (wiki, categories) = extract_categories(&wiki);

        let pipeline = SectionPipeline {
            registry: &self.registry,
            ctx: TemplateContext { today: opts.today },
            domain: &opts.domain,
        };
        let raw = split_sections(&wiki);
        let sections = prune_sections(raw.iter().map(|r| pipeline.parse(r)).collect());
        log::debug!(
            "parsed {} sections ({} found), {} categories",
            sections.len(),
            raw.len(),
            categories.len()
        );

        let mut doc = Document::article(
            title,
            opts.page_id,
            kind,
            sections,
            categories,
            markup.to_string(),
        );
        if doc.title().is_none() {
            let inferred = doc
                .sentences()
                .first()
                .and_then(|s| s.bolds().first().cloned());
            if let Some(inferred) = inferred {
                log::trace!("inferred title '{}'", inferred);
                doc.set_title(inferred);
            }
        }
        doc
    }
}

/// Parse `markup` with the built-in template handlers.
pub fn parse(markup: &str, options: &ParseOptions) -> Document {
    Parser::new(options.clone()).parse(markup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wikitext::parser::template::Rendered;
    use crate::wikitext::types::templates::Template;

    fn opts() -> ParseOptions {
        ParseOptions::default()
    }

    #[test]
    fn redirect_short_circuits() {
        let doc = parse("#REDIRECT [[Toronto]]\n[[Category:Redirects]]", &opts());
        assert!(doc.is_redirect());
        assert!(doc.sections().is_empty());
        assert_eq!(doc.redirect_to().map(|r| r.page.as_str()), Some("Toronto"));
        assert_eq!(doc.categories(), &["Redirects".to_string()]);
    }

    #[test]
    fn article_sections_and_categories() {
        let doc = parse(
            "'''Springfield''' is a town.\n== History ==\nFounded in 1834.\n[[Category:Towns]]",
            &opts(),
        );
        assert_eq!(doc.kind(), DocumentType::Article);
        assert_eq!(doc.sections().len(), 2);
        assert_eq!(doc.sections()[1].title(), "History");
        assert_eq!(doc.categories(), &["Towns".to_string()]);
        assert_eq!(doc.title(), Some("Springfield"));
    }

    #[test]
    fn explicit_title_wins() {
        let doc = parse("'''Bold''' words.", &ParseOptions::titled("Given"));
        assert_eq!(doc.title(), Some("Given"));
    }

    #[test]
    fn disambiguation_pages() {
        let doc = parse("'''Mercury''' may refer to:\n* [[Mercury (planet)]]\n* [[Mercury (element)]]\n{{disambiguation}}", &opts());
        assert!(doc.is_disambiguation());
    }

    #[test]
    fn empty_input() {
        let doc = parse("", &opts());
        assert!(doc.sections().is_empty());
        assert!(!doc.is_redirect());
    }

    #[test]
    fn custom_registry() {
        fn shout(tpl: &Template, _ctx: &TemplateContext) -> Rendered {
            Rendered::text(tpl.get("word").unwrap_or_default().to_uppercase())
        }
        let mut parser = Parser::new(opts());
        parser.registry_mut().register("shout", &["word"], shout);
        let doc = parser.parse("We say {{shout|hello}} loudly.");
        assert_eq!(doc.text(), "We say HELLO loudly.");
    }
}
