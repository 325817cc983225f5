//! `WikiText`: page markup that is parsed on first use and cached.
//!
//! Handy when a caller holds many pages but only looks inside a few of them.

use std::cell::OnceCell;

use crate::wikitext::config::ParseOptions;
use crate::wikitext::parser::parse;
use crate::wikitext::types::document::Document;

#[derive(Debug, Clone)]
pub struct WikiText {
    text: String,
    options: ParseOptions,
    parsed: OnceCell<Document>,
}

impl WikiText {
    /// Wrap `input`. Nothing is parsed until the document is asked for.
    pub fn new<S: Into<String>>(input: S) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    pub fn with_options<S: Into<String>>(input: S, options: ParseOptions) -> Self {
        Self {
            text: input.into(),
            options,
            parsed: OnceCell::new(),
        }
    }

    /// The parsed document, parsing on first access.
    pub fn get_parsed(&self) -> &Document {
        self.parsed.get_or_init(|| {
            log::trace!("parsing {} bytes of wikitext", self.text.len());
            parse(&self.text, &self.options)
        })
    }

    /// Mutable access to the cached document, for setting a title after the
    /// fact.
    pub fn get_parsed_mut(&mut self) -> &mut Document {
        self.get_parsed();
        match self.parsed.get_mut() {
            Some(doc) => doc,
            None => unreachable!("document cached by get_parsed"),
        }
    }

    pub fn is_parsed(&self) -> bool {
        self.parsed.get().is_some()
    }

    /// Take the document, parsing now if it never was.
    pub fn into_parsed(self) -> Document {
        match self.parsed.into_inner() {
            Some(doc) => doc,
            None => parse(&self.text, &self.options),
        }
    }

    pub fn page_name(&self) -> Option<&str> {
        self.options.title.as_deref()
    }

    /// Set or clear the page name. A cached document is dropped so the next
    /// access sees the new name.
    pub fn set_page_name<S: Into<String>>(&mut self, page_name: Option<S>) {
        self.options.title = page_name.map(Into::into);
        self.parsed = OnceCell::new();
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lazy_parse_and_cache() {
        let wt = WikiText::new("Plain text about [[Rome]].");
        assert!(!wt.is_parsed());
        let doc = wt.get_parsed();
        assert_eq!(doc.links().len(), 1);
        assert!(wt.is_parsed());
        assert!(std::ptr::eq(wt.get_parsed(), wt.get_parsed()));
    }

    #[test]
    fn page_name_resets_cache() {
        let mut wt = WikiText::new("'''Rome''' is a city.");
        assert!(wt.page_name().is_none());
        assert_eq!(wt.get_parsed().title(), Some("Rome"));
        wt.set_page_name(Some("Roma"));
        assert!(!wt.is_parsed());
        assert_eq!(wt.page_name(), Some("Roma"));
        assert_eq!(wt.get_parsed().title(), Some("Roma"));
        wt.set_page_name::<&str>(None);
        assert!(wt.page_name().is_none());
    }

    #[test]
    fn into_parsed_without_access() {
        let doc = WikiText::new("#REDIRECT [[Paris]]").into_parsed();
        assert!(doc.is_redirect());
    }

    #[test]
    fn mutable_access() {
        let mut wt = WikiText::new("No bold here.");
        wt.get_parsed_mut().set_title("Manual");
        assert_eq!(wt.get_parsed().title(), Some("Manual"));
    }
}
