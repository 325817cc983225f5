//! Template dispatch.
//!
//! A `TemplateRegistry` maps normalized template names to a positional key
//! order and a handler. Dispatch of one template body goes, in order:
//! 1. ignored names render nothing,
//! 2. registered handlers,
//! 3. infobox detection,
//! 4. `cite ...` names become citation records,
//! 5. anything else becomes a generic record and renders nothing.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use lazy_regex::regex_is_match;

use crate::wikitext::i18n::IGNORED_TEMPLATES;
use crate::wikitext::parser::template::handlers;
use crate::wikitext::parser::template::infobox::{infobox_kind, is_infobox};
use crate::wikitext::parser::template::tokenizer::tokenize;
use crate::wikitext::scanner::template_name;
use crate::wikitext::types::templates::Template;

/// Inputs a handler may need besides the template itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateContext {
    pub today: NaiveDate,
}

/// What a template turns into: replacement text, and optionally a record
/// kept on the section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rendered {
    pub text: String,
    pub record: Option<Template>,
}

impl Rendered {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn text<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            record: None,
        }
    }

    pub fn record(record: Template) -> Self {
        Self {
            text: String::new(),
            record: Some(record),
        }
    }

    pub fn both<S: Into<String>>(text: S, record: Template) -> Self {
        Self {
            text: text.into(),
            record: Some(record),
        }
    }
}

pub type Handler = fn(&Template, &TemplateContext) -> Rendered;

#[derive(Clone, Copy)]
pub struct Registration {
    /// Keys assigned to positional values, in order.
    pub order: &'static [&'static str],
    pub handler: Handler,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    handlers: HashMap<String, Registration>,
    ignore: HashSet<String>,
}

fn normalize(name: &str) -> String {
    name.trim().replace('_', " ").to_lowercase()
}

impl TemplateRegistry {
    /// A registry with no handlers and nothing ignored.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in handlers and ignore list.
    pub fn builtin() -> Self {
        let mut reg = Self::empty();
        for name in IGNORED_TEMPLATES {
            reg.ignore(name);
        }
        handlers::register_builtin(&mut reg);
        log::debug!(
            "template registry: {} handlers, {} ignored",
            reg.handlers.len(),
            reg.ignore.len()
        );
        reg
    }

    /// Register (or replace) the handler for `name`.
    pub fn register(&mut self, name: &str, order: &'static [&'static str], handler: Handler) {
        let name = normalize(name);
        self.ignore.remove(&name);
        self.handlers.insert(name, Registration { order, handler });
    }

    /// Remove `name`'s output entirely.
    pub fn ignore(&mut self, name: &str) {
        let name = normalize(name);
        self.handlers.remove(&name);
        self.ignore.insert(name);
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore.contains(&normalize(name))
    }

    pub fn get(&self, name: &str) -> Option<&Registration> {
        self.handlers.get(&normalize(name))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Render one template body.
    pub fn dispatch(&self, body: &str, ctx: &TemplateContext) -> Rendered {
        let Some(name) = template_name(body) else {
            return Rendered::empty();
        };

        if self.ignore.contains(&name) {
            return Rendered::empty();
        }

        if let Some(reg) = self.handlers.get(&name) {
            let tpl = tokenize(body, reg.order);
            return (reg.handler)(&tpl, ctx);
        }

        if is_infobox(&name) {
            let mut tpl = tokenize(body, &[]);
            tpl.set_name("infobox");
            tpl.set_kind(Some(infobox_kind(&name)));
            return Rendered::record(tpl);
        }

        if regex_is_match!(r"^cite [a-z]", &name) {
            let mut tpl = tokenize(body, &[]);
            tpl.set_name("citation");
            tpl.set_kind(name.strip_prefix("cite ").map(|k| k.trim().to_string()));
            return Rendered::record(tpl);
        }

        Rendered::record(tokenize(body, &[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> TemplateContext {
        TemplateContext {
            today: NaiveDate::from_ymd_opt(2024, 1, 15).expect("date"),
        }
    }

    fn shout(tpl: &Template, _: &TemplateContext) -> Rendered {
        Rendered::text(tpl.get("text").unwrap_or_default().to_uppercase())
    }

    #[test]
    fn custom_handler() {
        let mut reg = TemplateRegistry::empty();
        reg.register("Shout", &["text"], shout);
        let out = reg.dispatch("{{shout|hello}}", &ctx());
        assert_eq!(out.text, "HELLO");
        assert!(out.record.is_none());
    }

    #[test]
    fn ignored_wins_over_fallback() {
        let reg = TemplateRegistry::builtin();
        assert_eq!(reg.dispatch("{{Reflist|2}}", &ctx()), Rendered::empty());
        assert!(reg.is_ignored("Use_dmy_dates"));
    }

    #[test]
    fn infobox_and_citation_records() {
        let reg = TemplateRegistry::builtin();
        let out = reg.dispatch("{{Infobox settlement|name=Springfield}}", &ctx());
        let rec = out.record.expect("record");
        assert_eq!(rec.name(), "infobox");
        assert_eq!(rec.kind(), Some("settlement"));
        assert!(out.text.is_empty());

        let out = reg.dispatch("{{cite web|url=https://x.org|title=X}}", &ctx());
        let rec = out.record.expect("record");
        assert_eq!(rec.name(), "citation");
        assert_eq!(rec.kind(), Some("web"));
    }

    #[test]
    fn unknown_template_becomes_record() {
        let reg = TemplateRegistry::builtin();
        let out = reg.dispatch("{{Some unknown thing|a|b=c}}", &ctx());
        assert!(out.text.is_empty());
        let rec = out.record.expect("record");
        assert_eq!(rec.name(), "some unknown thing");
        assert_eq!(rec.get("b"), Some("c"));
        assert_eq!(rec.list(), &["a"]);
    }
}
