//! Template resolution for one section.
//!
//! Templates are rendered deepest first: a nested template's output is
//! substituted into its parent's body before the parent is dispatched, so a
//! `{{nowrap|{{convert|5|km}}}}` parent sees `5 km`. Records left behind by
//! the handlers are then sorted into generic templates, infoboxes and
//! citations.

pub mod handlers;
pub mod infobox;
pub mod registry;
pub mod tokenizer;

use crate::wikitext::i18n::CITATION_TEMPLATES;
use crate::wikitext::parser::sentence::value_sentence;
use crate::wikitext::scanner::{TemplateSpan, find_templates};
use crate::wikitext::types::fields::Fields;
use crate::wikitext::types::templates::{Infobox, Reference, Template};

pub use registry::{Handler, Registration, Rendered, TemplateContext, TemplateRegistry};

/// Text with its templates rendered, plus the records they produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolved {
    pub wiki: String,
    pub templates: Vec<Template>,
    pub infoboxes: Vec<Infobox>,
    pub references: Vec<Reference>,
}

/// Render every template in `wiki` and collect the records.
pub fn resolve_templates(wiki: &str, registry: &TemplateRegistry, ctx: &TemplateContext) -> Resolved {
    let spans = find_templates(wiki);
    if spans.is_empty() {
        return Resolved {
            wiki: wiki.to_string(),
            ..Resolved::default()
        };
    }

    let mut records = Vec::new();
    let mut out = wiki.to_string();
    for span in &spans {
        let text = render_span(span, registry, ctx, &mut records);
        out = out.replacen(&span.raw, &text, 1);
    }
    log::debug!("resolved {} templates, {} records", spans.len(), records.len());

    let mut resolved = Resolved {
        wiki: out,
        ..Resolved::default()
    };
    for record in records {
        relocate(record, &mut resolved);
    }
    resolved
}

fn render_span(
    span: &TemplateSpan,
    registry: &TemplateRegistry,
    ctx: &TemplateContext,
    records: &mut Vec<Template>,
) -> String {
    let body = render_children(span, registry, ctx, records);
    let rendered = registry.dispatch(&body, ctx);
    if let Some(record) = rendered.record {
        records.push(record);
    }
    rendered.text
}

/// `span`'s body with every nested template replaced by its rendered text.
pub(crate) fn render_children(
    span: &TemplateSpan,
    registry: &TemplateRegistry,
    ctx: &TemplateContext,
    records: &mut Vec<Template>,
) -> String {
    let mut body = span.body.clone();
    for child in &span.children {
        let text = render_span(child, registry, ctx, records);
        body = body.replacen(&child.raw, &text, 1);
    }
    body
}

/// Keyed arguments as sentences. Escaped reserved keys (`_list`,
/// `_template`) are user fields and are kept.
pub(crate) fn record_fields(tpl: &Template) -> Fields {
    tpl.arguments()
        .iter()
        .map(|a| (a.name.clone(), value_sentence(&a.value)))
        .collect()
}

fn relocate(record: Template, resolved: &mut Resolved) {
    if record.name() == "infobox" {
        let kind = record.kind().unwrap_or_default().to_string();
        let fields = record_fields(&record);
        resolved
            .infoboxes
            .push(Infobox::new(kind, fields, record.wikitext().to_string()));
    } else if CITATION_TEMPLATES.contains(&record.name()) {
        let kind = record.kind().unwrap_or("citation").to_string();
        let fields = record_fields(&record);
        resolved
            .references
            .push(Reference::from_fields(kind, fields, record.wikitext().to_string()));
    } else {
        resolved.templates.push(record);
    }
}
