//! Parse MediaWiki markup into a navigable document model.
//!
//! ```
//! use wikimodel::{parse, ParseOptions};
//! let doc = parse("'''Toronto''' is a city in [[Ontario]].", &ParseOptions::default());
//! assert_eq!(doc.title(), Some("Toronto"));
//! assert_eq!(doc.links()[0].page(), Some("Ontario"));
//! ```

pub mod wikitext;

pub use wikitext::{
    Coordinate, Document, DocumentType, Fields, Formatting, Handler, Image, Infobox, Link,
    LinkType, List, ListType, Paragraph, ParseOptions, ParseOptionsBuilder,
    ParseOptionsBuilderError, Parser, QueryType, RedirectTarget, Reference, Rendered, Result,
    Section, SectionView, Sentence, Table, Template, TemplateArgument, TemplateContext,
    TemplateRegistry, WikiNode, WikiText, WtError, encode_key, encode_keys, parse,
};
