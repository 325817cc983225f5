//! Wikitext parsing and the document model it produces.
//!
//! `parser` turns markup into a `Document`; `types` holds the model;
//! `scanner` and `i18n` are shared by the parser passes.

pub mod config;
pub mod encode;
pub mod enums;
pub mod errors;
pub mod i18n;
pub mod node;
pub mod parser;
pub mod scanner;
pub mod types;
pub mod wiki_text;

pub use config::{ParseOptions, ParseOptionsBuilder, ParseOptionsBuilderError};
pub use encode::{encode_key, encode_keys};
pub use enums::{DocumentType, LinkType, ListType, QueryType};
pub use errors::{Result, WtError};
pub use node::WikiNode;
pub use parser::template::{Handler, Rendered, TemplateContext, TemplateRegistry};
pub use parser::{Parser, parse};
pub use types::{
    Coordinate, Document, Fields, Formatting, Image, Infobox, Link, List, Paragraph,
    RedirectTarget, Reference, Section, SectionView, Sentence, Table, Template,
    TemplateArgument,
};
pub use wiki_text::WikiText;
