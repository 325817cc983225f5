//! Section node: a heading plus everything up to the next heading.
//!
//! Sections are stored flat, in document order. Depth 0 is the lead section
//! and `==` headings; each extra `=` adds one. Navigation between sections
//! lives on `SectionView` in `document.rs`, since it needs the whole list.

use serde::Serialize;

use crate::wikitext::types::image::Image;
use crate::wikitext::types::links::Link;
use crate::wikitext::types::list::List;
use crate::wikitext::types::paragraph::Paragraph;
use crate::wikitext::types::sentence::Sentence;
use crate::wikitext::types::table::Table;
use crate::wikitext::types::templates::{Infobox, Reference, Template};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Section {
    pub(crate) title: String,
    pub(crate) depth: usize,
    #[serde(skip)]
    pub(crate) index: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) paragraphs: Vec<Paragraph>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) tables: Vec<Table>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) templates: Vec<Template>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) infoboxes: Vec<Infobox>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) references: Vec<Reference>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) images: Vec<Image>,
    #[serde(skip)]
    pub(crate) wiki: String,
}

impl Section {
    /// Heading text, empty for the lead section.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Position in the document's section list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn sentences(&self) -> Vec<&Sentence> {
        self.paragraphs.iter().flat_map(|p| p.sentences()).collect()
    }

    pub fn lists(&self) -> Vec<&List> {
        self.paragraphs.iter().flat_map(|p| p.lists()).collect()
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn infoboxes(&self) -> &[Infobox] {
        &self.infoboxes
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    /// Gallery images, then images embedded in paragraphs.
    pub fn images(&self) -> Vec<&Image> {
        let mut out: Vec<&Image> = self.images.iter().collect();
        out.extend(self.paragraphs.iter().flat_map(|p| p.images()));
        out
    }

    pub fn links(&self) -> Vec<&Link> {
        let mut out: Vec<&Link> = self.paragraphs.iter().flat_map(|p| p.links()).collect();
        out.extend(self.tables.iter().flat_map(|t| t.links()));
        out.extend(self.infoboxes.iter().flat_map(|i| i.links()));
        out
    }

    /// Paragraph text, paragraphs separated by a blank line.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Whether pruning may drop this section.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
            && self.tables.is_empty()
            && self.templates.is_empty()
            && self.infoboxes.is_empty()
            && self.references.is_empty()
            && self.images.is_empty()
    }

    pub fn wikitext(&self) -> &str {
        &self.wiki
    }
}
