//! Document: the result of parsing one page.
//!
//! Sections are kept in a flat list; `SectionView` gives tree-style
//! navigation (parent, children, siblings) computed from section depths.

use serde::Serialize;

use crate::wikitext::enums::DocumentType;
use crate::wikitext::errors::WtError;
use crate::wikitext::types::image::Image;
use crate::wikitext::types::links::Link;
use crate::wikitext::types::list::List;
use crate::wikitext::types::paragraph::Paragraph;
use crate::wikitext::types::section::Section;
use crate::wikitext::types::sentence::Sentence;
use crate::wikitext::types::table::Table;
use crate::wikitext::types::templates::{Coordinate, Infobox, Reference, Template};

/// Where a redirect page points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectTarget {
    pub page: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(rename = "pageID", skip_serializing_if = "Option::is_none")]
    page_id: Option<u64>,
    #[serde(rename = "type")]
    kind: DocumentType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    categories: Vec<String>,
    #[serde(rename = "redirectTo", skip_serializing_if = "Option::is_none")]
    redirect_to: Option<RedirectTarget>,
    sections: Vec<Section>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    coordinates: Vec<Coordinate>,
    #[serde(skip)]
    wiki: String,
}

impl Document {
    pub(crate) fn article(
        title: Option<String>,
        page_id: Option<u64>,
        kind: DocumentType,
        sections: Vec<Section>,
        categories: Vec<String>,
        wiki: String,
    ) -> Self {
        let coordinates = sections
            .iter()
            .flat_map(|s| s.templates())
            .filter(|t| t.name() == "coord")
            .filter_map(|t| match Coordinate::from_template(t) {
                Ok(c) => Some(c),
                Err(e) => {
                    log::debug!("skipping coord template: {}", e);
                    None
                }
            })
            .collect();
        Self {
            title,
            page_id,
            kind,
            categories,
            redirect_to: None,
            sections,
            coordinates,
            wiki,
        }
    }

    pub(crate) fn redirect(
        title: Option<String>,
        page_id: Option<u64>,
        target: RedirectTarget,
        categories: Vec<String>,
        wiki: String,
    ) -> Self {
        Self {
            title,
            page_id,
            kind: DocumentType::Redirect,
            categories,
            redirect_to: Some(target),
            wiki,
            ..Self::default()
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title<S: Into<String>>(&mut self, title: S) {
        let title = title.into();
        self.title = (!title.trim().is_empty()).then_some(title);
    }

    pub fn page_id(&self) -> Option<u64> {
        self.page_id
    }

    pub fn kind(&self) -> DocumentType {
        self.kind
    }

    pub fn is_redirect(&self) -> bool {
        self.kind == DocumentType::Redirect
    }

    pub fn is_disambiguation(&self) -> bool {
        self.kind == DocumentType::Disambiguation
    }

    pub fn redirect_to(&self) -> Option<&RedirectTarget> {
        self.redirect_to.as_ref()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Section by position, as a navigable view.
    pub fn section_at(&self, idx: usize) -> Result<SectionView<'_>, WtError> {
        if idx < self.sections.len() {
            Ok(SectionView { doc: self, idx })
        } else {
            Err(WtError::index_oob(idx, self.sections.len()))
        }
    }

    /// First section whose title matches `title`, case-insensitively.
    pub fn section(&self, title: &str) -> Option<SectionView<'_>> {
        let wanted = title.trim().to_lowercase();
        self.sections
            .iter()
            .position(|s| s.title().to_lowercase() == wanted)
            .map(|idx| SectionView { doc: self, idx })
    }

    pub fn section_views(&self) -> impl Iterator<Item = SectionView<'_>> {
        (0..self.sections.len()).map(move |idx| SectionView { doc: self, idx })
    }

    pub fn paragraphs(&self) -> Vec<&Paragraph> {
        self.sections.iter().flat_map(|s| s.paragraphs()).collect()
    }

    pub fn sentences(&self) -> Vec<&Sentence> {
        self.sections.iter().flat_map(|s| s.sentences()).collect()
    }

    pub fn lists(&self) -> Vec<&List> {
        self.sections.iter().flat_map(|s| s.lists()).collect()
    }

    pub fn tables(&self) -> Vec<&Table> {
        self.sections.iter().flat_map(|s| s.tables()).collect()
    }

    pub fn templates(&self) -> Vec<&Template> {
        self.sections.iter().flat_map(|s| s.templates()).collect()
    }

    pub fn infoboxes(&self) -> Vec<&Infobox> {
        self.sections.iter().flat_map(|s| s.infoboxes()).collect()
    }

    pub fn references(&self) -> Vec<&Reference> {
        self.sections.iter().flat_map(|s| s.references()).collect()
    }

    pub fn images(&self) -> Vec<&Image> {
        self.sections.iter().flat_map(|s| s.images()).collect()
    }

    pub fn links(&self) -> Vec<&Link> {
        self.sections.iter().flat_map(|s| s.links()).collect()
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// Plain text of all sections, separated by blank lines.
    pub fn text(&self) -> String {
        self.sections
            .iter()
            .map(|s| s.text())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn wikitext(&self) -> &str {
        &self.wiki
    }
}

/// A section together with its document, for navigation.
#[derive(Debug, Clone, Copy)]
pub struct SectionView<'a> {
    doc: &'a Document,
    idx: usize,
}

impl<'a> SectionView<'a> {
    pub fn section(&self) -> &'a Section {
        &self.doc.sections[self.idx]
    }

    pub fn index(&self) -> usize {
        self.idx
    }

    fn at(&self, idx: usize) -> SectionView<'a> {
        SectionView { doc: self.doc, idx }
    }

    fn depth_of(&self, idx: usize) -> usize {
        self.doc.sections[idx].depth()
    }

    /// Nearest earlier section with a smaller depth.
    pub fn parent(&self) -> Option<SectionView<'a>> {
        let depth = self.depth_of(self.idx);
        (0..self.idx)
            .rev()
            .find(|&i| self.depth_of(i) < depth)
            .map(|i| self.at(i))
    }

    /// Sections whose parent is this one.
    pub fn children(&self) -> Vec<SectionView<'a>> {
        let depth = self.depth_of(self.idx);
        (self.idx + 1..self.doc.sections.len())
            .take_while(|&i| self.depth_of(i) > depth)
            .map(|i| self.at(i))
            .filter(|v| v.parent().map(|p| p.idx) == Some(self.idx))
            .collect()
    }

    pub fn next_sibling(&self) -> Option<SectionView<'a>> {
        let depth = self.depth_of(self.idx);
        (self.idx + 1..self.doc.sections.len())
            .take_while(|&i| self.depth_of(i) >= depth)
            .find(|&i| self.depth_of(i) == depth)
            .map(|i| self.at(i))
    }

    pub fn previous_sibling(&self) -> Option<SectionView<'a>> {
        let depth = self.depth_of(self.idx);
        (0..self.idx)
            .rev()
            .take_while(|&i| self.depth_of(i) >= depth)
            .find(|&i| self.depth_of(i) == depth)
            .map(|i| self.at(i))
    }
}

impl std::ops::Deref for SectionView<'_> {
    type Target = Section;

    fn deref(&self) -> &Section {
        self.section()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(title: &str, depth: usize, index: usize) -> Section {
        Section {
            title: title.to_string(),
            depth,
            index,
            ..Section::default()
        }
    }

    fn doc() -> Document {
        let sections = vec![
            section("", 0, 0),
            section("History", 0, 1),
            section("Early", 1, 2),
            section("Detail", 2, 3),
            section("Late", 1, 4),
            section("Geography", 0, 5),
        ];
        Document::article(
            Some("Town".into()),
            None,
            DocumentType::Article,
            sections,
            vec![],
            String::new(),
        )
    }

    #[test]
    fn parent_and_children() {
        let d = doc();
        let history = d.section("history").expect("history");
        let kids: Vec<&str> = history.children().iter().map(|v| v.section().title()).collect();
        assert_eq!(kids, vec!["Early", "Late"]);
        let detail = d.section_at(3).expect("detail");
        assert_eq!(detail.parent().map(|p| p.section().title()), Some("Early"));
        assert!(d.section_at(1).expect("s").parent().is_none());
    }

    #[test]
    fn siblings() {
        let d = doc();
        let early = d.section_at(2).expect("early");
        assert_eq!(early.next_sibling().map(|v| v.section().title()), Some("Late"));
        assert!(early.previous_sibling().is_none());
        let geo = d.section_at(5).expect("geo");
        assert_eq!(geo.previous_sibling().map(|v| v.section().title()), Some("History"));
        assert!(geo.next_sibling().is_none());
    }

    #[test]
    fn section_at_out_of_range() {
        let d = doc();
        assert!(matches!(
            d.section_at(10),
            Err(WtError::IndexOutOfBounds { idx: 10, len: 6 })
        ));
    }
}
