//! Paragraph node: a blank-line separated block of a section.

use serde::Serialize;

use crate::wikitext::types::image::Image;
use crate::wikitext::types::links::Link;
use crate::wikitext::types::list::List;
use crate::wikitext::types::sentence::Sentence;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Paragraph {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sentences: Vec<Sentence>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    lists: Vec<List>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    images: Vec<Image>,
    #[serde(skip)]
    wiki: String,
}

impl Paragraph {
    pub fn new(sentences: Vec<Sentence>, lists: Vec<List>, images: Vec<Image>, wiki: String) -> Self {
        Self {
            sentences,
            lists,
            images,
            wiki,
        }
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn lists(&self) -> &[List] {
        &self.lists
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn links(&self) -> Vec<&Link> {
        let mut out: Vec<&Link> = self.sentences.iter().flat_map(|s| s.links()).collect();
        out.extend(self.lists.iter().flat_map(|l| l.links()));
        out
    }

    /// Sentences joined by a space, then lists on their own lines.
    pub fn text(&self) -> String {
        let mut out = self
            .sentences
            .iter()
            .map(|s| s.text())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        for list in &self.lists {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&list.text());
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty() && self.lists.is_empty() && self.images.is_empty()
    }

    pub fn wikitext(&self) -> &str {
        &self.wiki
    }
}
