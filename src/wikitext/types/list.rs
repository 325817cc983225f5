//! List node: a run of `*`, `#`, `:` or `;` lines.

use serde::Serialize;

use crate::wikitext::enums::ListType;
use crate::wikitext::types::links::Link;
use crate::wikitext::types::sentence::Sentence;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct List {
    #[serde(rename = "type")]
    list_type: ListType,
    items: Vec<Sentence>,
    #[serde(skip)]
    wiki: String,
}

impl List {
    pub fn new(list_type: ListType, items: Vec<Sentence>, wiki: String) -> Self {
        Self {
            list_type,
            items,
            wiki,
        }
    }

    pub fn list_type(&self) -> &ListType {
        &self.list_type
    }

    pub fn items(&self) -> &[Sentence] {
        &self.items
    }

    pub fn links(&self) -> Vec<&Link> {
        self.items.iter().flat_map(|s| s.links()).collect()
    }

    /// Items, one per line, each prefixed with ` * `.
    pub fn text(&self) -> String {
        self.items
            .iter()
            .map(|s| format!(" * {}", s.text()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn wikitext(&self) -> &str {
        &self.wiki
    }
}
