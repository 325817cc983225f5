//! Sentence node: plain text plus the links, emphasis and date found in it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::wikitext::types::links::Link;

/// Bold and italic spans of a sentence, as plain strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formatting {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub bold: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub italic: Vec<String>,
}

impl Formatting {
    pub fn is_empty(&self) -> bool {
        self.bold.is_empty() && self.italic.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    text: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    links: Vec<Link>,
    #[serde(skip_serializing_if = "Formatting::is_empty", default)]
    formatting: Formatting,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    date: Option<NaiveDate>,
    #[serde(skip)]
    wiki: String,
}

impl Sentence {
    pub fn new(text: String, links: Vec<Link>, formatting: Formatting, wiki: String) -> Self {
        Self {
            text,
            links,
            formatting,
            date: None,
            wiki,
        }
    }

    /// A sentence with no markup.
    pub fn plain<S: Into<String>>(text: S) -> Self {
        let text = text.into();
        Self {
            wiki: text.clone(),
            text,
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn formatting(&self) -> &Formatting {
        &self.formatting
    }

    pub fn bolds(&self) -> &[String] {
        &self.formatting.bold
    }

    pub fn italics(&self) -> &[String] {
        &self.formatting.italic
    }

    /// A calendar date, when the whole sentence is one.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Source markup this sentence was built from.
    pub fn wikitext(&self) -> &str {
        &self.wiki
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Replace the plain text. Links and formatting are kept.
    pub fn set_text<S: Into<String>>(&mut self, text: S) {
        self.text = text.into();
    }

    pub(crate) fn with_date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }
}
