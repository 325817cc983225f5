//! Uniform read access across the document model.
//!
//! Every node type has its own inherent accessors; `WikiNode` exposes the
//! three things every node can produce so callers can treat nodes generically
//! (renderers, the CLI's `--plain` mode, tests).

use serde::Serialize;
use serde_json::Value;

use crate::wikitext::encode::encode_keys;
use crate::wikitext::errors::Result;
use crate::wikitext::types::document::{Document, SectionView};
use crate::wikitext::types::image::Image;
use crate::wikitext::types::links::Link;
use crate::wikitext::types::list::List;
use crate::wikitext::types::paragraph::Paragraph;
use crate::wikitext::types::section::Section;
use crate::wikitext::types::sentence::Sentence;
use crate::wikitext::types::table::Table;
use crate::wikitext::types::templates::{Infobox, Reference, Template};

pub trait WikiNode: Serialize {
    /// Plain text of the node.
    fn plain_text(&self) -> String;

    /// Every link reachable from the node.
    fn all_links(&self) -> Vec<&Link>;

    /// Source markup the node was built from.
    fn source(&self) -> &str;

    /// JSON form of the node.
    fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// JSON form with `$`-prefixed and dotted keys escaped.
    fn to_encoded_json(&self) -> Result<Value> {
        Ok(encode_keys(self.to_json()?))
    }
}

impl WikiNode for Document {
    fn plain_text(&self) -> String {
        self.text()
    }
    fn all_links(&self) -> Vec<&Link> {
        self.links()
    }
    fn source(&self) -> &str {
        self.wikitext()
    }
}

impl WikiNode for Section {
    fn plain_text(&self) -> String {
        self.text()
    }
    fn all_links(&self) -> Vec<&Link> {
        self.links()
    }
    fn source(&self) -> &str {
        self.wikitext()
    }
}

impl WikiNode for Paragraph {
    fn plain_text(&self) -> String {
        self.text()
    }
    fn all_links(&self) -> Vec<&Link> {
        self.links()
    }
    fn source(&self) -> &str {
        self.wikitext()
    }
}

impl WikiNode for Sentence {
    fn plain_text(&self) -> String {
        self.text().to_string()
    }
    fn all_links(&self) -> Vec<&Link> {
        self.links().iter().collect()
    }
    fn source(&self) -> &str {
        self.wikitext()
    }
}

impl WikiNode for Table {
    fn plain_text(&self) -> String {
        self.text()
    }
    fn all_links(&self) -> Vec<&Link> {
        self.links()
    }
    fn source(&self) -> &str {
        self.wikitext()
    }
}

impl WikiNode for List {
    fn plain_text(&self) -> String {
        self.text()
    }
    fn all_links(&self) -> Vec<&Link> {
        self.links()
    }
    fn source(&self) -> &str {
        self.wikitext()
    }
}

impl WikiNode for Image {
    fn plain_text(&self) -> String {
        self.text()
    }
    fn all_links(&self) -> Vec<&Link> {
        self.links()
    }
    fn source(&self) -> &str {
        self.wikitext()
    }
}

impl WikiNode for Infobox {
    fn plain_text(&self) -> String {
        self.data()
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v.text()))
            .collect::<Vec<_>>()
            .join("\n")
    }
    fn all_links(&self) -> Vec<&Link> {
        self.links()
    }
    fn source(&self) -> &str {
        self.wikitext()
    }
}

impl WikiNode for Reference {
    fn plain_text(&self) -> String {
        self.text()
    }
    fn all_links(&self) -> Vec<&Link> {
        self.links()
    }
    fn source(&self) -> &str {
        self.wikitext()
    }
}

impl WikiNode for Template {
    fn plain_text(&self) -> String {
        String::new()
    }
    fn all_links(&self) -> Vec<&Link> {
        Vec::new()
    }
    fn source(&self) -> &str {
        self.wikitext()
    }
}

impl Serialize for SectionView<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.section().serialize(serializer)
    }
}

impl WikiNode for SectionView<'_> {
    fn plain_text(&self) -> String {
        self.section().text()
    }
    fn all_links(&self) -> Vec<&Link> {
        self.section().links()
    }
    fn source(&self) -> &str {
        self.section().wikitext()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<N: WikiNode>(nodes: &[N]) -> Vec<String> {
        nodes.iter().map(|n| n.plain_text()).collect()
    }

    #[test]
    fn generic_over_nodes() {
        let sentences = vec![Sentence::plain("One."), Sentence::plain("Two.")];
        assert_eq!(texts(&sentences), vec!["One.", "Two."]);
        let json = sentences[0].to_json().expect("json");
        assert_eq!(json["text"], "One.");
    }

    #[test]
    fn encoded_json_escapes_keys() {
        let mut t = Template::new("x");
        t.set_arg("a.b", "1");
        let json = t.to_encoded_json().expect("json");
        assert_eq!(json["a\\u002eb"], "1");
    }
}
