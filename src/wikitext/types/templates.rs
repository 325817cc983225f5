//! Template records and the structured values built from them.
//!
//! - `Template` - generic record of a template that produced no dedicated
//!   type: a normalized name, keyed arguments in order, and leftover
//!   positional values.
//! - `Infobox` - a summary box, values parsed into sentences.
//! - `Reference` - a citation, either from a `{{cite ...}}` template or
//!   inline `<ref>` text.
//! - `Coordinate` - latitude/longitude from a `{{coord}}` record.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::wikitext::enums::QueryType;
use crate::wikitext::errors::WtError;
use crate::wikitext::types::fields::Fields;
use crate::wikitext::types::links::Link;
use crate::wikitext::types::sentence::Sentence;

/// A named template argument; raw markup value, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateArgument {
    pub name: String,
    pub value: String,
}

impl TemplateArgument {
    pub fn new<S: Into<String>, V: Into<String>>(name: S, value: V) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Reconstruct the argument as `name=value` wikitext.
    pub fn to_wikitext(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// Template node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    name: String,
    kind: Option<String>,
    arguments: Vec<TemplateArgument>,
    list: Vec<String>,
    wiki: String,
}

impl Template {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub(crate) fn with_wiki<S: Into<String>>(mut self, wiki: S) -> Self {
        self.wiki = wiki.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    /// Sub-kind, e.g. `web` for a `{{cite web}}` citation.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub(crate) fn set_kind(&mut self, kind: Option<String>) {
        self.kind = kind.filter(|k| !k.is_empty());
    }

    pub fn arguments(&self) -> &[TemplateArgument] {
        &self.arguments
    }

    /// Positional values that no key was assigned to.
    pub fn list(&self) -> &[String] {
        &self.list
    }

    pub fn wikitext(&self) -> &str {
        &self.wiki
    }

    /// Set `name` to `value`, replacing an existing argument of that name.
    pub fn set_arg<S: Into<String>, V: Into<String>>(&mut self, name: S, value: V) {
        let name = name.into();
        let value = value.into();
        if let Some(arg) = self.arguments.iter_mut().find(|a| a.name == name) {
            arg.value = value;
        } else {
            self.arguments.push(TemplateArgument { name, value });
        }
    }

    pub(crate) fn remove_arg(&mut self, name: &str) -> Option<String> {
        let pos = self.arguments.iter().position(|a| a.name == name)?;
        Some(self.arguments.remove(pos).value)
    }

    pub(crate) fn push_list<S: Into<String>>(&mut self, value: S) {
        self.list.push(value.into());
    }

    pub(crate) fn list_mut(&mut self) -> &mut Vec<String> {
        &mut self.list
    }

    /// Value of a named argument, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.arguments
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name.trim()))
            .map(|a| a.value.as_str())
    }

    /// Get the first named argument matching `name` (case-insensitive).
    pub fn get_named_arg(&self, name: &str) -> Result<&str, WtError> {
        self.get(name).ok_or_else(|| {
            WtError::not_found(format!(
                "Named argument '{}' not found in template '{}'",
                name, self.name
            ))
        })
    }

    /// Get all named args matching `query` according to `QueryType`.
    pub fn get_named_args_query(&self, query: &str, qtype: QueryType) -> Vec<&TemplateArgument> {
        self.arguments
            .iter()
            .filter(|a| qtype.matches(&a.name, query))
            .collect()
    }

    /// Get a leftover positional argument by index (0-based).
    pub fn get_positional_arg(&self, pos: usize) -> Result<&str, WtError> {
        self.list
            .get(pos)
            .map(String::as_str)
            .ok_or_else(|| WtError::index_oob(pos, self.list.len()))
    }

    /// Reconstruct a wikitext representation of this template.
    pub fn to_wikitext(&self) -> String {
        let mut s = String::new();
        s.push_str("{{");
        s.push_str(&self.name);
        for value in &self.list {
            s.push('|');
            s.push_str(value);
        }
        for arg in &self.arguments {
            s.push('|');
            s.push_str(&arg.to_wikitext());
        }
        s.push_str("}}");
        s
    }
}

impl Serialize for Template {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("template", &self.name)?;
        if let Some(kind) = &self.kind {
            map.serialize_entry("type", kind)?;
        }
        for arg in &self.arguments {
            map.serialize_entry(&arg.name, &arg.value)?;
        }
        if !self.list.is_empty() {
            map.serialize_entry("list", &self.list)?;
        }
        map.end()
    }
}

/// Summary box of key/value facts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Infobox {
    #[serde(rename = "type")]
    kind: String,
    data: Fields,
    #[serde(skip)]
    wiki: String,
}

impl Infobox {
    pub fn new<S: Into<String>>(kind: S, data: Fields, wiki: String) -> Self {
        Self {
            kind: kind.into(),
            data,
            wiki,
        }
    }

    /// Infobox type, e.g. `settlement` for `{{Infobox settlement}}`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn data(&self) -> &Fields {
        &self.data
    }

    pub fn get(&self, key: &str) -> Option<&Sentence> {
        self.data.get(key)
    }

    /// Like `get`, but a missing key is an error.
    pub fn require(&self, key: &str) -> Result<&Sentence, WtError> {
        self.get(key).ok_or_else(|| {
            WtError::not_found(format!("key '{}' not found in infobox '{}'", key, self.kind))
        })
    }

    pub fn query(&self, query: &str, qtype: QueryType) -> Vec<(&str, &Sentence)> {
        self.data.query(query, qtype)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys()
    }

    pub fn links(&self) -> Vec<&Link> {
        self.data.links()
    }

    /// Raw value of the `image` field, when present.
    pub fn image_name(&self) -> Option<&str> {
        self.get("image")
            .map(|s| s.text())
            .filter(|s| !s.is_empty())
    }

    pub fn wikitext(&self) -> &str {
        &self.wiki
    }
}

/// A citation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Reference {
    #[serde(rename = "type")]
    kind: String,
    #[serde(skip_serializing_if = "Fields::is_empty")]
    data: Fields,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline: Option<Sentence>,
    #[serde(skip)]
    wiki: String,
}

impl Reference {
    /// A citation built from a citation template.
    pub fn from_fields<S: Into<String>>(kind: S, data: Fields, wiki: String) -> Self {
        Self {
            kind: kind.into(),
            data,
            inline: None,
            wiki,
        }
    }

    /// Free-text `<ref>` content that is not a citation template.
    pub fn inline(sentence: Sentence, wiki: String) -> Self {
        Self {
            kind: "inline".to_string(),
            data: Fields::new(),
            inline: Some(sentence),
            wiki,
        }
    }

    /// Citation kind, e.g. `web`, `book`, `inline`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn data(&self) -> &Fields {
        &self.data
    }

    pub fn get(&self, key: &str) -> Option<&Sentence> {
        self.data.get(key)
    }

    pub fn inline_text(&self) -> Option<&Sentence> {
        self.inline.as_ref()
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title").map(|s| s.text())
    }

    pub fn url(&self) -> Option<&str> {
        self.get("url").map(|s| s.text())
    }

    /// Plain text of the citation.
    pub fn text(&self) -> String {
        match &self.inline {
            Some(s) => s.text().to_string(),
            None => self.title().unwrap_or_default().to_string(),
        }
    }

    pub fn links(&self) -> Vec<&Link> {
        let mut out = self.data.links();
        if let Some(s) = &self.inline {
            out.extend(s.links());
        }
        out
    }

    pub fn wikitext(&self) -> &str {
        &self.wiki
    }
}

/// Geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Read a coordinate from a `{{coord}}` record.
    pub fn from_template(tpl: &Template) -> Result<Self, WtError> {
        let lat: f64 = tpl.get_named_arg("lat")?.parse()?;
        let lon: f64 = tpl.get_named_arg("lon")?.parse()?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(WtError::parse(format!(
                "coordinate out of range: {}, {}",
                lat, lon
            )));
        }
        Ok(Self { lat, lon })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cite() -> Template {
        let mut t = Template::new("citation");
        t.set_kind(Some("web".into()));
        t.set_arg("url", "https://example.org");
        t.set_arg("title", "Example");
        t.push_list("extra");
        t
    }

    #[test]
    fn template_lookups() {
        let t = cite();
        assert_eq!(t.get_named_arg("URL").expect("url"), "https://example.org");
        assert!(t.get_named_arg("author").is_err());
        assert_eq!(t.get_positional_arg(0).expect("pos"), "extra");
        match t.get_positional_arg(3) {
            Err(WtError::IndexOutOfBounds { idx, len }) => {
                assert_eq!(idx, 3);
                assert_eq!(len, 1);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(t.get_named_args_query("t", QueryType::StartsWith).len(), 1);
    }

    #[test]
    fn template_json_shape() {
        let v = serde_json::to_value(cite()).unwrap();
        assert_eq!(v["template"], "citation");
        assert_eq!(v["type"], "web");
        assert_eq!(v["title"], "Example");
        assert_eq!(v["list"][0], "extra");
    }

    #[test]
    fn template_to_wikitext() {
        let mut t = Template::new("nowrap");
        t.push_list("a b");
        t.set_arg("x", "1");
        assert_eq!(t.to_wikitext(), "{{nowrap|a b|x=1}}");
    }

    #[test]
    fn infobox_require() {
        let data: Fields = [("population".to_string(), Sentence::plain("1000"))]
            .into_iter()
            .collect();
        let ib = Infobox::new("settlement", data, String::new());
        assert_eq!(ib.require("population").expect("present").text(), "1000");
        assert!(matches!(ib.require("mayor"), Err(WtError::NotFound { .. })));
    }

    #[test]
    fn coordinate_from_record() {
        let mut t = Template::new("coord");
        t.set_arg("lat", "43.65");
        t.set_arg("lon", "-79.38");
        let c = Coordinate::from_template(&t).expect("coord");
        assert!((c.lat - 43.65).abs() < 1e-9);
        t.set_arg("lat", "north");
        assert!(Coordinate::from_template(&t).is_err());
    }
}
