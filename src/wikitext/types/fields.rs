//! Ordered `key -> Sentence` maps, shared by infoboxes, citations and table
//! rows. Serialized as a JSON object in insertion order.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::wikitext::enums::QueryType;
use crate::wikitext::types::links::Link;
use crate::wikitext::types::sentence::Sentence;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<(String, Sentence)>);

/// Keys are compared lowercased, trimmed, with `_` and ` ` equivalent.
pub(crate) fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('_', " ")
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `key`, keeping the first position of the key.
    pub fn insert<S: Into<String>>(&mut self, key: S, value: Sentence) {
        let key = key.into();
        let norm = normalize_key(&key);
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| normalize_key(k) == norm) {
            slot.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Sentence> {
        let norm = normalize_key(key);
        self.0
            .iter()
            .find(|(k, _)| normalize_key(k) == norm)
            .map(|(_, v)| v)
    }

    /// All values whose key matches `query` under `qtype`.
    pub fn query(&self, query: &str, qtype: QueryType) -> Vec<(&str, &Sentence)> {
        self.0
            .iter()
            .filter(|(k, _)| qtype.matches(&normalize_key(k), &normalize_key(query)))
            .map(|(k, v)| (k.as_str(), v))
            .collect()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Sentence)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &Sentence> {
        self.0.iter().map(|(_, v)| v)
    }

    pub fn links(&self) -> Vec<&Link> {
        self.values().flat_map(|s| s.links()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(key, plain text)` pairs.
    pub fn to_text_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.text().to_string()))
            .collect()
    }
}

impl FromIterator<(String, Sentence)> for Fields {
    fn from_iter<I: IntoIterator<Item = (String, Sentence)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

impl Serialize for Fields {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
