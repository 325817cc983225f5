//! Enums used by the wikitext module.
//!
//! - `QueryType` - strategies for matching template argument and infobox keys.
//! - `LinkType` - distinguishes internal, external and interwiki links.
//! - `ListType` - the marker that opened a list run.
//! - `DocumentType` - what kind of page a parsed document represents.
//!
//! Each type implements `Display`. `ListType` also parses from its marker
//! character.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Strategy used when searching arguments, infobox keys, etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    /// Exact (case-insensitive) match.
    Exact,
    /// Prefix match (case-insensitive).
    StartsWith,
    /// Substring match (case-insensitive).
    Contains,
}

impl QueryType {
    /// Test `candidate` against `query` using this strategy. Both sides are
    /// compared lowercased and trimmed.
    pub fn matches(self, candidate: &str, query: &str) -> bool {
        let c = candidate.trim().to_lowercase();
        let q = query.trim().to_lowercase();
        match self {
            QueryType::Exact => c == q,
            QueryType::StartsWith => c.starts_with(&q),
            QueryType::Contains => c.contains(&q),
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryType::Exact => write!(f, "Exact"),
            QueryType::StartsWith => write!(f, "StartsWith"),
            QueryType::Contains => write!(f, "Contains"),
        }
    }
}

/// The kind of link encountered in a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    /// Internal wiki link using `[[...]]`.
    Internal,
    /// External link using `[http://...]` or similar.
    External,
    /// `[[fr:Paris]]` style link pointing at another wiki.
    Interwiki,
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkType::Internal => write!(f, "Internal"),
            LinkType::External => write!(f, "External"),
            LinkType::Interwiki => write!(f, "Interwiki"),
        }
    }
}

/// The kind of list line in wikitext.
///
/// Common tokens:
/// - `*` unordered
/// - `#` ordered (numbered)
/// - `;` definition term / list
/// - `:` indented / definition description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    Unordered,
    Ordered,
    Definition,
    /// Any other marker not covered above; stores the raw marker string.
    Other(String),
}

impl ListType {
    /// Classify a list line by its first marker character.
    pub fn from_marker(line: &str) -> Self {
        match line.trim_start().chars().next() {
            Some(c) => c.to_string().parse().unwrap_or(ListType::Other(c.to_string())),
            None => ListType::Other(String::new()),
        }
    }
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListType::Unordered => write!(f, "Unordered"),
            ListType::Ordered => write!(f, "Ordered"),
            ListType::Definition => write!(f, "Definition"),
            ListType::Other(s) => write!(f, "Other({})", s),
        }
    }
}

impl FromStr for ListType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "*" | "unordered" | "bullet" => Ok(ListType::Unordered),
            "#" | "ordered" | "numbered" => Ok(ListType::Ordered),
            ";" | ":" | "definition" | "def" => Ok(ListType::Definition),
            other => Ok(ListType::Other(other.to_string())),
        }
    }
}

/// Kind of page a `Document` was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    #[default]
    Article,
    Redirect,
    Disambiguation,
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentType::Article => write!(f, "Article"),
            DocumentType::Redirect => write!(f, "Redirect"),
            DocumentType::Disambiguation => write!(f, "Disambiguation"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn querytype_matches() {
        assert!(QueryType::Exact.matches(" Population ", "population"));
        assert!(QueryType::StartsWith.matches("population_total", "Population"));
        assert!(QueryType::Contains.matches("area_total_km2", "total"));
        assert!(!QueryType::Exact.matches("population_total", "population"));
    }

    #[test]
    fn linktype_serde() {
        assert_eq!(format!("{}", LinkType::Interwiki), "Interwiki");
        let json = serde_json::to_string(&LinkType::Internal).unwrap();
        assert_eq!(json, "\"internal\"");
    }

    #[test]
    fn listtype_from_marker() {
        assert_eq!(ListType::from_marker("* one"), ListType::Unordered);
        assert_eq!(ListType::from_marker("#two"), ListType::Ordered);
        assert_eq!(ListType::from_marker(": three"), ListType::Definition);
        assert_eq!(format!("{}", ListType::from_marker("|x")), "Other(|)");
    }

    #[test]
    fn document_type_display() {
        assert_eq!(DocumentType::default(), DocumentType::Article);
        let json = serde_json::to_string(&DocumentType::Disambiguation).unwrap();
        assert_eq!(json, "\"disambiguation\"");
        assert_eq!(format!("{}", DocumentType::Redirect), "Redirect");
    }
}
