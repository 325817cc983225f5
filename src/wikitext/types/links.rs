/*!
Link node.

A `Link` is one of:
- internal `[[Page#anchor|text]]`, carrying a page and optionally an anchor and
  display text,
- interwiki `[[fr:Paris]]`, additionally carrying the target wiki,
- external `[https://example.org text]`, carrying a site and never a page.

Links are produced by `parser::links::extract_links`; only the constructors
here enforce the shape rules above.
*/

use serde::{Deserialize, Serialize};

use crate::wikitext::enums::LinkType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "type")]
    link_type: LinkType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    anchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    wiki: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    site: Option<String>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl Link {
    /// Construct an internal link.
    pub fn internal<S: Into<String>>(page: S, anchor: Option<String>, text: Option<String>) -> Self {
        Self {
            link_type: LinkType::Internal,
            page: Some(page.into()),
            anchor: non_empty(anchor),
            text: non_empty(text),
            wiki: None,
            site: None,
        }
    }

    /// Construct a link into another wiki.
    pub fn interwiki<S: Into<String>>(
        wiki: S,
        page: S,
        anchor: Option<String>,
        text: Option<String>,
    ) -> Self {
        Self {
            link_type: LinkType::Interwiki,
            page: Some(page.into()),
            anchor: non_empty(anchor),
            text: non_empty(text),
            wiki: Some(wiki.into()),
            site: None,
        }
    }

    /// Construct an external link.
    pub fn external<S: Into<String>>(site: S, text: Option<String>) -> Self {
        Self {
            link_type: LinkType::External,
            page: None,
            anchor: None,
            text: non_empty(text),
            wiki: None,
            site: Some(site.into()),
        }
    }

    pub fn link_type(&self) -> LinkType {
        self.link_type
    }

    pub fn page(&self) -> Option<&str> {
        self.page.as_deref()
    }

    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// Display text, if it differs from the page.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn wiki(&self) -> Option<&str> {
        self.wiki.as_deref()
    }

    pub fn site(&self) -> Option<&str> {
        self.site.as_deref()
    }

    pub fn is_external(&self) -> bool {
        self.link_type == LinkType::External
    }

    /// What a reader sees: the text, else the page, else the site.
    pub fn display(&self) -> &str {
        self.text
            .as_deref()
            .or(self.page.as_deref())
            .or(self.site.as_deref())
            .unwrap_or_default()
    }

    /// A relative (internal) or absolute (external, interwiki) href.
    pub fn href(&self) -> String {
        match self.link_type {
            LinkType::External => self.site.clone().unwrap_or_default(),
            LinkType::Internal | LinkType::Interwiki => {
                let page = self.page.as_deref().unwrap_or_default().replace(' ', "_");
                let mut href = match (&self.link_type, &self.wiki) {
                    // language prefixes map to their own edition
                    (LinkType::Interwiki, Some(wiki)) if wiki.len() == 2 || wiki == "simple" => {
                        format!("https://{}.wikipedia.org/wiki/{}", wiki, page)
                    }
                    (LinkType::Interwiki, Some(wiki)) => format!("./{}:{}", wiki, page),
                    _ => format!("./{}", page),
                };
                if let Some(anchor) = &self.anchor {
                    href.push('#');
                    href.push_str(&anchor.replace(' ', "_"));
                }
                href
            }
        }
    }

    /// Reconstruct the link as wikitext.
    pub fn to_wikitext(&self) -> String {
        match self.link_type {
            LinkType::External => match &self.text {
                Some(t) => format!("[{} {}]", self.site.as_deref().unwrap_or_default(), t),
                None => format!("[{}]", self.site.as_deref().unwrap_or_default()),
            },
            LinkType::Internal | LinkType::Interwiki => {
                let mut target = String::new();
                if let Some(w) = &self.wiki {
                    target.push_str(w);
                    target.push(':');
                }
                target.push_str(self.page.as_deref().unwrap_or_default());
                if let Some(a) = &self.anchor {
                    target.push('#');
                    target.push_str(a);
                }
                match &self.text {
                    Some(t) => format!("[[{}|{}]]", target, t),
                    None => format!("[[{}]]", target),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_link_shape() {
        let l = Link::internal("Toronto", Some("History".into()), Some("the city".into()));
        assert_eq!(l.link_type(), LinkType::Internal);
        assert_eq!(l.page(), Some("Toronto"));
        assert_eq!(l.display(), "the city");
        assert_eq!(l.href(), "./Toronto#History");
        assert_eq!(l.to_wikitext(), "[[Toronto#History|the city]]");
    }

    #[test]
    fn external_link_has_no_page() {
        let l = Link::external("https://example.org", Some("  ".into()));
        assert!(l.page().is_none());
        assert!(l.text().is_none());
        assert_eq!(l.display(), "https://example.org");
        assert_eq!(l.href(), "https://example.org");
    }

    #[test]
    fn interwiki_href() {
        let l = Link::interwiki("fr", "Paris", None, None);
        assert_eq!(l.href(), "https://fr.wikipedia.org/wiki/Paris");
        assert_eq!(l.to_wikitext(), "[[fr:Paris]]");
    }

    #[test]
    fn serializes_type_tag() {
        let l = Link::internal("Paris", None, None);
        let v = serde_json::to_value(&l).unwrap();
        assert_eq!(v["type"], "internal");
        assert_eq!(v["page"], "Paris");
        assert!(v.get("text").is_none());
    }
}
