//! Embedded media (`[[File:...]]` and gallery entries).

use serde::Serialize;
use url::Url;

use crate::wikitext::config::DEFAULT_THUMBNAIL_WIDTH;
use crate::wikitext::errors::WtError;
use crate::wikitext::types::links::Link;
use crate::wikitext::types::sentence::Sentence;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    caption: Option<Sentence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<Url>,
    #[serde(skip)]
    wiki: String,
}

/// Build the redirect url for a file name on `domain`. The name is
/// title-cased with spaces as underscores.
pub fn file_url(file: &str, domain: &str) -> Result<Url, WtError> {
    let name = file_name(file).replace(' ', "_");
    let mut chars = name.chars();
    let name = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => return Err(WtError::invalid_arg("empty file name")),
    };
    let mut url = Url::parse(&format!("https://{}/", domain.trim()))?;
    url.path_segments_mut()
        .map_err(|_| WtError::invalid_arg(format!("domain '{}' cannot hold a path", domain)))?
        .pop_if_empty()
        .extend(["wiki", "Special:Redirect", "file", name.as_str()]);
    Ok(url)
}

/// File name without its namespace prefix.
fn file_name(file: &str) -> &str {
    match file.split_once([':', '：']) {
        Some((_, rest)) => rest.trim(),
        None => file.trim(),
    }
}

impl Image {
    /// `file` is the full `File:Name.jpg` title. The url is left empty when
    /// it cannot be built for `domain`.
    pub fn new<S: Into<String>>(file: S, domain: &str, wiki: String) -> Self {
        let file = file.into();
        let url = match file_url(&file, domain) {
            Ok(u) => Some(u),
            Err(e) => {
                log::warn!("no url for image '{}': {}", file, e);
                None
            }
        };
        Self {
            file,
            alt: None,
            caption: None,
            url,
            wiki,
        }
    }

    pub(crate) fn with_alt(mut self, alt: Option<String>) -> Self {
        self.alt = alt.map(|a| a.trim().to_string()).filter(|a| !a.is_empty());
        self
    }

    pub(crate) fn with_caption(mut self, caption: Option<Sentence>) -> Self {
        self.caption = caption.filter(|c| !c.is_empty());
        self
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn alt(&self) -> Option<&str> {
        self.alt.as_deref()
    }

    pub fn caption(&self) -> Option<&Sentence> {
        self.caption.as_ref()
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Url of a scaled copy `width` pixels wide.
    pub fn thumbnail(&self, width: Option<u32>) -> Option<Url> {
        let mut url = self.url.clone()?;
        url.query_pairs_mut()
            .append_pair("width", &width.unwrap_or(DEFAULT_THUMBNAIL_WIDTH).to_string());
        Some(url)
    }

    pub fn links(&self) -> Vec<&Link> {
        self.caption.iter().flat_map(|c| c.links()).collect()
    }

    /// Caption text, or empty.
    pub fn text(&self) -> String {
        self.caption
            .as_ref()
            .map(|c| c.text().to_string())
            .unwrap_or_default()
    }

    pub fn wikitext(&self) -> &str {
        &self.wiki
    }
}
