//! Parse options and the tuning constants shared by the parsers.

use chrono::{Local, NaiveDate};
use derive_builder::Builder;
use url::Url;

/// How many nested template layers are resolved. Anything deeper stays as raw
/// text inside the innermost resolved template's arguments.
pub const MAX_TEMPLATE_DEPTH: usize = 3;
/// A table needs more than this many rows before its first row is guessed to
/// be a header row.
pub const TABLE_HEADER_MIN_ROWS: usize = 3;
/// Rows holding a cell with a colspan above this are dropped.
pub const COLSPAN_DROP_THRESHOLD: usize = 3;
/// Only this many leading characters are checked for a redirect marker.
pub const REDIRECT_SCAN_LIMIT: usize = 1000;
/// Explicit `!` header rows considered per table.
pub const MAX_HEADER_ROWS: usize = 2;
/// Width used by `Image::thumbnail` when no width is given.
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 300;
/// Default wiki host used to build image urls.
pub const DEFAULT_DOMAIN: &str = "en.wikipedia.org";

/// Options for a single parse. Build with `ParseOptionsBuilder`:
///
/// ```
/// use wikimodel::ParseOptionsBuilder;
/// let opts = ParseOptionsBuilder::default()
///     .title("Toronto")
///     .build()
///     .unwrap();
/// assert_eq!(opts.title.as_deref(), Some("Toronto"));
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ParseOptions {
    /// Page title. When absent it is inferred from the first bold text.
    #[builder(default, setter(strip_option))]
    pub title: Option<String>,
    #[builder(default, setter(strip_option))]
    pub page_id: Option<u64>,
    /// Wiki host used for image urls.
    #[builder(default = "DEFAULT_DOMAIN.to_string()")]
    pub domain: String,
    /// Date used by `{{age}}`, `{{currentyear}}` and friends.
    #[builder(default = "Local::now().date_naive()")]
    pub today: NaiveDate,
}

impl ParseOptionsBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(domain) = &self.domain {
            let trimmed = domain.trim();
            if trimmed.is_empty() {
                return Err("domain must not be empty".to_string());
            }
            let parsed = Url::parse(&format!("https://{}/", trimmed))
                .map_err(|e| format!("invalid domain '{}': {}", domain, e))?;
            if parsed.path() != "/" || parsed.host_str().is_none() {
                return Err(format!("invalid domain '{}'", domain));
            }
        }
        if let Some(Some(0)) = &self.page_id {
            return Err("page_id must not be zero".to_string());
        }
        if let Some(Some(title)) = &self.title
            && title.trim().is_empty()
        {
            return Err("title must not be blank".to_string());
        }
        Ok(())
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            title: None,
            page_id: None,
            domain: DEFAULT_DOMAIN.to_string(),
            today: Local::now().date_naive(),
        }
    }
}

impl ParseOptions {
    /// Shorthand for default options carrying a title.
    pub fn titled<S: Into<String>>(title: S) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let opts = ParseOptionsBuilder::default().build().expect("defaults");
        assert_eq!(opts.domain, DEFAULT_DOMAIN);
        assert!(opts.title.is_none());
        assert!(opts.page_id.is_none());
    }

    #[test]
    fn builder_sets_fields() {
        let today = NaiveDate::from_ymd_opt(2020, 5, 1).expect("date");
        let opts = ParseOptionsBuilder::default()
            .title("Toronto")
            .page_id(64646u64)
            .domain("fr.wikipedia.org")
            .today(today)
            .build()
            .expect("valid");
        assert_eq!(opts.title.as_deref(), Some("Toronto"));
        assert_eq!(opts.page_id, Some(64646));
        assert_eq!(opts.domain, "fr.wikipedia.org");
        assert_eq!(opts.today, today);
    }

    #[test]
    fn builder_rejects_bad_domain() {
        let err = ParseOptionsBuilder::default()
            .domain("not a host/with/path")
            .build();
        assert!(err.is_err());
        let err = ParseOptionsBuilder::default().domain("  ").build();
        assert!(err.is_err());
    }

    #[test]
    fn builder_rejects_blank_title() {
        assert!(ParseOptionsBuilder::default().title("   ").build().is_err());
    }

    #[test]
    fn builder_rejects_zero_page_id() {
        assert!(ParseOptionsBuilder::default().page_id(0u64).build().is_err());
    }
}
