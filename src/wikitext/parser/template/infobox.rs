//! Infobox detection.

use lazy_regex::{regex_is_match, regex_replace};

use crate::wikitext::i18n::{INFOBOX_ALLOW_LIST, INFOBOX_PREFIXES};

/// Whether a normalized template name denotes an infobox.
pub fn is_infobox(name: &str) -> bool {
    let name = name.trim();
    let prefixed = INFOBOX_PREFIXES.iter().any(|p| {
        name.strip_prefix(p)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', ':']))
    });
    prefixed
        || name.ends_with(" infobox")
        || INFOBOX_ALLOW_LIST.contains(name)
        || regex_is_match!(r"^year in [a-z]", name)
}

/// Infobox type: the name without its leading `infobox`.
pub fn infobox_kind(name: &str) -> String {
    regex_replace!(r"^infobox[ :]*", name.trim(), |_| "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_infoboxes() {
        assert!(is_infobox("infobox settlement"));
        assert!(is_infobox("infobox"));
        assert!(is_infobox("ficha de persona"));
        assert!(is_infobox("football club infobox"));
        assert!(is_infobox("taxobox"));
        assert!(is_infobox("year in sports"));
        assert!(!is_infobox("infoboxes list"));
        assert!(!is_infobox("citation needed"));
    }

    #[test]
    fn kind_strips_prefix() {
        assert_eq!(infobox_kind("infobox settlement"), "settlement");
        assert_eq!(infobox_kind("infobox"), "");
        assert_eq!(infobox_kind("taxobox"), "taxobox");
    }
}
