//! Link resolution: replaces `[[...]]` and `[http... text]` markup in a piece
//! of text with its display text and returns the links found.

use lazy_regex::{regex, regex_captures};
use regex::Captures;

use crate::wikitext::i18n::{INTERWIKI_PREFIXES, is_category_namespace, is_file_namespace};
use crate::wikitext::types::links::Link;

/// Resolve every link in `text`. Text without link markup is returned
/// unchanged.
pub fn extract_links(text: &str) -> (String, Vec<Link>) {
    let mut links = Vec::new();

    let external = regex!(r"\[(https?|news|ftp|mailto|gopher|irc)(:[^\]| ]{4,})([| ][^\]]*)?\]");
    let text = external.replace_all(text, |caps: &Captures| {
        let site = format!("{}{}", &caps[1], &caps[2]);
        let label = caps
            .get(3)
            .map(|m| m.as_str()[1..].trim().to_string())
            .filter(|s| !s.is_empty());
        let shown = label.clone().unwrap_or_default();
        links.push(Link::external(site, label));
        shown
    });

    let internal = regex!(r"\[\[(.{0,160}?)\]\]('s|[a-z]+)?");
    let text = internal.replace_all(&text, |caps: &Captures| {
        let suffix = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        match resolve_internal(&caps[1], suffix) {
            Resolved::Link(link, shown) => {
                links.push(link);
                shown
            }
            Resolved::Text(shown) => shown,
            Resolved::Literal => caps[0].to_string(),
        }
    });

    (text.into_owned(), links)
}

enum Resolved {
    Link(Link, String),
    /// Dropped link; only its text stays.
    Text(String),
    /// Not a link (category or media); left as-is.
    Literal,
}

fn resolve_internal(inner: &str, suffix: &str) -> Resolved {
    if let Some((ns, _)) = inner.trim().trim_start_matches(':').split_once(':')
        && (is_category_namespace(ns) || is_file_namespace(ns) || ns.trim().eq_ignore_ascii_case("media"))
    {
        return Resolved::Literal;
    }

    let (target, label) = match inner.split_once('|') {
        // `[[Toronto (city)|]]` shows the target
        Some((t, l)) if l.trim().is_empty() => (t, Some(t.trim().to_string())),
        Some((t, l)) => (t, Some(l.trim().to_string())),
        None => (inner, None),
    };
    let target = target.trim().trim_start_matches(':').trim();

    let (page, anchor) = match target.split_once('#') {
        Some((p, a)) => (p.trim(), Some(a.trim().to_string())),
        None => (target, None),
    };

    if page.is_empty() {
        // anchor-only links point into the same page
        let shown = label.or(anchor).unwrap_or_default();
        return Resolved::Text(format!("{}{}", shown, suffix));
    }

    let (wiki, page) = match regex_captures!(r"^([a-zA-Z\-]{1,20}):(.+)$", page) {
        Some((_, site, rest)) if INTERWIKI_PREFIXES.contains(site.to_lowercase().as_str()) => {
            (Some(site.to_lowercase()), rest.trim())
        }
        _ => (None, page),
    };

    // display text defaults to the page as written, before title-casing
    let mut text = label.unwrap_or_else(|| page.to_string());
    if !suffix.is_empty() {
        text.push_str(suffix);
    }
    let page = title_case(page);
    let shown = text.clone();
    let text = if text == page { None } else { Some(text) };

    let link = match wiki {
        Some(w) => Link::interwiki(w, page, anchor, text),
        None => Link::internal(page, anchor, text),
    };
    Resolved::Link(link, shown)
}

/// Upper-case the first character.
pub fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => first.to_uppercase().chain(chars).collect(),
        _ => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wikitext::enums::LinkType;

    #[test]
    fn piped_link() {
        let (text, links) = extract_links("[[Paris|the city]] is nice.");
        assert_eq!(text, "the city is nice.");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].page(), Some("Paris"));
        assert_eq!(links[0].text(), Some("the city"));
    }

    #[test]
    fn lowercase_page_is_title_cased() {
        let (text, links) = extract_links("a [[toronto]] b");
        assert_eq!(text, "a toronto b");
        assert_eq!(links[0].page(), Some("Toronto"));
        assert_eq!(links[0].text(), Some("toronto"));
    }

    #[test]
    fn same_text_is_not_stored() {
        let (_, links) = extract_links("[[Toronto]]");
        assert_eq!(links[0].text(), None);
    }

    #[test]
    fn suffix_folds_into_text() {
        let (text, links) = extract_links("many [[cat]]s and [[Bob]]'s hat");
        assert_eq!(text, "many cats and Bob's hat");
        assert_eq!(links[0].text(), Some("cats"));
        assert_eq!(links[1].text(), Some("Bob's"));
    }

    #[test]
    fn anchors_and_anchor_only() {
        let (text, links) = extract_links("[[Toronto#History|past]] and [[#Geography|below]]");
        assert_eq!(text, "past and below");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].anchor(), Some("History"));
    }

    #[test]
    fn pipe_trick() {
        let (text, links) = extract_links("[[Toronto (city)|]]");
        assert_eq!(text, "Toronto (city)");
        assert_eq!(links[0].page(), Some("Toronto (city)"));
    }

    #[test]
    fn interwiki_and_namespace_prefixes() {
        let (text, links) = extract_links("[[fr:Paris]] and [[Star Wars: A New Hope]]");
        assert_eq!(text, "Paris and Star Wars: A New Hope");
        assert_eq!(links[0].link_type(), LinkType::Interwiki);
        assert_eq!(links[0].wiki(), Some("fr"));
        assert_eq!(links[1].link_type(), LinkType::Internal);
    }

    #[test]
    fn categories_and_files_stay_literal() {
        let src = "x [[Category:Cities]] y";
        let (text, links) = extract_links(src);
        assert_eq!(text, src);
        assert!(links.is_empty());
    }

    #[test]
    fn external_links() {
        let (text, links) = extract_links("see [https://example.org/page Example site] and [http://a.org/x]");
        assert_eq!(text, "see Example site and ");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].site(), Some("https://example.org/page"));
        assert_eq!(links[0].text(), Some("Example site"));
        assert!(links[0].page().is_none());
        assert_eq!(links[1].text(), None);
    }

    #[test]
    fn plain_text_is_untouched() {
        let src = "No links here, just words (and parens).";
        let (text, links) = extract_links(src);
        assert_eq!(text, src);
        assert!(links.is_empty());
    }
}
