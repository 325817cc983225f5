//! Page-level passes that run before sections are split: noise removal,
//! redirect and disambiguation detection, and category extraction.

use lazy_regex::{regex, regex_captures, regex_replace_all};
use regex::Captures;

use crate::wikitext::config::REDIRECT_SCAN_LIMIT;
use crate::wikitext::i18n::{
    DISAMBIGUATION_TEMPLATES, REDIRECT_WORDS, is_category_namespace,
};
use crate::wikitext::parser::links::title_case;
use crate::wikitext::scanner::find_templates;
use crate::wikitext::types::document::RedirectTarget;

/// Strip markup that never carries content: comments, behaviour switches,
/// signatures, rules and presentation-only tags.
pub fn preprocess(wiki: &str) -> String {
    let wiki = regex_replace_all!(r"<!--(?s:.)*?-->", wiki, |_| "");
    let wiki = regex_replace_all!(r"(?i)__(?:NOTOC|NOEDITSECTION|FORCETOC|TOC|NOINDEX|INDEX|DISAMBIG)__", &wiki, |_| "");
    let wiki = regex_replace_all!(r"~{2,5}", &wiki, |_| "");
    let wiki = wiki.replace('\r', "");
    let wiki = wiki.replace('\u{3002}', ". ");
    let wiki = regex_replace_all!(r"(?m)^-{4,}\s*$", &wiki, |_| "");
    let wiki = wiki.replace("{{}}", " – ").replace("{{\\}}", " / ");
    let wiki = wiki.replace("&nbsp;", " ");
    let wiki = kill_xml(&wiki);
    let wiki = regex_replace_all!(r"\([,;: ]+\)", &wiki, |_| "");
    wiki.trim().to_string()
}

/// Drop tags whose content is not prose, and unwrap simple inline tags.
fn kill_xml(wiki: &str) -> String {
    let wiki = regex_replace_all!(r"(?i) ?<references ?/?> ?", wiki, |_| " ");
    let wiki = regex_replace_all!(
        r"(?is)< ?(table|code|score|data|categorytree|charinsert|hiero|imagemap|inputbox|references|source|syntaxhighlight|timeline|maplink|math|templatestyles) ?[^>]{0,200}?>.*?< ?/ ?(?:table|code|score|data|categorytree|charinsert|hiero|imagemap|inputbox|references|source|syntaxhighlight|timeline|maplink|math|templatestyles) ?>",
        &wiki,
        |_, _| " "
    );
    let wiki = regex_replace_all!(
        r#"(?i) ?< ?(?:span|div|table|data) [a-zA-Z0-9=%.\-#:;'" ]{2,100}/? ?> ?"#,
        &wiki,
        |_| " "
    );
    let wiki = regex_replace_all!(r"(?s)<i>(.*?)</i>", &wiki, |_, inner: &str| format!("''{}''", inner));
    let wiki = regex_replace_all!(r"(?s)<b>(.*?)</b>", &wiki, |_, inner: &str| format!("'''{}'''", inner));
    let wiki = regex_replace_all!(
        r"(?i) ?<[ /]?(?:p|sub|sup|span|nowiki|div|table|br|tr|td|th|pre|hr|u|abbr|bdi|bdo|blockquote|cite|del|dfn|em|ins|kbd|mark|q|s|small|big|center|h[0-9])[ /]?> ?",
        &wiki,
        |_| " "
    );
    let wiki = regex_replace_all!(r"(?i) ?< ?br ?/ ?> ?", &wiki, |_| " ");
    wiki.into_owned()
}

/// Whether the page opens with a redirect magic word.
pub fn is_redirect(wiki: &str) -> bool {
    redirect_head(wiki).is_some()
}

/// The scanned head of a redirect page, when it is one.
fn redirect_head(wiki: &str) -> Option<&str> {
    let head = match wiki.char_indices().nth(REDIRECT_SCAN_LIMIT) {
        Some((i, _)) => &wiki[..i],
        None => wiki,
    };
    let (_, word) = regex_captures!(r"(?i)^\s*#\s*([^\s\[:]+)\s*:?\s*\[\[", head)?;
    let word = word.to_lowercase();
    REDIRECT_WORDS.contains(&word.as_str()).then_some(head)
}

/// Target of a redirect page: the first link after the magic word.
pub fn parse_redirect(wiki: &str) -> Option<RedirectTarget> {
    let head = redirect_head(wiki)?;
    let (_, inner) = regex_captures!(r"\[\[([^\]]{1,250}?)\]\]", head)?;
    let (target, text) = match inner.split_once('|') {
        Some((t, l)) => (t, Some(l.trim().to_string()).filter(|l| !l.is_empty())),
        None => (inner, None),
    };
    let (page, anchor) = match target.split_once('#') {
        Some((p, a)) => (p.trim(), Some(a.trim().to_string()).filter(|a| !a.is_empty())),
        None => (target.trim(), None),
    };
    if page.is_empty() {
        return None;
    }
    log::debug!("redirect to '{}'", page);
    Some(RedirectTarget {
        page: title_case(page),
        anchor,
        text,
    })
}

/// Disambiguation pages carry a disambiguation template, the
/// `__DISAMBIG__` switch, or `(disambiguation)` in their title.
pub fn is_disambiguation(wiki: &str, title: Option<&str>) -> bool {
    if title.is_some_and(|t| t.to_lowercase().contains("(disambiguation)")) {
        return true;
    }
    if wiki.contains("__DISAMBIG__") {
        return true;
    }
    find_templates(wiki).iter().any(|span| {
        span.name
            .as_deref()
            .is_some_and(|n| DISAMBIGUATION_TEMPLATES.contains(n))
    })
}

/// Remove `[[Category:...]]` links, returning the category names in order.
pub fn extract_categories(wiki: &str) -> (String, Vec<String>) {
    let mut categories: Vec<String> = Vec::new();
    let re = regex!(r"\[\[\s*([^\]|:]{1,40}?)\s*:\s*([^\]|]{1,200}?)\s*(?:\|[^\]]*)?\]\]\n?");
    let out = re.replace_all(wiki, |caps: &Captures| {
        if !is_category_namespace(&caps[1]) {
            return caps[0].to_string();
        }
        let name = caps[2].trim().to_string();
        if !name.is_empty() && !categories.contains(&name) {
            categories.push(name);
        }
        String::new()
    });
    (out.into_owned(), categories)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_noise() {
        let out = preprocess("A<!-- hidden -->B __NOTOC__ ~~~~\r\n----\nC&nbsp;D ( ; )");
        assert_eq!(out, "AB  \n\nC D");
    }

    #[test]
    fn unwraps_inline_tags() {
        let out = preprocess("x <b>bold</b> and <i>it</i><br/>y");
        assert_eq!(out, "x '''bold''' and ''it'' y");
        let out = preprocess("a <math>x^2</math> b");
        assert_eq!(out, "a   b");
    }

    #[test]
    fn redirects() {
        assert!(is_redirect("#REDIRECT [[Toronto]]"));
        assert!(is_redirect("#weiterleitung [[Berlin]]"));
        assert!(!is_redirect("Toronto is a city. #REDIRECT [[X]]"));
        let target = parse_redirect("#REDIRECT [[toronto#History|old town]]").expect("target");
        assert_eq!(target.page, "Toronto");
        assert_eq!(target.anchor.as_deref(), Some("History"));
        assert_eq!(target.text.as_deref(), Some("old town"));
    }

    #[test]
    fn redirect_must_start_near_the_top() {
        let near = format!("{}#REDIRECT [[Toronto]]", " ".repeat(10));
        assert!(is_redirect(&near));
        let far = format!("{}#REDIRECT [[Toronto]]", " ".repeat(1200));
        assert!(!is_redirect(&far));
        assert!(parse_redirect(&far).is_none());
    }

    #[test]
    fn disambiguation() {
        assert!(is_disambiguation("'''Mercury''' may refer to:\n{{disambiguation}}", None));
        assert!(is_disambiguation("text", Some("Mercury (disambiguation)")));
        assert!(!is_disambiguation("{{Infobox planet}}", Some("Mercury")));
    }

    #[test]
    fn categories() {
        let (rest, cats) =
            extract_categories("Text.\n[[Category:Cities in Ontario|Toronto]]\n[[Kategorie:Stadt]]\n[[Star Wars: A New Hope]]");
        assert_eq!(cats, vec!["Cities in Ontario", "Stadt"]);
        assert_eq!(rest, "Text.\n[[Star Wars: A New Hope]]");
    }
}
