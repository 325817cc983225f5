//! Bracket scanning.
//!
//! Finds top-level `{{...}}` (and `[[...]]`) spans with a single-character
//! depth counter, repairs spans left open at end of input, and splits
//! template bodies at top-level separators.
//!
//! The scanner never fails. Unterminated spans are closed by appending the
//! missing closers; `Span::raw` keeps the text exactly as it appeared so the
//! caller can remove it from the source.

use lazy_regex::regex_captures;

use crate::wikitext::config::MAX_TEMPLATE_DEPTH;

/// One top-level bracketed span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Text as it appears in the source.
    pub raw: String,
    /// Balanced text. Equals `raw` unless the span had to be closed.
    pub body: String,
}

impl Span {
    pub fn repaired(&self) -> bool {
        self.raw != self.body
    }
}

/// A template span with its nested template spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSpan {
    pub raw: String,
    pub body: String,
    /// Normalized name, `None` for spans like `{{|x}}` with no usable name.
    pub name: Option<String>,
    /// Templates found inside `body`, one level down.
    pub children: Vec<TemplateSpan>,
}

/// Find the top-level spans opened by a doubled `open` and closed when the
/// depth count returns to zero.
///
/// A span is only kept when it contains both a doubled opener and a doubled
/// closer, which drops stray single-bracket noise such as `{a}`.
pub fn find_flat(text: &str, open: char, close: char) -> Vec<Span> {
    let chars: Vec<char> = text.chars().collect();
    let n = chars.len();
    let double_open: String = [open, open].iter().collect();
    let double_close: String = [close, close].iter().collect();

    let mut out = Vec::new();
    let mut carry = String::new();
    let mut depth = 0usize;
    let mut i = 0usize;

    let keep = |raw: String, body: String, out: &mut Vec<Span>| {
        if body.contains(&double_open) && body.contains(&double_close) {
            out.push(Span { raw, body });
        }
    };

    while i < n {
        let ch = chars[i];
        if depth == 0 {
            if ch == open && i + 1 < n && chars[i + 1] == open {
                depth = 2;
                carry.push(open);
                carry.push(open);
                i += 2;
            } else {
                i += 1;
            }
            continue;
        }
        // a lone opener followed by text is not a span
        if depth == 1 && ch != open && ch != close {
            depth = 0;
            carry.clear();
            i += 1;
            continue;
        }
        carry.push(ch);
        if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                let raw = std::mem::take(&mut carry);
                keep(raw.clone(), raw, &mut out);
            }
        }
        i += 1;
    }

    if depth > 0 && !carry.is_empty() {
        let mut body = carry.clone();
        body.extend(std::iter::repeat_n(close, depth));
        log::debug!("closing unterminated span of {} chars", carry.chars().count());
        keep(carry, body, &mut out);
    }
    out
}

/// Find all top-level templates in `text` together with their nested
/// templates, down to `MAX_TEMPLATE_DEPTH` levels.
pub fn find_templates(text: &str) -> Vec<TemplateSpan> {
    find_templates_at(text, 1)
}

fn find_templates_at(text: &str, level: usize) -> Vec<TemplateSpan> {
    find_flat(text, '{', '}')
        .into_iter()
        .map(|span| {
            let children = if level < MAX_TEMPLATE_DEPTH {
                find_templates_at(inner(&span.body), level + 1)
            } else {
                Vec::new()
            };
            TemplateSpan {
                name: template_name(&span.body),
                raw: span.raw,
                body: span.body,
                children,
            }
        })
        .collect()
}

/// Strip one layer of `{{`/`}}` (or `[[`/`]]`) from a span body.
pub fn inner(body: &str) -> &str {
    let s = body
        .strip_prefix("{{")
        .or_else(|| body.strip_prefix("[["))
        .unwrap_or(body);
    s.strip_suffix("}}")
        .or_else(|| s.strip_suffix("]]"))
        .unwrap_or(s)
}

/// Name of a template body: the text up to the first `|`, newline or closing
/// braces, with any `:` suffix dropped, lowercased, with underscores as
/// spaces.
pub fn template_name(body: &str) -> Option<String> {
    let content = inner(body);
    let end = content
        .find(['|', '\n'])
        .unwrap_or(content.len());
    let mut name = &content[..end];
    if let Some(pos) = name.find(':') {
        name = &name[..pos];
    }
    let name = name.trim().replace('_', " ").to_lowercase();
    let name = collapse_spaces(&name);
    if name.is_empty() { None } else { Some(name) }
}

/// Name plus the value after a leading colon, for `{{lc:Text}}` forms.
pub fn colon_argument(body: &str) -> Option<String> {
    let (_, value) = regex_captures!(r"^\{\{[^|:\n]+:([^|\n]*)", body)?;
    let value = value.trim();
    if value.is_empty() { None } else { Some(value.to_string()) }
}

fn collapse_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split by `sep` only at top level (not inside nested `{{ }}` or `[[ ]]`).
///
/// Operates on char boundaries and keeps a depth counter per construct. A
/// closer with no matching opener is treated as text.
pub fn split_top_level(s: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut cur = String::new();

    let chs: Vec<char> = s.chars().collect();
    let n = chs.len();
    let mut i = 0usize;
    let mut depth_brace = 0usize;
    let mut depth_bracket = 0usize;

    while i < n {
        let ch = chs[i];
        let doubled = i + 1 < n && chs[i + 1] == ch;
        if doubled && (ch == '{' || ch == '}' || ch == '[' || ch == ']') {
            match ch {
                '{' => depth_brace += 1,
                '}' => depth_brace = depth_brace.saturating_sub(1),
                '[' => depth_bracket += 1,
                _ => depth_bracket = depth_bracket.saturating_sub(1),
            }
            cur.push(ch);
            cur.push(ch);
            i += 2;
            continue;
        }

        if ch == sep && depth_brace == 0 && depth_bracket == 0 {
            parts.push(std::mem::take(&mut cur));
        } else {
            cur.push(ch);
        }
        i += 1;
    }

    parts.push(cur);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_flat_templates() {
        let spans = find_flat("a {{b}} c {{d|{{e}}}} f", '{', '}');
        let raws: Vec<&str> = spans.iter().map(|s| s.raw.as_str()).collect();
        assert_eq!(raws, vec!["{{b}}", "{{d|{{e}}}}"]);
        assert!(spans.iter().all(|s| !s.repaired()));
    }

    #[test]
    fn single_brace_noise_is_skipped() {
        let spans = find_flat("{a} {{b}} {c}", '{', '}');
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].raw, "{{b}}");
    }

    #[test]
    fn unterminated_span_is_repaired() {
        let spans = find_flat("text {{cite web|title=x", '{', '}');
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].raw, "{{cite web|title=x");
        assert_eq!(spans[0].body, "{{cite web|title=x}}");
        assert!(spans[0].repaired());
    }

    #[test]
    fn nested_templates_are_children() {
        let found = find_templates("{{a|{{b|{{c|{{d}}}}}}}}");
        assert_eq!(found.len(), 1);
        let a = &found[0];
        assert_eq!(a.name.as_deref(), Some("a"));
        let b = &a.children[0];
        assert_eq!(b.name.as_deref(), Some("b"));
        let c = &b.children[0];
        assert_eq!(c.name.as_deref(), Some("c"));
        // level three does not descend further
        assert!(c.children.is_empty());
    }

    #[test]
    fn names_are_normalized() {
        assert_eq!(
            template_name("{{Infobox_settlement\n|name=x}}").as_deref(),
            Some("infobox settlement")
        );
        assert_eq!(template_name("{{ Cite  Web |url=x}}").as_deref(), Some("cite web"));
        assert_eq!(template_name("{{DEFAULTSORT:Smith, John}}").as_deref(), Some("defaultsort"));
        assert_eq!(template_name("{{|x}}"), None);
        assert_eq!(colon_argument("{{lc:HELLO}}").as_deref(), Some("HELLO"));
    }

    #[test]
    fn finds_links_with_brackets() {
        let spans = find_flat("see [[File:A.jpg|thumb|a [[b]] c]] here", '[', ']');
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].raw, "[[File:A.jpg|thumb|a [[b]] c]]");
    }

    #[test]
    fn split_respects_nesting() {
        let parts = split_top_level("a|[[b|c]]|{{d|e}}|f", '|');
        assert_eq!(parts, vec!["a", "[[b|c]]", "{{d|e}}", "f"]);
    }
}
