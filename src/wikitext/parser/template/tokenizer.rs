//! Template tokenizer: turns a `{{name|a|key=value}}` body into a
//! `Template` record with keyed arguments and leftover positional values.

use lazy_regex::regex_captures;

use crate::wikitext::i18n::{RESERVED_KEYS, STYLING_KEYS};
use crate::wikitext::scanner::{inner, split_top_level, template_name};
use crate::wikitext::types::templates::Template;

/// Split a template body into its fields at top-level pipes. The name is
/// the first field. Fields are trimmed and trailing empty fields dropped.
pub fn pipe_split(body: &str) -> Vec<String> {
    let mut fields: Vec<String> = split_top_level(inner(body), '|')
        .into_iter()
        .map(|f| f.trim().to_string())
        .collect();
    while fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// `key=value` split, when the text before `=` looks like a key.
fn key_value(field: &str) -> Option<(String, String)> {
    let (_, key, value) = regex_captures!(r"(?s)^([\p{L}\p{N}._/\- '()\t]+?)\s*=(.*)$", field)?;
    let key = key.trim().to_lowercase();
    if key.is_empty() {
        return None;
    }
    let key = if RESERVED_KEYS.contains(&key.as_str()) {
        format!("_{}", key)
    } else {
        key
    };
    Some((key, value.trim().to_string()))
}

/// Tokenize `body` into a record named after the template.
///
/// Positional values take their keys from `order`, in order; the rest stay
/// in the record's list. Empty and presentation-only keys are dropped.
pub fn tokenize(body: &str, order: &[&str]) -> Template {
    let name = template_name(body).unwrap_or_default();
    let mut tpl = Template::new(name).with_wiki(body);

    let fields = pipe_split(body);
    let mut next_key = order.iter();
    for field in fields.iter().skip(1) {
        if let Some((key, value)) = key_value(field) {
            if value.is_empty() || STYLING_KEYS.contains(&key.as_str()) {
                continue;
            }
            tpl.set_arg(key, value.as_str());
            continue;
        }
        match next_key.next() {
            Some(key) => {
                if !field.is_empty() {
                    tpl.set_arg(*key, field.as_str());
                }
            }
            None => tpl.push_list(field.as_str()),
        }
    }

    retarget_first_positional(&mut tpl, order);
    tpl
}

/// An explicit `1=` means the first positional value was written as a key.
/// Move it where a positional value would have gone.
fn retarget_first_positional(tpl: &mut Template, order: &[&str]) {
    if tpl.get("1").is_none() || tpl.get("2").is_some() {
        return;
    }
    match order.first() {
        Some(first) if tpl.get(first).is_none() => {
            if let Some(v) = tpl.remove_arg("1") {
                tpl.set_arg(*first, v);
            }
        }
        None if tpl.list().is_empty() => {
            if let Some(v) = tpl.remove_arg("1") {
                tpl.list_mut().insert(0, v);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_and_positional() {
        let t = tokenize("{{Birth date|1950|3|10|df=y}}", &["year", "month", "day"]);
        assert_eq!(t.name(), "birth date");
        assert_eq!(t.get("year"), Some("1950"));
        assert_eq!(t.get("day"), Some("10"));
        assert_eq!(t.get("df"), Some("y"));
        assert!(t.list().is_empty());
    }

    #[test]
    fn extra_positionals_go_to_list() {
        let t = tokenize("{{ubl|one|two|three}}", &[]);
        assert_eq!(t.list(), &["one", "two", "three"]);
    }

    #[test]
    fn nested_values_are_not_split() {
        let t = tokenize(
            "{{Infobox city\n| name = [[Springfield|Spring]]\n| mayor = {{nowrap|A B}}\n| style = x\n}}",
            &[],
        );
        assert_eq!(t.get("name"), Some("[[Springfield|Spring]]"));
        assert_eq!(t.get("mayor"), Some("{{nowrap|A B}}"));
        assert!(t.get("style").is_none());
    }

    #[test]
    fn reserved_keys_are_prefixed() {
        let t = tokenize("{{x|template=a|List=b}}", &[]);
        assert_eq!(t.get("_template"), Some("a"));
        assert_eq!(t.get("_list"), Some("b"));
    }

    #[test]
    fn explicit_one_is_retargeted() {
        let t = tokenize("{{nowrap|1=a = b}}", &["text"]);
        assert_eq!(t.get("text"), Some("a = b"));
        assert!(t.get("1").is_none());
        let t = tokenize("{{foo|1=x}}", &[]);
        assert_eq!(t.list(), &["x"]);
    }

    #[test]
    fn trailing_empty_fields_dropped() {
        assert_eq!(pipe_split("{{a|b||}}"), vec!["a", "b"]);
        assert_eq!(pipe_split("{{a}}"), vec!["a"]);
    }
}
