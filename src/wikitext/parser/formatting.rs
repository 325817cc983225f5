//! Bold and italic quote markup.

use lazy_regex::regex;
use regex::Captures;

use crate::wikitext::types::sentence::Formatting;

/// Strip `''`-style emphasis from `text`, recording what was bold or italic.
///
/// Longest runs are handled first: five quotes are bold and italic, four are
/// bold text wrapped in single quotes, three bold, two italic.
pub fn extract_formatting(text: &str) -> (String, Formatting) {
    let mut fmt = Formatting::default();
    if !text.contains("''") {
        return (text.to_string(), fmt);
    }

    let text = regex!(r"'''''(.+?)'''''").replace_all(text, |caps: &Captures| {
        let inner = caps[1].to_string();
        fmt.bold.push(inner.clone());
        fmt.italic.push(inner.clone());
        inner
    });
    let text = regex!(r"''''(.+?)''''").replace_all(&text, |caps: &Captures| {
        let inner = format!("'{}'", &caps[1]);
        fmt.bold.push(inner.clone());
        inner
    });
    let text = regex!(r"'''(.+?)'''").replace_all(&text, |caps: &Captures| {
        let inner = caps[1].to_string();
        fmt.bold.push(inner.clone());
        inner
    });
    let text = regex!(r"''(.+?)''").replace_all(&text, |caps: &Captures| {
        let inner = caps[1].to_string();
        fmt.italic.push(inner.clone());
        inner
    });

    (text.into_owned(), fmt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_and_italic() {
        let (text, fmt) = extract_formatting("'''Toronto''' is a ''big'' city.");
        assert_eq!(text, "Toronto is a big city.");
        assert_eq!(fmt.bold, vec!["Toronto"]);
        assert_eq!(fmt.italic, vec!["big"]);
    }

    #[test]
    fn bold_italic_and_quoted_bold() {
        let (text, fmt) = extract_formatting("'''''both''''' and ''''quoted''''");
        assert_eq!(text, "both and 'quoted'");
        assert_eq!(fmt.bold, vec!["both", "'quoted'"]);
        assert_eq!(fmt.italic, vec!["both"]);
    }

    #[test]
    fn apostrophes_are_kept() {
        let (text, fmt) = extract_formatting("Bob's dog isn't here");
        assert_eq!(text, "Bob's dog isn't here");
        assert!(fmt.is_empty());
    }
}
