//! `[[File:...]]` images and `<gallery>` blocks.

use lazy_regex::{regex, regex_captures, regex_is_match};
use regex::Captures;

use crate::wikitext::i18n::is_file_namespace;
use crate::wikitext::parser::sentence::sentence_from_wiki;
use crate::wikitext::scanner::{find_flat, inner, split_top_level};
use crate::wikitext::types::image::Image;
use crate::wikitext::types::templates::Template;

/// `File:Name.jpg` when `target` is in a media namespace.
fn media_title(target: &str) -> Option<String> {
    let (ns, name) = target.trim().split_once([':', '：'])?;
    if !is_file_namespace(ns) || name.trim().is_empty() {
        return None;
    }
    Some(format!("{}:{}", ns.trim(), name.trim()))
}

/// Layout options that are neither alt text nor a caption.
fn is_layout_option(opt: &str) -> bool {
    regex_is_match!(
        r"(?i)^(?:thumb|thumbnail|frame|framed|frameless|border|left|right|center|centre|none|baseline|middle|sub|super|top|text-top|bottom|text-bottom|upright(?:\s*=?\s*[0-9.]+)?|[0-9]*x?[0-9]+\s*px|(?:link|page|lang|class|upright|thumbtime|start|end)\s*=.*)$",
        opt.trim()
    )
}

fn parse_image(body: &str, domain: &str) -> Option<Image> {
    let fields = split_top_level(inner(body), '|');
    let file = media_title(fields.first()?)?;

    let mut alt = None;
    let mut caption = None;
    for opt in fields.iter().skip(1) {
        let opt = opt.trim();
        if opt.is_empty() || is_layout_option(opt) {
            continue;
        }
        if let Some((_, value)) = regex_captures!(r"(?is)^alt\s*=(.*)$", opt) {
            alt = Some(value.trim().to_string());
            continue;
        }
        caption = Some(opt);
    }
    let caption = caption.map(sentence_from_wiki);
    Some(
        Image::new(file, domain, body.to_string())
            .with_alt(alt)
            .with_caption(caption),
    )
}

/// Remove `[[File:...]]` images from `wiki`. Other bracket spans are left
/// alone.
pub fn parse_images(wiki: &str, domain: &str) -> (String, Vec<Image>) {
    let mut out = wiki.to_string();
    let mut images = Vec::new();
    for span in find_flat(wiki, '[', ']') {
        if let Some(img) = parse_image(&span.body, domain) {
            out = out.replacen(&span.raw, "", 1);
            images.push(img);
        }
    }
    (out, images)
}

/// One gallery line: `File:Name.jpg|caption`, namespace optional.
fn gallery_line(line: &str, domain: &str) -> Option<Image> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (target, caption) = match line.split_once('|') {
        Some((t, c)) => (t.trim(), Some(c.trim())),
        None => (line, None),
    };
    let file = media_title(target).unwrap_or_else(|| format!("File:{}", target));
    let caption = caption.filter(|c| !c.is_empty()).map(sentence_from_wiki);
    Some(Image::new(file, domain, line.to_string()).with_caption(caption))
}

/// Remove `<gallery>` blocks from `wiki`, returning their images and one
/// `gallery` record per block.
pub fn parse_galleries(wiki: &str, domain: &str) -> (String, Vec<Image>, Vec<Template>) {
    let mut images = Vec::new();
    let mut records = Vec::new();
    let re = regex!(r"(?i)<gallery[^>]{0,200}>((?s:.)*?)</gallery>");
    let out = re.replace_all(wiki, |caps: &Captures| {
        let found: Vec<Image> = caps[1]
            .split('\n')
            .filter_map(|l| gallery_line(l, domain))
            .collect();
        let mut record = Template::new("gallery").with_wiki(&caps[0]);
        for img in &found {
            record.push_list(img.file());
        }
        records.push(record);
        images.extend(found);
        ""
    });
    if !records.is_empty() {
        log::debug!("found {} galleries with {} images", records.len(), images.len());
    }
    (out.into_owned(), images, records)
}
