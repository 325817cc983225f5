//! Locale word lists used by the detectors.
//!
//! Kept as plain data so extending a language is a one-line change. Lookups
//! are always made against lowercased, trimmed input.

use std::collections::HashSet;

use lazy_regex::Lazy;

/// Template names that mark a disambiguation page.
pub static DISAMBIGUATION_TEMPLATES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "disambiguation",
        "disambig",
        "disamb",
        "dab",
        "dis",
        "geodis",
        "hndis",
        "hndis-cleanup",
        "mathdab",
        "numberdis",
        "letter-number combination disambiguation",
        "roaddis",
        "schooldis",
        "shipindex",
        "set index article",
        "species latin name disambiguation",
        "begriffsklärung",
        "homonymie",
        "desambiguación",
        "desambiguação",
        "disambigua",
        "dubbelzinnig",
        "förgrening",
        "täsmennyssivu",
        "неоднозначность",
        "aimai",
        "消歧义",
        "曖昧さ回避",
    ]
    .into_iter()
    .collect()
});

/// Words that, followed by a space, colon or end of name, mark an infobox.
pub const INFOBOX_PREFIXES: &[&str] = &[
    "infobox",
    "info box",
    "ficha",
    "infoboks",
    "infoboxe",
    "inligtingskas",
    "bilgi kutusu",
    "boîte",
    "taxobox",
    "صندوق معلومات",
    "карточка",
    "infocaseta",
];

/// Templates that are infoboxes in practice even though their names do not
/// say so.
pub static INFOBOX_ALLOW_LIST: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "gnf protein box",
        "automatic taxobox",
        "chembox",
        "editnotice",
        "geobox",
        "hockey team player",
        "hockey team start",
        "military person",
        "musical artist",
        "ncaa team season",
        "nfl player",
        "nfl team season",
        "nhl team player",
        "speciesbox",
        "taxobox",
        "drugbox",
        "football club",
        "planetbox",
    ]
    .into_iter()
    .collect()
});

/// Namespace prefixes of embedded media (`[[File:...]]`).
pub const FILE_NAMESPACES: &[&str] = &[
    "file", "image", "fichier", "datei", "archivo", "imagen", "immagine", "ficheiro", "bestand",
    "plik", "файл", "ファイル", "文件", "ملف", "dosya", "tiedosto", "fil", "soubor", "kép",
];

/// Namespace prefixes of category links.
pub const CATEGORY_NAMESPACES: &[&str] = &[
    "category", "kategorie", "catégorie", "categoría", "categoria", "categorie", "kategoria",
    "категория", "カテゴリ", "分类", "تصنيف", "kategori", "luokka", "kategorija",
];

/// Magic words that open a redirect page (`#REDIRECT [[Target]]`).
pub const REDIRECT_WORDS: &[&str] = &[
    "redirect",
    "weiterleitung",
    "redirection",
    "redirección",
    "rinvia",
    "doorverwijzing",
    "przekieruj",
    "перенаправление",
    "転送",
    "重定向",
    "تحويل",
    "yönlendirme",
    "uudelleenohjaus",
    "omdirigering",
];

/// Sites reachable through `[[prefix:Page]]` interwiki links.
pub static INTERWIKI_PREFIXES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // sister projects
        "wikipedia", "w", "wiktionary", "wikt", "wikiquote", "q", "wikisource", "s",
        "wikibooks", "b", "wikinews", "n", "wikivoyage", "voy", "wikiversity", "v",
        "wikidata", "d", "commons", "c", "species", "wikispecies", "meta", "m",
        "mediawikiwiki", "mw", "foundation", "wmf", "phabricator", "phab", "outreach",
        // language editions
        "en", "de", "fr", "es", "it", "ja", "ru", "zh", "pt", "pl", "nl", "sv", "uk", "vi",
        "ar", "fa", "he", "ko", "tr", "cs", "fi", "hu", "id", "no", "nb", "ro", "ca", "da",
        "sr", "bg", "el", "ms", "sk", "lt", "sl", "et", "hr", "eo", "eu", "hi", "th", "simple",
        "la", "gl", "az", "be", "ka", "kk", "hy", "ur", "ta", "bn", "af", "is", "ga", "cy",
    ]
    .into_iter()
    .collect()
});

/// Lowercase abbreviations that do not end a sentence when followed by a
/// period.
pub static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // honorifics and titles
        "dr", "mr", "mrs", "ms", "mssrs", "prof", "sr", "jr", "sen", "rep", "gov", "gen",
        "lt", "col", "capt", "cmdr", "sgt", "cpl", "adm", "maj", "rev", "hon", "pres", "supt",
        "fr", "messrs", "mme", "mlle", "esq",
        // places
        "st", "mt", "ft", "ave", "blvd", "rd", "hwy", "ste", "bldg", "ariz", "calif", "colo",
        "conn", "fla", "ill", "ind", "kan", "kans", "mass", "mich", "minn", "miss", "nev",
        "okla", "ore", "penn", "tenn", "tex", "wash", "wis", "wyo",
        // months and days
        "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
        "mon", "tue", "tues", "wed", "thu", "thurs", "fri", "sat", "sun",
        // organizations
        "inc", "ltd", "co", "corp", "bros", "dept", "univ", "assn", "assoc", "est",
        // misc
        "no", "nos", "vol", "vols", "vs", "etc", "approx", "fig", "figs", "pp", "ed", "eds",
        "cf", "al", "ca", "circa", "op", "cit", "ibid", "var", "misc", "min", "max",
        "e.g", "i.e", "u.s", "u.k", "u.s.a", "a.m", "p.m", "b.c", "a.d", "b.c.e", "c.e",
        "ph.d", "m.d", "b.a", "m.a",
    ]
    .into_iter()
    .collect()
});

/// Headings of reference sections that are pruned when empty.
pub const REFERENCE_SECTIONS: &[&str] = &[
    "references",
    "reference",
    "notes",
    "notes and references",
    "einzelnachweise",
    "referencias",
    "références",
    "notes et références",
    "脚注",
    "referenser",
    "bronnen",
    "примечания",
];

/// Column names that suggest an unmarked first table row is a header.
pub const TABLE_HEADER_WORDS: &[&str] = &[
    "name",
    "age",
    "born",
    "date",
    "year",
    "city",
    "country",
    "population",
    "count",
    "number",
];

/// Templates removed without output or record.
pub const IGNORED_TEMPLATES: &[&str] = &[
    "toc",
    "toc left",
    "toc right",
    "tocright",
    "notoc",
    "clear",
    "clr",
    "-",
    "reflist",
    "refbegin",
    "refend",
    "notelist",
    "references",
    "portal",
    "portal bar",
    "commons category",
    "commons",
    "authority control",
    "good article",
    "featured article",
    "featured list",
    "pp",
    "pp-protected",
    "pp-semi-indef",
    "pp-move-indef",
    "use dmy dates",
    "use mdy dates",
    "use british english",
    "use american english",
    "use canadian english",
    "use australian english",
    "use indian english",
    "short description",
    "italic title",
    "lowercase title",
    "defaultsort",
    "stub",
    "coord missing",
    "wikiquote",
    "wiktionary",
    "wikisource",
    "wikibooks",
    "wikinews",
    "wikivoyage",
    "sister project links",
    "navboxes",
    "navbox",
    "sidebar",
    "column-width",
    "col-begin",
    "col-break",
    "col-end",
    "div col",
    "div col end",
    "end",
    "engvarb",
    "good",
    "anchor",
];

/// Template names whose records become `Reference` values.
pub const CITATION_TEMPLATES: &[&str] = &["citation", "cite"];

/// Presentation-only keys dropped from tokenized templates.
pub const STYLING_KEYS: &[&str] = &[
    "classname",
    "style",
    "align",
    "margin",
    "left",
    "break",
    "boxsize",
    "framestyle",
    "item_style",
    "collapsible",
    "list_style_type",
    "list-style-type",
    "colwidth",
];

/// Keys that would collide with the record's own fields.
pub const RESERVED_KEYS: &[&str] = &["template", "list", "prototype"];

/// Returns true when a lowercased section title names a reference section.
pub fn is_reference_title(title: &str) -> bool {
    let t = title.trim().trim_end_matches(':').trim().to_lowercase();
    REFERENCE_SECTIONS.contains(&t.as_str())
}

/// Returns true when `name` is a category namespace prefix.
pub fn is_category_namespace(name: &str) -> bool {
    CATEGORY_NAMESPACES.contains(&name.trim().to_lowercase().as_str())
}

/// Returns true when `name` (lowercased) is a media namespace prefix.
pub fn is_file_namespace(name: &str) -> bool {
    FILE_NAMESPACES.contains(&name.trim().to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_titles() {
        assert!(is_reference_title("References"));
        assert!(is_reference_title(" Einzelnachweise: "));
        assert!(!is_reference_title("History"));
    }

    #[test]
    fn lookups() {
        assert!(is_file_namespace("File"));
        assert!(is_file_namespace("Datei"));
        assert!(!is_file_namespace("Category"));
        assert!(is_category_namespace("Kategorie"));
        assert!(INTERWIKI_PREFIXES.contains("fr"));
        assert!(ABBREVIATIONS.contains("dr"));
        assert!(DISAMBIGUATION_TEMPLATES.contains("dab"));
    }
}
