//! Built-in template handlers.
//!
//! Handlers receive the tokenized template and return replacement text and,
//! for templates that carry data (coordinates, quotes, "main article"
//! pointers, maintenance tags), a record.

use chrono::{Datelike, NaiveDate};
use itertools::Itertools;

use crate::wikitext::parser::template::registry::{
    Handler, Rendered, TemplateContext, TemplateRegistry,
};
use crate::wikitext::scanner::colon_argument;
use crate::wikitext::types::templates::Template;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub(crate) fn register_builtin(reg: &mut TemplateRegistry) {
    // inline text wrappers
    for name in [
        "nowrap", "nobr", "small", "smaller", "big", "larger", "nobold", "noitalic", "font",
        "ipa", "ipac-en", "resize", "sic", "ill", "interlanguage link", "keep together",
        "trunc", "tooltip", "abbr", "linktext", "visible anchor", "vanchor", "mvar", "math",
        "midsize", "lang-text", "transl",
    ] {
        reg.register(name, &["text"], first_value);
    }
    reg.register("lang", &["code", "text"], lang);
    reg.register("sort", &["key", "text"], sort);
    reg.register("url", &["url", "text"], url);
    reg.register("nihongo", &["english", "kanji", "romaji"], nihongo);
    reg.register("convert", &["num", "unit", "to"], convert);
    reg.register("cvt", &["num", "unit", "to"], convert);
    reg.register("formatnum", &["number"], formatnum);
    reg.register("lc", &["text"], lowercase);
    reg.register("uc", &["text"], uppercase);
    reg.register("lcfirst", &["text"], lowercase_first);
    reg.register("ucfirst", &["text"], uppercase_first);

    // punctuation
    for (name, handler) in [
        ("ndash", ndash as Handler),
        ("snd", spaced_ndash),
        ("spaced ndash", spaced_ndash),
        ("mdash", mdash),
        ("nbsp", space),
        ("thinsp", space),
        ("br", space),
        ("break", space),
        ("!", pipe),
        ("=", equals),
        ("'", apostrophe),
        ("dot", dot),
        ("·", dot),
        ("middot", dot),
        ("bull", bullet),
        ("•", bullet),
    ] {
        reg.register(name, &[], handler);
    }

    // lists
    for name in [
        "ubl",
        "unbulleted list",
        "plainlist",
        "plain list",
        "flatlist",
        "hlist",
        "bulleted list",
        "collapsible list",
    ] {
        reg.register(name, &[], joined_list);
    }

    // dates
    reg.register("currentyear", &[], current_year);
    reg.register("currentmonthname", &[], current_month_name);
    reg.register("currentmonth", &[], current_month);
    reg.register("currentday", &[], current_day);
    for name in ["birth date", "death date", "start date", "end date", "dob", "film date", "date"] {
        reg.register(name, &["year", "month", "day"], date);
    }
    reg.register("birth date and age", &["year", "month", "day"], birth_date_and_age);
    reg.register("bda", &["year", "month", "day"], birth_date_and_age);
    reg.register(
        "death date and age",
        &["year", "month", "day", "birth_year", "birth_month", "birth_day"],
        death_date_and_age,
    );
    reg.register("age", &["year", "month", "day", "year2", "month2", "day2"], age);
    reg.register("as of", &["year", "month", "day"], as_of);
    reg.register("circa", &["year"], circa);
    reg.register("c.", &["year"], circa);
    reg.register("marriage", &["spouse", "from", "to"], marriage);
    reg.register("married", &["spouse", "from", "to"], marriage);

    // data-carrying templates
    reg.register("coord", &[], coord);
    for name in ["quote", "cquote", "blockquote", "quotation", "quote box"] {
        reg.register(name, &["text", "author"], quote);
    }
    for name in ["main", "main article", "see also", "further", "details", "for", "about"] {
        reg.register(name, &[], pointer_record);
    }
    for name in [
        "citation needed",
        "cn",
        "fact",
        "clarify",
        "when",
        "who",
        "dubious",
        "according to whom",
        "better source needed",
        "failed verification",
        "by whom",
    ] {
        reg.register(name, &["date"], record_only);
    }
    reg.register("flag", &["country"], flag);
    reg.register("flagcountry", &["country"], flag);
    reg.register("flagicon", &["country"], nothing);
}

fn value(tpl: &Template, key: &str) -> String {
    tpl.get(key).unwrap_or_default().trim().to_string()
}

/// The keyed text, else the first leftover positional, else a `{{name:x}}`
/// colon argument.
fn first_value(tpl: &Template, _: &TemplateContext) -> Rendered {
    let text = tpl
        .get("text")
        .map(str::to_string)
        .or_else(|| tpl.list().first().cloned())
        .or_else(|| colon_argument(tpl.wikitext()))
        .unwrap_or_default();
    Rendered::text(text)
}

fn nothing(_: &Template, _: &TemplateContext) -> Rendered {
    Rendered::empty()
}

fn lang(tpl: &Template, _: &TemplateContext) -> Rendered {
    Rendered::text(value(tpl, "text"))
}

fn sort(tpl: &Template, _: &TemplateContext) -> Rendered {
    let text = tpl.get("text").unwrap_or(tpl.get("key").unwrap_or_default());
    Rendered::text(text)
}

fn url(tpl: &Template, _: &TemplateContext) -> Rendered {
    let text = tpl.get("text").unwrap_or(tpl.get("url").unwrap_or_default());
    Rendered::text(text)
}

fn nihongo(tpl: &Template, _: &TemplateContext) -> Rendered {
    let english = value(tpl, "english");
    let kanji = value(tpl, "kanji");
    let text = match (english.is_empty(), kanji.is_empty()) {
        (false, false) => format!("{} ({})", english, kanji),
        (true, _) => kanji,
        (false, true) => english,
    };
    Rendered::text(text)
}

fn convert(tpl: &Template, _: &TemplateContext) -> Rendered {
    let num = value(tpl, "num");
    let unit = value(tpl, "unit");
    // {{convert|1|to|3|km}} ranges
    if matches!(unit.as_str(), "to" | "-" | "–" | "and" | "or" | "by" | "x") {
        let second = value(tpl, "to");
        let range_unit = tpl.list().first().map(|u| u.trim()).unwrap_or_default();
        let text = format!("{} {} {} {}", num, unit, second, range_unit);
        return Rendered::text(text.trim());
    }
    Rendered::text(format!("{} {}", num, unit).trim())
}

fn formatnum(tpl: &Template, _: &TemplateContext) -> Rendered {
    let raw = value(tpl, "number");
    let (int, frac) = match raw.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (raw.clone(), None),
    };
    let (sign, digits) = match int.strip_prefix('-') {
        Some(d) => ("-", d.to_string()),
        None => ("", int.clone()),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Rendered::text(raw);
    }
    let grouped = digits
        .chars()
        .rev()
        .chunks(3)
        .into_iter()
        .map(|c| c.collect::<String>())
        .join(",")
        .chars()
        .rev()
        .collect::<String>();
    let text = match frac {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    };
    Rendered::text(text)
}

fn text_or_colon(tpl: &Template) -> String {
    tpl.get("text")
        .map(str::to_string)
        .or_else(|| colon_argument(tpl.wikitext()))
        .unwrap_or_default()
}

fn lowercase(tpl: &Template, _: &TemplateContext) -> Rendered {
    Rendered::text(text_or_colon(tpl).to_lowercase())
}

fn uppercase(tpl: &Template, _: &TemplateContext) -> Rendered {
    Rendered::text(text_or_colon(tpl).to_uppercase())
}

fn lowercase_first(tpl: &Template, _: &TemplateContext) -> Rendered {
    let text = text_or_colon(tpl);
    let mut chars = text.chars();
    let out = match chars.next() {
        Some(c) => c.to_lowercase().chain(chars).collect(),
        None => String::new(),
    };
    Rendered::text(out)
}

fn uppercase_first(tpl: &Template, _: &TemplateContext) -> Rendered {
    let text = text_or_colon(tpl);
    let mut chars = text.chars();
    let out = match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    Rendered::text(out)
}

fn ndash(_: &Template, _: &TemplateContext) -> Rendered {
    Rendered::text("–")
}

fn spaced_ndash(_: &Template, _: &TemplateContext) -> Rendered {
    Rendered::text(" – ")
}

fn mdash(_: &Template, _: &TemplateContext) -> Rendered {
    Rendered::text("—")
}

fn space(_: &Template, _: &TemplateContext) -> Rendered {
    Rendered::text(" ")
}

fn pipe(_: &Template, _: &TemplateContext) -> Rendered {
    Rendered::text("|")
}

fn equals(_: &Template, _: &TemplateContext) -> Rendered {
    Rendered::text("=")
}

fn apostrophe(_: &Template, _: &TemplateContext) -> Rendered {
    Rendered::text("'")
}

fn dot(_: &Template, _: &TemplateContext) -> Rendered {
    Rendered::text(" · ")
}

fn bullet(_: &Template, _: &TemplateContext) -> Rendered {
    Rendered::text(" • ")
}

/// List templates: positional items, or `*` lines inside a single value.
fn joined_list(tpl: &Template, _: &TemplateContext) -> Rendered {
    let items: Vec<String> = tpl
        .list()
        .iter()
        .flat_map(|v| v.split('\n'))
        .map(|line| line.trim().trim_start_matches(['*', '#']).trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();
    Rendered::text(items.join(", "))
}

fn current_year(_: &Template, ctx: &TemplateContext) -> Rendered {
    Rendered::text(ctx.today.year().to_string())
}

fn current_month_name(_: &Template, ctx: &TemplateContext) -> Rendered {
    Rendered::text(month_name(ctx.today.month()))
}

fn current_month(_: &Template, ctx: &TemplateContext) -> Rendered {
    Rendered::text(format!("{:02}", ctx.today.month()))
}

fn current_day(_: &Template, ctx: &TemplateContext) -> Rendered {
    Rendered::text(ctx.today.day().to_string())
}

fn month_name(month: u32) -> &'static str {
    MONTHS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or_default()
}

/// Month number from a number or a (possibly abbreviated) English name.
fn parse_month(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }
    let lower = raw.to_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|m| m.to_lowercase().starts_with(&lower))
        .map(|i| i as u32 + 1)
}

struct PartialDate {
    year: i32,
    month: Option<u32>,
    day: Option<u32>,
}

impl PartialDate {
    fn read(tpl: &Template, year: &str, month: &str, day: &str) -> Option<Self> {
        let y = tpl.get(year)?.trim();
        // {{start date|1950-03-10}}
        if let Ok(d) = NaiveDate::parse_from_str(y, "%Y-%m-%d") {
            return Some(Self {
                year: d.year(),
                month: Some(d.month()),
                day: Some(d.day()),
            });
        }
        let year = y.parse::<i32>().ok()?;
        let month = tpl.get(month).and_then(parse_month);
        let day = month
            .and(tpl.get(day))
            .and_then(|d| d.trim().parse::<u32>().ok());
        Some(Self { year, month, day })
    }

    fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month?, self.day.unwrap_or(1))
    }

    fn render(&self, day_first: bool) -> String {
        match (self.month, self.day) {
            (Some(m), Some(d)) if day_first => format!("{} {} {}", d, month_name(m), self.year),
            (Some(m), Some(d)) => format!("{} {}, {}", month_name(m), d, self.year),
            (Some(m), None) => format!("{} {}", month_name(m), self.year),
            _ => self.year.to_string(),
        }
    }
}

fn day_first(tpl: &Template) -> bool {
    tpl.get("df")
        .is_some_and(|v| matches!(v.trim().to_lowercase().as_str(), "y" | "yes" | "1"))
}

fn years_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years
}

fn date(tpl: &Template, _: &TemplateContext) -> Rendered {
    match PartialDate::read(tpl, "year", "month", "day") {
        Some(d) => Rendered::text(d.render(day_first(tpl))),
        None => Rendered::text(tpl.get("year").unwrap_or_default()),
    }
}

fn birth_date_and_age(tpl: &Template, ctx: &TemplateContext) -> Rendered {
    let Some(born) = PartialDate::read(tpl, "year", "month", "day") else {
        return Rendered::empty();
    };
    let text = born.render(day_first(tpl));
    match born.to_date() {
        Some(d) => Rendered::text(format!("{} (age {})", text, years_between(d, ctx.today))),
        None => Rendered::text(format!("{} (age {})", text, ctx.today.year() - born.year)),
    }
}

fn death_date_and_age(tpl: &Template, _: &TemplateContext) -> Rendered {
    let Some(died) = PartialDate::read(tpl, "year", "month", "day") else {
        return Rendered::empty();
    };
    let text = died.render(day_first(tpl));
    let born = PartialDate::read(tpl, "birth_year", "birth_month", "birth_day");
    let aged = match (died.to_date(), born.as_ref().and_then(PartialDate::to_date)) {
        (Some(d), Some(b)) => Some(years_between(b, d)),
        _ => born.map(|b| died.year - b.year),
    };
    match aged {
        Some(a) => Rendered::text(format!("{} (aged {})", text, a)),
        None => Rendered::text(text),
    }
}

fn age(tpl: &Template, ctx: &TemplateContext) -> Rendered {
    let Some(from) = PartialDate::read(tpl, "year", "month", "day") else {
        return Rendered::empty();
    };
    let to = PartialDate::read(tpl, "year2", "month2", "day2")
        .and_then(|d| d.to_date())
        .unwrap_or(ctx.today);
    let years = match from.to_date() {
        Some(f) => years_between(f, to),
        None => to.year() - from.year,
    };
    Rendered::text(years.to_string())
}

fn as_of(tpl: &Template, _: &TemplateContext) -> Rendered {
    match PartialDate::read(tpl, "year", "month", "day") {
        Some(d) => Rendered::text(format!("As of {}", d.render(day_first(tpl)))),
        None => Rendered::empty(),
    }
}

fn circa(tpl: &Template, _: &TemplateContext) -> Rendered {
    Rendered::text(format!("c. {}", value(tpl, "year")).trim().to_string())
}

fn marriage(tpl: &Template, _: &TemplateContext) -> Rendered {
    let spouse = value(tpl, "spouse");
    let from = value(tpl, "from");
    let to = tpl
        .get("to")
        .or(tpl.get("end"))
        .unwrap_or_default()
        .trim()
        .to_string();
    let text = match (from.is_empty(), to.is_empty()) {
        (true, _) => spouse,
        (false, true) => format!("{} (m. {})", spouse, from),
        (false, false) => format!("{} (m. {}–{})", spouse, from, to),
    };
    Rendered::text(text)
}

/// DMS groups closed by hemisphere letters, or a bare decimal pair.
fn coord(tpl: &Template, _: &TemplateContext) -> Rendered {
    let mut nums: Vec<f64> = Vec::new();
    let mut lat = None;
    let mut lon = None;
    for item in tpl.list() {
        let item = item.trim();
        if let Ok(n) = item.parse::<f64>() {
            nums.push(n);
            continue;
        }
        let deg = nums
            .iter()
            .zip([1.0, 60.0, 3600.0])
            .map(|(v, div)| v / div)
            .sum::<f64>();
        match item.to_uppercase().as_str() {
            "N" => lat = Some(deg),
            "S" => lat = Some(-deg),
            "E" => lon = Some(deg),
            "W" => lon = Some(-deg),
            _ => break,
        }
        nums.clear();
    }
    if lat.is_none() && lon.is_none() && nums.len() >= 2 {
        lat = Some(nums[0]);
        lon = Some(nums[1]);
    }

    let mut record = Template::new("coord").with_wiki(tpl.wikitext());
    for arg in tpl.arguments() {
        record.set_arg(arg.name.as_str(), arg.value.as_str());
    }
    if let (Some(lat), Some(lon)) = (lat, lon) {
        record.set_arg("lat", format!("{:.5}", lat).trim_end_matches('0').trim_end_matches('.'));
        record.set_arg("lon", format!("{:.5}", lon).trim_end_matches('0').trim_end_matches('.'));
    } else {
        log::debug!("coord template without a usable position: {}", tpl.wikitext());
    }
    Rendered::record(record)
}

fn quote(tpl: &Template, _: &TemplateContext) -> Rendered {
    let text = tpl
        .get("text")
        .or(tpl.get("quote"))
        .unwrap_or_default()
        .to_string();
    let mut record = Template::new("quote").with_wiki(tpl.wikitext());
    record.set_arg("text", text.as_str());
    let author = tpl.get("author").or(tpl.get("sign")).unwrap_or_default();
    if !author.is_empty() {
        record.set_arg("author", author);
    }
    Rendered::both(text, record)
}

/// `{{main|A|B}}` style pointers: record the pages, render nothing.
fn pointer_record(tpl: &Template, _: &TemplateContext) -> Rendered {
    let mut record = tpl.clone();
    let pages = tpl.list().iter().map(|p| p.trim()).filter(|p| !p.is_empty()).join("|");
    if !pages.is_empty() {
        record.set_arg("pages", pages);
    }
    Rendered::record(record)
}

fn record_only(tpl: &Template, _: &TemplateContext) -> Rendered {
    Rendered::record(tpl.clone())
}

fn flag(tpl: &Template, _: &TemplateContext) -> Rendered {
    Rendered::text(value(tpl, "country"))
}
