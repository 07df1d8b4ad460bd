//! Built-in tables: the data set a fresh context starts from.

use super::{AliasEntry, CssPreferences, TagSettings, Tables};
use crate::options::{CssSyntax, Dialect};
use std::collections::{HashMap, HashSet};

const ALIASES: &[(&str, &str)] = &[
    ("a:link", "a[href=http://]"),
    ("a:mail", "a[href=mailto:]"),
    ("abbr", "abbr[title]"),
    ("bq", "blockquote"),
    ("btn", "button"),
    ("fst", "fieldset"),
    ("leg", "legend"),
    ("sect", "section"),
    ("art", "article"),
    ("hdr", "header"),
    ("ftr", "footer"),
    ("adr", "address"),
    ("dlg", "dialog"),
    ("str", "strong"),
    ("prog", "progress"),
    ("opt", "option"),
    ("tarea", "textarea"),
    ("link:css", "link[href=style.css]"),
    ("link:favicon", "link[rel=\"shortcut icon\" type=image/x-icon href=favicon.ico]"),
    ("meta:utf", "meta[http-equiv=Content-Type content=\"text/html;charset=UTF-8\"]"),
    ("meta:vp", "meta[name=viewport content=\"width=device-width, initial-scale=1.0\"]"),
    ("script:src", "script[src]"),
    ("input:hidden", "input[type=hidden name]"),
    ("input:text", "input[type=text name id]"),
    ("input:email", "input[type=email name id]"),
    ("input:password", "input[type=password name id]"),
    ("input:checkbox", "input[type=checkbox name id]"),
    ("input:radio", "input[type=radio name id]"),
    ("input:submit", "input[type=submit value]"),
    ("input:button", "input[type=button value]"),
    ("btn:s", "button[type=submit]"),
    ("btn:r", "button[type=reset]"),
    ("img:srcset", "img[srcset alt]"),
    ("html:5", "!!!+html[lang=en]>(head>meta[charset=UTF-8]+title{Document})+body"),
    ("ol+", "ol>li"),
    ("ul+", "ul>li"),
    ("dl+", "dl>dt+dd"),
    ("map+", "map>area"),
    ("table+", "table>tr>td"),
    ("colgroup+", "colgroup>col"),
    ("tr+", "tr>td"),
    ("select+", "select>option"),
    ("optgroup+", "optgroup>option"),
];

const SELF_CLOSING: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const BLOCK: &[&str] = &[
    "html", "head", "body", "ul", "ol", "dl", "table", "tr", "thead", "tbody", "tfoot", "select",
    "form", "section", "article", "nav", "header", "footer", "main", "aside",
];

const HTML_SNIPPETS: &[(&str, &str)] = &[
    ("!!!", "<!doctype html>"),
    (
        "!!!4t",
        "<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.01 Transitional//EN\" \"http://www.w3.org/TR/html4/loose.dtd\">",
    ),
    (
        "!!!xt",
        "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Transitional//EN\" \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd\">",
    ),
    ("cc:ie", "<!--[if IE]>\n    ${child}|\n<![endif]-->"),
    ("cc:noie", "<!--[if !IE]><!-->\n    ${child}|\n<!--<![endif]-->"),
];

const HAML_SNIPPETS: &[(&str, &str)] = &[("!!!", "!!! 5"), ("!!!xt", "!!! Transitional")];

const CSS_SNIPPETS: &[(&str, &str)] = &[
    ("m", "margin: |;"),
    ("mt", "margin-top: |;"),
    ("mr", "margin-right: |;"),
    ("mb", "margin-bottom: |;"),
    ("ml", "margin-left: |;"),
    ("p", "padding: |;"),
    ("pt", "padding-top: |;"),
    ("pr", "padding-right: |;"),
    ("pb", "padding-bottom: |;"),
    ("pl", "padding-left: |;"),
    ("w", "width: |;"),
    ("h", "height: |;"),
    ("maw", "max-width: |;"),
    ("mah", "max-height: |;"),
    ("miw", "min-width: |;"),
    ("mih", "min-height: |;"),
    ("t", "top: |;"),
    ("r", "right: |;"),
    ("b", "bottom: |;"),
    ("l", "left: |;"),
    ("z", "z-index: |;"),
    ("zm", "zoom: |;"),
    ("op", "opacity: |;"),
    ("lh", "line-height: |;"),
    ("fw", "font-weight: |;"),
    ("fz", "font-size: |;"),
    ("ff", "font-family: |;"),
    ("c", "color: ${1:#000};"),
    ("bg", "background: ${1:#000};"),
    ("bgc", "background-color: ${1:#fff};"),
    ("bd", "border: ${1:1px} ${2:solid} ${3:#000};"),
    ("bdrs", "border-radius: |;"),
    ("bxsh", "box-shadow: ${1:inset }${2:hoff} ${3:voff} ${4:blur} ${5:color};"),
    ("trf", "transform: |;"),
    ("trs", "transition: ${1:prop} ${2:time};"),
    ("us", "user-select: ${1:none};"),
    ("d", "display: ${1:block};"),
    ("dn", "display: none;"),
    ("db", "display: block;"),
    ("di", "display: inline;"),
    ("dib", "display: inline-block;"),
    ("df", "display: flex;"),
    ("pos", "position: ${1:relative};"),
    ("fl", "float: ${1:left};"),
    ("cl", "clear: ${1:both};"),
    ("ov", "overflow: ${1:hidden};"),
    ("cur", "cursor: ${1:pointer};"),
    ("ta", "text-align: ${1:left};"),
    ("td", "text-decoration: ${1:none};"),
    ("tt", "text-transform: ${1:uppercase};"),
    ("va", "vertical-align: ${1:top};"),
    ("ws", "white-space: ${1:nowrap};"),
    ("fx", "flex: |;"),
    ("fxg", "flex-grow: |;"),
    ("fxs", "flex-shrink: |;"),
    ("ord", "order: |;"),
    ("ct", "content: ${1:''};"),
];

const VENDOR_PREFIXES: &[(&str, &[&str])] = &[
    ("bdrs", &["webkit", "moz"]),
    ("border-radius", &["webkit", "moz"]),
    ("bxsh", &["webkit", "moz"]),
    ("box-shadow", &["webkit", "moz"]),
    ("trf", &["webkit", "moz", "ms", "o"]),
    ("transform", &["webkit", "moz", "ms", "o"]),
    ("trs", &["webkit", "moz", "o"]),
    ("transition", &["webkit", "moz", "o"]),
    ("us", &["webkit", "moz", "ms"]),
    ("user-select", &["webkit", "moz", "ms"]),
];

const UNITLESS: &[&str] = &[
    "z-index",
    "line-height",
    "opacity",
    "font-weight",
    "zoom",
    "flex-grow",
    "flex-shrink",
    "order",
];

const UNIT_ALIASES: &[(&str, &str)] = &[("e", "em"), ("p", "%"), ("x", "ex"), ("r", "rem")];

const DEFAULT_FILTERS: &[(&str, &[&str])] = &[
    ("haml", &["haml"]),
    ("clj", &["hic"]),
    ("cljs", &["hic"]),
    ("cljc", &["hic"]),
    ("edn", &["hic"]),
];

fn pairs(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn lists(entries: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
        .collect()
}

fn tag_settings() -> HashMap<String, TagSettings> {
    let mut settings: HashMap<String, TagSettings> = HashMap::new();
    for name in SELF_CLOSING {
        settings.insert(name.to_string(), TagSettings::self_closing());
    }
    for name in BLOCK {
        settings.insert(name.to_string(), TagSettings::block());
    }
    let defaults: &[(&str, &[(&str, &str)])] = &[
        ("a", &[("href", "")]),
        ("img", &[("src", ""), ("alt", "")]),
        ("link", &[("rel", "stylesheet"), ("href", "")]),
        ("input", &[("type", "text")]),
        ("form", &[("action", "")]),
        ("label", &[("for", "")]),
        ("iframe", &[("src", ""), ("frameborder", "0")]),
        ("area", &[("shape", ""), ("coords", ""), ("href", ""), ("alt", "")]),
    ];
    for (name, attrs) in defaults {
        let entry = settings.entry(name.to_string()).or_default();
        for (key, value) in attrs.iter() {
            entry.default_attr.push((key.to_string(), value.to_string()));
        }
    }
    settings
}

pub(super) fn tables() -> Tables {
    let css = pairs(CSS_SNIPPETS);
    let mut css_snippets = HashMap::new();
    css_snippets.insert(CssSyntax::Standard, css.clone());
    css_snippets.insert(CssSyntax::Indented, css);

    let mut tag_snippets = HashMap::new();
    tag_snippets.insert(Dialect::Html, pairs(HTML_SNIPPETS));
    tag_snippets.insert(Dialect::Haml, pairs(HAML_SNIPPETS));
    tag_snippets.insert(Dialect::Hiccup, HashMap::new());

    Tables {
        aliases: ALIASES
            .iter()
            .map(|(name, source)| (name.to_string(), AliasEntry::from(*source)))
            .collect(),
        tag_snippets,
        tag_settings: tag_settings(),
        css_unit_aliases: pairs(UNIT_ALIASES),
        css_preferences: CssPreferences::default(),
        vendor_prefixes: lists(VENDOR_PREFIXES),
        unitless_properties: UNITLESS.iter().map(|p| p.to_string()).collect::<HashSet<_>>(),
        css_snippets,
        default_filters: lists(DEFAULT_FILTERS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_cover_every_family() {
        let tables = tables();
        assert!(tables.aliases.contains_key("ol+"));
        assert!(tables.css_snippets[&CssSyntax::Standard].contains_key("m"));
        assert!(tables.css_snippets[&CssSyntax::Indented].contains_key("m"));
        assert!(tables.tag_snippets.contains_key(&Dialect::Hiccup));
    }

    #[test]
    fn img_is_self_closing_with_default_attributes() {
        let tables = tables();
        let img = tables.tag_settings("img").unwrap();
        assert!(img.self_closing);
        let keys: Vec<_> = img.default_attr.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["src", "alt"]);
    }
}
