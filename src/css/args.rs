//! Declaration arguments: numbers with units, hex colors, literals.

use crate::tables::{ColorCase, CssPreferences, Tables};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?(?:[0-9]+\.?[0-9]*|\.[0-9]+))([a-zA-Z%]*)").unwrap());

static HEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#([0-9a-fA-F]{1,6})(rgb)?").unwrap());

static LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumericArg {
    pub value: String,
    pub unit: String,
    /// The unit was filled in, not written.
    pub inferred: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorArg {
    /// Six hex digits, case as written.
    pub hex6: String,
    pub rgb_mode: bool,
    pub trailing_alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CssArg {
    Numeric(NumericArg),
    Color(ColorArg),
    Literal(String),
}

/// Parse an argument string such as `10-20`, `1.5`, `#f00i` or `10px solid`.
pub fn parse_args(input: &str, tables: &Tables) -> Vec<CssArg> {
    let mut args = Vec::new();
    let separator = |c: char| c.is_whitespace() || c == '+';
    let mut rest = input.trim_start_matches(separator);
    while !rest.is_empty() {
        let (arg, after) = numeric(rest, tables)
            .or_else(|| color(rest, &tables.css_preferences))
            .unwrap_or_else(|| literal(rest));
        args.push(arg);
        rest = after.trim_start_matches(separator);
    }
    args
}

fn numeric<'a>(input: &'a str, tables: &Tables) -> Option<(CssArg, &'a str)> {
    let captures = NUMBER.captures(input)?;
    let whole = captures.get(0)?;
    let value = captures.get(1)?.as_str().to_string();
    let written = captures.get(2).map_or("", |m| m.as_str());
    let (unit, inferred) = if written.is_empty() {
        let unit = if value.contains('.') { "em" } else { "px" };
        (unit.to_string(), true)
    } else {
        let unit = tables
            .css_unit_aliases
            .get(written)
            .cloned()
            .unwrap_or_else(|| written.to_string());
        (unit, false)
    };
    Some((
        CssArg::Numeric(NumericArg {
            value,
            unit,
            inferred,
        }),
        &input[whole.end()..],
    ))
}

fn color<'a>(input: &'a str, preferences: &CssPreferences) -> Option<(CssArg, &'a str)> {
    let captures = HEX.captures(input)?;
    let whole = captures.get(0)?;
    let digits = captures.get(1)?.as_str();
    let mut rest = &input[whole.end()..];
    let trailing_alias = preferences
        .trailing_aliases
        .keys()
        .find(|alias| rest.starts_with(alias.as_str()))
        .cloned();
    if let Some(alias) = &trailing_alias {
        rest = &rest[alias.len()..];
    }
    Some((
        CssArg::Color(ColorArg {
            hex6: expand_hex(digits),
            rgb_mode: captures.get(2).is_some(),
            trailing_alias,
        }),
        rest,
    ))
}

fn literal(input: &str) -> (CssArg, &str) {
    let end = LITERAL.find(input).map_or(input.len(), |m| m.end());
    (CssArg::Literal(input[..end].to_string()), &input[end..])
}

/// `f` -> `ffffff`, `ab` -> `ababab`, `f0a` -> `ff00aa`; longer runs are
/// doubled and cut to six digits.
pub fn expand_hex(digits: &str) -> String {
    match digits.len() {
        1 => digits.repeat(6),
        2 => digits.repeat(3),
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        _ => digits.repeat(2).chars().take(6).collect(),
    }
}

impl CssArg {
    /// The rendered form. A color with a trailing alias yields a second value.
    pub fn render(&self, preferences: &CssPreferences, unitless: bool) -> Vec<String> {
        match self {
            CssArg::Numeric(number) => {
                if unitless && number.inferred {
                    vec![number.value.clone()]
                } else {
                    vec![format!("{}{}", number.value, number.unit)]
                }
            }
            CssArg::Color(color) => {
                let mut rendered = vec![render_color(color, preferences)];
                if let Some(suffix) = color
                    .trailing_alias
                    .as_ref()
                    .and_then(|alias| preferences.trailing_aliases.get(alias))
                {
                    rendered.push(suffix.clone());
                }
                rendered
            }
            CssArg::Literal(text) => vec![text.clone()],
        }
    }
}

fn render_color(color: &ColorArg, preferences: &CssPreferences) -> String {
    if color.rgb_mode {
        let channel = |i: usize| u8::from_str_radix(&color.hex6[i..i + 2], 16).unwrap_or(0);
        return format!("rgb({},{},{})", channel(0), channel(2), channel(4));
    }
    let hex = if preferences.shorten_if_possible {
        shorten(&color.hex6)
    } else {
        color.hex6.clone()
    };
    let hex = match preferences.color_case {
        ColorCase::Auto => hex,
        ColorCase::Up => hex.to_uppercase(),
        ColorCase::Down => hex.to_lowercase(),
    };
    format!("#{hex}")
}

/// `ff0000` -> `f00` when every channel is a repeated digit.
fn shorten(hex6: &str) -> String {
    let bytes = hex6.as_bytes();
    let repeated = bytes.len() == 6
        && bytes
            .chunks(2)
            .all(|pair| pair[0].eq_ignore_ascii_case(&pair[1]));
    if repeated {
        bytes.chunks(2).map(|pair| pair[0] as char).collect()
    } else {
        hex6.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn render_all(input: &str, preferences: &CssPreferences, unitless: bool) -> Vec<String> {
        let tables = Tables::builtin().with_css_preferences(preferences.clone());
        parse_args(input, &tables)
            .iter()
            .flat_map(|arg| arg.render(preferences, unitless))
            .collect()
    }

    #[rstest]
    #[case("10", &["10px"])]
    #[case("1.5", &["1.5em"])]
    #[case("10-20", &["10px", "-20px"])]
    #[case("10p", &["10%"])]
    #[case("2e.5", &["2em", ".5em"])]
    #[case("10 auto", &["10px", "auto"])]
    #[case("1px solid", &["1px", "solid"])]
    #[case("1+#000", &["1px", "#000"])]
    fn numbers_and_units(#[case] input: &str, #[case] expected: &[&str]) {
        assert_eq!(render_all(input, &CssPreferences::default(), false), expected);
    }

    #[test]
    fn unitless_drops_only_inferred_units() {
        let prefs = CssPreferences::default();
        assert_eq!(render_all("10", &prefs, true), vec!["10"]);
        assert_eq!(render_all("10px", &prefs, true), vec!["10px"]);
    }

    #[rstest]
    #[case("f", "ffffff")]
    #[case("ab", "ababab")]
    #[case("f0a", "ff00aa")]
    #[case("1234", "123412")]
    #[case("123456", "123456")]
    fn hex_expansion(#[case] digits: &str, #[case] expected: &str) {
        assert_eq!(expand_hex(digits), expected);
    }

    #[test]
    fn color_preferences() {
        let mut prefs = CssPreferences::default();
        assert_eq!(render_all("#f00", &prefs, false), vec!["#f00"]);
        prefs.shorten_if_possible = false;
        assert_eq!(render_all("#f00", &prefs, false), vec!["#ff0000"]);
        prefs.color_case = ColorCase::Up;
        assert_eq!(render_all("#a1b", &prefs, false), vec!["#AA11BB"]);
    }

    #[test]
    fn rgb_marker_and_trailing_alias() {
        let prefs = CssPreferences::default();
        assert_eq!(render_all("#f80rgb", &prefs, false), vec!["rgb(255,136,0)"]);
        assert_eq!(render_all("#fffi", &prefs, false), vec!["#fff", "!important"]);
    }
}
