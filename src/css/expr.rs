//! One CSS declaration abbreviation: `-wm-bdrs5!`, `p10-20`, `c#f00`.

use super::args::{parse_args, CssArg};
use crate::context::ExpansionContext;
use crate::options::CssSyntax;
use crate::tables::Tables;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static EXPLICIT_VENDORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-([wmso]+)-").unwrap());

/// Everything up to the first space, `#` or digit.
static KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s#0-9]*").unwrap());

const DEFAULT_VENDORS: &[&str] = &["webkit", "moz", "ms", "o"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "vendors", rename_all = "kebab-case")]
pub enum VendorPrefix {
    None,
    /// Vendors looked up by key or property.
    Auto,
    /// Vendors spelled out in the abbreviation, in that order.
    Explicit(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CssExpression {
    pub key: String,
    pub vendor: VendorPrefix,
    pub important: bool,
    pub args: Vec<CssArg>,
}

fn vendor_name(letter: char) -> &'static str {
    match letter {
        'w' => "webkit",
        'm' => "moz",
        's' => "ms",
        _ => "o",
    }
}

/// Split a token into key, vendor marker, `!important` flag and arguments.
pub fn parse_expression(token: &str, tables: &Tables) -> CssExpression {
    let token = token.trim();
    let (token, important) = match token.strip_suffix('!') {
        Some(stripped) => (stripped, true),
        None => (token, false),
    };

    let (vendor, body) = if let Some(captures) = EXPLICIT_VENDORS.captures(token) {
        let mut vendors: Vec<String> = Vec::new();
        for letter in captures[1].chars() {
            let name = vendor_name(letter).to_string();
            if !vendors.contains(&name) {
                vendors.push(name);
            }
        }
        let end = captures.get(0).map_or(0, |m| m.end());
        (VendorPrefix::Explicit(vendors), &token[end..])
    } else if let Some(body) = token.strip_prefix('-') {
        (VendorPrefix::Auto, body)
    } else {
        (VendorPrefix::None, token)
    };

    let key_end = KEY.find(body).map_or(0, |m| m.end());
    let (mut key, mut arg_string) = (&body[..key_end], body[key_end..].to_string());
    // `ml-10`, `op.5`: the sign or decimal point belongs to the number.
    if key.len() > 1 && arg_string.starts_with(|c: char| c.is_ascii_digit()) {
        if let Some(mark) = key.chars().last().filter(|c| matches!(c, '-' | '.')) {
            key = &key[..key.len() - 1];
            arg_string.insert(0, mark);
        }
    }

    CssExpression {
        key: key.to_string(),
        vendor,
        important,
        args: parse_args(&arg_string, tables),
    }
}

/// Render one expression, vendor-prefixed lines first.
pub fn render_expression(expr: &CssExpression, ctx: &mut ExpansionContext, syntax: CssSyntax) -> String {
    let formatter = ctx.css_formatter(syntax, &expr.key);
    let tables = ctx.tables();
    let property = formatter
        .as_ref()
        .and_then(|template| template.property().map(str::to_string))
        .unwrap_or_else(|| expr.key.clone());
    let unitless = tables.unitless_properties.contains(&property)
        || tables.unitless_properties.contains(&expr.key);
    let args: Vec<String> = expr
        .args
        .iter()
        .flat_map(|arg| arg.render(&tables.css_preferences, unitless))
        .collect();

    if expr.key.is_empty() {
        return args.join(" ");
    }

    let mut line = match &formatter {
        Some(template) => template.format(&args),
        None => {
            tracing::debug!(key = %expr.key, "no css snippet, using the key as property");
            format!("{}: {};", expr.key, args.join(" "))
        }
    };
    if expr.important {
        match line.strip_suffix(';') {
            Some(body) => line = format!("{body} !important;"),
            None => line.push_str(" !important"),
        }
    }
    if syntax == CssSyntax::Indented {
        if let Some(body) = line.strip_suffix(';') {
            line = body.to_string();
        }
    }

    let vendors: Vec<String> = match &expr.vendor {
        VendorPrefix::None => Vec::new(),
        VendorPrefix::Explicit(vendors) => vendors.clone(),
        VendorPrefix::Auto => tables
            .vendor_prefixes
            .get(&expr.key)
            .or_else(|| tables.vendor_prefixes.get(&property))
            .cloned()
            .unwrap_or_else(|| DEFAULT_VENDORS.iter().map(|v| v.to_string()).collect()),
    };
    vendors
        .iter()
        .map(|vendor| format!("-{vendor}-{line}"))
        .chain(std::iter::once(line.clone()))
        .collect::<Vec<_>>()
        .join("\n")
}
