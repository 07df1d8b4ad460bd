//! Lookup tables consumed by the expander.
//!
//! The tables are owned by the host and handed to an
//! [`ExpansionContext`](crate::context::ExpansionContext). They are read-only
//! during expansion, with one exception: alias entries supplied as source text are
//! replaced by their parsed form the first time they are used.
//!
//! [`Tables::builtin`] provides a default data set; hosts replace individual
//! tables to customize expansion.

pub mod builtin;

use crate::markup::ast::Node;
use crate::options::{CssSyntax, Dialect};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// An alias table entry: source text until first use, the parsed tree afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum AliasEntry {
    Source(String),
    Parsed(Node),
}

impl From<&str> for AliasEntry {
    fn from(source: &str) -> Self {
        AliasEntry::Source(source.to_string())
    }
}

/// Per-tag rendering hints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSettings {
    pub self_closing: bool,
    pub block: bool,
    /// Attributes every instance of the tag carries, in output order.
    pub default_attr: Vec<(String, String)>,
}

impl TagSettings {
    pub fn self_closing() -> Self {
        Self {
            self_closing: true,
            ..Self::default()
        }
    }

    pub fn block() -> Self {
        Self {
            block: true,
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.default_attr.push((key.to_string(), value.to_string()));
        self
    }
}

/// Letter case applied to expanded hex colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorCase {
    /// Keep whatever case the abbreviation used.
    #[default]
    Auto,
    Up,
    Down,
}

/// Color formatting preferences for the CSS expander.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CssPreferences {
    /// Collapse `#aabbcc` to `#abc` when every channel pair repeats.
    pub shorten_if_possible: bool,
    pub color_case: ColorCase,
    /// Single-character suffixes allowed after a hex color, mapped to the
    /// argument they expand to (`i` -> `!important`).
    pub trailing_aliases: BTreeMap<String, String>,
}

impl Default for CssPreferences {
    fn default() -> Self {
        let mut trailing_aliases = BTreeMap::new();
        trailing_aliases.insert("i".to_string(), "!important".to_string());
        Self {
            shorten_if_possible: true,
            color_case: ColorCase::Auto,
            trailing_aliases,
        }
    }
}

/// Every lookup structure the expander reads.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    /// Tag name -> replacement abbreviation.
    pub aliases: HashMap<String, AliasEntry>,
    /// Per dialect family: tag name -> snippet template with a `${child}` slot.
    pub tag_snippets: HashMap<Dialect, HashMap<String, String>>,
    pub tag_settings: HashMap<String, TagSettings>,
    /// Shorthand unit -> canonical unit (`p` -> `%`).
    pub css_unit_aliases: HashMap<String, String>,
    pub css_preferences: CssPreferences,
    /// Property key -> vendors emitted for an automatic `-` prefix.
    pub vendor_prefixes: HashMap<String, Vec<String>>,
    /// Properties whose numeric arguments take no inferred unit.
    pub unitless_properties: HashSet<String>,
    /// Per syntax: abbreviation key -> declaration template.
    pub css_snippets: HashMap<CssSyntax, HashMap<String, String>>,
    /// Document extension -> filter chain used when no `|filter` is given.
    pub default_filters: HashMap<String, Vec<String>>,
}

impl Tables {
    /// Tables with no entries. Snippet maps for each dialect and syntax are
    /// present but empty, so a context built from them is valid.
    pub fn empty() -> Self {
        let mut tables = Tables::default();
        for dialect in [Dialect::Html, Dialect::Haml, Dialect::Hiccup] {
            tables.tag_snippets.insert(dialect, HashMap::new());
        }
        for syntax in [CssSyntax::Standard, CssSyntax::Indented] {
            tables.css_snippets.insert(syntax, HashMap::new());
        }
        tables
    }

    /// The default data set.
    pub fn builtin() -> Self {
        builtin::tables()
    }

    pub fn with_alias(mut self, name: &str, expansion: &str) -> Self {
        self.aliases.insert(name.to_string(), expansion.into());
        self
    }

    pub fn with_css_snippet(mut self, syntax: CssSyntax, key: &str, template: &str) -> Self {
        self.css_snippets
            .entry(syntax)
            .or_default()
            .insert(key.to_string(), template.to_string());
        self
    }

    pub fn with_tag_snippet(mut self, dialect: Dialect, name: &str, template: &str) -> Self {
        self.tag_snippets
            .entry(dialect.snippet_family())
            .or_default()
            .insert(name.to_string(), template.to_string());
        self
    }

    pub fn with_css_preferences(mut self, preferences: CssPreferences) -> Self {
        self.css_preferences = preferences;
        self
    }

    pub fn tag_settings(&self, name: &str) -> Option<&TagSettings> {
        self.tag_settings.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tables_have_every_snippet_family() {
        let tables = Tables::empty();
        assert_eq!(tables.tag_snippets.len(), 3);
        assert_eq!(tables.css_snippets.len(), 2);
        assert!(tables.aliases.is_empty());
    }

    #[test]
    fn tag_snippets_for_commented_html_share_the_html_table() {
        let tables = Tables::empty().with_tag_snippet(Dialect::CommentedHtml, "x", "<x/>");
        assert!(tables.tag_snippets[&Dialect::Html].contains_key("x"));
    }

    #[test]
    fn css_preferences_default_to_shortening() {
        let prefs = CssPreferences::default();
        assert!(prefs.shorten_if_possible);
        assert_eq!(prefs.trailing_aliases.get("i").map(String::as_str), Some("!important"));
    }
}
