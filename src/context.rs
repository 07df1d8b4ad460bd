//! The expansion context: lookup tables plus the caches filled from them.
//!
//! Caches are the only state that survives between expansion calls:
//!
//! - alias entries supplied as source text are replaced by their parsed tree
//!   (stored back into [`Tables::aliases`]);
//! - compiled markup snippets, keyed by dialect family and tag name;
//! - compiled CSS snippet formatters, keyed by syntax and abbreviation key.
//!
//! Every method that fills a cache takes `&mut self`, so a context is used by one
//! expansion at a time. Hosts that expand concurrently share it behind a mutex.

use crate::css::template::CssTemplate;
use crate::error::ConfigError;
use crate::markup::ast::Node;
use crate::options::{CssSyntax, Dialect};
use crate::render::filter::Filter;
use crate::render::snippet::MarkupSnippet;
use crate::tables::{AliasEntry, Tables};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::sync::Arc;

/// Bounds applied to a single expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum nesting of sub-expressions (groups, `>` and `+` operands).
    pub max_depth: usize,
    /// Maximum number of nodes a multiplier may generate.
    pub max_nodes: usize,
    /// Maximum words a single lorem marker may request.
    pub max_lorem_words: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_nodes: 10_000,
            max_lorem_words: 10_000,
        }
    }
}

pub struct ExpansionContext {
    tables: Tables,
    markup_snippets: HashMap<(Dialect, String), Arc<MarkupSnippet>>,
    css_formatters: HashMap<(CssSyntax, String), Arc<CssTemplate>>,
    rng: StdRng,
    limits: Limits,
}

impl std::fmt::Debug for ExpansionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpansionContext")
            .field("aliases", &self.tables.aliases.len())
            .field("markup_snippets", &self.markup_snippets.len())
            .field("css_formatters", &self.css_formatters.len())
            .field("limits", &self.limits)
            .finish()
    }
}

impl ExpansionContext {
    /// A context over the built-in tables with an entropy-seeded random source.
    pub fn new() -> Self {
        Self::from_parts(Tables::builtin(), StdRng::from_entropy(), Limits::default())
    }

    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    fn from_parts(tables: Tables, rng: StdRng, limits: Limits) -> Self {
        Self {
            tables,
            markup_snippets: HashMap::new(),
            css_formatters: HashMap::new(),
            rng,
            limits,
        }
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Swap in reconfigured tables. Every cache is dropped.
    pub fn replace_tables(&mut self, tables: Tables) -> Result<(), ConfigError> {
        validate(&tables)?;
        self.tables = tables;
        self.markup_snippets.clear();
        self.css_formatters.clear();
        Ok(())
    }

    pub(crate) fn alias(&self, name: &str) -> Option<&AliasEntry> {
        self.tables.aliases.get(name)
    }

    pub(crate) fn cache_alias(&mut self, name: &str, node: Node) {
        self.tables
            .aliases
            .insert(name.to_string(), AliasEntry::Parsed(node));
    }

    /// The compiled snippet replacing tag `name` in `dialect`, compiling it on first use.
    pub(crate) fn markup_snippet(&mut self, dialect: Dialect, name: &str) -> Option<Arc<MarkupSnippet>> {
        let family = dialect.snippet_family();
        let key = (family, name.to_string());
        if let Some(snippet) = self.markup_snippets.get(&key) {
            return Some(Arc::clone(snippet));
        }
        let source = self.tables.tag_snippets.get(&family)?.get(name)?;
        let snippet = Arc::new(MarkupSnippet::compile(source));
        tracing::debug!(tag = name, ?family, "compiled markup snippet");
        self.markup_snippets.insert(key, Arc::clone(&snippet));
        Some(snippet)
    }

    /// The compiled formatter for CSS key `key` in `syntax`, compiling it on first use.
    pub(crate) fn css_formatter(&mut self, syntax: CssSyntax, key: &str) -> Option<Arc<CssTemplate>> {
        let cache_key = (syntax, key.to_string());
        if let Some(template) = self.css_formatters.get(&cache_key) {
            return Some(Arc::clone(template));
        }
        let source = self.tables.css_snippets.get(&syntax)?.get(key)?;
        let template = Arc::new(CssTemplate::compile(source));
        tracing::debug!(key, ?syntax, slots = template.slot_count(), "compiled css snippet");
        self.css_formatters.insert(cache_key, Arc::clone(&template));
        Some(template)
    }
}

impl Default for ExpansionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder validating the tables before a context exists.
#[derive(Debug, Default)]
pub struct ContextBuilder {
    tables: Option<Tables>,
    seed: Option<u64>,
    limits: Limits,
}

impl ContextBuilder {
    pub fn tables(mut self, tables: Tables) -> Self {
        self.tables = Some(tables);
        self
    }

    /// Seed the random source, making lorem output reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn build(self) -> Result<ExpansionContext, ConfigError> {
        let tables = self.tables.ok_or(ConfigError::MissingTable("tables"))?;
        validate(&tables)?;
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(ExpansionContext::from_parts(tables, rng, self.limits))
    }
}

fn validate(tables: &Tables) -> Result<(), ConfigError> {
    for (dialect, label) in [
        (Dialect::Html, "html tag snippets"),
        (Dialect::Haml, "haml tag snippets"),
        (Dialect::Hiccup, "hiccup tag snippets"),
    ] {
        if !tables.tag_snippets.contains_key(&dialect) {
            return Err(ConfigError::MissingTable(label));
        }
    }
    for (syntax, label) in [
        (CssSyntax::Standard, "css snippets"),
        (CssSyntax::Indented, "indented css snippets"),
    ] {
        if !tables.css_snippets.contains_key(&syntax) {
            return Err(ConfigError::MissingTable(label));
        }
    }
    for (extension, names) in &tables.default_filters {
        let first = names.first().ok_or_else(|| {
            ConfigError::InvalidDefaultFilter(format!("'{extension}' maps to an empty list"))
        })?;
        match Filter::from_name(first) {
            Some(filter) if filter.dialect().is_some() => {}
            _ => {
                return Err(ConfigError::InvalidDefaultFilter(format!(
                    "'{extension}' must start with a markup renderer, found '{first}'"
                )))
            }
        }
        if let Some(unknown) = names.iter().find(|name| Filter::from_name(name).is_none()) {
            return Err(ConfigError::InvalidDefaultFilter(format!(
                "'{extension}' names unknown filter '{unknown}'"
            )));
        }
    }
    Ok(())
}
