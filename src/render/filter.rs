//! Filter chains.
//!
//! A chain is a list of stages applied left to right. The first stage receives
//! the markup tree; a markup renderer turns it into text, and every later stage
//! maps text to text. Running a renderer on text is an ordering error. The escape
//! filter accepts either: given a tree, it renders it with the default chain first.

use super::render_tree;
use crate::context::ExpansionContext;
use crate::error::{ExpandError, Result};
use crate::markup::Node;
use crate::options::{Dialect, RenderOptions};
use crate::tables::Tables;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// A markup renderer.
    Markup(Dialect),
    /// XML-escape `&`, `<` and `>`.
    Escape,
}

impl Filter {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "html" => Some(Filter::Markup(Dialect::Html)),
            "c" => Some(Filter::Markup(Dialect::CommentedHtml)),
            "haml" => Some(Filter::Markup(Dialect::Haml)),
            "hic" => Some(Filter::Markup(Dialect::Hiccup)),
            "e" => Some(Filter::Escape),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Filter::Markup(dialect) => dialect.filter_name(),
            Filter::Escape => "e",
        }
    }

    /// The dialect rendered by this filter, `None` for text-only stages.
    pub fn dialect(self) -> Option<Dialect> {
        match self {
            Filter::Markup(dialect) => Some(dialect),
            Filter::Escape => None,
        }
    }

    fn apply(self, stage: Stage, ctx: &mut ExpansionContext, options: &RenderOptions) -> Result<Stage> {
        match (self, stage) {
            (Filter::Markup(dialect), Stage::Tree(tree)) => {
                Ok(Stage::Text(render_tree(&tree, dialect, ctx, options)))
            }
            (Filter::Markup(_), Stage::Text(_)) => Err(ExpandError::FilterOrder(self.name().to_string())),
            (Filter::Escape, Stage::Tree(tree)) => {
                let rendered = FilterChain::default_for(ctx.tables(), options).run(tree, ctx, options)?;
                Ok(Stage::Text(escape(&rendered)))
            }
            (Filter::Escape, Stage::Text(text)) => Ok(Stage::Text(escape(&text))),
        }
    }
}

/// Value flowing between stages.
enum Stage {
    Tree(Node),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChain {
    filters: Vec<Filter>,
}

impl FilterChain {
    /// Resolve `names` in order. Any unknown name rejects the whole chain.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let filters = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                Filter::from_name(name).ok_or_else(|| ExpandError::UnknownFilter(name.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { filters })
    }

    /// The chain used when the abbreviation names no filter: the mapping for the
    /// document extension, else the configured output dialect.
    pub fn default_for(tables: &Tables, options: &RenderOptions) -> Self {
        let mapped = options
            .document_extension
            .as_deref()
            .and_then(|extension| tables.default_filters.get(extension));
        if let Some(names) = mapped {
            match Self::from_names(names.as_slice()) {
                Ok(chain) if !chain.filters.is_empty() => return chain,
                _ => tracing::warn!(?names, "ignoring unusable default filter list"),
            }
        }
        Self {
            filters: vec![Filter::Markup(options.output_dialect)],
        }
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn run(&self, tree: Node, ctx: &mut ExpansionContext, options: &RenderOptions) -> Result<String> {
        let mut stage = Stage::Tree(tree);
        for filter in &self.filters {
            tracing::trace!(filter = filter.name(), "running filter");
            stage = filter.apply(stage, ctx, options)?;
        }
        Ok(match stage {
            Stage::Text(text) => text,
            Stage::Tree(tree) => render_tree(&tree, options.output_dialect, ctx, options),
        })
    }
}

pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Tag;
    use rstest::rstest;

    fn context() -> ExpansionContext {
        ExpansionContext::builder()
            .tables(Tables::empty())
            .build()
            .unwrap()
    }

    #[rstest]
    #[case("html", Filter::Markup(Dialect::Html))]
    #[case("c", Filter::Markup(Dialect::CommentedHtml))]
    #[case("haml", Filter::Markup(Dialect::Haml))]
    #[case("hic", Filter::Markup(Dialect::Hiccup))]
    #[case("e", Filter::Escape)]
    fn names_round_trip(#[case] name: &str, #[case] filter: Filter) {
        assert_eq!(Filter::from_name(name), Some(filter));
        assert_eq!(filter.name(), name);
    }

    #[test]
    fn unknown_name_rejects_the_chain() {
        let err = FilterChain::from_names(&["html", "xml"]).unwrap_err();
        assert_eq!(err, ExpandError::UnknownFilter("xml".to_string()));
    }

    #[test]
    fn renderer_after_text_is_an_ordering_error() {
        let chain = FilterChain::from_names(&["html", "haml"]).unwrap();
        let err = chain
            .run(Node::tag(Tag::new("p")), &mut context(), &RenderOptions::default())
            .unwrap_err();
        assert_eq!(err, ExpandError::FilterOrder("haml".to_string()));
    }

    #[test]
    fn escape_on_a_tree_renders_first() {
        let chain = FilterChain::from_names(&["e"]).unwrap();
        let out = chain
            .run(Node::tag(Tag::new("p")), &mut context(), &RenderOptions::default())
            .unwrap();
        assert_eq!(out, "&lt;p&gt;&lt;/p&gt;");
    }

    #[test]
    fn escape_handles_ampersand_first() {
        assert_eq!(escape("<a & b>"), "&lt;a &amp; b&gt;");
    }

    #[test]
    fn extension_mapping_picks_the_default_chain() {
        let mut tables = Tables::empty();
        tables
            .default_filters
            .insert("haml".to_string(), vec!["haml".to_string()]);
        let options = RenderOptions::default().with_extension("haml");
        assert_eq!(
            FilterChain::default_for(&tables, &options).filters(),
            &[Filter::Markup(Dialect::Haml)]
        );
        let options = RenderOptions::default().with_dialect(Dialect::Hiccup);
        assert_eq!(
            FilterChain::default_for(&tables, &options).filters(),
            &[Filter::Markup(Dialect::Hiccup)]
        );
    }
}
