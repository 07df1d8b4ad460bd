//! Markup renderers.
//!
//! A [`MarkupRenderer`] formats one element at a time; the tree walker in this
//! module does everything the dialects share: resolving tag snippets, merging
//! default attributes, rendering children first and joining siblings with
//! newlines. Renderers are selected by [`Dialect`] and run as the first stage of a
//! [`FilterChain`](filter::FilterChain).

pub mod filter;
pub mod haml;
pub mod hiccup;
pub mod html;
pub mod snippet;

use crate::context::ExpansionContext;
use crate::lorem;
use crate::markup::alias::merge_properties;
use crate::markup::{Node, Tag, Template};
use crate::options::{Dialect, RenderOptions};
use crate::tables::TagSettings;

/// A tag with every template resolved and its content already rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub has_body: bool,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// Default attributes merged with the tag's own, in output order.
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    /// Rendered children, absent when there are none.
    pub content: Option<String>,
    pub settings: TagSettings,
}

impl Element {
    /// Text-free, content-free tags close themselves when the abbreviation said
    /// so (`br/`) or the tag is known to be void.
    pub fn is_self_closing(&self) -> bool {
        self.text.is_none() && self.content.is_none() && (!self.has_body || self.settings.self_closing)
    }

    /// Whether text and content go on their own indented lines.
    pub fn is_block(&self) -> bool {
        let multiline = |part: &Option<String>| part.as_deref().is_some_and(|s| s.contains('\n'));
        multiline(&self.text)
            || multiline(&self.content)
            || (self.settings.block && (self.text.is_some() || self.content.is_some()))
    }

    /// `#id.a.b`, or `None` for a tag without id and classes.
    pub fn selector(&self) -> Option<String> {
        if self.id.is_none() && self.classes.is_empty() {
            return None;
        }
        let mut selector = String::new();
        if let Some(id) = &self.id {
            selector.push('#');
            selector.push_str(id);
        }
        for class in &self.classes {
            selector.push('.');
            selector.push_str(class);
        }
        Some(selector)
    }
}

/// One markup dialect.
pub trait MarkupRenderer: Send + Sync {
    /// The filter name selecting this renderer (`html`, `c`, `haml`, `hic`).
    fn name(&self) -> &str;

    fn element(&self, element: &Element, options: &RenderOptions) -> String;

    /// A free-standing text node.
    fn text(&self, text: &str) -> String {
        text.to_string()
    }
}

pub fn renderer_for(dialect: Dialect) -> &'static dyn MarkupRenderer {
    match dialect {
        Dialect::Html => &html::HtmlRenderer,
        Dialect::CommentedHtml => &html::CommentedHtmlRenderer,
        Dialect::Haml => &haml::HamlRenderer,
        Dialect::Hiccup => &hiccup::HiccupRenderer,
    }
}

/// Render `node` in `dialect`.
pub fn render_tree(
    node: &Node,
    dialect: Dialect,
    ctx: &mut ExpansionContext,
    options: &RenderOptions,
) -> String {
    let renderer = renderer_for(dialect);
    tracing::trace!(renderer = renderer.name(), "rendering markup tree");
    TreeWalker {
        renderer,
        dialect,
        ctx,
        options,
    }
    .node(node)
}

/// `"\n"` followed by `text` with every line indented by `unit`.
pub fn indent(text: &str, unit: &str) -> String {
    let mut indented = String::with_capacity(text.len() + unit.len() + 1);
    indented.push('\n');
    indented.push_str(unit);
    indented.push_str(&text.replace('\n', &format!("\n{unit}")));
    indented
}

/// Join the non-empty parts with newlines.
fn join_lines(parts: impl IntoIterator<Item = String>) -> String {
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

struct TreeWalker<'a> {
    renderer: &'static dyn MarkupRenderer,
    dialect: Dialect,
    ctx: &'a mut ExpansionContext,
    options: &'a RenderOptions,
}

impl TreeWalker<'_> {
    fn node(&mut self, node: &Node) -> String {
        match node {
            Node::Tag(tag) => self.tag(tag, None),
            Node::ParentChild { parent, child } => self.tag(parent, Some(child)),
            Node::Sibling { items } | Node::List { items } => {
                let rendered: Vec<String> = items.iter().map(|item| self.node(item)).collect();
                join_lines(rendered)
            }
            Node::Text { content } => self.renderer.text(&content.to_text()),
            Node::FilterWrap { inner, .. } => self.node(inner),
            Node::Lorem { word_count } => {
                let text = lorem::generate(*word_count, self.ctx.rng());
                self.renderer.text(&text)
            }
        }
    }

    fn tag(&mut self, tag: &Tag, child: Option<&Node>) -> String {
        let name = tag.name.to_text();
        let content = child
            .map(|child| self.node(child))
            .filter(|content| !content.is_empty());
        let text = tag.text.as_ref().map(Template::to_text);

        if let Some(snippet) = self.ctx.markup_snippet(self.dialect, &name) {
            return snippet.apply(&join_lines(text.into_iter().chain(content)));
        }

        let settings = self
            .ctx
            .tables()
            .tag_settings(&name)
            .cloned()
            .unwrap_or_default();
        let own: Vec<(String, String)> = tag
            .properties
            .iter()
            .map(|(key, value)| (key.clone(), value.to_text()))
            .collect();
        let element = Element {
            attributes: merge_properties(&settings.default_attr, &own),
            name,
            has_body: tag.has_body,
            id: tag.id.as_ref().map(Template::to_text),
            classes: tag.classes.iter().map(Template::to_text).collect(),
            text,
            content,
            settings,
        };
        self.renderer.element(&element, self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(super) fn element(name: &str) -> Element {
        Element {
            name: name.to_string(),
            has_body: true,
            id: None,
            classes: Vec::new(),
            attributes: Vec::new(),
            text: None,
            content: None,
            settings: TagSettings::default(),
        }
    }

    #[test]
    fn indent_prefixes_every_line() {
        assert_eq!(indent("a\nb", "  "), "\n  a\n  b");
    }

    #[test]
    fn void_tag_self_closes_only_when_empty() {
        let mut br = element("br");
        br.settings = TagSettings::self_closing();
        assert!(br.is_self_closing());
        br.text = Some("x".into());
        assert!(!br.is_self_closing());
    }

    #[test]
    fn block_tag_without_content_stays_inline() {
        let mut ul = element("ul");
        ul.settings = TagSettings::block();
        assert!(!ul.is_block());
        ul.content = Some("<li></li>".into());
        assert!(ul.is_block());
    }

    #[test]
    fn selector_lists_id_then_classes() {
        let mut div = element("div");
        assert_eq!(div.selector(), None);
        div.id = Some("main".into());
        div.classes = vec!["a".into(), "b".into()];
        assert_eq!(div.selector().as_deref(), Some("#main.a.b"));
    }

    #[test]
    fn each_dialect_renders_under_its_filter_name() {
        for dialect in [Dialect::Html, Dialect::CommentedHtml, Dialect::Haml, Dialect::Hiccup] {
            assert_eq!(renderer_for(dialect).name(), dialect.filter_name());
        }
    }

    #[test]
    fn empty_list_leaves_no_blank_line() {
        assert_eq!(join_lines(["".to_string(), "b".to_string()]), "b");
    }
}
