//! The markup AST.
//!
//! One tree is built per expansion call and dropped once rendered. Every string a
//! numbering token may appear in (tag names, ids, classes, attribute values, text)
//! is a [`Template`]: literal runs interleaved with [`NumberingExpr`]s that the
//! multiplier resolves per copy.

use serde::Serialize;
use std::fmt;

/// A `$`-run placeholder: `$$@-3` is width 2, descending, base 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumberingExpr {
    pub digits: usize,
    pub ascending: bool,
    pub base: u64,
}

impl NumberingExpr {
    pub fn new(digits: usize, ascending: bool, base: u64) -> Self {
        Self {
            digits,
            ascending,
            base,
        }
    }

    /// The number substituted for copy `index` out of `limit` copies.
    ///
    /// Ascending: `base + index`. Descending: `base + (limit - 1) - index`.
    pub fn value(&self, index: usize, limit: usize) -> u64 {
        let index = index as u64;
        if self.ascending {
            self.base.saturating_add(index)
        } else {
            let last = (limit as u64).saturating_sub(1);
            self.base.saturating_add(last.saturating_sub(index))
        }
    }

    /// [`value`](Self::value) zero-padded to the token's width.
    pub fn format(&self, index: usize, limit: usize) -> String {
        format!("{:0width$}", self.value(index, limit), width = self.digits)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Segment {
    Literal(String),
    Numbering(NumberingExpr),
}

/// A string that may still contain unresolved numbering tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn new(segments: Vec<Segment>) -> Self {
        let mut template = Template::default();
        for segment in segments {
            template.push(segment);
        }
        template
    }

    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Template::default();
        }
        Template {
            segments: vec![Segment::Literal(text)],
        }
    }

    /// Append a segment, merging adjacent literals.
    pub fn push(&mut self, segment: Segment) {
        if let Segment::Literal(text) = &segment {
            if text.is_empty() {
                return;
            }
            if let Some(Segment::Literal(prev)) = self.segments.last_mut() {
                prev.push_str(text);
                return;
            }
        }
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The text, if the template holds no numbering token.
    pub fn as_literal(&self) -> Option<&str> {
        match self.segments.as_slice() {
            [] => Some(""),
            [Segment::Literal(text)] => Some(text),
            _ => None,
        }
    }

    /// Replace every numbering token with its value for copy `index` of `limit`.
    pub fn resolve(&self, index: usize, limit: usize) -> Template {
        let text = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Numbering(expr) => expr.format(index, limit),
            })
            .collect::<String>();
        Template::literal(text)
    }

    /// Flatten to a string; tokens outside any multiplier count as copy 1 of 1.
    pub fn to_text(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Numbering(expr) => expr.format(0, 1),
            })
            .collect()
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for Template {
    fn from(text: &str) -> Self {
        Template::literal(text)
    }
}

/// An element with its selector parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub name: Template,
    /// `false` when the abbreviation ended the name with `/`.
    pub has_body: bool,
    pub id: Option<Template>,
    pub classes: Vec<Template>,
    pub properties: Vec<(String, Template)>,
    pub text: Option<Template>,
}

impl Tag {
    pub fn new(name: impl Into<Template>) -> Self {
        Self {
            name: name.into(),
            has_body: true,
            id: None,
            classes: Vec::new(),
            properties: Vec::new(),
            text: None,
        }
    }

    /// The literal tag name, if it carries no numbering token.
    pub fn literal_name(&self) -> Option<&str> {
        self.name.as_literal()
    }
}

/// A node of the markup tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Node {
    Tag(Tag),
    Text {
        content: Template,
    },
    /// Copies produced by a multiplier, in generation order.
    List {
        items: Vec<Node>,
    },
    ParentChild {
        parent: Tag,
        child: Box<Node>,
    },
    /// A `+` chain, flat so that long chains do not deepen the tree.
    Sibling {
        items: Vec<Node>,
    },
    /// Root produced by a `|filter` suffix.
    FilterWrap {
        filters: Vec<String>,
        inner: Box<Node>,
    },
    /// Placeholder for generated text, replaced before rendering.
    Lorem {
        word_count: usize,
    },
}

impl Node {
    pub fn tag(tag: Tag) -> Self {
        Node::Tag(tag)
    }

    pub fn text(content: impl Into<Template>) -> Self {
        Node::Text {
            content: content.into(),
        }
    }

    pub fn list(items: Vec<Node>) -> Self {
        Node::List { items }
    }

    /// `left + right`, extending `left` when it is already a chain.
    pub fn sibling(left: Node, right: Node) -> Self {
        match left {
            Node::Sibling { mut items } => {
                items.push(right);
                Node::Sibling { items }
            }
            left => Node::Sibling {
                items: vec![left, right],
            },
        }
    }

    pub fn parent_child(parent: Tag, child: Node) -> Self {
        Node::ParentChild {
            parent,
            child: Box::new(child),
        }
    }

    /// The first tag in depth-first, leftmost order.
    pub fn first_tag_mut(&mut self) -> Option<&mut Tag> {
        match self {
            Node::Tag(tag) => Some(tag),
            Node::ParentChild { parent, .. } => Some(parent),
            Node::Sibling { items } | Node::List { items } => {
                items.iter_mut().find_map(Node::first_tag_mut)
            }
            Node::FilterWrap { inner, .. } => inner.first_tag_mut(),
            Node::Text { .. } | Node::Lorem { .. } => None,
        }
    }

    /// Number of nodes in the tree, used to bound multiplier output.
    pub fn node_count(&self) -> usize {
        1 + match self {
            Node::ParentChild { child, .. } => child.node_count(),
            Node::Sibling { items } | Node::List { items } => {
                items.iter().map(Node::node_count).sum()
            }
            Node::FilterWrap { inner, .. } => inner.node_count(),
            Node::Tag(_) | Node::Text { .. } | Node::Lorem { .. } => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descending_numbering_counts_down_from_the_last_copy() {
        let expr = NumberingExpr::new(2, false, 3);
        assert_eq!(expr.format(0, 2), "04");
        assert_eq!(expr.format(1, 2), "03");
    }

    #[test]
    fn ascending_numbering_starts_at_base() {
        let expr = NumberingExpr::new(1, true, 1);
        assert_eq!(expr.format(0, 3), "1");
        assert_eq!(expr.format(2, 3), "3");
        assert_eq!(NumberingExpr::new(3, true, 0).format(7, 10), "007");
    }

    #[test]
    fn template_push_merges_literals() {
        let mut template = Template::literal("item");
        template.push(Segment::Literal("-".into()));
        template.push(Segment::Numbering(NumberingExpr::new(1, true, 1)));
        assert_eq!(template.segments().len(), 2);
        assert_eq!(template.resolve(4, 5).as_literal(), Some("item-5"));
        assert_eq!(template.to_text(), "item-1");
    }

    #[test]
    fn first_tag_is_leftmost_depth_first() {
        let mut node = Node::sibling(
            Node::text("x"),
            Node::parent_child(Tag::new("ul"), Node::tag(Tag::new("li"))),
        );
        assert_eq!(node.first_tag_mut().unwrap().literal_name(), Some("ul"));
    }

    #[test]
    fn sibling_chain_stays_flat() {
        let chain = (0..5).fold(Node::tag(Tag::new("p")), |chain, _| {
            Node::sibling(chain, Node::tag(Tag::new("p")))
        });
        let Node::Sibling { items } = &chain else {
            panic!("expected a sibling chain, got {chain:?}");
        };
        assert_eq!(items.len(), 6);
        assert!(items.iter().all(|item| matches!(item, Node::Tag(_))));
        assert_eq!(chain.node_count(), 7);
    }
}
